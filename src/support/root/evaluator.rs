use twine_core::Model;

/// A scalar function the root finder can sample.
///
/// Implementations must be deterministic for a fixed `x` and safe to call
/// repeatedly in any order. Any context the function needs is captured by the
/// implementor, typically a closure borrowing the state being solved.
///
/// Out-of-domain inputs may return `NaN` or an infinity. Those values never
/// count as a sign change during bracketing, and they stop Brent refinement
/// with [`Status::NonFinite`](super::Status::NonFinite).
pub trait Evaluator {
    /// Evaluates the function at `x`.
    fn eval(&self, x: f64) -> f64;
}

impl<F> Evaluator for F
where
    F: Fn(f64) -> f64,
{
    fn eval(&self, x: f64) -> f64 {
        self(x)
    }
}

/// Adapts a scalar [`twine_core::Model`] into an [`Evaluator`].
///
/// A failed model call is reported to the root finder as `NaN`.
#[derive(Debug, Clone, Copy)]
pub struct ModelEvaluator<'a, M> {
    model: &'a M,
}

impl<'a, M> ModelEvaluator<'a, M>
where
    M: Model<Input = f64, Output = f64>,
{
    /// Wraps a borrowed model.
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }
}

impl<M> Evaluator for ModelEvaluator<'_, M>
where
    M: Model<Input = f64, Output = f64>,
{
    fn eval(&self, x: f64) -> f64 {
        match self.model.call(&x) {
            Ok(value) => value,
            Err(error) => {
                tracing::trace!(x, %error, "model call failed; treating as NaN");
                f64::NAN
            }
        }
    }
}
