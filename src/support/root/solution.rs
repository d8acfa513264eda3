/// How a root search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The bracket shrank below the requested tolerance.
    Converged,

    /// No sign change was found near the guess within the step budget.
    NoBracket,

    /// A bracket was found but the iteration cap was reached first.
    MaxIters,

    /// The evaluator returned `NaN` or an infinity at a trial point.
    NonFinite,
}

/// The result of a root search.
///
/// A search never fails outright: even without convergence, `x` is the best
/// point known and `residual` is the function value there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Final search status.
    pub status: Status,

    /// Best estimate of the root.
    pub x: f64,

    /// Function value at `x`.
    pub residual: f64,

    /// Refinement iterations performed.
    pub iters: usize,
}

impl Root {
    /// Returns true if the search converged.
    #[must_use]
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}
