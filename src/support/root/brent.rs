//! Brent's method on an existing bracket.
//!
//! Each step takes an inverse quadratic interpolation or secant step when it
//! stays well inside the bracket and falls back to bisection otherwise, so the
//! root never leaves the bracket.
//!
//! Reference: Brent, R. P. (1973). "Algorithms for Minimization without
//! Derivatives." Prentice-Hall, Chapter 4.

use super::{Bracket, Evaluator, Root, Status};

/// Outcome of a single Brent step.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Step {
    /// The bracket shrank; refinement may continue.
    Continue,

    /// An exact zero was hit or the bracket reached machine precision.
    Exact,

    /// The evaluator returned a non-finite value at the new estimate.
    NonFinite,
}

/// Working state of the solver.
///
/// `b` is the current best estimate, `a` the previous one, and `c` the
/// point keeping the root bracketed together with `b`.
#[derive(Debug, Clone, Copy)]
struct Brent {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    fa: f64,
    fb: f64,
    fc: f64,
}

impl Brent {
    fn new(bracket: &Bracket) -> Self {
        let width = bracket.right - bracket.left;
        Self {
            a: bracket.left,
            b: bracket.right,
            c: bracket.right,
            d: width,
            e: width,
            fa: bracket.f_left,
            fb: bracket.f_right,
            fc: bracket.f_right,
        }
    }

    /// Current `[lower, upper]` interval known to contain the root.
    fn interval(&self) -> [f64; 2] {
        if self.b < self.c {
            [self.b, self.c]
        } else {
            [self.c, self.b]
        }
    }

    fn step(&mut self, f: &impl Evaluator) -> Step {
        let mut ac_equal = false;

        if same_sign(self.fb, self.fc) {
            ac_equal = true;
            self.c = self.a;
            self.fc = self.fa;
            self.d = self.b - self.a;
            self.e = self.b - self.a;
        }

        if self.fc.abs() < self.fb.abs() {
            ac_equal = true;
            self.a = self.b;
            self.b = self.c;
            self.c = self.a;
            self.fa = self.fb;
            self.fb = self.fc;
            self.fc = self.fa;
        }

        let tol = 0.5 * f64::EPSILON * self.b.abs();
        let m = 0.5 * (self.c - self.b);

        if self.fb == 0.0 {
            self.c = self.b;
            return Step::Exact;
        }

        if m.abs() <= tol {
            return Step::Exact;
        }

        if self.e.abs() < tol || self.fa.abs() <= self.fb.abs() {
            self.d = m;
            self.e = m;
        } else {
            let s = self.fb / self.fa;
            let (mut p, mut q) = if ac_equal {
                (2.0 * m * s, 1.0 - s)
            } else {
                let q = self.fa / self.fc;
                let r = self.fb / self.fc;
                (
                    s * (2.0 * m * q * (q - r) - (self.b - self.a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };

            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }

            let limit = (3.0 * m * q - (tol * q).abs()).min((self.e * q).abs());
            if 2.0 * p < limit {
                self.e = self.d;
                self.d = p / q;
            } else {
                self.d = m;
                self.e = m;
            }
        }

        self.a = self.b;
        self.fa = self.fb;

        if self.d.abs() > tol {
            self.b += self.d;
        } else {
            self.b += if m > 0.0 { tol } else { -tol };
        }

        self.fb = f.eval(self.b);
        if !self.fb.is_finite() {
            return Step::NonFinite;
        }

        if same_sign(self.fb, self.fc) {
            self.c = self.a;
        }

        Step::Continue
    }
}

fn same_sign(x: f64, y: f64) -> bool {
    (x < 0.0 && y < 0.0) || (x > 0.0 && y > 0.0)
}

/// Refines a successful bracket until its width is below `tolerance`.
///
/// The width test is absolute with no relative part.
pub(super) fn refine(
    f: &impl Evaluator,
    bracket: &Bracket,
    tolerance: f64,
    max_iters: usize,
) -> Root {
    debug_assert!(bracket.success, "refine requires a successful bracket");

    for (x, residual) in [
        (bracket.left, bracket.f_left),
        (bracket.right, bracket.f_right),
    ] {
        if !residual.is_finite() {
            tracing::trace!(x, residual, "bracket endpoint is not finite");
            return Root {
                status: Status::NonFinite,
                x,
                residual,
                iters: 0,
            };
        }
    }

    let mut brent = Brent::new(bracket);
    let mut status = Status::MaxIters;
    let mut iters = 0;

    while iters < max_iters {
        iters += 1;

        match brent.step(f) {
            Step::NonFinite => {
                status = Status::NonFinite;
                break;
            }
            Step::Exact | Step::Continue => {
                let [lower, upper] = brent.interval();
                if (upper - lower).abs() < tolerance {
                    status = Status::Converged;
                    break;
                }
            }
        }
    }

    let x = brent.b;
    let residual = if status == Status::NonFinite {
        brent.fb
    } else {
        f.eval(x)
    };

    tracing::trace!(?status, x, residual, iters, "brent refinement finished");

    Root {
        status,
        x,
        residual,
        iters,
    }
}
