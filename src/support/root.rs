//! Bracketing root finder for scalar functions.
//!
//! [`RootFinder::find_root`] works in two stages:
//!
//! 1. [`RootFinder::bracket`] steps outward from a guess, alternating above
//!    and below it, until the function changes sign over a short interval.
//! 2. Brent's method refines that interval until its width drops below the
//!    requested tolerance.
//!
//! Failure is a value, never a panic: a search that cannot bracket or cannot
//! converge still returns its best point and the residual there, tagged with
//! a [`Status`].
//!
//! # Example
//!
//! ```
//! use meanfield::support::root::{RootFinder, SearchConfig};
//!
//! let search = SearchConfig::new(1.0, 0.0, 2.0, 1e-8).unwrap();
//! let root = RootFinder::default().find_root(&|x: f64| x * x - 2.0, &search);
//!
//! assert!(root.is_converged());
//! assert!((root.x - 2.0_f64.sqrt()).abs() < 1e-8);
//! ```

mod bracket;
mod brent;
mod evaluator;
mod search;
mod solution;

pub use bracket::Bracket;
pub use evaluator::{Evaluator, ModelEvaluator};
pub use search::{SearchConfig, SearchError};
pub use solution::{Root, Status};

/// Step and iteration budgets for root searches.
///
/// A `RootFinder` holds no state between calls and can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RootFinder {
    /// Number of steps used to cover each half of the domain while bracketing.
    pub bracket_steps: usize,

    /// Maximum Brent iterations once a bracket is found.
    pub max_iters: usize,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self {
            bracket_steps: 100,
            max_iters: 1000,
        }
    }
}

impl RootFinder {
    /// Searches outward from `search.guess` for an interval where `f` changes sign.
    ///
    /// See [`Bracket`] for the guarantees on a successful result.
    pub fn bracket(&self, f: &impl Evaluator, search: &SearchConfig) -> Bracket {
        debug_assert!(search.validate().is_ok(), "invalid search: {search:?}");
        bracket::search(f, search, self.bracket_steps)
    }

    /// Finds a root of `f` near `search.guess`.
    ///
    /// If no bracket is found, the result has [`Status::NoBracket`], `x` equal
    /// to the guess, and the residual at the guess.
    pub fn find_root(&self, f: &impl Evaluator, search: &SearchConfig) -> Root {
        let bracket = self.bracket(f, search);

        if !bracket.success {
            return Root {
                status: Status::NoBracket,
                x: search.guess,
                residual: f.eval(search.guess),
                iters: 0,
            };
        }

        brent::refine(f, &bracket, search.tolerance, self.max_iters)
    }
}
