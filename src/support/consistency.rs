//! Fixed-point driver for coupled scalar equations.
//!
//! A state that implements [`SelfConsistent`] declares its unknowns, how to
//! read and write each one, and the residual of each unknown's equation with
//! every other unknown held at its current value. [`Driver`] then re-derives
//! the unknowns one at a time, in declared order, with the bracketing
//! [`RootFinder`], repeating whole rounds until every equation is within
//! tolerance or the round budget runs out. Because each residual reads the
//! others' latest values, this is a Gauss-Seidel style nonlinear iteration.
//!
//! Failures are values: an unknown whose root search fails keeps its old value
//! for that round, and a driver that runs out of rounds leaves the state with
//! its last values and reports [`Outcome::converged`] as false.

mod outcome;
mod tolerance;

pub use outcome::{Outcome, Phase};
pub use tolerance::Tolerance;

use std::fmt;

use crate::support::root::{Root, RootFinder, SearchConfig, Status};

/// A state whose unknowns must jointly satisfy their defining equations.
///
/// Implementors describe each unknown; the provided methods derive the error
/// metrics and the overall consistency check from that description.
pub trait SelfConsistent {
    /// Names the unknowns of this state.
    type Unknown: Copy + fmt::Display + 'static;

    /// Every unknown, in the order the driver fixes them.
    ///
    /// Coupled unknowns come first; unknowns that nothing else depends on
    /// can follow.
    const UNKNOWNS: &'static [Self::Unknown];

    /// Returns the current value of an unknown.
    fn value(&self, unknown: Self::Unknown) -> f64;

    /// Replaces the current value of an unknown.
    ///
    /// Derived caches are not refreshed here; the driver calls
    /// [`SelfConsistent::refresh`] after every change.
    fn set_value(&mut self, unknown: Self::Unknown, value: f64);

    /// Evaluates the unknown's equation at trial value `x`.
    ///
    /// All other unknowns are taken at their current values.
    fn residual(&self, unknown: Self::Unknown, x: f64) -> f64;

    /// Returns the `[min, max]` interval searched for the unknown.
    fn domain(&self, unknown: Self::Unknown) -> [f64; 2];

    /// Returns the acceptance rule for the unknown's equation.
    fn tolerance(&self, unknown: Self::Unknown) -> Tolerance;

    /// Returns the unknown's value directly when its equation has a closed form.
    ///
    /// Unknowns with a closed form skip the root search.
    fn closed_form(&self, _unknown: Self::Unknown) -> Option<f64> {
        None
    }

    /// Recomputes every cached quantity derived from the unknowns.
    fn refresh(&mut self);

    /// Returns `|residual|` at the unknown's current value.
    fn abs_error(&self, unknown: Self::Unknown) -> f64 {
        self.residual(unknown, self.value(unknown)).abs()
    }

    /// Returns `|residual / value|` at the unknown's current value.
    ///
    /// Falls back to the absolute error when the value is exactly zero.
    fn rel_error(&self, unknown: Self::Unknown) -> f64 {
        let value = self.value(unknown);
        relative_error(self.residual(unknown, value), value)
    }

    /// Returns true if the unknown's equation is within its tolerance.
    fn is_satisfied(&self, unknown: Self::Unknown) -> bool {
        let value = self.value(unknown);
        let residual = self.residual(unknown, value);
        self.tolerance(unknown)
            .is_met(residual.abs(), relative_error(residual, value))
    }

    /// Returns true if every equation is within its tolerance.
    fn check_self_consistent(&self) -> bool {
        Self::UNKNOWNS.iter().all(|&unknown| self.is_satisfied(unknown))
    }
}

#[allow(clippy::float_cmp)]
fn relative_error(residual: f64, value: f64) -> f64 {
    if value == 0.0 {
        residual.abs()
    } else {
        (residual / value).abs()
    }
}

/// Runs fix operations and the self-consistency loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Driver {
    /// Root finder used for every unknown.
    pub root_finder: RootFinder,

    /// Maximum number of rounds before giving up.
    pub max_rounds: usize,
}

impl Default for Driver {
    fn default() -> Self {
        Self {
            root_finder: RootFinder::default(),
            max_rounds: 100,
        }
    }
}

impl Driver {
    /// Re-derives one unknown with every other unknown held fixed.
    ///
    /// The search starts from the unknown's current value, clamped into its
    /// domain. On convergence the new value is stored and the state's derived
    /// caches are refreshed; otherwise the state is left untouched.
    pub fn fix<S: SelfConsistent>(&self, state: &mut S, unknown: S::Unknown) -> Root {
        let root = match state.closed_form(unknown) {
            Some(x) => Root {
                status: if x.is_finite() {
                    Status::Converged
                } else {
                    Status::NonFinite
                },
                x,
                residual: state.residual(unknown, x),
                iters: 0,
            },
            None => {
                let current: &S = state;
                let search = search_config(current, unknown);
                self.root_finder
                    .find_root(&|x| current.residual(unknown, x), &search)
            }
        };

        tracing::debug!(
            %unknown,
            status = ?root.status,
            x = root.x,
            residual = root.residual,
            iters = root.iters,
            "fixed unknown"
        );

        if root.is_converged() {
            state.set_value(unknown, root.x);
            state.refresh();
        }

        root
    }

    /// Iterates the fix operations until the state is self-consistent.
    ///
    /// Each round fixes every unknown in [`SelfConsistent::UNKNOWNS`] order,
    /// refreshes the derived caches, then checks all equations. A fix that
    /// fails to converge does not end the round. On failure the state keeps
    /// its latest values.
    pub fn make_self_consistent<S: SelfConsistent>(&self, state: &mut S) -> Outcome {
        state.refresh();

        let mut failed_fixes = 0;

        for round in 1..=self.max_rounds {
            for &unknown in S::UNKNOWNS {
                if !self.fix(state, unknown).is_converged() {
                    failed_fixes += 1;
                }
            }
            state.refresh();

            let consistent = state.check_self_consistent();
            tracing::debug!(round, failed_fixes, consistent, "finished round");

            if consistent {
                tracing::info!(rounds = round, failed_fixes, "state is self-consistent");
                return Outcome {
                    converged: true,
                    rounds: round,
                    failed_fixes,
                };
            }
        }

        tracing::warn!(
            rounds = self.max_rounds,
            failed_fixes,
            "state did not become self-consistent"
        );
        Outcome {
            converged: false,
            rounds: self.max_rounds,
            failed_fixes,
        }
    }
}

/// Builds the root search for an unknown from its current value and domain.
fn search_config<S: SelfConsistent>(state: &S, unknown: S::Unknown) -> SearchConfig {
    let [min, max] = state.domain(unknown);
    let value = state.value(unknown);
    let guess = if value.is_finite() {
        value.max(min).min(max)
    } else {
        0.5 * (min + max)
    };

    SearchConfig {
        guess,
        min,
        max,
        tolerance: state.tolerance(unknown).bound(),
    }
}
