use crate::support::constraint::{Constrained, ConstraintResult, StrictlyPositive};

/// Acceptance rule for one self-consistent equation.
///
/// The bound doubles as the bracket-width tolerance handed to the root finder
/// when the equation's unknown is re-derived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tolerance {
    /// The residual magnitude must stay below the bound.
    Absolute(Constrained<f64, StrictlyPositive>),

    /// The residual relative to the unknown's value must stay below the bound.
    Relative(Constrained<f64, StrictlyPositive>),
}

impl Tolerance {
    /// Creates an absolute tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `bound` is not strictly positive.
    pub fn absolute(bound: f64) -> ConstraintResult<Self> {
        Ok(Self::Absolute(StrictlyPositive::new(bound)?))
    }

    /// Creates a relative tolerance.
    ///
    /// # Errors
    ///
    /// Returns an error if `bound` is not strictly positive.
    pub fn relative(bound: f64) -> ConstraintResult<Self> {
        Ok(Self::Relative(StrictlyPositive::new(bound)?))
    }

    /// Returns the numeric bound.
    #[must_use]
    pub fn bound(&self) -> f64 {
        match self {
            Self::Absolute(bound) | Self::Relative(bound) => bound.get(),
        }
    }

    /// Returns true if the error selected by this policy is below the bound.
    #[must_use]
    pub fn is_met(&self, abs_error: f64, rel_error: f64) -> bool {
        match self {
            Self::Absolute(bound) => abs_error < bound.get(),
            Self::Relative(bound) => rel_error < bound.get(),
        }
    }
}
