use thiserror::Error;

use crate::support::constraint::{ConstraintError, Finite, StrictlyPositive};

/// Where to look for a root and when to stop refining it.
///
/// Fields are public so a config can be built in place, but the invariants
/// `min <= guess <= max` (all finite) and `tolerance > 0` must hold before a
/// search starts. Use [`SearchConfig::new`] or [`SearchConfig::validate`] to
/// check them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Starting point for the outward bracket search.
    pub guess: f64,

    /// Lower end of the search domain.
    pub min: f64,

    /// Upper end of the search domain.
    pub max: f64,

    /// Absolute bracket width below which a refined root is accepted.
    pub tolerance: f64,
}

/// Errors reported when a [`SearchConfig`] violates its invariants.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SearchError {
    #[error("search endpoint is not finite: {0}")]
    NonFiniteEndpoint(#[source] ConstraintError),

    #[error("domain is inverted: min={min} > max={max}")]
    InvertedDomain { min: f64, max: f64 },

    #[error("guess {guess} lies outside [{min}, {max}]")]
    GuessOutOfDomain { guess: f64, min: f64, max: f64 },

    #[error("invalid tolerance: {0}")]
    Tolerance(#[source] ConstraintError),
}

impl SearchConfig {
    /// Creates a validated search config.
    ///
    /// # Errors
    ///
    /// Returns a [`SearchError`] if any invariant is violated.
    pub fn new(guess: f64, min: f64, max: f64, tolerance: f64) -> Result<Self, SearchError> {
        let config = Self {
            guess,
            min,
            max,
            tolerance,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the config invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`SearchError`].
    pub fn validate(&self) -> Result<(), SearchError> {
        for value in [self.guess, self.min, self.max] {
            Finite::new(value).map_err(SearchError::NonFiniteEndpoint)?;
        }

        if self.min > self.max {
            return Err(SearchError::InvertedDomain {
                min: self.min,
                max: self.max,
            });
        }

        if self.guess < self.min || self.guess > self.max {
            return Err(SearchError::GuessOutOfDomain {
                guess: self.guess,
                min: self.min,
                max: self.max,
            });
        }

        StrictlyPositive::new(self.tolerance).map_err(SearchError::Tolerance)?;

        Ok(())
    }
}
