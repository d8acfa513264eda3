//! Mean-field pairing states.
//!
//! Three variants share one [`Environment`] and the generic
//! [`Driver`](crate::support::consistency::Driver):
//!
//! - [`State`]: finite temperature, unknowns `d1`, `mu`, and `f0`.
//! - [`ZeroTempState`]: the same unknowns at zero temperature.
//! - [`CritTempState`]: unknowns `d1`, `mu`, and `bc` at the critical
//!   temperature, with `bc` given in closed form.
//!
//! The first two are aliases of one [`PairingState`] and differ only in the
//! [`Regime`] that supplies the temperature.
//!
//! `d1` and `mu` are coupled and are always fixed first, in that order.
//! Each state caches `epsilon_min`, the minimum of the unshifted spectrum,
//! which depends on `d1` and is recomputed whenever `d1` changes.
//!
//! The physics lives behind the spectrum traits ([`Spectrum`] and
//! [`CritTempSpectrum`]). A spectrum receives the environment and a snapshot
//! of the unknowns and returns the residual of one equation, so zone integration and occupation functions stay outside this
//! crate.

mod crit_temp;
mod environment;
mod state;
mod zero_temp;

#[cfg(test)]
mod test_support;

pub use crit_temp::{CritTempPoint, CritTempSpectrum, CritTempState, CritTempUnknown};
pub use environment::{Environment, Equation};
pub use state::{FiniteTemperature, PairingState, Point, Regime, Spectrum, State};
pub use zero_temp::{ZeroTemperature, ZeroTempState};

use std::fmt;

/// Unknowns of the finite and zero temperature states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unknown {
    /// Pairing amplitude.
    D1,
    /// Chemical potential.
    Mu,
    /// Occupation fraction.
    F0,
}

impl fmt::Display for Unknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::D1 => "d1",
            Self::Mu => "mu",
            Self::F0 => "f0",
        };
        f.write_str(name)
    }
}
