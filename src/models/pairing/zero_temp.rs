use crate::support::config::ConfigError;

use super::{Environment, PairingState, Regime};

/// Temperature fixed at zero; the `t` key is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroTemperature;

impl Regime for ZeroTemperature {
    const NAME: &'static str = "zero temperature";

    fn temperature(_env: &Environment) -> Result<f64, ConfigError> {
        Ok(0.0)
    }
}

/// A zero-temperature pairing state with unknowns `d1`, `mu`, and `f0`.
///
/// Spectra see `Point::temperature == 0.0`. Construction never fails.
pub type ZeroTempState<'env, S> = PairingState<'env, S, ZeroTemperature>;
