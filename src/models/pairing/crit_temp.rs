use std::fmt;

use crate::support::{
    config::ConfigError,
    consistency::{Outcome, Phase, SelfConsistent, Tolerance},
};

use super::Environment;

/// Unknowns of the critical-temperature state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CritTempUnknown {
    D1,
    Mu,
    /// Critical-temperature parameter.
    Bc,
}

impl fmt::Display for CritTempUnknown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::D1 => "d1",
            Self::Mu => "mu",
            Self::Bc => "bc",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CritTempPoint {
    pub d1: f64,
    pub mu: f64,
    pub bc: f64,
    pub epsilon_min: f64,
}

/// Critical-temperature physics supplied by the caller.
///
/// `bc` has no residual of its own: [`CritTempSpectrum::bc`] gives its value
/// directly from the other unknowns, and the state's `bc` equation is
/// `bc - bc(point)`.
pub trait CritTempSpectrum {
    fn epsilon_min(&self, env: &Environment, d1: f64) -> f64;

    fn d1_residual(&self, env: &Environment, at: &CritTempPoint) -> f64;

    fn mu_residual(&self, env: &Environment, at: &CritTempPoint) -> f64;

    /// Doping carried by the first hole species.
    fn x1(&self, env: &Environment, at: &CritTempPoint) -> f64;

    /// Closed-form `bc` for the current `d1` and `mu`.
    fn bc(&self, env: &Environment, at: &CritTempPoint) -> f64;
}

/// A pairing state at the critical temperature.
///
/// The doping `x` is read from the environment at construction.
#[derive(Debug, Clone)]
pub struct CritTempState<'env, S> {
    env: &'env Environment,
    spectrum: S,
    point: CritTempPoint,
    doping: f64,
    phase: Phase,
}

impl<'env, S: CritTempSpectrum> CritTempState<'env, S> {
    /// Creates a state with the environment's initial values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the doping `x` is missing or not a number.
    pub fn new(env: &'env Environment, spectrum: S) -> Result<Self, ConfigError> {
        let doping: f64 = env.get("x")?;
        let d1 = env.d1().initial;
        let epsilon_min = spectrum.epsilon_min(env, d1);

        Ok(Self {
            env,
            spectrum,
            point: CritTempPoint {
                d1,
                mu: env.mu().initial,
                bc: env.bc().initial,
                epsilon_min,
            },
            doping,
            phase: Phase::default(),
        })
    }

    /// Drives the state to self-consistency with the environment's driver.
    ///
    /// `d1` and `mu` are root-found each round; `bc` is then assigned from
    /// its closed form.
    pub fn make_self_consistent(&mut self) -> Outcome {
        let driver = self.env.driver();
        self.phase = Phase::Iterating;
        let outcome = driver.make_self_consistent(self);
        self.phase = outcome.phase();
        outcome
    }

    #[must_use]
    pub fn check_self_consistent(&self) -> bool {
        SelfConsistent::check_self_consistent(self)
    }

    #[must_use]
    pub fn check_d1(&self) -> bool {
        self.is_satisfied(CritTempUnknown::D1)
    }

    #[must_use]
    pub fn check_mu(&self) -> bool {
        self.is_satisfied(CritTempUnknown::Mu)
    }

    #[must_use]
    pub fn check_bc(&self) -> bool {
        self.is_satisfied(CritTempUnknown::Bc)
    }

    #[must_use]
    pub fn abs_error_d1(&self) -> f64 {
        self.abs_error(CritTempUnknown::D1)
    }

    #[must_use]
    pub fn abs_error_mu(&self) -> f64 {
        self.abs_error(CritTempUnknown::Mu)
    }

    #[must_use]
    pub fn abs_error_bc(&self) -> f64 {
        self.abs_error(CritTempUnknown::Bc)
    }

    #[must_use]
    pub fn rel_error_d1(&self) -> f64 {
        self.rel_error(CritTempUnknown::D1)
    }

    #[must_use]
    pub fn rel_error_mu(&self) -> f64 {
        self.rel_error(CritTempUnknown::Mu)
    }

    #[must_use]
    pub fn rel_error_bc(&self) -> f64 {
        self.rel_error(CritTempUnknown::Bc)
    }

    #[must_use]
    pub fn d1(&self) -> f64 {
        self.point.d1
    }

    #[must_use]
    pub fn mu(&self) -> f64 {
        self.point.mu
    }

    #[must_use]
    pub fn bc(&self) -> f64 {
        self.point.bc
    }

    #[must_use]
    pub fn epsilon_min(&self) -> f64 {
        self.point.epsilon_min
    }

    /// Total doping `x`.
    #[must_use]
    pub fn doping(&self) -> f64 {
        self.doping
    }

    /// Doping carried by the first hole species.
    #[must_use]
    pub fn x1(&self) -> f64 {
        self.spectrum.x1(self.env, &self.point)
    }

    /// Remaining doping, `x - x1`.
    #[must_use]
    pub fn x2(&self) -> f64 {
        self.doping - self.x1()
    }

    #[must_use]
    pub fn point(&self) -> CritTempPoint {
        self.point
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn environment(&self) -> &'env Environment {
        self.env
    }

    #[must_use]
    pub fn spectrum(&self) -> &S {
        &self.spectrum
    }

    /// Emits the current values and errors as one `info` event.
    pub fn log_state(&self) {
        tracing::info!(
            d1 = self.point.d1,
            mu = self.point.mu,
            bc = self.point.bc,
            epsilon_min = self.point.epsilon_min,
            x1 = self.x1(),
            x2 = self.x2(),
            rel_error_d1 = self.rel_error_d1(),
            abs_error_mu = self.abs_error_mu(),
            rel_error_bc = self.rel_error_bc(),
            phase = ?self.phase,
            "critical temperature state"
        );
    }
}

impl<S: CritTempSpectrum> SelfConsistent for CritTempState<'_, S> {
    type Unknown = CritTempUnknown;

    const UNKNOWNS: &'static [CritTempUnknown] = &[
        CritTempUnknown::D1,
        CritTempUnknown::Mu,
        CritTempUnknown::Bc,
    ];

    fn value(&self, unknown: CritTempUnknown) -> f64 {
        match unknown {
            CritTempUnknown::D1 => self.point.d1,
            CritTempUnknown::Mu => self.point.mu,
            CritTempUnknown::Bc => self.point.bc,
        }
    }

    fn set_value(&mut self, unknown: CritTempUnknown, value: f64) {
        match unknown {
            CritTempUnknown::D1 => self.point.d1 = value,
            CritTempUnknown::Mu => self.point.mu = value,
            CritTempUnknown::Bc => self.point.bc = value,
        }
    }

    fn residual(&self, unknown: CritTempUnknown, x: f64) -> f64 {
        let mut at = self.point;
        match unknown {
            CritTempUnknown::D1 => {
                at.d1 = x;
                at.epsilon_min = self.spectrum.epsilon_min(self.env, x);
                self.spectrum.d1_residual(self.env, &at)
            }
            CritTempUnknown::Mu => {
                at.mu = x;
                self.spectrum.mu_residual(self.env, &at)
            }
            CritTempUnknown::Bc => x - self.spectrum.bc(self.env, &at),
        }
    }

    fn domain(&self, unknown: CritTempUnknown) -> [f64; 2] {
        match unknown {
            CritTempUnknown::D1 => self.env.d1().domain,
            CritTempUnknown::Mu => self.env.mu().domain,
            CritTempUnknown::Bc => self.env.bc().domain,
        }
    }

    fn tolerance(&self, unknown: CritTempUnknown) -> Tolerance {
        match unknown {
            CritTempUnknown::D1 => self.env.d1().tolerance,
            CritTempUnknown::Mu => self.env.mu().tolerance,
            CritTempUnknown::Bc => self.env.bc().tolerance,
        }
    }

    fn closed_form(&self, unknown: CritTempUnknown) -> Option<f64> {
        match unknown {
            CritTempUnknown::Bc => Some(self.spectrum.bc(self.env, &self.point)),
            CritTempUnknown::D1 | CritTempUnknown::Mu => None,
        }
    }

    fn refresh(&mut self) {
        self.point.epsilon_min = self.spectrum.epsilon_min(self.env, self.point.d1);
    }
}
