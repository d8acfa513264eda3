use serde::de::DeserializeOwned;

use crate::support::{
    config::{ConfigData, ConfigError},
    consistency::{Driver, Tolerance},
    constraint::{Constrained, StrictlyPositive},
    root::RootFinder,
};

const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Settings for one self-consistent equation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equation {
    /// Acceptance rule for the equation's residual.
    pub tolerance: Tolerance,

    /// Value the unknown starts from.
    pub initial: f64,

    /// Interval searched when the unknown is re-derived.
    pub domain: [f64; 2],
}

/// How an equation's tolerance is applied.
#[derive(Debug, Clone, Copy)]
enum Policy {
    Absolute,
    Relative,
}

/// Read-only configuration shared by every pairing state.
///
/// Solver settings are parsed once at construction; physical parameters stay
/// in the underlying [`ConfigData`] and are read with [`Environment::get`].
///
/// | key | default |
/// |-----|---------|
/// | `tol_d1` | `1e-6`, relative |
/// | `tol_mu` | `1e-6`, absolute |
/// | `tol_f0` | `1e-6`, absolute |
/// | `tol_bc` | `1e-6`, relative |
/// | `bracket_steps` | `100` |
/// | `root_max_iters` | `1000` |
/// | `max_rounds` | `100` |
/// | `initial_d1`, `initial_mu`, `initial_f0` | `0.1` |
/// | `initial_bc` | `1.0` |
/// | `d1_bounds`, `f0_bounds` | `[0, 1]` |
/// | `mu_bounds` | `[-1, 1]` |
/// | `bc_bounds` | `[0, 10]` |
///
/// `bc` is assigned from its closed form and never searched for, so
/// `bc_bounds` is validated but does not limit its value.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    config: ConfigData,
    driver: Driver,
    d1: Equation,
    mu: Equation,
    f0: Equation,
    bc: Equation,
}

impl Environment {
    /// Builds an environment from configuration data, applying defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a solver setting has the wrong type, a
    /// tolerance, `bracket_steps`, or `root_max_iters` is not strictly
    /// positive, or a bounds pair is not a finite, ordered interval.
    pub fn from_config(config: ConfigData) -> Result<Self, ConfigError> {
        let driver = Driver {
            root_finder: RootFinder {
                bracket_steps: positive_count(&config, "bracket_steps", 100)?,
                max_iters: positive_count(&config, "root_max_iters", 1000)?,
            },
            max_rounds: config.get_or("max_rounds", 100)?,
        };

        let d1 = equation(&config, "d1", Policy::Relative, 0.1, [0.0, 1.0])?;
        let mu = equation(&config, "mu", Policy::Absolute, 0.1, [-1.0, 1.0])?;
        let f0 = equation(&config, "f0", Policy::Absolute, 0.1, [0.0, 1.0])?;
        let bc = equation(&config, "bc", Policy::Relative, 1.0, [0.0, 10.0])?;

        Ok(Self {
            config,
            driver,
            d1,
            mu,
            f0,
            bc,
        })
    }

    /// Parses TOML text into an environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the text is not valid TOML or any solver
    /// setting is invalid.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Self::from_config(ConfigData::from_toml_str(text)?)
    }

    /// Returns the configuration value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] or [`ConfigError::Invalid`].
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ConfigError> {
        self.config.get(key)
    }

    /// Returns the underlying configuration data.
    #[must_use]
    pub fn config(&self) -> &ConfigData {
        &self.config
    }

    /// Returns the driver configured for this environment.
    #[must_use]
    pub fn driver(&self) -> Driver {
        self.driver
    }

    #[must_use]
    pub fn d1(&self) -> &Equation {
        &self.d1
    }

    #[must_use]
    pub fn mu(&self) -> &Equation {
        &self.mu
    }

    #[must_use]
    pub fn f0(&self) -> &Equation {
        &self.f0
    }

    #[must_use]
    pub fn bc(&self) -> &Equation {
        &self.bc
    }
}

/// Reads a count that must be at least one.
fn positive_count(config: &ConfigData, key: &str, default: usize) -> Result<usize, ConfigError> {
    let count = config.get_or(key, default)?;
    StrictlyPositive::new(count)
        .map(Constrained::into_inner)
        .map_err(|source| ConfigError::Constraint {
            key: key.to_owned(),
            source,
        })
}

/// Reads the tolerance, initial value, and domain of one equation.
fn equation(
    config: &ConfigData,
    name: &str,
    policy: Policy,
    initial: f64,
    domain: [f64; 2],
) -> Result<Equation, ConfigError> {
    let tol_key = format!("tol_{name}");
    let bound = config.get_or(&tol_key, DEFAULT_TOLERANCE)?;
    let tolerance = match policy {
        Policy::Absolute => Tolerance::absolute(bound),
        Policy::Relative => Tolerance::relative(bound),
    }
    .map_err(|source| ConfigError::Constraint {
        key: tol_key,
        source,
    })?;

    let bounds_key = format!("{name}_bounds");
    let [min, max] = config.get_or(&bounds_key, domain)?;
    if !(min.is_finite() && max.is_finite() && min <= max) {
        return Err(ConfigError::InvalidBounds {
            key: bounds_key,
            min,
            max,
        });
    }

    Ok(Equation {
        tolerance,
        initial: config.get_or(&format!("initial_{name}"), initial)?,
        domain: [min, max],
    })
}
