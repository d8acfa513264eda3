use std::marker::PhantomData;

use crate::support::{
    config::ConfigError,
    consistency::{Outcome, Phase, SelfConsistent, Tolerance},
    constraint::{Constrained, StrictlyPositive},
};

use super::{Environment, Unknown};

/// Values handed to a [`Spectrum`] when evaluating a residual.
///
/// `temperature` is zero for a [`ZeroTempState`](super::ZeroTempState).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub temperature: f64,
    pub d1: f64,
    pub mu: f64,
    pub f0: f64,
    pub epsilon_min: f64,
}

/// Physics supplied by the caller for the `d1`, `mu`, `f0` equations.
///
/// Each residual is `unknown - rhs(point)`, where the right-hand side is the
/// mean-field expression for that unknown. Residuals should be continuous in
/// the unknown over its search domain.
pub trait Spectrum {
    /// Minimum of the unshifted one-particle spectrum for pairing amplitude `d1`.
    fn epsilon_min(&self, env: &Environment, d1: f64) -> f64;

    fn d1_residual(&self, env: &Environment, at: &Point) -> f64;

    fn mu_residual(&self, env: &Environment, at: &Point) -> f64;

    fn f0_residual(&self, env: &Environment, at: &Point) -> f64;
}

/// How a pairing state obtains its temperature.
pub trait Regime {
    /// Label attached to log events.
    const NAME: &'static str;

    /// Reads and checks the temperature from the environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the environment does not describe a
    /// valid temperature for this regime.
    fn temperature(env: &Environment) -> Result<f64, ConfigError>;
}

/// Temperature `t` read from the environment, strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FiniteTemperature;

impl Regime for FiniteTemperature {
    const NAME: &'static str = "finite temperature";

    fn temperature(env: &Environment) -> Result<f64, ConfigError> {
        let temperature: f64 = env.get("t")?;
        StrictlyPositive::new(temperature)
            .map(Constrained::into_inner)
            .map_err(|source| ConfigError::Constraint {
                key: "t".into(),
                source,
            })
    }
}

/// A pairing state with unknowns `d1`, `mu`, and `f0`.
///
/// The regime `R` only decides where the temperature comes from; use the
/// [`State`] and [`ZeroTempState`](super::ZeroTempState) aliases.
#[derive(Debug, Clone)]
pub struct PairingState<'env, S, R> {
    env: &'env Environment,
    spectrum: S,
    point: Point,
    phase: Phase,
    regime: PhantomData<R>,
}

/// A finite-temperature pairing state.
///
/// The temperature `t` is read from the environment at construction and must
/// be strictly positive.
pub type State<'env, S> = PairingState<'env, S, FiniteTemperature>;

impl<'env, S: Spectrum, R: Regime> PairingState<'env, S, R> {
    /// Creates a state with the environment's initial values.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the regime rejects the environment's
    /// temperature. For [`State`] that means `t` is missing, not a number,
    /// or not strictly positive.
    pub fn new(env: &'env Environment, spectrum: S) -> Result<Self, ConfigError> {
        let temperature = R::temperature(env)?;
        let d1 = env.d1().initial;
        let epsilon_min = spectrum.epsilon_min(env, d1);

        Ok(Self {
            env,
            spectrum,
            point: Point {
                temperature,
                d1,
                mu: env.mu().initial,
                f0: env.f0().initial,
                epsilon_min,
            },
            phase: Phase::default(),
            regime: PhantomData,
        })
    }

    /// Drives the state to self-consistency with the environment's driver.
    ///
    /// On failure the state keeps the values reached by the last round.
    pub fn make_self_consistent(&mut self) -> Outcome {
        let driver = self.env.driver();
        self.phase = Phase::Iterating;
        let outcome = driver.make_self_consistent(self);
        self.phase = outcome.phase();
        outcome
    }

    /// Returns true if every equation is within its tolerance.
    #[must_use]
    pub fn check_self_consistent(&self) -> bool {
        SelfConsistent::check_self_consistent(self)
    }

    #[must_use]
    pub fn check_d1(&self) -> bool {
        self.is_satisfied(Unknown::D1)
    }

    #[must_use]
    pub fn check_mu(&self) -> bool {
        self.is_satisfied(Unknown::Mu)
    }

    #[must_use]
    pub fn check_f0(&self) -> bool {
        self.is_satisfied(Unknown::F0)
    }

    #[must_use]
    pub fn abs_error_d1(&self) -> f64 {
        self.abs_error(Unknown::D1)
    }

    #[must_use]
    pub fn abs_error_mu(&self) -> f64 {
        self.abs_error(Unknown::Mu)
    }

    #[must_use]
    pub fn abs_error_f0(&self) -> f64 {
        self.abs_error(Unknown::F0)
    }

    #[must_use]
    pub fn rel_error_d1(&self) -> f64 {
        self.rel_error(Unknown::D1)
    }

    #[must_use]
    pub fn rel_error_mu(&self) -> f64 {
        self.rel_error(Unknown::Mu)
    }

    #[must_use]
    pub fn rel_error_f0(&self) -> f64 {
        self.rel_error(Unknown::F0)
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.point.temperature
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
    pub fn f0(&self) -> f64 {
        self.point.f0
    }

    #[must_use]
    pub fn epsilon_min(&self) -> f64 {
        self.point.epsilon_min
    }

    /// Returns a snapshot of every value.
    #[must_use]
    pub fn point(&self) -> Point {
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
            t = self.point.temperature,
            d1 = self.point.d1,
            mu = self.point.mu,
            f0 = self.point.f0,
            epsilon_min = self.point.epsilon_min,
            rel_error_d1 = self.rel_error_d1(),
            abs_error_mu = self.abs_error_mu(),
            abs_error_f0 = self.abs_error_f0(),
            phase = ?self.phase,
            regime = R::NAME,
            "pairing state"
        );
    }
}

impl<S: Spectrum, R> SelfConsistent for PairingState<'_, S, R> {
    type Unknown = Unknown;

    const UNKNOWNS: &'static [Unknown] = &[Unknown::D1, Unknown::Mu, Unknown::F0];

    fn value(&self, unknown: Unknown) -> f64 {
        match unknown {
            Unknown::D1 => self.point.d1,
            Unknown::Mu => self.point.mu,
            Unknown::F0 => self.point.f0,
        }
    }

    fn set_value(&mut self, unknown: Unknown, value: f64) {
        match unknown {
            Unknown::D1 => self.point.d1 = value,
            Unknown::Mu => self.point.mu = value,
            Unknown::F0 => self.point.f0 = value,
        }
    }

    fn residual(&self, unknown: Unknown, x: f64) -> f64 {
        let mut at = self.point;
        match unknown {
            Unknown::D1 => {
                at.d1 = x;
                at.epsilon_min = self.spectrum.epsilon_min(self.env, x);
                self.spectrum.d1_residual(self.env, &at)
            }
            Unknown::Mu => {
                at.mu = x;
                self.spectrum.mu_residual(self.env, &at)
            }
            Unknown::F0 => {
                at.f0 = x;
                self.spectrum.f0_residual(self.env, &at)
            }
        }
    }

    fn domain(&self, unknown: Unknown) -> [f64; 2] {
        match unknown {
            Unknown::D1 => self.env.d1().domain,
            Unknown::Mu => self.env.mu().domain,
            Unknown::F0 => self.env.f0().domain,
        }
    }

    fn tolerance(&self, unknown: Unknown) -> Tolerance {
        match unknown {
            Unknown::D1 => self.env.d1().tolerance,
            Unknown::Mu => self.env.mu().tolerance,
            Unknown::F0 => self.env.f0().tolerance,
        }
    }

    fn refresh(&mut self) {
        self.point.epsilon_min = self.spectrum.epsilon_min(self.env, self.point.d1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::thread;

    use approx::assert_relative_eq;

    use crate::{
        models::pairing::test_support::ToySpectrum,
        support::{config::ConfigData, consistency::Driver},
    };

    fn env(text: &str) -> Environment {
        Environment::from_toml_str(text).unwrap()
    }

    fn solve(env: &Environment) -> (State<'_, ToySpectrum>, Outcome) {
        let mut state = State::new(env, ToySpectrum::from_env(env)).unwrap();
        let outcome = state.make_self_consistent();
        (state, outcome)
    }

    #[test]
    fn converges_to_fixed_point() {
        let env = env("t = 0.1");
        let (state, outcome) = solve(&env);
        let (d1, mu, f0) = state.spectrum().solution(0.1);

        assert!(outcome.converged);
        assert_eq!(state.phase(), Phase::Converged);
        assert!(state.check_self_consistent());
        assert!(state.check_d1() && state.check_mu() && state.check_f0());

        assert_relative_eq!(state.d1(), d1, epsilon = 1e-6);
        assert_relative_eq!(state.mu(), mu, epsilon = 1e-6);
        assert_relative_eq!(state.f0(), f0, epsilon = 1e-6);
        assert_relative_eq!(state.epsilon_min(), -2.0 * state.d1());
    }

    #[test]
    fn errors_are_within_policy() {
        let env = env("t = 0.1");
        let (state, _) = solve(&env);

        assert!(state.rel_error_d1() < 1e-6);
        assert!(state.abs_error_mu() < 1e-6);
        assert!(state.abs_error_f0() < 1e-6);
        assert_relative_eq!(
            state.abs_error_d1(),
            state.rel_error_d1() * state.d1(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            state.rel_error_mu(),
            state.abs_error_mu() / state.mu().abs(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            state.rel_error_f0(),
            state.abs_error_f0() / state.f0(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn stays_put_at_fixed_point() {
        let env = env("t = 0.2");
        let (mut state, _) = solve(&env);
        let before = state.point();

        let driver = env.driver();
        for &unknown in State::<ToySpectrum>::UNKNOWNS {
            assert!(driver.fix(&mut state, unknown).is_converged());
        }

        assert!((state.d1() - before.d1).abs() < 1e-6 * before.d1);
        assert!((state.mu() - before.mu).abs() < 1e-6);
        assert!((state.f0() - before.f0).abs() < 1e-6);
    }

    #[test]
    fn d1_trial_uses_fresh_epsilon_min() {
        let env = env("t = 0.1");
        let state = State::new(&env, ToySpectrum::from_env(&env)).unwrap();
        assert_relative_eq!(state.epsilon_min(), -0.2);

        // Trial d1 = 0.5 sees epsilon_min = -1.0, not the cached -0.2.
        let expected = 0.5 - (0.3 * (1.0 + 0.05) - 0.1) / 1.1;
        assert_relative_eq!(state.residual(Unknown::D1, 0.5), expected, epsilon = 1e-12);
        assert_relative_eq!(state.epsilon_min(), -0.2);
    }

    #[test]
    fn starts_from_environment() {
        let env = env("t = 0.1\ninitial_d1 = 0.4\ninitial_mu = -0.2\ninitial_f0 = 0.6");
        let state = State::new(&env, ToySpectrum::from_env(&env)).unwrap();

        assert_eq!(state.phase(), Phase::Uninitialized);
        assert_relative_eq!(state.temperature(), 0.1);
        assert_relative_eq!(state.d1(), 0.4);
        assert_relative_eq!(state.mu(), -0.2);
        assert_relative_eq!(state.f0(), 0.6);
        assert_relative_eq!(state.epsilon_min(), -0.8);
    }

    #[test]
    fn requires_positive_temperature() {
        let missing = env("");
        assert!(matches!(
            State::new(&missing, ToySpectrum::from_env(&missing)),
            Err(ConfigError::Missing { key }) if key == "t"
        ));

        let zero = env("t = 0.0");
        assert!(matches!(
            State::new(&zero, ToySpectrum::from_env(&zero)),
            Err(ConfigError::Constraint { key, .. }) if key == "t"
        ));
    }

    #[test]
    fn keeps_partial_progress_when_rounds_run_out() {
        let env = env("t = 0.1\nmax_rounds = 1");
        let (state, outcome) = solve(&env);

        assert!(!outcome.converged);
        assert_eq!(outcome.rounds, 1);
        assert_eq!(state.phase(), Phase::Failed);
        assert!((state.d1() - 0.1).abs() > 1e-3);
    }

    #[test]
    fn unreachable_root_fails_without_moving() {
        let env = env("t = 0.1\nd1_bounds = [0.5, 1.0]\ninitial_d1 = 0.6\nmax_rounds = 5");
        let (state, outcome) = solve(&env);

        assert!(!outcome.converged);
        assert_eq!(outcome.failed_fixes, 5);
        assert_relative_eq!(state.d1(), 0.6);
        assert!(!state.check_d1());
    }

    #[test]
    fn sweep_solves_on_separate_threads() {
        let base = ConfigData::from_toml_str("coupling = 0.4").unwrap();
        let envs: Vec<Environment> = base
            .one_dim_sweep("t", 0.05, 0.2, 0.05)
            .unwrap()
            .into_iter()
            .map(|config| Environment::from_config(config).unwrap())
            .collect();

        let points: Vec<Point> = thread::scope(|scope| {
            let handles: Vec<_> = envs
                .iter()
                .map(|env| {
                    scope.spawn(move || {
                        let (state, outcome) = solve(env);
                        assert!(outcome.converged);
                        state.point()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(points.len(), 4);
        for point in points {
            let (d1, _, _) = ToySpectrum::from_env(&envs[0]).solution(point.temperature);
            assert_relative_eq!(point.d1, d1, epsilon = 1e-6);
        }
    }

    #[test]
    fn driver_comes_from_environment() {
        let env = env("t = 0.1\nbracket_steps = 10\nmax_rounds = 3");
        let state = State::new(&env, ToySpectrum::from_env(&env)).unwrap();

        let driver: Driver = state.environment().driver();
        assert_eq!(driver.root_finder.bracket_steps, 10);
        assert_eq!(driver.max_rounds, 3);
    }
}
