//! Linear toy physics with a closed-form fixed point.
//!
//! ```text
//! epsilon_min = -2 d1
//! d1 = (g (1 + mu / 2) + epsilon_min / 10) / (1 + t)
//! mu = 0.2 - d1 / 2
//! f0 = 0.25 + d1 / 10 + t / 20
//! bc = (nu / x2)^(2/3),  nu = 0.01 (1 + d1),  x1 = x (1 + mu) / 2
//! ```

use super::{CritTempPoint, CritTempSpectrum, Environment, Point, Spectrum};

#[derive(Debug, Clone, Copy)]
pub(super) struct ToySpectrum {
    coupling: f64,
    doping: f64,
}

impl ToySpectrum {
    /// Reads `coupling` (default 0.3) and `x` (default 0.1) from the environment.
    pub(super) fn from_env(env: &Environment) -> Self {
        Self {
            coupling: env.get("coupling").unwrap_or(0.3),
            doping: env.get("x").unwrap_or(0.1),
        }
    }

    /// Exact `(d1, mu, f0)` at temperature `t`.
    pub(super) fn solution(&self, t: f64) -> (f64, f64, f64) {
        let g = self.coupling;
        let d1 = 1.1 * g / (1.2 + t + 0.25 * g);
        (d1, 0.2 - 0.5 * d1, 0.25 + 0.1 * d1 + 0.05 * t)
    }

    /// Exact `bc` at the critical point.
    pub(super) fn bc_solution(&self) -> f64 {
        let (d1, mu, _) = self.solution(0.0);
        bc(d1, self.doping - self.x1_at(mu))
    }

    fn x1_at(&self, mu: f64) -> f64 {
        0.5 * self.doping * (1.0 + mu)
    }

    fn d1_residual_at(&self, d1: f64, mu: f64, epsilon_min: f64, t: f64) -> f64 {
        d1 - (self.coupling * (1.0 + 0.5 * mu) + 0.1 * epsilon_min) / (1.0 + t)
    }
}

fn epsilon_min(d1: f64) -> f64 {
    -2.0 * d1
}

fn mu_residual(d1: f64, mu: f64) -> f64 {
    mu - (0.2 - 0.5 * d1)
}

fn bc(d1: f64, x2: f64) -> f64 {
    (0.01 * (1.0 + d1) / x2).powf(2.0 / 3.0)
}

impl Spectrum for ToySpectrum {
    fn epsilon_min(&self, _env: &Environment, d1: f64) -> f64 {
        epsilon_min(d1)
    }

    fn d1_residual(&self, _env: &Environment, at: &Point) -> f64 {
        self.d1_residual_at(at.d1, at.mu, at.epsilon_min, at.temperature)
    }

    fn mu_residual(&self, _env: &Environment, at: &Point) -> f64 {
        mu_residual(at.d1, at.mu)
    }

    fn f0_residual(&self, _env: &Environment, at: &Point) -> f64 {
        at.f0 - (0.25 + 0.1 * at.d1 + 0.05 * at.temperature)
    }
}

impl CritTempSpectrum for ToySpectrum {
    fn epsilon_min(&self, _env: &Environment, d1: f64) -> f64 {
        epsilon_min(d1)
    }

    fn d1_residual(&self, _env: &Environment, at: &CritTempPoint) -> f64 {
        self.d1_residual_at(at.d1, at.mu, at.epsilon_min, 0.0)
    }

    fn mu_residual(&self, _env: &Environment, at: &CritTempPoint) -> f64 {
        mu_residual(at.d1, at.mu)
    }

    fn x1(&self, _env: &Environment, at: &CritTempPoint) -> f64 {
        self.x1_at(at.mu)
    }

    fn bc(&self, _env: &Environment, at: &CritTempPoint) -> f64 {
        bc(at.d1, self.doping - self.x1_at(at.mu))
    }
}
