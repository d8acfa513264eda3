use super::{ConfigData, ConfigError};

/// Slack absorbing rounding in the sweep point count.
const COUNT_SLACK: f64 = 1e-9;

/// Largest number of configs a single sweep may produce.
pub const MAX_SWEEP_POINTS: usize = 100_000;

impl ConfigData {
    /// Produces one copy of this config per value of `key` in `start..=stop`.
    ///
    /// Values are `start + i * step` for every `i` that keeps them at or below
    /// `stop`, so `stop` itself is included only when the range divides
    /// evenly. All other keys are copied unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSweep`] if any bound is not finite,
    /// `step` is not strictly positive, `stop < start`, or the range holds
    /// more than [`MAX_SWEEP_POINTS`] values.
    pub fn one_dim_sweep(
        &self,
        key: &str,
        start: f64,
        stop: f64,
        step: f64,
    ) -> Result<Vec<ConfigData>, ConfigError> {
        let invalid = || ConfigError::InvalidSweep { start, stop, step };

        let valid = start.is_finite() && stop.is_finite() && step.is_finite() && step > 0.0;
        if !valid || stop < start {
            return Err(invalid());
        }

        let intervals = ((stop - start) / step + COUNT_SLACK).floor();
        #[allow(clippy::cast_precision_loss)]
        let limit = MAX_SWEEP_POINTS as f64;
        if !intervals.is_finite() || intervals >= limit {
            return Err(invalid());
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let count = (intervals as usize).checked_add(1).ok_or_else(invalid)?;

        #[allow(clippy::cast_precision_loss)]
        let configs = (0..count)
            .map(|i| {
                let mut config = self.clone();
                config.set(key, start + i as f64 * step);
                config
            })
            .collect();

        tracing::debug!(key, start, stop, step, count, "built sweep");
        Ok(configs)
    }
}
