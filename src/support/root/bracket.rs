use super::{Evaluator, SearchConfig};

/// An interval around a root, located by stepping outward from a guess.
///
/// When `success` is true, `f_left` and `f_right` are finite with opposite
/// signs (or one is exactly zero) and `min <= left <= right <= max`. Otherwise the bracket
/// spans the whole domain and both residuals are zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub success: bool,
    pub left: f64,
    pub right: f64,
    pub f_left: f64,
    pub f_right: f64,
}

impl Bracket {
    fn found(left: f64, right: f64, f_left: f64, f_right: f64) -> Self {
        Self {
            success: true,
            left,
            right,
            f_left,
            f_right,
        }
    }

    fn not_found(config: &SearchConfig) -> Self {
        Self {
            success: false,
            left: config.min,
            right: config.max,
            f_left: 0.0,
            f_right: 0.0,
        }
    }

    /// Returns the bracket width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
}

/// Searches outward from the guess for a sign change.
///
/// The half-width `(max - min) / 2` is split into `steps` equal steps. On
/// step `i` the interval just above the guess is tried first, then the one
/// just below. An upward interval whose right end passes `max` is cut off at
/// `max`, and once its left end also passes `max` it becomes
/// `[max - step, max]`. Downward intervals are clamped against `min` the same
/// way.
///
/// Both endpoints are evaluated on every step, so neighbouring intervals
/// evaluate their shared endpoint twice.
pub(super) fn search(f: &impl Evaluator, config: &SearchConfig, steps: usize) -> Bracket {
    #[allow(clippy::cast_precision_loss)]
    let step = (config.max - config.min) / (2.0 * steps as f64);

    for i in 1..=steps {
        #[allow(clippy::cast_precision_loss)]
        let i = i as f64;

        let mut right = config.guess + i * step;
        let mut left = config.guess + (i - 1.0) * step;
        if right > config.max {
            right = config.max;
        }
        if left > config.max {
            left = config.max - step;
        }
        if let Some(bracket) = sign_change_in(f, left, right) {
            return bracket;
        }

        let mut right = config.guess - (i - 1.0) * step;
        let mut left = config.guess - i * step;
        if left < config.min {
            left = config.min;
        }
        if right < config.min {
            right = config.min + step;
        }
        if let Some(bracket) = sign_change_in(f, left, right) {
            return bracket;
        }
    }

    tracing::debug!(
        guess = config.guess,
        min = config.min,
        max = config.max,
        steps,
        "no sign change found"
    );
    Bracket::not_found(config)
}

fn sign_change_in(f: &impl Evaluator, left: f64, right: f64) -> Option<Bracket> {
    let f_right = f.eval(right);
    let f_left = f.eval(left);
    is_sign_change(f_left, f_right).then(|| {
        tracing::trace!(left, right, f_left, f_right, "bracket found");
        Bracket::found(left, right, f_left, f_right)
    })
}

/// Returns true if the values differ in sign or either is exactly zero.
///
/// Both values must be finite, so a pole or a `NaN` never brackets a root.
fn is_sign_change(a: f64, b: f64) -> bool {
    a.is_finite() && b.is_finite() && ((a >= 0.0 && b <= 0.0) || (b >= 0.0 && a <= 0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::{Cell, RefCell};

    use approx::assert_relative_eq;

    fn config(guess: f64, min: f64, max: f64) -> SearchConfig {
        SearchConfig::new(guess, min, max, 1e-8).expect("valid search config")
    }

    #[test]
    fn finds_first_upward_interval() {
        // step = 0.01, root at 1.005 lies in [1.0, 1.01]
        let bracket = search(&|x: f64| x - 1.005, &config(1.0, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert_relative_eq!(bracket.left, 1.0);
        assert_relative_eq!(bracket.right, 1.01);
        assert!(bracket.f_left < 0.0 && bracket.f_right > 0.0);
    }

    #[test]
    fn finds_downward_interval() {
        let bracket = search(&|x: f64| x - 0.5, &config(1.0, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert!(bracket.left <= 0.5 && 0.5 <= bracket.right);
        assert_relative_eq!(bracket.width(), 0.01, epsilon = 1e-12);
        assert!(bracket.f_left <= 0.0 && bracket.f_right >= 0.0);
    }

    #[test]
    fn upward_interval_wins_ties() {
        // Roots at 0.995 and 1.005 are equally far from the guess.
        let f = |x: f64| (x - 0.995) * (x - 1.005);
        let bracket = search(&f, &config(1.0, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert_relative_eq!(bracket.left, 1.0);
    }

    #[test]
    fn exact_zero_counts_as_sign_change() {
        let bracket = search(&|x: f64| x * x, &config(0.0, -1.0, 1.0), 10);

        assert!(bracket.success);
        assert_relative_eq!(bracket.f_left, 0.0);
    }

    #[test]
    fn reports_domain_when_no_sign_change() {
        let bracket = search(&|x: f64| x + 5.0, &config(1.0, 0.0, 2.0), 100);

        assert!(!bracket.success);
        assert_relative_eq!(bracket.left, 0.0);
        assert_relative_eq!(bracket.right, 2.0);
        assert_relative_eq!(bracket.f_left, 0.0);
        assert_relative_eq!(bracket.f_right, 0.0);
    }

    #[test]
    fn nan_never_brackets() {
        let bracket = search(&|_: f64| f64::NAN, &config(1.0, 0.0, 2.0), 10);
        assert!(!bracket.success);
    }

    #[test]
    fn evaluates_both_endpoints_of_every_interval() {
        let calls = Cell::new(0);
        let f = |x: f64| {
            calls.set(calls.get() + 1);
            x + 5.0
        };

        search(&f, &config(1.0, 0.0, 2.0), 100);

        assert_eq!(calls.get(), 4 * 100);
    }

    #[test]
    fn zero_steps_never_evaluates() {
        let bracket = search(&|x: f64| x - 1.0, &config(1.0, 0.0, 2.0), 0);
        assert!(!bracket.success);
    }

    // The cases below characterize clamping for guesses at or near the
    // domain edges.

    #[test]
    fn guess_at_max_tries_degenerate_upward_interval() {
        // Upward interval on step 1 is [max, max]; f(max) = 0 brackets it.
        let bracket = search(&|x: f64| x - 2.0, &config(2.0, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert_relative_eq!(bracket.left, 2.0);
        assert_relative_eq!(bracket.right, 2.0);
    }

    #[test]
    fn guess_near_max_clamps_right_end_only() {
        // step = 0.01; guess sits 0.004 below max, so the first upward
        // interval is cut to [1.996, 2.0] rather than shifted.
        let bracket = search(&|x: f64| x - 1.999, &config(1.996, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert_relative_eq!(bracket.left, 1.996);
        assert_relative_eq!(bracket.right, 2.0);
    }

    #[test]
    fn guess_near_max_retries_last_step_below_max() {
        // Root below the guess: later upward intervals collapse onto
        // [max - step, max], which holds no root, and the downward search
        // finds it.
        let bracket = search(&|x: f64| x - 1.95, &config(1.996, 0.0, 2.0), 100);

        assert!(bracket.success);
        assert!(bracket.left <= 1.95 && 1.95 <= bracket.right);
        assert!(bracket.left >= 0.0 && bracket.right <= 2.0);
    }

    #[test]
    fn guess_at_min_clamps_downward_intervals() {
        let points = RefCell::new(Vec::new());
        let f = |x: f64| {
            points.borrow_mut().push(x);
            x + 5.0
        };

        // step = 0.1
        let bracket = search(&f, &config(0.0, 0.0, 0.6), 3);
        assert!(!bracket.success);

        // Each step evaluates right then left. Downward intervals collapse to
        // [min, min] on the first step and [min, min + step] afterwards.
        let expected = [
            0.1, 0.0, 0.0, 0.0, // step 1
            0.2, 0.1, 0.1, 0.0, // step 2
            0.3, 0.2, 0.1, 0.0, // step 3
        ];
        let points = points.into_inner();
        assert_eq!(points.len(), expected.len());
        for (x, want) in points.iter().zip(expected) {
            assert_relative_eq!(*x, want, epsilon = 1e-12);
        }
    }

    #[test]
    fn guess_near_min_keeps_bracket_inside_domain() {
        for offset in [0.0, 1e-9, 0.003, 0.01, 0.0149] {
            let guess = offset;
            let bracket = search(&|x: f64| x - 0.75, &config(guess, 0.0, 2.0), 100);

            assert!(bracket.success, "guess {guess} should bracket");
            assert!(bracket.left >= 0.0 && bracket.right <= 2.0);
            assert!(bracket.left <= bracket.right);
        }
    }

    #[test]
    fn guess_near_max_keeps_bracket_inside_domain() {
        for offset in [0.0, 1e-9, 0.003, 0.01, 0.0149] {
            let guess = 2.0 - offset;
            let bracket = search(&|x: f64| x - 1.25, &config(guess, 0.0, 2.0), 100);

            assert!(bracket.success, "guess {guess} should bracket");
            assert!(bracket.left >= 0.0 && bracket.right <= 2.0);
            assert!(bracket.left <= bracket.right);
        }
    }

    #[test]
    fn sign_change_rules() {
        assert!(is_sign_change(-1.0, 1.0));
        assert!(is_sign_change(1.0, -1.0));
        assert!(is_sign_change(0.0, 3.0));
        assert!(is_sign_change(-3.0, 0.0));
        assert!(!is_sign_change(1.0, 2.0));
        assert!(!is_sign_change(-1.0, -2.0));
        assert!(!is_sign_change(f64::NAN, 1.0));
        assert!(!is_sign_change(f64::NEG_INFINITY, f64::INFINITY));
        assert!(!is_sign_change(f64::INFINITY, -1.0));
        assert!(!is_sign_change(0.0, f64::NEG_INFINITY));
    }

    #[test]
    fn skips_intervals_touching_a_pole() {
        // Every interval with a finite sign change lies away from x = 1, so
        // the only candidates straddling the pole include it as an endpoint.
        let bracket = search(&|x: f64| 1.0 / (x - 1.0), &config(1.0, 0.0, 2.0), 100);

        assert!(!bracket.success);
    }
}
