/// Where a state is in its self-consistency lifecycle.
///
/// A state starts `Uninitialized`, is `Iterating` only while the driver holds
/// it, and always ends in `Converged` or `Failed` because the driver's round
/// budget is finite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Uninitialized,
    Iterating,
    Converged,
    Failed,
}

/// Summary of one [`Driver::make_self_consistent`](super::Driver::make_self_consistent) run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    /// True if every equation was within tolerance when the driver stopped.
    pub converged: bool,

    /// Rounds performed, each round fixing every unknown once.
    pub rounds: usize,

    /// Individual fixes that did not converge, summed over all rounds.
    pub failed_fixes: usize,
}

impl Outcome {
    /// Returns the terminal phase matching this outcome.
    #[must_use]
    pub fn phase(&self) -> Phase {
        if self.converged {
            Phase::Converged
        } else {
            Phase::Failed
        }
    }
}
