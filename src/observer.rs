//! Injected observation hook for intermediate states.

use crate::shares::Share;
use crate::state::StatePair;

/// Point in the computation at which an [`Observer`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// State entering a permutation call.
    PermutationInput,
    /// After round constant addition.
    ConstantAddition,
    /// After the masked substitution layer.
    Substitution,
    /// After the linear diffusion layer.
    LinearDiffusion,
    /// After initialization and key addition.
    Initialization,
    /// After associated data absorption and domain separation.
    AssociatedData,
    /// After the last message block.
    Plaintext,
    /// After finalization.
    Finalization,
}

impl Stage {
    /// Short label for log lines.
    pub fn label(self) -> &'static str {
        match self {
            Stage::PermutationInput => "permutation input",
            Stage::ConstantAddition => "round constant addition",
            Stage::Substitution => "substitution layer",
            Stage::LinearDiffusion => "linear diffusion layer",
            Stage::Initialization => "initialization",
            Stage::AssociatedData => "process associated data",
            Stage::Plaintext => "process plaintext",
            Stage::Finalization => "finalization",
        }
    }

    /// `true` for the per-round stages inside the permutation.
    pub fn is_round_step(self) -> bool {
        matches!(
            self,
            Stage::PermutationInput
                | Stage::ConstantAddition
                | Stage::Substitution
                | Stage::LinearDiffusion
        )
    }
}

/// Receives the two-share state at each [`Stage`].
pub trait Observer {
    /// Called with the current state; must not modify the computation.
    fn observe(&mut self, stage: Stage, state: &StatePair);
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoObserver;

impl Observer for NoObserver {
    #[inline(always)]
    fn observe(&mut self, _stage: Stage, _state: &StatePair) {}
}

/// Dumps both shares and their XOR through `log::trace!`.
///
/// This prints the unmasked state. It is a debugging aid for matching the
/// software oracle against hardware, not something to leave on while traces
/// are captured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver {
    /// Also dump the per-round steps inside every permutation.
    pub rounds: bool,
}

impl Observer for LogObserver {
    fn observe(&mut self, stage: Stage, state: &StatePair) {
        if stage.is_round_step() && !self.rounds {
            return;
        }
        let [a0, a1, a2, a3, a4] = *state.share(Share::First);
        let [b0, b1, b2, b3, b4] = *state.share(Share::Second);
        let [x0, x1, x2, x3, x4] = state.recombined();
        log::trace!(
            "{} state share 1: {:016x} {:016x} {:016x} {:016x} {:016x}",
            stage.label(),
            a0,
            a1,
            a2,
            a3,
            a4
        );
        log::trace!(
            "{} state share 2: {:016x} {:016x} {:016x} {:016x} {:016x}",
            stage.label(),
            b0,
            b1,
            b2,
            b3,
            b4
        );
        log::trace!(
            "{} state-xor: {:016x} {:016x} {:016x} {:016x} {:016x}",
            stage.label(),
            x0,
            x1,
            x2,
            x3,
            x4
        );
    }
}

impl<O: Observer + ?Sized> Observer for &mut O {
    fn observe(&mut self, stage: Stage, state: &StatePair) {
        (**self).observe(stage, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_steps_are_classified() {
        assert!(Stage::Substitution.is_round_step());
        assert!(!Stage::Finalization.is_round_step());
        assert_eq!(Stage::AssociatedData.label(), "process associated data");
    }
}
