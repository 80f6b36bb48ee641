use uuid::Uuid;

use crate::{log_debug, log_warn};

/// Lifecycle of one optimistic mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationState {
    Pending,
    Committed,
    RolledBack,
}

/// Guard tracking one optimistic mutation through
/// pending → committed | rolled back.
///
/// The undo closure handed to [`begin`](Self::begin) must restore the local
/// cache to its pre-mutation value. It runs on [`roll_back`](Self::roll_back),
/// and also when the guard is dropped while still pending — an early return
/// or panic between the local apply and the server confirmation can never
/// leave an unconfirmed value in the cache.
pub struct OptimisticMutation {
    id: Uuid,
    label: &'static str,
    state: MutationState,
    undo: Option<Box<dyn FnOnce() + Send>>,
}

impl OptimisticMutation {
    /// Starts a mutation in the pending state. The local change has already
    /// been applied by the caller; `undo` reverses it.
    pub fn begin(label: &'static str, undo: impl FnOnce() + Send + 'static) -> Self {
        log_debug!("{}: optimistic apply", label);
        Self {
            id: Uuid::new_v4(),
            label,
            state: MutationState::Pending,
            undo: Some(Box::new(undo)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> MutationState {
        self.state
    }

    /// The server accepted the mutation; the optimistic value stands.
    pub fn commit(mut self) {
        self.undo = None;
        self.state = MutationState::Committed;
        log_debug!("{}: committed", self.label);
    }

    /// The server rejected the mutation; the pre-mutation value is restored.
    pub fn roll_back(mut self) {
        if let Some(undo) = self.undo.take() {
            undo();
        }
        self.state = MutationState::RolledBack;
        log_warn!("{}: rolled back", self.label);
    }
}

impl Drop for OptimisticMutation {
    fn drop(&mut self) {
        if self.state == MutationState::Pending {
            if let Some(undo) = self.undo.take() {
                log_warn!("{}: dropped while pending, rolling back", self.label);
                undo();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn flag() -> (Arc<AtomicBool>, impl FnOnce() + Send + 'static) {
        let rolled = Arc::new(AtomicBool::new(false));
        let undo = {
            let rolled = rolled.clone();
            move || rolled.store(true, Ordering::SeqCst)
        };
        (rolled, undo)
    }

    #[test]
    fn commit_skips_the_undo() {
        let (rolled, undo) = flag();
        let mutation = OptimisticMutation::begin("test.commit", undo);
        assert_eq!(mutation.state(), MutationState::Pending);
        mutation.commit();
        assert!(!rolled.load(Ordering::SeqCst));
    }

    #[test]
    fn roll_back_runs_the_undo() {
        let (rolled, undo) = flag();
        OptimisticMutation::begin("test.rollback", undo).roll_back();
        assert!(rolled.load(Ordering::SeqCst));
    }

    #[test]
    fn dropping_a_pending_mutation_rolls_back() {
        let (rolled, undo) = flag();
        drop(OptimisticMutation::begin("test.drop", undo));
        assert!(rolled.load(Ordering::SeqCst));
    }
}
