use crate::lifecycle::TransitionError;
use crate::store::StoreError;
use thiserror::Error;

pub type PanelResult<T> = std::result::Result<T, PanelError>;

/// Top-level error for embedders composing the crate's fallible pieces.
/// Nothing in the lifecycle core itself is fatal; these surface only from
/// direct use of the state machine or a storage backend.
#[derive(Debug, Error)]
pub enum PanelError {
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::{LifecycleMachine, PanelEvent};

    #[test]
    fn transition_errors_convert_for_embedder_call_chains() {
        fn drive(machine: &mut LifecycleMachine) -> PanelResult<()> {
            machine.apply(PanelEvent::Exit)?;
            Ok(())
        }

        let err = drive(&mut LifecycleMachine::new()).unwrap_err();
        assert!(matches!(err, PanelError::Transition(_)));
    }
}
