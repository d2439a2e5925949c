//! Errores específicos del core.

use thiserror::Error;

use crate::workflow::WorkflowState;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum CoreError {
    #[error("unknown workflow kind: {0}")] UnknownKind(String),
    #[error("invalid transition {from:?} -> {to:?}")] InvalidTransition { from: WorkflowState, to: WorkflowState },
}
