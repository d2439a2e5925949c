use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Estado observable de un flujo.
///
/// Las transiciones válidas son:
/// - `Collecting` -> `AwaitingModReview`
/// - `Collecting` -> `Cancelled`
/// - `AwaitingModReview` -> `Resolved`
/// - `AwaitingModReview` -> `Cancelled`
///
/// `Idle` no existe como variante: un flujo no creado no tiene instancia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowState {
    /// Recolectando información del usuario paso a paso.
    Collecting,
    /// Esperando la decisión de un moderador.
    AwaitingModReview,
    /// Un moderador cerró el flujo.
    Resolved,
    /// El usuario canceló.
    Cancelled,
}

impl WorkflowState {
    pub fn is_terminal(self) -> bool {
        matches!(self, WorkflowState::Resolved | WorkflowState::Cancelled)
    }

    pub fn can_transition_to(self, to: WorkflowState) -> bool {
        use WorkflowState::*;
        matches!((self, to),
                 (Collecting, AwaitingModReview) | (Collecting, Cancelled) | (AwaitingModReview, Resolved) | (AwaitingModReview, Cancelled))
    }
}

/// Máquina de estados compartida por todos los tipos de flujo.
///
/// Además del estado guarda la señal de flanco `review_edge`: vale `true` sólo
/// si la última transición (dentro del turno actual) entró en
/// `AwaitingModReview`. Cada llamada a `handle_message`/`mod_flow` debe abrir
/// su turno con `begin_turn`.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: WorkflowState,
    review_edge: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Lifecycle {
    pub fn new() -> Self {
        let now = Utc::now();
        Self { state: WorkflowState::Collecting,
               review_edge: false,
               created_at: now,
               updated_at: now }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Inicia un turno: la señal de revisión sólo describe la última transición.
    pub fn begin_turn(&mut self) {
        self.review_edge = false;
    }

    pub fn transition(&mut self, to: WorkflowState) -> Result<(), CoreError> {
        if !self.state.can_transition_to(to) {
            return Err(CoreError::InvalidTransition { from: self.state, to });
        }
        self.review_edge = to == WorkflowState::AwaitingModReview;
        self.state = to;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn review_requested(&self) -> bool {
        self.review_edge
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn is_collecting(&self) -> bool {
        self.state == WorkflowState::Collecting
    }

    pub fn in_review(&self) -> bool {
        self.state == WorkflowState::AwaitingModReview
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_edge_is_cleared_by_next_turn() {
        let mut lc = Lifecycle::new();
        assert!(!lc.review_requested());
        lc.begin_turn();
        lc.transition(WorkflowState::AwaitingModReview).unwrap();
        assert!(lc.review_requested());
        lc.begin_turn();
        assert!(!lc.review_requested(), "edge must not persist across turns");
        assert!(lc.in_review());
    }

    #[test]
    fn terminal_states_reject_transitions() {
        let mut lc = Lifecycle::new();
        let opened = lc.created_at();
        lc.transition(WorkflowState::Cancelled).unwrap();
        assert!(lc.is_complete());
        assert!(lc.updated_at() >= opened);
        assert_eq!(lc.created_at(), opened);
        let err = lc.transition(WorkflowState::AwaitingModReview).unwrap_err();
        assert_eq!(err,
                   CoreError::InvalidTransition { from: WorkflowState::Cancelled,
                                                  to: WorkflowState::AwaitingModReview });
    }

    #[test]
    fn collecting_cannot_jump_to_resolved() {
        let mut lc = Lifecycle::new();
        assert!(lc.transition(WorkflowState::Resolved).is_err());
        assert!(lc.is_collecting());
    }
}
