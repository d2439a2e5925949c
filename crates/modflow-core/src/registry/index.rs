use std::collections::HashMap;

use crate::ids::{CorrelationId, UserId};
use crate::workflow::WorkflowKind;

/// Índice `CorrelationId -> (usuario, tipo)`.
///
/// Se construye de forma incremental y nunca se poda: una entrada cuya
/// instancia ya fue removida queda obsoleta, y el `FlowRegistry` la resuelve
/// como "no encontrada" al verificar la instancia viva.
#[derive(Debug, Default)]
pub struct CorrelationIndex {
    inner: HashMap<CorrelationId, (UserId, WorkflowKind)>,
}

impl CorrelationIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: CorrelationId, owner: UserId, kind: WorkflowKind) {
        self.inner.insert(id, (owner, kind));
    }

    /// Entrada cruda, sin verificar si la instancia sigue registrada.
    pub fn get(&self, id: CorrelationId) -> Option<(UserId, WorkflowKind)> {
        self.inner.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
