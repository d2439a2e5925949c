//! Tipos de evento de flujo y estructura `FlowEvent`.
//!
//! El registry emite un evento por cada cambio observable de una instancia.
//! El log es append-only y sobrevive a la eliminación de la instancia, así
//! que permite auditar flujos ya cerrados por su `CorrelationId`.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{CommunityId, CorrelationId, UserId};
use crate::workflow::{WorkflowKind, WorkflowState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlowEventKind {
    /// Instancia creada y registrada. Siempre es el primer evento de un ID.
    Started { owner: UserId, kind: WorkflowKind },
    /// El usuario envió un mensaje al flujo.
    MessageHandled { state: WorkflowState, replies: usize },
    /// El flujo entró en revisión de moderadores.
    ReviewRequested { community: Option<CommunityId> },
    /// Un moderador respondió con el prefijo del flujo.
    ModeratorAction { state: WorkflowState, replies: usize },
    /// La instancia llegó a un estado terminal y se quitó del registry.
    /// `opened_at`/`closed_at` vienen del `Lifecycle` de la instancia.
    Completed {
        state: WorkflowState,
        opened_at: DateTime<Utc>,
        closed_at: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlowEvent {
    pub seq: u64, // orden de append dentro del flujo
    pub correlation_id: CorrelationId,
    pub kind: FlowEventKind,
    pub ts: DateTime<Utc>,
}
