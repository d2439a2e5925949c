use std::collections::HashMap;

use chrono::Utc;

use super::{FlowEvent, FlowEventKind};
use crate::ids::CorrelationId;

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo (con seq y ts).
    fn append_kind(&mut self, id: CorrelationId, kind: FlowEventKind) -> FlowEvent;
    /// Lista eventos de un flujo (orden ascendente por seq).
    fn list(&self, id: CorrelationId) -> Vec<FlowEvent>;
}

#[derive(Debug, Default)]
pub struct InMemoryEventStore {
    pub inner: HashMap<CorrelationId, Vec<FlowEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, id: CorrelationId, kind: FlowEventKind) -> FlowEvent {
        let vec = self.inner.entry(id).or_default();
        let seq = vec.len() as u64;
        let ev = FlowEvent { seq, correlation_id: id, kind, ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, id: CorrelationId) -> Vec<FlowEvent> {
        self.inner.get(&id).cloned().unwrap_or_default()
    }
}
