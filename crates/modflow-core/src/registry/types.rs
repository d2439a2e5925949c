use indexmap::map::Entry;
use indexmap::IndexMap;
use log::{debug, info};

use super::CorrelationIndex;
use crate::event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
use crate::ids::{CorrelationId, IdAllocator, UserId};
use crate::workflow::{Workflow, WorkflowFactory, WorkflowKind};

/// Dueño exclusivo de todas las instancias de flujo.
///
/// Invariantes:
/// - a lo sumo una instancia activa por (usuario, tipo);
/// - cada instancia creada consume exactamente un ID del asignador;
/// - una instancia sólo se quita cuando `complete()` es verdadero.
pub struct FlowRegistry<E: EventStore = InMemoryEventStore> {
    allocator: IdAllocator,
    factory: Box<dyn WorkflowFactory>,
    active: IndexMap<(UserId, WorkflowKind), Box<dyn Workflow>>,
    index: CorrelationIndex,
    event_store: E,
}

impl FlowRegistry<InMemoryEventStore> {
    /// Registry con log de eventos en memoria.
    pub fn new(factory: Box<dyn WorkflowFactory>) -> Self {
        Self::with_store(factory, InMemoryEventStore::default())
    }
}

impl<E: EventStore> FlowRegistry<E> {
    pub fn with_store(factory: Box<dyn WorkflowFactory>, event_store: E) -> Self {
        Self { allocator: IdAllocator::new(),
               factory,
               active: IndexMap::new(),
               index: CorrelationIndex::new(),
               event_store }
    }

    /// Devuelve la instancia activa de (usuario, tipo), creándola si no existe.
    ///
    /// Idempotente: una segunda llamada sin completar el flujo devuelve la misma
    /// instancia y no consume otro ID.
    pub fn start(&mut self, owner: UserId, kind: WorkflowKind) -> &mut (dyn Workflow + 'static) {
        let flow = match self.active.entry((owner, kind)) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                let id = self.allocator.next();
                self.index.insert(id, owner, kind);
                self.event_store.append_kind(id, FlowEventKind::Started { owner, kind });
                debug!("registry:start id={id} owner={owner} kind={kind}");
                e.insert(self.factory.create(kind, owner, id))
            }
        };
        &mut **flow
    }

    pub fn get(&self, owner: UserId, kind: WorkflowKind) -> Option<&(dyn Workflow + 'static)> {
        self.active.get(&(owner, kind)).map(|w| &**w)
    }

    pub fn get_mut(&mut self, owner: UserId, kind: WorkflowKind) -> Option<&mut (dyn Workflow + 'static)> {
        self.active.get_mut(&(owner, kind)).map(|w| &mut **w)
    }

    pub fn is_active(&self, owner: UserId, kind: WorkflowKind) -> bool {
        self.active.contains_key(&(owner, kind))
    }

    /// Resuelve un ID de correlación a la clave de su instancia viva.
    ///
    /// Una entrada del índice cuya instancia ya no está, o fue reemplazada por
    /// un flujo más nuevo del mismo (usuario, tipo), no resuelve.
    pub fn resolve(&self, id: CorrelationId) -> Option<(UserId, WorkflowKind)> {
        let (owner, kind) = self.index.get(id)?;
        let flow = self.active.get(&(owner, kind))?;
        (flow.correlation_id() == id).then_some((owner, kind))
    }

    pub fn lookup_by_correlation_id(&mut self, id: CorrelationId) -> Option<&mut (dyn Workflow + 'static)> {
        let key = self.resolve(id)?;
        self.active.get_mut(&key).map(|w| &mut **w)
    }

    /// Entrega un mensaje del usuario a su flujo de ese tipo (creándolo si hace
    /// falta) y registra el resultado en el log de eventos.
    pub fn deliver(&mut self, owner: UserId, kind: WorkflowKind, content: &str) -> Vec<String> {
        let flow = self.start(owner, kind);
        let replies = flow.handle_message(content);
        let (id, state, review, community) = (flow.correlation_id(), flow.state(), flow.needs_mod_review(), flow.community());
        self.event_store.append_kind(id, FlowEventKind::MessageHandled { state, replies: replies.len() });
        if review {
            self.event_store.append_kind(id, FlowEventKind::ReviewRequested { community });
        }
        replies
    }

    /// Entrega un mensaje de moderador (ya sin prefijo) al flujo con ese ID.
    /// `None` si el ID no resuelve a una instancia viva.
    pub fn moderate(&mut self, id: CorrelationId, content: &str) -> Option<Vec<String>> {
        let flow = self.lookup_by_correlation_id(id)?;
        let replies = flow.mod_flow(content);
        let state = flow.state();
        self.event_store.append_kind(id, FlowEventKind::ModeratorAction { state, replies: replies.len() });
        Some(replies)
    }

    /// Quita la instancia de (usuario, tipo) si ya terminó y la devuelve.
    ///
    /// Un flujo no terminal no se toca. La entrada del índice queda; `resolve`
    /// ya no la encuentra.
    pub fn remove(&mut self, owner: UserId, kind: WorkflowKind) -> Option<Box<dyn Workflow>> {
        if !self.active.get(&(owner, kind))?.complete() {
            return None;
        }
        let flow = self.active.shift_remove(&(owner, kind))?;
        let id = flow.correlation_id();
        let (opened_at, closed_at) = (flow.lifecycle().created_at(), flow.lifecycle().updated_at());
        self.event_store.append_kind(id, FlowEventKind::Completed { state: flow.state(), opened_at, closed_at });
        info!("registry:complete id={id} owner={owner} kind={kind} state={:?} open_ms={}",
              flow.state(),
              (closed_at - opened_at).num_milliseconds());
        Some(flow)
    }

    /// Instancias activas en orden de creación.
    pub fn active(&self) -> impl Iterator<Item = &(dyn Workflow + 'static)> + '_ {
        self.active.values().map(|w| &**w)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn correlation_index(&self) -> &CorrelationIndex {
        &self.index
    }

    pub fn event_store(&self) -> &E {
        &self.event_store
    }

    /// Eventos de un flujo, incluso si ya fue removido.
    pub fn history(&self, id: CorrelationId) -> Vec<FlowEvent> {
        self.event_store.list(id)
    }
}
