//! modflow-core: motor de flujos de moderación.
//!
//! Contiene las piezas sin IO del sistema:
//! - `ids`: identificadores tipados y el `IdAllocator` de correlación.
//! - `workflow`: contrato `Workflow`, `WorkflowKind` y la máquina de estados
//!   compartida (`Lifecycle`).
//! - `registry`: `FlowRegistry` (instancias activas por (usuario, tipo)) y el
//!   índice de correlación usado por el canal de moderación.
//! - `event`: log append-only de eventos por flujo (auditoría).
//!
//! Los scripts concretos de cada tipo de flujo viven en `modflow-adapters`.
pub mod constants;
pub mod errors;
pub mod event;
pub mod ids;
pub mod registry;
pub mod workflow;

pub use errors::CoreError;
pub use event::{EventStore, FlowEvent, FlowEventKind, InMemoryEventStore};
pub use ids::{ChannelId, CommunityId, CorrelationId, IdAllocator, UserId};
pub use registry::{CorrelationIndex, FlowRegistry};
pub use workflow::{Lifecycle, Workflow, WorkflowFactory, WorkflowKind, WorkflowState};
