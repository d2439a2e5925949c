//! Registry de flujos activos.
//!
//! En lugar de un mapa por tipo de flujo más un mapa ID→usuario por tipo, hay
//! un único `FlowRegistry` indexado por (usuario, tipo) y un único
//! `CorrelationIndex` compartido. El `IdAllocator` también es único, así que
//! un ID identifica a lo sumo una instancia sin importar su tipo.

mod index;
mod types;

pub use index::CorrelationIndex;
pub use types::FlowRegistry;
