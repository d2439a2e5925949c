//! Contrato de los flujos de moderación.
//!
//! Un flujo es una máquina de estados por (usuario, tipo). Este módulo define:
//! - `WorkflowKind`: enumeración cerrada de tipos, en el orden de ruteo.
//! - `WorkflowState` y `Lifecycle`: estados y transiciones válidas comunes.
//! - `Workflow`: interfaz neutral que usan el registry y el router.
//! - `WorkflowFactory`: construcción de instancias concretas por tipo.

mod definition;
mod kind;
mod lifecycle;

pub use definition::{Workflow, WorkflowFactory};
pub use kind::WorkflowKind;
pub use lifecycle::{Lifecycle, WorkflowState};
