//! modflow-adapters: guiones concretos de los flujos de moderación.
//!
//! Este crate provee:
//! - `ReportFlow`: reporte de un mensaje (link → texto → motivo → revisión).
//! - `InformFlow`: aviso de un coloquialismo (término → significado →
//!   servidor → revisión); si un moderador lo aprueba, el término pasa a la
//!   lista de bloqueo.
//! - `StandardWorkflows`: `WorkflowFactory` que arma el flujo de cada tipo.
//! - `links`: parseo de links a mensajes/canales de la plataforma.
//!
//! Nota: el core sólo conoce el trait `Workflow`; los textos y pasos de cada
//! guion quedan encapsulados aquí.

pub mod factory;
pub mod flows;
pub mod links;

pub use factory::StandardWorkflows;
pub use flows::{InformFlow, ReportFlow, ReportReason, ReportVerdict};
pub use links::{parse_message_link, MessageLink};
