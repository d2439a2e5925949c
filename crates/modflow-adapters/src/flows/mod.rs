//! Guiones de cada `WorkflowKind`.

mod inform;
mod report;
mod script;

pub use inform::InformFlow;
pub use report::{ReportFlow, ReportReason, ReportVerdict};
