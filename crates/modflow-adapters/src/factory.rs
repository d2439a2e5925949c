use log::debug;
use modflow_core::{CorrelationId, UserId, Workflow, WorkflowFactory, WorkflowKind};

use crate::flows::{InformFlow, ReportFlow};

/// Factory por defecto: un guion por cada `WorkflowKind`.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardWorkflows;

impl WorkflowFactory for StandardWorkflows {
    fn create(&self, kind: WorkflowKind, owner: UserId, id: CorrelationId) -> Box<dyn Workflow> {
        debug!("factory:create kind={kind} owner={owner} id={id}");
        match kind {
            WorkflowKind::Report => Box::new(ReportFlow::new(owner, id)),
            WorkflowKind::Inform => Box::new(InformFlow::new(owner, id)),
        }
    }
}
