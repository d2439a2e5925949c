//! Utilidades comunes a los guiones.

use log::error;
use modflow_core::constants::CANCEL_KEYWORD;
use modflow_core::{Lifecycle, WorkflowState};

pub(crate) fn is_cancel(content: &str) -> bool {
    content.trim().eq_ignore_ascii_case(CANCEL_KEYWORD)
}

/// Aplica una transición que el guion ya validó. Un rechazo indica un bug del
/// guion: se registra y el estado queda como estaba.
pub(crate) fn advance(lifecycle: &mut Lifecycle, to: WorkflowState) -> bool {
    match lifecycle.transition(to) {
        Ok(()) => true,
        Err(e) => {
            error!("script:transition_rejected {e}");
            false
        }
    }
}

/// Acción de moderador normalizada (sin espacios, minúsculas).
pub(crate) fn mod_action(content: &str) -> String {
    content.trim().to_lowercase()
}
