use std::fmt::Debug;

use super::{Lifecycle, WorkflowKind, WorkflowState};
use crate::ids::{CommunityId, CorrelationId, UserId};

/// Interfaz común de un flujo de moderación.
///
/// Las implementaciones contienen el guion de preguntas de su tipo; el motor
/// sólo conoce este contrato. Ningún método devuelve error: la entrada inválida
/// del usuario se responde con texto guía y el estado no cambia.
pub trait Workflow: Debug + Send {
    fn kind(&self) -> WorkflowKind;

    /// ID global asignado al crear la instancia.
    fn correlation_id(&self) -> CorrelationId;

    /// Usuario que originó el flujo.
    fn owner(&self) -> UserId;

    fn lifecycle(&self) -> &Lifecycle;

    /// Comunidad a la que se refiere el flujo, una vez conocida.
    fn community(&self) -> Option<CommunityId>;

    /// Avanza el guion con un mensaje directo del usuario.
    fn handle_message(&mut self, content: &str) -> Vec<String>;

    /// Avanza la revisión con un mensaje del moderador (sin el prefijo
    /// `"<id>:"`). Una cadena vacía es el disparo inicial que arma el resumen
    /// para el canal de moderación. Fuera de `AwaitingModReview` no hace nada.
    fn mod_flow(&mut self, content: &str) -> Vec<String>;

    fn state(&self) -> WorkflowState {
        self.lifecycle().state()
    }

    fn complete(&self) -> bool {
        self.lifecycle().is_complete()
    }

    /// Señal de flanco: la última transición entró en revisión.
    fn needs_mod_review(&self) -> bool {
        self.lifecycle().review_requested()
    }

    /// Texto a evaluar con el pipeline cuando el flujo entra en revisión.
    fn evaluation_subject(&self) -> Option<&str> {
        None
    }

    /// Términos que un moderador aprobó para la lista de bloqueo.
    fn approved_terms(&self) -> &[String] {
        &[]
    }
}

/// Construye instancias concretas para el registry.
pub trait WorkflowFactory: Send {
    fn create(&self, kind: WorkflowKind, owner: UserId, id: CorrelationId) -> Box<dyn Workflow>;
}
