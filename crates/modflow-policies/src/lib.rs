//! modflow-policies – Evaluación automática de contenido
//!
//! Pipeline sin estado: transliterar → traducir → normalizar mayúsculas →
//! clasificar (propaganda y toxicidad). Los servicios externos se modelan con
//! traits; cualquier fallo o timeout degrada el resultado en lugar de cortar al
//! llamador. También provee la lista de bloqueo (coloquialismos) y el render
//! del resultado para el canal de moderación.

pub mod denylist;
pub mod errors;
pub mod normalize;
pub mod pipeline;
pub mod render;
pub mod services;

pub use denylist::Denylist;
pub use errors::ServiceError;
pub use pipeline::{Degradation, Evaluation, EvaluationConfig, EvaluationPipeline, PipelineStep, DEFAULT_TOXICITY_THRESHOLD};
pub use render::render_evaluation;
pub use services::{DisabledService, PropagandaClassifier, PropagandaVerdict, ToxicityScorer, Translator};
