//! Contratos de los servicios externos (traducción y clasificación).
//!
//! El pipeline sólo depende de estos traits; las implementaciones HTTP viven
//! en la aplicación y los tests usan stubs.
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;

/// Resultado del clasificador de propaganda.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropagandaVerdict {
    pub likely: bool,
    /// Técnicas detectadas (p. ej. "loaded language").
    #[serde(default)]
    pub labels: Vec<String>,
}

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceError>;
}

#[async_trait]
pub trait PropagandaClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<PropagandaVerdict, ServiceError>;
}

#[async_trait]
pub trait ToxicityScorer: Send + Sync {
    /// Puntaje en [0, 1].
    async fn score(&self, text: &str) -> Result<f64, ServiceError>;
}

/// Servicio sin credenciales configuradas: siempre responde `Unavailable`.
#[derive(Debug, Clone)]
pub struct DisabledService {
    name: &'static str,
}

impl DisabledService {
    pub fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[async_trait]
impl Translator for DisabledService {
    async fn translate(&self, _text: &str, _target_language: &str) -> Result<String, ServiceError> {
        Err(ServiceError::Unavailable(self.name.to_string()))
    }
}

#[async_trait]
impl PropagandaClassifier for DisabledService {
    async fn classify(&self, _text: &str) -> Result<PropagandaVerdict, ServiceError> {
        Err(ServiceError::Unavailable(self.name.to_string()))
    }
}

#[async_trait]
impl ToxicityScorer for DisabledService {
    async fn score(&self, _text: &str) -> Result<f64, ServiceError> {
        Err(ServiceError::Unavailable(self.name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_service_reports_its_name() {
        let svc = DisabledService::new("toxicity");
        let err = tokio_test::block_on(svc.score("hola")).unwrap_err();
        assert_eq!(err, ServiceError::Unavailable("toxicity".into()));
        assert!(tokio_test::block_on(svc.translate("hola", "en")).is_err());
    }

    #[test]
    fn verdict_wire_format() {
        let v: PropagandaVerdict = serde_json::from_value(serde_json::json!({ "likely": true })).unwrap();
        assert!(v.likely);
        assert!(v.labels.is_empty(), "labels es opcional");
    }
}
