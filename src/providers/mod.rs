//! Implementaciones HTTP de los servicios de evaluación.
//!
//! Cada proveedor implementa uno de los traits de `modflow_policies`; el
//! pipeline no sabe nada de HTTP. Un servicio sin credencial se reemplaza por
//! `DisabledService`.
mod perspective;
mod propaganda;
mod translate;

pub use perspective::PerspectiveProvider;
pub use propaganda::PropagandaHttpProvider;
pub use translate::GoogleTranslateProvider;

use std::sync::Arc;

use log::{info, warn};
use modflow_policies::{DisabledService, EvaluationPipeline, PropagandaClassifier, ServiceError, ToxicityScorer, Translator};

use crate::config::AppConfig;
use crate::errors::ConfigError;

/// Arma el pipeline con los servicios que tengan configuración.
pub fn build_pipeline(config: &AppConfig) -> Result<EvaluationPipeline, ConfigError> {
    let client = reqwest::Client::builder().timeout(config.evaluation.service_timeout).build()?;
    let services = &config.services;

    let translator: Arc<dyn Translator> = match &services.translate_api_key {
        Some(key) => {
            let provider = GoogleTranslateProvider::new(client.clone(), &services.translate_endpoint, key);
            info!("providers:enabled step=translation name={}", provider.get_name());
            Arc::new(provider)
        }
        None => disabled("translation"),
    };
    let toxicity: Arc<dyn ToxicityScorer> = match &services.perspective_api_key {
        Some(key) => {
            let provider = PerspectiveProvider::new(client.clone(), &services.perspective_endpoint, key);
            info!("providers:enabled step=toxicity name={}", provider.get_name());
            Arc::new(provider)
        }
        None => disabled("toxicity"),
    };
    let propaganda: Arc<dyn PropagandaClassifier> = match &services.propaganda_endpoint {
        Some(endpoint) => {
            let provider = PropagandaHttpProvider::new(client, endpoint);
            info!("providers:enabled step=propaganda name={}", provider.get_name());
            Arc::new(provider)
        }
        None => disabled("propaganda"),
    };

    Ok(EvaluationPipeline::new(translator, propaganda, toxicity, config.evaluation.clone()))
}

fn disabled(name: &'static str) -> Arc<DisabledService> {
    warn!("providers:disabled service={name}");
    Arc::new(DisabledService::new(name))
}

/// Errores de red/HTTP. Un timeout del cliente se informa como transporte: el
/// pipeline aplica su propio timeout por encima.
fn transport(e: reqwest::Error) -> ServiceError {
    match e.status() {
        Some(status) => ServiceError::Transport(format!("HTTP {status}")),
        None => ServiceError::Transport(e.to_string()),
    }
}

fn invalid(e: impl std::fmt::Display) -> ServiceError {
    ServiceError::InvalidResponse(e.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let env: HashMap<&str, &str> = pairs.iter().copied().collect();
        AppConfig::from_lookup(|key| env.get(key).map(|v| v.to_string())).unwrap()
    }

    #[test]
    fn provider_names() {
        let client = reqwest::Client::new();
        assert_eq!(GoogleTranslateProvider::new(client.clone(), "http://x", "k").get_name(), "google_translate_v2");
        assert_eq!(PerspectiveProvider::new(client.clone(), "http://x", "k").get_name(), "perspective_toxicity");
        assert_eq!(PropagandaHttpProvider::new(client, "http://x").get_name(), "propaganda_inference");
    }

    #[test]
    fn pipeline_without_credentials_degrades_every_step() {
        let cfg = config(&[("MODFLOW_BOT_NAME", "Group 4 Bot"), ("MODFLOW_BOT_ID", "1")]);
        let pipeline = build_pipeline(&cfg).unwrap();
        let eval = tokio_test::block_on(pipeline.evaluate("Hola"));
        assert_eq!(eval.normalized, "hola");
        assert_eq!(eval.degraded.len(), 3);
    }
}
