//! Pipeline de evaluación de contenido.
//!
//! Pasos, en orden:
//! 1. transliterar a ASCII;
//! 2. traducir al idioma de trabajo (si falla se sigue con el texto
//!    transliterado);
//! 3. pasar a minúsculas;
//! 4. clasificar propaganda y toxicidad (en paralelo).
//!
//! Cada llamada externa tiene un timeout acotado. Un fallo se registra como
//! `Degradation` y el resultado parcial se devuelve igual.
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use crate::normalize::{case_fold, transliterate};
use crate::services::{PropagandaClassifier, PropagandaVerdict, ToxicityScorer, Translator};

/// Umbral de toxicidad por defecto (inclusivo).
pub const DEFAULT_TOXICITY_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone)]
pub struct EvaluationConfig {
    pub toxicity_threshold: f64,
    pub service_timeout: Duration,
    pub target_language: String,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        Self { toxicity_threshold: DEFAULT_TOXICITY_THRESHOLD,
               service_timeout: Duration::from_secs(5),
               target_language: "en".to_string() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStep {
    Translation,
    Propaganda,
    Toxicity,
}

/// Paso que no pudo completarse y por qué.
#[derive(Debug, Clone, PartialEq)]
pub struct Degradation {
    pub step: PipelineStep,
    pub error: ServiceError,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub original: String,
    /// Texto transliterado, traducido (si se pudo) y en minúsculas.
    pub normalized: String,
    pub translated: bool,
    pub propaganda: Option<PropagandaVerdict>,
    pub toxicity: Option<f64>,
    pub degraded: Vec<Degradation>,
}

impl Evaluation {
    pub fn is_likely_propaganda(&self) -> bool {
        self.propaganda.as_ref().is_some_and(|p| p.likely)
    }

    pub fn propaganda_labels(&self) -> &[String] {
        self.propaganda.as_ref().map(|p| p.labels.as_slice()).unwrap_or(&[])
    }

    /// `true` sólo si hay puntaje y es >= umbral.
    pub fn is_toxic(&self, threshold: f64) -> bool {
        self.toxicity.is_some_and(|score| score >= threshold)
    }

    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }
}

pub struct EvaluationPipeline {
    translator: Arc<dyn Translator>,
    propaganda: Arc<dyn PropagandaClassifier>,
    toxicity: Arc<dyn ToxicityScorer>,
    config: EvaluationConfig,
}

impl EvaluationPipeline {
    pub fn new(translator: Arc<dyn Translator>,
               propaganda: Arc<dyn PropagandaClassifier>,
               toxicity: Arc<dyn ToxicityScorer>,
               config: EvaluationConfig)
               -> Self {
        Self { translator,
               propaganda,
               toxicity,
               config }
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn toxicity_threshold(&self) -> f64 {
        self.config.toxicity_threshold
    }

    /// Transliteración + traducción + minúsculas. No falla nunca.
    pub async fn normalize(&self, raw: &str) -> (String, Option<Degradation>) {
        let ascii = transliterate(raw);
        let translation = self.guarded(self.translator.translate(&ascii, &self.config.target_language)).await;
        match translation {
            Ok(text) => (case_fold(&text), None),
            Err(error) => {
                warn!("pipeline:degraded step=translation error={error}");
                (case_fold(&ascii), Some(Degradation { step: PipelineStep::Translation, error }))
            }
        }
    }

    pub async fn evaluate(&self, raw: &str) -> Evaluation {
        let (normalized, translation_issue) = self.normalize(raw).await;
        let mut degraded: Vec<Degradation> = translation_issue.into_iter().collect();
        let translated = degraded.is_empty();

        let (propaganda, toxicity) = tokio::join!(self.guarded(self.propaganda.classify(&normalized)),
                                                  self.guarded(self.toxicity.score(&normalized)));

        let propaganda = match propaganda {
            Ok(verdict) => Some(verdict),
            Err(error) => {
                warn!("pipeline:degraded step=propaganda error={error}");
                degraded.push(Degradation { step: PipelineStep::Propaganda, error });
                None
            }
        };
        let toxicity = match toxicity.and_then(validate_score) {
            Ok(score) => Some(score),
            Err(error) => {
                warn!("pipeline:degraded step=toxicity error={error}");
                degraded.push(Degradation { step: PipelineStep::Toxicity, error });
                None
            }
        };
        debug!("pipeline:done translated={translated} toxicity={toxicity:?} degraded={}", degraded.len());

        Evaluation { original: raw.to_string(),
                     normalized,
                     translated,
                     propaganda,
                     toxicity,
                     degraded }
    }

    async fn guarded<T, F>(&self, call: F) -> Result<T, ServiceError>
        where F: Future<Output = Result<T, ServiceError>>
    {
        match tokio::time::timeout(self.config.service_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout(self.config.service_timeout)),
        }
    }
}

fn validate_score(score: f64) -> Result<f64, ServiceError> {
    if (0.0..=1.0).contains(&score) {
        Ok(score)
    } else {
        Err(ServiceError::InvalidResponse(format!("toxicity score out of range: {score}")))
    }
}
