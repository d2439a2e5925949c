use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use modflow_policies::{DisabledService, EvaluationConfig, EvaluationPipeline, PipelineStep, PropagandaClassifier, PropagandaVerdict,
                       ServiceError, ToxicityScorer, Translator};

struct UpperTranslator;

#[async_trait]
impl Translator for UpperTranslator {
    async fn translate(&self, text: &str, _target: &str) -> Result<String, ServiceError> {
        Ok(format!("TRANSLATED {text}"))
    }
}

struct SlowTranslator;

#[async_trait]
impl Translator for SlowTranslator {
    async fn translate(&self, text: &str, _target: &str) -> Result<String, ServiceError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok(text.to_string())
    }
}

struct FixedScores {
    toxicity: f64,
    likely: bool,
}

#[async_trait]
impl PropagandaClassifier for FixedScores {
    async fn classify(&self, _text: &str) -> Result<PropagandaVerdict, ServiceError> {
        Ok(PropagandaVerdict { likely: self.likely,
                               labels: vec!["flag waving".into()] })
    }
}

#[async_trait]
impl ToxicityScorer for FixedScores {
    async fn score(&self, _text: &str) -> Result<f64, ServiceError> {
        Ok(self.toxicity)
    }
}

fn config() -> EvaluationConfig {
    EvaluationConfig { service_timeout: Duration::from_millis(50),
                       ..EvaluationConfig::default() }
}

#[tokio::test]
async fn full_pipeline_normalizes_translates_and_scores() {
    let scores = Arc::new(FixedScores { toxicity: 0.5, likely: true });
    let pipeline = EvaluationPipeline::new(Arc::new(UpperTranslator), scores.clone(), scores, config());

    let eval = pipeline.evaluate("Ça va").await;
    assert_eq!(eval.original, "Ça va");
    assert_eq!(eval.normalized, "translated ca va");
    assert!(eval.translated);
    assert!(eval.is_likely_propaganda());
    assert_eq!(eval.propaganda_labels(), ["flag waving".to_string()]);
    assert!(eval.is_toxic(pipeline.toxicity_threshold()), "0.5 is flagged (inclusive)");
    assert!(!eval.is_degraded());
}

#[tokio::test]
async fn translation_timeout_falls_back_to_transliterated_text() {
    let scores = Arc::new(FixedScores { toxicity: 0.2, likely: false });
    let pipeline = EvaluationPipeline::new(Arc::new(SlowTranslator), scores.clone(), scores, config());

    let eval = pipeline.evaluate("Ünïcödé TEXT").await;
    assert_eq!(eval.normalized, "unicode text");
    assert!(!eval.translated);
    assert_eq!(eval.degraded.len(), 1);
    assert_eq!(eval.degraded[0].step, PipelineStep::Translation);
    assert!(matches!(eval.degraded[0].error, ServiceError::Timeout(_)));
    assert_eq!(eval.toxicity, Some(0.2));
    assert!(!eval.is_toxic(0.5));
}

#[tokio::test]
async fn disabled_services_omit_scores_without_failing() {
    let disabled = Arc::new(DisabledService::new("none"));
    let pipeline = EvaluationPipeline::new(disabled.clone(), disabled.clone(), disabled, config());

    let eval = pipeline.evaluate("hello").await;
    assert_eq!(eval.normalized, "hello");
    assert!(eval.propaganda.is_none());
    assert!(eval.toxicity.is_none());
    let steps: Vec<PipelineStep> = eval.degraded.iter().map(|d| d.step).collect();
    assert_eq!(steps, vec![PipelineStep::Translation, PipelineStep::Propaganda, PipelineStep::Toxicity]);
}

#[tokio::test]
async fn out_of_range_score_is_treated_as_degradation() {
    let scores = Arc::new(FixedScores { toxicity: 1.7, likely: false });
    let pipeline = EvaluationPipeline::new(Arc::new(UpperTranslator), scores.clone(), scores, config());

    let eval = pipeline.evaluate("hi").await;
    assert!(eval.toxicity.is_none());
    assert!(matches!(eval.degraded[0].error, ServiceError::InvalidResponse(_)));
}
