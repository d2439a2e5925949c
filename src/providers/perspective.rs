use async_trait::async_trait;
use modflow_policies::{ServiceError, ToxicityScorer};
use serde::Deserialize;
use serde_json::json;

use super::{invalid, transport};

/// Perspective API, atributo `TOXICITY`.
#[derive(Debug, Clone)]
pub struct PerspectiveProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AnalyzeResponse {
    attribute_scores: AttributeScores,
}

#[derive(Debug, Deserialize)]
struct AttributeScores {
    #[serde(rename = "TOXICITY")]
    toxicity: AttributeScore,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttributeScore {
    summary_score: SummaryScore,
}

#[derive(Debug, Deserialize)]
struct SummaryScore {
    value: f64,
}

impl PerspectiveProvider {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self { client,
               endpoint: endpoint.to_string(),
               api_key: api_key.to_string() }
    }

    pub fn get_name(&self) -> &str {
        "perspective_toxicity"
    }
}

#[async_trait]
impl ToxicityScorer for PerspectiveProvider {
    async fn score(&self, text: &str) -> Result<f64, ServiceError> {
        let body = json!({
            "comment": { "text": text },
            "requestedAttributes": { "TOXICITY": {} }
        });
        let resp = self.client
                       .post(&self.endpoint)
                       .query(&[("key", self.api_key.as_str())])
                       .json(&body)
                       .send()
                       .await
                       .and_then(|r| r.error_for_status())
                       .map_err(transport)?;
        let parsed: AnalyzeResponse = resp.json().await.map_err(invalid)?;
        Ok(parsed.attribute_scores.toxicity.summary_score.value)
    }
}
