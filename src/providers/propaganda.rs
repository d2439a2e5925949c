use async_trait::async_trait;
use modflow_policies::{PropagandaClassifier, PropagandaVerdict, ServiceError};
use serde_json::json;

use super::{invalid, transport};

/// Servicio de inferencia propio: `POST {"text": ...}` → `{"likely": bool, "labels": [...]}`.
#[derive(Debug, Clone)]
pub struct PropagandaHttpProvider {
    client: reqwest::Client,
    endpoint: String,
}

impl PropagandaHttpProvider {
    pub fn new(client: reqwest::Client, endpoint: &str) -> Self {
        Self { client,
               endpoint: endpoint.to_string() }
    }

    pub fn get_name(&self) -> &str {
        "propaganda_inference"
    }
}

#[async_trait]
impl PropagandaClassifier for PropagandaHttpProvider {
    async fn classify(&self, text: &str) -> Result<PropagandaVerdict, ServiceError> {
        let resp = self.client
                       .post(&self.endpoint)
                       .json(&json!({ "text": text }))
                       .send()
                       .await
                       .and_then(|r| r.error_for_status())
                       .map_err(transport)?;
        resp.json::<PropagandaVerdict>().await.map_err(invalid)
    }
}
