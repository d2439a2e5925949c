use async_trait::async_trait;
use modflow_policies::{ServiceError, Translator};
use serde::Deserialize;
use serde_json::json;

use super::{invalid, transport};

/// Google Cloud Translation v2 (`POST ...?key=`).
#[derive(Debug, Clone)]
pub struct GoogleTranslateProvider {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

impl GoogleTranslateProvider {
    pub fn new(client: reqwest::Client, endpoint: &str, api_key: &str) -> Self {
        Self { client,
               endpoint: endpoint.to_string(),
               api_key: api_key.to_string() }
    }

    pub fn get_name(&self) -> &str {
        "google_translate_v2"
    }
}

fn first_translation(resp: TranslateResponse) -> Result<String, ServiceError> {
    resp.data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| ServiceError::InvalidResponse("no translations returned".into()))
}

#[async_trait]
impl Translator for GoogleTranslateProvider {
    async fn translate(&self, text: &str, target_language: &str) -> Result<String, ServiceError> {
        let body = json!({ "q": text, "target": target_language, "format": "text" });
        let resp = self.client
                       .post(&self.endpoint)
                       .query(&[("key", self.api_key.as_str())])
                       .json(&body)
                       .send()
                       .await
                       .and_then(|r| r.error_for_status())
                       .map_err(transport)?;
        let parsed: TranslateResponse = resp.json().await.map_err(invalid)?;
        first_translation(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_the_first_translation() {
        let raw = r#"{"data":{"translations":[{"translatedText":"hello friend","detectedSourceLanguage":"es"}]}}"#;
        let resp: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_translation(resp).unwrap(), "hello friend");

        let empty: TranslateResponse = serde_json::from_str(r#"{"data":{"translations":[]}}"#).unwrap();
        assert!(matches!(first_translation(empty), Err(ServiceError::InvalidResponse(_))));
    }
}
