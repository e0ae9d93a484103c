use reqwest::Client;
use serde::{
    Deserialize,
    Serialize,
};

use super::ImageGenerator;
use crate::core::{
    http::{
        ensure_success,
        http_client,
    },
    HanasuError,
};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    image_url: Option<String>,
    error: Option<String>,
}

/// HTTP-backed image-generation service. The wire contract is a single
/// POST of `{"prompt": ...}` answered by `{"imageUrl": ...}` or
/// `{"error": ...}`.
pub struct HttpImageService {
    client: Client,
    endpoint: String,
}

impl HttpImageService {
    pub fn new(endpoint: String) -> Result<Self, HanasuError> {
        Ok(HttpImageService { client: http_client()?, endpoint })
    }

    fn generate_url(&self) -> String {
        format!("{}/generate", self.endpoint.trim_end_matches('/'))
    }

    /// Probe used for the status line only; operations are not gated on it.
    pub async fn is_online(&self) -> bool {
        self.client.get(&self.endpoint).send().await.map(|r| r.status().is_success()).unwrap_or(false)
    }
}

impl ImageGenerator for HttpImageService {
    async fn generate(&self, prompt: &str) -> Result<String, HanasuError> {
        let resp = self
            .client
            .post(self.generate_url())
            .json(&GenerateRequest { prompt })
            .send()
            .await?;
        let resp = ensure_success(resp)?;

        let body: GenerateResponse = resp.json().await?;

        if let Some(error) = body.error {
            return Err(HanasuError::Custom(error));
        }

        body.image_url
            .ok_or_else(|| HanasuError::Custom("service returned no image reference".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_normalization() {
        let service = HttpImageService::new("http://localhost:7861/".to_string()).unwrap();
        assert_eq!(service.generate_url(), "http://localhost:7861/generate");

        let service = HttpImageService::new("http://localhost:7861".to_string()).unwrap();
        assert_eq!(service.generate_url(), "http://localhost:7861/generate");
    }

    #[test]
    fn test_response_parsing() {
        let ok: GenerateResponse =
            serde_json::from_str(r#"{"imageUrl":"img/1.png"}"#).unwrap();
        assert_eq!(ok.image_url.as_deref(), Some("img/1.png"));
        assert!(ok.error.is_none());

        let err: GenerateResponse = serde_json::from_str(r#"{"error":"bad prompt"}"#).unwrap();
        assert!(err.image_url.is_none());
        assert_eq!(err.error.as_deref(), Some("bad prompt"));
    }
}
