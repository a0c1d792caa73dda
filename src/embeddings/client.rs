// client.rs — Blocking client for the OpenAI embeddings endpoint.
//
// One POST per call, no retry, no timeout beyond ureq's defaults.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::EmbedError;
use crate::config;

#[derive(Debug, Serialize)]
pub struct EmbeddingRequest<'a> {
    pub input: &'a str,
    pub model: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingResponse {
    pub data: Vec<EmbeddingData>,
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingData {
    pub embedding: Vec<f64>,
}

// Shape of the provider's error body on non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

pub struct OpenAiEmbedder {
    agent: ureq::Agent,
    endpoint: String,
    model: String,
    api_key: String,
}

impl OpenAiEmbedder {
    pub fn new(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            agent: ureq::Agent::new(),
            endpoint: endpoint.into(),
            model: config::api::MODEL_ID.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Build from `OPENAI_API_KEY` (required, must be non-empty) and the optional
    /// `MDEMBED_API_URL` endpoint override. Never touches the network.
    pub fn from_env() -> Result<Self, EmbedError> {
        let api_key = non_empty_env(config::api::API_KEY_ENV)
            .ok_or(EmbedError::MissingApiKey(config::api::API_KEY_ENV))?;

        let endpoint = match non_empty_env(config::api::ENDPOINT_ENV) {
            Some(url) => {
                log::info!("Using endpoint override from {}: {}", config::api::ENDPOINT_ENV, url);
                url
            }
            None => config::api::ENDPOINT.to_string(),
        };

        Ok(Self::new(api_key, endpoint))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Embed `text` and return the first vector of the response.
    pub fn embed(&self, text: &str) -> Result<Vec<f64>, EmbedError> {
        let body = serde_json::to_vec(&EmbeddingRequest { input: text, model: &self.model })
            .map_err(EmbedError::Encode)?;

        log::info!(
            "POST {} (model={}, input={} bytes)",
            self.endpoint,
            self.model,
            text.len()
        );

        let resp = self
            .agent
            .post(&self.endpoint)
            .set("Authorization", &format!("Bearer {}", self.api_key))
            .set("Content-Type", "application/json")
            .send_bytes(&body)
            .map_err(|e| request_error(&self.endpoint, e))?;

        log::debug!("Embeddings API answered HTTP {}", resp.status());

        let parsed: EmbeddingResponse =
            serde_json::from_reader(resp.into_reader()).map_err(EmbedError::Decode)?;
        let vector = first_embedding(parsed)?;

        log::info!("Received embedding with {} dimensions", vector.len());
        Ok(vector)
    }
}

impl fmt::Debug for OpenAiEmbedder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiEmbedder")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Only the first entry is used; the request always carries a single input.
pub fn first_embedding(resp: EmbeddingResponse) -> Result<Vec<f64>, EmbedError> {
    if resp.data.len() > 1 {
        log::warn!("Embeddings API returned {} entries, using the first", resp.data.len());
    }
    resp.data
        .into_iter()
        .next()
        .map(|d| d.embedding)
        .ok_or(EmbedError::Empty)
}

fn request_error(endpoint: &str, err: ureq::Error) -> EmbedError {
    match err {
        ureq::Error::Status(status, resp) => {
            let body = resp.into_string().unwrap_or_default();
            EmbedError::Api { status, message: api_error_message(&body) }
        }
        ureq::Error::Transport(t) => EmbedError::Transport {
            endpoint: endpoint.to_string(),
            source: Box::new(t),
        },
    }
}

fn api_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ApiErrorBody>(body) {
        return parsed.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "<empty body>".to_string()
    } else {
        trimmed.to_string()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let req = EmbeddingRequest { input: "hello\n", model: config::api::MODEL_ID };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v, serde_json::json!({ "input": "hello\n", "model": "text-embedding-3-small" }));
    }

    #[test]
    fn test_first_embedding_takes_first_entry() {
        let resp: EmbeddingResponse = serde_json::from_str(
            r#"{"object":"list","data":[{"object":"embedding","index":0,"embedding":[0.1,0.2,0.3]},{"embedding":[9.0]}],"model":"text-embedding-3-small","usage":{"prompt_tokens":3,"total_tokens":3}}"#,
        )
        .unwrap();
        assert_eq!(first_embedding(resp).unwrap(), vec![0.1, 0.2, 0.3]);
    }

    #[test]
    fn test_first_embedding_empty_data() {
        let resp: EmbeddingResponse = serde_json::from_str(r#"{"data":[]}"#).unwrap();
        let err = first_embedding(resp).unwrap_err();
        assert!(matches!(err, EmbedError::Empty));
    }

    #[test]
    fn test_response_without_data_is_rejected() {
        assert!(serde_json::from_str::<EmbeddingResponse>(r#"{"embedding":[1.0]}"#).is_err());
    }

    #[test]
    fn test_api_error_message() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error","code":"invalid_api_key"}}"#;
        assert_eq!(api_error_message(body), "Incorrect API key provided");
        assert_eq!(api_error_message("  upstream timeout \n"), "upstream timeout");
        assert_eq!(api_error_message(""), "<empty body>");
    }

    #[test]
    fn test_new_uses_fixed_model() {
        let e = OpenAiEmbedder::new("sk-test", "http://127.0.0.1:1/v1/embeddings");
        assert_eq!(e.model(), "text-embedding-3-small");
        assert_eq!(e.endpoint(), "http://127.0.0.1:1/v1/embeddings");
    }

    #[test]
    fn test_debug_redacts_key() {
        let e = OpenAiEmbedder::new("sk-secret", config::api::ENDPOINT);
        let dbg = format!("{e:?}");
        assert!(!dbg.contains("sk-secret"));
        assert!(dbg.contains("<redacted>"));
    }

    #[test]
    fn test_transport_error_on_refused_connection() {
        // Bind then drop to get a port that is very likely closed.
        let port = {
            let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap().port()
        };
        let e = OpenAiEmbedder::new("sk-test", format!("http://127.0.0.1:{port}/v1/embeddings"));
        let err = e.embed("hello").unwrap_err();
        assert!(matches!(err, EmbedError::Transport { .. }), "got {err:?}");
    }
}
