use thiserror::Error;

/// Every way a single embedding call can fail. None of them are retried.
#[derive(Debug, Error)]
pub enum EmbedError {
    #[error("{0} not set")]
    MissingApiKey(&'static str),

    #[error("failed encoding embedding request")]
    Encode(#[source] serde_json::Error),

    /// Connect, DNS, TLS or IO failure before a status line was received.
    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("embeddings API returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed decoding embeddings response")]
    Decode(#[source] serde_json::Error),

    #[error("no embedding returned")]
    Empty,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(EmbedError::MissingApiKey("OPENAI_API_KEY").to_string(), "OPENAI_API_KEY not set");
        assert_eq!(EmbedError::Empty.to_string(), "no embedding returned");
        let api = EmbedError::Api { status: 401, message: "Incorrect API key provided".into() };
        assert_eq!(api.to_string(), "embeddings API returned HTTP 401: Incorrect API key provided");
    }

    #[test]
    fn test_decode_keeps_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = EmbedError::Decode(json_err);
        assert!(std::error::Error::source(&err).is_some());
    }
}
