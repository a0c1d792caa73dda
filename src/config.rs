// IMPORTANT:
// Keep ALL literal values centralized here (repo rule: no hardcoded values scattered around).

// NOTE: VERSION must stay in sync with the `version` field in Cargo.toml.
pub const VERSION: &str = "0.1.0";

pub const USAGE: &str = "usage: mdembed <file.md>";

pub mod api {
    pub const ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
    pub const MODEL_ID: &str = "text-embedding-3-small";

    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

    // Optional endpoint override (proxies, compatible gateways, local tests).
    pub const ENDPOINT_ENV: &str = "MDEMBED_API_URL";
}

pub mod filter {
    // Lines starting with this (after trimming) hold a previous embedding and are not re-embedded.
    pub const MARKER_PREFIX: &str = "<!-- embedding:";
}

pub mod logging {
    pub const DEFAULT_LEVEL: &str = "warn";
    pub const FILE_LEVEL: &str = "debug";

    pub const LOG_DIR_ENV: &str = "MDEMBED_LOG_DIR";
    pub const LOG_FILE_NAME: &str = "mdembed";

    pub const LOG_ROTATE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
    pub const LOG_ROTATE_KEEP_FILES: usize = 5;
}
