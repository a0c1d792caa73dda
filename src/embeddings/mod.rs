// embeddings/ — Remote text embeddings via the OpenAI API.
//
// Provides:
// - Request/response wire types
// - A blocking client that returns the first vector of the response
// - The error taxonomy for a single embedding call

pub mod client;
pub mod error;

pub use client::OpenAiEmbedder;
