//! doccompare - side-by-side document comparison backed by a hosted language model.
//!
//! Two plain-text documents are sent to an OpenAI-compatible chat completion
//! API which returns a structured list of differences. The differences are
//! highlighted over both documents in a web page or on the terminal.

pub mod cli;
pub mod client;
pub mod config;
pub mod extract;
pub mod highlight;
pub mod llm;
pub mod models;
pub mod server;
pub mod services;
pub mod workspace;
