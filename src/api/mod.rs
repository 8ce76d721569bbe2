//! Generative-language service integration.
//!
//! - [`gemini`]: HTTP client for the Gemini `generateContent` endpoint.
//! - [`parse`]: strict parsers for the daily (delimited text) and monthly
//!   (JSON) responses.
//!
//! The controller talks to the service only through [`TextGenerator`], so
//! report generation can be exercised without network access.
//!
//! ```rust,no_run
//! use lazgo::api::{gemini::GeminiClient, TextGenerator};
//! use lazgo::libs::config::AiConfig;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let client = GeminiClient::new(&AiConfig::default(), "api-key")?;
//! let text = client.generate_text("Halo").await?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use serde_json::Value;

pub mod gemini;
pub mod parse;

pub use gemini::GeminiClient;

/// A remote service that turns a prompt into text.
#[allow(async_fn_in_trait)]
pub trait TextGenerator {
    /// Free-form text completion.
    async fn generate_text(&self, prompt: &str) -> Result<String>;

    /// Completion constrained to JSON matching `schema`; returns the raw JSON text.
    async fn generate_json(&self, prompt: &str, schema: &Value) -> Result<String>;
}
