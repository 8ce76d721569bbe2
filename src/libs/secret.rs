//! API key resolution.
//!
//! The key is looked up in the process environment first (`GEMINI_API_KEY`,
//! then `API_KEY`, both of which may come from a `.env` file), and finally in
//! the value embedded at build time. The application refuses to start without
//! one.

use crate::libs::messages::Message;
use crate::msg_error_anyhow;
use anyhow::Result;
use std::env;

include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

/// Environment variables checked, in order.
pub const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "API_KEY"];

#[derive(Clone)]
pub struct ApiKey(String);

impl ApiKey {
    /// Key from the environment or the build.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|name| env::var(name).ok(), APP_METADATA_API_KEY)
    }

    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>, embedded: &str) -> Result<Self> {
        API_KEY_VARS
            .iter()
            .filter_map(|name| lookup(name))
            .chain(std::iter::once(embedded.to_string()))
            .map(|key| key.trim().to_string())
            .find(|key| !key.is_empty())
            .map(ApiKey)
            .ok_or_else(|| msg_error_anyhow!(Message::ApiKeyNotSet))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
