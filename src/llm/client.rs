// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP client for a local text-generation server.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{SYSTEM_PROMPT, format_prompt};
use crate::error::{Error, ParseError, ProtocolError};

/// Configuration for a completion server.
///
/// Requests go to `POST <base_url>/api/generate` with streaming disabled.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use voxhome_lib::llm::CompletionConfig;
///
/// let config = CompletionConfig::default();
/// assert_eq!(config.base_url(), "http://localhost:11434");
/// assert_eq!(config.model(), "gemma3:12b");
///
/// let config = CompletionConfig::new("gpu-box.lan")
///     .with_model("llama3.1:8b")
///     .with_max_tokens(256)
///     .with_timeout(Duration::from_secs(30));
/// assert_eq!(config.base_url(), "http://gpu-box.lan:11434");
/// ```
#[derive(Debug, Clone)]
pub struct CompletionConfig {
    host: String,
    port: u16,
    use_https: bool,
    model: String,
    max_tokens: u32,
    timeout: Duration,
    system_prompt: String,
}

impl CompletionConfig {
    /// Default host.
    pub const DEFAULT_HOST: &'static str = "localhost";
    /// Default server port.
    pub const DEFAULT_PORT: u16 = 11434;
    /// Default model name.
    pub const DEFAULT_MODEL: &'static str = "gemma3:12b";
    /// Default token limit per completion.
    pub const DEFAULT_MAX_TOKENS: u32 = 1024;
    /// Default request timeout. Generation on a local model can be slow.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

    /// Creates a configuration for the specified host.
    ///
    /// A host given with an `http://` or `https://` scheme is used as the
    /// base URL verbatim and the port setting is ignored.
    #[must_use]
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: Self::DEFAULT_PORT,
            use_https: false,
            model: Self::DEFAULT_MODEL.to_string(),
            max_tokens: Self::DEFAULT_MAX_TOKENS,
            timeout: Self::DEFAULT_TIMEOUT,
            system_prompt: SYSTEM_PROMPT.to_string(),
        }
    }

    /// Sets a custom port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Enables HTTPS.
    #[must_use]
    pub fn with_https(mut self) -> Self {
        self.use_https = true;
        self
    }

    /// Sets the model name.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the token limit.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Replaces the system prompt.
    #[must_use]
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    /// Returns the host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port.
    #[must_use]
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the token limit.
    #[must_use]
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns the system prompt.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Builds the base URL from this configuration.
    #[must_use]
    pub fn base_url(&self) -> String {
        if self.host.starts_with("http://") || self.host.starts_with("https://") {
            return self.host.trim_end_matches('/').to_string();
        }
        let scheme = if self.use_https { "https" } else { "http" };
        format!("{scheme}://{}:{}", self.host, self.port)
    }

    /// Creates a [`CompletionClient`] from this configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::InvalidAddress`] if the host is empty, or
    /// [`ProtocolError::Http`] if the HTTP client cannot be created.
    pub fn into_client(self) -> Result<CompletionClient, ProtocolError> {
        if self.host.trim().is_empty() {
            return Err(ProtocolError::InvalidAddress(
                "host is required".to_string(),
            ));
        }

        let base_url = self.base_url();
        let client = Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(ProtocolError::Http)?;

        Ok(CompletionClient {
            base_url,
            client,
            model: self.model,
            max_tokens: self.max_tokens,
            system_prompt: self.system_prompt,
        })
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_HOST)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    system: &'a str,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
}

/// Client requesting completions from a text-generation server.
///
/// # Examples
///
/// ```no_run
/// use voxhome_lib::llm::CompletionConfig;
///
/// # async fn example() -> voxhome_lib::Result<()> {
/// let client = CompletionConfig::default().into_client()?;
/// let response = client.complete("Make the light purple").await?;
/// println!("{response}");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct CompletionClient {
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    system_prompt: String,
}

impl CompletionClient {
    /// Returns the base URL of the server.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model name.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    /// Requests a completion for the user's prompt and returns the raw text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Protocol`] if the request fails or the server answers
    /// with a non-success status, and [`Error::Parse`] if the body is not the
    /// expected JSON.
    pub async fn complete(&self, prompt: &str) -> Result<String, Error> {
        let url = self.generate_url();
        let request = GenerateRequest {
            model: &self.model,
            prompt: format_prompt(&self.system_prompt, prompt),
            system: &self.system_prompt,
            max_tokens: self.max_tokens,
            stream: false,
        };

        tracing::debug!(url = %url, model = %self.model, "Requesting completion");

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        if !response.status().is_success() {
            return Err(ProtocolError::ConnectionFailed(format!(
                "HTTP {} - {}",
                response.status().as_u16(),
                response.status().canonical_reason().unwrap_or("Unknown")
            ))
            .into());
        }

        let body = response.text().await.map_err(ProtocolError::Http)?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(ParseError::from)?;
        let text = parsed
            .response
            .ok_or_else(|| ParseError::MissingField("response".to_string()))?;

        tracing::debug!(chars = text.len(), "Received completion");

        Ok(text)
    }
}
