use core::fmt;
use std::time::Duration;

use bon::Builder;
use url::Url;

use crate::{KakerRequestError, Model, persona::SYSTEM_INSTRUCTION};

/// Base URL the model name and method are appended to
pub const DEFAULT_ENDPOINT_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Upper bound on the length of every answer
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;

/// Total time allowed for one request, body included
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings shared by every request a client sends.
///
/// Built once, validated by [`crate::Kaker::from_config`] and never changed
/// afterwards.
#[derive(Clone, Builder)]
pub struct ClientConfig {
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(default = Model::default().to_string(), into)]
    pub(crate) model: String,
    #[builder(default = DEFAULT_ENDPOINT_BASE.to_string(), into)]
    pub(crate) endpoint_base: String,
    #[builder(default = DEFAULT_MAX_OUTPUT_TOKENS)]
    pub(crate) max_output_tokens: u32,
    #[builder(default = SYSTEM_INSTRUCTION.to_string(), into)]
    pub(crate) system_instruction: String,
    #[builder(default = DEFAULT_TIMEOUT)]
    pub(crate) timeout: Duration,
}

impl ClientConfig {
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint_base(&self) -> &str {
        &self.endpoint_base
    }

    #[must_use]
    pub fn max_output_tokens(&self) -> u32 {
        self.max_output_tokens
    }

    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Check every field before the client touches the network.
    ///
    /// # Errors
    ///
    /// Returns `KakerRequestError::Configuration` naming the first bad field.
    pub fn validate(&self) -> Result<(), KakerRequestError> {
        if self.api_key.trim().is_empty() {
            return Err(KakerRequestError::Configuration(
                "API key must not be empty".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(KakerRequestError::Configuration(
                "model identifier must not be empty".to_string(),
            ));
        }
        if self.max_output_tokens == 0 {
            return Err(KakerRequestError::Configuration(
                "max output tokens must be positive".to_string(),
            ));
        }

        let base = Url::parse(&self.endpoint_base).map_err(|e| {
            KakerRequestError::Configuration(format!(
                "invalid endpoint base {:?}: {e}",
                self.endpoint_base
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(KakerRequestError::Configuration(format!(
                "endpoint base must be an http(s) URL, got {:?}",
                self.endpoint_base
            )));
        }

        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("endpoint_base", &self.endpoint_base)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
