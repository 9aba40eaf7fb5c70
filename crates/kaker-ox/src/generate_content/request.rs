use serde::Serialize;

use super::GenerationConfig;
use crate::{
    ClientConfig,
    content::{Content, Role},
};

/// Body of a `generateContent` / `streamGenerateContent` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    pub generation_config: GenerationConfig,
    pub system_instruction: Content,
}

impl GenerateContentRequest {
    /// Wrap a prompt with the persona and limits of `config`.
    ///
    /// The prompt is sent verbatim as the only user content.
    pub fn for_prompt(config: &ClientConfig, prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::new(Role::User, prompt)],
            generation_config: GenerationConfig::plain_text(config.max_output_tokens),
            system_instruction: Content::unattributed(config.system_instruction.clone()),
        }
    }
}
