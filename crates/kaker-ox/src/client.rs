use core::fmt;
use std::sync::Arc;

use futures_util::StreamExt;

use crate::{
    ClientConfig, KakerRequestError,
    generate_content::{GenerateContentRequest, TextStream},
    internal::KakerRequestHelper,
};

/// Client that answers prompts in the voice of El kaker.
///
/// Cloning is cheap and clones share the read-only configuration. Every call
/// builds its own request and owns its own response state, so clones can be
/// used from several tasks at once.
#[derive(Debug, Clone)]
pub struct Kaker {
    config: Arc<ClientConfig>,
    helper: KakerRequestHelper,
}

/// Result of [`Kaker::generate_with`]
pub enum Generation {
    /// The whole answer, from the non-streaming endpoint
    Complete(String),
    /// Fragments as they arrive from the streaming endpoint
    Stream(TextStream),
}

impl Generation {
    /// Wait for the whole answer, concatenating fragments when streaming.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the stream.
    pub async fn into_text(self) -> Result<String, KakerRequestError> {
        match self {
            Generation::Complete(text) => Ok(text),
            Generation::Stream(mut stream) => {
                let mut text = String::new();
                while let Some(fragment) = stream.next().await {
                    text.push_str(&fragment?);
                }
                Ok(text)
            }
        }
    }
}

impl fmt::Debug for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Generation::Complete(text) => f.debug_tuple("Complete").field(text).finish(),
            Generation::Stream(_) => f.debug_tuple("Stream").finish_non_exhaustive(),
        }
    }
}

impl Kaker {
    /// Create a client for the default model.
    ///
    /// # Errors
    ///
    /// Returns `KakerRequestError::Configuration` if the API key is empty.
    pub fn new(api_key: impl Into<String>) -> Result<Self, KakerRequestError> {
        Self::from_config(ClientConfig::builder().api_key(api_key).build())
    }

    /// Create a client for a specific model.
    ///
    /// # Errors
    ///
    /// Returns `KakerRequestError::Configuration` if the API key or the model
    /// identifier is empty.
    pub fn with_model(
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, KakerRequestError> {
        Self::from_config(ClientConfig::builder().api_key(api_key).model(model).build())
    }

    /// Create a client from a full configuration.
    ///
    /// Nothing is sent over the network here.
    ///
    /// # Errors
    ///
    /// Returns `KakerRequestError::Configuration` if the configuration does not
    /// validate or the HTTP client cannot be built.
    pub fn from_config(config: ClientConfig) -> Result<Self, KakerRequestError> {
        config.validate()?;
        let helper = KakerRequestHelper::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            helper,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The exact body that would be sent for `prompt`.
    pub fn request_for(&self, prompt: impl Into<String>) -> GenerateContentRequest {
        GenerateContentRequest::for_prompt(&self.config, prompt)
    }

    /// Generate the whole answer to `prompt`.
    ///
    /// # Errors
    ///
    /// - `KakerRequestError::Transport` if the connection fails or times out
    /// - `KakerRequestError::HttpStatus` if the provider answers with any status but `200 OK`
    /// - `KakerRequestError::MalformedResponse` if the body is not JSON
    /// - `KakerRequestError::Api` if the body carries an error object
    /// - `KakerRequestError::UnexpectedShape` if the body has no generated text
    pub async fn generate(&self, prompt: impl Into<String>) -> Result<String, KakerRequestError> {
        let request = self.request_for(prompt);
        self.helper.send_generate_content_request(&request).await
    }

    /// Stream the answer to `prompt` as it is generated.
    ///
    /// Nothing is sent until the stream is first polled. Any status but `200 OK`
    /// is yielded as a single `KakerRequestError::HttpStatus`; a connection
    /// failure as `KakerRequestError::Transport`. Chunks that cannot be parsed
    /// are skipped.
    #[must_use]
    pub fn generate_stream(&self, prompt: impl Into<String>) -> TextStream {
        let request = self.request_for(prompt);
        self.helper.stream_generate_content_request(&request)
    }

    /// Generate the answer to `prompt`, streaming or not.
    ///
    /// # Errors
    ///
    /// In non-streaming mode, the errors of [`Kaker::generate`]. In streaming
    /// mode errors are yielded by the stream instead.
    pub async fn generate_with(
        &self,
        prompt: impl Into<String>,
        streaming: bool,
    ) -> Result<Generation, KakerRequestError> {
        if streaming {
            Ok(Generation::Stream(self.generate_stream(prompt)))
        } else {
            self.generate(prompt).await.map(Generation::Complete)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;

    #[test]
    fn empty_api_key_fails_before_any_request() {
        assert!(matches!(
            Kaker::new(""),
            Err(KakerRequestError::Configuration(_))
        ));
        assert!(matches!(
            Kaker::with_model("key", " "),
            Err(KakerRequestError::Configuration(_))
        ));
    }

    #[test]
    fn clones_share_configuration() {
        let kaker = Kaker::with_model("key", crate::Model::Gemini20Flash).unwrap();
        let clone = kaker.clone();

        assert!(std::ptr::eq(kaker.config(), clone.config()));
        assert_eq!(clone.config().model(), "gemini-2.0-flash");
    }

    #[test]
    fn request_for_uses_configured_limits() {
        let config = ClientConfig::builder()
            .api_key("key")
            .max_output_tokens(64)
            .system_instruction("Eres un loro.")
            .build();
        let kaker = Kaker::from_config(config).unwrap();

        let request = kaker.request_for("hola");

        assert_eq!(request.generation_config.max_output_tokens, 64);
        assert_eq!(request.system_instruction.first_text(), Some("Eres un loro."));
    }

    #[tokio::test]
    async fn into_text_concatenates_fragments() {
        let fragments: Vec<Result<String, KakerRequestError>> =
            vec![Ok("Ho".to_string()), Ok("la".to_string())];
        let generation = Generation::Stream(stream::iter(fragments).boxed());

        assert_eq!(generation.into_text().await.unwrap(), "Hola");
        assert_eq!(
            Generation::Complete("hola".to_string())
                .into_text()
                .await
                .unwrap(),
            "hola"
        );
    }

    #[tokio::test]
    async fn into_text_stops_at_first_error() {
        let fragments: Vec<Result<String, KakerRequestError>> = vec![
            Ok("Ho".to_string()),
            Err(KakerRequestError::HttpStatus {
                status: 500,
                body: String::new(),
            }),
            Ok("la".to_string()),
        ];
        let generation = Generation::Stream(stream::iter(fragments).boxed());

        assert_eq!(generation.into_text().await.unwrap_err().status(), Some(500));
    }
}
