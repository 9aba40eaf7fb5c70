use kaker_ox_common::{AuthMethod, Endpoint, RequestBuilder, RequestConfig};

use crate::{
    ClientConfig, KakerRequestError,
    generate_content::{
        request::GenerateContentRequest,
        response,
        stream::{TextStream, text_fragments},
    },
};

/// Sends generate requests for one client configuration
#[derive(Debug, Clone)]
pub(crate) struct KakerRequestHelper {
    builder: RequestBuilder,
    model: String,
}

impl KakerRequestHelper {
    /// Build the HTTP client and request template for `config`.
    ///
    /// TLS certificates are always verified; there is no switch to turn that off.
    pub(crate) fn new(config: &ClientConfig) -> Result<Self, KakerRequestError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                KakerRequestError::Configuration(format!("failed to build HTTP client: {e}"))
            })?;

        let request_config = RequestConfig::new(config.endpoint_base.clone())
            .with_auth(AuthMethod::QueryParam("key".to_string(), config.api_key.clone()));

        Ok(Self {
            builder: RequestBuilder::new(client, request_config),
            model: config.model.clone(),
        })
    }

    pub(crate) fn generate_endpoint(&self) -> Endpoint {
        Endpoint::new(format!("{}:generateContent", self.model))
    }

    /// `alt=sse` makes the provider answer with `data: ` lines instead of one
    /// JSON array.
    pub(crate) fn stream_endpoint(&self) -> Endpoint {
        Endpoint::new(format!("{}:streamGenerateContent", self.model))
            .with_query_param("alt", "sse")
    }

    /// Send a generate content request and wait for the whole answer
    pub(crate) async fn send_generate_content_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<String, KakerRequestError> {
        tracing::debug!(model = %self.model, streaming = false, "generating content");
        let body = self
            .builder
            .post_json(&self.generate_endpoint(), request)
            .await?;
        response::extract_text(&body)
    }

    /// Stream a generate content request as text fragments
    pub(crate) fn stream_generate_content_request(
        &self,
        request: &GenerateContentRequest,
    ) -> TextStream {
        tracing::debug!(model = %self.model, streaming = true, "generating content");
        text_fragments(self.builder.stream_lines(&self.stream_endpoint(), request))
    }
}
