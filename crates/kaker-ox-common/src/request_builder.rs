use crate::{
    error::{CommonRequestError, redact},
    streaming::LineDecoder,
};
use async_stream::try_stream;
use futures_util::stream::{self, BoxStream};
use reqwest::{RequestBuilder as ReqwestRequestBuilder, StatusCode};
use serde::Serialize;
use std::fmt;

/// Authentication method for API requests
#[derive(Clone)]
pub enum AuthMethod {
    /// Query parameter authentication (e.g., ?key=<key>)
    QueryParam(String, String),
}

impl fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryParam(name, _) => f
                .debug_tuple("QueryParam")
                .field(name)
                .field(&"[REDACTED]")
                .finish(),
        }
    }
}

/// A POST endpoint relative to the configured base URL
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub path: String,
    pub query_params: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query_params: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }
}

/// Configuration for request building
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub base_url: String,
    pub auth: Option<AuthMethod>,
}

impl RequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Full URL of an endpoint, without query parameters.
    #[must_use]
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.path.trim_start_matches('/')
        )
    }
}

/// Sends JSON POST requests with the configured base URL and auth
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    config: RequestConfig,
}

impl RequestBuilder {
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self { client, config }
    }

    /// Build a reqwest `RequestBuilder` for the given endpoint
    pub fn build_request(&self, endpoint: &Endpoint) -> ReqwestRequestBuilder {
        let mut req = self.client.post(self.config.url_for(endpoint));

        if !endpoint.query_params.is_empty() {
            req = req.query(&endpoint.query_params);
        }

        if let Some(AuthMethod::QueryParam(param_name, value)) = &self.config.auth {
            req = req.query(&[(param_name, value)]);
        }

        req.header("content-type", "application/json")
    }

    /// POST a JSON body and return the raw success body.
    ///
    /// # Errors
    ///
    /// - `CommonRequestError::Json` if the body cannot be serialized
    /// - `CommonRequestError::Http` if the transport fails
    /// - `CommonRequestError::Status` if the server answers with anything but `200 OK`
    pub async fn post_json<B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> Result<bytes::Bytes, CommonRequestError> {
        let payload = serde_json::to_value(body)?;
        tracing::debug!(path = %endpoint.path, "sending request");

        let res = self
            .build_request(endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(redact)?;

        let status = res.status();
        let bytes = res.bytes().await.map_err(redact)?;
        tracing::debug!(path = %endpoint.path, status = status.as_u16(), len = bytes.len(), "response received");

        if status == StatusCode::OK {
            Ok(bytes)
        } else {
            Err(CommonRequestError::from_status(status, &bytes))
        }
    }

    /// POST a JSON body and stream the response body line by line.
    ///
    /// Any status other than `200 OK` is yielded as a single
    /// `CommonRequestError::Status` item. Otherwise lines are yielded as they complete, until the transport
    /// closes.
    pub fn stream_lines<B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: &B,
    ) -> BoxStream<'static, Result<String, CommonRequestError>> {
        let payload = match serde_json::to_value(body) {
            Ok(value) => value,
            Err(e) => return Box::pin(stream::once(async move { Err(e.into()) })),
        };

        let req = self.build_request(endpoint).json(&payload);
        let path = endpoint.path.clone();

        Box::pin(try_stream! {
            tracing::debug!(path = %path, "opening stream");
            let response = req.send().await.map_err(redact)?;
            let status = response.status();

            if status != StatusCode::OK {
                let bytes = response.bytes().await.map_err(redact)?;
                Err(CommonRequestError::from_status(status, &bytes))?;
            } else {
                let mut decoder = LineDecoder::new(response);
                while let Some(line) = decoder.next_line().await? {
                    yield line;
                }
                tracing::debug!(path = %path, "stream closed by server");
            }
        })
    }
}
