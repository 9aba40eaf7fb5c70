#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Shared HTTP plumbing for the kaker-ox client
//!
//! This crate holds the transport side of the client: request configuration,
//! query-credential authentication, JSON POST requests and line-oriented
//! decoding of streamed response bodies.

pub mod error;
pub mod request_builder;
pub mod streaming;

pub use error::CommonRequestError;
pub use request_builder::{AuthMethod, Endpoint, RequestBuilder, RequestConfig};
pub use streaming::{LineDecoder, data_payload};
