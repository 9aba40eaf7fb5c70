#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Gemini client for "El kaker", the bot of the La Comunidad social network.
//!
//! Every prompt is sent as a single user message together with the bot's
//! persona as system instruction. The answer comes back either whole or as a
//! stream of text fragments.
//!
//! ```rust,no_run
//! use futures_util::StreamExt;
//! use kaker_ox::Kaker;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let kaker = Kaker::new(std::env::var("GEMINI_API_KEY")?)?;
//!
//! let answer = kaker
//!     .generate("De @juancito: @kaker qué tipo de modelo eres?")
//!     .await?;
//! println!("{answer}");
//!
//! let mut stream = kaker.generate_stream("@kaker ¿Qué otros métodos existen para medir la Tierra?");
//! while let Some(fragment) = stream.next().await {
//!     print!("{}", fragment?);
//! }
//! # Ok(())
//! # }
//! ```

mod client;
pub mod config;
pub mod content;
mod error;
pub mod generate_content;
mod internal;
mod model;
pub mod persona;

pub use crate::client::{Generation, Kaker};
pub use crate::config::{
    ClientConfig, DEFAULT_ENDPOINT_BASE, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TIMEOUT,
};
pub use crate::content::{Content, Part, Role};
pub use crate::error::KakerRequestError;
pub use crate::generate_content::{
    GenerateContentRequest, GenerateContentResponse, GenerationConfig, TextStream,
};
pub use crate::model::Model;
pub use crate::persona::SYSTEM_INSTRUCTION;
