//! Error types for the novelwriter workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! The three families a workflow run can hit map onto these types:
//! transport and quota failures ([`HttpError`], [`ProviderError`]),
//! unusable model output ([`ParseError`]), and workflow failures
//! ([`WorkflowError`], or [`StageError`] wrapping whatever a stage hit).
//!
//! # Examples
//!
//! ```
//! use novelwriter_error::{NovelwriterResult, HttpError};
//!
//! fn fetch_data() -> NovelwriterResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_data() {
//!     Ok(data) => println!("Got: {}", data),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod credential;
mod document;
mod error;
mod http;
mod parse;
mod provider;
mod stage;
mod workflow;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use credential::{CredentialError, CredentialErrorKind};
pub use document::{DocumentError, DocumentErrorKind};
pub use error::{NovelwriterError, NovelwriterErrorKind, NovelwriterResult};
pub use http::HttpError;
pub use parse::{ParseError, ParseErrorKind};
pub use provider::{ProviderError, ProviderErrorKind};
pub use stage::StageError;
pub use workflow::{WorkflowError, WorkflowErrorKind};
