//! Error types for the Reelscript library.
//!
//! # Error Hierarchy
//!
//! Errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - Constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use reelscript_error::{HttpError, ReelscriptResult};
//!
//! fn fetch_scripts() -> ReelscriptResult<String> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! assert!(fetch_scripts().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod contract;
mod error;
mod gemini;
mod http;
mod io;
mod json;
mod session;
mod template;
mod validation;

pub use config::ConfigError;
pub use contract::{ContractError, ContractErrorKind};
pub use error::{ReelscriptError, ReelscriptErrorKind, ReelscriptResult};
pub use gemini::{GeminiError, GeminiErrorKind};
pub use http::HttpError;
pub use io::IoError;
pub use json::JsonError;
pub use session::{SessionError, SessionErrorKind};
pub use template::TemplateError;
pub use validation::{FieldIssue, ValidationError, ValidationField};
