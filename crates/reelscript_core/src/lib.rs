//! Core data types for the Reelscript script generator.
//!
//! This crate holds the creative brief, the script collections produced from
//! it, the refinement request types, the curated form options, the driver
//! request/response types and the layered configuration.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod brief;
mod config;
mod length;
mod message;
mod options;
mod output;
mod refinement;
mod request;
mod role;
mod script;

pub use brief::{BriefForm, CreativeBrief, CreativeBriefBuilder, TOPIC_MAX_CHARS, TOPIC_MIN_CHARS};
pub use config::{ModelConfig, ReelscriptConfig, ServerConfig};
pub use length::ReelLength;
pub use message::Message;
pub use options::{
    DEFAULT_LANGUAGE, DEFAULT_OBJECTIVE, DEFAULT_TONE, FieldOptions, INDIAN_LANGUAGES,
    language_for_locale,
};
pub use output::Output;
pub use refinement::{RefinementForm, RefinementGoal, RefinementRequest, RefinementResult};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use role::Role;
pub use script::{SCRIPT_COUNT, ScriptSet};
