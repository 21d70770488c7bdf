//! Trait definitions for the Reelscript script generator.
//!
//! The [`ReelscriptDriver`] trait is the seam between the script flows and
//! the hosted model that writes the text. Enable the `mock` feature for a
//! scripted in-memory driver.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

#[cfg(feature = "mock")]
mod mock;

pub use traits::ReelscriptDriver;

#[cfg(feature = "mock")]
pub use mock::{MockDriver, MockResponse, scripts_payload};
