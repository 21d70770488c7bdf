//! Script generation and refinement flows.
//!
//! Each flow renders a prompt from typed input, sends it through a
//! [`ReelscriptDriver`](reelscript_interface::ReelscriptDriver), checks the
//! response against its output contract and cleans the text.
//!
//! # Example
//!
//! ```no_run
//! use reelscript_core::{CreativeBrief, FieldOptions};
//! use reelscript_flows::generate_scripts;
//! use reelscript_interface::ReelscriptDriver;
//!
//! # async fn run(driver: &dyn ReelscriptDriver) -> Result<(), Box<dyn std::error::Error>> {
//! let brief = CreativeBrief::builder()
//!     .topic("3-ingredient healthy breakfasts")
//!     .build()?;
//! let scripts = generate_scripts(driver, &brief, &FieldOptions::default()).await?;
//! for script in &scripts {
//!     println!("{script}\n");
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod generation;
mod prompt;
mod refinement;
mod sanitize;

pub use extraction::{extract_json, parse_json};
pub use generation::{generate_scripts, generation_request, parse_script_set, scripts_schema};
pub use prompt::{GENERATION_TEMPLATE, REFINEMENT_TEMPLATE, SYSTEM_PROMPT, render};
pub use refinement::{parse_refinement, refine_script, refinement_request, refinement_schema};
pub use sanitize::sanitize_script;
