//! Commandeer — natural-language command to dispatched action.
//!
//! Pipeline: prompt → generate → recover → validate → resolve dates →
//! dispatch. Failures before dispatch degrade to a keyword classifier so
//! the caller always receives a structurally valid action record; dispatch
//! results are reported per action.

pub mod config;
pub mod dates;
pub mod dispatch;
pub mod error;
pub mod fallback;
pub mod generate;
pub mod google_api;
pub mod pipeline;
pub mod prompt;
pub mod recover;
pub mod signature;
pub mod types;
pub mod util;
pub mod validate;

pub use config::AppConfig;
pub use error::PipelineError;
pub use types::{ActingIdentity, CommandResponse, DispatchOutcome, ParsedAction};
