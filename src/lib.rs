pub mod analyzer;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod notes;
pub mod release_config;
pub mod ui;

pub use error::{ReleaseImpactError, Result};
