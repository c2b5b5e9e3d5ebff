//! User interface module - output formatting.
//!
//! The tool is non-interactive; this module only formats reports and
//! prints styled status lines.

pub mod formatter;

pub use formatter::{
    display_error, display_status, display_warning, format_impact_report, format_notes_summary,
};
