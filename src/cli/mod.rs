//! Command workflows shared by the binary and the integration tests

pub mod orchestration;

pub use orchestration::{
    read_message_file, run_impact_workflow, run_notes_workflow, ImpactWorkflowArgs, NotesReport,
    NotesWorkflowArgs,
};
