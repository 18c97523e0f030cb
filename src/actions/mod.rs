//! The actions the CLI-tool knows.

pub mod audit;
pub mod grader_files;
pub mod status_preview;
