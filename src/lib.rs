//! Materialize a disposable project on disk and run commands inside it.

pub mod cli;
pub mod harness;

pub use cli::{display_path, run, Args};
pub use harness::{
    run_command, with_scratch_project, CommandResult, FileSpec, HarnessError, ScratchDir,
    ScratchProject,
};
