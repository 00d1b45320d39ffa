//! Ephemeral project scaffolding: scratch directories, file population,
//! and external command invocation with captured output.

mod error;
mod project;
mod run;
mod scratch;
mod spec;

pub use error::HarnessError;
pub use project::{with_scratch_project, ScratchProject};
pub use run::{run_command, CommandResult};
pub use scratch::ScratchDir;
pub use spec::FileSpec;
