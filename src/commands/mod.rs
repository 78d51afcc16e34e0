//! CLI command implementations

pub mod base;
pub mod pipe;
pub mod run;
pub mod track;
pub mod validators;

pub use base::{Command, CommandContext};
pub use pipe::PipeCommand;
pub use run::RunCommand;
pub use track::TrackCommand;
