//! Base types and traits for the command pattern

use crate::config::Config;
use crate::log::Logger;
use anyhow::Result;
use std::sync::Arc;

/// Context passed to all commands containing shared configuration
#[derive(Clone)]
pub struct CommandContext {
    /// The loaded configuration, with environment and flag overrides applied
    pub config: Config,
    /// Logger built from `config.log`
    pub logger: Arc<dyn Logger>,
}

/// Trait that all commands must implement
#[async_trait::async_trait]
pub trait Command {
    /// Execute the command with the given context
    async fn execute(&self, context: &CommandContext) -> Result<()>;
}
