//! Pipe command implementation

use super::{Command, CommandContext};
use crate::log::{LogWriter, Producer};
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::{self, Write};

/// Re-level colored text from stdin and emit it through the configured logger
#[derive(Debug, Default)]
pub struct PipeCommand {
    /// Producer of the emitted records, the logger's own when unset
    pub producer: Option<Producer>,
}

#[async_trait]
impl Command for PipeCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let logger = context.logger.clone();
        let producer = self.producer;

        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut writer = LogWriter::new(logger);
            if let Some(producer) = producer {
                writer = writer.with_producer(producer);
            }
            io::copy(&mut io::stdin().lock(), &mut writer).context("Failed to read stdin")?;
            writer.flush()?;
            Ok(())
        })
        .await?
    }
}
