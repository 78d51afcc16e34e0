//! Run command implementation

use super::{Command, CommandContext};
use crate::command::{CommandRunner, CommandSpec};
use crate::log::LoggerExt;
use crate::progress::{Spinner, Wrapper};
use crate::retry::Model;
use anyhow::Result;
use async_trait::async_trait;

/// Run a program under the retry engine, optionally behind a spinner
#[derive(Debug)]
pub struct RunCommand {
    pub spec: CommandSpec,
    pub retry: Model,
    pub progress: bool,
}

impl RunCommand {
    pub fn new(spec: CommandSpec, retry: Model) -> Self {
        Self {
            spec,
            retry,
            progress: false,
        }
    }

    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }
}

#[async_trait]
impl Command for RunCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let logger = context.logger.clone();
        let spec = self.spec.clone();
        let model = self.retry.clone();
        let wrapper = self.progress.then(|| {
            Wrapper::new(
                Spinner::with_message(format!("Running {}", spec.program)),
                context.config.progress.is_interactive(),
            )
        });

        tokio::task::spawn_blocking(move || {
            let runner = CommandRunner::new(logger.clone());
            let total = model.retries() + 1;
            let attempts = || {
                model.try_action(|attempt| {
                    if attempt > 0 {
                        logger.info(&format!("Retrying... ({}/{})", attempt + 1, total));
                    }
                    runner.run_checked(&spec).inspect_err(|e| {
                        logger.warn(&format!("Attempt {} failed: {}", attempt + 1, e));
                    })
                })
            };

            let result = match wrapper {
                Some(wrapper) => wrapper.wrap_action(attempts),
                None => attempts(),
            };

            match &result {
                Ok(()) => logger.done(&format!("'{}' succeeded", spec.display())),
                Err(_) => logger.error(&format!(
                    "'{}' failed after {} attempt(s)",
                    spec.display(),
                    total
                )),
            }
            result
        })
        .await?
    }
}
