//! Subprocess execution with output routed through the logger
//!
//! Child stdout and stderr are each copied through a [`LogWriter`], so a step
//! that prints colored lines keeps its severities in the parent's log.

use crate::log::{LogWriter, Logger, LoggerExt, Producer};
use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::Arc;
use std::thread;

/// Program, arguments and environment of one subprocess
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub dir: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    /// Split a `program args...` list; an empty list yields an empty program
    pub fn from_argv(argv: &[String]) -> Self {
        match argv.split_first() {
            Some((program, args)) => Self::new(program.clone()).with_args(args.to_vec()),
            None => Self::default(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Shell-like rendering used in log lines
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Runs subprocesses and logs their output
pub struct CommandRunner {
    logger: Arc<dyn Logger>,
    output_producer: Producer,
}

impl CommandRunner {
    /// Child output is logged under [`Producer::Step`]
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self {
            logger,
            output_producer: Producer::Step,
        }
    }

    pub fn with_output_producer(mut self, producer: Producer) -> Self {
        self.output_producer = producer;
        self
    }

    /// Run to completion and return the exit code, `-1` if killed by a signal
    pub fn run(&self, spec: &CommandSpec) -> Result<i32> {
        if spec.program.trim().is_empty() {
            anyhow::bail!("no command specified");
        }

        let command_line = spec.display();
        self.logger.info(&format!("Running '{}'", command_line));

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &spec.dir {
            command.current_dir(dir);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("Failed to start '{}'", spec.program))?;

        let stdout = child.stdout.take().context("Child stdout was not captured")?;
        let stderr = child.stderr.take().context("Child stderr was not captured")?;

        let stdout_handle = self.forward(stdout);
        let stderr_handle = self.forward(stderr);

        let status = child.wait()?;
        for handle in [stdout_handle, stderr_handle] {
            if let Ok(Err(e)) = handle.join() {
                self.logger
                    .debug(&format!("Failed to read command output: {}", e));
            }
        }

        let exit_code = status.code().unwrap_or(-1);
        self.logger.debug(&format!(
            "Command '{}' ended with exit code {} ({})",
            command_line,
            exit_code,
            describe_exit_code(exit_code)
        ));

        Ok(exit_code)
    }

    /// Like [`CommandRunner::run`], but a non-zero exit code is an error
    pub fn run_checked(&self, spec: &CommandSpec) -> Result<()> {
        let exit_code = self.run(spec)?;
        if exit_code != 0 {
            anyhow::bail!(
                "Command failed with exit code: {} ({})",
                exit_code,
                describe_exit_code(exit_code)
            );
        }
        Ok(())
    }

    fn forward<R>(&self, mut reader: R) -> thread::JoinHandle<io::Result<()>>
    where
        R: Read + Send + 'static,
    {
        let mut writer =
            LogWriter::new(Arc::clone(&self.logger)).with_producer(self.output_producer);
        thread::spawn(move || {
            io::copy(&mut reader, &mut writer)?;
            writer.flush()
        })
    }
}

/// Shell convention for what an exit code means
pub fn describe_exit_code(code: i32) -> &'static str {
    match code {
        -1 => "killed before exit",
        0 => "success",
        1 => "general error",
        2 => "shell builtin misuse",
        126 => "command invoked cannot execute",
        127 => "command not found",
        128 => "invalid argument to exit",
        130 => "script terminated by Control-C",
        131..=255 => "terminated by signal",
        _ => "error",
    }
}
