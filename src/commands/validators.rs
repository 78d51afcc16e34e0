//! Command argument validation utilities
//!
//! Checks applied after clap parsing, for rules clap cannot express.

use crate::analytics::client::parse_endpoint;
use anyhow::{Result, anyhow};

/// Validation errors for command arguments
#[derive(Debug, PartialEq)]
pub enum CommandValidationError {
    /// Invalid argument value
    InvalidValue {
        argument: String,
        value: String,
        reason: String,
    },
    /// Empty collection when at least one item is required
    EmptyCollection { argument: String },
}

impl std::fmt::Display for CommandValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandValidationError::InvalidValue {
                argument,
                value,
                reason,
            } => {
                write!(f, "Invalid value '{}' for {}: {}", value, argument, reason)
            }
            CommandValidationError::EmptyCollection { argument } => {
                write!(f, "{} cannot be empty", argument)
            }
        }
    }
}

impl std::error::Error for CommandValidationError {}

/// The run command needs a program to execute
pub fn validate_run_args(command: &[String]) -> Result<()> {
    match command.first() {
        Some(program) if !program.trim().is_empty() => Ok(()),
        _ => Err(anyhow!("no command specified")),
    }
}

/// Event names must contain a non-whitespace character
pub fn validate_event_name(event: &str) -> Result<()> {
    if event.trim().is_empty() {
        return Err(CommandValidationError::EmptyCollection {
            argument: "event name".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Each `--property` must look like `key=value` with a non-empty key
pub fn validate_property_args(properties: &[String]) -> Result<()> {
    for property in properties {
        match property.split_once('=') {
            Some((key, _)) if !key.trim().is_empty() => {}
            _ => {
                return Err(CommandValidationError::InvalidValue {
                    argument: "--property".to_string(),
                    value: property.clone(),
                    reason: "expected key=value".to_string(),
                }
                .into());
            }
        }
    }
    Ok(())
}

/// An endpoint override must be an absolute http(s) URL
pub fn validate_endpoint(endpoint: &Option<String>) -> Result<()> {
    if let Some(endpoint) = endpoint {
        parse_endpoint(endpoint).map_err(|e| {
            anyhow::Error::from(CommandValidationError::InvalidValue {
                argument: "--endpoint".to_string(),
                value: endpoint.clone(),
                reason: e.root_cause().to_string(),
            })
        })?;
    }
    Ok(())
}
