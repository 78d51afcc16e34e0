//! Track command implementation

use super::{Command, CommandContext};
use crate::analytics::{AsyncTracker, HttpClient, Properties, Property, SyncTracker, Tracker};
use crate::constants::analytics::SYNC_TIMEOUT;
use anyhow::Result;
use async_trait::async_trait;
use colored::*;
use std::sync::Arc;

/// Send a single analytics event
#[derive(Debug)]
pub struct TrackCommand {
    pub event: String,
    pub properties: Properties,
    pub sync: bool,
    pub endpoint: Option<String>,
}

#[async_trait]
impl Command for TrackCommand {
    async fn execute(&self, context: &CommandContext) -> Result<()> {
        let settings = &context.config.analytics;
        if !settings.enabled {
            println!(
                "{} | {}",
                "track".cyan().bold(),
                "Analytics disabled, event not sent".yellow()
            );
            return Ok(());
        }

        let endpoint = self.endpoint.as_deref().unwrap_or(&settings.endpoint);
        let timeout = if self.sync {
            SYNC_TIMEOUT.min(settings.timeout())
        } else {
            settings.timeout()
        };
        let client = Arc::new(HttpClient::new(endpoint, timeout, context.logger.clone())?);

        if self.sync {
            let tracker = SyncTracker::new(client, context.logger.clone(), Vec::new());
            send(&tracker, &self.event, &self.properties).await;
        } else {
            let tracker = AsyncTracker::with_pool(
                client,
                context.logger.clone(),
                settings.pool_size,
                settings.queue_size,
                Vec::new(),
            )?;
            send(&tracker, &self.event, &self.properties).await;
        }

        println!(
            "{} | {} {}",
            "track".cyan().bold(),
            "Event dispatched:".green(),
            self.event
        );
        Ok(())
    }
}

async fn send<T: Tracker>(tracker: &T, event: &str, properties: &Properties) {
    tracker.enqueue(event, std::slice::from_ref(properties)).await;
    tracker.wait().await;
}

/// Parse `key=value`; the value becomes a bool, integer, float or string,
/// whichever parses first
pub fn parse_property(arg: &str) -> Result<(String, Property)> {
    let (key, value) = arg
        .split_once('=')
        .ok_or_else(|| anyhow::anyhow!("Invalid property '{}': expected key=value", arg))?;
    if key.trim().is_empty() {
        anyhow::bail!("Invalid property '{}': key cannot be empty", arg);
    }
    Ok((key.trim().to_string(), parse_value(value)))
}

fn parse_value(value: &str) -> Property {
    if let Ok(flag) = value.parse::<bool>() {
        return Property::Bool(flag);
    }
    if let Ok(number) = value.parse::<i64>() {
        return match i32::try_from(number) {
            Ok(small) => Property::Int(small),
            Err(_) => Property::Long(number),
        };
    }
    if let Ok(number) = value.parse::<f64>() {
        return Property::Float(number);
    }
    Property::String(value.to_string())
}

/// Parse every `--property` argument into one map; later keys win
pub fn parse_properties(args: &[String]) -> Result<Properties> {
    args.iter()
        .map(|arg| parse_property(arg))
        .collect::<Result<Vec<_>>>()
        .map(|pairs| pairs.into_iter().collect())
}
