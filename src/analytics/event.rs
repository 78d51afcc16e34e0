//! Analytics events and their wire format

use super::property::Properties;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Immutable analytics event
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    id: Uuid,
    event_name: String,
    timestamp: i64,
    properties: Vec<Properties>,
}

#[derive(Serialize)]
struct Payload<'a> {
    id: String,
    event_name: &'a str,
    timestamp: i64,
    #[serde(skip_serializing_if = "Properties::is_empty")]
    properties: Properties,
}

impl Event {
    /// New event with a random v4 id, stamped with the current time
    pub fn new(event_name: impl Into<String>, properties: Vec<Properties>) -> Result<Self> {
        Self::at(event_name, properties, Utc::now())
    }

    /// New event with a random v4 id, stamped with `instant` in ms
    pub fn at(
        event_name: impl Into<String>,
        properties: Vec<Properties>,
        instant: DateTime<Utc>,
    ) -> Result<Self> {
        let event_name = event_name.into();
        if event_name.trim().is_empty() {
            anyhow::bail!("Event name cannot be empty");
        }
        Ok(Self {
            id: Uuid::new_v4(),
            event_name,
            timestamp: instant.timestamp_millis(),
            properties,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn event_name(&self) -> &str {
        &self.event_name
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    /// Property maps flattened left to right
    pub fn properties(&self) -> Properties {
        Properties::merge_all(&self.properties)
    }

    /// Serialize to the tracking endpoint's JSON body
    pub fn to_json(&self) -> Result<String> {
        let payload = Payload {
            id: self.id.hyphenated().to_string(),
            event_name: &self.event_name,
            timestamp: self.timestamp,
            properties: self.properties(),
        };
        Ok(serde_json::to_string(&payload)?)
    }
}
