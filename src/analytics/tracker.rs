//! Event trackers: inline delivery or a worker pool

use super::client::{Client, HttpClient};
use super::event::Event;
use super::property::Properties;
use super::worker::Worker;
use crate::constants::analytics::{
    DEFAULT_ENDPOINT, DEFAULT_POOL_SIZE, DEFAULT_QUEUE_SIZE, DEFAULT_TIMEOUT, SYNC_TIMEOUT,
};
use crate::log::{Logger, LoggerExt};
use crate::utils::clock::{TimeProvider, system_time};
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Common surface of both trackers
///
/// Enqueueing never fails from the caller's point of view; delivery problems
/// end up as debug records on the tracker's logger.
#[async_trait]
pub trait Tracker: Send + Sync {
    /// Build an event from the baseline plus `properties` and hand it off
    async fn enqueue(&self, event_name: &str, properties: &[Properties]);

    /// Block until every enqueued event has been attempted
    async fn wait(&self);

    /// New tracker sharing the dispatch with `properties` added to the baseline
    fn fork(&self, properties: &[Properties]) -> Self
    where
        Self: Sized;
}

/// Serialize an event or report why it cannot be sent
fn event_body(
    logger: &dyn Logger,
    time_provider: &TimeProvider,
    event_name: &str,
    baseline: &[Properties],
    properties: &[Properties],
) -> Option<String> {
    let event = Event::at(event_name, extend(baseline, properties), time_provider());
    match event.and_then(|event| event.to_json()) {
        Ok(body) => Some(body),
        Err(e) => {
            logger.debug(&format!("Couldn't create analytics event: {}", e));
            None
        }
    }
}

fn extend(baseline: &[Properties], properties: &[Properties]) -> Vec<Properties> {
    baseline.iter().chain(properties).cloned().collect()
}

/// Tracker sending every event before `enqueue` returns
#[derive(Clone)]
pub struct SyncTracker {
    client: Arc<dyn Client>,
    logger: Arc<dyn Logger>,
    time_provider: TimeProvider,
    properties: Vec<Properties>,
}

impl SyncTracker {
    pub fn new(client: Arc<dyn Client>, logger: Arc<dyn Logger>, properties: Vec<Properties>) -> Self {
        Self {
            client,
            logger,
            time_provider: system_time(),
            properties,
        }
    }

    /// Tracker on the default endpoint with the short synchronous timeout
    pub fn with_defaults(logger: Arc<dyn Logger>, properties: Vec<Properties>) -> Result<Self> {
        let client = HttpClient::new(DEFAULT_ENDPOINT, SYNC_TIMEOUT, Arc::clone(&logger))?;
        Ok(Self::new(Arc::new(client), logger, properties))
    }

    /// Clock stamping every event; forks inherit it
    pub fn with_time_provider(mut self, time_provider: TimeProvider) -> Self {
        self.time_provider = time_provider;
        self
    }

    /// Baseline attached to every event
    pub fn properties(&self) -> &[Properties] {
        &self.properties
    }
}

#[async_trait]
impl Tracker for SyncTracker {
    async fn enqueue(&self, event_name: &str, properties: &[Properties]) {
        let body = event_body(
            &*self.logger,
            &self.time_provider,
            event_name,
            &self.properties,
            properties,
        );
        if let Some(body) = body {
            self.client.send(body).await;
        }
    }

    async fn wait(&self) {}

    fn fork(&self, properties: &[Properties]) -> Self {
        Self {
            client: Arc::clone(&self.client),
            logger: Arc::clone(&self.logger),
            time_provider: Arc::clone(&self.time_provider),
            properties: extend(&self.properties, properties),
        }
    }
}

/// Tracker queueing events for a pool of background workers
///
/// Must be created inside a tokio runtime. Delivery order across workers is
/// not guaranteed.
#[derive(Clone)]
pub struct AsyncTracker {
    worker: Arc<Worker>,
    logger: Arc<dyn Logger>,
    time_provider: TimeProvider,
    properties: Vec<Properties>,
}

impl AsyncTracker {
    /// Tracker with the default pool and queue sizes
    pub fn new(
        client: Arc<dyn Client>,
        logger: Arc<dyn Logger>,
        properties: Vec<Properties>,
    ) -> Result<Self> {
        Self::with_pool(client, logger, DEFAULT_POOL_SIZE, DEFAULT_QUEUE_SIZE, properties)
    }

    /// Fails when called outside a tokio runtime
    pub fn with_pool(
        client: Arc<dyn Client>,
        logger: Arc<dyn Logger>,
        pool_size: usize,
        queue_size: usize,
        properties: Vec<Properties>,
    ) -> Result<Self> {
        Ok(Self {
            worker: Arc::new(Worker::new(client, pool_size, queue_size)?),
            logger,
            time_provider: system_time(),
            properties,
        })
    }

    /// Tracker on the default endpoint, timeout and pool
    pub fn with_defaults(logger: Arc<dyn Logger>, properties: Vec<Properties>) -> Result<Self> {
        let client = HttpClient::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, Arc::clone(&logger))?;
        Self::new(Arc::new(client), logger, properties)
    }

    /// Clock stamping every event; forks inherit it
    pub fn with_time_provider(mut self, time_provider: TimeProvider) -> Self {
        self.time_provider = time_provider;
        self
    }

    pub fn properties(&self) -> &[Properties] {
        &self.properties
    }
}

#[async_trait]
impl Tracker for AsyncTracker {
    async fn enqueue(&self, event_name: &str, properties: &[Properties]) {
        let Some(body) = event_body(
            &*self.logger,
            &self.time_provider,
            event_name,
            &self.properties,
            properties,
        ) else {
            return;
        };
        if !self.worker.enqueue(body).await {
            self.logger.debug(&format!(
                "Analytics tracker is closed, dropping event: {}",
                event_name
            ));
        }
    }

    async fn wait(&self) {
        self.worker.wait().await;
    }

    fn fork(&self, properties: &[Properties]) -> Self {
        Self {
            worker: Arc::clone(&self.worker),
            logger: Arc::clone(&self.logger),
            time_provider: Arc::clone(&self.time_provider),
            properties: extend(&self.properties, properties),
        }
    }
}
