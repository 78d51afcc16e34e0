//! Bounded queue drained by a fixed pool of delivery tasks

use super::client::Client;
use anyhow::{Context, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Worker pool shared by an async tracker and all of its forks
///
/// Producers block while the queue is full. [`Worker::wait`] closes the
/// queue, lets the workers drain it and returns once every task finished.
pub struct Worker {
    sender: Mutex<Option<mpsc::Sender<String>>>,
    handles: tokio::sync::Mutex<Vec<JoinHandle<()>>>,
}

impl Worker {
    /// Spawn `pool_size` workers on the current tokio runtime
    ///
    /// Both sizes are clamped to at least one. Fails outside a runtime.
    pub fn new(client: Arc<dyn Client>, pool_size: usize, queue_size: usize) -> Result<Self> {
        let runtime = tokio::runtime::Handle::try_current()
            .context("Analytics worker pool must be created inside a tokio runtime")?;
        let (sender, receiver) = mpsc::channel::<String>(queue_size.max(1));
        let receiver = Arc::new(tokio::sync::Mutex::new(receiver));

        let handles = (0..pool_size.max(1))
            .map(|_| {
                let receiver = Arc::clone(&receiver);
                let client = Arc::clone(&client);
                runtime.spawn(async move {
                    loop {
                        let body = receiver.lock().await.recv().await;
                        match body {
                            Some(body) => client.send(body).await,
                            None => return, // queue closed and drained
                        }
                    }
                })
            })
            .collect();

        Ok(Self {
            sender: Mutex::new(Some(sender)),
            handles: tokio::sync::Mutex::new(handles),
        })
    }

    /// Queue a body for delivery; `false` once the pool has been closed
    pub async fn enqueue(&self, body: String) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();

        match sender {
            Some(sender) => sender.send(body).await.is_ok(),
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_none()
    }

    /// Close the queue and wait until the workers delivered everything
    pub async fn wait(&self) {
        self.sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        let mut handles = self.handles.lock().await;
        for result in futures::future::join_all(handles.drain(..)).await {
            if let Err(e) = result {
                eprintln!("analytics worker failed: {}", e);
            }
        }
    }
}
