//! Analytics event pipeline
//!
//! Typed [`Properties`] are combined into an [`Event`], serialized to JSON and
//! handed to a [`Client`] either inline ([`SyncTracker`]) or through a bounded
//! queue drained by a worker pool ([`AsyncTracker`]).
//!
//! ```rust,no_run
//! use stepkit::analytics::{AsyncTracker, Properties, Tracker};
//! use stepkit::log::default_logger;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let tracker = AsyncTracker::with_defaults(
//!     default_logger(),
//!     vec![Properties::new().with("build_slug", "abc123")],
//! )?;
//! let step = tracker.fork(&[Properties::new().with("step_id", "git-clone")]);
//! step.enqueue("step_started", &[]).await;
//! tracker.wait().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod event;
pub mod property;
pub mod tracker;
pub mod worker;

pub use client::{Client, HttpClient};
pub use event::Event;
pub use property::{Properties, Property};
pub use tracker::{AsyncTracker, SyncTracker, Tracker};
pub use worker::Worker;
