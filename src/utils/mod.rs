//! Utility modules for common functionality

pub mod clock;
pub mod terminal;

// Re-export commonly used items
pub use clock::{Sleeper, SystemSleeper, TimeProvider, fixed_time, system_time};
pub use terminal::is_interactive;
