//! Terminal detection helpers

use crate::constants::config::CI_ENV;
use std::io::IsTerminal;

/// Whether progress output should be animated
///
/// Stdout must be a terminal and the `CI` variable must not be `true`.
pub fn is_interactive() -> bool {
    if is_ci(std::env::var(CI_ENV).ok().as_deref()) {
        return false;
    }
    std::io::stdout().is_terminal()
}

fn is_ci(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v.eq_ignore_ascii_case("true") || v == "1")
}
