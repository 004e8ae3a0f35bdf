//! Parsing utilities for CLI arguments.
//!
//! This module provides reusable parsing functions for the value formats
//! accepted on the command line.

use crate::error::{ProfileError, Result};
use crate::storage::{Selection, Trend};

// =============================================================================
// Trend Parsing
// =============================================================================

/// Parse a trend name.
///
/// Accepts `up`, `stable` and `down` (case-insensitive), plus the arrows
/// `↑`, `→` and `↓`.
///
/// # Example
/// ```
/// use circle_profile_store::utils::parsing::parse_trend;
/// use circle_profile_store::storage::Trend;
///
/// assert_eq!(parse_trend("UP").unwrap(), Trend::Up);
/// assert_eq!(parse_trend("↓").unwrap(), Trend::Down);
/// ```
pub fn parse_trend(value: &str) -> Result<Trend> {
    match value.trim().to_lowercase().as_str() {
        "up" | "↑" => Ok(Trend::Up),
        "stable" | "→" => Ok(Trend::Stable),
        "down" | "↓" => Ok(Trend::Down),
        _ => Err(ProfileError::InvalidInput(format!(
            "Unknown trend '{}'. Use: up, stable, down",
            value
        ))),
    }
}

impl std::str::FromStr for Trend {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        parse_trend(s)
    }
}

// =============================================================================
// Selection Parsing
// =============================================================================

/// Parse a selected option index.
///
/// # Arguments
/// * `value` - `0`/`1`, or `first`/`second`
pub fn parse_selection(value: &str) -> Result<Selection> {
    match value.trim().to_lowercase().as_str() {
        "0" | "first" => Ok(Selection::First),
        "1" | "second" => Ok(Selection::Second),
        _ => Err(ProfileError::InvalidInput(format!(
            "Invalid selection '{}'. Use 0 or 1",
            value
        ))),
    }
}

// =============================================================================
// Keyword Parsing
// =============================================================================

/// Flatten keyword arguments.
///
/// Each argument may itself be a comma-separated list. Entries are trimmed
/// and empty ones dropped; order is preserved. No truncation happens here,
/// the store does that.
///
/// # Example
/// ```
/// use circle_profile_store::utils::parsing::parse_keywords;
///
/// let args = vec!["rust, tea".to_string(), "hiking".to_string()];
/// assert_eq!(parse_keywords(&args), vec!["rust", "tea", "hiking"]);
/// ```
pub fn parse_keywords(args: &[String]) -> Vec<String> {
    args.iter()
        .flat_map(|arg| arg.split(','))
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
