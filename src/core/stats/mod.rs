//! HAProxy statistics check pipeline.
//!
//! Data flows one way: `client` fetches the raw CSV payload, `parsing` turns
//! it into rows, `checker` filters the rows against the configured policy and
//! evaluates the threshold rules into a final outcome.

pub mod checker;
pub mod client;
pub mod config;
pub mod parsing;
pub mod types;

// Re-export public API
pub use checker::{evaluate, is_up, select_rows, SelectedRows};
pub use client::StatsEndpoint;
pub use config::CheckPolicy;
pub use parsing::{parse_stats, StatsRow};
pub use types::{CheckError, CheckOutcome, CheckStatus};
