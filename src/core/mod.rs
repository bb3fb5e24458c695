pub mod stats;

pub use stats::{evaluate, parse_stats, select_rows, CheckOutcome, CheckStatus};
