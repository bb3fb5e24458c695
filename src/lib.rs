//! Health check for HAProxy instances.
//!
//! Fetches the CSV statistics export from an HAProxy instance, over HTTP(S)
//! or the local admin UNIX socket, filters the rows down to the services
//! under watch, and applies an ordered set of threshold rules to produce a
//! monitoring verdict (OK / WARNING / CRITICAL / UNKNOWN) plus a one-line
//! summary. Runs once per invocation; no state is kept between runs.

pub mod cli;
pub mod core;

pub use crate::core::stats::{CheckError, CheckOutcome, CheckStatus};
