//! Parse the HAProxy CSV statistics export into rows.
//!
//! The export is a comma-separated table whose header line carries the column
//! names, decorated with a leading `# ` (and, depending on version, a
//! trailing empty column). Each data line describes one frontend, backend, or
//! individual server.

use std::collections::HashMap;

use regex::Regex;

/// Synthetic aggregate row for a proxy's listening side.
pub const SVNAME_FRONTEND: &str = "FRONTEND";
/// Synthetic aggregate row summarizing a proxy's servers.
pub const SVNAME_BACKEND: &str = "BACKEND";

/// One parsed statistics record, keyed by the header-derived column names.
///
/// The columns the check consumes are typed fields; anything else the export
/// carries is preserved in `extra` untouched. Absent trailing fields (rows
/// shorter than the header) and present-but-empty fields both read as "no
/// value": empty strings, and 0 for the numeric columns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsRow {
    /// Proxy (service) name, `pxname`.
    pub pxname: String,
    /// Server name within the proxy, `svname`.
    pub svname: String,
    /// Status string, e.g. `UP 1/1`, `DOWN`, `MAINT`, `no check`.
    pub status: String,
    /// Current sessions, `scur`.
    pub scur: i64,
    /// Highest observed session count, `smax`.
    pub smax: i64,
    /// Configured session limit, `slim`. 0 means unlimited.
    pub slim: i64,
    /// Result of the last health check, `check_status`.
    pub check_status: String,
    /// Columns outside the typed contract, by header key.
    pub extra: HashMap<String, String>,
}

/// Parse a raw CSV payload. The first non-blank line is the header; blank
/// lines anywhere are skipped.
pub fn parse_stats(payload: &str) -> Vec<StatsRow> {
    let mut lines = payload
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let keys = match lines.next() {
        Some(header) => header_keys(header),
        None => return Vec::new(),
    };

    lines.map(|line| build_row(&keys, line)).collect()
}

/// Extract field keys from the header line. Each comma-separated token's key
/// is the first alphanumeric/underscore/hyphen run inside it, which discards
/// the leading `#` and any stray punctuation; a token with no such run (the
/// trailing empty column) yields an empty key.
fn header_keys(header: &str) -> Vec<String> {
    let word = Regex::new(r"[A-Za-z0-9_-]+").expect("header key pattern is valid");
    header
        .split(',')
        .map(|token| {
            word.find(token)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        })
        .collect()
}

fn build_row(keys: &[String], line: &str) -> StatsRow {
    let mut row = StatsRow::default();
    for (key, value) in keys.iter().zip(line.split(',')) {
        match key.as_str() {
            "pxname" => row.pxname = value.to_string(),
            "svname" => row.svname = value.to_string(),
            "status" => row.status = value.to_string(),
            "scur" => row.scur = parse_count(value),
            "smax" => row.smax = parse_count(value),
            "slim" => row.slim = parse_count(value),
            "check_status" => row.check_status = value.to_string(),
            "" => {}
            _ => {
                row.extra.insert(key.clone(), value.to_string());
            }
        }
    }
    row
}

/// Numeric coercion: absent and empty both default to 0.
fn parse_count(value: &str) -> i64 {
    value.trim().parse().unwrap_or(0)
}
