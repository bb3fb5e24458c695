//! Row filtering and threshold evaluation.
//!
//! Evaluation is a pure function of the selected rows and the policy: all
//! division is guarded by the empty-set short circuit and every formatting
//! path is total, so nothing in here can fail.

use tracing::debug;

use crate::core::stats::config::CheckPolicy;
use crate::core::stats::parsing::{StatsRow, SVNAME_BACKEND, SVNAME_FRONTEND};
use crate::core::stats::types::{CheckOutcome, CheckStatus};

/// Rows selected for evaluation.
///
/// `servers` drives the up-percentage and per-server session rules.
/// `backends` keeps the name-matched BACKEND aggregate rows, which are
/// excluded from `servers` under a named filter but still needed for the
/// per-backend session rules.
#[derive(Debug, Clone, Default)]
pub struct SelectedRows {
    pub servers: Vec<StatsRow>,
    pub backends: Vec<StatsRow>,
}

/// Whether a status string counts as "up" for the up-percentage.
///
/// DRAIN counts as up: the server still completes existing sessions. All
/// other states (DOWN, NOLB, MAINT when it survives filtering) count as down.
pub fn is_up(status: &str) -> bool {
    status.starts_with("UP")
        || status == "OPEN"
        || status == "no check"
        || status.starts_with("DRAIN")
}

/// Filter the parsed rows down to the services named by the policy.
///
/// Under a named filter the synthetic FRONTEND/BACKEND aggregate rows are
/// excluded from the server set; with every service in scope they are kept.
/// Servers in maintenance are dropped unless the policy includes them.
pub fn select_rows(rows: Vec<StatsRow>, policy: &CheckPolicy) -> SelectedRows {
    let mut selected = SelectedRows::default();

    for row in rows {
        if let Some(pattern) = &policy.pattern {
            if !pattern.is_match(&row.pxname) {
                continue;
            }
        }

        if row.svname == SVNAME_BACKEND {
            selected.backends.push(row.clone());
        }

        if policy.pattern.is_some()
            && (row.svname == SVNAME_FRONTEND || row.svname == SVNAME_BACKEND)
        {
            continue;
        }

        if !policy.include_maint && row.status.starts_with("MAINT") {
            continue;
        }

        selected.servers.push(row);
    }

    debug!(
        servers = selected.servers.len(),
        backends = selected.backends.len(),
        "rows selected"
    );
    selected
}

/// Apply the ordered threshold rules; the first rule that fires decides the
/// verdict.
pub fn evaluate(selected: &SelectedRows, policy: &CheckPolicy) -> CheckOutcome {
    let servers = &selected.servers;

    if servers.is_empty() {
        let message = format!("No services matching /{}/", policy.pattern_label);
        let status = if policy.missing_fail {
            CheckStatus::Critical
        } else if policy.missing_ok {
            CheckStatus::Ok
        } else {
            CheckStatus::Warning
        };
        return CheckOutcome::new(status, message);
    }

    let total = servers.len();
    let up_count = servers.iter().filter(|row| is_up(&row.status)).count();
    // Truncating integer division; total is non-zero here.
    let percent_up = (100 * up_count / total) as u64;

    let failed_names: Vec<String> = servers
        .iter()
        .filter(|row| !is_up(&row.status))
        .map(|row| {
            if row.check_status.is_empty() {
                format!("{}/{}", row.pxname, row.svname)
            } else {
                format!("{}/{}[{}]", row.pxname, row.svname, row.check_status)
            }
        })
        .collect();

    let critical_sessions = over_session_limit(servers, policy.session_crit_percent);
    let warning_sessions = over_session_limit(servers, policy.session_warn_percent);
    let critical_backends = match policy.backend_session_crit_percent {
        Some(percent) => over_session_limit(&selected.backends, percent),
        None => Vec::new(),
    };
    let warning_backends = match policy.backend_session_warn_percent {
        Some(percent) => over_session_limit(&selected.backends, percent),
        None => Vec::new(),
    };

    let mut message = format!(
        "UP: {}% of {} /{}/ services",
        percent_up, total, policy.pattern_label
    );
    if !failed_names.is_empty() {
        message.push_str(&format!(", DOWN: {}", failed_names.join(", ")));
    }

    if total < policy.min_crit_count {
        return CheckOutcome::new(CheckStatus::Critical, message);
    }
    if percent_up < policy.up_crit_percent {
        return CheckOutcome::new(CheckStatus::Critical, message);
    }
    if !critical_sessions.is_empty() && policy.backend_session_crit_percent.is_none() {
        message.push_str("; Active sessions critical: ");
        message.push_str(&session_clause(&critical_sessions));
        return CheckOutcome::new(CheckStatus::Critical, message);
    }
    if policy.backend_session_crit_percent.is_some() && !critical_backends.is_empty() {
        message.push_str("; Active backends critical: ");
        message.push_str(&backend_clause(&critical_backends));
        return CheckOutcome::new(CheckStatus::Critical, message);
    }
    if total < policy.min_warn_count {
        return CheckOutcome::new(CheckStatus::Warning, message);
    }
    if percent_up < policy.up_warn_percent {
        return CheckOutcome::new(CheckStatus::Warning, message);
    }
    if !warning_sessions.is_empty() && policy.backend_session_warn_percent.is_none() {
        message.push_str("; Active sessions warning: ");
        message.push_str(&session_clause(&warning_sessions));
        return CheckOutcome::new(CheckStatus::Warning, message);
    }
    // A warning-level backend breach exits CRITICAL, not WARNING. Kept for
    // compatibility with the deployed threshold chain; see DESIGN.md.
    if policy.backend_session_warn_percent.is_some() && !warning_backends.is_empty() {
        message.push_str("; Active backends warning: ");
        message.push_str(&backend_clause(&warning_backends));
        return CheckOutcome::new(CheckStatus::Critical, message);
    }

    CheckOutcome::new(CheckStatus::Ok, message)
}

/// Rows whose current sessions exceed `percent` of their limit. Rows without
/// a positive limit are unlimited and exempt.
fn over_session_limit(rows: &[StatsRow], percent: u64) -> Vec<&StatsRow> {
    rows.iter()
        .filter(|row| {
            row.slim > 0 && 100.0 * row.scur as f64 / row.slim as f64 > percent as f64
        })
        .collect()
}

fn session_clause(rows: &[&StatsRow]) -> String {
    rows.iter()
        .map(|row| format!("{} of {} {}.{}", row.scur, row.slim, row.pxname, row.svname))
        .collect::<Vec<_>>()
        .join(", ")
}

fn backend_clause(rows: &[&StatsRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "current sessions: {}, maximum sessions: {} for {} backend.",
                row.scur, row.smax, row.pxname
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
