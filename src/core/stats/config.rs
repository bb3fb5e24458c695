//! Check policy: the thresholds and flags a single invocation runs with.

use regex::Regex;

use crate::core::stats::types::CheckError;

/// All thresholds and flags for one check run. Built once from the command
/// line, never mutated during evaluation.
///
/// The two per-backend session thresholds are optional on purpose: "not
/// configured" changes which rules of the decision chain apply, so it must
/// stay distinguishable from "configured to zero".
#[derive(Debug, Clone)]
pub struct CheckPolicy {
    /// Compiled service-name filter. `None` means every service is in scope
    /// and the synthetic FRONTEND/BACKEND rows are kept.
    pub pattern: Option<Regex>,
    /// The configured service name as given, used in summary messages.
    pub pattern_label: String,
    /// Count servers in maintenance mode instead of dropping them.
    pub include_maint: bool,
    /// WARNING when the up-percentage falls below this.
    pub up_warn_percent: u64,
    /// CRITICAL when the up-percentage falls below this.
    pub up_crit_percent: u64,
    /// WARNING when a server exceeds this percentage of its session limit.
    pub session_warn_percent: u64,
    /// CRITICAL when a server exceeds this percentage of its session limit.
    pub session_crit_percent: u64,
    /// Per-backend override for the session warning threshold.
    pub backend_session_warn_percent: Option<u64>,
    /// Per-backend override for the session critical threshold.
    pub backend_session_crit_percent: Option<u64>,
    /// WARNING when fewer than this many services match.
    pub min_warn_count: usize,
    /// CRITICAL when fewer than this many services match.
    pub min_crit_count: usize,
    /// An empty match set is OK (e.g. a service that scales to zero).
    pub missing_ok: bool,
    /// An empty match set is CRITICAL.
    pub missing_fail: bool,
}

impl Default for CheckPolicy {
    fn default() -> Self {
        Self {
            pattern: None,
            pattern_label: String::new(),
            include_maint: false,
            up_warn_percent: 50,
            up_crit_percent: 25,
            session_warn_percent: 75,
            session_crit_percent: 90,
            backend_session_warn_percent: None,
            backend_session_crit_percent: None,
            min_warn_count: 0,
            min_crit_count: 0,
            missing_ok: false,
            missing_fail: false,
        }
    }
}

impl CheckPolicy {
    /// Compile the service-name filter. Exact matching anchors the pattern to
    /// the whole proxy name; otherwise the name is searched as a regular
    /// expression anywhere in it.
    pub fn compile_pattern(name: &str, exact: bool) -> Result<Regex, CheckError> {
        let pattern = if exact {
            format!("^{name}$")
        } else {
            name.to_string()
        };
        Regex::new(&pattern).map_err(|source| CheckError::BadPattern { pattern, source })
    }
}
