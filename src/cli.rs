use clap::Parser;

use crate::core::stats::client::StatsEndpoint;
use crate::core::stats::config::CheckPolicy;
use crate::core::stats::types::CheckError;

/// Check HAProxy service health via its statistics export.
#[derive(Parser, Debug)]
#[command(name = "check_haproxy")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "HAProxy statistics health check with monitoring exit codes")]
pub struct Cli {
    /// Hostname of the stats endpoint, or path to the HAProxy admin socket
    #[arg(short = 'H', long = "host", value_name = "HOST|SOCKET")]
    pub host: String,

    /// Port of the HTTP stats endpoint
    #[arg(short = 'P', long, default_value_t = 80)]
    pub port: u16,

    /// URL path of the stats page
    #[arg(short = 'p', long, default_value = "/")]
    pub path: String,

    /// Username for HTTP basic authentication
    #[arg(short = 'u', long)]
    pub user: Option<String>,

    /// Password for HTTP basic authentication (may be empty)
    #[arg(long, default_value = "")]
    pub password: String,

    /// Use HTTPS for the stats endpoint
    #[arg(long)]
    pub ssl: bool,

    /// Service name to check: a substring or regular expression matched
    /// against proxy names
    #[arg(short = 'N', long, value_name = "NAME")]
    pub name: Option<String>,

    /// Require the service name to match a proxy name exactly
    #[arg(short = 'e', long)]
    pub exact: bool,

    /// Check every service in the stats export
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Count servers in maintenance mode instead of skipping them
    #[arg(long)]
    pub include_maint: bool,

    /// WARNING when fewer than this percentage of servers are up
    #[arg(short = 'w', long = "warning", value_name = "PERCENT", default_value_t = 50)]
    pub warning: u64,

    /// CRITICAL when fewer than this percentage of servers are up
    #[arg(short = 'c', long = "critical", value_name = "PERCENT", default_value_t = 25)]
    pub critical: u64,

    /// WARNING when a server exceeds this percentage of its session limit
    #[arg(long, value_name = "PERCENT", default_value_t = 75)]
    pub session_warning: u64,

    /// CRITICAL when a server exceeds this percentage of its session limit
    #[arg(long, value_name = "PERCENT", default_value_t = 90)]
    pub session_critical: u64,

    /// Session percentage warning threshold for BACKEND aggregate rows
    #[arg(long, value_name = "PERCENT")]
    pub backend_session_warning: Option<u64>,

    /// Session percentage critical threshold for BACKEND aggregate rows
    #[arg(long, value_name = "PERCENT")]
    pub backend_session_critical: Option<u64>,

    /// WARNING when fewer than this many services match
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub min_warning_count: usize,

    /// CRITICAL when fewer than this many services match
    #[arg(long, value_name = "COUNT", default_value_t = 0)]
    pub min_critical_count: usize,

    /// Report OK when no services match the name
    #[arg(long)]
    pub missing_ok: bool,

    /// Report CRITICAL when no services match the name
    #[arg(long)]
    pub missing_fail: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn endpoint(&self) -> StatsEndpoint {
        StatsEndpoint {
            source: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            username: self.user.clone(),
            password: self.password.clone(),
            use_ssl: self.ssl,
        }
    }

    /// Build the check policy. Arguments that name no service, and invalid
    /// name patterns, are rejected here, before any network I/O happens.
    pub fn policy(&self) -> Result<CheckPolicy, CheckError> {
        let pattern = if self.all {
            None
        } else {
            let name = self.name.as_deref().ok_or(CheckError::NoServiceSpecified)?;
            Some(CheckPolicy::compile_pattern(name, self.exact)?)
        };

        Ok(CheckPolicy {
            pattern,
            pattern_label: self.name.clone().unwrap_or_default(),
            include_maint: self.include_maint,
            up_warn_percent: self.warning,
            up_crit_percent: self.critical,
            session_warn_percent: self.session_warning,
            session_crit_percent: self.session_critical,
            backend_session_warn_percent: self.backend_session_warning,
            backend_session_crit_percent: self.backend_session_critical,
            min_warn_count: self.min_warning_count,
            min_crit_count: self.min_critical_count,
            missing_ok: self.missing_ok,
            missing_fail: self.missing_fail,
        })
    }
}
