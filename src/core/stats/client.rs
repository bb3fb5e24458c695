//! Fetch the raw CSV statistics payload.
//!
//! Two transports, one attempt each, no retries: HTTP(S) GET against the
//! stats page, or the `show stat` command over HAProxy's admin UNIX socket
//! when the configured source is a socket path.

use base64::{engine::general_purpose, Engine as _};
use tracing::debug;

use crate::core::stats::types::CheckError;

/// Where and how to reach the HAProxy statistics export.
#[derive(Debug, Clone)]
pub struct StatsEndpoint {
    /// Hostname, or path to the admin UNIX socket.
    pub source: String,
    pub port: u16,
    pub path: String,
    /// Enables HTTP basic auth when set; the password may be empty.
    pub username: Option<String>,
    pub password: String,
    pub use_ssl: bool,
}

impl StatsEndpoint {
    /// The stats URL for the HTTP transport. `;csv;norefresh` selects the
    /// CSV rendering of the stats page.
    pub fn url(&self) -> String {
        let scheme = if self.use_ssl { "https" } else { "http" };
        format!(
            "{}://{}:{}{};csv;norefresh",
            scheme, self.source, self.port, self.path
        )
    }

    /// Retrieve the raw CSV payload over whichever transport the source
    /// selects.
    pub fn fetch(&self) -> Result<String, CheckError> {
        #[cfg(unix)]
        if is_unix_socket(&self.source) {
            return fetch_socket(&self.source);
        }

        self.fetch_http()
    }

    fn fetch_http(&self) -> Result<String, CheckError> {
        let url = self.url();
        debug!(%url, "requesting stats page");

        let mut request = ureq::get(&url)
            .config()
            .http_status_as_error(false)
            .build()
            .header(
                "User-Agent",
                concat!("check-haproxy/", env!("CARGO_PKG_VERSION")),
            );
        if let Some(username) = &self.username {
            let credentials =
                general_purpose::STANDARD.encode(format!("{}:{}", username, self.password));
            request = request.header("Authorization", &format!("Basic {credentials}"));
        }

        let mut response = request.call().map_err(|source| CheckError::Http {
            url: url.clone(),
            source: Box::new(source),
        })?;

        if response.status() != 200 {
            return Err(CheckError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let payload = response
            .body_mut()
            .read_to_string()
            .map_err(|source| CheckError::Http {
                url,
                source: Box::new(source),
            })?;
        debug!(bytes = payload.len(), "stats payload received");
        Ok(payload)
    }
}

/// A source that names an existing UNIX domain socket selects the socket
/// transport; anything else is treated as a hostname.
#[cfg(unix)]
fn is_unix_socket(source: &str) -> bool {
    use std::os::unix::fs::FileTypeExt;

    std::fs::metadata(source)
        .map(|meta| meta.file_type().is_socket())
        .unwrap_or(false)
}

/// Issue `show stat` on the admin socket and read until HAProxy closes the
/// connection.
#[cfg(unix)]
fn fetch_socket(path: &str) -> Result<String, CheckError> {
    use std::io::{Read, Write};
    use std::os::unix::net::UnixStream;
    use std::path::PathBuf;

    debug!(path, "requesting stats over unix socket");
    let socket_err = |source: std::io::Error| CheckError::Socket {
        path: PathBuf::from(path),
        source,
    };

    let mut stream = UnixStream::connect(path).map_err(socket_err)?;
    stream.write_all(b"show stat\n").map_err(socket_err)?;

    let mut payload = String::new();
    stream.read_to_string(&mut payload).map_err(socket_err)?;
    debug!(bytes = payload.len(), "stats payload received");
    Ok(payload)
}
