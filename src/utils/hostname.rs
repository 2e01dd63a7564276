//! Hostname validation and normalization.
//!
//! Every domain that enters the monitored set passes through
//! [`normalize_hostname`], so comparisons between the configured seed list,
//! persisted state and hosts observed after redirects are all made on the
//! same canonical form.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

/// A single DNS label: 1-63 chars, alphanumeric with inner hyphens.
static LABEL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([a-z0-9-]{0,61}[a-z0-9])?$").unwrap());

const MAX_HOSTNAME_LEN: usize = 253;

/// Errors that can occur during hostname normalization.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum HostnameError {
    #[error("Hostname is empty")]
    Empty,

    #[error("Hostname is too long ({0} characters, max 253)")]
    TooLong(usize),

    #[error("Invalid hostname label: {0:?}")]
    InvalidLabel(String),

    #[error("Invalid port: {0:?}")]
    InvalidPort(String),
}

/// Normalizes a hostname to its canonical lowercase form.
///
/// # Normalization Rules
///
/// 1. Surrounding whitespace and a single trailing dot are removed
/// 2. Letters are converted to lowercase
/// 3. Each dot-separated label must match `[a-z0-9]` with inner hyphens, 1-63 chars
/// 4. An optional `:port` suffix is accepted and kept as-is
///
/// # Errors
///
/// Returns [`HostnameError`] describing the first rule that failed.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_hostname("Example.COM.").unwrap(), "example.com");
/// assert_eq!(normalize_hostname("localhost:8080").unwrap(), "localhost:8080");
/// assert!(normalize_hostname("bad_host.com").is_err());
/// ```
pub fn normalize_hostname(input: &str) -> Result<String, HostnameError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(HostnameError::Empty);
    }

    let (host, port) = match trimmed.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (trimmed, None),
    };

    let host = host.strip_suffix('.').unwrap_or(host).to_ascii_lowercase();
    if host.is_empty() {
        return Err(HostnameError::Empty);
    }
    if host.len() > MAX_HOSTNAME_LEN {
        return Err(HostnameError::TooLong(host.len()));
    }

    if let Some(label) = host.split('.').find(|label| !LABEL_REGEX.is_match(label)) {
        return Err(HostnameError::InvalidLabel(label.to_string()));
    }

    match port {
        Some(port) => {
            let parsed: u16 = port
                .parse()
                .map_err(|_| HostnameError::InvalidPort(port.to_string()))?;
            if parsed == 0 {
                return Err(HostnameError::InvalidPort(port.to_string()));
            }
            Ok(format!("{host}:{parsed}"))
        }
        None => Ok(host),
    }
}

/// Returns `true` if the input is a valid hostname.
pub fn is_valid_hostname(input: &str) -> bool {
    normalize_hostname(input).is_ok()
}

/// Extracts the monitored-domain form of a URL's authority.
///
/// The port is kept only when the URL carries a non-default one, so
/// `https://example.com:443/` yields `example.com` while
/// `http://127.0.0.1:8080/` yields `127.0.0.1:8080`.
pub fn host_of(url: &Url) -> Option<String> {
    let host = url.host_str()?.trim_end_matches('.').to_ascii_lowercase();
    match url.port() {
        Some(port) => Some(format!("{host}:{port}")),
        None => Some(host),
    }
}

/// Splits a comma- or whitespace-separated domain list and normalizes each entry.
///
/// # Errors
///
/// Returns the offending entry together with its [`HostnameError`].
pub fn parse_domain_list(input: &str) -> Result<Vec<String>, (String, HostnameError)> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|entry| !entry.is_empty())
        .map(|entry| normalize_hostname(entry).map_err(|e| (entry.to_string(), e)))
        .collect()
}
