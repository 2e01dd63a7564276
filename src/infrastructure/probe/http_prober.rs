//! HTTP(S) prober built on reqwest.

use async_trait::async_trait;
use std::error::Error as _;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

use super::prober::{ProbeOutcome, Prober};
use crate::domain::entities::Snapshot;
use crate::utils::hostname::host_of;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_MAX_REDIRECTS: usize = 5;
pub const DEFAULT_USER_AGENT: &str = concat!("domain-watch/", env!("CARGO_PKG_VERSION"));

/// Settings for [`HttpProber`].
#[derive(Debug, Clone)]
pub struct ProbeOptions {
    /// `https` or `http`.
    pub scheme: String,
    pub timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            scheme: "https".to_string(),
            timeout: DEFAULT_TIMEOUT,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Probes `{scheme}://{domain}/` with a bounded timeout and redirect limit.
///
/// The final host after following redirects becomes the snapshot's
/// `current_domain`. Any HTTP status counts as live; only a failed transport
/// attempt yields an unreachable outcome.
#[derive(Debug, Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    scheme: String,
}

impl HttpProber {
    /// Builds a prober with its own connection pool.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialized.
    pub fn new(options: ProbeOptions) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .connect_timeout(options.timeout)
            .redirect(reqwest::redirect::Policy::limited(options.max_redirects))
            .user_agent(options.user_agent)
            .build()?;

        Ok(Self {
            client,
            scheme: options.scheme,
        })
    }

    fn origin_url(&self, domain: &str) -> Result<Url, url::ParseError> {
        Url::parse(&format!("{}://{}/", self.scheme, domain))
    }
}

#[async_trait]
impl Prober for HttpProber {
    #[instrument(skip(self), fields(domain = %domain))]
    async fn probe(&self, domain: &str) -> ProbeOutcome {
        let origin = match self.origin_url(domain) {
            Ok(url) => url,
            Err(e) => {
                return ProbeOutcome::Unreachable(Snapshot::unreachable(
                    domain,
                    format!("invalid url: {e}"),
                ));
            }
        };

        match self.client.get(origin.clone()).send().await {
            Ok(response) => {
                let final_url = response.url().clone();
                let status = response.status().as_u16();
                let current = current_domain(domain, &origin, &final_url);
                let redirect_url = (final_url != origin).then(|| final_url.to_string());

                debug!(status, current = %current, "Probe answered");
                ProbeOutcome::Reachable(Snapshot::reachable(domain, current, status, redirect_url))
            }
            Err(e) => {
                let message = describe_error(&e);
                debug!(error = %message, "Probe failed");
                ProbeOutcome::Unreachable(Snapshot::unreachable(domain, message))
            }
        }
    }
}

/// Host the probe ended on, in monitored-domain form.
///
/// Staying on the origin's host yields `domain` itself, so a spelled-out
/// default port such as `a.example:443` does not read as a redirect.
fn current_domain(domain: &str, origin: &Url, final_url: &Url) -> String {
    match host_of(final_url) {
        Some(host) if Some(&host) != host_of(origin).as_ref() => host,
        _ => domain.to_string(),
    }
}

/// Classifies a transport error and appends its source chain.
fn describe_error(err: &reqwest::Error) -> String {
    let kind = if err.is_timeout() {
        "timeout"
    } else if err.is_redirect() {
        "too many redirects"
    } else if err.is_connect() {
        "connection failed"
    } else {
        "request failed"
    };

    let mut detail = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !detail.contains(&cause_text) {
            detail.push_str(": ");
            detail.push_str(&cause_text);
        }
        source = cause.source();
    }

    format!("{kind}: {detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ProbeOptions::default();

        assert_eq!(options.scheme, "https");
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.max_redirects, 5);
        assert!(options.user_agent.starts_with("domain-watch/"));
    }

    #[test]
    fn test_origin_url() {
        let prober = HttpProber::new(ProbeOptions::default()).unwrap();

        assert_eq!(
            prober.origin_url("a.example").unwrap().as_str(),
            "https://a.example/"
        );
    }

    #[test]
    fn test_default_port_stays_on_domain() {
        let prober = HttpProber::new(ProbeOptions::default()).unwrap();
        let origin = prober.origin_url("a.example:443").unwrap();
        let final_url = Url::parse("https://a.example/").unwrap();

        assert_eq!(origin, final_url);
        assert_eq!(
            current_domain("a.example:443", &origin, &final_url),
            "a.example:443"
        );
    }

    #[test]
    fn test_other_host_becomes_current() {
        let origin = Url::parse("https://a.example/").unwrap();
        let final_url = Url::parse("https://b.example:443/landing").unwrap();

        assert_eq!(current_domain("a.example", &origin, &final_url), "b.example");
    }

    #[tokio::test]
    async fn test_unparseable_domain_is_unreachable() {
        let prober = HttpProber::new(ProbeOptions::default()).unwrap();

        let outcome = prober.probe("exa mple.com").await;

        assert!(!outcome.is_reachable());
        let snapshot = outcome.into_snapshot();
        assert!(
            snapshot
                .error_message
                .unwrap()
                .starts_with("invalid url")
        );
    }
}
