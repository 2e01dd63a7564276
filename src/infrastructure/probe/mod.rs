//! Domain availability probing.
//!
//! Provides a [`Prober`] trait with a reqwest-backed implementation,
//! [`HttpProber`]. Probe results are modeled as a tagged [`ProbeOutcome`].

mod http_prober;
mod prober;

pub use http_prober::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpProber, ProbeOptions,
};
pub use prober::{ProbeOutcome, Prober};

#[cfg(test)]
pub use prober::MockProber;
