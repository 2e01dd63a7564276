//! Utility functions shared across layers.
//!
//! - [`hostname`] - Hostname validation, normalization and extraction from URLs

pub mod hostname;
