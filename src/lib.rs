//! subsearch - classify IP addresses against named groups of CIDR subnets.
//!
//! This crate answers, for a batch of IP addresses, which configured subnet
//! group (if any) each address belongs to.
//!
//! # Features
//!
//! - **Named subnet groups**: `name:cidr1;cidr2,...` configuration text
//! - **IPv4 and IPv6**: both families, mixed freely within a group
//! - **Concurrent classification**: bounded worker pool, results in input order
//! - **Lenient parsing**: bad entries and bad addresses are reported, never fatal
//! - **Collaborators**: IP file input, JSON/CSV output, email and Telegram
//!   notifications, IP geolocation
//!
//! # Quick Start
//!
//! ```
//! use subsearch::{build_registry, classify};
//!
//! let (registry, diagnostics) =
//!     build_registry("office:10.0.0.0/24;10.0.1.0/24,lab:192.168.50.0/24");
//! assert!(diagnostics.is_empty());
//!
//! let results = classify(&registry, &["10.0.0.5", "192.168.50.9", "8.8.8.8"], None);
//! assert_eq!(results[0].group(), Some("office"));
//! assert_eq!(results[1].group(), Some("lab"));
//! assert_eq!(results[2].group(), None);
//! ```
//!
//! # Matching Priority
//!
//! Without a group filter, groups are searched in configuration order and
//! the first group containing the address is reported. An address inside
//! ranges of several groups is attributed to the earliest one only.
//! With a filter, only the named group is searched; an unknown name never
//! matches.

mod error;

pub mod config;
pub mod engine;
pub mod geo;
pub mod input;
pub mod notify;
pub mod output;
pub mod registry;
pub mod report;

// Re-export core types
pub use engine::{classify, Classification, Classifier, MAX_WORKERS};
pub use error::{Diagnostic, Error, Result};
pub use registry::{Registry, SubnetGroup};

// Re-export collaborator entry points
pub use config::Settings;
pub use output::OutputFormat;
pub use report::Summary;

/// Parse subnet configuration text into a registry.
///
/// Equivalent to [`Registry::parse`].
pub fn build_registry(config_text: &str) -> (Registry, Vec<Diagnostic>) {
    Registry::parse(config_text)
}
