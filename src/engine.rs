//! Concurrent classification of IP addresses against a [`Registry`].

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::registry::Registry;

/// Upper bound on concurrent classification workers.
pub const MAX_WORKERS: usize = 10;

/// Outcome of classifying one input address.
///
/// `ip` is the input string exactly as given, including malformed values.
/// `group` is the matching group name, or `None` when the address is not in
/// any searched group or could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Classification {
    pub ip: String,
    pub group: Option<String>,
}

impl Classification {
    /// Create a classification result.
    pub fn new(ip: impl Into<String>, group: Option<String>) -> Self {
        Self {
            ip: ip.into(),
            group,
        }
    }

    /// Get the matched group name, if any.
    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    /// Check if the address matched a group.
    pub fn is_match(&self) -> bool {
        self.group.is_some()
    }
}

/// Number of workers for a batch: `min(max_workers, batch_len)`.
pub fn worker_count(batch_len: usize, max_workers: usize) -> usize {
    batch_len.min(max_workers.max(1))
}

/// Group filter after validation against the registry.
#[derive(Debug, Clone, Copy)]
enum Filter<'f> {
    All,
    Group(&'f str),
    /// Names no configured group; never matches.
    Unknown,
}

/// Classifier runs batches of addresses through a shared registry.
///
/// # Examples
/// ```
/// use subsearch::{Classifier, Registry};
///
/// let (registry, _) = Registry::parse("office:10.0.0.0/24,lab:192.168.50.0/24");
/// let results = Classifier::new(&registry).classify(&["10.0.0.5", "8.8.8.8"], None);
///
/// assert_eq!(results[0].group(), Some("office"));
/// assert_eq!(results[1].group(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'r> {
    registry: &'r Registry,
    max_workers: usize,
}

impl<'r> Classifier<'r> {
    /// Create a classifier with the default worker bound.
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            max_workers: MAX_WORKERS,
        }
    }

    /// Override the worker bound. Values below 1 are treated as 1.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    /// Get the registry this classifier reads from.
    pub fn registry(&self) -> &'r Registry {
        self.registry
    }

    /// Classify every address in `ips`, optionally restricted to one group.
    ///
    /// The result has one entry per input, in input order. Malformed
    /// addresses and unknown group names produce unmatched results and a
    /// logged warning; nothing in a batch is fatal.
    pub fn classify<S>(&self, ips: &[S], group: Option<&str>) -> Vec<Classification>
    where
        S: AsRef<str> + Sync,
    {
        if ips.is_empty() {
            return Vec::new();
        }

        let filter = self.resolve_filter(group);
        let workers = worker_count(ips.len(), self.max_workers);
        log::debug!("Classifying {} address(es) with {} worker(s)", ips.len(), workers);

        // Results are written by input index, never by completion order.
        let mut results = Vec::with_capacity(ips.len());
        match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("subsearch-worker-{}", i))
            .build()
        {
            Ok(pool) => pool.install(|| {
                ips.par_iter()
                    .map(|ip| self.classify_one(ip.as_ref(), filter))
                    .collect_into_vec(&mut results)
            }),
            Err(e) => {
                log::warn!("Failed to start worker pool, classifying serially: {}", e);
                results.extend(ips.iter().map(|ip| self.classify_one(ip.as_ref(), filter)));
            }
        }
        results
    }

    fn resolve_filter<'f>(&self, group: Option<&'f str>) -> Filter<'f> {
        let Some(name) = group else {
            return Filter::All;
        };

        let name = name.trim();
        if name.is_empty() {
            log::warn!("Empty subnet filter given, no address will match");
            return Filter::Unknown;
        }
        if !self.registry.contains_group(name) {
            log::warn!("Subnet '{}' is not configured, no address will match", name);
            return Filter::Unknown;
        }
        Filter::Group(name)
    }

    fn classify_one(&self, input: &str, filter: Filter<'_>) -> Classification {
        let ip = match input.trim().parse::<IpAddr>() {
            Ok(ip) => ip,
            Err(_) => {
                log::warn!("Invalid IP address '{}'", input);
                return Classification::new(input, None);
            }
        };

        let group = match filter {
            Filter::All => self.registry.lookup(ip, None),
            Filter::Group(name) => self.registry.lookup(ip, Some(name)),
            Filter::Unknown => None,
        };
        Classification::new(input, group.map(str::to_string))
    }
}

/// Classify `ips` against `registry` with the default worker bound.
pub fn classify<S>(registry: &Registry, ips: &[S], group: Option<&str>) -> Vec<Classification>
where
    S: AsRef<str> + Sync,
{
    Classifier::new(registry).classify(ips, group)
}
