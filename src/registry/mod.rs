//! Subnet registry: named groups of CIDR ranges parsed from configuration text.

mod group;

pub use group::SubnetGroup;

use ahash::AHashMap;
use ipnet::IpNet;
use std::net::{IpAddr, Ipv6Addr};

use crate::error::Diagnostic;

/// Separator between configuration entries.
pub const ENTRY_SEPARATOR: char = ',';

/// Separator between a group name and its CIDR list.
pub const NAME_SEPARATOR: char = ':';

/// Separator between CIDRs within one entry.
pub const CIDR_SEPARATOR: char = ';';

/// Registry is the immutable set of configured subnet groups.
///
/// Groups are kept in configuration order, which is also the order used
/// when classifying an address without a group filter: the first group
/// that contains the address wins, even if later groups contain it too.
///
/// The registry has no interior mutability and is `Send + Sync`, so one
/// instance can be shared by reference across classification workers.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    /// Groups in configuration order
    groups: Vec<SubnetGroup>,
    /// Group name to position in `groups`
    index: AHashMap<String, usize>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse configuration text of the form
    /// `name:cidr1;cidr2;...,name2:cidr3;...`.
    ///
    /// Parsing never fails. Malformed entries and CIDRs are dropped and
    /// reported in the returned diagnostics, each of which is also logged.
    ///
    /// # Examples
    /// ```
    /// use subsearch::Registry;
    ///
    /// let (registry, diagnostics) =
    ///     Registry::parse("office:10.0.0.0/24;10.0.1.0/24,lab:192.168.50.0/24");
    /// assert_eq!(registry.len(), 2);
    /// assert!(diagnostics.is_empty());
    /// ```
    pub fn parse(text: &str) -> (Self, Vec<Diagnostic>) {
        let mut registry = Self::new();
        let mut diagnostics = Vec::new();

        for entry in text.split(ENTRY_SEPARATOR) {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            if let Some(group) = parse_entry(entry, &mut diagnostics) {
                registry.insert(group, &mut diagnostics);
            }
        }

        for diagnostic in &diagnostics {
            log::warn!("{}", diagnostic);
        }
        log::debug!(
            "Parsed {} subnet group(s) with {} diagnostic(s)",
            registry.len(),
            diagnostics.len()
        );

        (registry, diagnostics)
    }

    /// Add a group. A repeated name replaces the earlier ranges but keeps
    /// the group's original position.
    fn insert(&mut self, group: SubnetGroup, diagnostics: &mut Vec<Diagnostic>) {
        match self.index.get(group.name()) {
            Some(&i) => {
                diagnostics.push(Diagnostic::DuplicateGroup(group.name().to_string()));
                self.groups[i] = group;
            }
            None => {
                self.index.insert(group.name().to_string(), self.groups.len());
                self.groups.push(group);
            }
        }
    }

    /// Get the number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Check if no groups are configured.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Get a group by name.
    pub fn get(&self, name: &str) -> Option<&SubnetGroup> {
        self.index.get(name).map(|&i| &self.groups[i])
    }

    /// Check if a group with this name exists.
    pub fn contains_group(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterate groups in configuration order.
    pub fn groups(&self) -> impl Iterator<Item = &SubnetGroup> {
        self.groups.iter()
    }

    /// Iterate group names in configuration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(SubnetGroup::name)
    }

    /// Find the group containing an address.
    ///
    /// With `group = Some(name)` only that group is searched, and `None` is
    /// returned if it doesn't exist. With `group = None` all groups are
    /// searched in configuration order and the first match is returned.
    pub fn lookup(&self, ip: IpAddr, group: Option<&str>) -> Option<&str> {
        match group {
            Some(name) => self
                .get(name)
                .filter(|g| g.contains(ip))
                .map(SubnetGroup::name),
            None => self
                .groups
                .iter()
                .find(|g| g.contains(ip))
                .map(SubnetGroup::name),
        }
    }
}

/// Parse one non-empty `name:cidr1;cidr2;...` entry.
fn parse_entry(entry: &str, diagnostics: &mut Vec<Diagnostic>) -> Option<SubnetGroup> {
    let Some((name, cidrs)) = entry.split_once(NAME_SEPARATOR) else {
        diagnostics.push(Diagnostic::MissingDelimiter(entry.to_string()));
        return None;
    };

    let name = name.trim();
    if name.is_empty() {
        diagnostics.push(Diagnostic::EmptyName(entry.to_string()));
        return None;
    }

    let cidrs = cidrs.trim().trim_end_matches(CIDR_SEPARATOR);
    let slots: Vec<&str> = cidrs
        .split(CIDR_SEPARATOR)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    // IPv6 ranges legitimately contain ':'; a ':' in a slot whose address
    // part is not IPv6 means the entry has a second name separator.
    if slots.iter().any(|s| is_extra_delimiter(s)) {
        diagnostics.push(Diagnostic::ExtraDelimiter(entry.to_string()));
        return None;
    }

    let mut ranges = Vec::with_capacity(slots.len());
    for slot in slots {
        match parse_cidr(slot) {
            Some(net) => ranges.push(net),
            None => diagnostics.push(Diagnostic::InvalidCidr {
                group: name.to_string(),
                cidr: slot.to_string(),
            }),
        }
    }

    let group = SubnetGroup::new(name, ranges);
    if group.is_none() {
        diagnostics.push(Diagnostic::EmptyGroup(name.to_string()));
    }
    group
}

fn is_extra_delimiter(slot: &str) -> bool {
    if !slot.contains(NAME_SEPARATOR) {
        return false;
    }
    let address = slot.split_once('/').map_or(slot, |(address, _)| address);
    address.trim().parse::<Ipv6Addr>().is_err()
}

/// Parse a CIDR in `address/prefix` notation.
///
/// The address must be the network address: `10.0.0.5/24` has host bits
/// set and is rejected. A bare address without a prefix length is rejected.
fn parse_cidr(pattern: &str) -> Option<IpNet> {
    pattern
        .parse::<IpNet>()
        .ok()
        .filter(|net| *net == net.trunc())
}
