//! Named group of CIDR ranges.

use ipnet::IpNet;
use std::fmt;
use std::net::IpAddr;

/// SubnetGroup is a named, non-empty list of CIDR ranges.
///
/// Ranges keep the order they were configured in, and lookups scan them in
/// that order. IPv4 and IPv6 ranges may be mixed within one group.
///
/// # Examples
/// ```
/// use subsearch::registry::SubnetGroup;
///
/// let group = SubnetGroup::new(
///     "office",
///     vec!["10.0.0.0/24".parse().unwrap(), "fc00::/7".parse().unwrap()],
/// )
/// .unwrap();
///
/// assert!(group.contains("10.0.0.42".parse().unwrap()));
/// assert!(!group.contains("8.8.8.8".parse().unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetGroup {
    name: String,
    ranges: Vec<IpNet>,
}

impl SubnetGroup {
    /// Create a group from a name and its ranges.
    ///
    /// Returns `None` if the trimmed name is empty or there are no ranges.
    pub fn new(name: impl Into<String>, ranges: Vec<IpNet>) -> Option<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() || ranges.is_empty() {
            return None;
        }
        Some(Self { name, ranges })
    }

    /// Get the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the ranges in configured order.
    pub fn ranges(&self) -> &[IpNet] {
        &self.ranges
    }

    /// Get the number of ranges in this group.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the group has no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Check if any range in this group contains the address.
    ///
    /// An IPv4 address never matches an IPv6 range and vice versa.
    pub fn contains(&self, ip: IpAddr) -> bool {
        self.ranges.iter().any(|range| range.contains(&ip))
    }
}

impl fmt::Display for SubnetGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ", self.name)?;
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(patterns: &[&str]) -> Vec<IpNet> {
        patterns.iter().map(|p| p.parse().unwrap()).collect()
    }

    #[test]
    fn test_ipv4_cidr_match() {
        let group = SubnetGroup::new("lan", nets(&["192.168.0.0/16", "10.0.0.0/8"])).unwrap();

        assert!(group.contains("192.168.1.1".parse().unwrap()));
        assert!(group.contains("192.168.255.255".parse().unwrap()));
        assert!(group.contains("10.0.0.1".parse().unwrap()));
        assert!(!group.contains("8.8.8.8".parse().unwrap()));
    }

    #[test]
    fn test_ipv6_cidr_match() {
        let group = SubnetGroup::new("v6", nets(&["fc00::/7", "2001:db8::/32"])).unwrap();

        assert!(group.contains("fc00::1".parse().unwrap()));
        assert!(group.contains("fd00::1".parse().unwrap()));
        assert!(group.contains("2001:db8::1".parse().unwrap()));
        assert!(!group.contains("2001:4860::1".parse().unwrap()));
    }

    #[test]
    fn test_families_do_not_cross_match() {
        let group = SubnetGroup::new("any", nets(&["0.0.0.0/0"])).unwrap();

        assert!(group.contains("1.2.3.4".parse().unwrap()));
        assert!(!group.contains("::1".parse().unwrap()));
    }

    #[test]
    fn test_boundaries() {
        let group = SubnetGroup::new("office", nets(&["10.0.0.0/24"])).unwrap();

        assert!(group.contains("10.0.0.0".parse().unwrap()));
        assert!(group.contains("10.0.0.255".parse().unwrap()));
        assert!(!group.contains("10.0.1.0".parse().unwrap()));
        assert!(!group.contains("9.255.255.255".parse().unwrap()));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(SubnetGroup::new("  ", nets(&["10.0.0.0/8"])).is_none());
        assert!(SubnetGroup::new("office", Vec::new()).is_none());
    }

    #[test]
    fn test_display() {
        let group = SubnetGroup::new(" office ", nets(&["10.0.0.0/24", "10.0.1.0/24"])).unwrap();
        assert_eq!(group.name(), "office");
        assert_eq!(group.to_string(), "office: 10.0.0.0/24, 10.0.1.0/24");
    }
}
