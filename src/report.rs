//! Result summaries and human-readable logging.

use crate::engine::Classification;
use crate::registry::Registry;

/// Counts over one batch of classification results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
    /// Per-group counts in first-seen order; `None` is the unmatched bucket.
    pub by_group: Vec<(Option<String>, usize)>,
}

impl Summary {
    /// Tally a batch of results.
    pub fn from_results(results: &[Classification]) -> Self {
        let mut summary = Summary {
            total: results.len(),
            ..Default::default()
        };

        for result in results {
            if result.is_match() {
                summary.matched += 1;
            } else {
                summary.unmatched += 1;
            }

            match summary
                .by_group
                .iter()
                .position(|(group, _)| group.as_deref() == result.group())
            {
                Some(i) => summary.by_group[i].1 += 1,
                None => summary.by_group.push((result.group.clone(), 1)),
            }
        }
        summary
    }

    /// Log the summary at info level.
    pub fn log(&self) {
        log::info!("Total IPs checked: {}", self.total);
        log::info!("Matched IPs: {}", self.matched);
        log::info!("Unmatched IPs: {}", self.unmatched);
        for (group, count) in &self.by_group {
            log::info!("{}: {}", group.as_deref().unwrap_or("None"), count);
        }
    }
}

/// Log one line per result.
pub fn log_results(results: &[Classification]) {
    for result in results {
        match result.group() {
            Some(group) => log::info!("{} is in the subnet: {}", result.ip, group),
            None => log::info!("{} is not in any configured subnet", result.ip),
        }
    }
}

/// Describe each configured group as `name: cidr1, cidr2`.
pub fn describe_registry(registry: &Registry) -> Vec<String> {
    registry.groups().map(ToString::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let results = vec![
            Classification::new("10.0.0.1", Some("office".to_string())),
            Classification::new("8.8.8.8", None),
            Classification::new("10.0.0.2", Some("office".to_string())),
            Classification::new("192.168.50.1", Some("lab".to_string())),
            Classification::new("bogus", None),
        ];

        let summary = Summary::from_results(&results);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.matched, 3);
        assert_eq!(summary.unmatched, 2);
        assert_eq!(
            summary.by_group,
            vec![
                (Some("office".to_string()), 2),
                (None, 2),
                (Some("lab".to_string()), 1),
            ]
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(Summary::from_results(&[]), Summary::default());
    }

    #[test]
    fn test_describe_registry() {
        let (registry, _) = Registry::parse("office:10.0.0.0/24;10.0.1.0/24,lab:192.168.50.0/24");
        assert_eq!(
            describe_registry(&registry),
            vec![
                "office: 10.0.0.0/24, 10.0.1.0/24".to_string(),
                "lab: 192.168.50.0/24".to_string(),
            ]
        );
    }
}
