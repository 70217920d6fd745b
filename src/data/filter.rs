//! Include/exclude filters for groups and benchmark names.

/// Record filter. Empty include lists accept everything.
#[derive(Debug, Clone, Default)]
pub struct BenchmarkFilter {
    pub include_groups: Vec<String>,
    pub exclude: Vec<String>,
    pub include: Vec<String>,
}

impl BenchmarkFilter {
    /// Group whitelist, then name blacklist, then name whitelist
    pub fn keeps(&self, group: &str, name: &str) -> bool {
        if !self.include_groups.is_empty() && !self.include_groups.iter().any(|g| g == group) {
            return false;
        }
        if self.exclude.iter().any(|n| n == name) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything() {
        assert!(BenchmarkFilter::default().keeps("TestPush", "sum"));
    }

    #[test]
    fn test_filter_is_intersection_of_all_rules() {
        let filter = BenchmarkFilter {
            include_groups: strings(&["TestPush", "TestPull"]),
            exclude: strings(&["cart"]),
            include: strings(&["sum", "cart"]),
        };

        let groups = ["TestBaseline", "TestPush", "TestPull"];
        let names = ["sum", "cart", "megamorphic"];
        for group in groups {
            for name in names {
                let expected = filter.include_groups.iter().any(|g| g == group)
                    && !filter.exclude.iter().any(|n| n == name)
                    && filter.include.iter().any(|n| n == name);
                assert_eq!(filter.keeps(group, name), expected, "{group}.{name}");
            }
        }
        assert!(filter.keeps("TestPull", "sum"));
        assert!(!filter.keeps("TestPull", "cart"));
    }
}
