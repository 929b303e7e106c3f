use std::collections::BTreeMap;

/// Blueprint name to scheme name, for one project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemeMap {
    entries: BTreeMap<String, String>,
}

impl SchemeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `scheme` tests `blueprint`. A later insert for the same blueprint wins.
    pub fn insert(&mut self, blueprint: impl Into<String>, scheme: impl Into<String>) {
        self.entries.insert(blueprint.into(), scheme.into());
    }

    pub fn get(&self, blueprint: &str) -> Option<&str> {
        self.entries.get(blueprint).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// The scheme to run `target` with.
    ///
    /// Prefers the scheme whose test action names the target. Otherwise any
    /// scheme of the project will do; the lexicographically smallest name is
    /// picked so the choice is stable across runs. `None` when the project has
    /// no test schemes at all.
    pub fn scheme_for(&self, target: &str) -> Option<&str> {
        match self.get(target) {
            Some(scheme) if !scheme.is_empty() => Some(scheme),
            _ => self
                .entries
                .values()
                .map(String::as_str)
                .filter(|scheme| !scheme.is_empty())
                .min(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SchemeMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = SchemeMap::new();
        for (blueprint, scheme) in iter {
            map.insert(blueprint, scheme);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_wins() {
        let map: SchemeMap = [("AppTests", "App"), ("CoreTests", "Core")]
            .into_iter()
            .collect();
        assert_eq!(map.scheme_for("CoreTests"), Some("Core"));
        assert_eq!(map.scheme_for("AppTests"), Some("App"));
    }

    #[test]
    fn test_absent_target_falls_back_to_some_scheme() {
        let map: SchemeMap = [("AppTests", "Zeta"), ("CoreTests", "Alpha")]
            .into_iter()
            .collect();
        let scheme = map.scheme_for("OtherTests").unwrap();
        assert!(map.iter().any(|(_, s)| s == scheme));
        assert_eq!(scheme, "Alpha");
    }

    #[test]
    fn test_empty_entry_falls_back() {
        let map: SchemeMap = [("AppTests", ""), ("CoreTests", "Core")]
            .into_iter()
            .collect();
        assert_eq!(map.scheme_for("AppTests"), Some("Core"));
    }

    #[test]
    fn test_empty_map_has_no_scheme() {
        assert_eq!(SchemeMap::new().scheme_for("AppTests"), None);
    }

    #[test]
    fn test_later_insert_wins() {
        let mut map = SchemeMap::new();
        map.insert("AppTests", "Shared");
        map.insert("AppTests", "Mine");
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("AppTests"), Some("Mine"));
    }
}
