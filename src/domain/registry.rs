//! The self-extending set of monitored domains.

use std::collections::{BTreeMap, HashSet};

use crate::utils::hostname::normalize_hostname;

/// Mapping from an original domain to the host it was last seen redirecting to.
pub type AliasMap = BTreeMap<String, String>;

/// Owns the ordered monitored set and the alias mapping.
///
/// The monitored set starts from the seed list and only grows through
/// [`DomainRegistry::add`]; the alias map records every redirect that grew
/// it. Insertion order of domains is preserved and no domain appears twice.
#[derive(Debug, Clone, Default)]
pub struct DomainRegistry {
    domains: Vec<String>,
    index: HashSet<String>,
    aliases: AliasMap,
}

impl DomainRegistry {
    /// Creates a registry from the seed list.
    ///
    /// Entries are normalized; invalid and duplicate entries are dropped.
    pub fn new<I, S>(seed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for entry in seed {
            match normalize_hostname(entry.as_ref()) {
                Ok(domain) => {
                    registry.push(domain);
                }
                Err(e) => {
                    tracing::warn!(entry = entry.as_ref(), error = %e, "Ignoring invalid seed domain");
                }
            }
        }
        registry
    }

    /// Replays a persisted alias map on top of the seed set.
    ///
    /// For each `original -> current` entry the original is appended if it
    /// is missing, then the current host is added. Returns the number of
    /// domains appended.
    pub fn restore(&mut self, aliases: &AliasMap) -> usize {
        let before = self.domains.len();
        for (original, current) in aliases {
            let (Ok(original), Ok(current)) =
                (normalize_hostname(original), normalize_hostname(current))
            else {
                tracing::warn!(%original, %current, "Skipping invalid persisted alias");
                continue;
            };

            self.push(original.clone());
            if !self.add(&current, &original) {
                self.aliases.insert(original, current);
            }
        }
        self.domains.len() - before
    }

    /// Records a redirect from `original` to `new_domain`.
    ///
    /// Returns `true` and appends `new_domain` to the monitored set only if it
    /// is not already monitored; the alias `original -> new_domain` is stored
    /// at the same time. Otherwise this is a no-op returning `false`.
    ///
    /// `original` must be a monitored domain; the call is ignored otherwise so
    /// every alias key has been a member of the set.
    pub fn add(&mut self, new_domain: &str, original: &str) -> bool {
        if self.contains(new_domain) || !self.contains(original) {
            return false;
        }

        self.push(new_domain.to_string());
        self.aliases
            .insert(original.to_string(), new_domain.to_string());
        true
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.index.contains(domain)
    }

    /// Monitored domains in insertion order.
    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    pub fn aliases(&self) -> &AliasMap {
        &self.aliases
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }

    fn push(&mut self, domain: String) -> bool {
        if !self.index.insert(domain.clone()) {
            return false;
        }
        self.domains.push(domain);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_preserves_order_and_dedups() {
        let registry = DomainRegistry::new(["b.example", "a.example", "B.example"]);

        assert_eq!(registry.domains(), ["b.example", "a.example"]);
        assert!(registry.aliases().is_empty());
    }

    #[test]
    fn test_new_skips_invalid_seed() {
        let registry = DomainRegistry::new(["a.example", "not valid", ""]);

        assert_eq!(registry.domains(), ["a.example"]);
    }

    #[test]
    fn test_add_new_domain() {
        let mut registry = DomainRegistry::new(["a.example"]);

        assert!(registry.add("b.example", "a.example"));
        assert_eq!(registry.domains(), ["a.example", "b.example"]);
        assert_eq!(
            registry.aliases().get("a.example").map(String::as_str),
            Some("b.example")
        );
    }

    #[test]
    fn test_add_twice_mutates_once() {
        let mut registry = DomainRegistry::new(["a.example"]);

        assert!(registry.add("b.example", "a.example"));
        let after_first = registry.clone();

        assert!(!registry.add("b.example", "a.example"));
        assert_eq!(registry.domains(), after_first.domains());
        assert_eq!(registry.aliases(), after_first.aliases());
    }

    #[test]
    fn test_add_known_domain_is_noop() {
        let mut registry = DomainRegistry::new(["a.example", "b.example"]);

        assert!(!registry.add("b.example", "a.example"));
        assert!(registry.aliases().is_empty());
    }

    #[test]
    fn test_add_requires_monitored_original() {
        let mut registry = DomainRegistry::new(["a.example"]);

        assert!(!registry.add("c.example", "unknown.example"));
        assert_eq!(registry.len(), 1);
        assert!(registry.aliases().is_empty());
    }

    #[test]
    fn test_no_duplicates_after_many_adds() {
        let mut registry = DomainRegistry::new(["a.example"]);
        let pairs = [
            ("b.example", "a.example"),
            ("c.example", "b.example"),
            ("b.example", "c.example"),
            ("a.example", "c.example"),
            ("c.example", "a.example"),
        ];

        for (new_domain, original) in pairs {
            registry.add(new_domain, original);
        }

        let mut seen = HashSet::new();
        assert!(registry.domains().iter().all(|d| seen.insert(d)));
        assert_eq!(registry.domains(), ["a.example", "b.example", "c.example"]);
    }

    #[test]
    fn test_alias_keys_are_members() {
        let mut registry = DomainRegistry::new(["a.example"]);
        registry.add("b.example", "a.example");
        registry.add("c.example", "b.example");
        registry.add("d.example", "missing.example");

        for key in registry.aliases().keys() {
            assert!(registry.contains(key));
        }
    }

    #[test]
    fn test_restore_replays_aliases() {
        let mut registry = DomainRegistry::new(["a.example"]);
        let mut aliases = AliasMap::new();
        aliases.insert("a.example".to_string(), "b.example".to_string());
        aliases.insert("b.example".to_string(), "c.example".to_string());

        let appended = registry.restore(&aliases);

        assert_eq!(appended, 2);
        assert_eq!(registry.domains(), ["a.example", "b.example", "c.example"]);
        assert_eq!(registry.aliases(), &aliases);
    }

    #[test]
    fn test_restore_appends_missing_original() {
        let mut registry = DomainRegistry::new(["a.example"]);
        let mut aliases = AliasMap::new();
        aliases.insert("old.example".to_string(), "new.example".to_string());

        registry.restore(&aliases);

        assert_eq!(
            registry.domains(),
            ["a.example", "old.example", "new.example"]
        );
        assert!(registry.aliases().keys().all(|k| registry.contains(k)));
    }

    #[test]
    fn test_restore_keeps_alias_for_known_target() {
        let mut registry = DomainRegistry::new(["a.example", "b.example"]);
        let mut aliases = AliasMap::new();
        aliases.insert("a.example".to_string(), "b.example".to_string());

        assert_eq!(registry.restore(&aliases), 0);
        assert_eq!(registry.aliases(), &aliases);
    }
}
