/// Blocklist policy consumed by the upload validation pipeline
use crate::models::{CustomExtension, FixedExtension};
use crate::utils::extension::{is_valid_extension_name, normalize_extension};
use std::collections::{HashMap, HashSet};

/// Read-only blocklist queries
///
/// Implementations normalize their input, so callers may pass raw tokens.
pub trait BlocklistPolicy: Send + Sync {
    /// Blocked via an enabled fixed entry OR present in the custom catalog
    fn is_extension_blocked(&self, extension: &str) -> bool;

    /// Present in the fixed catalog, regardless of its blocked flag
    fn exists_as_fixed(&self, extension: &str) -> bool;

    fn exists_as_custom(&self, extension: &str) -> bool;

    fn is_valid_extension_name(&self, extension: &str) -> bool {
        is_valid_extension_name(extension)
    }
}

/// Immutable copy of both catalogs taken at a single point in time
///
/// One snapshot backs one upload, so every gate sees the same catalog state.
#[derive(Debug, Clone, Default)]
pub struct BlocklistSnapshot {
    fixed: HashMap<String, bool>,
    custom: HashSet<String>,
}

impl BlocklistSnapshot {
    pub fn new(fixed: &[FixedExtension], custom: &[CustomExtension]) -> Self {
        Self::from_parts(
            fixed
                .iter()
                .map(|e| (e.extension_name.clone(), e.is_blocked)),
            custom.iter().map(|e| e.extension_name.clone()),
        )
    }

    /// Builds a snapshot from `(extension, is_blocked)` pairs and custom names
    pub fn from_parts<F, C>(fixed: F, custom: C) -> Self
    where
        F: IntoIterator<Item = (String, bool)>,
        C: IntoIterator<Item = String>,
    {
        Self {
            fixed: fixed
                .into_iter()
                .map(|(ext, blocked)| (normalize_extension(&ext), blocked))
                .collect(),
            custom: custom
                .into_iter()
                .map(|ext| normalize_extension(&ext))
                .collect(),
        }
    }

    /// Extensions currently enforced, sorted
    pub fn blocked_extensions(&self) -> Vec<String> {
        let mut blocked: Vec<String> = self
            .fixed
            .iter()
            .filter(|&(_, &blocked)| blocked)
            .map(|(ext, _)| ext.clone())
            .chain(self.custom.iter().cloned())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        blocked.sort();
        blocked
    }
}

impl BlocklistPolicy for BlocklistSnapshot {
    fn is_extension_blocked(&self, extension: &str) -> bool {
        let normalized = normalize_extension(extension);
        let fixed_blocked = self.fixed.get(&normalized).copied().unwrap_or(false);
        fixed_blocked || self.custom.contains(&normalized)
    }

    fn exists_as_fixed(&self, extension: &str) -> bool {
        self.fixed.contains_key(&normalize_extension(extension))
    }

    fn exists_as_custom(&self, extension: &str) -> bool {
        self.custom.contains(&normalize_extension(extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> BlocklistSnapshot {
        BlocklistSnapshot::from_parts(
            [
                ("exe".to_string(), true),
                ("bat".to_string(), false),
                ("js".to_string(), true),
            ],
            ["sh".to_string(), "JS".to_string()],
        )
    }

    #[test]
    fn test_blocked_is_fixed_or_custom() {
        let policy = snapshot();
        assert!(policy.is_extension_blocked("exe"));
        assert!(policy.is_extension_blocked(".EXE"));
        assert!(policy.is_extension_blocked("sh"));
        assert!(policy.is_extension_blocked("js"));
        assert!(!policy.is_extension_blocked("bat"));
        assert!(!policy.is_extension_blocked("pdf"));
    }

    #[test]
    fn test_existence_ignores_blocked_flag() {
        let policy = snapshot();
        assert!(policy.exists_as_fixed("bat"));
        assert!(!policy.exists_as_fixed("sh"));
        assert!(policy.exists_as_custom("sh"));
        assert!(!policy.exists_as_custom("exe"));
    }

    #[test]
    fn test_blocked_extensions_deduplicated() {
        assert_eq!(snapshot().blocked_extensions(), ["exe", "js", "sh"]);
    }

    #[test]
    fn test_default_trait_validation() {
        let policy = BlocklistSnapshot::default();
        assert!(policy.is_valid_extension_name("pdf"));
        assert!(!policy.is_valid_extension_name("p-d-f"));
    }
}
