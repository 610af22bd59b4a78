//! Classifier registry.
//!
//! Construction never fails and does no I/O. Strategies are looked up by
//! the id they report.

use std::collections::BTreeMap;

use crate::classify::extension::{ExtensionClassifier, NullClassifier};
use crate::classify::{AssetClassifier, ClassifyError};

/// Strategy used when none is configured.
pub const DEFAULT_STRATEGY: &str = "extension";

/// Registry of classification strategies.
pub struct ClassifierRegistry {
    strategies: BTreeMap<String, Box<dyn AssetClassifier>>,
}

impl ClassifierRegistry {
    /// Create a registry with all built-in strategies.
    pub fn new() -> Self {
        let mut registry = ClassifierRegistry {
            strategies: BTreeMap::new(),
        };

        registry.register(Box::new(ExtensionClassifier::new()));
        registry.register(Box::new(NullClassifier));

        registry
    }

    /// Register a strategy, replacing any with the same id.
    pub fn register(&mut self, classifier: Box<dyn AssetClassifier>) {
        let id = classifier.id().to_string();
        self.strategies.insert(id, classifier);
    }

    pub fn get(&self, id: &str) -> Option<&dyn AssetClassifier> {
        self.strategies.get(id).map(|c| c.as_ref())
    }

    /// Select a strategy by id, falling back to the default when `id` is `None`.
    pub fn select(&self, id: Option<&str>) -> Result<&dyn AssetClassifier, ClassifyError> {
        let id = id.unwrap_or(DEFAULT_STRATEGY);
        self.get(id).ok_or_else(|| ClassifyError::UnknownStrategy {
            id: id.to_string(),
            available: self.ids().map(str::to_string).collect(),
        })
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.strategies.keys().map(String::as_str)
    }

    pub fn all(&self) -> impl Iterator<Item = &dyn AssetClassifier> + '_ {
        self.strategies.values().map(|c| c.as_ref())
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}
