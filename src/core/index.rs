//! The index document: an ordered tree of categories and packages.
//!
//! Ordering is a function of names and paths only, so an unchanged tree
//! always serializes to the same bytes.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::package::PackageDescriptor;

/// A named group of packages.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub name: String,
    packages: Vec<PackageDescriptor>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Category {
            name: name.into(),
            packages: Vec::new(),
        }
    }

    /// Packages ordered by name, then by their smallest source path.
    pub fn packages(&self) -> &[PackageDescriptor] {
        &self.packages
    }

    fn insert(&mut self, package: PackageDescriptor) {
        let key = |p: &PackageDescriptor| (p.name.clone(), p.first_source().map(str::to_string));
        let new_key = key(&package);
        let pos = self
            .packages
            .iter()
            .position(|p| key(p) > new_key)
            .unwrap_or(self.packages.len());
        self.packages.insert(pos, package);
    }
}

/// The full package index.
#[derive(Debug, Clone, Serialize)]
pub struct IndexDocument {
    /// Index display name
    pub name: String,

    /// Optional `desc` attribute of the index element
    pub desc: Option<String>,

    categories: BTreeMap<String, Category>,
}

impl IndexDocument {
    pub fn new(name: impl Into<String>) -> Self {
        IndexDocument {
            name: name.into(),
            desc: None,
            categories: BTreeMap::new(),
        }
    }

    pub fn with_desc(mut self, desc: Option<String>) -> Self {
        self.desc = desc;
        self
    }

    /// Add a package to a category, creating the category on first use.
    ///
    /// Empty packages are dropped: every emitted category holds at least one
    /// package and every package at least one source.
    pub fn add_package(&mut self, category: &str, package: PackageDescriptor) {
        if package.is_empty() {
            tracing::debug!("Skipping empty package `{}`", package.name);
            return;
        }
        self.categories
            .entry(category.to_string())
            .or_insert_with(|| Category::new(category))
            .insert(package);
    }

    /// Categories in lexicographic order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    /// Total number of packages across all categories.
    pub fn package_count(&self) -> usize {
        self.categories.values().map(|c| c.packages.len()).sum()
    }
}
