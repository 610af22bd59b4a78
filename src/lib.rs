//! menupack - deterministic package index builder for toolbar suites
//!
//! This crate scans a repository of toolbar/menu export files and the
//! scripts and resources they reference, writes compatibility shims for
//! references that do not resolve, and emits a package index plus an audit
//! report.

pub mod classify;
pub mod core;
pub mod discovery;
pub mod extract;
pub mod index;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for menupack unit tests.
///
/// Only available when compiling tests. Provides a builder for temporary
/// repository trees.
#[cfg(test)]
pub mod test_support;

pub use core::{IndexDocument, PackageDescriptor, RepoLayout};
pub use discovery::{discover, Snapshot};
pub use resolver::{ResolveContext, ShimMode};
