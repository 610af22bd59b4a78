//! Core data structures for menupack.
//!
//! This module contains the foundational types used throughout the pipeline:
//! - Repository layout (configured roots, families, exclusions)
//! - Classified repository files
//! - Directive references and normalized targets
//! - Package descriptors and the index document

pub mod classification;
pub mod index;
pub mod layout;
pub mod package;
pub mod reference;
pub mod scan;
pub mod target;

pub use classification::{Classification, RepoFile};
pub use index::{Category, IndexDocument};
pub use layout::{Ownership, RepoLayout};
pub use package::{PackageDescriptor, SourceEntry};
pub use reference::{DirectiveKind, Reference};
pub use scan::{ExportScan, ScannedRef};
pub use target::{Family, FamilyKind, NormalizedTarget};
