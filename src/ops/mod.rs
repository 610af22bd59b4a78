//! High-level operations.
//!
//! This module contains the implementation of menupack commands.

pub mod build_index;
pub mod classify;
pub mod generate_shims;
pub mod icons;
pub mod layout_check;
pub mod references;
pub mod scan;

pub use build_index::{build_index, BuildOptions, BuildSummary};
pub use classify::{classify_assets, ClassifiedFile};
pub use generate_shims::{generate_shims, ShimOptions, ShimSummary};
pub use icons::{generate_icon_placeholders, IconOptions, IconSummary};
pub use layout_check::{check_layout, format_report, LayoutReport, DEFAULT_REQUIRED_ROOTS};
pub use references::{list_references, RefStatus, ReferenceRow};
pub use scan::{scan_exports, scan_icon_exports};
