//! Typed document model for CycloneDX and SPDX JSON SBOMs.
//!
//! The model is deliberately partial: it names the fields that format
//! detection, diagnostics and the fixer read or write, and keeps every other
//! key in a flattened `extra` map. Loading and re-serializing a document
//! therefore preserves unrelated content and key order.

mod identifiers;
mod lenient;
mod metadata;
mod sbom;

pub use identifiers::*;
pub use lenient::{Lenient, LenientList, LenientText};
pub use metadata::*;
pub use sbom::*;
