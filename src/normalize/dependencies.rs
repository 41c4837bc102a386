//! Placeholder dependency graph for documents that have none.

use crate::model::{Component, DependencyEdge, LenientList, SbomDocument};
use serde_json::Value;

/// Adds a single root edge to documents without a `dependencies` array.
///
/// The edge says the root depends on every component that has a bom-ref.
/// It is a flat star, not a reconstruction of the real dependency tree; it
/// only gives Dependency-Track a graph to attach the components to.
#[derive(Debug, Clone, Copy, Default)]
pub struct DependencyGraphSynthesizer;

impl DependencyGraphSynthesizer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Synthesize the root edge; returns whether the document was changed.
    ///
    /// Runs only when the `dependencies` key is absent and `components` is
    /// present. Any existing value (an empty array, even `null`) is left alone.
    pub fn synthesize(&self, document: &mut SbomDocument, root_ref: &str) -> bool {
        if document.dependencies.is_some() {
            return false;
        }
        let Some(components) = document.components.as_ref() else {
            return false;
        };

        let depends_on: Vec<String> = components
            .entries()
            .filter_map(Component::bom_ref)
            .map(str::to_string)
            .collect();
        tracing::debug!("synthesized root edge {root_ref} -> {} components", depends_on.len());

        let edge = DependencyEdge::new(root_ref, depends_on);
        document.dependencies = Some(Value::Array(vec![edge.into()]));
        true
    }
}
