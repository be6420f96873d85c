//! Slash-separated path queries.
//!
//! A path is a sequence of entity names joined by `/`, for example
//! `fuc/avaliacao/componente`. Matching is exact and case-sensitive; there
//! are no wildcards, axes or predicates.
//!
//! Evaluation starts with every entity under (and including) the context
//! entity whose name equals the first segment. Each later segment replaces
//! every candidate by the entities under (and including) that candidate
//! whose name equals the segment. Candidates are expanded in order and
//! duplicates are kept, so nested entities of the same name can surface a
//! match more than once.
//!
//! Queries never fail: no match at any stage, or an empty segment, gives an
//! empty result.
//!
//! # Quick Start
//!
//! ```
//! use xmlarbor::Tree;
//! use xmlarbor::xpath::evaluate;
//!
//! let mut tree = Tree::new();
//! let plano = tree.create_entity("plano", None).unwrap();
//! let fuc = tree.create_entity("fuc", Some(plano)).unwrap();
//! let avaliacao = tree.create_entity("avaliacao", Some(fuc)).unwrap();
//! tree.create_entity("componente", Some(avaliacao)).unwrap();
//!
//! assert_eq!(evaluate(&tree, plano, "fuc/avaliacao/componente"), "<componente/>\n");
//! assert_eq!(evaluate(&tree, plano, "fuc/missing"), "");
//! ```

use tracing::trace;

use crate::serial;
use crate::tree::{EntityId, Tree};

/// A parsed path query, reusable across trees and context entities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathQuery {
    segments: Vec<String>,
}

impl PathQuery {
    /// Splits `path` into its segments. Parsing never fails.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        Self {
            segments: path.split('/').map(str::to_string).collect(),
        }
    }

    /// Returns the segments in order.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the entities matched from `context`, in evaluation order.
    #[must_use]
    pub fn select(&self, tree: &Tree, context: EntityId) -> Vec<EntityId> {
        let mut candidates = vec![context];
        for segment in &self.segments {
            if segment.is_empty() {
                return Vec::new();
            }
            candidates = candidates
                .into_iter()
                .flat_map(|candidate| tree.find_entities(candidate, segment))
                .collect();
            trace!(segment = %segment, candidates = candidates.len(), "expanded path segment");
            if candidates.is_empty() {
                break;
            }
        }
        candidates
    }

    /// Renders every match with the canonical renderer, each followed by a
    /// newline.
    #[must_use]
    pub fn evaluate(&self, tree: &Tree, context: EntityId) -> String {
        let mut output = String::new();
        for entity in self.select(tree, context) {
            output.push_str(&serial::render(tree, entity));
            output.push('\n');
        }
        output
    }
}

/// Parses `path` and returns the matched entities.
#[must_use]
pub fn select(tree: &Tree, context: EntityId, path: &str) -> Vec<EntityId> {
    PathQuery::parse(path).select(tree, context)
}

/// Parses `path` and renders the matched entities, each followed by a
/// newline.
#[must_use]
pub fn evaluate(tree: &Tree, context: EntityId, path: &str) -> String {
    PathQuery::parse(path).evaluate(tree, context)
}
