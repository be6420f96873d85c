//! Node type definitions.
//!
//! The `NodeKind` enum carries the payload of the two node kinds in an
//! entity tree. Navigation links (parent, children, siblings) are stored in
//! `NodeData`, not here.

use super::Attribute;

/// The kind of a node and its associated data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// A container node, e.g. `<fuc codigo="M4310">`.
    Entity {
        /// The entity name.
        name: String,
        /// Attributes in insertion order; names are unique.
        attributes: Vec<Attribute>,
    },

    /// A leaf carrying character data. Its content doubles as its name.
    Text {
        /// The text content, rendered verbatim.
        content: String,
    },
}

impl NodeKind {
    /// Returns the node's name: the entity name, or the text content.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Entity { name, .. } => name,
            Self::Text { content } => content,
        }
    }

    /// Returns `true` for entity nodes.
    #[must_use]
    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity { .. })
    }

    /// Returns `true` for text nodes.
    #[must_use]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text { .. })
    }
}
