//! Error types for tree construction, mutation and mapping.
//!
//! Every fallible operation in the crate returns [`XmlError`]. Failures are
//! synchronous and definite: nothing is retried internally, and a failed
//! single-node operation leaves the node exactly as it was.

use std::fmt;

use crate::tree::NodeId;

/// Whether a rejected string was used as a name or as a value.
///
/// Names (entity and attribute names) and values (attribute values and text
/// content) follow slightly different character rules, so the error reports
/// which rule was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameRole {
    /// An entity or attribute name.
    Name,
    /// An attribute value or text content.
    Value,
}

impl fmt::Display for NameRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Value => write!(f, "value"),
        }
    }
}

/// The kind of thing a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Missing {
    /// No entity with the requested name exists in the searched subtree.
    Entity,
    /// The entity carries no attribute with the requested name.
    Attribute,
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "entity"),
            Self::Attribute => write!(f, "attribute"),
        }
    }
}

/// A rejected piece of document format metadata.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The version is not of the form `major.minor`.
    #[error("invalid version \"{0}\": expected major.minor")]
    Version(String),
    /// The encoding is not one of the recognized labels.
    #[error("invalid encoding \"{0}\": expected one of UTF-8, UTF-16, ISO-8859-1, US-ASCII")]
    Encoding(String),
}

/// The error type for every fallible operation in the crate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XmlError {
    /// A name or value is blank or uses a character outside the allowed set.
    #[error("invalid {role} \"{input}\": use letters, digits, spaces, dots or commas")]
    InvalidName {
        /// Which character rule was applied.
        role: NameRole,
        /// The rejected input.
        input: String,
    },

    /// An attribute with this name already exists on the entity.
    #[error("{name} attribute already exists.")]
    DuplicateAttribute {
        /// The colliding attribute name.
        name: String,
    },

    /// A named entity or attribute is absent.
    #[error("{name} {what} not found.")]
    NotFound {
        /// Whether an entity or an attribute was looked up.
        what: Missing,
        /// The name that was looked up.
        name: String,
    },

    /// A rename was requested to the name the target already has.
    #[error("new name must be different from the old one: {name}")]
    SameName {
        /// The unchanged name.
        name: String,
    },

    /// An entity handle does not address an entity of the tree it was
    /// paired with, typically because it came from another tree.
    #[error("entity handle {handle:?} does not address an entity of this tree")]
    ForeignHandle {
        /// The rejected handle.
        handle: NodeId,
    },

    /// Document format metadata was rejected.
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    /// A value transformer or custom adapter failed while mapping an object.
    #[error("mapping field \"{field}\" failed: {message}")]
    Mapping {
        /// The field (or type, for adapters) being mapped.
        field: String,
        /// What went wrong.
        message: String,
    },
}

impl XmlError {
    pub(crate) fn invalid(role: NameRole, input: &str) -> Self {
        Self::InvalidName {
            role,
            input: input.to_string(),
        }
    }

    pub(crate) fn entity_not_found(name: &str) -> Self {
        Self::NotFound {
            what: Missing::Entity,
            name: name.to_string(),
        }
    }

    pub(crate) fn attribute_not_found(name: &str) -> Self {
        Self::NotFound {
            what: Missing::Attribute,
            name: name.to_string(),
        }
    }

    /// Builds a [`XmlError::Mapping`] error for use in transformers and adapters.
    pub fn mapping(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Mapping {
            field: field.into(),
            message: message.into(),
        }
    }
}
