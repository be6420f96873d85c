//! # xmlarbor
//!
//! An in-memory tree of named entities, text nodes and attributes, with
//! validated mutation, document-wide bulk edits, slash-separated path
//! queries, a canonical tab-indented text form, and declarative mapping of
//! Rust values onto entities.
//!
//! ## Quick Start
//!
//! ```
//! use xmlarbor::{Document, Tree};
//!
//! let mut tree = Tree::new();
//! let plano = tree.create_entity("plano", None).unwrap();
//! let fuc = tree.create_entity("fuc", Some(plano)).unwrap();
//! let nome = tree.create_entity("nome", Some(fuc)).unwrap();
//! tree.create_text("Programação Avançada", Some(nome)).unwrap();
//!
//! let mut doc = Document::new("MyDocument", tree, plano).unwrap();
//! doc.add_attribute("fuc", "codigo", "M4310").unwrap();
//!
//! assert_eq!(doc.xpath("fuc/nome"), "<nome>Programação Avançada</nome>\n");
//! assert_eq!(
//!     doc.to_text(),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
//!      <plano>\n\
//!      \t<fuc codigo=\"M4310\">\n\
//!      \t\t<nome>Programação Avançada</nome>\n\
//!      \t</fuc>\n\
//!      </plano>"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`tree`]: the arena, entities, text nodes and attributes
//! - [`document`]: documents and bulk operations by entity name
//! - [`xpath`]: path queries
//! - [`serial`]: canonical rendering
//! - [`mapper`]: object-to-entity mapping
//! - [`builder`]: nested-closure construction
//! - [`validation`]: name, value, version and encoding rules

pub mod builder;
pub mod document;
pub mod error;
pub mod mapper;
pub mod serial;
pub mod tree;
pub mod validation;
pub mod xpath;

// Re-export primary types at the crate root for convenience.
pub use document::{Declaration, Document};
pub use error::XmlError;
pub use tree::{Attribute, EntityId, NodeId, NodeKind, Tree};
