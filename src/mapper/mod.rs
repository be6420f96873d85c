//! Declarative object-to-tree mapping.
//!
//! A type opts in by implementing [`XmlMapped`]: an optional entity name, a
//! static list of [`Field`] descriptors, and an optional adapter that may
//! rework the finished entity. [`to_entity`] walks the descriptors in order:
//!
//! - attribute fields become attributes of the current entity;
//! - scalar entity fields become a child entity holding one text node;
//! - list entity fields become a child entity with one grandchild per
//!   item, each mapped recursively;
//! - excluded fields, absent values and unreadable values are skipped.
//!
//! Transformer and adapter errors, and validation errors from the tree,
//! abort the mapping.
//!
//! # Examples
//!
//! ```
//! use xmlarbor::mapper::{to_entity, Field, FieldValue, XmlMapped};
//! use xmlarbor::serial::render;
//! use xmlarbor::Tree;
//!
//! struct Course {
//!     code: String,
//!     title: String,
//! }
//!
//! impl XmlMapped for Course {
//!     const ENTITY_NAME: Option<&'static str> = Some("fuc");
//!
//!     fn fields() -> &'static [Field<Self>] {
//!         static FIELDS: [Field<Course>; 2] = [
//!             Field::attribute("code", |c: &Course| Ok(Some(FieldValue::scalar(&c.code))))
//!                 .named("codigo"),
//!             Field::entity("title", |c: &Course| Ok(Some(FieldValue::scalar(&c.title))))
//!                 .named("nome"),
//!         ];
//!         &FIELDS
//!     }
//! }
//!
//! let mut tree = Tree::new();
//! let course = Course { code: "M4310".into(), title: "Redes".into() };
//! let fuc = to_entity(&mut tree, &course).unwrap();
//! assert_eq!(render(&tree, fuc), "<fuc codigo=\"M4310\">\n\t<nome>Redes</nome>\n</fuc>");
//! ```

mod field;

pub use field::{Accessor, Directive, Field, FieldValue, StringTransformer};

use tracing::debug;

use crate::error::XmlError;
use crate::tree::{EntityId, Tree};

/// Post-processing hook run on a freshly mapped entity.
pub type Adapter<T> = fn(&mut Tree, EntityId, &T) -> Result<(), XmlError>;

/// A type that knows how to map itself onto an entity.
pub trait XmlMapped: Sized + 'static {
    /// Entity name override. Defaults to [`XmlMapped::type_name`].
    const ENTITY_NAME: Option<&'static str> = None;

    /// Runs after all fields are written.
    const ADAPTER: Option<Adapter<Self>> = None;

    /// The unqualified type name.
    fn type_name() -> &'static str {
        short_type_name(std::any::type_name::<Self>())
    }

    /// Field descriptors in declaration order.
    fn fields() -> &'static [Field<Self>];
}

/// Object-safe view of an [`XmlMapped`] value, used for list items.
pub trait Mappable {
    /// The declared entity name, if any.
    fn declared_name(&self) -> Option<&'static str>;

    /// Writes this value's fields into `entity` and runs its adapter.
    ///
    /// # Errors
    ///
    /// See [`to_entity`].
    fn write_into(&self, tree: &mut Tree, entity: EntityId) -> Result<(), XmlError>;
}

impl<T: XmlMapped> Mappable for T {
    fn declared_name(&self) -> Option<&'static str> {
        T::ENTITY_NAME
    }

    fn write_into(&self, tree: &mut Tree, entity: EntityId) -> Result<(), XmlError> {
        write_fields(tree, entity, self)
    }
}

/// Maps `obj` to a new unparented entity and returns it.
///
/// # Errors
///
/// - [`XmlError::InvalidName`] if a name or value produced by the mapping
///   is rejected.
/// - [`XmlError::DuplicateAttribute`] if two fields target the same
///   attribute.
/// - Any error returned by a transformer or adapter.
pub fn to_entity<T: XmlMapped>(tree: &mut Tree, obj: &T) -> Result<EntityId, XmlError> {
    let name = T::ENTITY_NAME.unwrap_or_else(T::type_name);
    let entity = tree.create_entity(name, None)?;
    write_fields(tree, entity, obj)?;
    Ok(entity)
}

fn write_fields<T: XmlMapped>(tree: &mut Tree, entity: EntityId, obj: &T) -> Result<(), XmlError> {
    for field in T::fields() {
        let value = match field.read(obj) {
            None => continue,
            Some(Ok(Some(value))) => value,
            Some(Ok(None)) => {
                debug!(field = field.name(), "skipping absent field");
                continue;
            }
            Some(Err(err)) => {
                debug!(field = field.name(), error = %err, "skipping unreadable field");
                continue;
            }
        };

        // The transformer sees every present value. A list's result is
        // discarded, but its errors still abort the mapping.
        let value = match value {
            FieldValue::Scalar(text) => FieldValue::Scalar(field.apply_transform(text)?),
            FieldValue::List(items) => {
                if field.has_transformer() {
                    field.apply_transform(list_label(field.name(), &items))?;
                }
                FieldValue::List(items)
            }
        };

        match (field.directive(), value) {
            (Directive::Excluded, _) => {}
            (Directive::Attribute { .. }, FieldValue::Scalar(text)) => {
                tree.add_attribute(entity, field.target_name(), &text)?;
            }
            (Directive::Attribute { .. }, FieldValue::List(_)) => {
                debug!(field = field.name(), "skipping list field mapped to an attribute");
            }
            (Directive::Entity { .. }, FieldValue::Scalar(text)) => {
                let child = tree.create_entity(field.target_name(), Some(entity))?;
                tree.create_text(&text, Some(child))?;
            }
            (Directive::Entity { .. }, FieldValue::List(items)) => {
                let container = tree.create_entity(field.target_name(), Some(entity))?;
                for item in items {
                    let name = item.declared_name().unwrap_or(field.name());
                    let child = tree.create_entity(name, Some(container))?;
                    item.write_into(tree, child)?;
                }
            }
        }
    }

    if let Some(adapter) = T::ADAPTER {
        adapter(tree, entity, obj)?;
    }
    Ok(())
}

/// String form of a list value: item entity names in brackets, e.g.
/// `[componente, componente]`.
fn list_label(field_name: &str, items: &[&dyn Mappable]) -> String {
    let names: Vec<&str> = items
        .iter()
        .map(|item| item.declared_name().unwrap_or(field_name))
        .collect();
    format!("[{}]", names.join(", "))
}

/// Strips the module path and generic arguments from a type name.
fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}
