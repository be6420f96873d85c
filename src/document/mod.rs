//! Documents: a named root entity plus format metadata.
//!
//! A [`Document`] owns the [`Tree`] arena and references its root entity.
//! It is the unit on which bulk operations (every entity with a given name)
//! and path queries run.
//!
//! Bulk operations are fail-fast but not transactional: an empty match set
//! fails with [`XmlError::NotFound`] before anything changes, and syntactic
//! checks on the new names and values run before the first match is
//! touched. A failure that depends on a particular match (for example a
//! duplicate attribute on the second match) is returned immediately and
//! earlier matches stay modified.
//!
//! ```
//! use xmlarbor::{Document, Tree};
//!
//! let mut tree = Tree::new();
//! let fuc = tree.create_entity("fuc", None).unwrap();
//! tree.create_entity("avaliacao", Some(fuc)).unwrap();
//!
//! let mut doc = Document::new("MyDocument", tree, fuc).unwrap();
//! doc.add_attribute("avaliacao", "name", "X").unwrap();
//! assert_eq!(
//!     doc.to_text(),
//!     "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<fuc>\n\t<avaliacao name=\"X\"/>\n</fuc>"
//! );
//! ```

use std::fmt;

use tracing::debug;

use crate::error::XmlError;
use crate::serial;
use crate::tree::{EntityId, Tree};
use crate::validation::{validate_encoding, validate_name, validate_value, validate_version};
use crate::xpath;

/// The version and encoding written in a document's XML declaration.
///
/// # Examples
///
/// ```
/// use xmlarbor::document::Declaration;
///
/// let decl = Declaration::default().version("1.1").encoding("UTF-16");
/// assert_eq!(decl.version, "1.1");
/// assert!(decl.validate().is_ok());
/// assert!(Declaration::default().encoding("latin1").validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// `major.minor` version. Defaults to `"1.0"`.
    pub version: String,
    /// One of [`ENCODINGS`](crate::validation::ENCODINGS). Defaults to `"UTF-8"`.
    pub encoding: String,
}

impl Default for Declaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: "UTF-8".to_string(),
        }
    }
}

impl Declaration {
    /// Sets the version.
    #[must_use]
    pub fn version(mut self, version: &str) -> Self {
        self.version = version.to_string();
        self
    }

    /// Sets the encoding label.
    #[must_use]
    pub fn encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    /// Checks both fields.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Configuration`] for a malformed version or an
    /// unrecognized encoding.
    pub fn validate(&self) -> Result<(), XmlError> {
        validate_version(&self.version)?;
        validate_encoding(&self.encoding)
    }
}

/// A named document over an entity tree.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    tree: Tree,
    root: EntityId,
    declaration: Declaration,
}

impl Document {
    /// Creates a document with the default declaration (`1.0`, `UTF-8`).
    ///
    /// # Errors
    ///
    /// - [`XmlError::InvalidName`] if `name` is rejected.
    /// - [`XmlError::ForeignHandle`] if `root` is not an entity of `tree`.
    pub fn new(name: &str, tree: Tree, root: EntityId) -> Result<Self, XmlError> {
        Self::with_declaration(name, tree, root, Declaration::default())
    }

    /// Creates a document with an explicit declaration.
    ///
    /// # Errors
    ///
    /// - [`XmlError::InvalidName`] if `name` is rejected.
    /// - [`XmlError::ForeignHandle`] if `root` is not an entity of `tree`.
    /// - [`XmlError::Configuration`] if the declaration is invalid.
    pub fn with_declaration(
        name: &str,
        tree: Tree,
        root: EntityId,
        declaration: Declaration,
    ) -> Result<Self, XmlError> {
        validate_name(name)?;
        if !tree.contains_entity(root) {
            return Err(XmlError::ForeignHandle { handle: root.node() });
        }
        declaration.validate()?;
        Ok(Self {
            name: name.to_string(),
            tree,
            root,
            declaration,
        })
    }

    /// Returns the document name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the root entity.
    #[must_use]
    pub fn root(&self) -> EntityId {
        self.root
    }

    /// Returns the declared version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.declaration.version
    }

    /// Returns the declared encoding.
    #[must_use]
    pub fn encoding(&self) -> &str {
        &self.declaration.encoding
    }

    /// Returns the underlying tree.
    #[must_use]
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Returns the underlying tree for single-node edits.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Consumes the document, returning its tree.
    #[must_use]
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Resolves every entity named `entity_name` under the root, or fails if
    /// there is none.
    fn targets(&self, entity_name: &str) -> Result<Vec<EntityId>, XmlError> {
        let targets = self.tree.find_entities(self.root, entity_name);
        if targets.is_empty() {
            debug!(entity = entity_name, "no matching entity");
            return Err(XmlError::entity_not_found(entity_name));
        }
        Ok(targets)
    }

    /// Adds an attribute to every entity named `entity_name`.
    ///
    /// # Errors
    ///
    /// - [`XmlError::NotFound`] if no entity has that name.
    /// - [`XmlError::InvalidName`] if the attribute name or value is rejected.
    /// - [`XmlError::DuplicateAttribute`] from the first match that already
    ///   carries the attribute.
    pub fn add_attribute(
        &mut self,
        entity_name: &str,
        attribute_name: &str,
        value: &str,
    ) -> Result<(), XmlError> {
        let targets = self.targets(entity_name)?;
        validate_name(attribute_name)?;
        validate_value(value)?;
        debug!(
            entity = entity_name,
            attribute = attribute_name,
            matches = targets.len(),
            "adding attribute"
        );
        for entity in targets {
            self.tree.add_attribute(entity, attribute_name, value)?;
        }
        Ok(())
    }

    /// Renames every entity named `old_name`.
    ///
    /// # Errors
    ///
    /// - [`XmlError::NotFound`] if no entity has that name.
    /// - [`XmlError::InvalidName`] if `new_name` is rejected.
    pub fn rename_entity(&mut self, old_name: &str, new_name: &str) -> Result<(), XmlError> {
        let targets = self.targets(old_name)?;
        validate_name(new_name)?;
        debug!(
            entity = old_name,
            new_name,
            matches = targets.len(),
            "renaming entity"
        );
        for entity in targets {
            self.tree.rename(entity, new_name)?;
        }
        Ok(())
    }

    /// Renames an attribute on every entity named `entity_name`.
    ///
    /// # Errors
    ///
    /// - [`XmlError::NotFound`] if no entity has that name, or from the
    ///   first match lacking the attribute.
    /// - [`XmlError::SameName`] if the names are equal.
    /// - [`XmlError::InvalidName`] if either name is rejected.
    /// - [`XmlError::DuplicateAttribute`] if a match already uses `new_name`.
    pub fn rename_attribute(
        &mut self,
        entity_name: &str,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), XmlError> {
        let targets = self.targets(entity_name)?;
        if old_name == new_name {
            return Err(XmlError::SameName {
                name: old_name.to_string(),
            });
        }
        validate_name(old_name)?;
        validate_name(new_name)?;
        debug!(
            entity = entity_name,
            attribute = old_name,
            new_name,
            matches = targets.len(),
            "renaming attribute"
        );
        for entity in targets {
            self.tree.rename_attribute(entity, old_name, new_name)?;
        }
        Ok(())
    }

    /// Removes every entity named `entity_name` from the tree.
    ///
    /// Removing the root entity dismantles the whole tree but keeps the
    /// document's root handle.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::NotFound`] if no entity has that name.
    pub fn remove_entity(&mut self, entity_name: &str) -> Result<(), XmlError> {
        let targets = self.targets(entity_name)?;
        debug!(entity = entity_name, matches = targets.len(), "removing entity");
        for entity in targets {
            self.tree.remove(entity);
        }
        Ok(())
    }

    /// Removes an attribute from every entity named `entity_name`.
    ///
    /// # Errors
    ///
    /// - [`XmlError::NotFound`] if no entity has that name, or from the
    ///   first match lacking the attribute.
    /// - [`XmlError::InvalidName`] if the attribute name is rejected.
    pub fn remove_attribute(
        &mut self,
        entity_name: &str,
        attribute_name: &str,
    ) -> Result<(), XmlError> {
        let targets = self.targets(entity_name)?;
        validate_name(attribute_name)?;
        debug!(
            entity = entity_name,
            attribute = attribute_name,
            matches = targets.len(),
            "removing attribute"
        );
        for entity in targets {
            self.tree.remove_attribute(entity, attribute_name)?;
        }
        Ok(())
    }

    /// Runs a path query from the root and renders every match, each
    /// followed by a newline. No match yields an empty string.
    ///
    /// See [`xpath::evaluate`] for the path syntax.
    #[must_use]
    pub fn xpath(&self, path: &str) -> String {
        xpath::evaluate(&self.tree, self.root, path)
    }

    /// Renders the document with its XML declaration.
    #[must_use]
    pub fn to_text(&self) -> String {
        serial::render_document(self)
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}
