//! Nested-closure construction of entity trees.
//!
//! ```
//! use xmlarbor::builder::build;
//! use xmlarbor::serial::render;
//! use xmlarbor::Tree;
//!
//! let mut tree = Tree::new();
//! let plano = build(&mut tree, "plano", |s| {
//!     s.entity("curso", |s| {
//!         s.text("Mestrado em Engenharia Informática");
//!     });
//!     s.entity("fuc", |s| {
//!         s.attribute("codigo", "M4310");
//!     });
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     render(&tree, plano),
//!     "<plano>\n\t<curso>Mestrado em Engenharia Informática</curso>\n\t<fuc codigo=\"M4310\"/>\n</plano>"
//! );
//! ```
//!
//! Every call goes through the regular [`Tree`] API, so names and values are
//! validated as usual. The first failure is kept and returned by [`build`];
//! calls made after it do nothing.

use tracing::debug;

use crate::error::XmlError;
use crate::tree::{EntityId, Tree};

/// Construction context for one entity.
pub struct Scope<'t> {
    tree: &'t mut Tree,
    entity: EntityId,
    error: Option<XmlError>,
}

impl Scope<'_> {
    /// The entity this scope appends to.
    #[must_use]
    pub fn id(&self) -> EntityId {
        self.entity
    }

    /// Appends a child entity and fills it in with `f`.
    pub fn entity<F>(&mut self, name: &str, f: F) -> &mut Self
    where
        F: FnOnce(&mut Scope<'_>),
    {
        if self.error.is_some() {
            return self;
        }
        match self.tree.create_entity(name, Some(self.entity)) {
            Ok(child) => {
                let mut scope = Scope {
                    tree: &mut *self.tree,
                    entity: child,
                    error: None,
                };
                f(&mut scope);
                self.error = scope.error;
            }
            Err(err) => self.latch(err),
        }
        self
    }

    /// Appends a text child.
    pub fn text(&mut self, content: &str) -> &mut Self {
        if self.error.is_none() {
            if let Err(err) = self.tree.create_text(content, Some(self.entity)) {
                self.latch(err);
            }
        }
        self
    }

    /// Adds an attribute to this scope's entity.
    pub fn attribute(&mut self, name: &str, value: &str) -> &mut Self {
        if self.error.is_none() {
            if let Err(err) = self.tree.add_attribute(self.entity, name, value) {
                self.latch(err);
            }
        }
        self
    }

    fn latch(&mut self, err: XmlError) {
        debug!(error = %err, entity = self.tree.name(self.entity), "builder stopped");
        self.error = Some(err);
    }
}

/// Creates an unparented entity named `name`, fills it in with `f` and
/// returns it.
///
/// # Errors
///
/// Returns the first error raised while building. Entities created before
/// the failure stay in the arena.
pub fn build<F>(tree: &mut Tree, name: &str, f: F) -> Result<EntityId, XmlError>
where
    F: FnOnce(&mut Scope<'_>),
{
    let root = tree.create_entity(name, None)?;
    let mut scope = Scope {
        tree,
        entity: root,
        error: None,
    };
    f(&mut scope);
    match scope.error {
        Some(err) => Err(err),
        None => Ok(root),
    }
}
