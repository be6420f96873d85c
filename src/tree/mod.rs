//! Arena-based entity tree.
//!
//! All nodes live in a contiguous `Vec<NodeData>` owned by a [`Tree`] and are
//! referenced by [`NodeId`], a newtype over `NonZeroU32`. Entity-only
//! operations take an [`EntityId`], which is a `NodeId` known to address an
//! entity, so attribute operations on text nodes cannot be expressed.
//!
//! # Architecture
//!
//! Navigation links (parent, first\_child, last\_child, next\_sibling,
//! prev\_sibling) are arena indices. The parent link is a non-owning
//! back-reference; the parent's child chain is the owning link. Removing an
//! entity unlinks it (and every descendant entity) but never frees the arena
//! slot, so handles held by callers stay valid after removal.
//!
//! ```
//! use xmlarbor::Tree;
//!
//! let mut tree = Tree::new();
//! let plano = tree.create_entity("plano", None).unwrap();
//! let fuc = tree.create_entity("fuc", Some(plano)).unwrap();
//! tree.add_attribute(fuc, "codigo", "M4310").unwrap();
//!
//! assert_eq!(tree.depth(fuc), 2);
//! assert_eq!(tree.path(fuc), "/plano/fuc");
//! assert_eq!(tree.attribute(fuc, "codigo"), Some("M4310"));
//! ```

mod node;

pub use node::NodeKind;

use std::num::NonZeroU32;

use crate::error::XmlError;
use crate::validation::{validate_name, validate_value};

/// A typed index into the tree's node arena.
///
/// `Option<NodeId>` has the same size as `NodeId` (niche optimization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct NodeId(NonZeroU32);

impl NodeId {
    /// Creates a `NodeId` from a raw arena index.
    ///
    /// # Panics
    ///
    /// Panics if `index` is 0.
    #[allow(clippy::expect_used, clippy::cast_possible_truncation)]
    fn from_index(index: usize) -> Self {
        Self(NonZeroU32::new(index as u32).expect("NodeId index must be non-zero"))
    }

    fn as_index(self) -> usize {
        self.0.get() as usize
    }
}

/// A [`NodeId`] that addresses an entity node.
///
/// Only [`Tree::create_entity`] and the tree's own lookups hand these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct EntityId(NodeId);

impl EntityId {
    /// Returns the underlying node handle.
    #[must_use]
    pub fn node(self) -> NodeId {
        self.0
    }
}

impl From<EntityId> for NodeId {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

/// Storage for a single node in the arena.
///
/// Access individual nodes via [`Tree::node`].
#[derive(Debug, Clone)]
pub struct NodeData {
    /// What kind of node this is and its payload.
    pub kind: NodeKind,
    /// Parent entity, if any. Roots and removed nodes have none.
    pub parent: Option<EntityId>,
    /// First child node.
    pub first_child: Option<NodeId>,
    /// Last child node (for O(1) append).
    pub last_child: Option<NodeId>,
    /// Next sibling.
    pub next_sibling: Option<NodeId>,
    /// Previous sibling.
    pub prev_sibling: Option<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// A named string attribute on an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, unique within its entity.
    pub name: String,
    /// The attribute value.
    pub value: String,
}

impl Attribute {
    fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// An arena holding any number of entity trees.
///
/// A tree may hold several roots at once: every entity created without a
/// parent, and every entity detached by [`Tree::remove`], is a root of its
/// own subtree.
#[derive(Debug, Clone)]
pub struct Tree {
    /// The node arena. Index 0 is unused (placeholder for `NonZeroU32`).
    nodes: Vec<NodeData>,
}

impl Tree {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        let mut nodes = Vec::with_capacity(64);
        nodes.push(NodeData::new(NodeKind::Text {
            content: String::new(),
        }));
        Self { nodes }
    }

    // --- Construction ---

    /// Creates an entity, appending it to `parent`'s children when given.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidName`] if `name` fails
    /// [`validate_name`]; nothing is allocated in that case.
    pub fn create_entity(
        &mut self,
        name: &str,
        parent: Option<EntityId>,
    ) -> Result<EntityId, XmlError> {
        validate_name(name)?;
        let id = self.create_node(NodeKind::Entity {
            name: name.to_string(),
            attributes: Vec::new(),
        });
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        Ok(EntityId(id))
    }

    /// Creates a text node, appending it to `parent`'s children when given.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidName`] if `content` fails
    /// [`validate_value`].
    pub fn create_text(
        &mut self,
        content: &str,
        parent: Option<EntityId>,
    ) -> Result<NodeId, XmlError> {
        validate_value(content)?;
        let id = self.create_node(NodeKind::Text {
            content: content.to_string(),
        });
        if let Some(parent) = parent {
            self.append_child(parent, id);
        }
        Ok(id)
    }

    fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let index = self.nodes.len();
        self.nodes.push(NodeData::new(kind));
        NodeId::from_index(index)
    }

    // --- Node access ---

    /// Returns the `NodeData` for the given node.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not handed out by this tree.
    #[must_use]
    pub fn node(&self, id: impl Into<NodeId>) -> &NodeData {
        &self.nodes[id.into().as_index()]
    }

    fn node_mut(&mut self, id: impl Into<NodeId>) -> &mut NodeData {
        &mut self.nodes[id.into().as_index()]
    }

    /// Returns the kind and payload of a node.
    #[must_use]
    pub fn kind(&self, id: impl Into<NodeId>) -> &NodeKind {
        &self.node(id).kind
    }

    /// Returns a node's name: the entity name, or a text node's content.
    #[must_use]
    pub fn name(&self, id: impl Into<NodeId>) -> &str {
        self.kind(id).name()
    }

    /// Returns `true` if `id` addresses an entity.
    #[must_use]
    pub fn is_entity(&self, id: NodeId) -> bool {
        self.kind(id).is_entity()
    }

    /// Narrows a node handle to an entity handle.
    #[must_use]
    pub fn as_entity(&self, id: NodeId) -> Option<EntityId> {
        self.is_entity(id).then_some(EntityId(id))
    }

    /// Returns the number of nodes ever allocated, including removed ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    /// Returns `true` if `entity` addresses an entity slot of this tree.
    ///
    /// Handles are only meaningful in the tree that issued them; this
    /// catches a handle carried over from another tree.
    #[must_use]
    pub fn contains_entity(&self, entity: EntityId) -> bool {
        self.nodes
            .get(entity.node().as_index())
            .is_some_and(|data| data.kind.is_entity())
    }

    // --- Attributes ---

    /// Returns the attributes of an entity in insertion order.
    #[must_use]
    pub fn attributes(&self, entity: EntityId) -> &[Attribute] {
        match self.kind(entity) {
            NodeKind::Entity { attributes, .. } => attributes,
            NodeKind::Text { .. } => &[],
        }
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn find_attribute(&self, entity: EntityId, name: &str) -> Option<&Attribute> {
        self.attributes(entity).iter().find(|a| a.name == name)
    }

    /// Returns the value of an attribute by name.
    #[must_use]
    pub fn attribute(&self, entity: EntityId, name: &str) -> Option<&str> {
        self.find_attribute(entity, name).map(|a| a.value.as_str())
    }

    fn attributes_mut(&mut self, entity: EntityId) -> &mut Vec<Attribute> {
        match &mut self.node_mut(entity).kind {
            NodeKind::Entity { attributes, .. } => attributes,
            NodeKind::Text { .. } => unreachable!("EntityId always addresses an entity"),
        }
    }

    fn attribute_position(&self, entity: EntityId, name: &str) -> Option<usize> {
        self.attributes(entity).iter().position(|a| a.name == name)
    }

    /// Appends an attribute to an entity.
    ///
    /// # Errors
    ///
    /// - [`XmlError::InvalidName`] if the name or value is rejected.
    /// - [`XmlError::DuplicateAttribute`] if the entity already has an
    ///   attribute with this name.
    pub fn add_attribute(
        &mut self,
        entity: EntityId,
        name: &str,
        value: &str,
    ) -> Result<(), XmlError> {
        validate_name(name)?;
        validate_value(value)?;
        if self.attribute_position(entity, name).is_some() {
            return Err(XmlError::DuplicateAttribute {
                name: name.to_string(),
            });
        }
        self.attributes_mut(entity).push(Attribute::new(name, value));
        Ok(())
    }

    /// Removes an attribute from an entity.
    ///
    /// # Errors
    ///
    /// - [`XmlError::InvalidName`] if the name is rejected.
    /// - [`XmlError::NotFound`] if the entity has no such attribute.
    pub fn remove_attribute(&mut self, entity: EntityId, name: &str) -> Result<(), XmlError> {
        validate_name(name)?;
        let pos = self
            .attribute_position(entity, name)
            .ok_or_else(|| XmlError::attribute_not_found(name))?;
        self.attributes_mut(entity).remove(pos);
        Ok(())
    }

    /// Replaces the value of an existing attribute, keeping its position.
    ///
    /// # Errors
    ///
    /// - [`XmlError::InvalidName`] if the name or the new value is rejected.
    /// - [`XmlError::NotFound`] if the entity has no such attribute.
    pub fn change_attribute(
        &mut self,
        entity: EntityId,
        name: &str,
        value: &str,
    ) -> Result<(), XmlError> {
        validate_name(name)?;
        validate_value(value)?;
        let pos = self
            .attribute_position(entity, name)
            .ok_or_else(|| XmlError::attribute_not_found(name))?;
        self.attributes_mut(entity)[pos].value = value.to_string();
        Ok(())
    }

    /// Renames an attribute. The attribute keeps its position and value.
    ///
    /// # Errors
    ///
    /// - [`XmlError::SameName`] if `old_name == new_name`, whether or not the
    ///   attribute exists.
    /// - [`XmlError::InvalidName`] if either name is rejected.
    /// - [`XmlError::NotFound`] if `old_name` is absent.
    /// - [`XmlError::DuplicateAttribute`] if `new_name` is already taken.
    pub fn rename_attribute(
        &mut self,
        entity: EntityId,
        old_name: &str,
        new_name: &str,
    ) -> Result<(), XmlError> {
        if old_name == new_name {
            return Err(XmlError::SameName {
                name: old_name.to_string(),
            });
        }
        validate_name(old_name)?;
        validate_name(new_name)?;
        let pos = self
            .attribute_position(entity, old_name)
            .ok_or_else(|| XmlError::attribute_not_found(old_name))?;
        if self.attribute_position(entity, new_name).is_some() {
            return Err(XmlError::DuplicateAttribute {
                name: new_name.to_string(),
            });
        }
        self.attributes_mut(entity)[pos].name = new_name.to_string();
        Ok(())
    }

    // --- Entity mutation ---

    /// Renames an entity in place.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::InvalidName`] if `new_name` is rejected; the
    /// entity keeps its old name.
    pub fn rename(&mut self, entity: EntityId, new_name: &str) -> Result<(), XmlError> {
        validate_name(new_name)?;
        if let NodeKind::Entity { name, .. } = &mut self.node_mut(entity).kind {
            *name = new_name.to_string();
        }
        Ok(())
    }

    /// Removes an entity from the tree.
    ///
    /// The entity is unlinked from its parent (a no-op for a root), then
    /// every descendant entity is unlinked from its own parent. Text nodes
    /// stay attached to the entity that owns them. All handles remain valid.
    pub fn remove(&mut self, entity: EntityId) {
        let descendants: Vec<EntityId> = self
            .find_all_entities(entity)
            .into_iter()
            .skip(1)
            .collect();
        self.detach(entity.node());
        for descendant in descendants {
            self.detach(descendant.node());
        }
    }

    /// Reorders an entity's children by a key, keeping equal keys in their
    /// current order.
    ///
    /// Intended for mapping adapters that post-process a freshly built
    /// entity.
    pub fn sort_children_by_key<K, F>(&mut self, entity: EntityId, mut key: F)
    where
        K: Ord,
        F: FnMut(&Tree, NodeId) -> K,
    {
        let tree: &Tree = self;
        let mut keyed: Vec<(K, NodeId)> = tree
            .children(entity)
            .map(|child| (key(tree, child), child))
            .collect();
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        for (_, child) in &keyed {
            self.detach(*child);
        }
        for (_, child) in keyed {
            self.append_child(entity, child);
        }
    }

    /// Appends an unparented node to the end of `parent`'s child list.
    fn append_child(&mut self, parent: EntityId, child: NodeId) {
        debug_assert!(
            self.node(child).parent.is_none(),
            "child already has a parent; detach it first"
        );

        self.node_mut(child).parent = Some(parent);

        if let Some(last) = self.node(parent).last_child {
            self.node_mut(last).next_sibling = Some(child);
            self.node_mut(child).prev_sibling = Some(last);
            self.node_mut(parent).last_child = Some(child);
        } else {
            self.node_mut(parent).first_child = Some(child);
            self.node_mut(parent).last_child = Some(child);
        }
    }

    /// Unlinks a node from its parent without freeing it.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.node(id).parent else {
            return;
        };

        let prev = self.node(id).prev_sibling;
        let next = self.node(id).next_sibling;

        match prev {
            Some(p) => self.node_mut(p).next_sibling = next,
            None => self.node_mut(parent).first_child = next,
        }

        match next {
            Some(n) => self.node_mut(n).prev_sibling = prev,
            None => self.node_mut(parent).last_child = prev,
        }

        let node = self.node_mut(id);
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
    }

    // --- Navigation ---

    /// Returns the parent entity of a node.
    #[must_use]
    pub fn parent(&self, id: impl Into<NodeId>) -> Option<EntityId> {
        self.node(id).parent
    }

    /// Returns the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.node(id).first_child
    }

    /// Returns the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.node(id).last_child
    }

    /// Returns the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.node(id).next_sibling
    }

    /// Returns the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: impl Into<NodeId>) -> Option<NodeId> {
        self.node(id).prev_sibling
    }

    /// Returns an iterator over the children of a node, in order.
    pub fn children(&self, id: impl Into<NodeId>) -> Children<'_> {
        Children {
            tree: self,
            next: self.first_child(id),
        }
    }

    /// Returns an iterator over a node and its ancestors, walking up to the
    /// root.
    pub fn ancestors(&self, id: impl Into<NodeId>) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: Some(id.into()),
        }
    }

    /// Returns the depth of a node; a root has depth 1.
    #[must_use]
    pub fn depth(&self, id: impl Into<NodeId>) -> usize {
        self.ancestors(id).count()
    }

    /// Returns the slash-separated path from the root, e.g. `/plano/fuc`.
    #[must_use]
    pub fn path(&self, id: impl Into<NodeId>) -> String {
        let mut names: Vec<&str> = self.ancestors(id).map(|a| self.name(a)).collect();
        names.reverse();
        let mut path = String::new();
        for name in names {
            path.push('/');
            path.push_str(name);
        }
        path
    }

    // --- Traversal ---

    /// Visits `id` and, while `visitor` returns `true`, its children in
    /// order. Returning `false` for a node prunes that node's subtree.
    pub fn accept<F>(&self, id: impl Into<NodeId>, visitor: &mut F)
    where
        F: FnMut(NodeId) -> bool,
    {
        let id = id.into();
        if visitor(id) {
            for child in self.children(id) {
                self.accept(child, visitor);
            }
        }
    }

    /// Returns every node of the subtree rooted at `entity` in pre-order,
    /// starting with `entity` itself.
    #[must_use]
    pub fn deep_list(&self, entity: EntityId) -> Vec<NodeId> {
        let mut list = Vec::new();
        self.accept(entity, &mut |id: NodeId| {
            list.push(id);
            true
        });
        list
    }

    /// Returns every entity named `name` in the subtree rooted at `entity`,
    /// `entity` included, in pre-order. Text nodes never match.
    #[must_use]
    pub fn find_entities(&self, entity: EntityId, name: &str) -> Vec<EntityId> {
        let mut found = Vec::new();
        self.accept(entity, &mut |id: NodeId| {
            if let NodeKind::Entity { name: n, .. } = self.kind(id) {
                if n == name {
                    found.push(EntityId(id));
                }
            }
            true
        });
        found
    }

    // --- Child lookup ---

    /// Returns the first direct child entity of `entity` named `name`.
    #[must_use]
    pub fn child_entity(&self, entity: EntityId, name: &str) -> Option<EntityId> {
        self.children(entity)
            .filter_map(|child| self.as_entity(child))
            .find(|&child| self.name(child) == name)
    }

    /// Returns the first direct text child of `entity` whose content is
    /// `content`.
    #[must_use]
    pub fn child_text(&self, entity: EntityId, content: &str) -> Option<NodeId> {
        self.text_children(entity)
            .find(|&child| matches!(self.kind(child), NodeKind::Text { content: c } if c == content))
    }

    /// Iterates over the direct text children of `entity`.
    pub fn text_children(&self, entity: EntityId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(entity)
            .filter(|&child| self.kind(child).is_text())
    }

    fn find_all_entities(&self, entity: EntityId) -> Vec<EntityId> {
        let mut found = Vec::new();
        self.accept(entity, &mut |id: NodeId| match self.as_entity(id) {
            Some(e) => {
                found.push(e);
                true
            }
            None => false,
        });
        found
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

// --- Iterators ---

/// Iterator over the children of a node.
pub struct Children<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).next_sibling;
        Some(current)
    }
}

/// Iterator over a node and its ancestors.
pub struct Ancestors<'a> {
    tree: &'a Tree,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.node(current).parent.map(EntityId::node);
        Some(current)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{Missing, NameRole};

    struct Plano {
        tree: Tree,
        plano: EntityId,
        curso: EntityId,
        fuc: EntityId,
        avaliacao: EntityId,
        componente: EntityId,
        componente1: EntityId,
    }

    fn plano() -> Plano {
        let mut tree = Tree::new();
        let plano = tree.create_entity("plano", None).unwrap();
        let curso = tree.create_entity("curso", Some(plano)).unwrap();
        let fuc = tree.create_entity("fuc", Some(plano)).unwrap();
        tree.create_entity("nome", Some(fuc)).unwrap();
        tree.create_entity("ects", Some(fuc)).unwrap();
        let avaliacao = tree.create_entity("avaliacao", Some(fuc)).unwrap();
        let componente = tree.create_entity("componente", Some(avaliacao)).unwrap();
        let componente1 = tree.create_entity("componente", Some(avaliacao)).unwrap();
        Plano {
            tree,
            plano,
            curso,
            fuc,
            avaliacao,
            componente,
            componente1,
        }
    }

    fn attrs(tree: &Tree, entity: EntityId) -> Vec<(&str, &str)> {
        tree.attributes(entity)
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
            .collect()
    }

    #[test]
    fn test_create_entity_links_parent() {
        let p = plano();
        assert_eq!(p.tree.parent(p.curso), Some(p.plano));
        assert_eq!(p.tree.parent(p.plano), None);
        let children: Vec<NodeId> = p.tree.children(p.avaliacao).collect();
        assert_eq!(children, vec![p.componente.node(), p.componente1.node()]);
    }

    #[test]
    fn test_create_entity_invalid_name_allocates_nothing() {
        let mut tree = Tree::new();
        let err = tree.create_entity("na#ds", None).unwrap_err();
        assert!(matches!(err, XmlError::InvalidName { role: NameRole::Name, .. }));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_create_text() {
        let mut tree = Tree::new();
        let nome = tree.create_entity("nome", None).unwrap();
        let text = tree.create_text("Programação Avançada", Some(nome)).unwrap();
        assert_eq!(tree.name(text), "Programação Avançada");
        assert!(!tree.is_entity(text));
        assert_eq!(tree.as_entity(text), None);
        assert_eq!(tree.parent(text), Some(nome));
        assert!(tree.create_text("", Some(nome)).is_err());
        assert_eq!(tree.children(nome).count(), 1);
    }

    #[test]
    fn test_depth() {
        let p = plano();
        assert_eq!(p.tree.depth(p.plano), 1);
        assert_eq!(p.tree.depth(p.curso), 2);
        assert_eq!(p.tree.depth(p.fuc), 2);
        assert_eq!(p.tree.depth(p.avaliacao), 3);
        assert_eq!(p.tree.depth(p.componente), 4);
    }

    #[test]
    fn test_path() {
        let p = plano();
        assert_eq!(p.tree.path(p.plano), "/plano");
        assert_eq!(p.tree.path(p.curso), "/plano/curso");
        assert_eq!(p.tree.path(p.fuc), "/plano/fuc");
        assert_eq!(p.tree.path(p.avaliacao), "/plano/fuc/avaliacao");
        assert_eq!(p.tree.path(p.componente), "/plano/fuc/avaliacao/componente");
    }

    #[test]
    fn test_add_attribute() {
        let mut p = plano();
        let curso = p.curso;
        p.tree
            .add_attribute(curso, "name", "Mestrado em Engenharia Informática")
            .unwrap();
        assert_eq!(
            attrs(&p.tree, curso),
            vec![("name", "Mestrado em Engenharia Informática")]
        );

        for (name, value, role) in [
            ("na#ds", "x", NameRole::Name),
            ("", "x", NameRole::Name),
            ("other", "!&dsjhd", NameRole::Value),
            ("other", "", NameRole::Value),
        ] {
            let err = p.tree.add_attribute(curso, name, value).unwrap_err();
            assert!(matches!(err, XmlError::InvalidName { role: r, .. } if r == role));
        }
        assert_eq!(p.tree.attributes(curso).len(), 1);
    }

    #[test]
    fn test_add_duplicate_attribute() {
        let mut p = plano();
        p.tree.add_attribute(p.fuc, "codigo", "M4310").unwrap();
        let err = p.tree.add_attribute(p.fuc, "codigo", "03782").unwrap_err();
        assert_eq!(
            err,
            XmlError::DuplicateAttribute {
                name: "codigo".to_string()
            }
        );
        assert_eq!(p.tree.attribute(p.fuc, "codigo"), Some("M4310"));
    }

    #[test]
    fn test_remove_attribute() {
        let mut p = plano();
        let curso = p.curso;
        p.tree.add_attribute(curso, "name", "Mestrado").unwrap();
        p.tree.add_attribute(curso, "ects", "6.0").unwrap();
        p.tree.remove_attribute(curso, "name").unwrap();
        assert_eq!(attrs(&p.tree, curso), vec![("ects", "6.0")]);

        let err = p.tree.remove_attribute(curso, "avaliação").unwrap_err();
        assert_eq!(err.to_string(), "avaliação attribute not found.");
        assert!(p.tree.remove_attribute(curso, "!djffdf").is_err());
    }

    #[test]
    fn test_change_attribute() {
        let mut p = plano();
        let curso = p.curso;
        p.tree.add_attribute(curso, "name", "Mestrado em Engenharia").unwrap();
        p.tree.add_attribute(curso, "ects", "120").unwrap();
        p.tree.change_attribute(curso, "name", "Mestrado").unwrap();
        assert_eq!(attrs(&p.tree, curso), vec![("name", "Mestrado"), ("ects", "120")]);

        let err = p.tree.change_attribute(curso, "nome", "Mestrado").unwrap_err();
        assert_eq!(
            err,
            XmlError::NotFound {
                what: Missing::Attribute,
                name: "nome".to_string()
            }
        );
        assert!(p.tree.change_attribute(curso, "name", "na#ds").is_err());
        assert!(p.tree.change_attribute(curso, "name", "").is_err());
        assert_eq!(p.tree.attribute(curso, "name"), Some("Mestrado"));
    }

    #[test]
    fn test_rename_attribute_keeps_position() {
        let mut p = plano();
        let curso = p.curso;
        p.tree.add_attribute(curso, "name", "Mestrado").unwrap();
        p.tree.add_attribute(curso, "ects", "6.0").unwrap();
        p.tree.rename_attribute(curso, "name", "nome").unwrap();
        assert_eq!(attrs(&p.tree, curso), vec![("nome", "Mestrado"), ("ects", "6.0")]);
    }

    #[test]
    fn test_rename_attribute_errors() {
        let mut p = plano();
        let curso = p.curso;
        p.tree.add_attribute(curso, "nome", "Mestrado").unwrap();
        p.tree.add_attribute(curso, "ects", "6.0").unwrap();

        let err = p.tree.rename_attribute(curso, "nme", "Mestrado").unwrap_err();
        assert_eq!(err.to_string(), "nme attribute not found.");
        assert!(matches!(
            p.tree.rename_attribute(curso, "nome", "na#ds"),
            Err(XmlError::InvalidName { .. })
        ));
        assert!(matches!(
            p.tree.rename_attribute(curso, "nome", ""),
            Err(XmlError::InvalidName { .. })
        ));
        assert!(matches!(
            p.tree.rename_attribute(curso, "nome", "nome"),
            Err(XmlError::SameName { .. })
        ));
        assert!(matches!(
            p.tree.rename_attribute(curso, "absent", "absent"),
            Err(XmlError::SameName { .. })
        ));
        assert!(matches!(
            p.tree.rename_attribute(curso, "nome", "ects"),
            Err(XmlError::DuplicateAttribute { .. })
        ));
        assert_eq!(attrs(&p.tree, curso), vec![("nome", "Mestrado"), ("ects", "6.0")]);
    }

    #[test]
    fn test_rename() {
        let mut tree = Tree::new();
        let fuc = tree.create_entity("fuc", None).unwrap();
        tree.rename(fuc, "programa").unwrap();
        assert_eq!(tree.name(fuc), "programa");
        assert!(tree.rename(fuc, "na#ds").is_err());
        assert!(tree.rename(fuc, "").is_err());
        assert_eq!(tree.name(fuc), "programa");
    }

    #[test]
    fn test_remove_leaf() {
        let mut tree = Tree::new();
        let fuc = tree.create_entity("fuc", None).unwrap();
        let avaliacao = tree.create_entity("avaliacao", Some(fuc)).unwrap();
        tree.remove(avaliacao);
        assert_eq!(tree.children(fuc).count(), 0);
        assert!(tree.find_entities(fuc, "avaliacao").is_empty());
        assert_eq!(tree.parent(avaliacao), None);
    }

    #[test]
    fn test_remove_detaches_descendants() {
        let mut p = plano();
        let nome_text = {
            let nome = p.tree.find_entities(p.fuc, "nome")[0];
            p.tree.create_text("Programação", Some(nome)).unwrap()
        };
        p.tree.remove(p.fuc);

        let remaining: Vec<NodeId> = p.tree.children(p.plano).collect();
        assert_eq!(remaining, vec![p.curso.node()]);
        assert_eq!(p.tree.parent(p.fuc), None);
        assert_eq!(p.tree.parent(p.avaliacao), None);
        assert_eq!(p.tree.parent(p.componente), None);
        assert_eq!(p.tree.children(p.fuc).count(), 0);
        assert_eq!(p.tree.children(p.avaliacao).count(), 0);
        // Text stays with its entity.
        assert!(p.tree.parent(nome_text).is_some());
        // Handles remain usable.
        assert_eq!(p.tree.name(p.componente1), "componente");
        assert_eq!(p.tree.depth(p.componente1), 1);
    }

    #[test]
    fn test_remove_middle_child_relinks_siblings() {
        let mut tree = Tree::new();
        let root = tree.create_entity("root", None).unwrap();
        let a = tree.create_entity("a", Some(root)).unwrap();
        let b = tree.create_entity("b", Some(root)).unwrap();
        let c = tree.create_entity("c", Some(root)).unwrap();

        tree.remove(b);

        assert_eq!(tree.next_sibling(a), Some(c.node()));
        assert_eq!(tree.prev_sibling(c), Some(a.node()));
        assert_eq!(tree.next_sibling(b), None);
        assert_eq!(tree.prev_sibling(b), None);
        assert_eq!(tree.first_child(root), Some(a.node()));
        assert_eq!(tree.last_child(root), Some(c.node()));
    }

    #[test]
    fn test_remove_root_is_noop_for_parent_link() {
        let mut tree = Tree::new();
        let root = tree.create_entity("root", None).unwrap();
        let child = tree.create_entity("child", Some(root)).unwrap();
        tree.remove(root);
        assert_eq!(tree.parent(root), None);
        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn test_deep_list() {
        let mut tree = Tree::new();
        let d1 = tree.create_entity("fuc", None).unwrap();
        let d2 = tree.create_entity("avaliacao", Some(d1)).unwrap();
        let d3 = tree.create_entity("avaliacao", Some(d2)).unwrap();

        assert_eq!(tree.deep_list(d1), vec![d1.node(), d2.node(), d3.node()]);
        assert_eq!(tree.deep_list(d2), vec![d2.node(), d3.node()]);
        assert_eq!(tree.deep_list(d3), vec![d3.node()]);
    }

    #[test]
    fn test_find_entities() {
        let mut tree = Tree::new();
        let d1 = tree.create_entity("fuc", None).unwrap();
        let d2 = tree.create_entity("avaliacao", Some(d1)).unwrap();
        tree.create_text("avaliacao", Some(d1)).unwrap();
        let d3 = tree.create_entity("avaliacao", Some(d1)).unwrap();

        assert_eq!(tree.find_entities(d1, "avaliacao"), vec![d2, d3]);
        assert_eq!(tree.find_entities(d1, "fuc"), vec![d1]);
        assert!(tree.find_entities(d1, "missing").is_empty());
    }

    #[test]
    fn test_accept_prunes_subtree() {
        let p = plano();
        let mut seen = Vec::new();
        p.tree.accept(p.plano, &mut |id: NodeId| {
            seen.push(p.tree.name(id).to_string());
            p.tree.name(id) != "fuc"
        });
        assert_eq!(seen, vec!["plano", "curso", "fuc"]);
    }

    #[test]
    fn test_sort_children_by_key() {
        let mut tree = Tree::new();
        let fuc = tree.create_entity("fuc", None).unwrap();
        for name in ["nome", "ects", "avaliacao"] {
            tree.create_entity(name, Some(fuc)).unwrap();
        }
        tree.sort_children_by_key(fuc, |t, id| t.name(id).to_string());
        let names: Vec<&str> = tree.children(fuc).map(|c| tree.name(c)).collect();
        assert_eq!(names, vec!["avaliacao", "ects", "nome"]);
        for child in tree.children(fuc) {
            assert_eq!(tree.parent(child), Some(fuc));
        }
    }

    #[test]
    fn test_contains_entity() {
        let p = plano();
        assert!(p.tree.contains_entity(p.plano));
        assert!(p.tree.contains_entity(p.componente1));

        let mut small = Tree::new();
        let root = small.create_entity("fuc", None).unwrap();
        small.create_text("6.0", Some(root)).unwrap();
        // Slot 2 is text in `small`, slot 8 does not exist there.
        assert!(!small.contains_entity(p.curso));
        assert!(!small.contains_entity(p.componente1));
        assert!(small.contains_entity(root));
    }

    #[test]
    fn test_child_lookup() {
        let mut tree = Tree::new();
        let nome = tree.create_entity("nome", None).unwrap();
        let text = tree.create_text("Programação Avançada", Some(nome)).unwrap();
        let inner = tree.create_entity("nome", Some(nome)).unwrap();
        let other = tree.create_text("outro", Some(nome)).unwrap();

        assert_eq!(tree.child_entity(nome, "nome"), Some(inner));
        assert_eq!(tree.child_entity(inner, "nome"), None);
        assert_eq!(tree.child_text(nome, "Programação Avançada"), Some(text));
        assert_eq!(tree.child_text(nome, "missing"), None);
        assert_eq!(tree.text_children(nome).collect::<Vec<_>>(), vec![text, other]);
    }
}
