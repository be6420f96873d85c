//! Canonical pretty-printer.
//!
//! Renders an entity subtree (or a whole [`Document`]) to its canonical
//! text form. Element-only content is placed one child per line with one
//! indent unit per nesting level; an entity with any text child is rendered
//! on a single line, children inline, with no added indentation.

use crate::document::Document;
use crate::tree::{EntityId, NodeId, NodeKind, Tree};

/// Options controlling rendering output.
///
/// # Examples
///
/// ```
/// use xmlarbor::Tree;
/// use xmlarbor::serial::{render_with_options, RenderOptions};
///
/// let mut tree = Tree::new();
/// let root = tree.create_entity("root", None).unwrap();
/// tree.create_entity("child", Some(root)).unwrap();
/// let text = render_with_options(&tree, root, &RenderOptions::default().indent_str("  "));
/// assert_eq!(text, "<root>\n  <child/>\n</root>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// The indentation string emitted once per nesting level.
    /// Defaults to a single tab.
    pub indent_str: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            indent_str: "\t".to_string(),
        }
    }
}

impl RenderOptions {
    /// Sets the indentation string used for each nesting level.
    #[must_use]
    pub fn indent_str(mut self, s: &str) -> Self {
        self.indent_str = s.to_string();
        self
    }
}

/// Renders the subtree rooted at `entity` with the default options.
///
/// # Examples
///
/// ```
/// use xmlarbor::Tree;
/// use xmlarbor::serial::render;
///
/// let mut tree = Tree::new();
/// let nome = tree.create_entity("nome", None).unwrap();
/// tree.create_text("Programação Avançada", Some(nome)).unwrap();
/// assert_eq!(render(&tree, nome), "<nome>Programação Avançada</nome>");
/// ```
#[must_use]
pub fn render(tree: &Tree, entity: EntityId) -> String {
    render_with_options(tree, entity, &RenderOptions::default())
}

/// Renders the subtree rooted at `entity` with the given options.
#[must_use]
pub fn render_with_options(tree: &Tree, entity: EntityId, options: &RenderOptions) -> String {
    let mut output = String::new();
    write_node(tree, entity.node(), &mut output, options, 0);
    output
}

/// Renders a document: the XML declaration, a newline, then the root entity.
#[must_use]
pub fn render_document(doc: &Document) -> String {
    render_document_with_options(doc, &RenderOptions::default())
}

/// Renders a document with the given options.
#[must_use]
pub fn render_document_with_options(doc: &Document, options: &RenderOptions) -> String {
    let mut output = String::new();
    output.push_str("<?xml version=\"");
    output.push_str(doc.version());
    output.push_str("\" encoding=\"");
    output.push_str(doc.encoding());
    output.push_str("\"?>\n");
    write_node(doc.tree(), doc.root().node(), &mut output, options, 0);
    output
}

fn push_indent(out: &mut String, options: &RenderOptions, depth: usize) {
    for _ in 0..depth {
        out.push_str(&options.indent_str);
    }
}

fn has_text_child(tree: &Tree, id: NodeId) -> bool {
    tree.children(id).any(|child| tree.kind(child).is_text())
}

fn write_node(tree: &Tree, id: NodeId, out: &mut String, options: &RenderOptions, depth: usize) {
    let (name, attributes) = match tree.kind(id) {
        NodeKind::Text { content } => {
            out.push_str(content);
            return;
        }
        NodeKind::Entity { name, attributes } => (name, attributes),
    };

    out.push('<');
    out.push_str(name);
    for attr in attributes {
        out.push(' ');
        out.push_str(&attr.name);
        out.push_str("=\"");
        out.push_str(&attr.value);
        out.push('"');
    }

    if tree.first_child(id).is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');

    if has_text_child(tree, id) {
        for child in tree.children(id) {
            write_node(tree, child, out, options, depth + 1);
        }
    } else {
        out.push('\n');
        for child in tree.children(id) {
            push_indent(out, options, depth + 1);
            write_node(tree, child, out, options, depth + 1);
            out.push('\n');
        }
        push_indent(out, options, depth);
    }

    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
