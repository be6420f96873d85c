//! Text serialization.
//!
//! The canonical text form is the only output format: a tab-indented
//! element tree, optionally preceded by an XML declaration when a whole
//! [`Document`](crate::Document) is rendered. Text content and attribute
//! values are emitted verbatim; validation already restricts them to a
//! character set that needs no escaping.

pub mod xml;

pub use xml::{
    render, render_document, render_document_with_options, render_with_options, RenderOptions,
};
