//! In-memory XMP metadata document.
//!
//! Models the RDF/XML metadata tree as an owned arena of namespace nodes
//! addressed by index handles, with namespace-scoped property access and
//! XMP packet serialization/parsing.

pub mod packet;
pub mod tree;

pub use tree::{NamespaceNode, NodeHandle, XmpDocument};
