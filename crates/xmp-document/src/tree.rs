//! The owned metadata tree and its handle-based node access.

use tracing::debug;
use xmp_common::{XmpError, XmpResult, XmpValue};

/// Index-based handle to a namespace node inside an [`XmpDocument`].
///
/// Handles are only meaningful for the document that issued them; every
/// dereference is bounds-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) usize);

/// One schema's subtree: a namespace URI, its prefix, and the properties
/// written under it in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct NamespaceNode {
    pub prefix: String,
    pub namespace_uri: String,
    properties: Vec<(String, XmpValue)>,
}

impl NamespaceNode {
    fn new(prefix: &str, namespace_uri: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            namespace_uri: namespace_uri.to_string(),
            properties: Vec::new(),
        }
    }

    /// Look up a property by name.
    pub fn property(&self, name: &str) -> Option<&XmpValue> {
        self.properties
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Properties in insertion order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &XmpValue)> {
        self.properties.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of properties on this node.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

/// An in-memory XMP metadata document.
///
/// The caller owns the document; writers receive `&mut` access and never
/// take ownership. The document is not internally synchronized.
#[derive(Debug, Clone, PartialEq)]
pub struct XmpDocument {
    nodes: Vec<NamespaceNode>,
    writable: bool,
}

impl XmpDocument {
    /// Create an empty, writable document.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            writable: true,
        }
    }

    /// Whether mutation is allowed.
    ///
    /// Parsed packets inherit this from the xpacket trailer
    /// (`end="w"` writable, `end="r"` read-only).
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Freeze the document; all further mutation fails with
    /// [`XmpError::ReadOnlyDocument`].
    pub fn set_read_only(&mut self) {
        self.writable = false;
    }

    /// Find the node for a namespace URI, if present.
    pub fn namespace_node(&self, namespace_uri: &str) -> Option<NodeHandle> {
        self.nodes
            .iter()
            .position(|n| n.namespace_uri == namespace_uri)
            .map(NodeHandle)
    }

    /// Find the node for a namespace URI, creating it if absent.
    ///
    /// Idempotent: repeated calls with the same URI return the same
    /// handle, so a document never grows duplicate namespace nodes.
    pub fn find_or_create_namespace_node(
        &mut self,
        namespace_uri: &str,
        prefix: &str,
    ) -> XmpResult<NodeHandle> {
        if let Some(handle) = self.namespace_node(namespace_uri) {
            return Ok(handle);
        }
        if !self.writable {
            return Err(XmpError::ReadOnlyDocument);
        }
        debug!(namespace = namespace_uri, prefix, "creating namespace node");
        self.nodes.push(NamespaceNode::new(prefix, namespace_uri));
        Ok(NodeHandle(self.nodes.len() - 1))
    }

    /// Borrow a node by handle.
    pub fn node(&self, handle: NodeHandle) -> XmpResult<&NamespaceNode> {
        self.nodes
            .get(handle.0)
            .ok_or(XmpError::InvalidNodeHandle(handle.0))
    }

    /// Set a property on a node, overwriting any prior value.
    ///
    /// Overwrites keep the property's original position so repeated
    /// writes preserve serialization order.
    pub fn set_property(
        &mut self,
        handle: NodeHandle,
        name: &str,
        value: XmpValue,
    ) -> XmpResult<()> {
        if !self.writable {
            return Err(XmpError::ReadOnlyDocument);
        }
        let node = self
            .nodes
            .get_mut(handle.0)
            .ok_or(XmpError::InvalidNodeHandle(handle.0))?;
        match node.properties.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => node.properties.push((name.to_string(), value)),
        }
        Ok(())
    }

    /// Look up a property on a node.
    pub fn property(&self, handle: NodeHandle, name: &str) -> Option<&XmpValue> {
        self.nodes.get(handle.0).and_then(|n| n.property(name))
    }

    /// Namespace nodes in creation order.
    pub fn namespaces(&self) -> impl Iterator<Item = &NamespaceNode> {
        self.nodes.iter()
    }

    /// Number of namespace nodes.
    pub fn namespace_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for XmpDocument {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_or_create_is_idempotent() {
        let mut doc = XmpDocument::new();
        let a = doc
            .find_or_create_namespace_node("http://example.com/ns/", "Ex")
            .unwrap();
        let b = doc
            .find_or_create_namespace_node("http://example.com/ns/", "Ex")
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(doc.namespace_count(), 1);
    }

    #[test]
    fn test_set_property_overwrites_in_place() {
        let mut doc = XmpDocument::new();
        let node = doc
            .find_or_create_namespace_node("http://example.com/ns/", "Ex")
            .unwrap();
        doc.set_property(node, "First", XmpValue::Int(1)).unwrap();
        doc.set_property(node, "Second", XmpValue::Int(2)).unwrap();
        doc.set_property(node, "First", XmpValue::Int(10)).unwrap();

        let names: Vec<&str> = doc.node(node).unwrap().properties().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["First", "Second"]);
        assert_eq!(doc.property(node, "First"), Some(&XmpValue::Int(10)));
    }

    #[test]
    fn test_read_only_rejects_mutation() {
        let mut doc = XmpDocument::new();
        let node = doc
            .find_or_create_namespace_node("http://example.com/ns/", "Ex")
            .unwrap();
        doc.set_read_only();

        let err = doc.set_property(node, "X", XmpValue::Bool(true));
        assert!(matches!(err, Err(XmpError::ReadOnlyDocument)));

        let err = doc.find_or_create_namespace_node("http://other.com/ns/", "O");
        assert!(matches!(err, Err(XmpError::ReadOnlyDocument)));

        // Lookup of an existing namespace still succeeds.
        assert!(doc
            .find_or_create_namespace_node("http://example.com/ns/", "Ex")
            .is_ok());
    }

    #[test]
    fn test_stale_handle_is_rejected() {
        let mut doc = XmpDocument::new();
        let err = doc.set_property(NodeHandle(3), "X", XmpValue::Int(0));
        assert!(matches!(err, Err(XmpError::InvalidNodeHandle(3))));
    }
}
