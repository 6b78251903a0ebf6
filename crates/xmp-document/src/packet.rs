//! XMP packet serialization and parsing.
//!
//! Serializes the document as a standard xpacket: an `x:xmpmeta` wrapper
//! around `rdf:RDF`, one `rdf:Description` per namespace node, properties
//! in the attribute form. Output is fully deterministic: nodes appear in
//! creation order and properties in insertion order.

use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use xmp_common::{XmpError, XmpResult, XmpValue};

use crate::tree::XmpDocument;

/// Magic packet id required by the XMP specification.
const XMP_PACKET_ID: &str = "W5M0MpCehiHzreSzNTczkc9d";

const RDF_NAMESPACE_URI: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

impl XmpDocument {
    /// Serialize the document to an XMP packet.
    ///
    /// The xpacket trailer records writability (`end="w"` for a writable
    /// document, `end="r"` for a frozen one), which [`XmpDocument::from_packet`]
    /// restores on the way back in.
    pub fn to_packet(&self) -> String {
        let mut xml = String::new();

        xml.push_str(&format!(
            "<?xpacket begin=\"\u{feff}\" id=\"{}\"?>\n",
            XMP_PACKET_ID
        ));
        xml.push_str("<x:xmpmeta xmlns:x=\"adobe:ns:meta/\" x:xmptk=\"pano-xmp 0.1.0\">\n");
        xml.push_str(&format!("  <rdf:RDF xmlns:rdf=\"{}\">\n", RDF_NAMESPACE_URI));

        for node in self.namespaces() {
            xml.push_str("    <rdf:Description rdf:about=\"\"\n");
            xml.push_str(&format!(
                "        xmlns:{}=\"{}\"",
                node.prefix,
                escape(&node.namespace_uri)
            ));
            for (name, value) in node.properties() {
                xml.push_str(&format!(
                    "\n        {}:{}=\"{}\"",
                    node.prefix,
                    name,
                    escape(&value.to_xmp_string())
                ));
            }
            xml.push_str("/>\n");
        }

        xml.push_str("  </rdf:RDF>\n");
        xml.push_str("</x:xmpmeta>\n");
        xml.push_str(&format!(
            "<?xpacket end=\"{}\"?>\n",
            if self.is_writable() { "w" } else { "r" }
        ));

        xml
    }

    /// Parse an XMP packet back into a document.
    ///
    /// Reads property-attribute form `rdf:Description` elements; every
    /// value comes back as [`XmpValue::Str`] since XMP carries untyped
    /// text on the wire. Namespaces this library never wrote are kept
    /// intact. A packet trailer of `end="r"` yields a read-only document.
    pub fn from_packet(input: &str) -> XmpResult<XmpDocument> {
        let mut reader = Reader::from_str(input);
        reader.trim_text(true);

        let mut doc = XmpDocument::new();
        let mut read_only = false;

        loop {
            match reader.read_event()? {
                Event::PI(pi) => {
                    let content = String::from_utf8_lossy(pi.as_ref()).into_owned();
                    if content.starts_with("xpacket") && content.contains("end=\"r\"") {
                        read_only = true;
                    }
                }
                Event::Start(e) | Event::Empty(e) => {
                    if e.local_name().as_ref() == b"Description" {
                        parse_description(&e, &mut doc)?;
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if read_only {
            doc.set_read_only();
        }
        Ok(doc)
    }
}

/// Pull namespace declarations and property attributes off one
/// `rdf:Description` element.
fn parse_description(
    element: &quick_xml::events::BytesStart<'_>,
    doc: &mut XmpDocument,
) -> XmpResult<()> {
    // First pass: namespace declarations on this element.
    let mut declared: Vec<(String, String)> = Vec::new();
    for attr in element.attributes() {
        let attr = attr.map_err(|e| XmpError::XmlParse(e.to_string()))?;
        let key = attr.key;
        if key.prefix().map(|p| p.as_ref() == b"xmlns").unwrap_or(false) {
            let prefix = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
            let uri = attr
                .unescape_value()
                .map_err(|e| XmpError::XmlParse(e.to_string()))?
                .into_owned();
            declared.push((prefix, uri));
        }
    }

    // Second pass: prefixed property attributes.
    for attr in element.attributes() {
        let attr = attr.map_err(|e| XmpError::XmlParse(e.to_string()))?;
        let key = attr.key;
        let Some(prefix) = key.prefix() else {
            continue;
        };
        if matches!(prefix.as_ref(), b"xmlns" | b"rdf" | b"xml") {
            continue;
        }
        let prefix = String::from_utf8_lossy(prefix.as_ref()).into_owned();
        let Some((_, uri)) = declared.iter().find(|(p, _)| *p == prefix) else {
            debug!(prefix, "skipping attribute with undeclared prefix");
            continue;
        };

        let name = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmpError::XmlParse(e.to_string()))?
            .into_owned();

        let node = doc.find_or_create_namespace_node(uri, &prefix)?;
        doc.set_property(node, &name, XmpValue::Str(value))?;
    }

    Ok(())
}
