//! XML response normalization.
//!
//! SEP2 resources share a common hypermedia shape but span dozens of
//! schema types. Rather than model each one, responses are flattened
//! into a generic [`XmlValue`] tree: namespace prefixes are dropped,
//! attributes are merged into the same key space as child elements, and
//! repeated sibling elements collapse into ordered lists. No schema is
//! imposed; the backend server remains the authority on payload shape.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::error::{ClientError, Result};

/// Key under which an element's own text is stored when the element
/// also carries attributes or child elements.
pub const TEXT_KEY: &str = "_";

/// A normalized XML tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlValue {
    /// Attribute value or text-only element content.
    Scalar(String),
    /// Element with attributes and/or children, in document order.
    Object(Vec<(String, XmlValue)>),
    /// Repeated sibling elements, in document order.
    List(Vec<XmlValue>),
}

impl XmlValue {
    /// Look up an entry by key. Scalars and lists have no keys.
    pub fn get(&self, key: &str) -> Option<&XmlValue> {
        match self {
            XmlValue::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// The scalar content, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            XmlValue::Scalar(value) => Some(value),
            _ => None,
        }
    }

    /// The list items, if this is a list.
    pub fn as_list(&self) -> Option<&[XmlValue]> {
        match self {
            XmlValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Insert an entry, replacing any existing value under the same key.
    ///
    /// Attributes are inserted before child elements, so an attribute and
    /// a child element sharing a name collide with last-write-wins: the
    /// child silently replaces the attribute. A known limitation of the
    /// merged key space.
    fn insert(&mut self, key: &str, value: XmlValue) {
        if let XmlValue::Object(entries) = self {
            if let Some(entry) = entries.iter_mut().find(|(k, _)| k == key) {
                entry.1 = value;
            } else {
                entries.push((key.to_string(), value));
            }
        }
    }

    /// Append a repeated sibling: promotes an existing entry to a list.
    fn append(&mut self, key: &str, value: XmlValue) {
        if let XmlValue::Object(entries) = self {
            match entries.iter_mut().find(|(k, _)| k == key) {
                Some((_, XmlValue::List(items))) => items.push(value),
                Some(entry) => {
                    let first = std::mem::replace(&mut entry.1, XmlValue::List(Vec::new()));
                    entry.1 = XmlValue::List(vec![first, value]);
                }
                None => entries.push((key.to_string(), value)),
            }
        }
    }
}

impl Serialize for XmlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            XmlValue::Scalar(value) => serializer.serialize_str(value),
            XmlValue::Object(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            XmlValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

/// Normalize an XML response body.
///
/// The document wrapper is discarded: the returned value is the root
/// element's own content, so `<DeviceCapability pollRate="900"/>` yields
/// an object with a `pollRate` key rather than a one-key envelope.
/// Fails with [`ClientError::Parse`] on malformed XML or a non-UTF-8
/// body; never returns a partial tree.
pub fn normalize(body: &[u8]) -> Result<XmlValue> {
    let text = std::str::from_utf8(body)
        .map_err(|e| ClientError::Parse(format!("response body is not valid UTF-8: {e}")))?;
    let doc = roxmltree::Document::parse(text).map_err(|e| ClientError::Parse(e.to_string()))?;
    Ok(element_value(doc.root_element()))
}

fn element_value(node: roxmltree::Node) -> XmlValue {
    let children: Vec<roxmltree::Node> = node.children().filter(|n| n.is_element()).collect();
    let text: String = node
        .children()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect::<String>()
        .trim()
        .to_string();

    if children.is_empty() && node.attributes().next().is_none() {
        return XmlValue::Scalar(text);
    }

    let mut value = XmlValue::Object(Vec::new());
    for attr in node.attributes() {
        value.insert(attr.name(), XmlValue::Scalar(attr.value().to_string()));
    }
    let mut child_keys = std::collections::HashSet::new();
    for child in children {
        // tag_name().name() is the local name; any namespace prefix is gone
        let name = child.tag_name().name();
        if child_keys.insert(name.to_string()) {
            // first occurrence replaces any attribute entry of the same
            // name (last-write-wins)
            value.insert(name, element_value(child));
        } else {
            value.append(name, element_value(child));
        }
    }
    if !text.is_empty() {
        value.insert(TEXT_KEY, XmlValue::Scalar(text));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discovery_document() {
        let xml = br#"<DeviceCapability xmlns="urn:ieee:std:2030.5:ns" href="/dcap" pollRate="900">
            <TimeLink href="/tm"/>
            <EndDeviceListLink href="/edev" all="2"/>
        </DeviceCapability>"#;
        let value = normalize(xml).unwrap();

        assert_eq!(value.get("pollRate").and_then(XmlValue::as_str), Some("900"));
        assert_eq!(value.get("href").and_then(XmlValue::as_str), Some("/dcap"));
        let time_link = value.get("TimeLink").unwrap();
        assert_eq!(time_link.get("href").and_then(XmlValue::as_str), Some("/tm"));
    }

    #[test]
    fn test_namespace_prefix_stripped() {
        let xml = br#"<sep:Device xmlns:sep="urn:ieee:std:2030.5:ns" sep:href="/edev/1"/>"#;
        let value = normalize(xml).unwrap();
        assert!(value.get("href").is_some());
        assert!(value.get("sep:href").is_none());
    }

    #[test]
    fn test_sibling_repetition_becomes_list() {
        let xml = br#"<EndDeviceList all="2">
            <EndDevice href="/edev/1"/>
            <EndDevice href="/edev/2"/>
        </EndDeviceList>"#;
        let value = normalize(xml).unwrap();

        let devices = value.get("EndDevice").and_then(XmlValue::as_list).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].get("href").and_then(XmlValue::as_str), Some("/edev/1"));
        assert_eq!(devices[1].get("href").and_then(XmlValue::as_str), Some("/edev/2"));
    }

    #[test]
    fn test_single_element_stays_scalar_entry() {
        let xml = br#"<List><Item href="/a"/></List>"#;
        let value = normalize(xml).unwrap();
        assert!(value.get("Item").unwrap().as_list().is_none());
    }

    #[test]
    fn test_text_only_element() {
        let xml = br#"<Time><currentTime>1672531200</currentTime></Time>"#;
        let value = normalize(xml).unwrap();
        assert_eq!(
            value.get("currentTime").and_then(XmlValue::as_str),
            Some("1672531200")
        );
    }

    #[test]
    fn test_empty_and_self_closing_elements() {
        let value = normalize(b"<Empty></Empty>").unwrap();
        assert_eq!(value, XmlValue::Scalar(String::new()));

        let value = normalize(br#"<Link href="/tm"/>"#).unwrap();
        assert_eq!(value.get("href").and_then(XmlValue::as_str), Some("/tm"));
    }

    #[test]
    fn test_text_with_attributes_uses_charkey() {
        let xml = br#"<value unit="W">1500</value>"#;
        let value = normalize(xml).unwrap();
        assert_eq!(value.get("unit").and_then(XmlValue::as_str), Some("W"));
        assert_eq!(value.get(TEXT_KEY).and_then(XmlValue::as_str), Some("1500"));
    }

    #[test]
    fn test_attribute_child_collision_last_write_wins() {
        let xml = br#"<Resource href="/attr"><href>/child</href></Resource>"#;
        let value = normalize(xml).unwrap();
        assert_eq!(value.get("href").and_then(XmlValue::as_str), Some("/child"));
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let err = normalize(b"<DeviceCapability><TimeLink></DeviceCapability>").unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_non_utf8_body_is_parse_error() {
        let err = normalize(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, ClientError::Parse(_)));
    }

    #[test]
    fn test_determinism() {
        let xml = br#"<DeviceCapability href="/dcap" pollRate="900">
            <TimeLink href="/tm"/>
            <EndDevice href="/edev/1"/>
            <EndDevice href="/edev/2"/>
        </DeviceCapability>"#;
        let first = normalize(xml).unwrap();
        let second = normalize(xml).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_serialize_preserves_document_order() {
        let xml = br#"<Resource beta="2" alpha="1"><zeta/></Resource>"#;
        let value = normalize(xml).unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert!(json.find("beta").unwrap() < json.find("alpha").unwrap());
        assert!(json.find("alpha").unwrap() < json.find("zeta").unwrap());
    }
}
