//! Ordered header storage with multi-value folding.
//!
//! A captured message may repeat a header (several `Via` lines, a `Route`
//! set split across lines, a compact `v:` next to a long `Via:`). The map
//! keeps one entry per header, keyed by the name as first spelled in the
//! message, and joins repeated values with a single space in the order they
//! appeared on the wire.

use std::fmt;
use std::str::FromStr;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::header_name::HeaderName;
use crate::error::Result;

/// One header entry: the spelling first seen, its resolved name and the
/// joined value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderEntry {
    key: String,
    name: HeaderName,
    value: String,
}

impl HeaderEntry {
    /// The header name as first encountered in the message
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The resolved header name
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    /// All values joined in wire order
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Insertion-ordered header mapping
///
/// ```rust
/// use siptap_sip_core::types::HeaderMap;
///
/// let mut headers = HeaderMap::new();
/// headers.append("Via", "SIP/2.0/UDP a.example.com").unwrap();
/// headers.append("From", "<sip:alice@example.com>").unwrap();
/// headers.append("v", "SIP/2.0/UDP b.example.com").unwrap();
///
/// assert_eq!(headers.len(), 2);
/// assert_eq!(
///     headers.get("VIA"),
///     Some("SIP/2.0/UDP a.example.com SIP/2.0/UDP b.example.com")
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<HeaderEntry>,
}

impl HeaderMap {
    /// Creates an empty header map
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a header value, folding it into an existing entry for the same
    /// header. Fails only on an empty name.
    pub fn append(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_str(name)?;
        match self.position(&header_name) {
            Some(idx) => {
                let entry = &mut self.entries[idx];
                entry.value.push(' ');
                entry.value.push_str(value);
            }
            None => self.entries.push(HeaderEntry {
                key: name.to_string(),
                name: header_name,
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    /// Sets a header to exactly `value`, replacing any previous value but
    /// keeping the entry's position.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let header_name = HeaderName::from_str(name)?;
        match self.position(&header_name) {
            Some(idx) => self.entries[idx].value = value.to_string(),
            None => self.entries.push(HeaderEntry {
                key: name.to_string(),
                name: header_name,
                value: value.to_string(),
            }),
        }
        Ok(())
    }

    /// Looks up a header by any of its spellings
    pub fn get(&self, name: &str) -> Option<&str> {
        let header_name = HeaderName::from_str(name).ok()?;
        self.get_by_name(&header_name)
    }

    /// Looks up a header by resolved name
    pub fn get_by_name(&self, name: &HeaderName) -> Option<&str> {
        self.position(name).map(|idx| self.entries[idx].value.as_str())
    }

    /// True if the header is present
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Number of distinct headers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no header was recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, value)` pairs in first-appearance order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|e| (e.key.as_str(), e.value.as_str()))
    }

    /// Iterates the full entries in first-appearance order
    pub fn entries(&self) -> &[HeaderEntry] {
        &self.entries
    }

    fn position(&self, name: &HeaderName) -> Option<usize> {
        self.entries.iter().position(|e| e.name.same_as(name))
    }
}

impl Serialize for HeaderMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl fmt::Display for HeaderMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in self.iter() {
            write!(f, "{}: {}\r\n", key, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_header_joined_in_order() {
        let mut headers = HeaderMap::new();
        headers.append("Via", "A").unwrap();
        headers.append("To", "<sip:bob@example.com>").unwrap();
        headers.append("Via", "B").unwrap();
        headers.append("via", "C").unwrap();

        assert_eq!(headers.get("Via"), Some("A B C"));
        assert_eq!(headers.len(), 2);

        let keys: Vec<&str> = headers.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["Via", "To"]);
    }

    #[test]
    fn test_key_is_first_spelling() {
        let mut headers = HeaderMap::new();
        headers.append("f", "<sip:alice@example.com>;tag=1").unwrap();
        headers.append("From", "ignored-second").unwrap();

        assert_eq!(headers.entries()[0].key(), "f");
        assert_eq!(headers.entries()[0].name(), &HeaderName::From);
        assert_eq!(headers.get("FROM"), Some("<sip:alice@example.com>;tag=1 ignored-second"));
    }

    #[test]
    fn test_empty_values_retained() {
        let mut headers = HeaderMap::new();
        headers.append("Subject", "").unwrap();
        assert_eq!(headers.get("Subject"), Some(""));

        headers.append("Subject", "").unwrap();
        assert_eq!(headers.get("Subject"), Some(" "));
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut headers = HeaderMap::new();
        assert!(headers.append("", "value").is_err());
        assert!(headers.is_empty());
    }

    #[test]
    fn test_set_replaces_in_place() {
        let mut headers = HeaderMap::new();
        headers.append("A", "1").unwrap();
        headers.append("B", "2").unwrap();
        headers.set("a", "3").unwrap();
        headers.set("C", "4").unwrap();

        let pairs: Vec<(&str, &str)> = headers.iter().collect();
        assert_eq!(pairs, vec![("A", "3"), ("B", "2"), ("C", "4")]);
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let mut headers = HeaderMap::new();
        headers.append("Via", "A").unwrap();
        headers.append("Call-ID", "abc").unwrap();
        headers.append("Via", "B").unwrap();

        let json = serde_json::to_string(&headers).unwrap();
        assert_eq!(json, r#"{"Via":"A B","Call-ID":"abc"}"#);
    }
}
