//! Record Builder
//!
//! Flattens a decoded message and its transport endpoints into the record
//! shipped to the collector. The JSON field names are those existing
//! collector dashboards query, so they are fixed.

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use siptap_capture::Datagram;
use siptap_sip_core::{HeaderMap, Method, SipMessage};

use crate::error::{Error, Result};

/// Request or response classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageType {
    Request,
    Response,
}

/// One record per forwarded SIP message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRecord {
    #[serde(rename = "DestIP")]
    pub dest_ip: String,
    #[serde(rename = "DestPort")]
    pub dest_port: String,
    #[serde(rename = "SrcIP")]
    pub src_ip: String,
    #[serde(rename = "SrcPort")]
    pub src_port: String,
    #[serde(rename = "Proto")]
    pub proto: String,
    /// Request method, empty for responses
    #[serde(rename = "Sipmethod")]
    pub sip_method: String,
    #[serde(rename = "Sipversion")]
    pub sip_version: String,
    /// Reason phrase, empty for requests
    #[serde(rename = "Rstatus")]
    pub response_status: String,
    /// Status code, 0 for requests
    #[serde(rename = "Rcode")]
    pub response_code: u16,
    #[serde(rename = "Msgtype")]
    pub message_type: MessageType,
    /// Decoded headers plus the synthetic `SDP*` keys
    #[serde(rename = "Sipheaders")]
    pub sip_headers: HeaderMap,
}

impl OutputRecord {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::from)
    }
}

/// Request methods that never produce a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuppressionSet {
    methods: HashSet<Method>,
}

impl Default for SuppressionSet {
    /// `{ACK}`
    fn default() -> Self {
        Self::new([Method::Ack])
    }
}

impl SuppressionSet {
    pub fn new(methods: impl IntoIterator<Item = Method>) -> Self {
        Self {
            methods: methods.into_iter().collect(),
        }
    }

    /// Forward every method
    pub fn none() -> Self {
        Self::new([])
    }

    /// Builds the set from configured method names. Names are upper-cased
    /// first, so `ack` suppresses `ACK`.
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let methods = names
            .iter()
            .map(|name| {
                let name = name.as_ref().trim().to_ascii_uppercase();
                Method::from_str(&name)
                    .map_err(|e| Error::config(format!("Invalid suppressed method {:?}: {}", name, e)))
            })
            .collect::<Result<HashSet<_>>>()?;
        Ok(Self { methods })
    }

    pub fn contains(&self, method: &Method) -> bool {
        self.methods.contains(method)
    }

    /// True for requests whose method is in the set. Responses are never
    /// suppressed.
    pub fn suppresses(&self, message: &SipMessage) -> bool {
        message.method().is_some_and(|m| self.contains(m))
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// Builds [`OutputRecord`]s, applying the suppression set
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    suppression: SuppressionSet,
}

impl RecordBuilder {
    pub fn new(suppression: SuppressionSet) -> Self {
        Self { suppression }
    }

    pub fn suppression(&self) -> &SuppressionSet {
        &self.suppression
    }

    /// `None` when the message's method is suppressed.
    ///
    /// Every decoded header is copied as is; when the message carried a
    /// media description its four synthetic keys are added after them.
    pub fn build(&self, datagram: &Datagram<'_>, message: &SipMessage) -> Option<OutputRecord> {
        if self.suppression.suppresses(message) {
            return None;
        }

        let mut sip_headers = message.headers.clone();
        for (key, value) in message.to_sdp_headers() {
            // Keys are non-empty constants, set cannot fail
            let _ = sip_headers.set(key, value);
        }

        let message_type = if message.is_response() {
            MessageType::Response
        } else {
            MessageType::Request
        };

        Some(OutputRecord {
            dest_ip: datagram.destination.address.to_string(),
            dest_port: datagram.destination.port.to_string(),
            src_ip: datagram.source.address.to_string(),
            src_port: datagram.source.port.to_string(),
            proto: datagram.protocol.to_string(),
            sip_method: message.method().map(|m| m.to_string()).unwrap_or_default(),
            sip_version: message.version.to_string(),
            response_status: message.status_reason().unwrap_or_default().to_string(),
            response_code: message.status_code().unwrap_or(0),
            message_type,
            sip_headers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use siptap_capture::TransportEndpoint;
    use siptap_sip_core::parse_message;

    fn datagram(payload: &[u8]) -> Datagram<'_> {
        Datagram {
            source: TransportEndpoint {
                address: "10.0.0.1".parse().unwrap(),
                port: 5062,
            },
            destination: TransportEndpoint {
                address: "10.0.0.2".parse().unwrap(),
                port: 5060,
            },
            protocol: "UDP",
            payload,
        }
    }

    #[test]
    fn test_request_record() {
        let payload = b"INVITE sip:bob@example.com SIP/2.0\r\nCall-ID: abc\r\nContent-Length: 0\r\n\r\n";
        let msg = parse_message(payload).unwrap();
        let record = RecordBuilder::default().build(&datagram(payload), &msg).unwrap();

        assert_eq!(record.message_type, MessageType::Request);
        assert_eq!(record.sip_method, "INVITE");
        assert_eq!(record.sip_version, "SIP/2.0");
        assert_eq!(record.response_status, "");
        assert_eq!(record.response_code, 0);
        assert_eq!(record.src_ip, "10.0.0.1");
        assert_eq!(record.src_port, "5062");
        assert_eq!(record.dest_ip, "10.0.0.2");
        assert_eq!(record.dest_port, "5060");
        assert_eq!(record.proto, "UDP");
        assert_eq!(record.sip_headers.get("Call-ID"), Some("abc"));
    }

    #[test]
    fn test_response_record() {
        let payload = b"SIP/2.0 486 Busy Here\r\nCSeq: 1 INVITE\r\n\r\n";
        let msg = parse_message(payload).unwrap();
        let record = RecordBuilder::default().build(&datagram(payload), &msg).unwrap();

        assert_eq!(record.message_type, MessageType::Response);
        assert_eq!(record.sip_method, "");
        assert_eq!(record.response_status, "Busy Here");
        assert_eq!(record.response_code, 486);
    }

    #[test]
    fn test_ack_suppressed_by_default() {
        let payload = b"ACK sip:bob@example.com SIP/2.0\r\nCSeq: 1 ACK\r\n\r\n";
        let msg = parse_message(payload).unwrap();
        assert!(RecordBuilder::default().build(&datagram(payload), &msg).is_none());

        let forward_all = RecordBuilder::new(SuppressionSet::none());
        assert!(forward_all.build(&datagram(payload), &msg).is_some());
    }

    #[test]
    fn test_sdp_keys_merged() {
        let body = "v=0\r\nm=audio 49170 RTP/AVP 0\r\n";
        let payload = format!(
            "INVITE sip:bob@example.com SIP/2.0\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );
        let msg = parse_message(payload.as_bytes()).unwrap();
        let record = RecordBuilder::default()
            .build(&datagram(payload.as_bytes()), &msg)
            .unwrap();

        assert_eq!(record.sip_headers.get("SDPMediaType"), Some("audio"));
        assert_eq!(record.sip_headers.get("SDPPort"), Some("49170"));
        assert_eq!(record.sip_headers.get("SDPProto"), Some("RTP/AVP"));
        assert_eq!(record.sip_headers.get("SDPMediaDesc"), Some("audio 49170 RTP/AVP 0"));
    }

    #[test]
    fn test_record_json_field_names() {
        let payload = b"OPTIONS sip:x SIP/2.0\r\nVia: A\r\nVia: B\r\n\r\n";
        let msg = parse_message(payload).unwrap();
        let record = RecordBuilder::default().build(&datagram(payload), &msg).unwrap();
        let json: serde_json::Value = serde_json::from_str(&record.to_json().unwrap()).unwrap();

        for field in [
            "DestIP", "DestPort", "SrcIP", "SrcPort", "Proto", "Sipmethod", "Sipversion",
            "Rstatus", "Rcode", "Msgtype", "Sipheaders",
        ] {
            assert!(json.get(field).is_some(), "missing {}", field);
        }
        assert_eq!(json["Msgtype"], "Request");
        assert_eq!(json["Rcode"], 0);
        assert_eq!(json["Sipheaders"]["Via"], "A B");
    }

    #[test]
    fn test_suppression_from_names() {
        let set = SuppressionSet::from_names(&["ack", " CANCEL "]).unwrap();
        assert!(set.contains(&Method::Ack));
        assert!(set.contains(&Method::Cancel));
        assert_eq!(set.len(), 2);

        assert!(SuppressionSet::from_names(&["bad method"]).is_err());
        assert!(SuppressionSet::from_names::<&str>(&[]).unwrap().is_empty());
    }
}
