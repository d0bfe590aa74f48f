//! Decoded view of one captured SIP message.

use serde::Serialize;

use super::headers::HeaderMap;
use super::method::Method;
use super::sdp::SessionDescription;
use super::version::Version;

/// Request line or status line, whichever the message started with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StartLine {
    /// `METHOD SP Request-URI SP SIP-Version`
    Request {
        /// Request method
        method: Method,
        /// Request-URI, unparsed
        uri: String,
    },
    /// `SIP-Version SP Status-Code SP Reason-Phrase`
    Response {
        /// Three digit status code
        status_code: u16,
        /// Reason phrase, possibly empty
        reason: String,
    },
}

/// A decoded SIP message
///
/// Built once per datagram by [`crate::parse_message`] and never mutated
/// afterwards by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SipMessage {
    /// Request or status line
    pub start_line: StartLine,
    /// Protocol version from the start line
    pub version: Version,
    /// Headers in first-appearance order, repeated values joined
    pub headers: HeaderMap,
    /// Value of Content-Length, 0 when absent or unreadable
    pub declared_body_length: usize,
    /// Media description from the body, when there is one
    pub body: Option<SessionDescription>,
}

impl SipMessage {
    /// True for status-line messages
    pub fn is_response(&self) -> bool {
        matches!(self.start_line, StartLine::Response { .. })
    }

    /// Request method, `None` for responses
    pub fn method(&self) -> Option<&Method> {
        match &self.start_line {
            StartLine::Request { method, .. } => Some(method),
            StartLine::Response { .. } => None,
        }
    }

    /// Request-URI, `None` for responses
    pub fn request_uri(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Request { uri, .. } => Some(uri),
            StartLine::Response { .. } => None,
        }
    }

    /// Status code, `None` for requests
    pub fn status_code(&self) -> Option<u16> {
        match &self.start_line {
            StartLine::Response { status_code, .. } => Some(*status_code),
            StartLine::Request { .. } => None,
        }
    }

    /// Reason phrase, `None` for requests
    pub fn status_reason(&self) -> Option<&str> {
        match &self.start_line {
            StartLine::Response { reason, .. } => Some(reason),
            StartLine::Request { .. } => None,
        }
    }

    /// Synthetic `SDP*` header pairs, empty when the message had no media description
    pub fn to_sdp_headers(&self) -> Vec<(&'static str, &str)> {
        self.body
            .as_ref()
            .map(|sdp| sdp.synthetic_headers().to_vec())
            .unwrap_or_default()
    }
}
