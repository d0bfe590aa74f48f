//! # siptap-sip-core
//!
//! Decoding of captured SIP messages for the siptap telemetry tap.
//!
//! A UDP payload is turned into a [`SipMessage`]: the start line (request or
//! status), the protocol version, the header block with repeated headers
//! joined in wire order, the declared body length and, when the body carries
//! one, the first SDP media description.
//!
//! The crate never performs I/O and keeps no state between calls, so one
//! payload can be decoded on any thread independently of every other.
//!
//! ## Example
//!
//! ```
//! use siptap_sip_core::prelude::*;
//!
//! let payload = b"INVITE sip:bob@example.com SIP/2.0\r\n\
//! Via: SIP/2.0/UDP pc33.atlanta.com\r\n\
//! Content-Length: 0\r\n\r\n";
//!
//! let msg = parse_message(payload).unwrap();
//! assert_eq!(msg.method(), Some(&Method::Invite));
//! assert_eq!(msg.version.to_string(), "SIP/2.0");
//! assert_eq!(msg.headers.get("via"), Some("SIP/2.0/UDP pc33.atlanta.com"));
//! ```

pub mod error;
pub mod parser;
pub mod sdp;
pub mod types;

pub use error::{Error, Result};
pub use parser::parse_message;
pub use sdp::parse_session_description;
pub use types::{
    HeaderEntry, HeaderMap, HeaderName, Method, SessionDescription, SipMessage, StartLine,
    Version,
};

/// Re-exports of the types most callers need
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::parser::parse_message;
    pub use crate::types::sdp::{
        SDP_MEDIA_DESC_KEY, SDP_MEDIA_TYPE_KEY, SDP_PORT_KEY, SDP_PROTO_KEY,
    };
    pub use crate::types::{HeaderMap, HeaderName, Method, SessionDescription, SipMessage, StartLine, Version};
}
