//! # SIP Methods
//!
//! Request methods as they appear on the request line
//! ([RFC 3261 Section 7.1](https://datatracker.ietf.org/doc/html/rfc3261#section-7.1)).
//! Method names are case-sensitive, so `invite` is an extension method and
//! not [`Method::Invite`].
//!
//! ```rust
//! use siptap_sip_core::types::Method;
//! use std::str::FromStr;
//!
//! let method = Method::from_str("INVITE").unwrap();
//! assert_eq!(method, Method::Invite);
//! assert_eq!(method.to_string(), "INVITE");
//!
//! let custom = Method::from_str("PING").unwrap();
//! assert_eq!(custom, Method::Extension("PING".to_string()));
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SIP request method
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Method {
    /// INVITE: initiate a session
    Invite,
    /// ACK: confirm a final response to INVITE
    Ack,
    /// BYE: terminate a session
    Bye,
    /// CANCEL: cancel a pending request
    Cancel,
    /// OPTIONS: query capabilities
    Options,
    /// REGISTER: bind a contact to an address-of-record
    Register,
    /// PRACK: provisional response acknowledgement (RFC 3262)
    Prack,
    /// SUBSCRIBE: request event notification (RFC 6665)
    Subscribe,
    /// NOTIFY: deliver an event notification (RFC 6665)
    Notify,
    /// PUBLISH: publish event state (RFC 3903)
    Publish,
    /// INFO: mid-session information (RFC 6086)
    Info,
    /// REFER: ask the recipient to issue a request (RFC 3515)
    Refer,
    /// MESSAGE: instant message (RFC 3428)
    Message,
    /// UPDATE: modify session state before the final response (RFC 3311)
    Update,
    /// Any other method token
    Extension(String),
}

impl Method {
    /// Returns the wire token of this method
    pub fn as_str(&self) -> &str {
        match self {
            Method::Invite => "INVITE",
            Method::Ack => "ACK",
            Method::Bye => "BYE",
            Method::Cancel => "CANCEL",
            Method::Options => "OPTIONS",
            Method::Register => "REGISTER",
            Method::Prack => "PRACK",
            Method::Subscribe => "SUBSCRIBE",
            Method::Notify => "NOTIFY",
            Method::Publish => "PUBLISH",
            Method::Info => "INFO",
            Method::Refer => "REFER",
            Method::Message => "MESSAGE",
            Method::Update => "UPDATE",
            Method::Extension(token) => token,
        }
    }
}

/// RFC 3261 `token` characters
pub(crate) fn is_token_char(c: u8) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(c, b'-' | b'.' | b'!' | b'%' | b'*' | b'_' | b'+' | b'`' | b'\'' | b'~')
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || !s.bytes().all(is_token_char) {
            return Err(Error::InvalidMethod(s.to_string()));
        }

        Ok(match s {
            "INVITE" => Method::Invite,
            "ACK" => Method::Ack,
            "BYE" => Method::Bye,
            "CANCEL" => Method::Cancel,
            "OPTIONS" => Method::Options,
            "REGISTER" => Method::Register,
            "PRACK" => Method::Prack,
            "SUBSCRIBE" => Method::Subscribe,
            "NOTIFY" => Method::Notify,
            "PUBLISH" => Method::Publish,
            "INFO" => Method::Info,
            "REFER" => Method::Refer,
            "MESSAGE" => Method::Message,
            "UPDATE" => Method::Update,
            other => Method::Extension(other.to_string()),
        })
    }
}

impl TryFrom<String> for Method {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Method::from_str(&value)
    }
}

impl From<Method> for String {
    fn from(method: Method) -> Self {
        method.as_str().to_string()
    }
}
