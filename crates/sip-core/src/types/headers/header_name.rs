use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize};

/// SIP header names known to the decoder
///
/// Header names are case-insensitive in SIP and several headers have a
/// compact single-letter form (RFC 3261 Section 7.3.3). Two spellings that
/// resolve to the same `HeaderName` refer to the same header, which is what
/// the decoder uses to fold repeated headers into one entry.
///
/// # Examples
///
/// ```rust
/// use siptap_sip_core::types::HeaderName;
/// use std::str::FromStr;
///
/// assert_eq!(HeaderName::from_str("v").unwrap(), HeaderName::Via);
/// assert_eq!(HeaderName::from_str("CONTENT-LENGTH").unwrap(), HeaderName::ContentLength);
/// assert_eq!(HeaderName::Via.as_str(), "Via");
///
/// let custom = HeaderName::from_str("X-Custom-Header").unwrap();
/// assert!(custom.same_as(&HeaderName::from_str("x-custom-header").unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeaderName {
    /// Call-ID: Unique identifier for this call
    CallId,
    /// Contact: Where subsequent requests should be sent
    Contact,
    /// Content-Length: Size of the message body
    ContentLength,
    /// Content-Type: Media type of the message body
    ContentType,
    /// Content-Encoding: Content encoding of the message body
    ContentEncoding,
    /// CSeq: Command sequence number
    CSeq,
    /// From: Initiator of the request
    From,
    /// To: Logical recipient of the request
    To,
    /// Via: Path taken by the request so far
    Via,
    /// Max-Forwards: Limit on the number of proxies or gateways
    MaxForwards,
    /// Allow: Methods supported by the UA
    Allow,
    /// Supported: Features supported by the UA
    Supported,
    /// Require: Required capabilities for the request
    Require,
    /// Record-Route: Record of proxies that want to stay in the path
    RecordRoute,
    /// Route: Forced route for a request
    Route,
    /// User-Agent: Product information
    UserAgent,
    /// Server: Server product information
    Server,
    /// Subject: Subject of the call
    Subject,
    /// Event: Event package for SUBSCRIBE/NOTIFY
    Event,
    /// Refer-To: Target URI in REFER
    ReferTo,
    /// Referred-By: Identity of referrer in REFER
    ReferredBy,
    /// Session-Expires: Session timer interval (RFC 4028)
    SessionExpires,
    /// Expires: Expiration time for registration or subscription
    Expires,
    /// Authorization: Credentials provided by a UA
    Authorization,
    /// WWW-Authenticate: Challenge for authentication
    WwwAuthenticate,
    /// Proxy-Authenticate: Challenge for proxy authentication
    ProxyAuthenticate,
    /// Proxy-Authorization: Credentials for proxy authentication
    ProxyAuthorization,
    /// Unsupported: Features not supported by the UA
    Unsupported,
    /// Allow-Events: Event packages supported (RFC 6665)
    AllowEvents,
    /// Accept-Contact: Caller preferences (RFC 3841)
    AcceptContact,
    /// Reject-Contact: Caller preferences (RFC 3841)
    RejectContact,
    /// Request-Disposition: Proxy handling preferences (RFC 3841)
    RequestDisposition,
    /// Identity: Authenticated identity signature (RFC 4474)
    Identity,
    /// Identity-Info: Certificate reference for Identity (RFC 4474)
    IdentityInfo,
    /// Custom header name, kept as spelled
    Other(String),
}

impl HeaderName {
    /// Returns the canonical name of the header
    pub fn as_str(&self) -> &str {
        match self {
            HeaderName::CallId => "Call-ID",
            HeaderName::Contact => "Contact",
            HeaderName::ContentLength => "Content-Length",
            HeaderName::ContentType => "Content-Type",
            HeaderName::ContentEncoding => "Content-Encoding",
            HeaderName::CSeq => "CSeq",
            HeaderName::From => "From",
            HeaderName::To => "To",
            HeaderName::Via => "Via",
            HeaderName::MaxForwards => "Max-Forwards",
            HeaderName::Allow => "Allow",
            HeaderName::Supported => "Supported",
            HeaderName::Require => "Require",
            HeaderName::RecordRoute => "Record-Route",
            HeaderName::Route => "Route",
            HeaderName::UserAgent => "User-Agent",
            HeaderName::Server => "Server",
            HeaderName::Subject => "Subject",
            HeaderName::Event => "Event",
            HeaderName::ReferTo => "Refer-To",
            HeaderName::ReferredBy => "Referred-By",
            HeaderName::SessionExpires => "Session-Expires",
            HeaderName::Expires => "Expires",
            HeaderName::Authorization => "Authorization",
            HeaderName::WwwAuthenticate => "WWW-Authenticate",
            HeaderName::ProxyAuthenticate => "Proxy-Authenticate",
            HeaderName::ProxyAuthorization => "Proxy-Authorization",
            HeaderName::Unsupported => "Unsupported",
            HeaderName::AllowEvents => "Allow-Events",
            HeaderName::AcceptContact => "Accept-Contact",
            HeaderName::RejectContact => "Reject-Contact",
            HeaderName::RequestDisposition => "Request-Disposition",
            HeaderName::Identity => "Identity",
            HeaderName::IdentityInfo => "Identity-Info",
            HeaderName::Other(s) => s,
        }
    }

    /// True when both names denote the same header.
    ///
    /// Extension names compare case-insensitively.
    pub fn same_as(&self, other: &HeaderName) -> bool {
        match (self, other) {
            (HeaderName::Other(a), HeaderName::Other(b)) => a.eq_ignore_ascii_case(b),
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for HeaderName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HeaderName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(Error::InvalidHeader("Empty header name is not allowed".to_string()));
        }

        let lower_s = s.to_ascii_lowercase();
        match lower_s.as_str() {
            "call-id" | "i" => Ok(HeaderName::CallId),
            "contact" | "m" => Ok(HeaderName::Contact),
            "content-length" | "l" => Ok(HeaderName::ContentLength),
            "content-type" | "c" => Ok(HeaderName::ContentType),
            "content-encoding" | "e" => Ok(HeaderName::ContentEncoding),
            "cseq" => Ok(HeaderName::CSeq),
            "from" | "f" => Ok(HeaderName::From),
            "to" | "t" => Ok(HeaderName::To),
            "via" | "v" => Ok(HeaderName::Via),
            "max-forwards" => Ok(HeaderName::MaxForwards),
            "allow" => Ok(HeaderName::Allow),
            "supported" | "k" => Ok(HeaderName::Supported),
            "require" => Ok(HeaderName::Require),
            "record-route" => Ok(HeaderName::RecordRoute),
            "route" => Ok(HeaderName::Route),
            "user-agent" => Ok(HeaderName::UserAgent),
            "server" => Ok(HeaderName::Server),
            "subject" | "s" => Ok(HeaderName::Subject),
            "event" | "o" => Ok(HeaderName::Event),
            "refer-to" | "r" => Ok(HeaderName::ReferTo),
            "referred-by" | "b" => Ok(HeaderName::ReferredBy),
            "session-expires" | "x" => Ok(HeaderName::SessionExpires),
            "expires" => Ok(HeaderName::Expires),
            "authorization" => Ok(HeaderName::Authorization),
            "www-authenticate" => Ok(HeaderName::WwwAuthenticate),
            "proxy-authenticate" => Ok(HeaderName::ProxyAuthenticate),
            "proxy-authorization" => Ok(HeaderName::ProxyAuthorization),
            "unsupported" => Ok(HeaderName::Unsupported),
            "allow-events" | "u" => Ok(HeaderName::AllowEvents),
            "accept-contact" | "a" => Ok(HeaderName::AcceptContact),
            "reject-contact" | "j" => Ok(HeaderName::RejectContact),
            "request-disposition" | "d" => Ok(HeaderName::RequestDisposition),
            "identity" | "y" => Ok(HeaderName::Identity),
            "identity-info" | "n" => Ok(HeaderName::IdentityInfo),
            _ => Ok(HeaderName::Other(s.to_string())),
        }
    }
}
