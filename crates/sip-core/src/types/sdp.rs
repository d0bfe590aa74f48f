use serde::{Deserialize, Serialize};

/// Synthetic header key carrying the media type of the first `m=` line
pub const SDP_MEDIA_TYPE_KEY: &str = "SDPMediaType";
/// Synthetic header key carrying the media port
pub const SDP_PORT_KEY: &str = "SDPPort";
/// Synthetic header key carrying the full media line value
pub const SDP_MEDIA_DESC_KEY: &str = "SDPMediaDesc";
/// Synthetic header key carrying the media transport protocol
pub const SDP_PROTO_KEY: &str = "SDPProto";

/// The subset of an SDP body the tap reports: the first media description.
///
/// Values are kept as the text seen on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionDescription {
    /// Media type, e.g. `audio`
    pub media_type: String,
    /// Media port, without any `/count` suffix
    pub media_port: String,
    /// The whole `m=` value, e.g. `audio 49170 RTP/AVP 0`
    pub media_descriptor: String,
    /// Transport protocol, e.g. `RTP/AVP`
    pub media_protocol: String,
}

impl SessionDescription {
    /// The four synthetic `(key, value)` pairs merged into a record's headers
    pub fn synthetic_headers(&self) -> [(&'static str, &str); 4] {
        [
            (SDP_MEDIA_TYPE_KEY, self.media_type.as_str()),
            (SDP_PORT_KEY, self.media_port.as_str()),
            (SDP_MEDIA_DESC_KEY, self.media_descriptor.as_str()),
            (SDP_PROTO_KEY, self.media_protocol.as_str()),
        ]
    }
}
