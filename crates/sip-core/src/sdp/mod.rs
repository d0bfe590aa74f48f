//! Session description (SDP) subset
//!
//! The tap only reports the first media description of a body. This module
//! locates the first `m=` line and lifts its media type, port, transport
//! protocol and full value into a [`SessionDescription`].

mod line_parser;
mod media;

pub use line_parser::{parse_sdp_line, sdp_lines};
pub use media::{parse_media_line, MediaLine};

use std::str;

use crate::error::{Error, Result};
use crate::types::SessionDescription;

/// Read the first media description out of a message body.
///
/// # Errors
///
/// [`Error::SdpParsingError`] when the body is not UTF-8, has no `m=` line,
/// or its first `m=` line is malformed. Later `m=` lines are never consulted.
pub fn parse_session_description(body: &[u8]) -> Result<SessionDescription> {
    let text = str::from_utf8(body)
        .map_err(|e| Error::SdpParsingError(format!("Body is not UTF-8: {}", e)))?;

    let (_, value) = sdp_lines(text)
        .find(|(key, _)| *key == 'm')
        .ok_or_else(|| Error::SdpParsingError("No media description".to_string()))?;

    let (_, media) = parse_media_line(value)
        .map_err(|_| Error::SdpParsingError(format!("Invalid m= line format: {}", value)))?;

    Ok(SessionDescription {
        media_type: media.media.to_string(),
        media_port: media.port.to_string(),
        media_descriptor: value.to_string(),
        media_protocol: media.protocol.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const OFFER: &str = "v=0\r\n\
o=alice 2890844526 2890844526 IN IP4 atlanta.com\r\n\
s=-\r\n\
c=IN IP4 192.0.2.101\r\n\
t=0 0\r\n\
m=audio 49170 RTP/AVP 0\r\n\
a=rtpmap:0 PCMU/8000\r\n\
m=video 51372 RTP/AVP 31\r\n";

    #[test]
    fn test_first_media_line_wins() {
        let sdp = parse_session_description(OFFER.as_bytes()).unwrap();
        assert_eq!(sdp.media_type, "audio");
        assert_eq!(sdp.media_port, "49170");
        assert_eq!(sdp.media_protocol, "RTP/AVP");
        assert_eq!(sdp.media_descriptor, "audio 49170 RTP/AVP 0");
    }

    #[test]
    fn test_port_count_dropped_from_port() {
        let sdp = parse_session_description(b"m=audio 49170/2 RTP/AVP 0 8\n").unwrap();
        assert_eq!(sdp.media_port, "49170");
        assert_eq!(sdp.media_descriptor, "audio 49170/2 RTP/AVP 0 8");
    }

    #[test]
    fn test_no_media_line() {
        let err = parse_session_description(b"v=0\r\ns=-\r\n").unwrap_err();
        assert!(matches!(err, Error::SdpParsingError(_)));
    }

    #[test]
    fn test_malformed_media_line() {
        assert!(parse_session_description(b"m=audio\r\n").is_err());
    }

    #[test]
    fn test_non_utf8_body() {
        assert!(parse_session_description(&[b'm', b'=', 0xff, 0xfe]).is_err());
    }
}
