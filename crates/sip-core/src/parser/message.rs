use tracing::trace;

use super::headers::header_line;
use super::request::parse_request_line;
use super::response::parse_status_line;
use super::utils::{logical_lines, skip_leading_line_endings, split_head_body};
use crate::error::{Error, Result};
use crate::sdp::parse_session_description;
use crate::types::{HeaderMap, HeaderName, SipMessage, StartLine, Version};

/// Decodes one SIP message from a UDP payload.
///
/// The payload is split at the first blank line. The first line decides
/// between status line and request line by whether its first token looks
/// like `SIP/x.y`. Header lines are unfolded and repeated headers are joined
/// in wire order. A positive Content-Length gates SDP parsing of the body;
/// an unreadable body leaves [`SipMessage::body`] empty without failing the
/// message.
///
/// When a datagram carries more bytes than Content-Length announces, only
/// the declared bytes are considered, so a second concatenated message is
/// ignored.
///
/// # Errors
///
/// Fails when there is no start line or it is neither a request line nor a
/// status line.
pub fn parse_message(input: &[u8]) -> Result<SipMessage> {
    let input = skip_leading_line_endings(input);
    let (head, rest) = split_head_body(input);

    let mut lines = logical_lines(head).into_iter();
    let first = lines.next().ok_or(Error::MissingStartLine)?;
    let (start_line, version) = parse_start_line(&first)?;

    let mut headers = HeaderMap::new();
    for line in lines {
        match header_line(&line) {
            Ok((_, (name, value))) => {
                let name = String::from_utf8_lossy(name);
                let value = String::from_utf8_lossy(value);
                headers.append(&name, &value)?;
            }
            Err(_) => {
                trace!("Skipping malformed header line: {:?}", String::from_utf8_lossy(&line));
            }
        }
    }

    let declared_body_length = content_length(&headers);
    let body = if declared_body_length > 0 {
        let declared = &rest[..declared_body_length.min(rest.len())];
        match parse_session_description(declared) {
            Ok(sdp) => Some(sdp),
            Err(e) => {
                trace!("No session description in body: {}", e);
                None
            }
        }
    } else {
        None
    };

    Ok(SipMessage {
        start_line,
        version,
        headers,
        declared_body_length,
        body,
    })
}

fn parse_start_line(line: &[u8]) -> Result<(StartLine, Version)> {
    let first_token = line.split(|&c| c == b' ' || c == b'\t').next().unwrap_or(line);

    if Version::is_version_token(first_token) {
        let (_, (version, status_code, reason)) = parse_status_line(line)
            .map_err(|_| invalid_start_line(line))?;
        let reason = String::from_utf8_lossy(reason).into_owned();
        Ok((StartLine::Response { status_code, reason }, version))
    } else {
        let (_, (method, uri, version)) = parse_request_line(line)
            .map_err(|_| invalid_start_line(line))?;
        let uri = String::from_utf8_lossy(uri).into_owned();
        Ok((StartLine::Request { method, uri }, version))
    }
}

fn invalid_start_line(line: &[u8]) -> Error {
    Error::InvalidStartLine(String::from_utf8_lossy(line).into_owned())
}

// Repeated Content-Length headers are joined by the map; the first value wins.
// Anything non-numeric counts as no body.
fn content_length(headers: &HeaderMap) -> usize {
    headers
        .get_by_name(&HeaderName::ContentLength)
        .and_then(|value| value.split_whitespace().next())
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;

    const INVITE_NO_BODY: &[u8] = b"INVITE sip:bob@example.com SIP/2.0\r\n\
Via: SIP/2.0/UDP pc33.atlanta.com;branch=z9hG4bK776asdhds\r\n\
From: Alice <sip:alice@atlanta.com>;tag=1928301774\r\n\
To: Bob <sip:bob@example.com>\r\n\
Call-ID: a84b4c76e66710@pc33.atlanta.com\r\n\
Content-Length: 0\r\n\r\n";

    #[test]
    fn test_parse_invite_without_body() {
        let msg = parse_message(INVITE_NO_BODY).unwrap();
        assert!(!msg.is_response());
        assert_eq!(msg.method(), Some(&Method::Invite));
        assert_eq!(msg.request_uri(), Some("sip:bob@example.com"));
        assert_eq!(msg.version, Version::sip_2_0());
        assert_eq!(msg.headers.len(), 5);
        assert_eq!(msg.headers.get("Content-Length"), Some("0"));
        assert_eq!(msg.declared_body_length, 0);
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_response() {
        let msg = parse_message(b"SIP/2.0 180 Ringing\r\nCSeq: 1 INVITE\r\n\r\n").unwrap();
        assert!(msg.is_response());
        assert_eq!(msg.status_code(), Some(180));
        assert_eq!(msg.status_reason(), Some("Ringing"));
        assert!(msg.method().is_none());
    }

    #[test]
    fn test_content_length_case_insensitive_and_compact() {
        let msg = parse_message(b"BYE sip:x SIP/2.0\r\ncontent-length: 12\r\n\r\n").unwrap();
        assert_eq!(msg.declared_body_length, 12);

        let msg = parse_message(b"BYE sip:x SIP/2.0\r\nl: 7\r\n\r\n").unwrap();
        assert_eq!(msg.declared_body_length, 7);
    }

    #[test]
    fn test_non_numeric_content_length_is_zero() {
        let msg = parse_message(b"BYE sip:x SIP/2.0\r\nContent-Length: lots\r\n\r\nm=audio 1 RTP/AVP 0").unwrap();
        assert_eq!(msg.declared_body_length, 0);
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_leading_keepalive_skipped() {
        let msg = parse_message(b"\r\n\r\nOPTIONS sip:x SIP/2.0\r\n\r\n").unwrap();
        assert_eq!(msg.method(), Some(&Method::Options));
    }

    #[test]
    fn test_malformed_start_lines() {
        assert_eq!(parse_message(b""), Err(Error::MissingStartLine));
        assert_eq!(parse_message(b"\r\n\r\n"), Err(Error::MissingStartLine));
        assert!(matches!(parse_message(b"INVITE sip:bob"), Err(Error::InvalidStartLine(_))));
        assert!(matches!(parse_message(b"SIP/2.0 OK\r\n\r\n"), Err(Error::InvalidStartLine(_))));
        assert!(matches!(parse_message(b"HTTP/1.1 200 OK\r\n\r\n"), Err(Error::InvalidStartLine(_))));
    }

    #[test]
    fn test_malformed_header_lines_skipped() {
        let msg = parse_message(b"BYE sip:x SIP/2.0\r\nthis is not a header\r\nTo: bob\r\n\r\n").unwrap();
        assert_eq!(msg.headers.len(), 1);
        assert_eq!(msg.headers.get("To"), Some("bob"));
    }
}
