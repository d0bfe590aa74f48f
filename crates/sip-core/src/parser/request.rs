use std::str::{self, FromStr};

use nom::{
    bytes::complete::take_till1,
    character::complete::{space0, space1},
    combinator::{all_consuming, map_res},
    sequence::{terminated, tuple},
};

use super::common::{sip_version, token};
use super::whitespace::{is_wsp, ParseResult};
use crate::error::Error;
use crate::types::{Method, Version};

/// Method = INVITEm / ACKm / OPTIONSm / BYEm / CANCELm / REGISTERm / extension-method
pub fn method(input: &[u8]) -> ParseResult<Method> {
    map_res(token, |bytes: &[u8]| -> Result<Method, Error> {
        let s = str::from_utf8(bytes).map_err(|_| Error::InvalidMethod(String::from_utf8_lossy(bytes).into_owned()))?;
        Method::from_str(s)
    })(input)
}

/// Request-URI, left unparsed: everything up to the next whitespace
pub fn request_uri(input: &[u8]) -> ParseResult<&[u8]> {
    take_till1(is_wsp)(input)
}

/// Request-Line = Method SP Request-URI SP SIP-Version
///
/// `input` is the line without its terminator. Trailing whitespace is
/// tolerated.
pub fn parse_request_line(input: &[u8]) -> ParseResult<(Method, &[u8], Version)> {
    all_consuming(tuple((
        terminated(method, space1),
        terminated(request_uri, space1),
        terminated(sip_version, space0),
    )))(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request_line() {
        let (rem, (method, uri, version)) =
            parse_request_line(b"INVITE sip:bob@example.com SIP/2.0").unwrap();
        assert!(rem.is_empty());
        assert_eq!(method, Method::Invite);
        assert_eq!(uri, b"sip:bob@example.com");
        assert_eq!(version, Version::sip_2_0());
    }

    #[test]
    fn test_parse_request_line_extension_method() {
        let (_, (method, _, _)) = parse_request_line(b"PING sip:host SIP/2.0 ").unwrap();
        assert_eq!(method, Method::Extension("PING".to_string()));
    }

    #[test]
    fn test_parse_request_line_invalid() {
        // Missing version
        assert!(parse_request_line(b"INVITE sip:bob@example.com").is_err());
        // Wrong protocol
        assert!(parse_request_line(b"GET / HTTP/1.1").is_err());
        // Extra token
        assert!(parse_request_line(b"INVITE sip:bob SIP/2.0 junk").is_err());
        // Missing separator
        assert!(parse_request_line(b"INVITEsip:bob SIP/2.0").is_err());
        assert!(parse_request_line(b"").is_err());
    }
}
