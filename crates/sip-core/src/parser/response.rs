use std::str;

use nom::{
    character::complete::{digit1, space1},
    combinator::{all_consuming, map, map_res, opt, rest},
    sequence::{preceded, terminated, tuple},
};

use super::common::sip_version;
use super::whitespace::{trim_wsp, ParseResult};
use crate::error::{Error, Result};
use crate::types::Version;

/// Parser for SIP response status line (RFC 3261 Section 7.2)
///
/// ABNF Grammar:
/// Status-Line =  SIP-Version SP Status-Code SP Reason-Phrase CRLF
/// Status-Code =  3DIGIT
/// Reason-Phrase  =  *(reserved / unreserved / escaped / UTF8-NONASCII / UTF8-CONT / SP / HTAB)

// Status-Code = 3DIGIT, 100 through 699
pub fn status_code(input: &[u8]) -> ParseResult<u16> {
    map_res(
        digit1,
        |code_bytes: &[u8]| -> Result<u16> {
            if code_bytes.len() != 3 {
                return Err(Error::InvalidStatusCode(String::from_utf8_lossy(code_bytes).into_owned()));
            }
            let s = str::from_utf8(code_bytes)
                .map_err(|e| Error::InvalidStatusCode(e.to_string()))?;
            let code = s.parse::<u16>()
                .map_err(|e| Error::InvalidStatusCode(format!("{}: {}", s, e)))?;
            if !(100..=699).contains(&code) {
                return Err(Error::InvalidStatusCode(s.to_string()));
            }
            Ok(code)
        }
    )(input)
}

// Reason-Phrase: whatever is left of the line, surrounding whitespace trimmed
pub fn reason_phrase(input: &[u8]) -> ParseResult<&[u8]> {
    rest(input).map(|(rem, reason)| (rem, trim_wsp(reason)))
}

/// Status-Line without its terminator.
///
/// Captured traffic sometimes omits the reason phrase entirely
/// (`SIP/2.0 200`); that is accepted with an empty reason.
pub fn parse_status_line(input: &[u8]) -> ParseResult<(Version, u16, &[u8])> {
    all_consuming(tuple((
        terminated(sip_version, space1),
        status_code,
        map(opt(preceded(space1, reason_phrase)), |reason| reason.unwrap_or(&[])),
    )))(input)
}
