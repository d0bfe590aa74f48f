use nom::{
    character::complete::char,
    combinator::rest,
    sequence::{terminated, tuple},
};

use super::common::token;
use super::whitespace::{owsp, trim_wsp, ParseResult};

/// message-header = header-name HCOLON header-value
///
/// HCOLON = *( SP / HTAB ) ":" SWS. The line must already be unfolded. The
/// returned value is trimmed and may be empty.
pub fn header_line(input: &[u8]) -> ParseResult<(&[u8], &[u8])> {
    let (input, (name, _)) = tuple((terminated(token, owsp), char(':')))(input)?;
    let (input, value) = rest(input)?;
    Ok((input, (name, trim_wsp(value))))
}
