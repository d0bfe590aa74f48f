use nom::{
    branch::alt,
    bytes::complete::tag,
    combinator::recognize,
    multi::many0,
    IResult,
};

// Type alias for parser result
pub type ParseResult<'a, O> = IResult<&'a [u8], O>;

/// Parses a single whitespace character (SP or HTAB)
pub fn wsp(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(alt((tag(b" "), tag(b"\t"))))(input)
}

/// Parses optional whitespace (0 or more SP or HTAB)
pub fn owsp(input: &[u8]) -> ParseResult<&[u8]> {
    recognize(many0(wsp))(input)
}

/// True for SP and HTAB
pub fn is_wsp(c: u8) -> bool {
    c == b' ' || c == b'\t'
}

/// Strips leading and trailing SP/HTAB (and a stray CR at the end)
pub fn trim_wsp(input: &[u8]) -> &[u8] {
    let start = input.iter().position(|&c| !is_wsp(c)).unwrap_or(input.len());
    let end = input
        .iter()
        .rposition(|&c| !is_wsp(c) && c != b'\r')
        .map_or(start, |i| i + 1);
    if start >= end {
        &input[..0]
    } else {
        &input[start..end]
    }
}
