//! SDP line splitting
//!
//! Every SDP line has the form `<type>=<value>` where type is a single
//! character (RFC 8866 §5). Only the `m=` lines matter to the tap, but the
//! whole body is walked line by line so that unrelated or damaged lines are
//! simply passed over.

use nom::{
    character::complete::{anychar, char, not_line_ending},
    IResult,
};

/// Parse one SDP line into its type character and trimmed value.
///
/// Accepts CRLF and bare LF terminators.
///
/// ```
/// use siptap_sip_core::sdp::parse_sdp_line;
///
/// let (_, (key, value)) = parse_sdp_line("m=audio 49170 RTP/AVP 0\r\n").unwrap();
/// assert_eq!(key, 'm');
/// assert_eq!(value, "audio 49170 RTP/AVP 0");
/// ```
pub fn parse_sdp_line(input: &str) -> IResult<&str, (char, &str)> {
    let (input, key) = anychar(input)?;
    let (input, _) = char('=')(input)?;
    let (input, value) = not_line_ending(input)?;

    let input = input.trim_start_matches(['\r', '\n']);

    Ok((input, (key, value.trim())))
}

/// Iterate the well-formed `<type>=<value>` lines of a body in order.
pub fn sdp_lines(body: &str) -> impl Iterator<Item = (char, &str)> {
    body.lines()
        .filter_map(|line| parse_sdp_line(line).ok().map(|(_, kv)| kv))
}
