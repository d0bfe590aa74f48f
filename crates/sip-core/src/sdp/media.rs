use nom::{
    bytes::complete::take_while1,
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, opt},
    multi::many0,
    sequence::{preceded, terminated, tuple},
    IResult,
};

/// Fields of an `m=` line value, borrowed from the body text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaLine<'a> {
    pub media: &'a str,
    pub port: &'a str,
    pub port_count: Option<&'a str>,
    pub protocol: &'a str,
    pub formats: Vec<&'a str>,
}

fn field(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !c.is_whitespace())(input)
}

// <port>[/<number of ports>]
fn port_and_count(input: &str) -> IResult<&str, (&str, Option<&str>)> {
    tuple((digit1, opt(preceded(char('/'), digit1))))(input)
}

/// m=<media> <port>[/<port-count>] <proto> <fmt> ...
///
/// `input` is the value after `m=`. Formats are optional here since some
/// endpoints send an `m=` line with a zero port and no formats when a stream
/// is rejected.
pub fn parse_media_line(input: &str) -> IResult<&str, MediaLine<'_>> {
    let (input, (media, (port, port_count), protocol, formats)) = all_consuming(tuple((
        terminated(field, space1),
        terminated(port_and_count, space1),
        field,
        terminated(many0(preceded(space1, field)), space0),
    )))(input)?;

    Ok((
        input,
        MediaLine {
            media,
            port,
            port_count,
            protocol,
            formats,
        },
    ))
}
