use std::str::{self, FromStr};

use nom::{
    bytes::complete::{take_till1, take_while1},
    combinator::map_res,
};

use super::whitespace::{is_wsp, ParseResult};
use crate::error::Error;
use crate::types::method::is_token_char;
use crate::types::Version;

/// token = 1*(alphanum / "-" / "." / "!" / "%" / "*" / "_" / "+" / "`" / "'" / "~")
pub fn token(input: &[u8]) -> ParseResult<&[u8]> {
    take_while1(is_token_char)(input)
}

/// SIP-Version = "SIP" "/" 1*DIGIT "." 1*DIGIT
pub fn sip_version(input: &[u8]) -> ParseResult<Version> {
    map_res(take_till1(is_wsp), |bytes: &[u8]| -> Result<Version, Error> {
        let s = str::from_utf8(bytes).map_err(|_| Error::InvalidVersion(String::from_utf8_lossy(bytes).into_owned()))?;
        Version::from_str(s)
    })(input)
}
