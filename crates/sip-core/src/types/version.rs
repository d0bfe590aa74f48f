use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// SIP protocol version, as defined in RFC 3261.
///
/// The current version is "SIP/2.0".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Version {
    /// Major version (currently 2)
    pub major: u8,
    /// Minor version (currently 0)
    pub minor: u8,
}

impl Version {
    /// Create a new SIP version with the given major and minor versions.
    pub fn new(major: u8, minor: u8) -> Self {
        Version { major, minor }
    }

    /// Creates a SIP version with the standard version (2.0)
    pub fn sip_2_0() -> Self {
        Version { major: 2, minor: 0 }
    }

    /// Returns true if `token` has the `SIP/<digits>.<digits>` shape.
    ///
    /// Used to tell a status line from a request line by its first token.
    pub fn is_version_token(token: &[u8]) -> bool {
        if token.len() < 7 || !token[..4].eq_ignore_ascii_case(b"SIP/") {
            return false;
        }
        let rest = &token[4..];
        match rest.iter().position(|&b| b == b'.') {
            Some(dot) => {
                let (major, minor) = (&rest[..dot], &rest[dot + 1..]);
                !major.is_empty()
                    && !minor.is_empty()
                    && major.iter().all(u8::is_ascii_digit)
                    && minor.iter().all(u8::is_ascii_digit)
            }
            None => false,
        }
    }
}

impl Default for Version {
    fn default() -> Self {
        Version::sip_2_0()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SIP/{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if !Version::is_version_token(s.as_bytes()) {
            return Err(Error::InvalidVersion(s.to_string()));
        }

        // Shape already checked, only overflow can fail from here on
        let (major, minor) = s[4..]
            .split_once('.')
            .ok_or_else(|| Error::InvalidVersion(s.to_string()))?;
        let major = major
            .parse::<u8>()
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;
        let minor = minor
            .parse::<u8>()
            .map_err(|_| Error::InvalidVersion(s.to_string()))?;

        Ok(Version::new(major, minor))
    }
}
