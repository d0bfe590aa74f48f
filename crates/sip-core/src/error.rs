use thiserror::Error;

/// A type alias for handling `Result`s with `Error`
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while decoding a captured SIP message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The payload carried no start line at all
    #[error("Missing start line")]
    MissingStartLine,

    /// The first line is neither a request line nor a status line
    #[error("Invalid start line: {0}")]
    InvalidStartLine(String),

    /// Invalid SIP method token
    #[error("Invalid SIP method: {0}")]
    InvalidMethod(String),

    /// Invalid SIP version
    #[error("Invalid SIP version: {0}")]
    InvalidVersion(String),

    /// Invalid status code
    #[error("Invalid status code: {0}")]
    InvalidStatusCode(String),

    /// Invalid SIP header syntax
    #[error("Invalid SIP header: {0}")]
    InvalidHeader(String),

    /// The body could not be read as a session description
    #[error("SDP parsing error: {0}")]
    SdpParsingError(String),

    /// Parser error
    #[error("Parser error: {0}")]
    Parser(String),
}

impl From<nom::Err<nom::error::Error<&[u8]>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&[u8]>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::Parser("Incomplete input".to_string()),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parser(format!(
                "Parsing failed at {:?}: {}",
                e.code,
                String::from_utf8_lossy(e.input)
            )),
        }
    }
}

impl From<nom::Err<nom::error::Error<&str>>> for Error {
    fn from(err: nom::Err<nom::error::Error<&str>>) -> Self {
        Error::Parser(format!("Parsing failed: {err}"))
    }
}
