//! nom parsers for the pieces of a SIP message
//!
//! Everything works on `&[u8]`: captured payloads are not guaranteed to be
//! UTF-8 and are only converted (lossily) once a value is stored.

pub mod common;
pub mod headers;
pub mod message;
pub mod request;
pub mod response;
pub mod utils;
pub mod whitespace;

pub use message::parse_message;
pub use whitespace::ParseResult;
