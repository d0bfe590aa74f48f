//! SIP message types produced by the decoder

pub mod headers;
pub mod message;
pub mod method;
pub mod sdp;
pub mod version;

pub use headers::{HeaderEntry, HeaderMap, HeaderName};
pub use message::{SipMessage, StartLine};
pub use method::Method;
pub use sdp::SessionDescription;
pub use version::Version;
