pub mod header_map;
pub mod header_name;

pub use header_map::{HeaderEntry, HeaderMap};
pub use header_name::HeaderName;
