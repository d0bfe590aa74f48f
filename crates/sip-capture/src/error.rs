//! Error types for frame capture and demultiplexing

use thiserror::Error;

/// Result type alias for capture operations
pub type Result<T> = std::result::Result<T, CaptureError>;

/// Failures of the capture facility itself
///
/// Opening failures are fatal for the process: there is no pipeline without a
/// frame source.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// The capture device could not be opened
    #[error("Failed to open capture device {device}: {reason}")]
    OpenDevice { device: String, reason: String },

    /// The capture filter was rejected
    #[error("Invalid capture filter {filter:?}: {reason}")]
    InvalidFilter { filter: String, reason: String },

    /// The capture file could not be opened
    #[error("Failed to open capture file {path}: {reason}")]
    OpenFile { path: String, reason: String },

    /// Reading the next frame failed
    #[error("Capture read failed: {reason}")]
    Read { reason: String },

    /// The source was already closed
    #[error("Capture source is closed")]
    Closed,

    /// Enumerating capture devices failed
    #[error("Failed to list capture devices: {reason}")]
    DeviceList { reason: String },
}

impl CaptureError {
    pub fn open_device(device: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::OpenDevice {
            device: device.into(),
            reason: err.to_string(),
        }
    }

    pub fn invalid_filter(filter: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::InvalidFilter {
            filter: filter.into(),
            reason: err.to_string(),
        }
    }
}

/// Reasons a frame yields no UDP datagram
///
/// Expected under live traffic; the frame is dropped and nothing propagates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DemuxError {
    /// The link layer is not one the demultiplexer understands
    #[error("Unsupported link type {link_type}")]
    UnsupportedLink { link_type: i32 },

    /// Headers ended before they were complete
    #[error("Malformed frame: {reason}")]
    Malformed { reason: String },

    /// No IPv4 or IPv6 layer
    #[error("Frame carries no IP packet")]
    NotIp,

    /// IP payload is a fragment; no reassembly is done
    #[error("Fragmented IP packet")]
    Fragmented,

    /// The transport is something other than UDP
    #[error("Not a UDP datagram (IP protocol {protocol})")]
    NotUdp { protocol: u8 },
}
