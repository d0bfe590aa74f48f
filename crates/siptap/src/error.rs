//! Error types for the tap
//!
//! [`Error`] covers startup and delivery failures. [`FrameError`] is the
//! per-frame taxonomy: it never escapes the frame it was raised for.

use thiserror::Error;

use siptap_capture::{CaptureError, DemuxError};

/// Result type alias for tap operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Configuration missing, unreadable or invalid
    #[error("Configuration error: {details}")]
    Config { details: String },

    /// Frame source could not be opened or read
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Record could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Collector unreachable or request failed
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Collector answered with a non-success status
    #[error("Collector rejected record: HTTP {status}")]
    CollectorStatus { status: u16 },

    /// Forward queue is gone
    #[error("Forward queue closed")]
    QueueClosed,

    /// Logging could not be initialized
    #[error("Logging setup failed: {details}")]
    Logging { details: String },

    /// Background task failed
    #[error("Task failed: {details}")]
    Task { details: String },
}

impl Error {
    pub fn config(details: impl Into<String>) -> Self {
        Self::Config {
            details: details.into(),
        }
    }
}

/// Why one frame produced no record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Missing network or transport layer, or not UDP
    #[error("Frame decode failed: {0}")]
    Demux(#[from] DemuxError),

    /// Payload is not a SIP message
    #[error("SIP decode failed: {0}")]
    Decode(#[from] siptap_sip_core::Error),
}
