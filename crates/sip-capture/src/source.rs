//! Frame sources
//!
//! A [`FrameSource`] yields captured frames one at a time. The live source
//! wraps a pcap handle opened on a device with a BPF filter, so only frames
//! matching the filter ever reach the pipeline. The same handle type replays
//! a capture file, and [`MemorySource`] serves frames held in memory.

use std::collections::VecDeque;
use std::path::Path;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use pcap::{Activated, Capture};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CaptureError, Result};
use crate::frame::{LinkType, RawFrame};

/// Default snapshot length in bytes
pub const DEFAULT_SNAPLEN: i32 = 1490;
/// Default read timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: i32 = 200;

/// How to open a live capture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSettings {
    /// Device name, e.g. `eth0` or `any`
    pub device: String,
    /// BPF filter expression, e.g. `udp port 5060`
    pub filter: String,
    /// Snapshot length
    pub snaplen: i32,
    /// Put the interface in promiscuous mode
    pub promiscuous: bool,
    /// Read timeout in milliseconds
    pub timeout_ms: i32,
}

impl CaptureSettings {
    pub fn new(device: impl Into<String>, filter: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            filter: filter.into(),
            snaplen: DEFAULT_SNAPLEN,
            promiscuous: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

/// Counters reported by the capture facility
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CaptureStats {
    /// Packets received
    pub received: u32,
    /// Packets dropped for lack of buffer space
    pub dropped: u32,
    /// Packets dropped by the interface
    pub if_dropped: u32,
}

/// An ordered, possibly lossy, sequence of captured frames
pub trait FrameSource: Send {
    /// Next frame.
    ///
    /// `Ok(None)` means no frame arrived within the read timeout, or, once
    /// [`is_exhausted`](Self::is_exhausted) is true, that no frame ever will.
    fn next_frame(&mut self) -> Result<Option<RawFrame>>;

    /// True once a finite source has delivered its last frame
    fn is_exhausted(&self) -> bool;

    /// Releases the underlying handle; later reads fail with
    /// [`CaptureError::Closed`]
    fn close(&mut self);

    /// Counters from the capture facility, when it keeps any
    fn stats(&mut self) -> Option<CaptureStats> {
        None
    }
}

/// pcap-backed source, live or offline
pub struct PcapSource {
    capture: Option<Capture<dyn Activated>>,
    link_type: LinkType,
    exhausted: bool,
    origin: String,
}

impl PcapSource {
    /// Opens `settings.device` and installs the filter.
    ///
    /// # Errors
    ///
    /// [`CaptureError::OpenDevice`] for an unknown device or missing
    /// permissions, [`CaptureError::InvalidFilter`] when the filter does not
    /// compile.
    pub fn open_live(settings: &CaptureSettings) -> Result<Self> {
        let capture = Capture::from_device(settings.device.as_str())
            .and_then(|inactive| {
                inactive
                    .promisc(settings.promiscuous)
                    .snaplen(settings.snaplen)
                    .timeout(settings.timeout_ms)
                    .open()
            })
            .map_err(|e| CaptureError::open_device(&settings.device, e))?;

        let source = Self::from_capture(capture.into(), &settings.filter, &settings.device)?;
        info!(
            "Capturing on {} (filter {:?}, snaplen {}, promiscuous {})",
            settings.device, settings.filter, settings.snaplen, settings.promiscuous
        );
        Ok(source)
    }

    /// Opens a capture file for replay. The source is exhausted at end of file.
    pub fn open_file(path: impl AsRef<Path>, filter: Option<&str>) -> Result<Self> {
        let path = path.as_ref();
        let capture = Capture::from_file(path).map_err(|e| CaptureError::OpenFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let source = Self::from_capture(capture.into(), filter.unwrap_or(""), &path.display().to_string())?;
        info!("Replaying capture file {}", path.display());
        Ok(source)
    }

    fn from_capture(mut capture: Capture<dyn Activated>, filter: &str, origin: &str) -> Result<Self> {
        if !filter.trim().is_empty() {
            capture
                .filter(filter, true)
                .map_err(|e| CaptureError::invalid_filter(filter, e))?;
        }
        let link_type = LinkType::from_dlt(capture.get_datalink().0);
        debug!("Capture {} uses link type {:?}", origin, link_type);

        Ok(Self {
            capture: Some(capture),
            link_type,
            exhausted: false,
            origin: origin.to_string(),
        })
    }

    /// Link type of every frame this source yields
    pub fn link_type(&self) -> LinkType {
        self.link_type
    }
}

impl FrameSource for PcapSource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        let link_type = self.link_type;
        let capture = self.capture.as_mut().ok_or(CaptureError::Closed)?;

        match capture.next_packet() {
            Ok(packet) => {
                let timestamp = frame_timestamp(packet.header.ts.tv_sec as i64, packet.header.ts.tv_usec as i64);
                Ok(Some(RawFrame::new(
                    Bytes::copy_from_slice(packet.data),
                    link_type,
                    timestamp,
                )))
            }
            Err(pcap::Error::TimeoutExpired) => Ok(None),
            Err(pcap::Error::NoMorePackets) => {
                self.exhausted = true;
                Ok(None)
            }
            Err(e) => Err(CaptureError::Read { reason: e.to_string() }),
        }
    }

    fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn close(&mut self) {
        if self.capture.take().is_some() {
            debug!("Closed capture {}", self.origin);
        }
    }

    fn stats(&mut self) -> Option<CaptureStats> {
        let stat = self.capture.as_mut()?.stats().ok()?;
        Some(CaptureStats {
            received: stat.received,
            dropped: stat.dropped,
            if_dropped: stat.if_dropped,
        })
    }
}

// pcap timestamps are seconds plus microseconds
fn frame_timestamp(secs: i64, micros: i64) -> DateTime<Utc> {
    let nanos = u32::try_from(micros.clamp(0, 999_999) * 1_000).unwrap_or(0);
    DateTime::from_timestamp(secs, nanos).unwrap_or_else(Utc::now)
}

/// Frames served from memory, in order
#[derive(Debug, Default)]
pub struct MemorySource {
    frames: VecDeque<RawFrame>,
    closed: bool,
}

impl MemorySource {
    pub fn new(frames: impl IntoIterator<Item = RawFrame>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            closed: false,
        }
    }

    pub fn push(&mut self, frame: RawFrame) {
        self.frames.push_back(frame);
    }

    /// Frames not yet read
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl FrameSource for MemorySource {
    fn next_frame(&mut self) -> Result<Option<RawFrame>> {
        if self.closed {
            return Err(CaptureError::Closed);
        }
        Ok(self.frames.pop_front())
    }

    fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }

    fn close(&mut self) {
        self.closed = true;
    }
}
