//! # siptap-capture
//!
//! Frame sources and transport demultiplexing for the siptap pipeline.
//!
//! - [`source`]: the [`FrameSource`] trait, a pcap-backed live or offline
//!   source and an in-memory source
//! - [`demux`]: turns a [`RawFrame`] into a UDP [`Datagram`]
//! - [`devices`]: capture device listing for diagnostics

pub mod demux;
pub mod devices;
pub mod error;
pub mod frame;
pub mod source;

pub use demux::{demux, Datagram, TransportEndpoint, UDP_LABEL};
pub use devices::{format_devices, list_devices, DeviceInfo};
pub use error::{CaptureError, DemuxError, Result};
pub use frame::{LinkType, RawFrame};
pub use source::{CaptureSettings, CaptureStats, FrameSource, MemorySource, PcapSource};
