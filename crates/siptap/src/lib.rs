//! # siptap
//!
//! A passive SIP telemetry tap. Frames captured on a UDP port are decoded as
//! SIP messages and each message becomes one flat JSON record, POSTed to an
//! HTTP log collector together with a category string naming the tap.
//!
//! ```text
//! FrameSource -> demux -> parse_message -> RecordBuilder -> ForwardQueue -> Forwarder
//! ```
//!
//! The tap never sends SIP, keeps no dialog or transaction state and does
//! not reassemble TCP or fragmented IP.

pub mod category;
pub mod config;
pub mod error;
pub mod forwarder;
pub mod logging;
pub mod pipeline;
pub mod queue;
pub mod record;
pub mod runner;

pub use category::Category;
pub use config::{Config, DEFAULT_CONFIG_PATH};
pub use error::{Error, FrameError, Result};
pub use forwarder::{Forwarder, HttpForwarder, SourceHeaders};
pub use pipeline::{Pipeline, PipelineStats};
pub use queue::{ForwardQueue, ForwardSender, ForwardStats};
pub use record::{MessageType, OutputRecord, RecordBuilder, SuppressionSet};
pub use runner::{run, run_with, RunSummary};

pub mod prelude {
    pub use crate::{
        Category, Config, Error, ForwardQueue, Forwarder, FrameError, HttpForwarder, MessageType,
        OutputRecord, Pipeline, RecordBuilder, Result, SuppressionSet,
    };
    pub use siptap_capture::{FrameSource, MemorySource, PcapSource, RawFrame};
    pub use siptap_sip_core::{parse_message, Method, SipMessage};
}
