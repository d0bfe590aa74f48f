//! Capture-to-record pipeline
//!
//! One frame in, zero or one record out. [`Pipeline::process_frame`] is the
//! pure per-frame step (demultiplex, decode, build). [`Pipeline::run`] is the
//! capture loop around it: it pulls frames from a [`FrameSource`], counts
//! what happened to each one and hands records to the forward queue.
//!
//! No state is carried from one frame to the next apart from the counters.

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use siptap_capture::{demux, FrameSource, RawFrame};
use siptap_sip_core::parse_message;

use crate::config::Config;
use crate::error::{FrameError, Result};
use crate::queue::ForwardSender;
use crate::record::{OutputRecord, RecordBuilder};

/// Log target of the diagnostic echo enabled by `Debug = true`
pub const DEBUG_TARGET: &str = "siptap::debug";

/// What happened to the frames seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_seen: u64,
    pub demux_failures: u64,
    pub decode_failures: u64,
    pub suppressed: u64,
    pub records_produced: u64,
}

pub struct Pipeline {
    builder: RecordBuilder,
    debug: bool,
    stats: PipelineStats,
}

impl Pipeline {
    pub fn new(builder: RecordBuilder, debug: bool) -> Self {
        Self {
            builder,
            debug,
            stats: PipelineStats::default(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(RecordBuilder::new(config.suppression_set()?), config.debug))
    }

    pub fn stats(&self) -> PipelineStats {
        self.stats
    }

    /// Turns one frame into a record.
    ///
    /// `Ok(None)` means the message decoded but its method is suppressed.
    pub fn process_frame(&self, frame: &RawFrame) -> std::result::Result<Option<OutputRecord>, FrameError> {
        let datagram = demux(frame)?;
        let message = parse_message(datagram.payload)?;
        Ok(self.builder.build(&datagram, &message))
    }

    /// [`process_frame`](Self::process_frame) plus accounting and logging.
    /// Returns the record to forward, if any. Serialization happens once, in
    /// the forwarder.
    pub fn handle_frame(&mut self, frame: &RawFrame) -> Option<OutputRecord> {
        self.stats.frames_seen += 1;

        if self.debug {
            info!(
                target: DEBUG_TARGET,
                "Frame ({} bytes, {:?}):\n{}",
                frame.len(),
                frame.link_type,
                String::from_utf8_lossy(&frame.data)
            );
        }

        let record = match self.process_frame(frame) {
            Ok(Some(record)) => record,
            Ok(None) => {
                self.stats.suppressed += 1;
                debug!("Suppressed record for frame captured at {}", frame.timestamp);
                return None;
            }
            Err(FrameError::Demux(e)) => {
                self.stats.demux_failures += 1;
                debug!("Dropping frame: {}", e);
                return None;
            }
            Err(FrameError::Decode(e)) => {
                self.stats.decode_failures += 1;
                debug!("Dropping non-SIP payload: {}", e);
                return None;
            }
        };

        if self.debug {
            match record.to_json() {
                Ok(json) => info!(target: DEBUG_TARGET, "Record: {}", json),
                Err(e) => info!(target: DEBUG_TARGET, "Record not serializable: {}", e),
            }
        }

        self.stats.records_produced += 1;
        Some(record)
    }

    /// Capture loop.
    ///
    /// Runs until `shutdown` is set, the source is exhausted, or the forward
    /// queue goes away. `shutdown` is only checked between frames, so a frame
    /// is always processed and queued as a whole. The source is closed on
    /// every exit path. Blocks the calling thread.
    ///
    /// # Errors
    ///
    /// Only a failing frame source ends the loop with an error.
    pub fn run<S>(&mut self, source: &mut S, sender: &ForwardSender, shutdown: &AtomicBool) -> Result<PipelineStats>
    where
        S: FrameSource + ?Sized,
    {
        loop {
            if shutdown.load(Ordering::SeqCst) {
                info!("Shutdown requested, stopping capture");
                break;
            }

            match source.next_frame() {
                Ok(Some(frame)) => {
                    if let Some(record) = self.handle_frame(&frame) {
                        if sender.blocking_send(record).is_err() {
                            warn!("Forward queue closed, stopping capture");
                            break;
                        }
                    }
                }
                Ok(None) => {
                    if source.is_exhausted() {
                        info!("Frame source exhausted");
                        break;
                    }
                }
                Err(e) => {
                    source.close();
                    return Err(e.into());
                }
            }
        }

        if let Some(capture) = source.stats() {
            info!(
                "Capture counters: {} received, {} dropped, {} dropped by interface",
                capture.received, capture.dropped, capture.if_dropped
            );
        }
        source.close();

        let stats = self.stats;
        info!(
            "Pipeline finished: {} frames, {} records, {} suppressed, {} demux failures, {} decode failures",
            stats.frames_seen,
            stats.records_produced,
            stats.suppressed,
            stats.demux_failures,
            stats.decode_failures
        );
        Ok(stats)
    }
}
