//! Process wiring: frame source, pipeline and forward queue
//!
//! The pipeline context is built once from the configuration and moved onto
//! a blocking thread together with the frame source; the forward queue's
//! sender task runs on the async runtime.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use tracing::info;

use siptap_capture::{FrameSource, PcapSource};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::forwarder::{Forwarder, HttpForwarder, SourceHeaders};
use crate::pipeline::{Pipeline, PipelineStats};
use crate::queue::{ForwardQueue, ForwardStats};

/// Counters of a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pipeline: PipelineStats,
    pub forwarding: ForwardStats,
}

/// Opens the configured capture file, or the live device when there is none
pub fn open_source(config: &Config) -> Result<Box<dyn FrameSource>> {
    let source: Box<dyn FrameSource> = match &config.pcap_file {
        Some(path) => Box::new(PcapSource::open_file(path, Some(config.filter.as_str()))?),
        None => Box::new(PcapSource::open_live(&config.capture_settings())?),
    };
    Ok(source)
}

/// The HTTP collector client for this configuration
pub fn http_forwarder(config: &Config) -> Result<HttpForwarder> {
    let category = config.category();
    info!("Forwarding to {} as {}", config.collector_url, category);
    HttpForwarder::new(
        &config.collector_url,
        SourceHeaders::new(config.client_name.clone(), &category),
    )
}

/// Captures with the configured source and forwards over HTTP until
/// `shutdown` is set or the source runs dry.
pub async fn run(config: &Config, shutdown: Arc<AtomicBool>) -> Result<RunSummary> {
    let forwarder = Arc::new(http_forwarder(config)?);
    let source = open_source(config)?;
    run_with(config, source, forwarder, shutdown).await
}

/// Same as [`run`] with an explicit source and forwarder.
pub async fn run_with(
    config: &Config,
    mut source: Box<dyn FrameSource>,
    forwarder: Arc<dyn Forwarder>,
    shutdown: Arc<AtomicBool>,
) -> Result<RunSummary> {
    let mut pipeline = Pipeline::from_config(config)?;
    let queue = ForwardQueue::spawn(forwarder, config.queue_capacity);
    let sender = queue.sender();

    let captured = tokio::task::spawn_blocking(move || {
        let result = pipeline.run(source.as_mut(), &sender, &shutdown);
        drop(sender);
        result
    })
    .await
    .map_err(|e| Error::Task {
        details: e.to_string(),
    });

    // Deliver what was queued even if capture failed
    let forwarding = queue.shutdown().await?;
    let pipeline = captured??;

    Ok(RunSummary {
        pipeline,
        forwarding,
    })
}
