//! Bounded hand-off between the capture loop and the collector
//!
//! The capture loop pushes records into a bounded channel; one sender task
//! drains it into a [`Forwarder`]. A full channel blocks the capture loop
//! instead of growing. Shutting the queue down waits until every record
//! already queued has been handed to the forwarder.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::forwarder::Forwarder;
use crate::record::OutputRecord;

/// Delivery counters of the sender task
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Producer handle, cloneable across capture workers
#[derive(Debug, Clone)]
pub struct ForwardSender {
    tx: mpsc::Sender<OutputRecord>,
}

impl ForwardSender {
    /// Queues a record from synchronous code, waiting while the queue is
    /// full. Must not be called from within an async context.
    pub fn blocking_send(&self, record: OutputRecord) -> Result<()> {
        self.tx.blocking_send(record).map_err(|_| Error::QueueClosed)
    }

    /// Queues a record, waiting while the queue is full
    pub async fn send(&self, record: OutputRecord) -> Result<()> {
        self.tx.send(record).await.map_err(|_| Error::QueueClosed)
    }
}

pub struct ForwardQueue {
    tx: mpsc::Sender<OutputRecord>,
    task: JoinHandle<ForwardStats>,
}

impl ForwardQueue {
    /// Starts the sender task on the current runtime.
    ///
    /// A `capacity` of 0 is raised to 1.
    pub fn spawn(forwarder: Arc<dyn Forwarder>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<OutputRecord>(capacity.max(1));

        let task = tokio::spawn(async move {
            let mut stats = ForwardStats::default();
            while let Some(record) = rx.recv().await {
                match forwarder.forward(&record).await {
                    Ok(()) => stats.delivered += 1,
                    Err(e) => {
                        warn!("Failed to forward record: {}", e);
                        stats.failed += 1;
                    }
                }
            }
            debug!("Forward queue drained");
            stats
        });

        Self { tx, task }
    }

    pub fn sender(&self) -> ForwardSender {
        ForwardSender {
            tx: self.tx.clone(),
        }
    }

    /// Closes the queue once every outstanding [`ForwardSender`] is dropped
    /// and waits for the records already queued to be forwarded.
    pub async fn shutdown(self) -> Result<ForwardStats> {
        drop(self.tx);
        let stats = self.task.await.map_err(|e| Error::Task {
            details: e.to_string(),
        })?;
        info!(
            "Forwarder finished: {} delivered, {} failed",
            stats.delivered, stats.failed
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::MessageType;
    use async_trait::async_trait;
    use siptap_sip_core::HeaderMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    fn record(method: &str) -> OutputRecord {
        OutputRecord {
            dest_ip: "10.0.0.2".to_string(),
            dest_port: "5060".to_string(),
            src_ip: "10.0.0.1".to_string(),
            src_port: "5060".to_string(),
            proto: "UDP".to_string(),
            sip_method: method.to_string(),
            sip_version: "SIP/2.0".to_string(),
            response_status: String::new(),
            response_code: 0,
            message_type: MessageType::Request,
            sip_headers: HeaderMap::new(),
        }
    }

    #[derive(Default)]
    struct Collecting {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Forwarder for Collecting {
        async fn forward(&self, record: &OutputRecord) -> Result<()> {
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.seen.lock().unwrap().push(record.sip_method.clone());
            Ok(())
        }
    }

    struct Failing {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Forwarder for Failing {
        async fn forward(&self, _record: &OutputRecord) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Error::CollectorStatus { status: 503 })
        }
    }

    #[tokio::test]
    async fn test_shutdown_drains_in_order() {
        let forwarder = Arc::new(Collecting::default());
        let queue = ForwardQueue::spawn(forwarder.clone(), 2);
        let sender = queue.sender();

        for method in ["INVITE", "BYE", "OPTIONS", "REGISTER"] {
            sender.send(record(method)).await.unwrap();
        }
        drop(sender);

        let stats = queue.shutdown().await.unwrap();
        assert_eq!(stats, ForwardStats { delivered: 4, failed: 0 });
        assert_eq!(
            *forwarder.seen.lock().unwrap(),
            vec!["INVITE", "BYE", "OPTIONS", "REGISTER"]
        );
    }

    #[tokio::test]
    async fn test_failures_are_not_retried() {
        let forwarder = Arc::new(Failing {
            calls: AtomicUsize::new(0),
        });
        let queue = ForwardQueue::spawn(forwarder.clone(), 8);
        let sender = queue.sender();
        sender.send(record("INVITE")).await.unwrap();
        sender.send(record("BYE")).await.unwrap();
        drop(sender);

        let stats = queue.shutdown().await.unwrap();
        assert_eq!(stats, ForwardStats { delivered: 0, failed: 2 });
        assert_eq!(forwarder.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_blocking_send_from_capture_thread() {
        let forwarder = Arc::new(Collecting::default());
        let queue = ForwardQueue::spawn(forwarder.clone(), 1);
        let sender = queue.sender();

        tokio::task::spawn_blocking(move || {
            for _ in 0..5 {
                sender.blocking_send(record("NOTIFY")).unwrap();
            }
        })
        .await
        .unwrap();

        let stats = queue.shutdown().await.unwrap();
        assert_eq!(stats.delivered, 5);
        assert_eq!(forwarder.seen.lock().unwrap().len(), 5);
    }
}
