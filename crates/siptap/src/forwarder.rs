//! Delivery of records to the log collector
//!
//! The collector is a Sumo Logic style HTTP source: one POST per record,
//! JSON body, and a fixed set of `X-Sumo-*` headers naming the sender.
//! Delivery is at most once; a failed POST is reported to the caller and
//! never retried.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::{Error, Result};
use crate::record::OutputRecord;

pub const HEADER_CLIENT: &str = "X-Sumo-Client";
pub const HEADER_NAME: &str = "X-Sumo-Name";
pub const HEADER_HOST: &str = "X-Sumo-Host";
pub const HEADER_CATEGORY: &str = "X-Sumo-Category";

/// Consumes one record at a time
///
/// Implementations are shared with the forward queue's sender task and must
/// tolerate concurrent use.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, record: &OutputRecord) -> Result<()>;
}

/// Identifying headers sent with every record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceHeaders {
    pub client: String,
    pub name: String,
    pub host: String,
    pub category: String,
}

impl SourceHeaders {
    pub fn new(client_name: impl Into<String>, category: &Category) -> Self {
        Self {
            client: client_name.into(),
            name: category.prefix.clone(),
            host: category.hostname.clone(),
            category: category.to_string(),
        }
    }

    fn pairs(&self) -> [(&'static str, &str); 4] {
        [
            (HEADER_CLIENT, self.client.as_str()),
            (HEADER_NAME, self.name.as_str()),
            (HEADER_HOST, self.host.as_str()),
            (HEADER_CATEGORY, self.category.as_str()),
        ]
    }
}

/// POSTs records to an HTTP collector
pub struct HttpForwarder {
    client: Client,
    url: Url,
    headers: SourceHeaders,
}

impl HttpForwarder {
    pub fn new(collector_url: &str, headers: SourceHeaders) -> Result<Self> {
        let url = Url::parse(collector_url)
            .map_err(|e| Error::config(format!("Invalid collector URL {:?}: {}", collector_url, e)))?;
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .user_agent(concat!("siptap/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            url,
            headers,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn headers(&self) -> &SourceHeaders {
        &self.headers
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, record: &OutputRecord) -> Result<()> {
        let body = record.to_json()?;

        let mut req = self.client.post(self.url.clone()).body(body);
        for (key, value) in self.headers.pairs() {
            req = req.header(key, value);
        }
        req = req.header("Content-Type", "application/json");

        let resp = req.send().await?;
        let status = resp.status();
        if !status.is_success() {
            warn!("Collector returned non-success status: {}", status);
            return Err(Error::CollectorStatus {
                status: status.as_u16(),
            });
        }

        debug!("Delivered {:?} record to collector", record.message_type);
        Ok(())
    }
}
