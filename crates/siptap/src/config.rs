//! Tap configuration
//!
//! Read from a TOML file. Keys use PascalCase (`Device`, `Sumocollectorurl`,
//! `EnvPrefix`, ...) as deployed configuration files already do; snake_case
//! spellings are accepted as aliases.
//!
//! ```toml
//! Device = "eth0"
//! Filter = "udp port 5060"
//! Sumocollectorurl = "https://collectors.example.com/receiver/v1/http/TOKEN"
//! EnvPrefix = "voip"
//! Environment = "prod"
//! EnvLocation = "ams1"
//! Debug = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use siptap_capture::source::{DEFAULT_SNAPLEN, DEFAULT_TIMEOUT_MS};
use siptap_capture::CaptureSettings;

use crate::category::{local_hostname, Category};
use crate::error::{Error, Result};
use crate::record::SuppressionSet;

/// Location used when no `--config` is given
pub const DEFAULT_CONFIG_PATH: &str = "/etc/siptap/config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Config {
    /// Capture device name
    #[serde(alias = "device")]
    pub device: String,

    /// BPF filter, e.g. `udp port 5060`
    #[serde(alias = "filter")]
    pub filter: String,

    /// HTTP(S) collector endpoint
    #[serde(rename = "Sumocollectorurl", alias = "collector_url", alias = "SumoCollectorUrl")]
    pub collector_url: String,

    #[serde(alias = "env_prefix")]
    pub env_prefix: String,

    #[serde(alias = "environment")]
    pub environment: String,

    #[serde(alias = "env_location")]
    pub env_location: String,

    /// Echo raw frames and serialized records to the log
    #[serde(alias = "debug")]
    pub debug: bool,

    #[serde(alias = "snap_len")]
    pub snap_len: i32,

    #[serde(alias = "promiscuous")]
    pub promiscuous: bool,

    /// Capture read timeout in milliseconds
    #[serde(alias = "timeout_ms")]
    pub timeout_ms: i32,

    /// Records buffered between capture and collector
    #[serde(alias = "queue_capacity")]
    pub queue_capacity: usize,

    /// Request methods never forwarded
    #[serde(alias = "suppressed_methods")]
    pub suppressed_methods: Vec<String>,

    /// Value of the X-Sumo-Client header
    #[serde(alias = "client_name")]
    pub client_name: String,

    /// Replay this capture file instead of opening `device`
    #[serde(alias = "pcap_file")]
    pub pcap_file: Option<PathBuf>,

    /// Overrides the local host name in the category
    #[serde(alias = "hostname")]
    pub hostname: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            device: String::new(),
            filter: String::new(),
            collector_url: String::new(),
            env_prefix: String::new(),
            environment: String::new(),
            env_location: String::new(),
            debug: false,
            snap_len: DEFAULT_SNAPLEN,
            promiscuous: true,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            queue_capacity: 1024,
            suppressed_methods: vec!["ACK".to_string()],
            client_name: "UA".to_string(),
            pcap_file: None,
            hostname: None,
        }
    }
}

impl Config {
    /// Loads and validates a configuration file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config = Self::from_toml_str(&content)
            .map_err(|e| Error::config(format!("{} ({})", e, path.display())))?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parses and validates TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| Error::config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let url = reqwest::Url::parse(&self.collector_url).map_err(|e| {
            Error::config(format!("Invalid Sumocollectorurl {:?}: {}", self.collector_url, e))
        })?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::config(format!(
                "Sumocollectorurl must be http or https, got {}",
                url.scheme()
            )));
        }

        if self.pcap_file.is_none() {
            if self.device.trim().is_empty() {
                return Err(Error::config("Device is required"));
            }
            if self.filter.trim().is_empty() {
                return Err(Error::config("Filter is required"));
            }
        }

        if self.queue_capacity == 0 {
            return Err(Error::config("QueueCapacity must be at least 1"));
        }
        if self.snap_len <= 0 {
            return Err(Error::config("SnapLen must be positive"));
        }
        // 0 makes libpcap block until a packet arrives
        if self.timeout_ms < 1 {
            return Err(Error::config("TimeoutMs must be at least 1"));
        }

        SuppressionSet::from_names(&self.suppressed_methods)?;
        Ok(())
    }

    pub fn capture_settings(&self) -> CaptureSettings {
        CaptureSettings {
            device: self.device.clone(),
            filter: self.filter.clone(),
            snaplen: self.snap_len,
            promiscuous: self.promiscuous,
            timeout_ms: self.timeout_ms,
        }
    }

    pub fn suppression_set(&self) -> Result<SuppressionSet> {
        SuppressionSet::from_names(&self.suppressed_methods)
    }

    /// Category of this tap, with the configured or local host name
    pub fn category(&self) -> Category {
        let hostname = self.hostname.clone().unwrap_or_else(local_hostname);
        Category::new(
            self.env_prefix.clone(),
            self.environment.clone(),
            self.env_location.clone(),
            hostname,
        )
    }
}
