//! Captured frames

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Link-layer header type of a capture, from the pcap DLT value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    /// DLT_EN10MB
    Ethernet,
    /// DLT_LINUX_SLL, the "any" pseudo-device on Linux
    LinuxSll,
    /// DLT_RAW, no link header
    RawIp,
    /// DLT_NULL / DLT_LOOP, 4 byte address family header
    Null,
    /// Anything else
    Other(i32),
}

impl LinkType {
    pub fn from_dlt(dlt: i32) -> Self {
        match dlt {
            1 => LinkType::Ethernet,
            113 => LinkType::LinuxSll,
            12 | 14 | 101 => LinkType::RawIp,
            0 | 108 => LinkType::Null,
            other => LinkType::Other(other),
        }
    }

    pub fn dlt(&self) -> i32 {
        match self {
            LinkType::Ethernet => 1,
            LinkType::LinuxSll => 113,
            LinkType::RawIp => 101,
            LinkType::Null => 0,
            LinkType::Other(dlt) => *dlt,
        }
    }
}

/// One captured frame
///
/// Owned by the pipeline only while the frame is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    /// Frame bytes starting at the link-layer header
    pub data: Bytes,
    /// How to read the first header
    pub link_type: LinkType,
    /// Capture time
    pub timestamp: DateTime<Utc>,
}

impl RawFrame {
    pub fn new(data: impl Into<Bytes>, link_type: LinkType, timestamp: DateTime<Utc>) -> Self {
        Self {
            data: data.into(),
            link_type,
            timestamp,
        }
    }

    /// Frame stamped with the current time
    pub fn now(data: impl Into<Bytes>, link_type: LinkType) -> Self {
        Self::new(data, link_type, Utc::now())
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_from_dlt() {
        assert_eq!(LinkType::from_dlt(1), LinkType::Ethernet);
        assert_eq!(LinkType::from_dlt(113), LinkType::LinuxSll);
        assert_eq!(LinkType::from_dlt(12), LinkType::RawIp);
        assert_eq!(LinkType::from_dlt(101), LinkType::RawIp);
        assert_eq!(LinkType::from_dlt(0), LinkType::Null);
        assert_eq!(LinkType::from_dlt(127), LinkType::Other(127));
        assert_eq!(LinkType::Other(127).dlt(), 127);
    }
}
