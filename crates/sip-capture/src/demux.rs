//! Transport demultiplexer
//!
//! Peels link, network and transport headers off a captured frame with
//! etherparse and hands back the UDP endpoints and payload. Anything that is
//! not a complete, unfragmented UDP datagram over IPv4 or IPv6 is a
//! [`DemuxError`].

use std::fmt;
use std::net::IpAddr;

use etherparse::{IpNumber, NetSlice, SlicedPacket, TransportSlice};
use serde::{Deserialize, Serialize};

use crate::error::DemuxError;
use crate::frame::{LinkType, RawFrame};

/// Protocol label of every datagram the demultiplexer yields
pub const UDP_LABEL: &str = "UDP";

/// One side of a datagram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransportEndpoint {
    pub address: IpAddr,
    pub port: u16,
}

impl fmt::Display for TransportEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.address {
            IpAddr::V4(addr) => write!(f, "{}:{}", addr, self.port),
            IpAddr::V6(addr) => write!(f, "[{}]:{}", addr, self.port),
        }
    }
}

/// A UDP datagram borrowed from its frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datagram<'a> {
    pub source: TransportEndpoint,
    pub destination: TransportEndpoint,
    /// Transport protocol label, always [`UDP_LABEL`]
    pub protocol: &'static str,
    pub payload: &'a [u8],
}

/// Extract the UDP datagram carried by `frame`.
pub fn demux(frame: &RawFrame) -> Result<Datagram<'_>, DemuxError> {
    let data = frame.data.as_ref();
    let sliced = match frame.link_type {
        LinkType::Ethernet => SlicedPacket::from_ethernet(data).map_err(malformed)?,
        LinkType::LinuxSll => SlicedPacket::from_linux_sll(data).map_err(malformed)?,
        LinkType::RawIp => SlicedPacket::from_ip(data).map_err(malformed)?,
        LinkType::Null => {
            // 4 byte address family in host byte order, then the IP packet
            let ip = data.get(4..).ok_or_else(|| malformed("loopback header truncated"))?;
            SlicedPacket::from_ip(ip).map_err(malformed)?
        }
        LinkType::Other(link_type) => return Err(DemuxError::UnsupportedLink { link_type }),
    };

    let (source_ip, destination_ip, protocol) = match &sliced.net {
        Some(NetSlice::Ipv4(ipv4)) => {
            if ipv4.payload().fragmented {
                return Err(DemuxError::Fragmented);
            }
            let header = ipv4.header();
            (
                IpAddr::from(header.source_addr()),
                IpAddr::from(header.destination_addr()),
                ipv4.payload().ip_number,
            )
        }
        Some(NetSlice::Ipv6(ipv6)) => {
            if ipv6.payload().fragmented {
                return Err(DemuxError::Fragmented);
            }
            let header = ipv6.header();
            (
                IpAddr::from(header.source_addr()),
                IpAddr::from(header.destination_addr()),
                ipv6.payload().ip_number,
            )
        }
        _ => return Err(DemuxError::NotIp),
    };

    match &sliced.transport {
        Some(TransportSlice::Udp(udp)) => Ok(Datagram {
            source: TransportEndpoint {
                address: source_ip,
                port: udp.source_port(),
            },
            destination: TransportEndpoint {
                address: destination_ip,
                port: udp.destination_port(),
            },
            protocol: UDP_LABEL,
            payload: udp.payload(),
        }),
        _ if protocol == IpNumber::UDP => Err(malformed("UDP header truncated")),
        _ => Err(DemuxError::NotUdp { protocol: protocol.0 }),
    }
}

fn malformed(reason: impl fmt::Display) -> DemuxError {
    DemuxError::Malformed {
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_link() {
        let frame = RawFrame::now(vec![0u8; 64], LinkType::Other(127));
        assert_eq!(demux(&frame), Err(DemuxError::UnsupportedLink { link_type: 127 }));
    }

    #[test]
    fn test_truncated_loopback_header() {
        let frame = RawFrame::now(vec![2u8, 0], LinkType::Null);
        assert!(matches!(demux(&frame), Err(DemuxError::Malformed { .. })));
    }

    #[test]
    fn test_empty_frame() {
        let frame = RawFrame::now(Vec::new(), LinkType::Ethernet);
        assert!(matches!(demux(&frame), Err(DemuxError::Malformed { .. })));
    }

    #[test]
    fn test_endpoint_display() {
        let v4 = TransportEndpoint { address: "10.0.0.1".parse().unwrap(), port: 5060 };
        assert_eq!(v4.to_string(), "10.0.0.1:5060");
        let v6 = TransportEndpoint { address: "2001:db8::1".parse().unwrap(), port: 5060 };
        assert_eq!(v6.to_string(), "[2001:db8::1]:5060");
    }
}
