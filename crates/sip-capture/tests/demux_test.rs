//! Demultiplexing of synthetic captured frames

use etherparse::PacketBuilder;
use siptap_capture::{demux, DemuxError, FrameSource, LinkType, MemorySource, RawFrame};

const SIP: &[u8] = b"OPTIONS sip:probe@example.com SIP/2.0\r\nContent-Length: 0\r\n\r\n";

fn ethernet_udp_v4(payload: &[u8]) -> Vec<u8> {
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
        .ipv4([192, 168, 1, 10], [192, 168, 1, 20], 64)
        .udp(5062, 5060);
    let mut out = Vec::with_capacity(builder.size(payload.len()));
    builder.write(&mut out, payload).unwrap();
    out
}

#[test]
fn test_ethernet_ipv4_udp() {
    let frame = RawFrame::now(ethernet_udp_v4(SIP), LinkType::Ethernet);
    let datagram = demux(&frame).unwrap();

    assert_eq!(datagram.source.address.to_string(), "192.168.1.10");
    assert_eq!(datagram.source.port, 5062);
    assert_eq!(datagram.destination.address.to_string(), "192.168.1.20");
    assert_eq!(datagram.destination.port, 5060);
    assert_eq!(datagram.protocol, "UDP");
    assert_eq!(datagram.payload, SIP);
}

#[test]
fn test_ethernet_ipv6_udp() {
    let src = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1];
    let dst = [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 2];
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
        .ipv6(src, dst, 64)
        .udp(5060, 5060);
    let mut data = Vec::new();
    builder.write(&mut data, SIP).unwrap();

    let frame = RawFrame::now(data, LinkType::Ethernet);
    let datagram = demux(&frame).unwrap();
    assert_eq!(datagram.source.address.to_string(), "2001:db8::1");
    assert_eq!(datagram.destination.address.to_string(), "2001:db8::2");
    assert_eq!(datagram.payload, SIP);
}

#[test]
fn test_raw_ip_and_loopback() {
    let builder = PacketBuilder::ipv4([10, 0, 0, 1], [10, 0, 0, 2], 64).udp(5060, 5060);
    let mut ip = Vec::new();
    builder.write(&mut ip, SIP).unwrap();

    let raw = RawFrame::now(ip.clone(), LinkType::RawIp);
    assert_eq!(demux(&raw).unwrap().payload, SIP);

    let mut looped = vec![2, 0, 0, 0];
    looped.extend_from_slice(&ip);
    let null = RawFrame::now(looped, LinkType::Null);
    let datagram = demux(&null).unwrap();
    assert_eq!(datagram.source.address.to_string(), "10.0.0.1");
    assert_eq!(datagram.payload, SIP);
}

#[test]
fn test_tcp_is_not_udp() {
    let builder = PacketBuilder::ethernet2([1, 2, 3, 4, 5, 6], [7, 8, 9, 10, 11, 12])
        .ipv4([192, 168, 1, 10], [192, 168, 1, 20], 64)
        .tcp(5060, 5060, 1, 1024);
    let mut data = Vec::new();
    builder.write(&mut data, SIP).unwrap();

    let frame = RawFrame::now(data, LinkType::Ethernet);
    assert_eq!(demux(&frame), Err(DemuxError::NotUdp { protocol: 6 }));
}

#[test]
fn test_fragmented_ipv4_dropped() {
    let mut data = ethernet_udp_v4(SIP);
    // more-fragments flag in the IPv4 flags byte
    data[14 + 6] |= 0x20;

    let frame = RawFrame::now(data, LinkType::Ethernet);
    assert_eq!(demux(&frame), Err(DemuxError::Fragmented));
}

#[test]
fn test_arp_is_not_ip() {
    let mut data = vec![0xff; 6];
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6]);
    data.extend_from_slice(&[0x08, 0x06]);
    data.extend_from_slice(&[0x00, 0x01, 0x08, 0x00, 6, 4, 0x00, 0x01]);
    data.extend_from_slice(&[1, 2, 3, 4, 5, 6, 192, 168, 1, 10]);
    data.extend_from_slice(&[0, 0, 0, 0, 0, 0, 192, 168, 1, 20]);

    let frame = RawFrame::now(data, LinkType::Ethernet);
    assert_eq!(demux(&frame), Err(DemuxError::NotIp));
}

#[test]
fn test_truncated_frame_fails() {
    let data = ethernet_udp_v4(SIP);
    let frame = RawFrame::now(data[..30].to_vec(), LinkType::Ethernet);
    assert!(demux(&frame).is_err());
}

#[test]
fn test_memory_source_feeds_demux() {
    let mut source = MemorySource::new(vec![
        RawFrame::now(ethernet_udp_v4(SIP), LinkType::Ethernet),
        RawFrame::now(vec![0u8; 8], LinkType::Ethernet),
    ]);

    let mut payloads = Vec::new();
    while let Some(frame) = source.next_frame().unwrap() {
        if let Ok(datagram) = demux(&frame) {
            payloads.push(datagram.payload.to_vec());
        }
    }
    assert!(source.is_exhausted());
    assert_eq!(payloads, vec![SIP.to_vec()]);
}
