//! Capture device enumeration for startup diagnostics

use std::fmt::Write;
use std::net::IpAddr;

use pcap::Device;
use serde::{Deserialize, Serialize};

use crate::error::{CaptureError, Result};

/// One address bound to a capture device
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceAddress {
    pub address: IpAddr,
    pub netmask: Option<IpAddr>,
}

/// A capture device as reported by libpcap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub name: String,
    pub description: Option<String>,
    pub addresses: Vec<DeviceAddress>,
}

impl From<Device> for DeviceInfo {
    fn from(device: Device) -> Self {
        Self {
            name: device.name,
            description: device.desc,
            addresses: device
                .addresses
                .into_iter()
                .map(|a| DeviceAddress {
                    address: a.addr,
                    netmask: a.netmask,
                })
                .collect(),
        }
    }
}

/// All devices libpcap can capture on
pub fn list_devices() -> Result<Vec<DeviceInfo>> {
    let devices = Device::list().map_err(|e| CaptureError::DeviceList { reason: e.to_string() })?;
    Ok(devices.into_iter().map(DeviceInfo::from).collect())
}

/// Human readable device listing
///
/// ```
/// use siptap_capture::devices::{format_devices, DeviceInfo};
///
/// let text = format_devices(&[DeviceInfo {
///     name: "eth0".into(),
///     description: None,
///     addresses: vec![],
/// }]);
/// assert!(text.contains("Name:  eth0"));
/// ```
pub fn format_devices(devices: &[DeviceInfo]) -> String {
    let mut out = String::from("Devices found:\n");
    for device in devices {
        let _ = writeln!(out, "\nName:  {}", device.name);
        if let Some(desc) = &device.description {
            let _ = writeln!(out, "Description:  {}", desc);
        }
        let _ = writeln!(out, "Devices addresses:");
        for address in &device.addresses {
            let _ = writeln!(out, "- IP address:  {}", address.address);
            if let Some(netmask) = address.netmask {
                let _ = writeln!(out, "- Subnet mask:  {}", netmask);
            }
        }
    }
    out
}
