use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use tracing::info;

use crate::api::DeviceApi;
use crate::errors::ApiError;
use crate::types::{InventorySnapshot, SviEntry};

/// Read the complete SVI inventory of one device.
///
/// For every interface in the device's routing-interface listing the
/// per-interface DHCP settings are fetched and paired up. All-or-nothing:
/// any failing call discards the partial result and surfaces the error.
pub fn read_inventory<A: DeviceApi + ?Sized>(
    api: &A,
    serial: &str,
) -> Result<InventorySnapshot, ApiError> {
    let interfaces = api.list_routing_interfaces(serial)?;
    let mut entries = Vec::with_capacity(interfaces.len());
    for interface in interfaces {
        let dhcp = api.get_dhcp_config(serial, &interface.interface_id)?;
        entries.push(SviEntry { interface, dhcp });
    }
    info!(serial, interfaces = entries.len(), "read inventory");
    Ok(InventorySnapshot {
        serial: serial.to_string(),
        entries,
    })
}

/// Write a snapshot as pretty-printed JSON for operator inspection.
///
/// The file is a diagnostic artifact only; nothing reads it back.
pub fn write_snapshot(snapshot: &InventorySnapshot, path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot).map_err(io::Error::from)
}
