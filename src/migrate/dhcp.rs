use tracing::{debug, info, warn};

use crate::api::DeviceApi;
use crate::errors::ApiError;
use crate::types::{InventorySnapshot, MigrationStats};

/// Phase 5: carry relay settings from source entries onto the destination
/// snapshot, matching by VLAN id.
///
/// Interface ids are not portable between devices and the freshly created
/// destination interfaces have new ones, so the VLAN id is the join key.
/// Entries the destination created as DHCP-disabled stay untouched, as does
/// anything in server mode. A relay interface with no destination VLAN
/// match is counted and warned about rather than failing the run.
pub(super) fn merge_relay_settings(
    source: &InventorySnapshot,
    dest: &mut InventorySnapshot,
    stats: &mut MigrationStats,
) {
    for entry in source.entries.iter().filter(|e| e.dhcp.is_relay()) {
        let vlan_id = entry.interface.vlan_id;
        match dest
            .entries
            .iter_mut()
            .find(|d| d.interface.vlan_id == vlan_id)
        {
            Some(matched) => {
                debug!(
                    vlan_id,
                    interface_id = %matched.interface.interface_id,
                    "matched relay interface on destination"
                );
                matched.dhcp = entry.dhcp.clone();
                stats.relays_matched += 1;
            }
            None => {
                warn!(
                    vlan_id,
                    name = %entry.interface.name,
                    "no destination interface shares this VLAN, relay settings dropped"
                );
                stats.relays_unmatched += 1;
            }
        }
    }
}

/// Phase 6: push every destination entry now in relay mode back through the
/// API under its real destination interface id. Everything else is skipped.
pub(super) fn apply_relay_settings<A: DeviceApi + ?Sized>(
    api: &A,
    dest: &InventorySnapshot,
    stats: &mut MigrationStats,
) -> Result<(), ApiError> {
    for entry in dest.entries.iter().filter(|e| e.dhcp.is_relay()) {
        info!(
            serial = %dest.serial,
            interface_id = %entry.interface.interface_id,
            servers = ?entry.dhcp.dhcp_relay_server_ips,
            "applying DHCP relay settings"
        );
        api.update_dhcp_config(&dest.serial, &entry.interface.interface_id, &entry.dhcp)?;
        stats.relays_applied += 1;
    }
    Ok(())
}
