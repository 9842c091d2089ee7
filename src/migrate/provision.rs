use tracing::{info, warn};

use crate::api::{CreateInterface, DeviceApi, InterfacePatch};
use crate::errors::PhaseError;
use crate::inventory::read_inventory;
use crate::types::{InventorySnapshot, MigrationOptions, MigrationStats};

/// Phase 3: recreate the source snapshot's interfaces on the destination.
///
/// Ordinary interfaces are created with the source's name, address, VLAN,
/// subnet, multicast mode and OSPF settings. The management interface gets
/// the source's default gateway too. A stack may already carry a management
/// interface from its factory state, and only one is permitted, so a failed
/// creation falls back to updating the pre-existing one to the configured
/// default management address. That fallback is the only recovery branch in
/// the whole migration.
pub(super) fn provision_destination<A: DeviceApi + ?Sized>(
    api: &A,
    options: &MigrationOptions,
    snapshot: &InventorySnapshot,
    dest: &str,
    stats: &mut MigrationStats,
) -> Result<(), PhaseError> {
    for entry in &snapshot.entries {
        let interface = &entry.interface;
        if !interface.is_management() {
            info!(dest, name = %interface.name, vlan_id = interface.vlan_id, "creating interface");
            api.create_interface(dest, &CreateInterface::routed(interface))?;
            stats.interfaces_created += 1;
            continue;
        }

        // Read the destination before attempting creation so the fallback
        // has the pre-existing management interface's id to hand.
        let dest_inventory = read_inventory(api, dest)?;
        info!(dest, name = %interface.name, "creating management interface");
        match api.create_interface(dest, &CreateInterface::management(interface)) {
            Ok(()) => {
                stats.management_created = true;
            }
            Err(err) => {
                warn!(
                    dest,
                    error = %err,
                    "management interface creation failed, updating the existing one"
                );
                let existing = dest_inventory.management().ok_or_else(|| {
                    PhaseError::NoManagementInterface {
                        serial: dest.to_string(),
                    }
                })?;
                api.update_interface(
                    dest,
                    &existing.interface.interface_id,
                    &InterfacePatch::ip(options.default_mgmt_ip),
                )?;
                stats.management_updated_in_place = true;
            }
        }
    }
    Ok(())
}
