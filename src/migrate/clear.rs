use tracing::info;

use crate::api::{DeviceApi, InterfacePatch};
use crate::errors::ApiError;
use crate::types::{InventorySnapshot, MigrationOptions, MigrationStats};

/// Phase 2: walk the source snapshot in listing order, deleting every
/// ordinary interface and relocating the management interface.
///
/// The management interface is updated, never deleted: removing it before
/// its address is reassigned would cut the very path the remaining API
/// calls travel over. Moving it to the relocation address also frees the
/// original address for reuse on the destination.
pub(super) fn clear_source<A: DeviceApi + ?Sized>(
    api: &A,
    options: &MigrationOptions,
    snapshot: &InventorySnapshot,
    stats: &mut MigrationStats,
) -> Result<(), ApiError> {
    for entry in &snapshot.entries {
        let interface = &entry.interface;
        info!(
            serial = %snapshot.serial,
            interface_id = %interface.interface_id,
            name = %interface.name,
            "processing source interface"
        );
        if !interface.is_management() {
            info!(interface_id = %interface.interface_id, "deleting source interface");
            api.delete_interface(&snapshot.serial, &interface.interface_id)?;
            stats.interfaces_deleted += 1;
        } else {
            info!(
                interface_id = %interface.interface_id,
                relocation_ip = %options.relocation_ip,
                "relocating source management interface"
            );
            api.update_interface(
                &snapshot.serial,
                &interface.interface_id,
                &InterfacePatch::ip(options.relocation_ip),
            )?;
            stats.management_relocated = true;
        }
    }
    Ok(())
}
