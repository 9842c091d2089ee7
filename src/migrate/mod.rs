use std::fmt;

use tracing::info;

use crate::api::DeviceApi;
use crate::errors::{MigrationFailure, PhaseError};
use crate::inventory::{read_inventory, write_snapshot};
use crate::types::{InventorySnapshot, MigrationOptions, MigrationStats};

mod clear;
mod dhcp;
mod provision;

/// The six ordered, independently-failing steps of a migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    SnapshotSource,
    ClearSource,
    ProvisionDestination,
    SnapshotDestination,
    MergeDhcp,
    ApplyDhcp,
}

impl Phase {
    pub fn number(self) -> u8 {
        match self {
            Phase::SnapshotSource => 1,
            Phase::ClearSource => 2,
            Phase::ProvisionDestination => 3,
            Phase::SnapshotDestination => 4,
            Phase::MergeDhcp => 5,
            Phase::ApplyDhcp => 6,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::SnapshotSource => "snapshot source",
            Phase::ClearSource => "clear source interfaces",
            Phase::ProvisionDestination => "provision destination interfaces",
            Phase::SnapshotDestination => "re-snapshot destination",
            Phase::MergeDhcp => "merge DHCP relay settings",
            Phase::ApplyDhcp => "apply DHCP relay settings",
        };
        f.write_str(name)
    }
}

/// Move every SVI from `source` to `dest`, carrying DHCP-disabled and
/// DHCP-relay settings along. Full DHCP server configurations are not
/// migrated.
///
/// Phases run strictly in order against live device state; a failure halts
/// the run at that phase with everything earlier already applied. The only
/// built-in recovery is the phase 3 management-creation fallback.
pub fn run_migration<A: DeviceApi + ?Sized>(
    api: &A,
    options: &MigrationOptions,
    source: &str,
    dest: &str,
) -> Result<MigrationStats, MigrationFailure> {
    let mut stats = MigrationStats::default();

    info!(source, "phase 1: snapshotting source inventory");
    let snapshot = snapshot_source(api, options, source).map_err(at_phase(Phase::SnapshotSource))?;
    stats.interfaces_found = snapshot.len();

    info!(source, "phase 2: clearing source interfaces");
    clear::clear_source(api, options, &snapshot, &mut stats)
        .map_err(at_phase(Phase::ClearSource))?;

    info!(dest, "phase 3: provisioning destination interfaces");
    provision::provision_destination(api, options, &snapshot, dest, &mut stats)
        .map_err(at_phase(Phase::ProvisionDestination))?;

    info!(dest, "phase 4: re-reading destination inventory");
    let mut dest_snapshot =
        read_inventory(api, dest).map_err(at_phase(Phase::SnapshotDestination))?;

    info!("phase 5: merging DHCP relay settings by VLAN");
    dhcp::merge_relay_settings(&snapshot, &mut dest_snapshot, &mut stats);

    info!(dest, "phase 6: applying DHCP relay settings");
    dhcp::apply_relay_settings(api, &dest_snapshot, &mut stats)
        .map_err(at_phase(Phase::ApplyDhcp))?;

    info!(source, dest, "migration complete");
    Ok(stats)
}

/// Phase 1: read the source inventory and persist the diagnostic artifact.
fn snapshot_source<A: DeviceApi + ?Sized>(
    api: &A,
    options: &MigrationOptions,
    source: &str,
) -> Result<InventorySnapshot, PhaseError> {
    let snapshot = read_inventory(api, source)?;
    write_snapshot(&snapshot, &options.snapshot_path).map_err(|e| PhaseError::Artifact {
        path: options.snapshot_path.clone(),
        source: e,
    })?;
    info!(path = %options.snapshot_path.display(), "wrote source snapshot artifact");
    Ok(snapshot)
}

fn at_phase<E: Into<PhaseError>>(phase: Phase) -> impl FnOnce(E) -> MigrationFailure {
    move |error| MigrationFailure {
        phase,
        error: error.into(),
    }
}
