use anyhow::{Context, Result};

use crate::api::DeviceApi;
use crate::inventory::{read_inventory, write_snapshot};

use super::SnapshotArgs;

pub(crate) fn run_snapshot<A: DeviceApi>(api: &A, args: SnapshotArgs) -> Result<()> {
    let snapshot = read_inventory(api, &args.device)
        .with_context(|| format!("Failed to read inventory of {}", args.device))?;

    match args.out {
        Some(path) => {
            write_snapshot(&snapshot, &path)
                .with_context(|| format!("Failed to write snapshot: {}", path.display()))?;
            println!("Inventory of {} written to: {}", args.device, path.display());
            println!("Interfaces found: {}", snapshot.len());
        }
        None => {
            let json = serde_json::to_string_pretty(&snapshot)
                .context("Failed to serialize snapshot")?;
            println!("{json}");
        }
    }

    Ok(())
}
