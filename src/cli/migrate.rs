use anyhow::{bail, Result};
use std::process;

use crate::api::DeviceApi;
use crate::migrate::run_migration;
use crate::types::MigrationOptions;

use super::{print_migrate_stats, MigrateArgs};

pub(crate) fn run_migrate<A: DeviceApi>(api: &A, args: MigrateArgs) -> Result<()> {
    if args.source == args.dest {
        bail!(
            "Source and destination must be different devices (both were {})",
            args.source
        );
    }

    let options = MigrationOptions {
        relocation_ip: args.relocation_ip,
        default_mgmt_ip: args.default_mgmt_ip,
        snapshot_path: args.snapshot_out,
    };

    match run_migration(api, &options, &args.source, &args.dest) {
        Ok(stats) => {
            println!("\nMigration completed successfully!");
            print_migrate_stats(&stats);
            Ok(())
        }
        Err(failure) => {
            // The devices are left in whatever state the completed steps
            // produced; the exit code is the failed phase number.
            let code = i32::from(failure.phase.number());
            eprintln!("Error: {:#}", anyhow::Error::new(failure));
            process::exit(code);
        }
    }
}
