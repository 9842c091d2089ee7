use anyhow::Result;
use clap::{Parser, Subcommand};
use std::ffi::OsString;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use crate::api::DashboardClient;
use crate::config::ApiConfig;
use crate::types::MigrationStats;

mod diff;
mod migrate;
mod snapshot;

pub(crate) struct MigrateArgs {
    pub(crate) source: String,
    pub(crate) dest: String,
    pub(crate) relocation_ip: Ipv4Addr,
    pub(crate) default_mgmt_ip: Ipv4Addr,
    pub(crate) snapshot_out: PathBuf,
}

pub(crate) struct SnapshotArgs {
    pub(crate) device: String,
    pub(crate) out: Option<PathBuf>,
}

pub(crate) struct DiffArgs {
    pub(crate) source: String,
    pub(crate) dest: String,
    pub(crate) quiet: bool,
}

#[derive(Parser)]
#[command(
    name = "svimove",
    about = "Migrate layer 3 SVIs and DHCP relay settings between Meraki switch stacks",
    long_about = "Moves every routed interface from a source switch stack to a destination \
                  stack through the dashboard API, carrying DHCP-disabled and DHCP-relay \
                  settings along. Full DHCP server configurations are not migrated.",
    after_help = "The dashboard API key is read from the MERAKI_API_KEY environment variable \
                  (a .env file in the working directory is honored).\n\nExamples:\n  \
                  svimove snapshot --device Q2SW-AAAA-BBBB\n  \
                  svimove migrate --source Q2SW-AAAA-BBBB --dest Q2SW-CCCC-DDDD \\\n      \
                  --relocation-ip 172.16.0.250 --default-mgmt-ip 192.168.128.1\n  \
                  svimove diff --source Q2SW-AAAA-BBBB --dest Q2SW-CCCC-DDDD\n\nA failed \
                  migration exits with the number of the phase it stopped at (1-6)."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Move all SVIs from the source stack to the destination stack
    Migrate {
        /// Serial of the source switch stack
        #[arg(long)]
        source: String,

        /// Serial of the destination switch stack
        #[arg(long)]
        dest: String,

        /// Address the source management interface is moved to
        #[arg(long)]
        relocation_ip: Ipv4Addr,

        /// Address for a pre-existing destination management interface when
        /// creating a new one fails
        #[arg(long)]
        default_mgmt_ip: Ipv4Addr,

        /// Where to write the source inventory snapshot for inspection
        #[arg(long, default_value = "svi.json")]
        snapshot_out: PathBuf,
    },

    /// Dump one stack's SVI inventory as JSON (read-only)
    Snapshot {
        /// Serial of the switch stack to read
        #[arg(long)]
        device: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Compare the SVI inventories of two stacks (read-only)
    Diff {
        /// Serial of the first switch stack
        #[arg(long)]
        source: String,

        /// Serial of the second switch stack
        #[arg(long)]
        dest: String,

        /// Suppress diff output (exit code still indicates deviations)
        #[arg(long)]
        quiet: bool,
    },
}

pub fn run_with_args<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    let config = ApiConfig::from_env()?;
    let client = DashboardClient::new(&config)?;

    match cli.command {
        Commands::Migrate {
            source,
            dest,
            relocation_ip,
            default_mgmt_ip,
            snapshot_out,
        } => migrate::run_migrate(
            &client,
            MigrateArgs {
                source,
                dest,
                relocation_ip,
                default_mgmt_ip,
                snapshot_out,
            },
        ),
        Commands::Snapshot { device, out } => {
            snapshot::run_snapshot(&client, SnapshotArgs { device, out })
        }
        Commands::Diff {
            source,
            dest,
            quiet,
        } => diff::run_diff(
            &client,
            DiffArgs {
                source,
                dest,
                quiet,
            },
        ),
    }
}

pub(crate) fn print_migrate_stats(stats: &MigrationStats) {
    println!("Source interfaces found: {}", stats.interfaces_found);
    println!(
        "Source interfaces deleted: {}",
        stats.interfaces_deleted
    );
    println!(
        "Source management interface relocated: {}",
        if stats.management_relocated { "yes" } else { "no" }
    );
    println!(
        "Destination interfaces created: {}",
        stats.interfaces_created
    );
    if stats.management_created {
        println!("Destination management interface created: yes");
    }
    if stats.management_updated_in_place {
        println!("Existing destination management interface updated instead of created");
    }
    println!("DHCP relay interfaces matched by VLAN: {}", stats.relays_matched);
    if stats.relays_unmatched > 0 {
        println!(
            "DHCP relay interfaces with no destination VLAN match: {}",
            stats.relays_unmatched
        );
    }
    println!("DHCP relay settings applied: {}", stats.relays_applied);
}
