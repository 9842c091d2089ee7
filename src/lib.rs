mod api;
pub mod cli;
mod config;
mod errors;
mod inventory;
mod migrate;
mod types;

pub use api::{CreateInterface, DashboardClient, DeviceApi, InterfacePatch};
pub use config::ApiConfig;
pub use errors::{ApiError, MigrationFailure, PhaseError};
pub use inventory::{read_inventory, write_snapshot};
pub use migrate::{run_migration, Phase};
pub use types::{
    DhcpConfig, DhcpMode, InterfaceConfig, InventorySnapshot, MigrationOptions, MigrationStats,
    MulticastRouting, OspfSettings, SviEntry, MANAGEMENT_NAME, OSPF_AREA_DISABLED,
};
