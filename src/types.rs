use std::net::Ipv4Addr;
use std::path::PathBuf;

use ipnet::Ipv4Net;
use serde::{Deserialize, Serialize};

/// Interface name the dashboard reserves for the management SVI.
///
/// Each switch stack carries at most one interface with this name; it is the
/// interface the dashboard itself reaches the stack through.
pub const MANAGEMENT_NAME: &str = "Management";

/// Area value the dashboard reports when OSPF is not running on an interface.
pub const OSPF_AREA_DISABLED: &str = "ospfDisabled";

/// A layer 3 routed interface as reported by the dashboard.
///
/// `interface_id` is assigned by the dashboard at creation time and is only
/// unique within a device; the "same" logical interface gets a fresh id when
/// recreated on another stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceConfig {
    pub interface_id: String,
    pub name: String,
    pub interface_ip: Ipv4Addr,
    pub subnet: Ipv4Net,
    pub vlan_id: u16,
    pub multicast_routing: MulticastRouting,
    /// Only meaningful on the management interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<Ipv4Addr>,
    pub ospf_settings: OspfSettings,
}

impl InterfaceConfig {
    pub fn is_management(&self) -> bool {
        self.name == MANAGEMENT_NAME
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MulticastRouting {
    #[serde(rename = "disabled")]
    Disabled,
    #[serde(rename = "enabled")]
    Enabled,
    #[serde(rename = "IGMP snooping querier")]
    IgmpSnoopingQuerier,
}

/// OSPF configuration of a routed interface.
///
/// The dashboard expresses "OSPF off" as `{"area": "ospfDisabled"}` with no
/// further fields; an enabled interface carries the area plus cost and
/// passive flag. Serialization preserves that shape, so writing an interface
/// back emits only `area` for the disabled variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OspfSettings {
    Enabled {
        area: String,
        cost: u32,
        #[serde(rename = "isPassiveEnabled")]
        is_passive_enabled: bool,
    },
    Disabled {
        area: String,
    },
}

impl OspfSettings {
    pub fn disabled() -> Self {
        OspfSettings::Disabled {
            area: OSPF_AREA_DISABLED.to_string(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, OspfSettings::Enabled { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DhcpMode {
    #[serde(rename = "dhcpDisabled")]
    Disabled,
    #[serde(rename = "dhcpRelay")]
    Relay,
    #[serde(rename = "dhcpServer")]
    Server,
}

/// Per-interface DHCP settings, fetched and written through the dashboard's
/// separate `/dhcp` endpoint.
///
/// Only the disabled and relay modes are carried across a migration; the
/// many DHCP-server fields the endpoint can return are ignored here and
/// never written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DhcpConfig {
    pub dhcp_mode: DhcpMode,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dhcp_relay_server_ips: Vec<Ipv4Addr>,
}

impl DhcpConfig {
    pub fn disabled() -> Self {
        DhcpConfig {
            dhcp_mode: DhcpMode::Disabled,
            dhcp_relay_server_ips: Vec::new(),
        }
    }

    pub fn relay(server_ips: Vec<Ipv4Addr>) -> Self {
        DhcpConfig {
            dhcp_mode: DhcpMode::Relay,
            dhcp_relay_server_ips: server_ips,
        }
    }

    pub fn is_relay(&self) -> bool {
        self.dhcp_mode == DhcpMode::Relay
    }
}

/// One interface together with its DHCP settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SviEntry {
    pub interface: InterfaceConfig,
    pub dhcp: DhcpConfig,
}

/// The full routed-interface state of one device at one instant.
///
/// Entries keep the device's listing order. A snapshot is never merged with
/// another device's and never reused across phases; the device itself stays
/// the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub serial: String,
    pub entries: Vec<SviEntry>,
}

impl InventorySnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn management(&self) -> Option<&SviEntry> {
        self.entries.iter().find(|e| e.interface.is_management())
    }

    pub fn find_by_vlan(&self, vlan_id: u16) -> Option<&SviEntry> {
        self.entries.iter().find(|e| e.interface.vlan_id == vlan_id)
    }
}

/// Addresses and paths the orchestrator needs beyond the two serials.
///
/// Built once by the CLI and passed by reference into `run_migration`.
#[derive(Debug, Clone)]
pub struct MigrationOptions {
    /// Address the source management interface is moved to in phase 2,
    /// freeing its original address while keeping the stack reachable.
    pub relocation_ip: Ipv4Addr,
    /// Address applied to a pre-existing destination management interface
    /// when creating a new one fails in phase 3.
    pub default_mgmt_ip: Ipv4Addr,
    /// Where the phase 1 source snapshot is written for operator inspection.
    pub snapshot_path: PathBuf,
}

#[derive(Debug, Default)]
pub struct MigrationStats {
    pub interfaces_found: usize,
    pub interfaces_deleted: usize,
    pub management_relocated: bool,
    pub interfaces_created: usize,
    pub management_created: bool,
    pub management_updated_in_place: bool,
    pub relays_matched: usize,
    pub relays_unmatched: usize,
    pub relays_applied: usize,
}
