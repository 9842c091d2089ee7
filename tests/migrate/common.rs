use std::cell::RefCell;
use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use svimove::{
    ApiError, CreateInterface, DeviceApi, DhcpConfig, InterfaceConfig, InterfacePatch,
    MigrationOptions, MulticastRouting, OspfSettings, SviEntry, MANAGEMENT_NAME,
};

pub const RELOCATION_IP: &str = "172.16.0.250";
pub const DEFAULT_MGMT_IP: &str = "192.168.128.1";

pub fn ip(address: &str) -> Ipv4Addr {
    address.parse().expect("valid IPv4 address")
}

pub fn temp_path(label: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("svimove_{label}_{}_{}.json", std::process::id(), nanos));
    path
}

pub fn options(label: &str) -> MigrationOptions {
    MigrationOptions {
        relocation_ip: ip(RELOCATION_IP),
        default_mgmt_ip: ip(DEFAULT_MGMT_IP),
        snapshot_path: temp_path(label),
    }
}

pub fn routed_interface(
    id: &str,
    name: &str,
    vlan_id: u16,
    address: &str,
    subnet: &str,
) -> InterfaceConfig {
    InterfaceConfig {
        interface_id: id.to_string(),
        name: name.to_string(),
        interface_ip: ip(address),
        subnet: subnet.parse().expect("valid subnet"),
        vlan_id,
        multicast_routing: MulticastRouting::Disabled,
        default_gateway: None,
        ospf_settings: OspfSettings::disabled(),
    }
}

pub fn management_interface(id: &str, address: &str, gateway: &str) -> InterfaceConfig {
    let subnet = ipnet::Ipv4Net::new(ip(address), 24).expect("valid prefix").trunc();
    InterfaceConfig {
        default_gateway: Some(ip(gateway)),
        ..routed_interface(id, MANAGEMENT_NAME, 1, address, &subnet.to_string())
    }
}

pub fn svi(interface: InterfaceConfig, dhcp: DhcpConfig) -> SviEntry {
    SviEntry { interface, dhcp }
}

pub fn relay(servers: &[&str]) -> DhcpConfig {
    DhcpConfig::relay(servers.iter().map(|s| ip(s)).collect())
}

/// Every mutation issued against the mock, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create {
        serial: String,
        request: CreateInterface,
    },
    Patch {
        serial: String,
        interface_id: String,
        interface_ip: Option<Ipv4Addr>,
    },
    Delete {
        serial: String,
        interface_id: String,
    },
    DhcpUpdate {
        serial: String,
        interface_id: String,
        dhcp: DhcpConfig,
    },
}

#[derive(Default)]
struct MockState {
    devices: HashMap<String, Vec<SviEntry>>,
    next_id: u32,
    calls: Vec<Call>,
}

/// In-memory stand-in for the dashboard: a pair of devices whose SVI tables
/// respond to the same capability set the real client exposes. Enforces the
/// one-management-interface rule the way the dashboard does.
#[derive(Default)]
pub struct MockApi {
    state: RefCell<MockState>,
    /// When set, deletes fail with 404 as if the interfaces were already
    /// removed by an earlier run.
    pub fail_deletes: bool,
    /// Force management-interface creation to fail regardless of device
    /// state.
    pub reject_management_create: bool,
    /// Interface name whose DHCP fetch fails with a server error.
    pub fail_dhcp_get_for: Option<String>,
}

impl MockApi {
    pub fn new() -> Self {
        MockApi::default()
    }

    pub fn add_device(&self, serial: &str, entries: Vec<SviEntry>) {
        self.state
            .borrow_mut()
            .devices
            .insert(serial.to_string(), entries);
    }

    pub fn device(&self, serial: &str) -> Vec<SviEntry> {
        self.state
            .borrow()
            .devices
            .get(serial)
            .cloned()
            .expect("device exists")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn dhcp_update_calls(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::DhcpUpdate { .. }))
            .collect()
    }

    fn not_found(what: &str) -> ApiError {
        ApiError::Status {
            status: 404,
            body: format!("{what} not found"),
        }
    }
}

impl DeviceApi for MockApi {
    fn list_routing_interfaces(&self, serial: &str) -> Result<Vec<InterfaceConfig>, ApiError> {
        let state = self.state.borrow();
        let device = state
            .devices
            .get(serial)
            .ok_or_else(|| Self::not_found("device"))?;
        Ok(device.iter().map(|e| e.interface.clone()).collect())
    }

    fn get_dhcp_config(&self, serial: &str, interface_id: &str) -> Result<DhcpConfig, ApiError> {
        let state = self.state.borrow();
        let device = state
            .devices
            .get(serial)
            .ok_or_else(|| Self::not_found("device"))?;
        let entry = device
            .iter()
            .find(|e| e.interface.interface_id == interface_id)
            .ok_or_else(|| Self::not_found("interface"))?;
        if let Some(name) = &self.fail_dhcp_get_for {
            if entry.interface.name == *name {
                return Err(ApiError::Status {
                    status: 500,
                    body: "internal error".to_string(),
                });
            }
        }
        Ok(entry.dhcp.clone())
    }

    fn create_interface(&self, serial: &str, request: &CreateInterface) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let device = state
            .devices
            .get_mut(serial)
            .ok_or_else(|| Self::not_found("device"))?;

        if request.name == MANAGEMENT_NAME
            && (self.reject_management_create
                || device.iter().any(|e| e.interface.is_management()))
        {
            return Err(ApiError::Status {
                status: 400,
                body: "only one management interface is permitted".to_string(),
            });
        }

        state.next_id += 1;
        let interface = InterfaceConfig {
            interface_id: format!("mock-{}", state.next_id),
            name: request.name.clone(),
            interface_ip: request.interface_ip,
            subnet: request.subnet,
            vlan_id: request.vlan_id,
            multicast_routing: request.multicast_routing,
            default_gateway: request.default_gateway,
            ospf_settings: request.ospf_settings.clone(),
        };
        device.push(SviEntry {
            interface,
            dhcp: DhcpConfig::disabled(),
        });
        state.calls.push(Call::Create {
            serial: serial.to_string(),
            request: request.clone(),
        });
        Ok(())
    }

    fn update_interface(
        &self,
        serial: &str,
        interface_id: &str,
        patch: &InterfacePatch,
    ) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let device = state
            .devices
            .get_mut(serial)
            .ok_or_else(|| Self::not_found("device"))?;
        let entry = device
            .iter_mut()
            .find(|e| e.interface.interface_id == interface_id)
            .ok_or_else(|| Self::not_found("interface"))?;
        if let Some(address) = patch.interface_ip {
            entry.interface.interface_ip = address;
        }
        state.calls.push(Call::Patch {
            serial: serial.to_string(),
            interface_id: interface_id.to_string(),
            interface_ip: patch.interface_ip,
        });
        Ok(())
    }

    fn delete_interface(&self, serial: &str, interface_id: &str) -> Result<(), ApiError> {
        if self.fail_deletes {
            return Err(Self::not_found("interface"));
        }
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let device = state
            .devices
            .get_mut(serial)
            .ok_or_else(|| Self::not_found("device"))?;
        let position = device
            .iter()
            .position(|e| e.interface.interface_id == interface_id)
            .ok_or_else(|| Self::not_found("interface"))?;
        device.remove(position);
        state.calls.push(Call::Delete {
            serial: serial.to_string(),
            interface_id: interface_id.to_string(),
        });
        Ok(())
    }

    fn update_dhcp_config(
        &self,
        serial: &str,
        interface_id: &str,
        dhcp: &DhcpConfig,
    ) -> Result<(), ApiError> {
        let mut state = self.state.borrow_mut();
        let state = &mut *state;
        let device = state
            .devices
            .get_mut(serial)
            .ok_or_else(|| Self::not_found("device"))?;
        let entry = device
            .iter_mut()
            .find(|e| e.interface.interface_id == interface_id)
            .ok_or_else(|| Self::not_found("interface"))?;
        entry.dhcp = dhcp.clone();
        state.calls.push(Call::DhcpUpdate {
            serial: serial.to_string(),
            interface_id: interface_id.to_string(),
            dhcp: dhcp.clone(),
        });
        Ok(())
    }
}
