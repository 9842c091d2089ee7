use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

use crate::errors::ApiError;
use crate::types::{DhcpConfig, InterfaceConfig, MulticastRouting, OspfSettings};

mod http;

pub use http::DashboardClient;

/// The slice of the device-management API the migration consumes.
///
/// All calls are synchronous and return either structured success or an
/// [`ApiError`]; retries, backoff and timeouts are the implementation's
/// concern. Tests substitute an in-memory device pair for the HTTP client.
pub trait DeviceApi {
    fn list_routing_interfaces(&self, serial: &str) -> Result<Vec<InterfaceConfig>, ApiError>;

    fn get_dhcp_config(&self, serial: &str, interface_id: &str) -> Result<DhcpConfig, ApiError>;

    fn create_interface(&self, serial: &str, request: &CreateInterface) -> Result<(), ApiError>;

    fn update_interface(
        &self,
        serial: &str,
        interface_id: &str,
        patch: &InterfacePatch,
    ) -> Result<(), ApiError>;

    fn delete_interface(&self, serial: &str, interface_id: &str) -> Result<(), ApiError>;

    fn update_dhcp_config(
        &self,
        serial: &str,
        interface_id: &str,
        dhcp: &DhcpConfig,
    ) -> Result<(), ApiError>;
}

/// Body of a routed-interface creation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateInterface {
    pub name: String,
    pub interface_ip: Ipv4Addr,
    pub vlan_id: u16,
    pub subnet: Ipv4Net,
    pub multicast_routing: MulticastRouting,
    pub ospf_settings: OspfSettings,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<Ipv4Addr>,
}

impl CreateInterface {
    /// Creation request for an ordinary routed interface. The default
    /// gateway is deliberately left out; only the management interface
    /// carries one.
    pub fn routed(interface: &InterfaceConfig) -> Self {
        CreateInterface {
            name: interface.name.clone(),
            interface_ip: interface.interface_ip,
            vlan_id: interface.vlan_id,
            subnet: interface.subnet,
            multicast_routing: interface.multicast_routing,
            ospf_settings: interface.ospf_settings.clone(),
            default_gateway: None,
        }
    }

    /// Creation request for the management interface, gateway included.
    pub fn management(interface: &InterfaceConfig) -> Self {
        CreateInterface {
            default_gateway: interface.default_gateway,
            ..CreateInterface::routed(interface)
        }
    }
}

/// Partial interface update; only the populated fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfacePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interface_ip: Option<Ipv4Addr>,
}

impl InterfacePatch {
    pub fn ip(address: Ipv4Addr) -> Self {
        InterfacePatch {
            interface_ip: Some(address),
        }
    }
}
