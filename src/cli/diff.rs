use anyhow::{anyhow, Context, Result};
use std::fmt::Write as _;
use std::io::{self, Write};

use crate::api::DeviceApi;
use crate::inventory::read_inventory;
use crate::types::{DhcpMode, InventorySnapshot, MulticastRouting, OspfSettings};

use super::DiffArgs;

pub(crate) fn run_diff<A: DeviceApi>(api: &A, args: DiffArgs) -> Result<()> {
    let source = read_inventory(api, &args.source)
        .with_context(|| format!("Failed to read inventory of {}", args.source))?;
    let dest = read_inventory(api, &args.dest)
        .with_context(|| format!("Failed to read inventory of {}", args.dest))?;

    let source_text = render_inventory(&source);
    let dest_text = render_inventory(&dest);

    if source_text == dest_text {
        if !args.quiet {
            println!("No deviations.");
        }
        return Ok(());
    }

    if !args.quiet {
        let diff = similar::TextDiff::from_lines(&source_text, &dest_text);
        let mut out = io::stdout().lock();
        let unified = diff
            .unified_diff()
            .context_radius(3)
            .header(&args.source, &args.dest)
            .to_string();
        write!(out, "{}", unified)?;
    }

    Err(anyhow!("diff: deviations detected"))
}

/// Render a snapshot in a device-independent text form.
///
/// Interface ids are dashboard-assigned and never match across devices, so
/// they are omitted; entries are ordered by VLAN id so listing order does
/// not show up as a deviation either.
fn render_inventory(snapshot: &InventorySnapshot) -> String {
    let mut entries: Vec<_> = snapshot.entries.iter().collect();
    entries.sort_by_key(|e| e.interface.vlan_id);

    let mut out = String::new();
    for entry in entries {
        let interface = &entry.interface;
        let _ = writeln!(
            out,
            "interface \"{}\" vlan {}",
            interface.name, interface.vlan_id
        );
        let _ = writeln!(
            out,
            "  ip {} subnet {}",
            interface.interface_ip, interface.subnet
        );
        if let Some(gateway) = interface.default_gateway {
            let _ = writeln!(out, "  gateway {gateway}");
        }
        let multicast = match interface.multicast_routing {
            MulticastRouting::Disabled => "disabled",
            MulticastRouting::Enabled => "enabled",
            MulticastRouting::IgmpSnoopingQuerier => "IGMP snooping querier",
        };
        let _ = writeln!(out, "  multicast {multicast}");
        match &interface.ospf_settings {
            OspfSettings::Disabled { .. } => {
                let _ = writeln!(out, "  ospf disabled");
            }
            OspfSettings::Enabled {
                area,
                cost,
                is_passive_enabled,
            } => {
                let _ = writeln!(
                    out,
                    "  ospf area {area} cost {cost} passive {is_passive_enabled}"
                );
            }
        }
        match entry.dhcp.dhcp_mode {
            DhcpMode::Disabled => {
                let _ = writeln!(out, "  dhcp disabled");
            }
            DhcpMode::Server => {
                let _ = writeln!(out, "  dhcp server");
            }
            DhcpMode::Relay => {
                let servers: Vec<String> = entry
                    .dhcp
                    .dhcp_relay_server_ips
                    .iter()
                    .map(|ip| ip.to_string())
                    .collect();
                let _ = writeln!(out, "  dhcp relay {}", servers.join(" "));
            }
        }
    }
    out
}
