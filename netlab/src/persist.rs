// NetLab: Offline Network Topology Simulator
// Copyright (C) 2021  Tibor Schneider
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Topology Persistence
//!
//! Save and load topologies as JSON documents. The document types are kept
//! separate from the model so the wire format can stay stable while the
//! model evolves. Missing optional fields take the conventional defaults;
//! devices with an unknown `type` are dropped with a warning.

use crate::error::Error;
use crate::topology::{
    Device, DeviceKind, HostConfig, Interface, Link, Network, OspfConfig, PimDmConfig, Protocol,
    Ripv2Config, RouterConfig, StaticRoute,
};
use log::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Topology document
#[derive(Debug, Serialize, Deserialize)]
struct NetworkDoc {
    name: String,
    devices: Vec<DeviceDoc>,
    links: Vec<LinkDoc>,
}

/// Device record of a topology document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceDoc {
    id: String,
    name: String,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    interfaces: Vec<InterfaceDoc>,
    // Router-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    protocol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    static_routes: Option<Vec<StaticRouteDoc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ospf_config: Option<OspfConfigDoc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ripv2_networks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pim_dm_interfaces: Option<Vec<String>>,
    // Host-only fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    default_gateway: Option<String>,
}

/// Interface record of a topology document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InterfaceDoc {
    name: String,
    #[serde(default)]
    ip_address: String,
    #[serde(default)]
    subnet_mask: String,
    #[serde(default = "default_ospf_cost")]
    ospf_cost: u32,
    #[serde(default)]
    description: String,
}

/// Static-route record of a topology document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StaticRouteDoc {
    #[serde(default)]
    destination: String,
    #[serde(default)]
    mask: String,
    #[serde(default)]
    next_hop: String,
    #[serde(default = "default_metric")]
    metric: u32,
}

/// OSPF process record of a topology document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OspfConfigDoc {
    #[serde(default)]
    router_id: String,
    #[serde(default = "default_area")]
    area: String,
    #[serde(default = "default_process_id")]
    process_id: u32,
}

/// Link record of a topology document
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LinkDoc {
    id: String,
    device1_id: String,
    interface1: String,
    device2_id: String,
    interface2: String,
    #[serde(default = "default_bandwidth")]
    bandwidth: u32,
    #[serde(default = "default_delay")]
    delay: u32,
}

fn default_ospf_cost() -> u32 {
    1
}
fn default_metric() -> u32 {
    1
}
fn default_area() -> String {
    "0".to_string()
}
fn default_process_id() -> u32 {
    1
}
fn default_bandwidth() -> u32 {
    1000
}
fn default_delay() -> u32 {
    1
}

/// Serialize a network to a JSON string.
pub fn to_json(net: &Network) -> Result<String, Error> {
    Ok(serde_json::to_string_pretty(&to_doc(net))?)
}

/// Rebuild a network from a JSON string.
pub fn from_json(json: &str) -> Result<Network, Error> {
    Ok(from_doc(serde_json::from_str(json)?))
}

/// Save a network to a file.
pub fn save<P: AsRef<Path>>(net: &Network, path: P) -> Result<(), Error> {
    fs::write(path, to_json(net)?)?;
    Ok(())
}

/// Load a network from a file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Network, Error> {
    from_json(&fs::read_to_string(path)?)
}

fn to_doc(net: &Network) -> NetworkDoc {
    NetworkDoc {
        name: net.name().to_string(),
        devices: net.devices().map(device_to_doc).collect(),
        links: net
            .links()
            .iter()
            .map(|link| LinkDoc {
                id: link.id().to_string(),
                device1_id: link.device1_id.clone(),
                interface1: link.interface1.clone(),
                device2_id: link.device2_id.clone(),
                interface2: link.interface2.clone(),
                bandwidth: link.bandwidth,
                delay: link.delay,
            })
            .collect(),
    }
}

fn device_to_doc(device: &Device) -> DeviceDoc {
    let mut doc = DeviceDoc {
        id: device.id().to_string(),
        name: device.name.clone(),
        x: device.x,
        y: device.y,
        kind: String::new(),
        interfaces: device
            .interfaces
            .iter()
            .map(|iface| InterfaceDoc {
                name: iface.name.clone(),
                ip_address: iface.ip.clone(),
                subnet_mask: iface.mask.clone(),
                ospf_cost: iface.ospf_cost,
                description: iface.description.clone(),
            })
            .collect(),
        protocol: None,
        static_routes: None,
        ospf_config: None,
        ripv2_networks: None,
        pim_dm_interfaces: None,
        default_gateway: None,
    };

    match &device.kind {
        DeviceKind::Router(cfg) => {
            doc.kind = "Router".to_string();
            doc.protocol = Some(cfg.protocol.config_str().to_string());
            doc.static_routes = Some(
                cfg.static_routes
                    .iter()
                    .map(|route| StaticRouteDoc {
                        destination: route.destination.clone(),
                        mask: route.mask.clone(),
                        next_hop: route.next_hop.clone(),
                        metric: route.metric,
                    })
                    .collect(),
            );
            doc.ospf_config = Some(OspfConfigDoc {
                router_id: cfg.ospf.router_id.clone(),
                area: cfg.ospf.area.clone(),
                process_id: cfg.ospf.process_id,
            });
            doc.ripv2_networks = Some(cfg.ripv2.networks.clone());
            doc.pim_dm_interfaces = Some(cfg.pim_dm.enabled_interfaces.clone());
        }
        DeviceKind::Switch => doc.kind = "Switch".to_string(),
        DeviceKind::Hub => doc.kind = "Hub".to_string(),
        DeviceKind::Host(cfg) => {
            doc.kind = "PC".to_string();
            doc.default_gateway = Some(cfg.default_gateway.clone());
        }
    }

    doc
}

fn from_doc(doc: NetworkDoc) -> Network {
    let mut net = Network::new();
    net.set_name(doc.name);

    for dev_doc in doc.devices {
        let kind = match dev_doc.kind.as_str() {
            "Router" => DeviceKind::Router(RouterConfig {
                protocol: Protocol::from_config_str(dev_doc.protocol.as_deref().unwrap_or("Static")),
                static_routes: dev_doc
                    .static_routes
                    .unwrap_or_default()
                    .into_iter()
                    .map(|route| StaticRoute {
                        destination: route.destination,
                        mask: route.mask,
                        next_hop: route.next_hop,
                        metric: route.metric,
                    })
                    .collect(),
                ospf: dev_doc
                    .ospf_config
                    .map(|ospf| OspfConfig {
                        router_id: ospf.router_id,
                        area: ospf.area,
                        process_id: ospf.process_id,
                    })
                    .unwrap_or_default(),
                ripv2: Ripv2Config { networks: dev_doc.ripv2_networks.unwrap_or_default() },
                pim_dm: PimDmConfig {
                    enabled_interfaces: dev_doc.pim_dm_interfaces.unwrap_or_default(),
                },
                is_host_pc: false,
                routing_table: Vec::new(),
            }),
            "Switch" => DeviceKind::Switch,
            "Hub" => DeviceKind::Hub,
            "PC" => DeviceKind::Host(HostConfig {
                default_gateway: dev_doc.default_gateway.unwrap_or_default(),
            }),
            other => {
                warn!("dropping device '{}' with unknown type '{}'", dev_doc.name, other);
                continue;
            }
        };

        let device = Device {
            id: dev_doc.id,
            name: dev_doc.name,
            x: dev_doc.x,
            y: dev_doc.y,
            interfaces: dev_doc
                .interfaces
                .into_iter()
                .map(|iface| Interface {
                    name: iface.name,
                    ip: iface.ip_address,
                    mask: iface.subnet_mask,
                    ospf_cost: iface.ospf_cost,
                    description: iface.description,
                    host_binding: String::new(),
                })
                .collect(),
            kind,
        };
        net.add_device(device);
    }

    for link_doc in doc.links {
        net.add_link(Link {
            id: link_doc.id,
            device1_id: link_doc.device1_id,
            interface1: link_doc.interface1,
            device2_id: link_doc.device2_id,
            interface2: link_doc.interface2,
            bandwidth: link_doc.bandwidth,
            delay: link_doc.delay,
        });
    }

    net
}
