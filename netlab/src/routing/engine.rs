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

//! Engine facade: run every protocol pass and aggregate the results.

use crate::routing::{connected_routes, ospf, pim_dm, ripv2, static_routing, MulticastTree};
use crate::topology::{DeviceConfig, DeviceId, Network, Protocol, RoutingEntry};
use log::*;
use std::collections::HashMap;

/// The computed state of one router after a simulation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterResult {
    /// Stable ID of the router
    pub router_id: DeviceId,
    /// Display name of the router
    pub router_name: String,
    /// The protocol the router runs; its `Display` is the user-facing string
    pub protocol: Protocol,
    /// The computed routing table
    pub routing_table: Vec<RoutingEntry>,
}

/// The aggregated result of a simulation run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationResult {
    /// One entry per router, in device insertion order
    pub router_results: Vec<RouterResult>,
    /// One tree per requested (source, group) pair
    pub multicast_trees: Vec<MulticastTree>,
}

/// Run all routing protocols on the network and return the aggregated
/// result.
///
/// The static, RIPv2 and OSPF passes run in that order; PIM-DM routers get
/// connected routes only (dense mode derives no unicast routes). Each
/// router's routing-table slot is cleared and refilled. If both `pim_source`
/// and `pim_group` are non-empty, one multicast tree is appended.
pub fn run(
    net: &mut Network,
    pim_source: Option<&str>,
    pim_group: Option<&str>,
) -> SimulationResult {
    debug!("simulation run over {} devices", net.num_devices());

    let mut tables: HashMap<DeviceId, Vec<RoutingEntry>> = static_routing::compute(net);
    tables.extend(ripv2::compute(net));
    tables.extend(ospf::compute(net));
    for device in net.devices() {
        if device.runs(Protocol::PimDm) {
            tables.insert(device.id().to_string(), connected_routes(device, 0));
        }
    }

    // Fill each router's output slot.
    for (router_id, table) in tables {
        if let Some(cfg) = net.device_mut(&router_id).and_then(|dev| dev.router_mut()) {
            cfg.routing_table = table;
        }
    }

    let mut result = SimulationResult::default();
    for device in net.devices() {
        if let Some(cfg) = device.router() {
            result.router_results.push(RouterResult {
                router_id: device.id().to_string(),
                router_name: device.name.clone(),
                protocol: cfg.protocol,
                routing_table: cfg.routing_table.clone(),
            });
        }
    }

    match (pim_source, pim_group) {
        (Some(source), Some(group)) if !source.is_empty() && !group.is_empty() => {
            result.multicast_trees.push(pim_dm::compute(net, source, group));
        }
        _ => {}
    }

    result
}
