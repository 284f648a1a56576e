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

//! RIPv2 pass: distance-vector relaxation with split horizon.
//!
//! Every RIPv2 router starts from its directly attached networks (one hop
//! each) and repeatedly advertises its table to every directly connected
//! RIPv2 neighbor, until a full round changes nothing. Split horizon
//! suppresses advertising a route back to the neighbor it was learned from;
//! the hop count saturates at 15 (16 is infinity).

use crate::routing::connected_routes;
use crate::topology::{DeviceId, Link, Network, Protocol, RouteSource, RoutingEntry};
use log::*;
use std::collections::HashMap;

/// Maximum reachable hop count. One more is infinity and never advertised.
const MAX_METRIC: u32 = 15;

/// `(destination, mask)` pair identifying a route within a table.
type RouteKey = (String, String);

/// Compute the routing table of every router whose protocol is `RIPv2`.
pub(crate) fn compute(net: &Network) -> HashMap<DeviceId, Vec<RoutingEntry>> {
    let mut tables: HashMap<DeviceId, Vec<RoutingEntry>> = HashMap::new();
    let mut rip_routers: Vec<DeviceId> = Vec::new();

    // RIP counts a directly attached network as one hop.
    for device in net.devices() {
        if device.runs(Protocol::Ripv2) {
            rip_routers.push(device.id().to_string());
            tables.insert(device.id().to_string(), connected_routes(device, 1));
        }
    }

    // Which neighbor each (router, destination, mask) was learned from.
    // Consulted only by split horizon; connected routes have no record and
    // are therefore always advertised.
    let mut learned_from: HashMap<DeviceId, HashMap<RouteKey, DeviceId>> = HashMap::new();

    let mut rounds = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;

        for router_id in &rip_routers {
            for link in net.links_for_device(router_id) {
                let neighbor = match net.neighbor(link, router_id) {
                    Some(dev) if dev.runs(Protocol::Ripv2) => dev,
                    _ => continue,
                };
                let neighbor_id = neighbor.id().to_string();
                let neighbor_iface = link.interface_for(neighbor.id()).unwrap_or_default().to_string();
                let router_ip = ip_on_link(net, router_id, link);

                // Advertise our current table to the neighbor.
                let advertised = tables.get(router_id).cloned().unwrap_or_default();
                for entry in advertised {
                    let key = (entry.destination.clone(), entry.mask.clone());

                    // Split horizon: do not advertise back to where we learned it.
                    if learned_from.get(router_id).and_then(|m| m.get(&key)) == Some(&neighbor_id) {
                        continue;
                    }

                    let metric = entry.metric + 1;
                    if metric > MAX_METRIC {
                        continue;
                    }

                    let neighbor_table = tables.get_mut(&neighbor_id).unwrap();
                    match neighbor_table
                        .iter_mut()
                        .find(|e| e.destination == entry.destination && e.mask == entry.mask)
                    {
                        Some(existing) => {
                            if metric < existing.metric {
                                existing.metric = metric;
                                existing.next_hop = router_ip.clone();
                                existing.exit_interface = neighbor_iface.clone();
                                existing.protocol = RouteSource::Ripv2;
                                learned_from
                                    .entry(neighbor_id.clone())
                                    .or_default()
                                    .insert(key, router_id.clone());
                                changed = true;
                            }
                        }
                        None => {
                            neighbor_table.push(RoutingEntry {
                                destination: entry.destination,
                                mask: entry.mask,
                                next_hop: router_ip.clone(),
                                exit_interface: neighbor_iface.clone(),
                                metric,
                                protocol: RouteSource::Ripv2,
                            });
                            learned_from
                                .entry(neighbor_id.clone())
                                .or_default()
                                .insert(key, router_id.clone());
                            changed = true;
                        }
                    }
                }
            }
        }
    }
    trace!("RIPv2 converged after {} rounds", rounds);

    tables
}

/// The advertising router's address on the given link, or empty if it cannot
/// be resolved.
fn ip_on_link(net: &Network, router_id: &str, link: &Link) -> String {
    link.interface_for(router_id)
        .and_then(|name| net.device(router_id).and_then(|dev| dev.interface(name)))
        .map(|iface| iface.ip.clone())
        .unwrap_or_default()
}
