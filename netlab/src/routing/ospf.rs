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

//! OSPF pass: per-router shortest-path-first over the OSPF adjacency.
//!
//! The adjacency is a directed graph over OSPF-speaking routers only. An
//! edge exists where a link directly connects two OSPF routers; its cost is
//! the `ospf_cost` of the *outgoing* interface, so the two directions of one
//! link may differ. Dijkstra runs once per router; while relaxing, each node
//! inherits the first hop of its predecessor, so every reachable router is
//! annotated with the next-hop address and exit interface the root would use.

use crate::ip;
use crate::routing::connected_routes;
use crate::topology::{DeviceId, Network, Protocol, RouteSource, RoutingEntry};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use std::collections::HashMap;

/// One directed adjacency between two OSPF routers.
#[derive(Debug, Clone)]
struct SpfEdge {
    /// Cost of the outgoing interface on the source router
    cost: u32,
    /// Address of the neighbor's interface (the next hop)
    neighbor_ip: String,
    /// Name of the outgoing interface on the source router
    local_iface: String,
}

/// Compute the routing table of every router whose protocol is `OSPF`.
pub(crate) fn compute(net: &Network) -> HashMap<DeviceId, Vec<RoutingEntry>> {
    let ospf_routers: Vec<_> = net.devices().filter(|d| d.runs(Protocol::Ospf)).collect();

    // Build the directed adjacency graph.
    let mut graph: DiGraph<DeviceId, SpfEdge> = DiGraph::new();
    let mut nodes: HashMap<&str, NodeIndex> = HashMap::new();
    for device in &ospf_routers {
        nodes.insert(device.id(), graph.add_node(device.id().to_string()));
    }
    for device in &ospf_routers {
        let u = nodes[device.id()];
        for link in net.links_for_device(device.id()) {
            let neighbor = match net.neighbor(link, device.id()) {
                Some(dev) if dev.runs(Protocol::Ospf) => dev,
                _ => continue,
            };
            let v = nodes[neighbor.id()];
            let local_iface = link.interface_for(device.id()).unwrap_or_default();
            let neighbor_iface = link.interface_for(neighbor.id()).unwrap_or_default();
            let cost = device.interface(local_iface).map(|i| i.ospf_cost).unwrap_or(1);
            let neighbor_ip = neighbor
                .interface(neighbor_iface)
                .map(|i| i.ip.clone())
                .unwrap_or_default();
            graph.add_edge(
                u,
                v,
                SpfEdge { cost, neighbor_ip, local_iface: local_iface.to_string() },
            );
        }
    }

    // Run Dijkstra from every OSPF router.
    let mut tables = HashMap::new();
    for root in &ospf_routers {
        let mut table = connected_routes(root, 0);

        let n = graph.node_count();
        let root_idx = nodes[root.id()].index();
        let mut dist = vec![u32::MAX; n];
        let mut first_hop_ip: Vec<Option<String>> = vec![None; n];
        let mut first_hop_iface: Vec<Option<String>> = vec![None; n];
        let mut visited = vec![false; n];
        dist[root_idx] = 0;

        loop {
            // minimum unvisited node
            let mut u = None;
            let mut best = u32::MAX;
            for (i, d) in dist.iter().enumerate() {
                if !visited[i] && *d < best {
                    best = *d;
                    u = Some(i);
                }
            }
            let u = match u {
                Some(u) => u,
                None => break,
            };
            visited[u] = true;

            for edge in graph.edges(NodeIndex::new(u)) {
                let v = edge.target().index();
                let weight = edge.weight();
                let next_dist = dist[u].saturating_add(weight.cost);
                if next_dist < dist[v] {
                    dist[v] = next_dist;
                    if u == root_idx {
                        // direct neighbor of the root
                        first_hop_ip[v] = Some(weight.neighbor_ip.clone());
                        first_hop_iface[v] = Some(weight.local_iface.clone());
                    } else {
                        // inherit the first hop of the predecessor
                        first_hop_ip[v] = first_hop_ip[u].clone();
                        first_hop_iface[v] = first_hop_iface[u].clone();
                    }
                }
            }
        }

        // Announce every reachable router's configured networks, unless an
        // entry for the same destination already exists (connected routes
        // shadow learned ones).
        for other in &ospf_routers {
            if other.id() == root.id() {
                continue;
            }
            let o = nodes[other.id()].index();
            if dist[o] == u32::MAX {
                continue;
            }
            for iface in other.interfaces.iter().filter(|i| i.is_configured()) {
                let destination = ip::format(iface.network_addr());
                if table.iter().any(|e| e.destination == destination && e.mask == iface.mask) {
                    continue;
                }
                table.push(RoutingEntry {
                    destination,
                    mask: iface.mask.clone(),
                    next_hop: first_hop_ip[o].clone().unwrap_or_else(|| "unknown".to_string()),
                    exit_interface: first_hop_iface[o]
                        .clone()
                        .unwrap_or_else(|| "unknown".to_string()),
                    metric: dist[o],
                    protocol: RouteSource::Ospf,
                });
            }
        }

        tables.insert(root.id().to_string(), table);
    }

    tables
}
