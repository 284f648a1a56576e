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

//! PIM Dense Mode pass: flood-and-prune multicast tree construction.
//!
//! The pass locates the first-hop router for the source address, floods
//! breadth-first across PIM-DM routers, then builds each router's outgoing
//! interface list. A branch stays in the tree only while some host is
//! reachable downstream of it; routers with no receivers at all are pruned.

use crate::topology::{Device, DeviceId, Network, Protocol};
use log::*;
use std::collections::{HashSet, VecDeque};

/// One router of a multicast distribution tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MulticastTreeEntry {
    /// Display name of the router
    pub router_name: String,
    /// Stable ID of the router
    pub router_id: DeviceId,
    /// RPF interface: where the multicast is received (empty on the first
    /// hop)
    pub incoming_interface: String,
    /// Outgoing interface list: where the multicast is replicated to
    pub outgoing_interfaces: Vec<String>,
}

/// The result of a flood-and-prune computation for one (source, group)
/// pair.
///
/// `pruned` lists router names, not IDs, and a name may appear more than
/// once if the router was considered from multiple upstreams; renderers may
/// de-duplicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MulticastTree {
    /// Address of the multicast source
    pub source_ip: String,
    /// Multicast group address
    pub group_address: String,
    /// One entry per PIM-DM router left on the tree, in flood (BFS) order
    pub entries: Vec<MulticastTreeEntry>,
    /// Names of the routers pruned off the tree
    pub pruned: Vec<String>,
}

/// A router visited by the flood, with the upstream it was reached from.
#[derive(Debug, Clone)]
struct FloodNode {
    router_id: DeviceId,
    parent_id: DeviceId,
    incoming_interface: String,
}

/// Build the multicast distribution tree for one source and group.
///
/// An unresolvable source yields an empty tree.
pub fn compute(net: &Network, source_ip: &str, group_address: &str) -> MulticastTree {
    let mut tree = MulticastTree {
        source_ip: source_ip.to_string(),
        group_address: group_address.to_string(),
        entries: Vec::new(),
        pruned: Vec::new(),
    };

    let first_hop = match find_first_hop_router(net, source_ip) {
        Some(dev) => dev.id().to_string(),
        None => {
            debug!("no first-hop router for multicast source {}", source_ip);
            return tree;
        }
    };

    // Flood breadth-first across PIM-DM routers only.
    let mut queue: VecDeque<FloodNode> = VecDeque::new();
    let mut visited: HashSet<DeviceId> = HashSet::new();
    let mut flood: Vec<FloodNode> = Vec::new();
    queue.push_back(FloodNode {
        router_id: first_hop.clone(),
        parent_id: String::new(),
        incoming_interface: String::new(),
    });

    while let Some(node) = queue.pop_front() {
        if !visited.insert(node.router_id.clone()) {
            continue;
        }

        for link in net.links_for_device(&node.router_id) {
            let neighbor = match net.neighbor(link, &node.router_id) {
                Some(dev) if dev.runs(Protocol::PimDm) => dev,
                _ => continue,
            };
            if visited.contains(neighbor.id()) {
                continue;
            }
            let incoming = link.interface_for(neighbor.id()).unwrap_or_default().to_string();
            queue.push_back(FloodNode {
                router_id: neighbor.id().to_string(),
                parent_id: node.router_id.clone(),
                incoming_interface: incoming,
            });
        }

        flood.push(node);
    }

    // Build each flooded router's outgoing interface list, pruning branches
    // and leaves without receivers.
    for node in &flood {
        let device = match net.device(&node.router_id) {
            Some(dev) => dev,
            None => continue,
        };

        let mut oil: Vec<String> = Vec::new();
        let mut has_receiver = false;

        for link in net.links_for_device(&node.router_id) {
            let neighbor = match net.neighbor(link, &node.router_id) {
                Some(dev) => dev,
                None => continue,
            };

            if neighbor.is_host() {
                // Hosts are implicit receivers, not tree ports.
                has_receiver = true;
                continue;
            }

            if neighbor.is_l2() {
                if has_receiver_downstream(net, neighbor.id(), &node.router_id) {
                    has_receiver = true;
                    if let Some(iface) = link.interface_for(&node.router_id) {
                        oil.push(iface.to_string());
                    }
                }
                continue;
            }

            if !neighbor.runs(Protocol::PimDm) {
                continue;
            }
            if neighbor.id() == node.parent_id {
                // RPF interface
                continue;
            }

            if has_receiver_downstream(net, neighbor.id(), &node.router_id) {
                if let Some(iface) = link.interface_for(&node.router_id) {
                    oil.push(iface.to_string());
                }
            } else {
                tree.pruned.push(neighbor.name.clone());
            }
        }

        if !has_receiver && oil.is_empty() && node.router_id != first_hop {
            tree.pruned.push(device.name.clone());
            continue;
        }

        tree.entries.push(MulticastTreeEntry {
            router_name: device.name.clone(),
            router_id: device.id().to_string(),
            incoming_interface: node.incoming_interface.clone(),
            outgoing_interfaces: oil,
        });
    }

    tree
}

/// The router owning an interface with the given address, if any.
fn router_owning_ip<'a>(net: &'a Network, ip: &str) -> Option<&'a Device> {
    net.routers()
        .into_iter()
        .find(|dev| dev.interfaces.iter().any(|iface| iface.ip == ip))
}

/// Locate the first-hop router for a source address: either the router
/// owning the address, or the first router reached from the host carrying
/// it (possibly through switches and hubs).
fn find_first_hop_router<'a>(net: &'a Network, source_ip: &str) -> Option<&'a Device> {
    if let Some(dev) = router_owning_ip(net, source_ip) {
        return Some(dev);
    }

    let source_host = net
        .hosts()
        .into_iter()
        .find(|dev| dev.primary_interface().map(|i| i.ip == source_ip).unwrap_or(false))?;

    let mut visited: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(source_host.id());

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current) {
            continue;
        }
        for link in net.links_for_device(current) {
            let neighbor = match net.neighbor(link, current) {
                Some(dev) => dev,
                None => continue,
            };
            if neighbor.is_router() {
                return Some(neighbor);
            }
            queue.push_back(neighbor.id());
        }
    }
    None
}

/// Check whether any host is reachable from `start`, never stepping back
/// onto the device the search came from. The frontier crosses switches,
/// hubs and PIM-DM routers and stops at the first host found.
fn has_receiver_downstream(net: &Network, start: &str, parent: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<(&str, &str)> = vec![(start, parent)];

    while let Some((current, came_from)) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        let device = match net.device(current) {
            Some(dev) => dev,
            None => continue,
        };
        for link in net.links_for_device(device.id()) {
            let neighbor = match net.neighbor(link, device.id()) {
                Some(dev) => dev,
                None => continue,
            };
            if neighbor.id() == came_from {
                continue;
            }
            if neighbor.is_host() {
                return true;
            }
            if neighbor.is_l2() || neighbor.runs(Protocol::PimDm) {
                stack.push((neighbor.id(), current));
            }
        }
    }
    false
}
