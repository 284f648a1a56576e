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

//! # Routing Engine
//!
//! The routing engine computes each router's routing table the way the
//! configured control-plane protocol would, and builds the dense-mode
//! multicast distribution tree on request.
//!
//! Each protocol pass is a pure function from the topology to a map of
//! per-router tables; the [`engine`] facade runs the passes in order and
//! writes the results into the routers' output slots. The passes never fail:
//! malformed configuration degrades to missing entries.

pub mod engine;
pub mod ospf;
pub mod pim_dm;
pub mod ripv2;
pub mod static_routing;

pub use engine::{run, RouterResult, SimulationResult};
pub use pim_dm::{MulticastTree, MulticastTreeEntry};

use crate::ip;
use crate::topology::{Device, RouteSource, RoutingEntry, DIRECTLY_CONNECTED};

/// Connected entries for every configured interface of a device.
///
/// The metric is a parameter because RIPv2 counts a directly attached
/// network as one hop, while the other passes use 0.
pub(crate) fn connected_routes(device: &Device, metric: u32) -> Vec<RoutingEntry> {
    device
        .interfaces
        .iter()
        .filter(|iface| iface.is_configured())
        .map(|iface| RoutingEntry {
            destination: ip::format(iface.network_addr()),
            mask: iface.mask.clone(),
            next_hop: DIRECTLY_CONNECTED.to_string(),
            exit_interface: iface.name.clone(),
            metric,
            protocol: RouteSource::Connected,
        })
        .collect()
}
