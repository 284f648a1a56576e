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

//! Static / connected pass: seed each static router's table from its
//! configured interfaces and its user-entered routes.

use crate::ip;
use crate::routing::connected_routes;
use crate::topology::{DeviceConfig, DeviceId, Network, Protocol, RouteSource, RoutingEntry};
use std::collections::HashMap;

/// Compute the routing table of every router whose protocol is `Static`.
///
/// The exit interface of a static route is the first configured interface
/// whose subnet contains the next hop; if none matches, it is left empty.
pub(crate) fn compute(net: &Network) -> HashMap<DeviceId, Vec<RoutingEntry>> {
    let mut tables = HashMap::new();

    for device in net.devices() {
        let cfg = match device.router() {
            Some(cfg) if cfg.protocol == Protocol::Static => cfg,
            _ => continue,
        };

        let mut table = connected_routes(device, 0);

        for route in &cfg.static_routes {
            if route.destination.is_empty() || route.mask.is_empty() {
                continue;
            }
            let exit_interface = device
                .interfaces
                .iter()
                .filter(|iface| iface.is_configured())
                .find(|iface| ip::same_subnet(&route.next_hop, &iface.ip, &iface.mask))
                .map(|iface| iface.name.clone())
                .unwrap_or_default();
            table.push(RoutingEntry {
                destination: route.destination.clone(),
                mask: route.mask.clone(),
                next_hop: route.next_hop.clone(),
                exit_interface,
                metric: route.metric,
                protocol: RouteSource::Static,
            });
        }

        tables.insert(device.id().to_string(), table);
    }

    tables
}
