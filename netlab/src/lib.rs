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

#![deny(missing_docs)]

//! # NetLab: Offline Network Topology Simulator
//!
//! This is a library for simulating the control plane of a user-drawn
//! network topology. Given a graph of routers, layer-2 switches, hubs and
//! end hosts, with per-interface addressing and per-router protocol
//! configuration, it computes every router's routing table the way the
//! configured protocol would, builds the dense-mode multicast distribution
//! tree on request, and reports configuration errors against the topology.
//!
//! ## Structure
//!
//! - **[`topology`]**: the network data model. Devices with typed variants,
//!   interfaces with addressing and metric attributes, undirected links, and
//!   the structural queries everything else is built on. See the main
//!   structure [`Network`](topology::Network).
//!
//! - **[`routing`]**: the routing engine. Four protocol passes (static and
//!   connected routes, RIPv2 distance-vector with split horizon, OSPF
//!   shortest-path-first, PIM dense-mode flood-and-prune) and the
//!   [`run`](routing::run) facade that aggregates their results.
//!
//! - **[`validation`]**: structural checks over the topology (address
//!   conflicts, subnet mismatches, gateway consistency, duplicate
//!   router-ids, unconnected interfaces, missing network statements,
//!   physical reachability).
//!
//! - **[`persist`]**: JSON save/load of topologies.
//!
//! - **[`printer`]**: formatted strings for routing tables, multicast trees
//!   and validation issues, for text front-ends.
//!
//! - **[`ip`]**: dotted-quad parsing and subnet arithmetic.
//!
//! The simulation is single-threaded, synchronous and total: it borrows the
//! topology read-only (writing only each router's routing-table slot) and
//! degrades malformed input to empty results instead of failing.
//!
//! ## Example usage
//!
//! The following example builds two RIPv2 routers connected over a /30
//! transfer network and checks that the first router learns the second one's
//! LAN with a hop count of 2.
//!
//! ```rust
//! use netlab::routing;
//! use netlab::topology::{Device, Link, Network, Protocol};
//!
//! let mut net = Network::new();
//!
//! let mut r1 = Device::router("R1");
//! r1.router_mut().unwrap().protocol = Protocol::Ripv2;
//! r1.interface_mut("Gi0/0").unwrap().ip = "10.0.0.1".to_string();
//! r1.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
//!
//! let mut r2 = Device::router("R2");
//! r2.router_mut().unwrap().protocol = Protocol::Ripv2;
//! r2.interface_mut("Gi0/0").unwrap().ip = "10.0.0.2".to_string();
//! r2.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
//! r2.interface_mut("Gi0/1").unwrap().ip = "172.16.0.1".to_string();
//! r2.interface_mut("Gi0/1").unwrap().mask = "255.255.255.0".to_string();
//!
//! let r1 = net.add_device(r1);
//! let r2 = net.add_device(r2);
//! net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));
//!
//! let result = routing::run(&mut net, None, None);
//! let table = &result.router_results[0].routing_table;
//! assert!(table.iter().any(|e| e.destination == "172.16.0.0" && e.metric == 2));
//! ```

mod error;
pub mod ip;
pub mod persist;
pub mod printer;
pub mod routing;
mod test;
pub mod topology;
pub mod validation;

pub use error::Error;
