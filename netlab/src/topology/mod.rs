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

//! # Topology Model
//!
//! Devices with typed variants (router, switch, hub, host), interfaces with
//! addressing and metric attributes, and undirected links binding two named
//! interfaces together. The [`Network`] owns everything and answers the
//! structural queries the routing engine and the validator are built on.

pub mod device;
pub mod link;
pub mod network;

pub use device::{
    Device, DeviceConfig, DeviceId, DeviceKind, HostConfig, Interface, OspfConfig, PimDmConfig,
    Protocol, Ripv2Config, RouteSource, RouterConfig, RoutingEntry, StaticRoute,
    DIRECTLY_CONNECTED,
};
pub use link::Link;
pub use network::Network;
