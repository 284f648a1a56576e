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

//! Module defining the devices of a topology, their interfaces, and the
//! routing-table records the simulation produces.

use crate::ip;
use std::fmt;
use uuid::Uuid;

/// Stable, opaque device identifier. Every cross-reference in the topology
/// (links, results, validation issues) uses the ID, never the device itself.
pub type DeviceId = String;

/// The literal next-hop string used for directly attached networks.
pub const DIRECTLY_CONNECTED: &str = "directly connected";

/// A network interface, owned by exactly one device.
///
/// Addressing fields use the empty string for "unset": an interface is
/// *configured* when both `ip` and `mask` are non-empty. The simulation
/// ignores unconfigured interfaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Name, unique within the owning device (e.g. `Gi0/0`).
    pub name: String,
    /// Dotted-quad address, or empty if unset.
    pub ip: String,
    /// Dotted-quad subnet mask, or empty if unset.
    pub mask: String,
    /// OSPF cost of the outgoing direction of this interface.
    pub ospf_cost: u32,
    /// Free-form description, persisted but ignored by the simulation.
    pub description: String,
    /// Name of the physical host adapter this interface is bridged to when
    /// the owning router is marked as host PC. Opaque to the simulation.
    pub host_binding: String,
}

impl Interface {
    /// Create an unconfigured interface with the given name.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ip: String::new(),
            mask: String::new(),
            ospf_cost: 1,
            description: String::new(),
            host_binding: String::new(),
        }
    }

    /// An interface takes part in the simulation iff both address and mask
    /// are set.
    pub fn is_configured(&self) -> bool {
        !self.ip.is_empty() && !self.mask.is_empty()
    }

    /// Numeric representation of the address.
    pub fn ip_u32(&self) -> u32 {
        ip::parse(&self.ip)
    }

    /// Numeric representation of the mask.
    pub fn mask_u32(&self) -> u32 {
        ip::parse(&self.mask)
    }

    /// The network address of this interface (`ip AND mask`).
    pub fn network_addr(&self) -> u32 {
        ip::network_address(self.ip_u32(), self.mask_u32())
    }

    /// The prefix length of this interface's mask.
    pub fn prefix_len(&self) -> u32 {
        ip::mask_to_prefix(self.mask_u32())
    }
}

/// The control-plane protocol a router runs. Exactly one is active per
/// router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Static and connected routes only
    Static,
    /// RIP version 2 (distance-vector)
    Ripv2,
    /// OSPF (link-state, shortest-path first)
    Ospf,
    /// PIM Dense Mode (multicast flood-and-prune)
    PimDm,
}

impl Protocol {
    /// The spelling used in topology documents (`"PIM-DM"`, not the display
    /// string).
    pub fn config_str(&self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::Ripv2 => "RIPv2",
            Self::Ospf => "OSPF",
            Self::PimDm => "PIM-DM",
        }
    }

    /// Parse the document spelling. Unknown values fall back to `Static`.
    pub fn from_config_str(s: &str) -> Self {
        match s {
            "RIPv2" => Self::Ripv2,
            "OSPF" => Self::Ospf,
            "PIM-DM" => Self::PimDm,
            _ => Self::Static,
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Static => "Static",
            Self::Ripv2 => "RIPv2",
            Self::Ospf => "OSPF",
            Self::PimDm => "PIM Dense Mode",
        })
    }
}

/// The pass that produced a routing entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteSource {
    /// Directly attached network of a configured interface
    Connected,
    /// User-entered static route
    Static,
    /// Learned through RIPv2 distance-vector exchange
    Ripv2,
    /// Computed by the OSPF shortest-path-first pass
    Ospf,
    /// Installed by the PIM-DM pass
    PimDm,
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Connected => "Connected",
            Self::Static => "Static",
            Self::Ripv2 => "RIPv2",
            Self::Ospf => "OSPF",
            Self::PimDm => "PIM-DM",
        })
    }
}

/// One row of a computed routing table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingEntry {
    /// Destination network address
    pub destination: String,
    /// Destination subnet mask
    pub mask: String,
    /// Next-hop address, or the literal [`DIRECTLY_CONNECTED`]
    pub next_hop: String,
    /// Name of the interface packets leave through (may be empty if it could
    /// not be resolved)
    pub exit_interface: String,
    /// Protocol metric (hop count for RIPv2, path cost for OSPF)
    pub metric: u32,
    /// The pass that produced this entry
    pub protocol: RouteSource,
}

/// A user-entered static route on a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticRoute {
    /// Destination network address
    pub destination: String,
    /// Destination subnet mask
    pub mask: String,
    /// Next-hop address
    pub next_hop: String,
    /// Administrative metric
    pub metric: u32,
}

impl StaticRoute {
    /// Create a static route with the default metric of 1.
    pub fn new<S: Into<String>>(destination: S, mask: S, next_hop: S) -> Self {
        Self {
            destination: destination.into(),
            mask: mask.into(),
            next_hop: next_hop.into(),
            metric: 1,
        }
    }
}

/// OSPF process configuration of a router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OspfConfig {
    /// Router-ID in dotted-quad notation, or empty if unset
    pub router_id: String,
    /// Area identifier
    pub area: String,
    /// Process identifier
    pub process_id: u32,
}

impl Default for OspfConfig {
    fn default() -> Self {
        Self { router_id: String::new(), area: "0".to_string(), process_id: 1 }
    }
}

/// RIPv2 configuration of a router.
///
/// The `networks` list is a configuration convention: the engine advertises
/// every configured interface regardless, but the validator warns when the
/// list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ripv2Config {
    /// Network statements the user entered
    pub networks: Vec<String>,
}

/// PIM Dense Mode configuration of a router.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PimDmConfig {
    /// Names of the interfaces PIM-DM is enabled on
    pub enabled_interfaces: Vec<String>,
}

/// Router-specific state: protocol selection, per-protocol configuration,
/// and the routing-table output slot the engine refills on every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    /// The active control-plane protocol
    pub protocol: Protocol,
    /// User-entered static routes
    pub static_routes: Vec<StaticRoute>,
    /// OSPF process configuration
    pub ospf: OspfConfig,
    /// RIPv2 configuration
    pub ripv2: Ripv2Config,
    /// PIM-DM configuration
    pub pim_dm: PimDmConfig,
    /// Marks the router that represents the physical machine running the
    /// simulator. Opaque to the engine.
    pub is_host_pc: bool,
    /// Output slot, cleared and refilled on every simulation run
    pub routing_table: Vec<RoutingEntry>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            protocol: Protocol::Static,
            static_routes: Vec::new(),
            ospf: OspfConfig::default(),
            ripv2: Ripv2Config::default(),
            pim_dm: PimDmConfig::default(),
            is_host_pc: false,
            routing_table: Vec::new(),
        }
    }
}

/// Host-specific state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostConfig {
    /// Default gateway address, or empty if unset
    pub default_gateway: String,
}

/// The typed variant of a device.
///
/// Switches and hubs are layer-2 only: they carry no protocol state and are
/// transparent to routing. They are kept as distinct variants to preserve the
/// distinction a front-end draws between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceKind {
    /// Layer-3 router
    Router(RouterConfig),
    /// Layer-2 switch
    Switch,
    /// Layer-1 hub
    Hub,
    /// End host
    Host(HostConfig),
}

/// A device of the topology.
///
/// Identity is the stable [`DeviceId`] assigned at construction; the name is
/// a display label and carries no identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Device {
    pub(crate) id: DeviceId,
    /// Display name
    pub name: String,
    /// Canvas position, opaque to the simulation
    pub x: f64,
    /// Canvas position, opaque to the simulation
    pub y: f64,
    /// Interfaces in declared order. Order is preserved; lookup is by name.
    pub interfaces: Vec<Interface>,
    /// The typed variant with per-kind state
    pub kind: DeviceKind,
}

impl Device {
    fn new<S: Into<String>>(name: S, kind: DeviceKind) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            x: 0.0,
            y: 0.0,
            interfaces: Vec::new(),
            kind,
        }
    }

    /// Create a router with the four conventional Gigabit interfaces
    /// `Gi0/0` to `Gi0/3`.
    pub fn router<S: Into<String>>(name: S) -> Self {
        let mut dev = Self::new(name, DeviceKind::Router(RouterConfig::default()));
        for i in 0..4 {
            dev.interfaces.push(Interface::new(format!("Gi0/{}", i)));
        }
        dev
    }

    /// Create a switch with the eight conventional Fast-Ethernet ports
    /// `Fa0/0` to `Fa0/7`.
    pub fn switch<S: Into<String>>(name: S) -> Self {
        let mut dev = Self::new(name, DeviceKind::Switch);
        for i in 0..8 {
            dev.interfaces.push(Interface::new(format!("Fa0/{}", i)));
        }
        dev
    }

    /// Create a hub with the four conventional ports `Port0` to `Port3`.
    pub fn hub<S: Into<String>>(name: S) -> Self {
        let mut dev = Self::new(name, DeviceKind::Hub);
        for i in 0..4 {
            dev.interfaces.push(Interface::new(format!("Port{}", i)));
        }
        dev
    }

    /// Create an end host with a single interface `eth0` and no gateway.
    pub fn host<S: Into<String>>(name: S) -> Self {
        let mut dev = Self::new(name, DeviceKind::Host(HostConfig::default()));
        dev.interfaces.push(Interface::new("eth0"));
        dev
    }

    /// The stable ID of this device.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true iff this device is a router.
    pub fn is_router(&self) -> bool {
        matches!(self.kind, DeviceKind::Router(_))
    }

    /// Returns true iff this device is an end host.
    pub fn is_host(&self) -> bool {
        matches!(self.kind, DeviceKind::Host(_))
    }

    /// Returns true iff this device is layer-2 only (switch or hub).
    pub fn is_l2(&self) -> bool {
        matches!(self.kind, DeviceKind::Switch | DeviceKind::Hub)
    }

    /// Mutable router state, or `None` for other kinds.
    pub fn router_mut(&mut self) -> Option<&mut RouterConfig> {
        match &mut self.kind {
            DeviceKind::Router(cfg) => Some(cfg),
            _ => None,
        }
    }

    /// Mutable host state, or `None` for other kinds.
    pub fn host_mut(&mut self) -> Option<&mut HostConfig> {
        match &mut self.kind {
            DeviceKind::Host(cfg) => Some(cfg),
            _ => None,
        }
    }

    /// Returns true iff this router runs the given protocol. Always false for
    /// non-routers.
    pub fn runs(&self, protocol: Protocol) -> bool {
        self.router().map(|cfg| cfg.protocol == protocol).unwrap_or(false)
    }

    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Look up an interface by name, mutably.
    pub fn interface_mut(&mut self, name: &str) -> Option<&mut Interface> {
        self.interfaces.iter_mut().find(|i| i.name == name)
    }

    /// Append a new unconfigured interface and return it.
    pub fn add_interface<S: Into<String>>(&mut self, name: S) -> &mut Interface {
        self.interfaces.push(Interface::new(name));
        self.interfaces.last_mut().unwrap()
    }

    /// The first interface of this device, if any. For hosts this is the
    /// interface that carries the host's address.
    pub fn primary_interface(&self) -> Option<&Interface> {
        self.interfaces.first()
    }
}

/// Read-only access to a device's per-kind configuration, split out of the
/// inherent `impl Device` block because its method names (`router`, `host`)
/// would otherwise collide with the `Device::router`/`Device::host`
/// constructors.
pub trait DeviceConfig {
    /// The router state, or `None` for other kinds.
    fn router(&self) -> Option<&RouterConfig>;

    /// The host state, or `None` for other kinds.
    fn host(&self) -> Option<&HostConfig>;
}

impl DeviceConfig for Device {
    fn router(&self) -> Option<&RouterConfig> {
        match &self.kind {
            DeviceKind::Router(cfg) => Some(cfg),
            _ => None,
        }
    }

    fn host(&self) -> Option<&HostConfig> {
        match &self.kind {
            DeviceKind::Host(cfg) => Some(cfg),
            _ => None,
        }
    }
}
