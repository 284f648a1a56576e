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

//! # Top-level Network module
//!
//! The [`Network`] owns all devices and links of a topology and answers the
//! structural queries every simulation pass is built on. It never interprets
//! addressing itself; it only stores and relates devices.

use crate::topology::{Device, DeviceId, Link};
use log::*;
use std::collections::{HashMap, HashSet};

/// # Network struct
///
/// Devices are owned by the network and addressed by their stable ID; links
/// are held by value. Device iteration follows insertion order, which keeps
/// simulation and validation output deterministic for a given construction
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    name: String,
    devices: HashMap<DeviceId, Device>,
    device_order: Vec<DeviceId>,
    links: Vec<Link>,
}

impl Default for Network {
    fn default() -> Self {
        Self::new()
    }
}

impl Network {
    /// Generate an empty network.
    pub fn new() -> Self {
        Self {
            name: "Untitled Network".to_string(),
            devices: HashMap::new(),
            device_order: Vec::new(),
            links: Vec::new(),
        }
    }

    /// The display name of the network.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the display name of the network.
    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    // --- devices -----------------------------------------------------------

    /// Add a device to the topology and return its ID.
    pub fn add_device(&mut self, device: Device) -> DeviceId {
        let id = device.id().to_string();
        debug!("add device {} ({})", device.name, id);
        self.device_order.push(id.clone());
        self.devices.insert(id.clone(), device);
        id
    }

    /// Remove a device. Every link referencing the device is removed as
    /// well.
    pub fn remove_device(&mut self, device_id: &str) {
        self.links.retain(|l| !l.touches(device_id));
        self.device_order.retain(|id| id != device_id);
        if self.devices.remove(device_id).is_none() {
            warn!("remove_device: unknown device {}", device_id);
        }
    }

    /// Look up a device by ID.
    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.get(id)
    }

    /// Look up a device by ID, mutably.
    pub fn device_mut(&mut self, id: &str) -> Option<&mut Device> {
        self.devices.get_mut(id)
    }

    /// Iterate over all devices in insertion order.
    pub fn devices(&self) -> impl Iterator<Item = &Device> {
        self.device_order.iter().filter_map(move |id| self.devices.get(id))
    }

    /// All routers, in insertion order.
    pub fn routers(&self) -> Vec<&Device> {
        self.devices().filter(|d| d.is_router()).collect()
    }

    /// All end hosts, in insertion order.
    pub fn hosts(&self) -> Vec<&Device> {
        self.devices().filter(|d| d.is_host()).collect()
    }

    /// Number of devices in the topology.
    pub fn num_devices(&self) -> usize {
        self.device_order.len()
    }

    // --- links -------------------------------------------------------------

    /// Add a link to the topology and return its ID. The endpoints are not
    /// checked for existence.
    pub fn add_link(&mut self, link: Link) -> String {
        let id = link.id().to_string();
        self.links.push(link);
        id
    }

    /// Remove a link by ID.
    pub fn remove_link(&mut self, link_id: &str) {
        self.links.retain(|l| l.id() != link_id);
    }

    /// Look up a link by ID.
    pub fn link(&self, id: &str) -> Option<&Link> {
        self.links.iter().find(|l| l.id() == id)
    }

    /// All links, in insertion order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// All links touching the given device, in insertion order.
    pub fn links_for_device(&self, device_id: &str) -> Vec<&Link> {
        self.links.iter().filter(|l| l.touches(device_id)).collect()
    }

    // --- topology queries --------------------------------------------------

    /// The device at the other end of `link`, or `None` if the link does not
    /// reference `device_id` or the peer no longer exists.
    pub fn neighbor(&self, link: &Link, device_id: &str) -> Option<&Device> {
        link.peer_of(device_id).and_then(|peer| self.device(peer))
    }

    /// The interface name bound by `link` on the given device's end.
    pub fn interface_for_link<'a>(&self, link: &'a Link, device_id: &str) -> Option<&'a str> {
        link.interface_for(device_id)
    }

    /// The first interface (in declared order) of the device that is not
    /// bound to any link.
    pub fn available_interface(&self, device_id: &str) -> Option<&str> {
        let device = self.device(device_id)?;
        let used: HashSet<&str> =
            self.links.iter().filter_map(|l| l.interface_for(device_id)).collect();
        device.interfaces.iter().map(|i| i.name.as_str()).find(|name| !used.contains(name))
    }

    /// Returns true iff any link binds the named interface of the device.
    pub fn interface_in_use(&self, device_id: &str, iface_name: &str) -> bool {
        self.links.iter().any(|l| l.interface_for(device_id) == Some(iface_name))
    }

    /// Remove all devices and links and reset the name.
    pub fn clear(&mut self) {
        self.devices.clear();
        self.device_order.clear();
        self.links.clear();
        self.name = "Untitled Network".to_string();
    }
}
