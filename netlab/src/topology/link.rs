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

//! Module defining the undirected links of a topology.

use crate::topology::DeviceId;
use uuid::Uuid;

/// An undirected link binding two named interfaces together.
///
/// A link stores device IDs and interface names only; it may reference a
/// device or interface that no longer exists. Consumers must handle missing
/// lookups gracefully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub(crate) id: String,
    /// Device at the first end
    pub device1_id: DeviceId,
    /// Interface name on the first device
    pub interface1: String,
    /// Device at the second end
    pub device2_id: DeviceId,
    /// Interface name on the second device
    pub interface2: String,
    /// Informational bandwidth in Mbit/s
    pub bandwidth: u32,
    /// Informational delay in ms
    pub delay: u32,
}

impl Link {
    /// Create a link between two named interfaces, with the conventional
    /// defaults of 1000 Mbit/s and 1 ms.
    pub fn new<S: Into<String>>(device1_id: S, interface1: S, device2_id: S, interface2: S) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            device1_id: device1_id.into(),
            interface1: interface1.into(),
            device2_id: device2_id.into(),
            interface2: interface2.into(),
            bandwidth: 1000,
            delay: 1,
        }
    }

    /// The stable ID of this link.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true iff the link references the given device on either end.
    pub fn touches(&self, device_id: &str) -> bool {
        self.device1_id == device_id || self.device2_id == device_id
    }

    /// The ID of the device at the other end, or `None` if the link does not
    /// reference `device_id`.
    pub fn peer_of(&self, device_id: &str) -> Option<&str> {
        if self.device1_id == device_id {
            Some(&self.device2_id)
        } else if self.device2_id == device_id {
            Some(&self.device1_id)
        } else {
            None
        }
    }

    /// The interface name on the given device's end, or `None` if the link
    /// does not reference `device_id`.
    pub fn interface_for(&self, device_id: &str) -> Option<&str> {
        if self.device1_id == device_id {
            Some(&self.interface1)
        } else if self.device2_id == device_id {
            Some(&self.interface2)
        } else {
            None
        }
    }
}
