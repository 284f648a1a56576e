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

//! Test the topology model and its structural queries, without running the
//! simulation.

use crate::topology::{Device, DeviceConfig, Link, Network};

/// Two routers and a host:
///
/// ```text
/// R1 ---- R2
/// |
/// PC1
/// ```
fn get_test_net() -> (Network, String, String, String) {
    let mut net = Network::new();
    let r1 = net.add_device(Device::router("R1"));
    let r2 = net.add_device(Device::router("R2"));
    let pc1 = net.add_device(Device::host("PC1"));

    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));
    net.add_link(Link::new(r1.as_str(), "Gi0/1", pc1.as_str(), "eth0"));

    (net, r1, r2, pc1)
}

#[test]
fn test_default_interfaces() {
    let router = Device::router("R");
    assert_eq!(router.interfaces.len(), 4);
    assert_eq!(router.interfaces[0].name, "Gi0/0");
    assert_eq!(router.interfaces[3].name, "Gi0/3");
    assert!(router.interfaces.iter().all(|i| !i.is_configured()));
    assert!(router.interfaces.iter().all(|i| i.ospf_cost == 1));

    let switch = Device::switch("S");
    assert_eq!(switch.interfaces.len(), 8);
    assert_eq!(switch.interfaces[0].name, "Fa0/0");
    assert!(switch.is_l2());

    let hub = Device::hub("H");
    assert_eq!(hub.interfaces.len(), 4);
    assert_eq!(hub.interfaces[0].name, "Port0");
    assert!(hub.is_l2());

    let host = Device::host("PC");
    assert_eq!(host.interfaces.len(), 1);
    assert_eq!(host.interfaces[0].name, "eth0");
    assert_eq!(host.host().unwrap().default_gateway, "");
}

#[test]
fn test_device_lookup() {
    let (net, r1, r2, pc1) = get_test_net();

    assert_eq!(net.num_devices(), 3);
    assert_eq!(net.device(&r1).unwrap().name, "R1");
    assert_eq!(net.device(&pc1).unwrap().name, "PC1");
    assert!(net.device("no-such-id").is_none());

    let names: Vec<&str> = net.devices().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["R1", "R2", "PC1"]);

    assert_eq!(net.routers().len(), 2);
    assert_eq!(net.hosts().len(), 1);
    assert_eq!(net.routers()[1].id(), r2);
}

#[test]
fn test_neighbor_and_interface_for_link() {
    let (net, r1, r2, pc1) = get_test_net();
    let link = &net.links()[0];

    assert_eq!(net.neighbor(link, &r1).unwrap().id(), r2);
    assert_eq!(net.neighbor(link, &r2).unwrap().id(), r1);
    assert!(net.neighbor(link, &pc1).is_none());

    assert_eq!(net.interface_for_link(link, &r1), Some("Gi0/0"));
    assert_eq!(net.interface_for_link(link, &r2), Some("Gi0/0"));
    assert_eq!(net.interface_for_link(link, &pc1), None);
}

#[test]
fn test_available_interface() {
    let (mut net, r1, r2, pc1) = get_test_net();

    // Gi0/0 and Gi0/1 of R1 are taken
    assert_eq!(net.available_interface(&r1), Some("Gi0/2"));
    assert_eq!(net.available_interface(&r2), Some("Gi0/1"));
    // the host's only interface is taken
    assert_eq!(net.available_interface(&pc1), None);
    assert_eq!(net.available_interface("no-such-id"), None);

    net.add_link(Link::new(r1.as_str(), "Gi0/2", r2.as_str(), "Gi0/1"));
    assert_eq!(net.available_interface(&r1), Some("Gi0/3"));
}

#[test]
fn test_interface_in_use() {
    let (net, r1, _, pc1) = get_test_net();

    assert!(net.interface_in_use(&r1, "Gi0/0"));
    assert!(net.interface_in_use(&r1, "Gi0/1"));
    assert!(!net.interface_in_use(&r1, "Gi0/2"));
    assert!(net.interface_in_use(&pc1, "eth0"));
    assert!(!net.interface_in_use(&pc1, "eth1"));
}

#[test]
fn test_links_for_device() {
    let (net, r1, r2, pc1) = get_test_net();

    assert_eq!(net.links_for_device(&r1).len(), 2);
    assert_eq!(net.links_for_device(&r2).len(), 1);
    assert_eq!(net.links_for_device(&pc1).len(), 1);

    // insertion order is preserved
    let links = net.links_for_device(&r1);
    assert_eq!(links[0].interface_for(&r1), Some("Gi0/0"));
    assert_eq!(links[1].interface_for(&r1), Some("Gi0/1"));
}

#[test]
fn test_remove_device_cascades_links() {
    let (mut net, r1, r2, pc1) = get_test_net();
    assert_eq!(net.links().len(), 2);

    // removing R2 removes exactly the R1--R2 link
    net.remove_device(&r2);
    assert_eq!(net.num_devices(), 2);
    assert_eq!(net.links().len(), 1);
    assert!(net.links()[0].touches(&pc1));

    // removing R1 removes the remaining link
    net.remove_device(&r1);
    assert_eq!(net.links().len(), 0);
    assert_eq!(net.num_devices(), 1);
}

#[test]
fn test_remove_link() {
    let (mut net, r1, _, _) = get_test_net();
    let link_id = net.links()[0].id().to_string();

    net.remove_link(&link_id);
    assert_eq!(net.links().len(), 1);
    assert!(net.link(&link_id).is_none());
    assert!(!net.interface_in_use(&r1, "Gi0/0"));
}

#[test]
fn test_dangling_link_is_tolerated() {
    let (mut net, r1, _, _) = get_test_net();
    net.add_link(Link::new(r1.as_str(), "Gi0/3", "ghost-device", "Gi0/0"));

    let dangling = net.links().last().unwrap().clone();
    assert!(net.neighbor(&dangling, &r1).is_none());
    assert_eq!(net.interface_for_link(&dangling, "ghost-device"), Some("Gi0/0"));
}

#[test]
fn test_clear() {
    let (mut net, _, _, _) = get_test_net();
    net.set_name("Lab");
    net.clear();
    assert_eq!(net.num_devices(), 0);
    assert_eq!(net.links().len(), 0);
    assert_eq!(net.name(), "Untitled Network");
}
