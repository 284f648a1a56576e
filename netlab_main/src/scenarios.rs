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

//! The built-in verification topologies.

use netlab::topology::{Device, Link, Network, Protocol, StaticRoute};

fn set_iface(dev: &mut Device, name: &str, ip: &str, mask: &str) {
    let iface = dev.interface_mut(name).expect("unknown interface");
    iface.ip = ip.to_string();
    iface.mask = mask.to_string();
}

/// Two RIPv2 routers with one host per LAN:
///
/// ```text
/// PC1 --- R1 (Gi0/1: 192.168.1.1/24) --- (Gi0/0: 10.0.0.1/30)
///                                          |
/// PC2 --- R2 (Gi0/1: 172.16.0.1/24)  --- (Gi0/0: 10.0.0.2/30)
/// ```
pub fn rip_network() -> Network {
    let mut net = Network::new();
    net.set_name("rip-two-router-chain");

    let mut r1 = Device::router("R1");
    r1.router_mut().unwrap().protocol = Protocol::Ripv2;
    set_iface(&mut r1, "Gi0/0", "10.0.0.1", "255.255.255.252");
    set_iface(&mut r1, "Gi0/1", "192.168.1.1", "255.255.255.0");

    let mut r2 = Device::router("R2");
    r2.router_mut().unwrap().protocol = Protocol::Ripv2;
    set_iface(&mut r2, "Gi0/0", "10.0.0.2", "255.255.255.252");
    set_iface(&mut r2, "Gi0/1", "172.16.0.1", "255.255.255.0");

    let mut pc1 = Device::host("PC1");
    set_iface(&mut pc1, "eth0", "192.168.1.10", "255.255.255.0");
    pc1.host_mut().unwrap().default_gateway = "192.168.1.1".to_string();

    let mut pc2 = Device::host("PC2");
    set_iface(&mut pc2, "eth0", "172.16.0.10", "255.255.255.0");
    pc2.host_mut().unwrap().default_gateway = "172.16.0.1".to_string();

    let r1 = net.add_device(r1);
    let r2 = net.add_device(r2);
    let pc1 = net.add_device(pc1);
    let pc2 = net.add_device(pc2);
    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));
    net.add_link(Link::new(r1.as_str(), "Gi0/1", pc1.as_str(), "eth0"));
    net.add_link(Link::new(r2.as_str(), "Gi0/1", pc2.as_str(), "eth0"));

    net
}

/// Two OSPF routers over a /30, both directions with cost 10.
pub fn ospf_network() -> Network {
    let mut net = Network::new();
    net.set_name("ospf-two-router");

    let mut r1 = Device::router("OR1");
    {
        let cfg = r1.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "1.1.1.1".to_string();
    }
    set_iface(&mut r1, "Gi0/0", "10.1.0.1", "255.255.255.252");
    set_iface(&mut r1, "Gi0/1", "192.168.10.1", "255.255.255.0");
    r1.interface_mut("Gi0/0").unwrap().ospf_cost = 10;

    let mut r2 = Device::router("OR2");
    {
        let cfg = r2.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "2.2.2.2".to_string();
    }
    set_iface(&mut r2, "Gi0/0", "10.1.0.2", "255.255.255.252");
    set_iface(&mut r2, "Gi0/1", "172.16.10.1", "255.255.255.0");
    r2.interface_mut("Gi0/0").unwrap().ospf_cost = 10;

    let r1 = net.add_device(r1);
    let r2 = net.add_device(r2);
    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));

    net
}

/// Two static routers with a route toward each other's LAN.
pub fn static_network() -> Network {
    let mut net = Network::new();
    net.set_name("static-chain");

    let mut r1 = Device::router("SR1");
    set_iface(&mut r1, "Gi0/0", "10.0.0.1", "255.255.255.252");
    set_iface(&mut r1, "Gi0/1", "192.168.20.1", "255.255.255.0");
    r1.router_mut()
        .unwrap()
        .static_routes
        .push(StaticRoute::new("172.16.20.0", "255.255.255.0", "10.0.0.2"));

    let mut r2 = Device::router("SR2");
    set_iface(&mut r2, "Gi0/0", "10.0.0.2", "255.255.255.252");
    set_iface(&mut r2, "Gi0/1", "172.16.20.1", "255.255.255.0");
    r2.router_mut()
        .unwrap()
        .static_routes
        .push(StaticRoute::new("192.168.20.0", "255.255.255.0", "10.0.0.1"));

    let r1 = net.add_device(r1);
    let r2 = net.add_device(r2);
    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));

    net
}

/// A deliberately broken topology: subnet mismatch, duplicate router-id, a
/// host without gateway, and a disconnected device.
pub fn broken_network() -> Network {
    let mut net = Network::new();
    net.set_name("broken");

    let mut r1 = Device::router("BR1");
    {
        let cfg = r1.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "3.3.3.3".to_string();
    }
    set_iface(&mut r1, "Gi0/0", "10.0.5.1", "255.255.255.0");

    let mut r2 = Device::router("BR2");
    {
        let cfg = r2.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "3.3.3.3".to_string();
    }
    set_iface(&mut r2, "Gi0/0", "10.0.5.2", "255.255.255.252");

    let mut pc = Device::host("BPC");
    set_iface(&mut pc, "eth0", "192.168.99.5", "255.255.255.0");

    let r1 = net.add_device(r1);
    let r2 = net.add_device(r2);
    net.add_device(pc);
    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));

    net
}

/// Three PIM-DM routers in a chain with the source host behind the first
/// and a receiver behind the last. Returns the network and the receiver's
/// device ID so callers can unplug it.
pub fn pim_network() -> (Network, String) {
    let mut net = Network::new();
    net.set_name("pim-chain");

    let mut r1 = Device::router("R1");
    r1.router_mut().unwrap().protocol = Protocol::PimDm;
    set_iface(&mut r1, "Gi0/0", "10.0.0.1", "255.255.255.252");
    set_iface(&mut r1, "Gi0/1", "192.168.1.1", "255.255.255.0");

    let mut r2 = Device::router("R2");
    r2.router_mut().unwrap().protocol = Protocol::PimDm;
    set_iface(&mut r2, "Gi0/0", "10.0.0.2", "255.255.255.252");
    set_iface(&mut r2, "Gi0/1", "10.0.1.1", "255.255.255.252");

    let mut r3 = Device::router("R3");
    r3.router_mut().unwrap().protocol = Protocol::PimDm;
    set_iface(&mut r3, "Gi0/0", "10.0.1.2", "255.255.255.252");
    set_iface(&mut r3, "Gi0/1", "172.16.0.1", "255.255.255.0");

    let mut pc1 = Device::host("PC1");
    set_iface(&mut pc1, "eth0", "192.168.1.10", "255.255.255.0");
    pc1.host_mut().unwrap().default_gateway = "192.168.1.1".to_string();

    let mut pc3 = Device::host("PC3");
    set_iface(&mut pc3, "eth0", "172.16.0.10", "255.255.255.0");
    pc3.host_mut().unwrap().default_gateway = "172.16.0.1".to_string();

    let r1 = net.add_device(r1);
    let r2 = net.add_device(r2);
    let r3 = net.add_device(r3);
    let pc1 = net.add_device(pc1);
    let pc3 = net.add_device(pc3);

    net.add_link(Link::new(pc1.as_str(), "eth0", r1.as_str(), "Gi0/1"));
    net.add_link(Link::new(r1.as_str(), "Gi0/0", r2.as_str(), "Gi0/0"));
    net.add_link(Link::new(r2.as_str(), "Gi0/1", r3.as_str(), "Gi0/0"));
    net.add_link(Link::new(r3.as_str(), "Gi0/1", pc3.as_str(), "eth0"));

    (net, pc3)
}
