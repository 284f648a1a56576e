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

//! Test the static / connected pass.

use crate::routing;
use crate::topology::{
    Device, DeviceConfig, Link, Network, RouteSource, RoutingEntry, StaticRoute,
    DIRECTLY_CONNECTED,
};

fn has_route(table: &[RoutingEntry], dest: &str, mask: &str, protocol: RouteSource) -> bool {
    table.iter().any(|e| e.destination == dest && e.mask == mask && e.protocol == protocol)
}

/// Two static routers on a /30 transfer network, each with a LAN and a
/// static route toward the other's LAN.
fn build_static_network() -> (Network, String, String) {
    let mut net = Network::new();

    let mut sr1 = Device::router("SR1");
    sr1.interface_mut("Gi0/0").unwrap().ip = "10.0.0.1".to_string();
    sr1.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
    sr1.interface_mut("Gi0/1").unwrap().ip = "192.168.20.1".to_string();
    sr1.interface_mut("Gi0/1").unwrap().mask = "255.255.255.0".to_string();
    sr1.router_mut()
        .unwrap()
        .static_routes
        .push(StaticRoute::new("172.16.20.0", "255.255.255.0", "10.0.0.2"));

    let mut sr2 = Device::router("SR2");
    sr2.interface_mut("Gi0/0").unwrap().ip = "10.0.0.2".to_string();
    sr2.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
    sr2.interface_mut("Gi0/1").unwrap().ip = "172.16.20.1".to_string();
    sr2.interface_mut("Gi0/1").unwrap().mask = "255.255.255.0".to_string();
    sr2.router_mut()
        .unwrap()
        .static_routes
        .push(StaticRoute::new("192.168.20.0", "255.255.255.0", "10.0.0.1"));

    let sr1 = net.add_device(sr1);
    let sr2 = net.add_device(sr2);
    net.add_link(Link::new(sr1.as_str(), "Gi0/0", sr2.as_str(), "Gi0/0"));

    (net, sr1, sr2)
}

#[test]
fn test_connected_routes() {
    let (mut net, sr1, _) = build_static_network();
    routing::run(&mut net, None, None);

    let table = &net.device(&sr1).unwrap().router().unwrap().routing_table;
    assert!(has_route(table, "10.0.0.0", "255.255.255.252", RouteSource::Connected));
    assert!(has_route(table, "192.168.20.0", "255.255.255.0", RouteSource::Connected));

    for entry in table.iter().filter(|e| e.protocol == RouteSource::Connected) {
        assert_eq!(entry.metric, 0);
        assert_eq!(entry.next_hop, DIRECTLY_CONNECTED);
        assert!(net.device(&sr1).unwrap().interface(&entry.exit_interface).is_some());
    }
}

#[test]
fn test_static_route_resolution() {
    let (mut net, sr1, sr2) = build_static_network();
    routing::run(&mut net, None, None);

    let table = &net.device(&sr1).unwrap().router().unwrap().routing_table;
    assert!(has_route(table, "172.16.20.0", "255.255.255.0", RouteSource::Static));

    // the next hop 10.0.0.2 lies in Gi0/0's subnet
    let entry = table.iter().find(|e| e.destination == "172.16.20.0").unwrap();
    assert_eq!(entry.next_hop, "10.0.0.2");
    assert_eq!(entry.exit_interface, "Gi0/0");
    assert_eq!(entry.metric, 1);

    let table2 = &net.device(&sr2).unwrap().router().unwrap().routing_table;
    assert!(has_route(table2, "192.168.20.0", "255.255.255.0", RouteSource::Static));
}

#[test]
fn test_static_route_without_matching_interface() {
    let (mut net, sr1, _) = build_static_network();
    net.device_mut(&sr1)
        .unwrap()
        .router_mut()
        .unwrap()
        .static_routes
        .push(StaticRoute::new("10.99.0.0", "255.255.0.0", "172.31.0.1"));
    routing::run(&mut net, None, None);

    // no interface subnet contains the next hop; the exit interface stays empty
    let table = &net.device(&sr1).unwrap().router().unwrap().routing_table;
    let entry = table.iter().find(|e| e.destination == "10.99.0.0").unwrap();
    assert_eq!(entry.exit_interface, "");
}

#[test]
fn test_incomplete_static_routes_are_skipped() {
    let (mut net, sr1, _) = build_static_network();
    {
        let routes = &mut net.device_mut(&sr1).unwrap().router_mut().unwrap().static_routes;
        routes.push(StaticRoute::new("", "255.255.255.0", "10.0.0.2"));
        routes.push(StaticRoute::new("10.5.0.0", "", "10.0.0.2"));
    }
    routing::run(&mut net, None, None);

    let table = &net.device(&sr1).unwrap().router().unwrap().routing_table;
    assert!(!table.iter().any(|e| e.destination.is_empty()));
    assert!(!table.iter().any(|e| e.destination == "10.5.0.0"));
}

#[test]
fn test_unconfigured_interfaces_produce_no_routes() {
    let (mut net, sr1, _) = build_static_network();
    routing::run(&mut net, None, None);

    // only two of the four interfaces are configured
    let table = &net.device(&sr1).unwrap().router().unwrap().routing_table;
    assert_eq!(table.iter().filter(|e| e.protocol == RouteSource::Connected).count(), 2);
}
