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

//! Test the configuration validator.

use crate::topology::{Device, Link, Network, Protocol};
use crate::validation::{validate, Severity, ValidationIssue};

fn has_issue(issues: &[ValidationIssue], severity: Severity, fragment: &str) -> bool {
    issues.iter().any(|i| i.severity == severity && i.message.contains(fragment))
}

fn count_severity(issues: &[ValidationIssue], severity: Severity) -> usize {
    issues.iter().filter(|i| i.severity == severity).count()
}

/// A correctly configured RIPv2 pair with one host per LAN.
fn build_clean_network() -> Network {
    let mut net = Network::new();

    let mut r1 = Device::router("R1");
    {
        let cfg = r1.router_mut().unwrap();
        cfg.protocol = Protocol::Ripv2;
        cfg.ripv2.networks = vec!["10.0.0.0".to_string(), "192.168.1.0".to_string()];
    }
    r1.interface_mut("Gi0/0").unwrap().ip = "10.0.0.1".to_string();
    r1.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
    r1.interface_mut("Gi0/1").unwrap().ip = "192.168.1.1".to_string();
    r1.interface_mut("Gi0/1").unwrap().mask = "255.255.255.0".to_string();

    let mut r2 = Device::router("R2");
    {
        let cfg = r2.router_mut().unwrap();
        cfg.protocol = Protocol::Ripv2;
        cfg.ripv2.networks = vec!["10.0.0.0".to_string(), "172.16.0.0".to_string()];
    }
    r2.interface_mut("Gi0/0").unwrap().ip = "10.0.0.2".to_string();
    r2.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();
    r2.interface_mut("Gi0/1").unwrap().ip = "172.16.0.1".to_string();
    r2.interface_mut("Gi0/1").unwrap().mask = "255.255.255.0".to_string();

    let mut pc1 = Device::host("PC1");
    pc1.interface_mut("eth0").unwrap().ip = "192.168.1.10".to_string();
    pc1.interface_mut("eth0").unwrap().mask = "255.255.255.0".to_string();
    pc1.host_mut().unwrap().default_gateway = "192.168.1.1".to_string();

    let mut pc2 = Device::host("PC2");
    pc2.interface_mut("eth0").unwrap().ip = "172.16.0.10".to_string();
    pc2.interface_mut("eth0").unwrap().mask = "255.255.255.0".to_string();
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

/// A deliberately broken topology: subnet mismatch, duplicate router-id,
/// missing gateway, and an isolated host.
fn build_broken_network() -> Network {
    let mut net = Network::new();

    let mut br1 = Device::router("BR1");
    {
        let cfg = br1.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "3.3.3.3".to_string();
    }
    br1.interface_mut("Gi0/0").unwrap().ip = "10.0.5.1".to_string();
    br1.interface_mut("Gi0/0").unwrap().mask = "255.255.255.0".to_string();

    let mut br2 = Device::router("BR2");
    {
        let cfg = br2.router_mut().unwrap();
        cfg.protocol = Protocol::Ospf;
        cfg.ospf.router_id = "3.3.3.3".to_string();
    }
    br2.interface_mut("Gi0/0").unwrap().ip = "10.0.5.2".to_string();
    br2.interface_mut("Gi0/0").unwrap().mask = "255.255.255.252".to_string();

    let mut bpc = Device::host("BPC");
    bpc.interface_mut("eth0").unwrap().ip = "192.168.99.5".to_string();
    bpc.interface_mut("eth0").unwrap().mask = "255.255.255.0".to_string();
    // no default gateway, no links

    let br1 = net.add_device(br1);
    let br2 = net.add_device(br2);
    net.add_device(bpc);
    net.add_link(Link::new(br1.as_str(), "Gi0/0", br2.as_str(), "Gi0/0"));

    net
}

#[test]
fn test_clean_network_has_no_errors() {
    let net = build_clean_network();
    let issues = validate(&net);
    assert_eq!(count_severity(&issues, Severity::Error), 0);
}

#[test]
fn test_broken_network() {
    let net = build_broken_network();
    let issues = validate(&net);

    assert!(has_issue(&issues, Severity::Error, "Subnet mismatch"));
    assert!(has_issue(&issues, Severity::Error, "router-id"));
    assert!(has_issue(&issues, Severity::Warning, "gateway"));
    assert!(has_issue(&issues, Severity::Warning, "not connected"));
}

#[test]
fn test_ip_conflict() {
    let mut net = build_clean_network();
    // a third device claiming R1's LAN address
    let mut pc = Device::host("EVIL");
    pc.interface_mut("eth0").unwrap().ip = "192.168.1.1".to_string();
    pc.interface_mut("eth0").unwrap().mask = "255.255.255.0".to_string();
    pc.host_mut().unwrap().default_gateway = "192.168.1.1".to_string();
    let pc = net.add_device(pc);
    let r1 = net.routers()[0].id().to_string();
    net.add_link(Link::new(pc.as_str(), "eth0", r1.as_str(), "Gi0/2"));

    let issues = validate(&net);
    let conflict = issues
        .iter()
        .find(|i| i.message.contains("IP address conflict: 192.168.1.1"))
        .unwrap();
    assert_eq!(conflict.severity, Severity::Error);
    assert!(conflict.message.contains("R1 (Gi0/1)"));
    assert!(conflict.message.contains("EVIL (eth0)"));
    assert_eq!(conflict.device_ids.len(), 2);
}

#[test]
fn test_subnet_mismatch_skips_l2_ports() {
    let mut net = build_clean_network();
    // splice a switch between R1 and PC1; neither switch port carries
    // addressing, so no mismatch may be reported
    let r1 = net.routers()[0].id().to_string();
    let pc1 = net.hosts()[0].id().to_string();
    let old_link = net
        .links()
        .iter()
        .find(|l| l.touches(&r1) && l.touches(&pc1))
        .unwrap()
        .id()
        .to_string();
    net.remove_link(&old_link);
    let sw = net.add_device(Device::switch("SW1"));
    net.add_link(Link::new(r1.as_str(), "Gi0/1", sw.as_str(), "Fa0/0"));
    net.add_link(Link::new(sw.as_str(), "Fa0/1", pc1.as_str(), "eth0"));

    let issues = validate(&net);
    assert!(!has_issue(&issues, Severity::Error, "Subnet mismatch"));
}

#[test]
fn test_gateway_off_subnet_is_an_error() {
    let mut net = build_clean_network();
    let pc1 = net.hosts()[0].id().to_string();
    net.device_mut(&pc1).unwrap().host_mut().unwrap().default_gateway =
        "10.99.99.1".to_string();

    let issues = validate(&net);
    assert!(has_issue(&issues, Severity::Error, "not on the same subnet"));
}

#[test]
fn test_unconnected_configured_interface() {
    let mut net = build_clean_network();
    let r1 = net.routers()[0].id().to_string();
    {
        let iface = net.device_mut(&r1).unwrap().interface_mut("Gi0/2").unwrap();
        iface.ip = "10.55.0.1".to_string();
        iface.mask = "255.255.255.0".to_string();
    }

    let issues = validate(&net);
    assert!(has_issue(&issues, Severity::Warning, "configured but not connected"));
}

#[test]
fn test_empty_rip_network_list() {
    let mut net = build_clean_network();
    let r1 = net.routers()[0].id().to_string();
    net.device_mut(&r1).unwrap().router_mut().unwrap().ripv2.networks.clear();

    let issues = validate(&net);
    assert!(has_issue(&issues, Severity::Warning, "no network statements"));
}

#[test]
fn test_reachability_counts_disconnected_devices() {
    let mut net = build_clean_network();
    // two stranded devices
    net.add_device(Device::host("LOST1"));
    net.add_device(Device::switch("LOST2"));

    let issues = validate(&net);
    let disconnected = issues
        .iter()
        .filter(|i| i.message.contains("not connected to the rest"))
        .count();
    assert_eq!(disconnected, net.num_devices() - 4);
}

#[test]
fn test_empty_network_produces_no_issues() {
    let net = Network::new();
    assert!(validate(&net).is_empty());
}
