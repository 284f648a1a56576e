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

//! # Configuration Validator
//!
//! Seven independent structural checks over the topology. Every condition
//! detectable by static inspection becomes a structured [`ValidationIssue`];
//! the validator never short-circuits and never fails. It reads the
//! topology only and has no ordering dependency on the routing engine.
//!
//! Issue order is check order, then per-check discovery order. Checks that
//! group by a hashed key (address conflicts, duplicate router-ids) report
//! their groups in ascending key order to keep the output deterministic.

use crate::ip;
use crate::topology::{DeviceConfig, DeviceId, Network, Protocol};
use itertools::Itertools;
use std::collections::{HashSet, VecDeque};
use std::fmt;

/// How severe a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Configuration the engine cannot produce correct output for
    Error,
    /// Suspect configuration that still simulates
    Warning,
    /// Informational finding
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        })
    }
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Severity of the finding
    pub severity: Severity,
    /// Human-readable description
    pub message: String,
    /// IDs of the affected devices (may be empty)
    pub device_ids: Vec<DeviceId>,
}

/// Run all checks over the topology.
pub fn validate(net: &Network) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    check_ip_conflicts(net, &mut issues);
    check_subnet_mismatches(net, &mut issues);
    check_host_gateways(net, &mut issues);
    check_ospf_router_ids(net, &mut issues);
    check_unconnected_interfaces(net, &mut issues);
    check_rip_networks(net, &mut issues);
    check_reachability(net, &mut issues);
    issues
}

/// Any address assigned to more than one configured interface is an error.
fn check_ip_conflicts(net: &Network, issues: &mut Vec<ValidationIssue>) {
    let by_ip = net
        .devices()
        .flat_map(|dev| {
            dev.interfaces
                .iter()
                .filter(|iface| iface.is_configured())
                .map(move |iface| (iface.ip.clone(), (dev, iface)))
        })
        .into_group_map();

    for (addr, owners) in by_ip.into_iter().sorted_by_key(|(addr, _)| ip::parse(addr)) {
        if owners.len() > 1 {
            let assigned = owners
                .iter()
                .map(|(dev, iface)| format!("{} ({})", dev.name, iface.name))
                .join(", ");
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("IP address conflict: {} is assigned to: {}", addr, assigned),
                device_ids: owners.iter().map(|(dev, _)| dev.id().to_string()).collect(),
            });
        }
    }
}

/// Both ends of a routed link must agree on the network address and the
/// mask. Switch and hub ports are layer-2 only and are skipped.
fn check_subnet_mismatches(net: &Network, issues: &mut Vec<ValidationIssue>) {
    for link in net.links() {
        let (d1, d2) = match (net.device(&link.device1_id), net.device(&link.device2_id)) {
            (Some(d1), Some(d2)) => (d1, d2),
            _ => continue,
        };
        if d1.is_l2() || d2.is_l2() {
            continue;
        }
        let (if1, if2) = match (d1.interface(&link.interface1), d2.interface(&link.interface2)) {
            (Some(if1), Some(if2)) => (if1, if2),
            _ => continue,
        };
        if !if1.is_configured() || !if2.is_configured() {
            continue;
        }

        if if1.network_addr() != if2.network_addr() || if1.mask != if2.mask {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!(
                    "Subnet mismatch on link {} ({}: {}/{}) <-> {} ({}: {}/{})",
                    d1.name, if1.name, if1.ip, if1.mask, d2.name, if2.name, if2.ip, if2.mask
                ),
                device_ids: vec![d1.id().to_string(), d2.id().to_string()],
            });
        }
    }
}

/// A configured host should name a default gateway, and the gateway must
/// fall into the host's own subnet.
fn check_host_gateways(net: &Network, issues: &mut Vec<ValidationIssue>) {
    for device in net.hosts() {
        let eth = match device.primary_interface() {
            Some(iface) if iface.is_configured() => iface,
            _ => continue,
        };
        let gateway = device.host().map(|h| h.default_gateway.as_str()).unwrap_or_default();

        if gateway.is_empty() {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!("Host '{}' has no default gateway configured.", device.name),
                device_ids: vec![device.id().to_string()],
            });
            continue;
        }

        if !ip::same_subnet(&eth.ip, gateway, &eth.mask) {
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!(
                    "Host '{}': default gateway {} is not on the same subnet as {}/{}.",
                    device.name, gateway, eth.ip, eth.mask
                ),
                device_ids: vec![device.id().to_string()],
            });
        }
    }
}

/// Two OSPF routers sharing a router-id is an error.
fn check_ospf_router_ids(net: &Network, issues: &mut Vec<ValidationIssue>) {
    let by_rid = net
        .devices()
        .filter_map(|dev| dev.router().map(|cfg| (dev, cfg)))
        .filter(|(_, cfg)| cfg.protocol == Protocol::Ospf && !cfg.ospf.router_id.is_empty())
        .map(|(dev, cfg)| (cfg.ospf.router_id.clone(), dev))
        .into_group_map();

    for (rid, routers) in by_rid.into_iter().sorted_by_key(|(rid, _)| ip::parse(rid)) {
        if routers.len() > 1 {
            let names = routers.iter().map(|dev| dev.name.as_str()).join(", ");
            issues.push(ValidationIssue {
                severity: Severity::Error,
                message: format!("Duplicate OSPF router-id {} on: {}", rid, names),
                device_ids: routers.iter().map(|dev| dev.id().to_string()).collect(),
            });
        }
    }
}

/// A configured interface that no link binds is probably a mistake.
fn check_unconnected_interfaces(net: &Network, issues: &mut Vec<ValidationIssue>) {
    for device in net.devices() {
        for iface in device.interfaces.iter().filter(|i| i.is_configured()) {
            if !net.interface_in_use(device.id(), &iface.name) {
                issues.push(ValidationIssue {
                    severity: Severity::Warning,
                    message: format!(
                        "'{}' interface {} ({}) is configured but not connected.",
                        device.name, iface.name, iface.ip
                    ),
                    device_ids: vec![device.id().to_string()],
                });
            }
        }
    }
}

/// A RIPv2 router without network statements still advertises everything,
/// but the empty list is worth flagging.
fn check_rip_networks(net: &Network, issues: &mut Vec<ValidationIssue>) {
    for device in net.devices() {
        let empty = device
            .router()
            .map(|cfg| cfg.protocol == Protocol::Ripv2 && cfg.ripv2.networks.is_empty())
            .unwrap_or(false);
        if empty {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!(
                    "RIPv2 router '{}' has no network statements configured.",
                    device.name
                ),
                device_ids: vec![device.id().to_string()],
            });
        }
    }
}

/// Breadth-first search over the physical topology, starting from the first
/// device; everything not reached is flagged.
fn check_reachability(net: &Network, issues: &mut Vec<ValidationIssue>) {
    let first = match net.devices().next() {
        Some(dev) => dev.id().to_string(),
        None => return,
    };

    let mut visited: HashSet<DeviceId> = HashSet::new();
    let mut queue: VecDeque<DeviceId> = VecDeque::new();
    queue.push_back(first);

    while let Some(current) = queue.pop_front() {
        if !visited.insert(current.clone()) {
            continue;
        }
        for link in net.links_for_device(&current) {
            if let Some(neighbor) = net.neighbor(link, &current) {
                if !visited.contains(neighbor.id()) {
                    queue.push_back(neighbor.id().to_string());
                }
            }
        }
    }

    for device in net.devices() {
        if !visited.contains(device.id()) {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                message: format!(
                    "Device '{}' is not connected to the rest of the network.",
                    device.name
                ),
                device_ids: vec![device.id().to_string()],
            });
        }
    }
}
