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

//! # Helper (printer) functions for simulation results
//!
//! Module containing helper functions to get formatted strings and print
//! routing tables, multicast trees and validation issues. The core exposes
//! plain value records; these helpers are for text front-ends.

use crate::ip;
use crate::routing::{MulticastTree, RouterResult};
use crate::topology::RoutingEntry;
use crate::validation::ValidationIssue;

/// Returns the formatted string for a single routing entry.
pub fn routing_entry(entry: &RoutingEntry) -> String {
    format!(
        "{:10} {}/{} via {}, {}, metric {}",
        entry.protocol.to_string(),
        entry.destination,
        ip::mask_to_prefix(ip::parse(&entry.mask)),
        entry.next_hop,
        if entry.exit_interface.is_empty() { "-" } else { &entry.exit_interface },
        entry.metric,
    )
}

/// Get a vector of strings representing one router's routing table, one
/// line per entry.
pub fn routing_table(result: &RouterResult) -> Vec<String> {
    result.routing_table.iter().map(routing_entry).collect()
}

/// Print the routing table of a router to stdout.
pub fn print_routing_table(result: &RouterResult) {
    println!("Routing table of {} [{}]", result.router_name, result.protocol);
    for line in routing_table(result) {
        println!("    {}", line);
    }
}

/// Get a vector of strings representing a multicast tree, one line per
/// on-tree router, followed by the pruned routers.
pub fn multicast_tree(tree: &MulticastTree) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for entry in &tree.entries {
        result.push(format!(
            "{}: in {}, out [{}]",
            entry.router_name,
            if entry.incoming_interface.is_empty() { "(source)" } else { &entry.incoming_interface },
            entry.outgoing_interfaces.join(", "),
        ));
    }
    if !tree.pruned.is_empty() {
        result.push(format!("pruned: {}", tree.pruned.join(", ")));
    }
    result
}

/// Print a multicast tree to stdout.
pub fn print_multicast_tree(tree: &MulticastTree) {
    println!("Multicast tree ({}, {})", tree.source_ip, tree.group_address);
    for line in multicast_tree(tree) {
        println!("    {}", line);
    }
}

/// Returns the formatted string for a validation issue.
pub fn validation_issue(issue: &ValidationIssue) -> String {
    format!("[{}] {}", issue.severity, issue.message)
}

/// Print a list of validation issues to stdout.
pub fn print_validation_issues(issues: &[ValidationIssue]) {
    for issue in issues {
        println!("{}", validation_issue(issue));
    }
}
