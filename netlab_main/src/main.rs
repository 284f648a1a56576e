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

//! Headless front-end: run the built-in verification scenarios, or simulate
//! a topology file and print the results.

use netlab::printer;
use netlab::routing::{self, RouterResult};
use netlab::topology::{Network, RouteSource, RoutingEntry};
use netlab::validation::{self, Severity, ValidationIssue};
use netlab::{persist, Error};

use clap::{Parser, Subcommand};
use log::*;

mod scenarios;

#[derive(Parser, Debug)]
#[clap(name = "NetLab (Binary)", author = "Tibor Schneider")]
struct CommandLineArguments {
    /// The command to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Run the built-in verification scenarios; print PASS or FAIL for every
    /// assertion and exit non-zero on any failure.
    Verify,
    /// Load a topology file, run the simulation and the validator, and
    /// print routing tables, the multicast tree and all issues.
    Simulate {
        /// The topology JSON file to load
        file: String,
        /// Address of a multicast source for the PIM-DM tree
        #[clap(long)]
        pim_source: Option<String>,
        /// Multicast group address for the PIM-DM tree
        #[clap(long)]
        pim_group: Option<String>,
    },
}

fn main() -> Result<(), Error> {
    pretty_env_logger::init();
    let args = CommandLineArguments::parse();

    match args.cmd {
        MainCommand::Verify => verify(),
        MainCommand::Simulate { file, pim_source, pim_group } => {
            simulate(&file, pim_source.as_deref(), pim_group.as_deref())
        }
    }
}

fn simulate(file: &str, pim_source: Option<&str>, pim_group: Option<&str>) -> Result<(), Error> {
    let mut net = persist::load(file)?;
    info!("loaded '{}' with {} devices", net.name(), net.num_devices());

    let result = routing::run(&mut net, pim_source, pim_group);
    for router in &result.router_results {
        printer::print_routing_table(router);
    }
    for tree in &result.multicast_trees {
        printer::print_multicast_tree(tree);
    }

    let issues = validation::validate(&net);
    printer::print_validation_issues(&issues);
    Ok(())
}

// ---------------------------------------------------------------------------
// Verification harness
// ---------------------------------------------------------------------------

/// Counts assertion outcomes of the verification run.
#[derive(Debug, Default)]
struct Harness {
    passed: usize,
    failed: usize,
}

impl Harness {
    fn check(&mut self, condition: bool, desc: &str) {
        if condition {
            println!("  PASS  {}", desc);
            self.passed += 1;
        } else {
            println!("  FAIL  {}", desc);
            self.failed += 1;
        }
    }

    fn section(&self, title: &str) {
        println!("\n=== {} ===", title);
    }
}

fn has_route(table: &[RoutingEntry], dest: &str, mask: &str, protocol: RouteSource) -> bool {
    table.iter().any(|e| e.destination == dest && e.mask == mask && e.protocol == protocol)
}

fn has_issue(issues: &[ValidationIssue], severity: Severity, fragment: &str) -> bool {
    issues.iter().any(|i| i.severity == severity && i.message.contains(fragment))
}

fn table_of<'a>(result: &'a [RouterResult], name: &str) -> &'a [RoutingEntry] {
    result
        .iter()
        .find(|r| r.router_name == name)
        .map(|r| r.routing_table.as_slice())
        .unwrap_or_default()
}

fn verify() -> Result<(), Error> {
    println!("NetLab — Simulation & Validation Verification");
    println!("=============================================");

    let mut h = Harness::default();
    verify_ripv2(&mut h);
    verify_ospf(&mut h);
    verify_static(&mut h);
    verify_validation(&mut h);
    verify_pim(&mut h);
    verify_save_load(&mut h)?;

    println!("\n---------------------------------------------");
    println!("Results: {} passed, {} failed.", h.passed, h.failed);

    if h.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn verify_ripv2(h: &mut Harness) {
    h.section("RIPv2 Simulation");
    let mut net = scenarios::rip_network();
    let result = routing::run(&mut net, None, None);

    let t1 = table_of(&result.router_results, "R1");
    h.check(
        has_route(t1, "10.0.0.0", "255.255.255.252", RouteSource::Connected),
        "R1 has connected route 10.0.0.0/30",
    );
    h.check(
        has_route(t1, "192.168.1.0", "255.255.255.0", RouteSource::Connected),
        "R1 has connected route 192.168.1.0/24",
    );
    h.check(
        has_route(t1, "172.16.0.0", "255.255.255.0", RouteSource::Ripv2),
        "R1 learned 172.16.0.0/24 via RIPv2",
    );
    h.check(
        t1.iter().any(|e| e.destination == "172.16.0.0" && e.next_hop == "10.0.0.2"),
        "R1 next-hop for 172.16.0.0/24 is 10.0.0.2",
    );
    h.check(
        t1.iter().any(|e| e.destination == "172.16.0.0" && e.metric == 2),
        "R1 metric for 172.16.0.0/24 is 2",
    );

    let t2 = table_of(&result.router_results, "R2");
    h.check(
        has_route(t2, "192.168.1.0", "255.255.255.0", RouteSource::Ripv2),
        "R2 learned 192.168.1.0/24 via RIPv2",
    );
}

fn verify_ospf(h: &mut Harness) {
    h.section("OSPF Simulation");
    let mut net = scenarios::ospf_network();
    let result = routing::run(&mut net, None, None);

    let t1 = table_of(&result.router_results, "OR1");
    h.check(
        has_route(t1, "10.1.0.0", "255.255.255.252", RouteSource::Connected),
        "OR1 has connected route 10.1.0.0/30",
    );
    h.check(
        has_route(t1, "172.16.10.0", "255.255.255.0", RouteSource::Ospf),
        "OR1 learned 172.16.10.0/24 via OSPF",
    );
    h.check(
        t1.iter().any(|e| e.destination == "172.16.10.0" && e.metric == 10),
        "OR1 OSPF metric for 172.16.10.0/24 is 10 (link cost)",
    );

    let t2 = table_of(&result.router_results, "OR2");
    h.check(
        has_route(t2, "192.168.10.0", "255.255.255.0", RouteSource::Ospf),
        "OR2 learned 192.168.10.0/24 via OSPF",
    );
}

fn verify_static(h: &mut Harness) {
    h.section("Static Routing Simulation");
    let mut net = scenarios::static_network();
    let result = routing::run(&mut net, None, None);

    let t1 = table_of(&result.router_results, "SR1");
    h.check(
        has_route(t1, "192.168.20.0", "255.255.255.0", RouteSource::Connected),
        "SR1 has connected route 192.168.20.0/24",
    );
    h.check(
        has_route(t1, "172.16.20.0", "255.255.255.0", RouteSource::Static),
        "SR1 has static route to 172.16.20.0/24",
    );
    h.check(
        t1.iter()
            .any(|e| e.destination == "172.16.20.0" && e.exit_interface == "Gi0/0"),
        "SR1 static route resolves exit interface Gi0/0",
    );

    let t2 = table_of(&result.router_results, "SR2");
    h.check(
        has_route(t2, "192.168.20.0", "255.255.255.0", RouteSource::Static),
        "SR2 has static route to 192.168.20.0/24",
    );
}

fn verify_validation(h: &mut Harness) {
    h.section("Validation");
    let clean = scenarios::rip_network();
    let issues = validation::validate(&clean);
    h.check(
        !issues.iter().any(|i| i.severity == Severity::Error),
        "No errors on a correctly configured RIPv2 network",
    );

    let broken = scenarios::broken_network();
    let issues = validation::validate(&broken);
    for issue in &issues {
        println!("    {}", printer::validation_issue(issue));
    }
    h.check(
        has_issue(&issues, Severity::Error, "Subnet mismatch"),
        "Detected subnet mismatch between BR1 (/24) and BR2 (/30)",
    );
    h.check(
        has_issue(&issues, Severity::Error, "router-id"),
        "Detected duplicate OSPF router-id 3.3.3.3",
    );
    h.check(
        has_issue(&issues, Severity::Warning, "gateway"),
        "Detected host with no default gateway",
    );
    h.check(
        has_issue(&issues, Severity::Warning, "not connected"),
        "Detected isolated device (BPC)",
    );
}

fn verify_pim(h: &mut Harness) {
    h.section("PIM Dense Mode");
    let (mut net, receiver) = scenarios::pim_network();
    let result = routing::run(&mut net, Some("192.168.1.10"), Some("239.1.1.1"));

    h.check(result.multicast_trees.len() == 1, "One multicast tree was built");
    let tree = &result.multicast_trees[0];
    h.check(tree.entries.len() == 3, "All three routers are on the tree");
    h.check(tree.pruned.is_empty(), "No router is pruned");
    h.check(
        tree.entries.first().map(|e| e.router_name.as_str()) == Some("R1"),
        "R1 is the first hop",
    );
    h.check(
        tree.entries
            .iter()
            .find(|e| e.router_name == "R2")
            .map(|e| e.outgoing_interfaces == vec!["Gi0/1".to_string()])
            .unwrap_or(false),
        "R2 forwards toward R3 only",
    );
    h.check(
        tree.entries
            .iter()
            .find(|e| e.router_name == "R3")
            .map(|e| e.outgoing_interfaces.is_empty())
            .unwrap_or(false),
        "R3 has a direct receiver and an empty OIL",
    );

    // unplug the receiver: R3 and R2 lose their audience
    net.remove_device(&receiver);
    let result = routing::run(&mut net, Some("192.168.1.10"), Some("239.1.1.1"));
    let tree = &result.multicast_trees[0];
    h.check(
        tree.pruned.contains(&"R3".to_string()),
        "R3 is pruned after its receiver is removed",
    );
    h.check(
        !tree.entries.iter().any(|e| e.router_name == "R2"),
        "R2 is no longer on the tree",
    );
}

fn verify_save_load(h: &mut Harness) -> Result<(), Error> {
    h.section("Save / Load");
    let net = scenarios::rip_network();
    let path = std::env::temp_dir().join("netlab_verify_network.json");

    persist::save(&net, &path)?;
    let mut loaded: Network = persist::load(&path)?;
    std::fs::remove_file(&path)?;

    h.check(loaded.num_devices() == net.num_devices(), "Loaded device count matches original");
    h.check(loaded.links().len() == net.links().len(), "Loaded link count matches original");

    let result = routing::run(&mut loaded, None, None);
    let t1 = table_of(&result.router_results, "R1");
    h.check(
        has_route(t1, "172.16.0.0", "255.255.255.0", RouteSource::Ripv2),
        "R1 still learns 172.16.0.0/24 via RIPv2 after save/load",
    );
    Ok(())
}
