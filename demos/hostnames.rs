//! Example: compressing a list of host names into one pattern.
//!
//! Shows the one-shot [`regroup::pattern`] call, the reusable [`Dawg`] and
//! grouping the result by prefix for display.
//!
//! Run with: cargo run --example hostnames

use regroup::Dawg;

fn main() {
    let hosts = [
        "web01.eu.example.com",
        "web02.eu.example.com",
        "web03.eu.example.com",
        "web01.us.example.com",
        "web02.us.example.com",
        "db01.eu.example.com",
        "db02.eu.example.com",
        "cache.us.example.com",
    ];

    println!("Pattern:\n  {}", regroup::pattern(hosts));

    let dawg = Dawg::from_strings(hosts);
    println!("\nGraph: {} nodes for {} hosts", dawg.node_count(), hosts.len());

    println!("\nBy prefix:");
    for cluster in dawg.cluster_by_prefixlen(3) {
        println!("  {:<6} {}", cluster.prefix, cluster.pattern);
    }

    println!("\nMembership:");
    for host in ["web03.eu.example.com", "web03.us.example.com"] {
        let answer = if dawg.contains(host) { "yes" } else { "no" };
        println!("  {host}: {answer}");
    }
}
