//! unixaddr Inspect
//!
//! Prints the derived address views of Unix domain socket paths.
//!
//! # Usage
//!
//! ```bash
//! # Show the views of one or more socket paths
//! unixaddr-inspect /var/run/server.sock /run/user/1000/app.sock
//!
//! # Inputs given in authority form
//! unixaddr-inspect --authority unix:/var/run/server.sock
//!
//! # Check whether arbitrary IPs fall in the reserved block
//! unixaddr-inspect --check 100::1 --check ::1
//!
//! # List an endpoint group from TOML
//! unixaddr-inspect --config backends.toml --json
//!
//! # With verbose logging
//! RUST_LOG=debug unixaddr-inspect /tmp/x.sock
//! ```

mod config;

use std::net::IpAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};

use unixaddr_core::{is_domain_socket_ip, DomainSocketAddress, Endpoint};

use crate::config::load_config_from_path;

/// Inspect derived addresses of Unix domain socket paths
#[derive(Debug, Parser)]
#[command(name = "unixaddr-inspect", version, about)]
struct Args {
    /// Socket paths (or authorities with --authority)
    inputs: Vec<String>,

    /// Treat inputs as `unix:<path>` authorities
    #[arg(long)]
    authority: bool,

    /// IP addresses to test for reserved-block membership
    #[arg(long = "check", value_name = "IP")]
    checks: Vec<IpAddr>,

    /// Endpoint group TOML file to list
    #[arg(long, env = "UNIXADDR_CONFIG")]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,
}

/// Views of a single socket address
#[derive(Debug, Serialize)]
struct AddressReport {
    path: String,
    authority: String,
    ip: String,
    port: u16,
    reserved: bool,
}

impl From<&DomainSocketAddress> for AddressReport {
    fn from(addr: &DomainSocketAddress) -> Self {
        Self {
            path: addr.to_string(),
            authority: addr.authority().to_string(),
            ip: addr.ip().to_string(),
            port: addr.port(),
            reserved: is_domain_socket_ip(&IpAddr::V6(addr.ip())),
        }
    }
}

/// Reserved-block membership of an arbitrary IP
#[derive(Debug, Serialize)]
struct CheckReport {
    ip: IpAddr,
    reserved: bool,
}

/// One endpoint of a configured group
#[derive(Debug, Serialize)]
struct EndpointReport {
    authority: String,
    port: Option<u16>,
    weight: u32,
    domain_socket: bool,
}

impl From<&Endpoint> for EndpointReport {
    fn from(endpoint: &Endpoint) -> Self {
        Self {
            authority: endpoint.authority(),
            port: endpoint.port(),
            weight: endpoint.weight(),
            domain_socket: endpoint.is_domain_socket(),
        }
    }
}

/// Everything requested on one invocation
#[derive(Debug, Default, Serialize)]
struct Report {
    addresses: Vec<AddressReport>,
    checks: Vec<CheckReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    group: Option<String>,
    endpoints: Vec<EndpointReport>,
    domain_sockets: Vec<AddressReport>,
}

fn parse_input(input: &str, as_authority: bool) -> Result<DomainSocketAddress> {
    let addr = if as_authority {
        DomainSocketAddress::from_authority(input)
    } else {
        DomainSocketAddress::of(input)
    };
    addr.with_context(|| format!("Invalid socket input {:?}", input))
}

fn build_report(args: &Args) -> Result<Report> {
    let mut report = Report::default();

    for input in &args.inputs {
        let addr = parse_input(input, args.authority)?;
        debug!(path = %addr, ip = %addr.ip(), "Derived address");
        report.addresses.push(AddressReport::from(&addr));
    }

    report.checks = args
        .checks
        .iter()
        .map(|ip| CheckReport {
            ip: *ip,
            reserved: is_domain_socket_ip(ip),
        })
        .collect();

    if let Some(ref path) = args.config {
        let group = load_config_from_path(path)
            .with_context(|| format!("Failed to load endpoint group from {:?}", path))?;
        report.endpoints = group.endpoints.iter().map(EndpointReport::from).collect();
        report.domain_sockets = group
            .domain_socket_addresses()
            .iter()
            .map(AddressReport::from)
            .collect();
        report.group = Some(group.name);
    }

    Ok(report)
}

fn print_text(report: &Report) {
    for a in &report.addresses {
        println!("{}", a.path);
        println!("  authority: {}", a.authority);
        println!("  address:   [{}]:{}", a.ip, a.port);
        println!("  reserved:  {}", a.reserved);
    }
    for c in &report.checks {
        println!("{} reserved={}", c.ip, c.reserved);
    }
    if let Some(ref name) = report.group {
        println!("group {}", name);
        for e in &report.endpoints {
            let kind = if e.domain_socket { "unix" } else { "inet" };
            println!("  {} {} weight={}", kind, e.authority, e.weight);
        }
        for a in &report.domain_sockets {
            println!("  {} -> [{}]:{}", a.authority, a.ip, a.port);
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("unixaddr_inspect=info".parse()?)
                .add_directive("unixaddr_core=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let args = Args::parse();
    if args.inputs.is_empty() && args.checks.is_empty() && args.config.is_none() {
        anyhow::bail!("Nothing to inspect: pass socket paths, --check or --config");
    }

    let report = build_report(&args)?;
    info!(
        addresses = report.addresses.len(),
        checks = report.checks.len(),
        endpoints = report.endpoints.len(),
        "Inspection complete"
    );

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to encode report")?
        );
    } else {
        print_text(&report);
    }

    Ok(())
}
