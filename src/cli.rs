//! Command line surface of the `cidr` binary.
//!
//! Flags are parsed into [`Cli`], turned into a [`Config`] and handed to
//! [`run`], which returns the text to print.

use crate::error::CidrError;
use crate::ipv4::parse_network;
use clap::{ArgAction, ArgGroup, Args, Parser, Subcommand};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "cidr", version, about = "Containment and info queries on IPv4 CIDR blocks")]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Test whether a network contains an IP address or a subnet
    Contains(ContainsArgs),
    /// Print network address, netmask, address counts and host range
    Info {
        /// Network in CIDR notation
        #[arg(long)]
        network: String,
    },
    /// Tell whether an IP address is the network's network or broadcast address
    Host {
        /// Network in CIDR notation
        #[arg(long)]
        network: String,
        /// IP address to classify
        #[arg(long)]
        ip: String,
    },
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("target").required(true).args(["ip", "subnet"])))]
pub struct ContainsArgs {
    /// Network in CIDR notation
    #[arg(long)]
    pub network: String,
    /// IP address to look up in the network
    #[arg(long)]
    pub ip: Option<String>,
    /// Subnet in CIDR notation to look up in the network
    #[arg(long)]
    pub subnet: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Query {
    ContainsAddress(String),
    ContainsSubnet(String),
    Info,
    Host(String),
}

/// A single query against one network, as the user asked for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub network: String,
    pub query: Query,
}

impl From<Command> for Config {
    fn from(command: Command) -> Self {
        match command {
            Command::Contains(args) => {
                let query = match (args.ip, args.subnet) {
                    (Some(ip), _) => Query::ContainsAddress(ip),
                    (None, Some(subnet)) => Query::ContainsSubnet(subnet),
                    (None, None) => unreachable!("clap requires one of --ip or --subnet"),
                };
                Config {
                    network: args.network,
                    query,
                }
            }
            Command::Info { network } => Config {
                network,
                query: Query::Info,
            },
            Command::Host { network, ip } => Config {
                network,
                query: Query::Host(ip),
            },
        }
    }
}

/// Runs the configured query and renders its result.
pub fn run(config: &Config) -> Result<String, CidrError> {
    let network = parse_network(&config.network)?;
    debug!(%network, query = ?config.query, "running query");
    let out = match &config.query {
        Query::ContainsAddress(ip) => network.contains_address(ip)?.to_string(),
        Query::ContainsSubnet(subnet) => network.contains_subnet(subnet)?.to_string(),
        Query::Info => network.describe().to_string(),
        Query::Host(ip) => network.classify_address(ip)?.to_string(),
    };
    debug!(%out, "query done");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> Config {
        Config::from(Cli::try_parse_from(args).unwrap().command)
    }

    #[test]
    fn contains_flags() {
        assert_eq!(
            Config {
                network: "10.0.0.0/16".to_string(),
                query: Query::ContainsAddress("10.0.0.1".to_string()),
            },
            config(&["cidr", "contains", "--network", "10.0.0.0/16", "--ip", "10.0.0.1"])
        );
        assert_eq!(
            Query::ContainsSubnet("10.0.1.0/24".to_string()),
            config(&["cidr", "contains", "--network", "10.0.0.0/16", "--subnet", "10.0.1.0/24"]).query
        );
    }

    #[test]
    fn contains_needs_exactly_one_target() {
        assert!(Cli::try_parse_from(["cidr", "contains", "--network", "10.0.0.0/16"]).is_err());
        assert!(Cli::try_parse_from([
            "cidr",
            "contains",
            "--network",
            "10.0.0.0/16",
            "--ip",
            "10.0.0.1",
            "--subnet",
            "10.0.0.0/24"
        ])
        .is_err());
        assert!(Cli::try_parse_from(["cidr", "contains", "--ip", "10.0.0.1"]).is_err());
    }

    #[test]
    fn info_and_host_flags() {
        assert_eq!(
            Query::Info,
            config(&["cidr", "info", "--network", "10.0.0.0/16"]).query
        );
        assert_eq!(
            Query::Host("10.0.0.0".to_string()),
            config(&["cidr", "-vv", "host", "--network", "10.0.0.0/16", "--ip", "10.0.0.0"]).query
        );
        assert!(Cli::try_parse_from(["cidr", "info"]).is_err());
        assert!(Cli::try_parse_from(["cidr"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["cidr", "info", "-vvv", "--network", "10.0.0.0/8"]).unwrap();
        assert_eq!(3, cli.verbose);
    }
}
