pub mod cli;
pub mod error;
pub mod ipv4;

pub use error::CidrError;
pub use ipv4::{
    classify_address, contains_address, contains_subnet, describe, parse_address, parse_network,
    HostClass, Info, Network,
};
