use crate::error::CidrError;
use lazy_static::lazy_static;
use regex::Captures;
use regex::Regex;
use std::fmt::Display;
use std::fmt::Error;
use std::fmt::Formatter;
use std::net::Ipv4Addr;
use std::str::FromStr;

const IPV4_BITS: u8 = 32;

lazy_static! {
    static ref ADDR_RE: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])$"
    )
    .expect("Not possible");
    static ref CIDR_RE: Regex = Regex::new(
        r"^(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.(25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])/(3[0-2]|[12]?[0-9])$"
    )
    .expect("Not possible");
}

fn parse_u32(ind: usize, v: &Captures<'_>) -> Option<u32> {
    v.get(ind).and_then(|r| r.as_str().parse::<u32>().ok())
}

fn captured_addr(v: &Captures<'_>) -> Option<Ipv4Addr> {
    Some(Ipv4Addr::from(
        (parse_u32(1, v)? << 24)
            + (parse_u32(2, v)? << 16)
            + (parse_u32(3, v)? << 8)
            + parse_u32(4, v)?,
    ))
}

/// Parses a bare dotted-decimal IPv4 address.
///
/// Anything carrying a prefix length (`10.0.0.0/24`) is rejected.
pub fn parse_address(s: &str) -> Result<Ipv4Addr, CidrError> {
    ADDR_RE
        .captures(s)
        .as_ref()
        .and_then(captured_addr)
        .ok_or_else(|| CidrError::InvalidAddress(s.to_owned()))
}

/// Parses `a.b.c.d/n` into a [`Network`].
pub fn parse_network(s: &str) -> Result<Network, CidrError> {
    let invalid = || CidrError::InvalidCidr(s.to_owned());
    let v = CIDR_RE.captures(s).ok_or_else(invalid)?;
    let base = captured_addr(&v).ok_or_else(invalid)?;
    let prefix_len = v
        .get(5)
        .and_then(|r| r.as_str().parse::<u8>().ok())
        .ok_or_else(invalid)?;
    Network::new(base, prefix_len)
}

pub fn contains_address(network: &Network, s: &str) -> Result<bool, CidrError> {
    network.contains_address(s)
}

pub fn contains_subnet(network: &Network, s: &str) -> Result<bool, CidrError> {
    network.contains_subnet(s)
}

pub fn classify_address(network: &Network, s: &str) -> Result<HostClass, CidrError> {
    network.classify_address(s)
}

pub fn describe(network: &Network) -> Info {
    network.describe()
}

/// An IPv4 CIDR block.
///
/// The base address is kept exactly as it was written; only the queries
/// apply the mask.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Network {
    base: Ipv4Addr,
    prefix_len: u8,
    mask: u32,
}

impl Network {
    pub fn new(base: Ipv4Addr, prefix_len: u8) -> Result<Self, CidrError> {
        if prefix_len > IPV4_BITS {
            return Err(CidrError::InvalidCidr(format!("{}/{}", base, prefix_len)));
        }
        // A shift by 32 overflows, which is exactly the /0 mask.
        let mask = u32::MAX
            .checked_shl((IPV4_BITS - prefix_len) as u32)
            .unwrap_or(0);
        Ok(Network {
            base,
            prefix_len,
            mask,
        })
    }

    pub fn base_address(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// The mask as four bytes, most significant first.
    pub fn mask(&self) -> [u8; 4] {
        self.mask.to_be_bytes()
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask)
    }

    /// All host bits cleared.
    pub fn network_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) & self.mask)
    }

    /// All host bits set.
    pub fn broadcast_address(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.base) | !self.mask)
    }

    /// RFC 3021 point-to-point links and host routes reserve no network or
    /// broadcast address.
    fn has_no_reserved_addresses(&self) -> bool {
        self.prefix_len >= IPV4_BITS - 1
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        u32::from(ip) & self.mask == u32::from(self.base) & self.mask
    }

    /// A wider block is never contained, whatever its address.
    pub fn contains_network(&self, other: &Network) -> bool {
        if other.prefix_len < self.prefix_len {
            return false;
        }
        self.contains(other.base)
    }

    pub fn contains_address(&self, s: &str) -> Result<bool, CidrError> {
        Ok(self.contains(parse_address(s)?))
    }

    pub fn contains_subnet(&self, s: &str) -> Result<bool, CidrError> {
        Ok(self.contains_network(&parse_network(s)?))
    }

    pub fn classify(&self, ip: Ipv4Addr) -> HostClass {
        let in_range = self.contains(ip);
        if self.has_no_reserved_addresses() {
            return HostClass {
                in_range,
                network_only: false,
                broadcast_only: false,
            };
        }
        HostClass {
            in_range,
            network_only: ip == self.network_address(),
            broadcast_only: ip == self.broadcast_address(),
        }
    }

    pub fn classify_address(&self, s: &str) -> Result<HostClass, CidrError> {
        Ok(self.classify(parse_address(s)?))
    }

    pub fn describe(&self) -> Info {
        let network_address = self.network_address();
        let broadcast_address = self.broadcast_address();
        let (all_addresses, available_host_addresses, first_address, last_address) =
            match self.prefix_len {
                31 => (2, 2, network_address, broadcast_address),
                32 => (1, 1, network_address, network_address),
                p => {
                    let all = 1u64 << (IPV4_BITS - p);
                    (
                        all,
                        all - 2,
                        Ipv4Addr::from(u32::from(network_address) + 1),
                        Ipv4Addr::from(u32::from(broadcast_address) - 1),
                    )
                }
            };
        Info {
            network_address,
            broadcast_address,
            all_addresses,
            available_host_addresses,
            netmask: self.netmask().to_string(),
            first_address,
            last_address,
        }
    }
}

impl FromStr for Network {
    type Err = CidrError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_network(s)
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

/// Where an address sits relative to a network's reserved addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostClass {
    pub in_range: bool,
    pub network_only: bool,
    pub broadcast_only: bool,
}

impl Display for HostClass {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        writeln!(f, "In range: {}", self.in_range)?;
        writeln!(f, "Network address only: {}", self.network_only)?;
        write!(f, "Broadcast address only: {}", self.broadcast_only)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Info {
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub all_addresses: u64,
    pub available_host_addresses: u64,
    pub netmask: String,
    pub first_address: Ipv4Addr,
    pub last_address: Ipv4Addr,
}

impl Display for Info {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        writeln!(f, "Info:")?;
        writeln!(f, "Network address: {}", self.network_address)?;
        writeln!(f, "Broadcast address: {}", self.broadcast_address)?;
        writeln!(f, "Netmask: {}", self.netmask)?;
        writeln!(f, "All addresses: {}", self.all_addresses)?;
        writeln!(f, "Available host addresses: {}", self.available_host_addresses)?;
        writeln!(f, "First address: {}", self.first_address)?;
        write!(f, "Last address: {}", self.last_address)
    }
}
