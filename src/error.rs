use thiserror::Error;

/// Error returned by every query on a [`Network`](crate::ipv4::Network).
///
/// Both variants carry the input that failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CidrError {
    #[error("invalid CIDR notation: '{0}'")]
    InvalidCidr(String),
    #[error("invalid IPv4 address: '{0}'")]
    InvalidAddress(String),
}
