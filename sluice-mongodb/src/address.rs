//! Cluster address resolution.
//!
//! The pipeline configuration carries the cluster members as a single
//! comma-separated `host[:port]` list. This module parses that list into
//! validated endpoints, skipping tokens it cannot parse (the connector is
//! deliberately permissive here: a bad token is logged and dropped, never
//! fatal).

use std::fmt;

use thiserror::Error;
use tracing::warn;

/// Default MongoDB port, used when a token omits the `:port` suffix.
pub const DEFAULT_PORT: u16 = 27017;

/// One cluster member's network address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Dotted-quad host address.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Parse failure for a single `host[:port]` token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddressParseError {
    /// The host part is not a dotted-quad address.
    #[error("host '{0}' is not a dotted-quad address")]
    InvalidHost(String),

    /// The port part is not a valid port number.
    #[error("port '{0}' is not a valid port number")]
    InvalidPort(String),
}

impl Endpoint {
    /// Parse a single `host[:port]` token.
    ///
    /// The host must be a dotted quad of four fields of 0-3 ASCII digits.
    /// Known limitation carried over from the original connector: the octet
    /// range is not validated, so addresses like `999.0.0.1` are accepted.
    pub fn parse(token: &str) -> Result<Self, AddressParseError> {
        let (host, port) = match token.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (token, None),
        };

        if !is_dotted_quad(host) {
            return Err(AddressParseError::InvalidHost(host.to_string()));
        }

        let port = match port {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| AddressParseError::InvalidPort(raw.to_string()))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Parse a comma-separated `host[:port]` list into endpoints.
///
/// Empty tokens are skipped. Tokens that fail to parse are skipped with a
/// warning rather than failing the whole list. Output order matches input
/// order; duplicates are preserved.
pub fn parse_host_ports(host_ports: &str) -> Vec<Endpoint> {
    let mut endpoints = Vec::new();

    for token in host_ports.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        match Endpoint::parse(token) {
            Ok(endpoint) => endpoints.push(endpoint),
            Err(error) => {
                warn!(token = %token, error = %error, "skipping unparsable host:port token");
            }
        }
    }

    endpoints
}

/// Four dot-separated fields of 0-3 ASCII digits each.
///
/// Field values are intentionally not range-checked; see [`Endpoint::parse`].
fn is_dotted_quad(host: &str) -> bool {
    let mut fields = 0usize;

    for field in host.split('.') {
        fields += 1;
        if fields > 4 || field.len() > 3 || !field.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
    }

    fields == 4
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn endpoint(host: &str, port: u16) -> Endpoint {
        Endpoint {
            host: host.to_string(),
            port,
        }
    }

    #[test]
    fn test_parse_host_with_port() {
        assert_eq!(
            Endpoint::parse("10.0.0.1:27018"),
            Ok(endpoint("10.0.0.1", 27018))
        );
    }

    #[test]
    fn test_parse_host_without_port_defaults() {
        assert_eq!(
            Endpoint::parse("10.0.0.2"),
            Ok(endpoint("10.0.0.2", DEFAULT_PORT))
        );
    }

    #[test]
    fn test_parse_rejects_hostname() {
        assert_eq!(
            Endpoint::parse("not-an-ip"),
            Err(AddressParseError::InvalidHost("not-an-ip".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_bad_port() {
        assert_eq!(
            Endpoint::parse("10.0.0.1:abc"),
            Err(AddressParseError::InvalidPort("abc".to_string()))
        );
        assert_eq!(
            Endpoint::parse("10.0.0.1:99999"),
            Err(AddressParseError::InvalidPort("99999".to_string()))
        );
    }

    #[test]
    fn test_parse_accepts_out_of_range_octet() {
        // Octet range is deliberately unchecked.
        assert_eq!(Endpoint::parse("999.0.0.1"), Ok(endpoint("999.0.0.1", DEFAULT_PORT)));
    }

    #[test]
    fn test_parse_accepts_empty_octet_field() {
        // A field may hold zero digits, another quirk of the original pattern.
        assert_eq!(Endpoint::parse("10..0.1"), Ok(endpoint("10..0.1", DEFAULT_PORT)));
    }

    #[test]
    fn test_parse_rejects_wrong_field_count() {
        assert!(Endpoint::parse("10.0.1").is_err());
        assert!(Endpoint::parse("10.0.0.0.1").is_err());
    }

    #[test]
    fn test_host_ports_list() {
        let endpoints = parse_host_ports("10.0.0.1:27018, 10.0.0.2,  ");
        assert_eq!(
            endpoints,
            vec![endpoint("10.0.0.1", 27018), endpoint("10.0.0.2", DEFAULT_PORT)]
        );
    }

    #[test]
    fn test_host_ports_unparsable_tokens_dropped() {
        assert_eq!(parse_host_ports("not-an-ip"), vec![]);
        assert_eq!(
            parse_host_ports("bad-host, 10.0.0.1"),
            vec![endpoint("10.0.0.1", DEFAULT_PORT)]
        );
    }

    #[test]
    fn test_host_ports_keeps_order_and_duplicates() {
        let endpoints = parse_host_ports("10.0.0.2,10.0.0.1,10.0.0.2");
        assert_eq!(
            endpoints,
            vec![
                endpoint("10.0.0.2", DEFAULT_PORT),
                endpoint("10.0.0.1", DEFAULT_PORT),
                endpoint("10.0.0.2", DEFAULT_PORT),
            ]
        );
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(endpoint("10.0.0.1", 27017).to_string(), "10.0.0.1:27017");
    }
}
