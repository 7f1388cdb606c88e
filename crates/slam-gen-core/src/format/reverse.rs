// # Reverse BIND Records
//
// PTR records mapping addresses back to host names.
//
// Owner names are built from the address:
// - IPv4: octets reversed, `.in-addr.arpa.` appended
// - IPv6: fully expanded to 32 nibbles, nibbles reversed and dot-separated,
//   `.ip6.arpa.` appended

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

use crate::error::{Error, Result};
use crate::model::{Address, AddressFamily, HostRecord};

/// BIND reverse zone formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReverseBindFormat {
    timeout: String,
}

impl ReverseBindFormat {
    /// Create a formatter writing the given TTL
    pub fn new(timeout: impl Into<String>) -> Self {
        Self {
            timeout: timeout.into(),
        }
    }

    /// TTL written in every record
    pub fn timeout(&self) -> &str {
        &self.timeout
    }

    /// Only primary addresses own a PTR record; aliases never point back.
    pub(crate) fn render_host(&self, record: &HostRecord, out: &mut String) -> Result<()> {
        for addr in &record.addresses {
            let owner = ptr_owner(&addr.addr, address_family(addr))?;
            out.push_str(&format!(
                "{}\t{}\tIN\tPTR\t{}\n",
                owner,
                self.timeout,
                record.name()
            ));
        }
        Ok(())
    }
}

fn address_family(addr: &Address) -> Option<AddressFamily> {
    addr.pool.as_ref().and_then(|p| p.addr_range_type)
}

/// Compute the PTR owner name of an address
///
/// When `family` is `None` the family is inferred from the address text.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] when the address does not parse as the
/// requested (or any) family.
pub fn ptr_owner(addr: &str, family: Option<AddressFamily>) -> Result<String> {
    let addr = addr.trim();
    let ip = match family {
        Some(AddressFamily::Ip4) => addr.parse::<Ipv4Addr>().map(IpAddr::V4).ok(),
        Some(AddressFamily::Ip6) => addr.parse::<Ipv6Addr>().map(IpAddr::V6).ok(),
        None => addr.parse::<IpAddr>().ok(),
    };

    let ip = ip.ok_or_else(|| {
        Error::invalid_input(format!(
            "cannot build reverse name for '{}' ({})",
            addr,
            match family {
                Some(AddressFamily::Ip4) => "ip4",
                Some(AddressFamily::Ip6) => "ip6",
                None => "unknown family",
            }
        ))
    })?;

    Ok(match ip {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa.", o[3], o[2], o[1], o[0])
        }
        IpAddr::V6(v6) => {
            let mut nibbles = Vec::with_capacity(32);
            for byte in v6.octets().iter().rev() {
                nibbles.push(format!("{:x}", byte & 0x0f));
                nibbles.push(format!("{:x}", (byte >> 4) & 0x0f));
            }
            format!("{}.ip6.arpa.", nibbles.join("."))
        }
    })
}

/// PTR target of a reverse zone record line
pub(crate) fn target_field(line: &str) -> Option<&str> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 2 {
        return None;
    }
    fields.last().copied()
}

/// A PTR target names a host when it equals the host name or when the
/// host name is its leading label (`host1.domain.` for `host1`).
pub(crate) fn target_matches(target: &str, host: &str) -> bool {
    let target = target.strip_suffix('.').unwrap_or(target);
    let host = host.strip_suffix('.').unwrap_or(host);
    if host.is_empty() {
        return false;
    }

    match (target.get(..host.len()), target.get(host.len()..)) {
        (Some(head), Some(rest)) => {
            head.eq_ignore_ascii_case(host) && (rest.is_empty() || rest.starts_with('.'))
        }
        _ => false,
    }
}
