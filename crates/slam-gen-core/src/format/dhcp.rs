// ISC dhcpd host declarations, one per host.

use crate::model::HostRecord;

/// DHCP host declaration formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DhcpFormat {
    domain: Option<String>,
}

impl DhcpFormat {
    /// Create a formatter, optionally emitting a domain-name option
    pub fn new(domain: Option<String>) -> Self {
        Self { domain }
    }

    /// Domain emitted as `option domain-name`
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub(crate) fn render_preamble(&self, out: &mut String) {
        if let Some(domain) = &self.domain {
            out.push_str(&format!("option domain-name \"{}\";\n", domain));
        }
    }

    pub(crate) fn render_host(&self, record: &HostRecord, out: &mut String) {
        let name = record.name();
        out.push_str(&format!("host {} {{ ", name));
        if let Some(mac) = record.primary().and_then(|a| a.mac()) {
            out.push_str(&format!("hardware ethernet {}; ", mac));
        }
        out.push_str(&format!("fixed-address {}; }}\n", name));
    }
}

/// Host name of a `host <name> { ... }` declaration
pub(crate) fn host_field(line: &str) -> Option<&str> {
    let mut fields = line.split_whitespace();
    if fields.next() != Some("host") {
        return None;
    }
    fields
        .next()
        .map(|name| name.trim_end_matches('{'))
        .filter(|name| !name.is_empty())
}
