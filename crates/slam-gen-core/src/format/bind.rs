// BIND forward records: one RR line per address that has a record type.

use crate::model::{Address, HostRecord};

/// BIND forward zone formatter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindFormat {
    ttl: String,
}

impl BindFormat {
    /// Create a formatter writing the given TTL
    pub fn new(ttl: impl Into<String>) -> Self {
        Self { ttl: ttl.into() }
    }

    /// TTL written in every record
    pub fn ttl(&self) -> &str {
        &self.ttl
    }

    pub(crate) fn render_host(&self, record: &HostRecord, out: &mut String) {
        for addr in record.addresses.iter().chain(record.aliases.iter()) {
            self.render_address(record.name(), addr, out);
        }
    }

    fn render_address(&self, name: &str, addr: &Address, out: &mut String) {
        // Addresses without a usable record type have no forward record.
        let Some(rtype) = addr.pool.as_ref().and_then(|p| p.record_type()) else {
            return;
        };

        out.push_str(&format!(
            "{}\t{}\tIN\t{}\t{}\n",
            name, self.ttl, rtype, addr.addr
        ));
    }
}

/// Owner name of a zone file record line
pub(crate) fn owner_field(line: &str) -> Option<&str> {
    line.split_whitespace().next()
}
