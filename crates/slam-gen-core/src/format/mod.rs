//! Record formatters
//!
//! Each target format turns one [`HostRecord`] into zero or more lines of
//! text, every line terminated by `\n`. The set of formats is closed and
//! chosen from configuration when the generator is built:
//!
//! | Format        | Leader | Line shape                                           |
//! |---------------|--------|------------------------------------------------------|
//! | BIND          | `;`    | `name\tttl\tIN\ttype\taddress`                      |
//! | Reverse BIND  | `;`    | `owner\tttl\tIN\tPTR\tname`                         |
//! | DHCP          | `#`    | `host name { hardware ethernet mac; fixed-address name; }` |
//! | Quattor       | `#`    | `escape("name"),"address",`                         |
//!
//! Besides rendering, every format knows how to pick the identifying field
//! out of a line written in its own syntax; the duplicate checker relies on
//! that to compare check files against the host names of a run.

mod bind;
mod dhcp;
mod quattor;
mod reverse;

pub use bind::BindFormat;
pub use dhcp::DhcpFormat;
pub use quattor::QuattorFormat;
pub use reverse::{ReverseBindFormat, ptr_owner};

use crate::config::FormatConfig;
use crate::error::Result;
use crate::model::HostRecord;

/// A target output format with its options
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Format {
    /// BIND forward zone records
    Bind(BindFormat),
    /// BIND reverse zone records
    ReverseBind(ReverseBindFormat),
    /// ISC dhcpd host declarations
    Dhcp(DhcpFormat),
    /// Quattor host/address list
    Quattor(QuattorFormat),
}

impl Format {
    /// Build the format selected by a configuration
    pub fn from_config(config: &FormatConfig) -> Self {
        match config {
            FormatConfig::Bind { timeout } => Format::Bind(BindFormat::new(timeout.clone())),
            FormatConfig::RevBind { timeout } => {
                Format::ReverseBind(ReverseBindFormat::new(timeout.clone()))
            }
            FormatConfig::Dhcp { domain } => Format::Dhcp(DhcpFormat::new(domain.clone())),
            FormatConfig::Quattor => Format::Quattor(QuattorFormat),
        }
    }

    /// Format type name, as used in configuration
    pub fn type_name(&self) -> &'static str {
        match self {
            Format::Bind(_) => "bind",
            Format::ReverseBind(_) => "revbind",
            Format::Dhcp(_) => "dhcp",
            Format::Quattor(_) => "quattor",
        }
    }

    /// Character starting a comment line in this format
    pub fn comment_leader(&self) -> char {
        match self {
            Format::Bind(_) | Format::ReverseBind(_) => ';',
            Format::Dhcp(_) | Format::Quattor(_) => '#',
        }
    }

    /// Whether files of this format carry a SOA record to keep fresh
    pub fn has_soa(&self) -> bool {
        matches!(self, Format::Bind(_) | Format::ReverseBind(_))
    }

    /// Render the managed section content for a sequence of records
    ///
    /// Output order follows `records`, and within a record the order of its
    /// address lists.
    pub fn render(&self, records: &[HostRecord]) -> Result<String> {
        let mut out = String::new();

        if let Format::Dhcp(dhcp) = self {
            dhcp.render_preamble(&mut out);
        }

        for record in records {
            match self {
                Format::Bind(f) => f.render_host(record, &mut out),
                Format::ReverseBind(f) => f.render_host(record, &mut out)?,
                Format::Dhcp(f) => f.render_host(record, &mut out),
                Format::Quattor(f) => f.render_host(record, &mut out),
            }
        }

        Ok(out)
    }

    /// Extract the host identifying field from a line in this format's syntax
    pub fn check_key<'a>(&self, line: &'a str) -> Option<&'a str> {
        match self {
            Format::Bind(_) => bind::owner_field(line),
            Format::ReverseBind(_) => reverse::target_field(line),
            Format::Dhcp(_) => dhcp::host_field(line),
            Format::Quattor(_) => quattor::name_field(line),
        }
    }

    /// Whether an identifying field names the given host
    ///
    /// Comparison is case-insensitive and never matches on a substring.
    pub fn key_matches(&self, key: &str, host: &str) -> bool {
        match self {
            Format::ReverseBind(_) => reverse::target_matches(key, host),
            _ => key.eq_ignore_ascii_case(host),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Host, Pool};

    #[test]
    fn from_config_selects_variant() {
        assert_eq!(Format::from_config(&FormatConfig::bind()).type_name(), "bind");
        assert_eq!(
            Format::from_config(&FormatConfig::rev_bind()).type_name(),
            "revbind"
        );
        assert_eq!(Format::from_config(&FormatConfig::dhcp()).type_name(), "dhcp");
        assert_eq!(
            Format::from_config(&FormatConfig::Quattor).type_name(),
            "quattor"
        );
    }

    #[test]
    fn comment_leaders() {
        assert_eq!(Format::from_config(&FormatConfig::bind()).comment_leader(), ';');
        assert_eq!(
            Format::from_config(&FormatConfig::rev_bind()).comment_leader(),
            ';'
        );
        assert_eq!(Format::from_config(&FormatConfig::dhcp()).comment_leader(), '#');
        assert_eq!(
            Format::from_config(&FormatConfig::Quattor).comment_leader(),
            '#'
        );
    }

    #[test]
    fn render_keeps_input_order() {
        let a = Pool::new().with_dns_record("A");
        let records = vec![
            HostRecord::new(
                Host::new("zeta"),
                vec![Address::new("10.0.0.9").with_pool(a.clone())],
            ),
            HostRecord::new(
                Host::new("alpha"),
                vec![
                    Address::new("10.0.0.2").with_pool(a.clone()),
                    Address::new("10.0.0.1").with_pool(a),
                ],
            ),
        ];

        let out = Format::from_config(&FormatConfig::bind())
            .render(&records)
            .unwrap();
        assert_eq!(
            out,
            "zeta\t1D\tIN\tA\t10.0.0.9\n\
             alpha\t1D\tIN\tA\t10.0.0.2\n\
             alpha\t1D\tIN\tA\t10.0.0.1\n"
        );
    }

    #[test]
    fn hosts_without_addresses() {
        let records = vec![HostRecord::new(Host::new("bare"), Vec::new())];

        for config in [FormatConfig::bind(), FormatConfig::rev_bind()] {
            let out = Format::from_config(&config).render(&records).unwrap();
            assert_eq!(out, "", "{} should skip address-less hosts", config.type_name());
        }

        let out = Format::from_config(&FormatConfig::dhcp())
            .render(&records)
            .unwrap();
        assert_eq!(out, "host bare { fixed-address bare; }\n");

        let out = Format::from_config(&FormatConfig::Quattor)
            .render(&records)
            .unwrap();
        assert_eq!(out, "escape(\"bare\"),\"\",\n");
    }
}
