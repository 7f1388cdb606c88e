// Quattor template list: `escape("<host>"),"<address>",` per host.

use crate::model::HostRecord;

const ESCAPE_OPEN: &str = "escape(\"";

/// Quattor formatter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuattorFormat;

impl QuattorFormat {
    /// Only the first primary address is listed; secondary addresses are ignored.
    pub(crate) fn render_host(&self, record: &HostRecord, out: &mut String) {
        let addr = record.primary().map(|a| a.addr.as_str()).unwrap_or("");
        out.push_str(&format!("{}{}\"),\"{}\",\n", ESCAPE_OPEN, record.name(), addr));
    }
}

/// Host name inside the leading `escape("...")` of a line
pub(crate) fn name_field(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(ESCAPE_OPEN)?;
    let end = rest.find('"')?;
    Some(&rest[..end]).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Host};

    #[test]
    fn first_primary_address_only() {
        let record = HostRecord::new(
            Host::new("host1"),
            vec![
                Address::new("192.168.50.30").with_mac("01:12:34:56:78:9a"),
                Address::new("192.168.50.31"),
            ],
        )
        .with_aliases(vec![Address::new("10.1.1.1")]);

        let mut out = String::new();
        QuattorFormat.render_host(&record, &mut out);
        assert_eq!(out, "escape(\"host1\"),\"192.168.50.30\",\n");
    }

    #[test]
    fn name_field_extraction() {
        assert_eq!(name_field("escape(\"host2\"),\"1.2.2.2\""), Some("host2"));
        assert_eq!(name_field("  escape(\"test\"),\"1.2.3.4\","), Some("test"));
        assert_eq!(name_field("\"host2\",\"1.2.2.2\""), None);
        assert_eq!(name_field("escape(\"\"),\"1.2.2.2\""), None);
    }
}
