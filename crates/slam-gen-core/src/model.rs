// # Inventory Model
//
// Plain data handed to the generator by the inventory layer.
//
// The generator never queries the inventory itself: callers resolve hosts,
// addresses and pools beforehand and pass a sequence of [`HostRecord`]s.
// Output order follows that sequence exactly; nothing here sorts.
//
// ## JSON Shape
//
// ```json
// [
//   {
//     "host": { "name": "host1" },
//     "addresses": [
//       { "addr": "192.168.50.30", "macaddr": "01:12:34:56:78:9a",
//         "pool": { "addr_range_type": "ip4", "dns_record": "A" } }
//     ],
//     "aliases": []
//   }
// ]
// ```

use serde::{Deserialize, Serialize};

/// A named machine in the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    /// Host name, used as the record key in rendered output
    pub name: String,
}

impl Host {
    /// Create a host with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Address family of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// IPv4 addresses
    Ip4,
    /// IPv6 addresses
    Ip6,
}

/// Classification metadata for an address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    /// Address family tag (`ip4` or `ip6`)
    #[serde(default)]
    pub addr_range_type: Option<AddressFamily>,

    /// DNS record type used for forward records (e.g. `A`, `AAAA`)
    #[serde(default)]
    pub dns_record: Option<String>,
}

impl Pool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the address family
    pub fn with_family(mut self, family: AddressFamily) -> Self {
        self.addr_range_type = Some(family);
        self
    }

    /// Set the DNS record type
    pub fn with_dns_record(mut self, record: impl Into<String>) -> Self {
        self.dns_record = Some(record.into());
        self
    }

    /// DNS record type, if one is set and non-empty
    pub fn record_type(&self) -> Option<&str> {
        self.dns_record.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// A network address allocated to a host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Address text as stored in the inventory
    pub addr: String,

    /// Hardware (MAC) address, if known
    #[serde(default)]
    pub macaddr: Option<String>,

    /// Pool the address was allocated from
    #[serde(default)]
    pub pool: Option<Pool>,
}

impl Address {
    /// Create an address without pool or MAC
    pub fn new(addr: impl Into<String>) -> Self {
        Self {
            addr: addr.into(),
            macaddr: None,
            pool: None,
        }
    }

    /// Attach a MAC address
    pub fn with_mac(mut self, mac: impl Into<String>) -> Self {
        self.macaddr = Some(mac.into());
        self
    }

    /// Attach a pool
    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// MAC address, if one is set and non-empty
    pub fn mac(&self) -> Option<&str> {
        self.macaddr.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// One generation input tuple: a host with its primary and secondary addresses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRecord {
    /// The host
    pub host: Host,

    /// Addresses used for forward (A/AAAA) records
    #[serde(default)]
    pub addresses: Vec<Address>,

    /// Addresses used for secondary/alias records
    #[serde(default)]
    pub aliases: Vec<Address>,
}

impl HostRecord {
    /// Create a record from a host and its primary addresses
    pub fn new(host: Host, addresses: Vec<Address>) -> Self {
        Self {
            host,
            addresses,
            aliases: Vec::new(),
        }
    }

    /// Set the secondary address list
    pub fn with_aliases(mut self, aliases: Vec<Address>) -> Self {
        self.aliases = aliases;
        self
    }

    /// First primary address, if any
    pub fn primary(&self) -> Option<&Address> {
        self.addresses.first()
    }

    /// Host name shortcut
    pub fn name(&self) -> &str {
        &self.host.name
    }
}
