// # slam-gen-core
//
// Generation and in-place update engine for network service configuration
// files: BIND forward zones, BIND reverse zones, ISC dhcpd host
// declarations and Quattor host lists.
//
// ## Architecture Overview
//
// - **Format**: Renders inventory records as format-specific lines
// - **Markers**: Delimits the managed section and finds it in existing files
// - **SOA updater**: Increments date-coded zone serials
// - **DuplicateChecker**: Finds host names already published in check files
// - **Generator**: Orchestrates fresh generation and in-place updates
//
// ## Design Principles
//
// 1. **Managed sections only**: Text around the markers is never altered,
//    apart from the SOA serial of BIND zones
// 2. **All-or-nothing writes**: Outputs are built in memory and committed
//    atomically; failures leave existing files untouched
// 3. **Duplicates are data**: Conflicts are reported, never fatal
// 4. **No reordering**: Output order is input order
// 5. **Library-First**: The binary only wires configuration to this crate

pub mod checker;
pub mod config;
pub mod error;
pub mod format;
pub mod generator;
pub mod marker;
pub mod model;
pub mod output;
pub mod soa;

// Re-export core types for convenience
pub use checker::{Duplicate, DuplicateChecker};
pub use config::{FormatConfig, GeneratorConfig, OutputTarget};
pub use error::{Error, Result};
pub use format::Format;
pub use generator::Generator;
pub use marker::Markers;
pub use model::{Address, AddressFamily, Host, HostRecord, Pool};
