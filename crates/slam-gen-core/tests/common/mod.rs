//! Shared fixtures for generator contract tests
//!
//! Inventory builders, marker shortcuts and a pinned "today" so that SOA
//! serial expectations never depend on the clock.

#![allow(dead_code)]

use chrono::NaiveDate;
use slam_gen_core::{
    Address, AddressFamily, FormatConfig, Generator, GeneratorConfig, Host, HostRecord, Markers,
    OutputTarget, Pool,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Header marker text without comment leader, line by line
pub const SLAM_HDR1: &str =
    " This section will be automatically generated by SLAM any manual change will\n";
pub const SLAM_HDR2: &str = " be overwritten on the next generation of this file.\n";
pub const SLAM_FTR: &str = " END of section automatically generated by SLAM\n";

/// Fixed generation date
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

/// `today()` formatted as the date portion of a SOA serial
pub fn today_str() -> String {
    today().format("%Y%m%d").to_string()
}

/// Header marker block for a comment leader
pub fn header_marker(leader: char) -> String {
    format!("{leader}{SLAM_HDR1}{leader}{SLAM_HDR2}")
}

/// Footer marker block for a comment leader
pub fn footer_marker(leader: char) -> String {
    format!("{leader}{SLAM_FTR}")
}

/// Build a generator pinned to `today()`
pub fn generator(config: GeneratorConfig) -> Generator {
    Generator::new(config)
        .expect("valid generator config")
        .with_today(today())
        .with_markers(Markers::default())
}

/// Run a fresh generation into memory
pub fn create_to_string(generator: &Generator, records: &[HostRecord]) -> (String, usize) {
    let mut out = Vec::new();
    let dups = generator
        .createconf_to(records, &mut out)
        .expect("createconf succeeds");
    (String::from_utf8(out).expect("utf-8 output"), dups.len())
}

/// Write `content` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write fixture");
    path
}

/// File output target inside a directory
pub fn file_target(dir: &Path, name: &str) -> OutputTarget {
    OutputTarget::File(dir.join(name))
}

pub fn a_pool() -> Pool {
    Pool::new().with_dns_record("A")
}

pub fn aaaa_pool() -> Pool {
    Pool::new().with_dns_record("AAAA")
}

/// host1 with two A addresses, host2 with one AAAA address
pub fn bind_records() -> Vec<HostRecord> {
    vec![
        HostRecord::new(
            Host::new("host1"),
            vec![
                Address::new("addr").with_pool(a_pool()),
                Address::new("rdda").with_pool(a_pool()),
            ],
        ),
        HostRecord::new(
            Host::new("host2"),
            vec![Address::new("addr2").with_pool(aaaa_pool())],
        ),
    ]
}

/// The managed content `bind_records()` renders to with TTL 1D
pub fn bind_content() -> String {
    "host1\t1D\tIN\tA\taddr\n\
     host1\t1D\tIN\tA\trdda\n\
     host2\t1D\tIN\tAAAA\taddr2\n"
        .to_string()
}

/// host1 with an IPv4 address, host2 with an IPv6 address
pub fn reverse_records() -> Vec<HostRecord> {
    vec![
        HostRecord::new(
            Host::new("host1"),
            vec![Address::new("192.168.50.30").with_pool(
                Pool::new()
                    .with_family(AddressFamily::Ip4)
                    .with_dns_record("A"),
            )],
        ),
        HostRecord::new(
            Host::new("host2"),
            vec![Address::new("fe80:1234:5678:9abc:def0:1234:5678:9abc").with_pool(
                Pool::new()
                    .with_family(AddressFamily::Ip6)
                    .with_dns_record("AAAA"),
            )],
        ),
    ]
}

/// host1 with a MAC address, host2 without
pub fn dhcp_records() -> Vec<HostRecord> {
    vec![
        HostRecord::new(
            Host::new("host1"),
            vec![Address::new("192.168.50.30").with_mac("01:12:34:56:78:9a")],
        ),
        HostRecord::new(Host::new("host2"), vec![Address::new("192.168.42.137")]),
    ]
}

/// host1 and host2 without any address
pub fn bare_records() -> Vec<HostRecord> {
    vec![
        HostRecord::new(Host::new("host1"), Vec::new()),
        HostRecord::new(Host::new("host2"), Vec::new()),
    ]
}

/// Every supported format with default options
pub fn all_formats() -> Vec<FormatConfig> {
    vec![
        FormatConfig::bind(),
        FormatConfig::rev_bind(),
        FormatConfig::dhcp(),
        FormatConfig::Quattor,
    ]
}
