//! Contract Test: Duplicate Detection
//!
//! Verifies duplicate reporting against check files during generation.
//!
//! Constraints verified:
//! - No check files means no duplicates
//! - Matching is whole-field, never substring
//! - Counts are per (host, check-file line), summed across files
//! - Duplicates never prevent the output from being written
//! - Unreadable check files abort generation

mod common;

use common::*;
use slam_gen_core::{Error, FormatConfig, GeneratorConfig, OutputTarget};
use std::fs;
use tempfile::tempdir;

const BIND_CHECK_MATCHING: &str = "host1\t1d\tin\ta\taddr\n\
                                   host1\t1d\tin\ta\trdda\n\
                                   host2\t1d\tin\taaaa\taddr2\n";

const BIND_CHECK_NEAR_MISSES: &str = "host142\t1d\tin\ta\taddr\n\
                                      42host1\t1d\tin\ta\trdda\n\
                                      host\t1d\tin\taaaa\taddr2\n";

#[test]
fn bind_check_files() {
    let dir = tempdir().unwrap();
    let matching = write_file(dir.path(), "check1", BIND_CHECK_MATCHING);
    let near_misses = write_file(dir.path(), "check2", BIND_CHECK_NEAR_MISSES);

    let run = |config: GeneratorConfig| create_to_string(&generator(config), &bare_records()).1;

    assert_eq!(run(GeneratorConfig::new(FormatConfig::bind())), 0);
    assert_eq!(
        run(GeneratorConfig::new(FormatConfig::bind()).with_checkfile(&near_misses)),
        0
    );
    assert_eq!(
        run(GeneratorConfig::new(FormatConfig::bind()).with_checkfile(&matching)),
        3
    );
    assert_eq!(
        run(GeneratorConfig::new(FormatConfig::bind())
            .with_checkfile(&matching)
            .with_checkfile(&near_misses)),
        3
    );
}

#[test]
fn overlapping_check_files_are_summed() {
    let dir = tempdir().unwrap();
    let first = write_file(dir.path(), "check1", BIND_CHECK_MATCHING);
    let second = write_file(dir.path(), "check2", BIND_CHECK_MATCHING);

    let config = GeneratorConfig::new(FormatConfig::bind())
        .with_checkfile(&first)
        .with_checkfile(&second);
    let (_, dups) = create_to_string(&generator(config), &bare_records());
    assert_eq!(dups, 6);
}

#[test]
fn other_formats_find_one_duplicate() {
    let dir = tempdir().unwrap();
    let cases = [
        (
            FormatConfig::rev_bind(),
            "117.103.168.192.in-addr.arpa. 1D IN PTR test.domain.\n\
             118.103.168.192.in-addr.arpa. 1D IN PTR host1.domain.",
        ),
        (
            FormatConfig::dhcp(),
            "host test { fixed-address test; }\n\
             host host1 { fixed-address host1; }",
        ),
        (
            FormatConfig::Quattor,
            "escape(\"test\"),\"1.2.3.4\"\n\
             escape(\"host2\"),\"1.2.2.2\"",
        ),
    ];

    for (format, content) in cases {
        let path = write_file(dir.path(), format.type_name(), content);

        let (_, dups) = create_to_string(
            &generator(GeneratorConfig::new(format.clone())),
            &bare_records(),
        );
        assert_eq!(dups, 0, "{} without check file", format.type_name());

        let (_, dups) = create_to_string(
            &generator(GeneratorConfig::new(format.clone()).with_checkfile(&path)),
            &bare_records(),
        );
        assert_eq!(dups, 1, "{} with check file", format.type_name());
    }
}

#[test]
fn duplicates_do_not_block_output() {
    let dir = tempdir().unwrap();
    let check = write_file(dir.path(), "check", BIND_CHECK_MATCHING);
    let path = dir.path().join("db.example");

    let config = GeneratorConfig::new(FormatConfig::bind())
        .with_output(OutputTarget::File(path.clone()))
        .with_checkfile(&check);
    let dups = generator(config).createconf(&bind_records()).unwrap();

    assert_eq!(dups.len(), 3);
    assert_eq!(dups[0].file, check);
    assert_eq!(dups[0].line_number, 1);
    assert!(fs::read_to_string(&path).unwrap().contains(&bind_content()));
}

#[test]
fn previous_output_used_as_check_file_is_not_a_duplicate() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("dhcpd.conf");

    let config = GeneratorConfig::new(FormatConfig::dhcp())
        .with_output(OutputTarget::File(path.clone()));
    generator(config).createconf(&dhcp_records()).unwrap();

    let config = GeneratorConfig::new(FormatConfig::dhcp())
        .with_output(OutputTarget::File(path.clone()))
        .with_checkfile(&path);
    let dups = generator(config).updateconf(&dhcp_records()).unwrap();
    assert!(dups.is_empty(), "managed section must be skipped: {dups:?}");
}

#[test]
fn unreadable_check_file_aborts() {
    let dir = tempdir().unwrap();
    let path = write_file(dir.path(), "out.tpl", "previous\n");

    let config = GeneratorConfig::new(FormatConfig::Quattor)
        .with_output(OutputTarget::File(path.clone()))
        .with_checkfile(dir.path().join("missing-check"));

    let err = generator(config).createconf(&dhcp_records()).unwrap_err();
    assert!(matches!(err, Error::Source { .. }), "got {err}");
    assert_eq!(fs::read_to_string(&path).unwrap(), "previous\n");
}
