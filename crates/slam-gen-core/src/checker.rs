// # Duplicate Checker
//
// Scans previously published "check files" for records that already use a
// host name about to be generated.
//
// ## Matching
//
// Each check file is read in the syntax of the format being generated:
// the format picks the identifying field of every line (owner name for
// BIND, PTR target for reverse BIND, `host` name for DHCP, `escape("...")`
// name for Quattor) and compares it to each host name, case-insensitively
// and as a whole field.
//
// Blank lines, comment lines and managed sections written by this
// generator are ignored.
//
// ## Counting
//
// One [`Duplicate`] is reported per (host, check-file line) collision.
// Files are not deduplicated against each other: the same record present
// in two check files is reported twice.
//
// Duplicates are data, not errors. Callers decide what to do with them.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::format::Format;
use crate::marker::Markers;

/// A host name already present in a check file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duplicate {
    /// Host name being generated
    pub host: String,
    /// Check file holding the conflicting record
    pub file: PathBuf,
    /// 1-based line number in the check file
    pub line_number: usize,
    /// Conflicting line, without its line terminator
    pub line: String,
}

/// Duplicate checker bound to one format and marker set
#[derive(Debug, Clone, Copy)]
pub struct DuplicateChecker<'a> {
    format: &'a Format,
    markers: &'a Markers,
}

impl<'a> DuplicateChecker<'a> {
    /// Create a checker for files written in `format`
    pub fn new(format: &'a Format, markers: &'a Markers) -> Self {
        Self { format, markers }
    }

    /// Check every file in turn and concatenate the results
    ///
    /// # Errors
    ///
    /// Fails when a check file cannot be read.
    pub fn check_files<S: AsRef<str>>(
        &self,
        hosts: &[S],
        files: &[PathBuf],
    ) -> Result<Vec<Duplicate>> {
        let mut duplicates = Vec::new();

        for path in files {
            // Identifying fields are ASCII; other bytes need not be UTF-8.
            let bytes = fs::read(path).map_err(|e| Error::file(path, e))?;
            let text = String::from_utf8_lossy(&bytes);
            let found = self.check_text(hosts, path, &text);
            debug!(
                "Check file {}: {} duplicate(s)",
                path.display(),
                found.len()
            );
            duplicates.extend(found);
        }

        for dup in &duplicates {
            warn!(
                "Host {} already defined in {}:{}: {}",
                dup.host,
                dup.file.display(),
                dup.line_number,
                dup.line
            );
        }

        Ok(duplicates)
    }

    /// Check the content of one file
    pub fn check_text<S: AsRef<str>>(&self, hosts: &[S], file: &Path, text: &str) -> Vec<Duplicate> {
        let leader = self.format.comment_leader();
        let (section_start, section_end) = self.markers.line_bounds(leader);

        let mut duplicates = Vec::new();
        let mut in_section = false;

        for (index, line) in text.lines().enumerate() {
            let trimmed = line.trim_end();

            if in_section {
                if trimmed == section_end {
                    in_section = false;
                }
                continue;
            }
            if trimmed == section_start {
                in_section = true;
                continue;
            }

            let content = trimmed.trim_start();
            if content.is_empty() || content.starts_with(leader) {
                continue;
            }

            let Some(key) = self.format.check_key(content) else {
                continue;
            };

            for host in hosts {
                let host = host.as_ref();
                if self.format.key_matches(key, host) {
                    duplicates.push(Duplicate {
                        host: host.to_string(),
                        file: file.to_path_buf(),
                        line_number: index + 1,
                        line: line.to_string(),
                    });
                }
            }
        }

        duplicates
    }
}
