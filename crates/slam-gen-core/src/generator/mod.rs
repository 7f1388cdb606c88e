//! Configuration generator
//!
//! The [`Generator`] is responsible for:
//! - Rendering inventory records in the configured format
//! - Surrounding them with header/footer sources and section markers
//! - Rewriting only the managed section of an existing output
//! - Keeping the SOA serial of BIND outputs fresh
//! - Reporting host names already published in check files
//!
//! ## Architecture
//!
//! ```text
//!  HostRecords ──────────────┐
//!                            ▼
//!                   ┌──────────────────┐
//!                   │    Generator     │
//!                   └──────────────────┘
//!                            │
//!        ┌───────────────────┼───────────────────┬──────────────────┐
//!        ▼                   ▼                   ▼                  ▼
//! ┌─────────────┐    ┌──────────────┐    ┌──────────────┐   ┌──────────────┐
//! │   Format    │    │   Markers    │    │ SOA updater  │   │   Checker    │
//! │  (render)   │    │  (locate)    │    │  (serial)    │   │ (duplicates) │
//! └─────────────┘    └──────────────┘    └──────────────┘   └──────────────┘
//! ```
//!
//! ## Document Layout
//!
//! Fresh generation writes:
//!
//! 1. Header source, verbatim (SOA serial refreshed for BIND formats)
//! 2. A blank line
//! 3. Header marker
//! 4. Managed content
//! 5. Footer marker
//! 6. Footer source, verbatim
//!
//! In-place update keeps every byte outside the marker pair and replaces
//! only what lies between them.

use std::io::{Read, Write};
use std::path::Path;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::checker::{Duplicate, DuplicateChecker};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::format::Format;
use crate::marker::Markers;
use crate::model::HostRecord;
use crate::output;
use crate::soa;

/// Configuration generator for one output
///
/// ## Lifecycle
///
/// 1. Create with [`Generator::new()`] from a [`GeneratorConfig`]
/// 2. Call [`Generator::createconf()`] or [`Generator::updateconf()`] once
/// 3. Drop
///
/// The generator holds no state between runs.
#[derive(Debug, Clone)]
pub struct Generator {
    config: GeneratorConfig,
    format: Format,
    markers: Markers,
    today: Option<NaiveDate>,
}

impl Generator {
    /// Create a generator from a validated configuration
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let format = Format::from_config(&config.format);

        Ok(Self {
            config,
            format,
            markers: Markers::default(),
            today: None,
        })
    }

    /// Use custom section markers
    pub fn with_markers(mut self, markers: Markers) -> Self {
        self.markers = markers;
        self
    }

    /// Pin the date used for SOA serials instead of the local calendar date
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The configuration this generator was built from
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The selected output format
    pub fn format(&self) -> &Format {
        &self.format
    }

    /// The section markers in use
    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    /// Generate a fresh output and commit it to the configured target
    ///
    /// # Returns
    ///
    /// Host names already present in the configured check files.
    ///
    /// # Errors
    ///
    /// Unreadable header, footer or check files, unrenderable records and
    /// malformed SOA serials abort the run before anything is written.
    pub fn createconf(&self, records: &[HostRecord]) -> Result<Vec<Duplicate>> {
        let duplicates = self.check_duplicates(records)?;
        self.write_fresh(records)?;
        Ok(duplicates)
    }

    /// Generate a fresh output into a writer
    pub fn createconf_to<W: Write>(
        &self,
        records: &[HostRecord],
        out: &mut W,
    ) -> Result<Vec<Duplicate>> {
        let duplicates = self.check_duplicates(records)?;
        let document = self.render_fresh(records)?;

        out.write_all(&document)?;
        out.flush()?;

        Ok(duplicates)
    }

    /// Generate a fresh output and commit it, without scanning check files
    ///
    /// Used once duplicates have already been collected with
    /// [`Generator::check_duplicates()`].
    pub fn write_fresh(&self, records: &[HostRecord]) -> Result<()> {
        let document = self.render_fresh(records)?;

        output::commit(&self.config.outputfile, &document)?;
        info!("Generated {} with {} host(s)", self.config, records.len());

        Ok(())
    }

    /// Rewrite the managed section of the configured output in place
    ///
    /// For file outputs the existing file is read, rewritten in memory and
    /// atomically replaced. For standard output the existing document is
    /// read from standard input.
    ///
    /// # Errors
    ///
    /// Besides the errors of [`Generator::createconf()`], fails with
    /// [`Error::Structure`] when the section markers are not found exactly
    /// once. The existing output is left untouched on every error.
    pub fn updateconf(&self, records: &[HostRecord]) -> Result<Vec<Duplicate>> {
        let duplicates = self.check_duplicates(records)?;
        self.write_update(records)?;
        Ok(duplicates)
    }

    /// Rewrite the managed section of a document read from `input` into `out`
    pub fn updateconf_from<R: Read, W: Write>(
        &self,
        records: &[HostRecord],
        input: &mut R,
        out: &mut W,
    ) -> Result<Vec<Duplicate>> {
        let duplicates = self.check_duplicates(records)?;

        let mut existing = Vec::new();
        input.read_to_end(&mut existing)?;
        let document = self.rewrite(&existing, records)?;

        out.write_all(&document)?;
        out.flush()?;

        Ok(duplicates)
    }

    /// Rewrite the configured output in place, without scanning check files
    pub fn write_update(&self, records: &[HostRecord]) -> Result<()> {
        let existing = output::read_existing(&self.config.outputfile)?;
        let document = self.rewrite(&existing, records)?;

        output::commit(&self.config.outputfile, &document)?;
        info!("Updated {} with {} host(s)", self.config, records.len());

        Ok(())
    }

    /// Scan the configured check files for the host names of `records`
    pub fn check_duplicates(&self, records: &[HostRecord]) -> Result<Vec<Duplicate>> {
        if self.config.checkfile.is_empty() {
            return Ok(Vec::new());
        }

        let hosts: Vec<&str> = records.iter().map(HostRecord::name).collect();
        DuplicateChecker::new(&self.format, &self.markers)
            .check_files(hosts.as_slice(), &self.config.checkfile)
    }

    /// Build a complete fresh document
    ///
    /// Header and footer sources are copied byte for byte, apart from SOA
    /// serials.
    pub fn render_fresh(&self, records: &[HostRecord]) -> Result<Vec<u8>> {
        let leader = self.format.comment_leader();
        let mut document = Vec::new();

        if let Some(header) = &self.config.header {
            let text = read_source(header)?;
            document.extend_from_slice(&self.refresh_soa(&text)?);
        }

        document.push(b'\n');
        document.extend_from_slice(self.markers.header_block(leader).as_bytes());
        document.extend_from_slice(self.format.render(records)?.as_bytes());
        document.extend_from_slice(self.markers.footer_block(leader).as_bytes());

        if let Some(footer) = &self.config.footer {
            document.extend_from_slice(&read_source(footer)?);
        }

        Ok(document)
    }

    /// Replace the managed section of `existing` with freshly rendered records
    ///
    /// Bytes outside the markers are kept as they are, whatever their
    /// encoding, apart from SOA serials before the header marker.
    pub fn rewrite(&self, existing: &[u8], records: &[HostRecord]) -> Result<Vec<u8>> {
        let leader = self.format.comment_leader();
        let section = self.markers.locate(existing, leader)?;
        debug!(
            "Managed section spans bytes {}..{} of {}",
            section.content_start,
            section.content_end,
            existing.len()
        );

        let content = self.format.render(records)?;
        let prefix = self.refresh_soa(&existing[..section.header_start])?;

        let mut document = Vec::with_capacity(existing.len() + content.len());
        document.extend_from_slice(&prefix);
        document.extend_from_slice(&existing[section.header_start..section.content_start]);
        document.extend_from_slice(content.as_bytes());
        document.extend_from_slice(&existing[section.content_end..]);

        Ok(document)
    }

    /// Pass the SOA records of `text` through the serial updater
    fn refresh_soa(&self, text: &[u8]) -> Result<Vec<u8>> {
        if !self.format.has_soa() {
            return Ok(text.to_vec());
        }
        soa::refresh_serials(text, self.today())
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

fn read_source(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|e| Error::file(path, e))
}
