// # Section Markers
//
// The managed section of a generated file is enclosed between a header
// marker and a footer marker. Both are multi-line comment blocks: every
// line of the marker text is prefixed with the format's comment leader.
//
// ```text
// <header source, verbatim>
//
// ; This section will be automatically generated by SLAM any manual change will
// ; be overwritten on the next generation of this file.
// <managed content>
// ; END of section automatically generated by SLAM
// <footer source, verbatim>
// ```
//
// The marker text is the only on-disk contract other tools may rely on to
// find the managed region, so it must never change between releases.

use crate::error::{Error, Result};

/// Default header marker text, one entry per line
pub const DEFAULT_HEADER: &str = concat!(
    " This section will be automatically generated by SLAM any manual change will\n",
    " be overwritten on the next generation of this file.\n",
);

/// Default footer marker text
pub const DEFAULT_FOOTER: &str = " END of section automatically generated by SLAM\n";

/// Header and footer marker texts, without comment leaders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
    header: String,
    footer: String,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            header: DEFAULT_HEADER.to_string(),
            footer: DEFAULT_FOOTER.to_string(),
        }
    }
}

/// Byte offsets of a located managed section
///
/// `text[header_start..content_start]` is the header marker,
/// `text[content_start..content_end]` the managed content and
/// `text[content_end..footer_end]` the footer marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    /// Start of the header marker
    pub header_start: usize,
    /// First byte after the header marker
    pub content_start: usize,
    /// Start of the footer marker
    pub content_end: usize,
    /// First byte after the footer marker
    pub footer_end: usize,
}

impl Markers {
    /// Create markers from custom texts
    ///
    /// A missing trailing newline is added to each text.
    pub fn new(header: impl Into<String>, footer: impl Into<String>) -> Result<Self> {
        let mut header = header.into();
        let mut footer = footer.into();

        if header.trim().is_empty() || footer.trim().is_empty() {
            return Err(Error::config("Section markers cannot be empty"));
        }
        if header == footer {
            return Err(Error::config("Header and footer markers must differ"));
        }

        for text in [&mut header, &mut footer] {
            if !text.ends_with('\n') {
                text.push('\n');
            }
        }

        Ok(Self { header, footer })
    }

    /// Header marker block with every line prefixed by `leader`
    pub fn header_block(&self, leader: char) -> String {
        prefix_lines(&self.header, leader)
    }

    /// Footer marker block with every line prefixed by `leader`
    pub fn footer_block(&self, leader: char) -> String {
        prefix_lines(&self.footer, leader)
    }

    /// Locate the managed section inside `text`
    ///
    /// Markers count only where they start a line. Bytes outside the markers
    /// need not be UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Structure`] unless the header and footer markers each
    /// occur exactly once, header first.
    pub fn locate(&self, text: impl AsRef<[u8]>, leader: char) -> Result<Section> {
        let text = text.as_ref();
        let header = self.header_block(leader);
        let footer = self.footer_block(leader);

        let header_start = find_once(text, header.as_bytes(), "header")?;
        let footer_start = find_once(text, footer.as_bytes(), "footer")?;

        let content_start = header_start + header.len();
        if footer_start < content_start {
            return Err(Error::structure(
                "footer marker appears before the end of the header marker",
            ));
        }

        Ok(Section {
            header_start,
            content_start,
            content_end: footer_start,
            footer_end: footer_start + footer.len(),
        })
    }

    /// Line-level view used to skip managed sections while scanning files
    pub(crate) fn line_bounds(&self, leader: char) -> (String, String) {
        let first = self.header.lines().next().unwrap_or_default();
        let last = self.footer.lines().last().unwrap_or_default();
        (format!("{leader}{first}"), format!("{leader}{last}"))
    }
}

fn prefix_lines(text: &str, leader: char) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for line in text.split_inclusive('\n') {
        out.push(leader);
        out.push_str(line);
    }
    out
}

fn find_once(text: &[u8], needle: &[u8], what: &str) -> Result<usize> {
    let mut found = text
        .windows(needle.len())
        .enumerate()
        .filter(|&(i, window)| window == needle && (i == 0 || text[i - 1] == b'\n'))
        .map(|(i, _)| i);

    match (found.next(), found.next()) {
        (Some(i), None) => Ok(i),
        (None, _) => Err(Error::structure(format!("{what} marker not found"))),
        (Some(_), Some(_)) => Err(Error::structure(format!(
            "{what} marker found more than once"
        ))),
    }
}
