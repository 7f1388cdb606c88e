// # SOA Serial Updater
//
// Text transform on the SOA record of a zone file fragment.
//
// ## Serial Format
//
// `YYYYMMDDnn`: the date the zone was last generated followed by a
// two-digit counter of generations on that day.
//
// - Date portion older (or newer) than today: serial becomes `today01`
// - Date portion equal to today: counter is incremented
// - Counter already at `99` on today's date: error, no 100th serial
//
// ## Record Layout
//
// The serial is the third field after the `SOA` token (`SOA mname rname
// serial`). Both the one-line form and the parenthesized multi-line form
// are understood:
//
// ```text
// @ 1D IN SOA ns. root. 2026101801 3600 900 604800 86400
// @ 1D IN SOA ns. root. (
//         2026101801 ; serial
//         3600 900 604800 86400 )
// ```
//
// Only the serial bytes are replaced; every other byte, whitespace and
// non-UTF-8 text included, is kept as is.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Number of characters in a date-coded serial
const SERIAL_LEN: usize = 10;

/// Date portion length of a serial
const DATE_LEN: usize = 8;

/// Highest counter value usable in one day
const MAX_COUNTER: u8 = 99;

/// Position of the serial relative to the `SOA` token (`SOA mname rname serial`)
const SERIAL_OFFSET: usize = 3;

/// SOA record whose serial has not been reached yet
struct PendingRecord {
    /// Fields left up to and including the serial
    remaining: usize,
    /// Inside a `( ... )` group spanning lines
    open: bool,
}

/// Whether a line starts a SOA record
///
/// Comment lines never do.
pub fn is_soa_line(line: impl AsRef<[u8]>) -> bool {
    let line = line.as_ref();
    record_tokens(line)
        .into_iter()
        .any(|(start, end)| line[start..end].eq_ignore_ascii_case(b"SOA"))
}

/// Refresh the serial of every SOA record in `text` for a generation on `today`
///
/// Text without a SOA record is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::Serial`] when a SOA record ends before its serial, when
/// the serial is not exactly ten digits, or when today's counter is
/// exhausted.
pub fn refresh_serials(text: &[u8], today: NaiveDate) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(text.len());
    let mut copied = 0;
    let mut offset = 0;
    let mut pending: Option<PendingRecord> = None;

    for line in text.split_inclusive(|&b| b == b'\n') {
        let line_start = offset;
        offset += line.len();

        let mut tokens = record_tokens(line).into_iter();
        if pending.is_none() {
            if !tokens
                .by_ref()
                .any(|(start, end)| line[start..end].eq_ignore_ascii_case(b"SOA"))
            {
                continue;
            }
            pending = Some(PendingRecord {
                remaining: SERIAL_OFFSET,
                open: false,
            });
        }

        let Some(record) = pending.as_mut() else {
            continue;
        };

        for (start, end) in tokens {
            match &line[start..end] {
                b"(" => record.open = true,
                b")" => record.open = false,
                token => {
                    record.remaining -= 1;
                    if record.remaining == 0 {
                        let serial = next_serial(&String::from_utf8_lossy(token), today)?;
                        out.extend_from_slice(&text[copied..line_start + start]);
                        out.extend_from_slice(serial.as_bytes());
                        copied = line_start + end;
                        break;
                    }
                }
            }
        }

        let (done, open) = (record.remaining == 0, record.open);
        if done {
            pending = None;
        } else if !open {
            return Err(Error::serial(format!(
                "SOA record has no serial: '{}'",
                String::from_utf8_lossy(line).trim_end()
            )));
        }
    }

    if pending.is_some() {
        return Err(Error::serial("SOA record ends before its serial"));
    }

    out.extend_from_slice(&text[copied..]);
    Ok(out)
}

/// Rewrite the serial of a one-line SOA record for a generation happening on `today`
///
/// # Errors
///
/// Returns [`Error::Serial`] when the line holds no SOA record, when the
/// serial is not exactly ten digits, or when today's counter is exhausted.
pub fn update_soa(line: &str, today: NaiveDate) -> Result<String> {
    if !is_soa_line(line) {
        return Err(Error::serial(format!(
            "no SOA record in line '{}'",
            line.trim_end()
        )));
    }

    let updated = refresh_serials(line.as_bytes(), today)?;
    String::from_utf8(updated).map_err(|e| Error::serial(e.to_string()))
}

/// Compute the serial following `serial` on `today`
///
/// # Errors
///
/// See [`update_soa`].
pub fn next_serial(serial: &str, today: NaiveDate) -> Result<String> {
    if serial.len() != SERIAL_LEN || !serial.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::serial(format!(
            "serial '{}' is not a {}-digit YYYYMMDDnn value",
            serial, SERIAL_LEN
        )));
    }

    let (date, counter) = serial.split_at(DATE_LEN);
    let today_str = today.format("%Y%m%d").to_string();

    if date != today_str {
        // Digit strings of equal length compare like the numbers they hold.
        if date > today_str.as_str() {
            warn!(
                "SOA serial {} is dated after today ({}); resetting moves the serial backwards",
                serial, today_str
            );
        }
        let next = format!("{}01", today_str);
        debug!("SOA serial {} -> {}", serial, next);
        return Ok(next);
    }

    let counter: u8 = counter
        .parse()
        .map_err(|_| Error::serial(format!("serial '{}' has an invalid counter", serial)))?;

    if counter >= MAX_COUNTER {
        return Err(Error::serial(format!(
            "serial '{}' already used counter {} today; no further serial available",
            serial, MAX_COUNTER
        )));
    }

    let next = format!("{}{:02}", today_str, counter + 1);
    debug!("SOA serial {} -> {}", serial, next);
    Ok(next)
}

/// Byte ranges of the record fields of a line
///
/// Fields are separated by ASCII whitespace, parentheses are fields of their
/// own and a `;` starts a comment running to the end of the line.
fn record_tokens(line: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;

    for (i, &b) in line.iter().enumerate() {
        if b.is_ascii_whitespace() || matches!(b, b'(' | b')' | b';') {
            if let Some(s) = start.take() {
                spans.push((s, i));
            }
            match b {
                b'(' | b')' => spans.push((i, i + 1)),
                b';' => return spans,
                _ => {}
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        spans.push((s, line.len()));
    }

    spans
}
