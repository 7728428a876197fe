//! Performance data parser
//!
//! Format: whitespace separated entries of `name=value[unit][;warn[;crit[;min[;max]]]]`
//!
//! Example: rta=0.052ms;100.000;500.000;0; pl=0%;20;60;; uptime=86400s
//!
//! Only the metric name and the leading numeric literal of each entry are
//! extracted. Units and threshold fields are ignored. A malformed entry is
//! skipped without affecting its siblings.

use crate::error::{PerfdataError, Result};
use crate::types::{PerfdataEntry, PerfdataSample};
use std::str::SplitWhitespace;
use tracing::trace;

/// Parse a single whitespace-free entry
///
/// The name is everything before the first `=` and is used verbatim, even
/// when empty.
pub fn parse_entry(token: &str) -> Result<PerfdataEntry<'_>> {
    let (name, rest) = token
        .split_once('=')
        .ok_or_else(|| PerfdataError::MissingEquals(token.to_string()))?;

    let value = split_value(rest).ok_or_else(|| PerfdataError::InvalidValue(token.to_string()))?;

    Ok(PerfdataEntry::new(name, value))
}

/// Extract the leading numeric literal of a value field
///
/// Accepts an optional sign, integer digits and an optional fractional part.
/// At least one digit must be present. Anything after the literal (unit,
/// `;`-separated thresholds) is ignored. Exponents are not recognised.
pub fn split_value(text: &str) -> Option<f64> {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }

    if digits == 0 {
        return None;
    }

    // Every byte up to `end` is ASCII, so this is a char boundary
    let value: f64 = text[..end].parse().ok()?;
    value.is_finite().then_some(value)
}

/// Tolerant parser over one performance data text
#[derive(Debug, Clone, Copy)]
pub struct PerfdataParser<'a> {
    text: &'a str,
}

impl<'a> PerfdataParser<'a> {
    /// Create a parser over `text`
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Parse every entry, keeping the rejection reason for malformed ones
    pub fn entries(&self) -> impl Iterator<Item = Result<PerfdataEntry<'a>>> + 'a {
        self.text.split_whitespace().map(parse_entry)
    }

    /// Iterate over valid entries only, skipping malformed ones
    pub fn samples(&self) -> Samples<'a> {
        Samples {
            tokens: self.text.split_whitespace(),
            rejected: 0,
        }
    }

    /// Parse into owned samples and collect the errors separately
    pub fn parse_lossy(&self) -> (Vec<PerfdataSample>, Vec<PerfdataError>) {
        let mut samples = Vec::new();
        let mut errors = Vec::new();

        for entry in self.entries() {
            match entry {
                Ok(entry) => samples.push(entry.to_sample()),
                Err(e) => errors.push(e),
            }
        }

        (samples, errors)
    }
}

/// Iterator over the valid entries of a performance data text
#[derive(Debug, Clone)]
pub struct Samples<'a> {
    tokens: SplitWhitespace<'a>,
    rejected: usize,
}

impl<'a> Samples<'a> {
    /// Number of malformed entries skipped so far
    pub fn rejected(&self) -> usize {
        self.rejected
    }
}

impl<'a> Iterator for Samples<'a> {
    type Item = PerfdataEntry<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let token = self.tokens.next()?;
            match parse_entry(token) {
                Ok(entry) => return Some(entry),
                Err(e) => {
                    self.rejected += 1;
                    trace!(error = %e, "Skipping malformed perfdata entry");
                }
            }
        }
    }
}
