//! # Module Patterns
//!
//! A [`BitPattern`] is the output of every encoder: one entry per module,
//! `true` for a bar and `false` for a space. Patterns print and parse as
//! `0`/`1` strings, which is also how they serialize.
//!
//! ```
//! use cardcode::symbol::BitPattern;
//!
//! let bits: BitPattern = "101".parse().unwrap();
//! assert_eq!(bits.len(), 3);
//! assert_eq!(bits.padded(5).to_string(), "10100");
//! assert_eq!(bits.groups(5), vec![0b10100]);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CardcodeError;

/// An ordered, immutable sequence of bar/space modules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct BitPattern {
    modules: Vec<bool>,
}

/// A maximal run of same-polarity modules (one printed bar or space).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub bar: bool,
    pub start: usize,
    pub len: usize,
}

impl BitPattern {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            modules: Vec::with_capacity(capacity),
        }
    }

    /// Number of modules.
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in order, `true` = bar.
    pub fn as_slice(&self) -> &[bool] {
        &self.modules
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.modules.iter().copied()
    }

    /// Copy padded on the right with spaces to a multiple of `group`.
    ///
    /// Never truncates; an already aligned pattern is returned unchanged.
    pub fn padded(&self, group: usize) -> BitPattern {
        let mut modules = self.modules.clone();
        let rem = modules.len() % group;
        if rem > 0 {
            modules.resize(modules.len() + group - rem, false);
        }
        BitPattern { modules }
    }

    /// Pad to a multiple of `group` and read each group as an unsigned
    /// integer, first module most significant.
    pub fn groups(&self, group: usize) -> Vec<u8> {
        debug_assert!(group > 0 && group <= 8);
        self.padded(group)
            .modules
            .chunks(group)
            .map(|chunk| chunk.iter().fold(0u8, |acc, &m| (acc << 1) | m as u8))
            .collect()
    }

    /// Maximal bar/space runs, left to right.
    pub fn runs(&self) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();
        for (i, &bar) in self.modules.iter().enumerate() {
            match runs.last_mut() {
                Some(run) if run.bar == bar => run.len += 1,
                _ => runs.push(Run {
                    bar,
                    start: i,
                    len: 1,
                }),
            }
        }
        runs
    }

    /// Append the low `width` bits of `code`, most significant first.
    pub(crate) fn push_code(&mut self, code: u16, width: u8) {
        for shift in (0..width).rev() {
            self.modules.push((code >> shift) & 1 == 1);
        }
    }

    /// Append element widths, alternating bar/space and starting with a bar.
    pub(crate) fn push_widths(&mut self, widths: &[u8]) {
        let mut bar = true;
        for &width in widths {
            self.modules
                .extend(std::iter::repeat_n(bar, usize::from(width)));
            bar = !bar;
        }
    }

    pub(crate) fn push_spaces(&mut self, count: usize) {
        self.modules.extend(std::iter::repeat_n(false, count));
    }
}

/// Expand element widths into modules (bar first, then alternating).
pub fn widths_to_bits(widths: &[u8]) -> BitPattern {
    let total = widths.iter().map(|&w| usize::from(w)).sum();
    let mut bits = BitPattern::with_capacity(total);
    bits.push_widths(widths);
    bits
}

impl From<Vec<bool>> for BitPattern {
    fn from(modules: Vec<bool>) -> Self {
        Self { modules }
    }
}

impl FromIterator<bool> for BitPattern {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            modules: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for BitPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &m in &self.modules {
            f.write_str(if m { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl FromStr for BitPattern {
    type Err = CardcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| match c {
                '1' => Ok(true),
                '0' => Ok(false),
                other => Err(CardcodeError::InvalidInput(format!(
                    "module pattern may only contain '0' and '1', found {:?}",
                    other
                ))),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(BitPattern::from)
    }
}

impl From<BitPattern> for String {
    fn from(bits: BitPattern) -> Self {
        bits.to_string()
    }
}

impl TryFrom<String> for BitPattern {
    type Error = CardcodeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths_to_bits() {
        // Code128 Start B
        assert_eq!(widths_to_bits(&[2, 1, 1, 2, 1, 4]).to_string(), "11010010000");
        // Stop pattern ends on a bar
        assert_eq!(
            widths_to_bits(&[2, 3, 3, 1, 1, 1, 2]).to_string(),
            "1100011101011"
        );
    }

    #[test]
    fn test_push_code_msb_first() {
        let mut bits = BitPattern::default();
        bits.push_code(0b0001101, 7);
        assert_eq!(bits.to_string(), "0001101");
    }

    #[test]
    fn test_padding_only_appends_spaces() {
        let bits: BitPattern = "1111111".parse().unwrap();
        let padded = bits.padded(5);
        assert_eq!(padded.len(), 10);
        assert_eq!(padded.to_string(), "1111111000");
        assert_eq!(&padded.as_slice()[..7], bits.as_slice());
    }

    #[test]
    fn test_padding_aligned_is_identity() {
        let bits: BitPattern = "1010101010".parse().unwrap();
        assert_eq!(bits.padded(5), bits);
        assert_eq!(BitPattern::default().padded(5).len(), 0);
    }

    #[test]
    fn test_groups_msb_first() {
        let bits: BitPattern = "10000000011".parse().unwrap();
        assert_eq!(bits.groups(5), vec![16, 1, 16]);
    }

    #[test]
    fn test_runs() {
        let bits: BitPattern = "0011101".parse().unwrap();
        let runs = bits.runs();
        assert_eq!(runs.len(), 4);
        assert_eq!(
            runs[1],
            Run {
                bar: true,
                start: 2,
                len: 3
            }
        );
        assert_eq!(runs.iter().filter(|r| r.bar).map(|r| r.len).sum::<usize>(), 4);
    }

    #[test]
    fn test_parse_rejects_other_chars() {
        assert!("10201".parse::<BitPattern>().is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let bits: BitPattern = "0110".parse().unwrap();
        let json = serde_json::to_string(&bits).unwrap();
        assert_eq!(json, "\"0110\"");
        let back: BitPattern = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bits);
    }
}
