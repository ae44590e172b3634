//! # Code 128, Subset B
//!
//! Subset B covers printable ASCII 32..=127. Every input character becomes
//! one symbol value (`code - 32`); characters outside the subset are replaced
//! with `?` so the encoder is total over all strings.
//!
//! ## Symbol layout
//!
//! ```text
//! [10 quiet] [Start B] [data...] [check] [Stop] [10 quiet]
//!              11        11 each   11     13      modules
//! ```
//!
//! The check symbol is `(104 + Σ value_i * i) mod 103` with `i` counted
//! from 1 over the data symbols.
//!
//! ```
//! use cardcode::symbol::code128;
//!
//! let symbol = code128::encode("AB12");
//! assert_eq!(code128::symbol_values("AB12"), vec![33, 34, 17, 18]);
//! assert_eq!(symbol.checksum, 19);
//! assert_eq!(symbol.display_text, "AB12");
//! ```

use super::{BitPattern, EncodedSymbol, Format};

/// Symbol value of the Start Code B character.
pub const START_B: u8 = 104;

/// Blank modules on each side of the symbol.
pub const QUIET_ZONE: usize = 10;

/// Modules per data, start or check symbol.
pub const SYMBOL_MODULES: usize = 11;

/// Modules in the stop pattern (stop symbol plus terminating bar).
pub const STOP_MODULES: usize = 13;

/// Substitute for characters outside Subset B.
pub const SUBSTITUTE: char = '?';

const FIRST_CHAR: u32 = 32;
const LAST_CHAR: u32 = 127;
const CHECK_MODULUS: u32 = 103;

/// Stop symbol (106) followed by the 2-module termination bar.
const STOP: [u8; 7] = [2, 3, 3, 1, 1, 1, 2];

/// Element widths (bar, space, bar, space, bar, space) for symbol values
/// 0..=106. Each entry sums to 11 modules.
#[rustfmt::skip]
pub const PATTERNS: [[u8; 6]; 107] = [
    [2, 1, 2, 2, 2, 2], [2, 2, 2, 1, 2, 2], [2, 2, 2, 2, 2, 1], [1, 2, 1, 2, 2, 3],
    [1, 2, 1, 3, 2, 2], [1, 3, 1, 2, 2, 2], [1, 2, 2, 2, 1, 3], [1, 2, 2, 3, 1, 2],
    [1, 3, 2, 2, 1, 2], [2, 2, 1, 2, 1, 3], [2, 2, 1, 3, 1, 2], [2, 3, 1, 2, 1, 2],
    [1, 1, 2, 2, 3, 2], [1, 2, 2, 1, 3, 2], [1, 2, 2, 2, 3, 1], [1, 1, 3, 2, 2, 2],
    [1, 2, 3, 1, 2, 2], [1, 2, 3, 2, 2, 1], [2, 2, 3, 2, 1, 1], [2, 2, 1, 1, 3, 2],
    [2, 2, 1, 2, 3, 1], [2, 1, 3, 2, 1, 2], [2, 2, 3, 1, 1, 2], [3, 1, 2, 1, 3, 1],
    [3, 1, 1, 2, 2, 2], [3, 2, 1, 1, 2, 2], [3, 2, 1, 2, 2, 1], [3, 1, 2, 2, 1, 2],
    [3, 2, 2, 1, 1, 2], [3, 2, 2, 2, 1, 1], [2, 1, 2, 1, 2, 3], [2, 1, 2, 3, 2, 1],
    [2, 3, 2, 1, 2, 1], [1, 1, 1, 3, 2, 3], [1, 3, 1, 1, 2, 3], [1, 3, 1, 3, 2, 1],
    [1, 1, 2, 3, 1, 3], [1, 3, 2, 1, 1, 3], [1, 3, 2, 3, 1, 1], [2, 1, 1, 3, 1, 3],
    [2, 3, 1, 1, 1, 3], [2, 3, 1, 3, 1, 1], [1, 1, 2, 1, 3, 3], [1, 1, 2, 3, 3, 1],
    [1, 3, 2, 1, 3, 1], [1, 1, 3, 1, 2, 3], [1, 1, 3, 3, 2, 1], [1, 3, 3, 1, 2, 1],
    [3, 1, 3, 1, 2, 1], [2, 1, 1, 3, 3, 1], [2, 3, 1, 1, 3, 1], [2, 1, 3, 1, 1, 3],
    [2, 1, 3, 3, 1, 1], [2, 1, 3, 1, 3, 1], [3, 1, 1, 1, 2, 3], [3, 1, 1, 3, 2, 1],
    [3, 3, 1, 1, 2, 1], [3, 1, 2, 1, 1, 3], [3, 1, 2, 3, 1, 1], [3, 3, 2, 1, 1, 1],
    [3, 1, 4, 1, 1, 1], [2, 2, 1, 4, 1, 1], [4, 3, 1, 1, 1, 1], [1, 1, 1, 2, 2, 4],
    [1, 1, 1, 4, 2, 2], [1, 2, 1, 1, 2, 4], [1, 2, 1, 4, 2, 1], [1, 4, 1, 1, 2, 2],
    [1, 4, 1, 2, 2, 1], [1, 1, 2, 2, 1, 4], [1, 1, 2, 4, 1, 2], [1, 2, 2, 1, 1, 4],
    [1, 2, 2, 4, 1, 1], [1, 4, 2, 1, 1, 2], [1, 4, 2, 2, 1, 1], [2, 4, 1, 2, 1, 1],
    [2, 2, 1, 1, 1, 4], [4, 1, 3, 1, 1, 1], [2, 4, 1, 1, 1, 2], [1, 3, 4, 1, 1, 1],
    [1, 1, 1, 2, 4, 2], [1, 2, 1, 1, 4, 2], [1, 2, 1, 2, 4, 1], [1, 1, 4, 2, 1, 2],
    [1, 2, 4, 1, 1, 2], [1, 2, 4, 2, 1, 1], [4, 1, 1, 2, 1, 2], [4, 2, 1, 1, 1, 2],
    [4, 2, 1, 2, 1, 1], [2, 1, 2, 1, 4, 1], [2, 1, 4, 1, 2, 1], [4, 1, 2, 1, 2, 1],
    [1, 1, 1, 1, 4, 3], [1, 1, 1, 3, 4, 1], [1, 3, 1, 1, 4, 1], [1, 1, 4, 1, 1, 3],
    [1, 1, 4, 3, 1, 1], [4, 1, 1, 1, 1, 3], [4, 1, 1, 3, 1, 1], [1, 1, 3, 1, 4, 1],
    [1, 1, 4, 1, 3, 1], [3, 1, 1, 1, 4, 1], [4, 1, 1, 1, 3, 1], [2, 1, 1, 4, 1, 2],
    [2, 1, 1, 2, 1, 4], [2, 1, 1, 2, 3, 2], [2, 3, 3, 1, 1, 1],
];

/// Encode `text` as a Code128-B symbol. Never fails.
///
/// `display_text` keeps the caller's original text, including any
/// characters that were substituted in the bars.
pub fn encode(text: &str) -> EncodedSymbol {
    let values = symbol_values(text);
    let check = checksum(&values);

    let mut bits = BitPattern::with_capacity(module_count(values.len()));
    bits.push_spaces(QUIET_ZONE);
    bits.push_widths(&PATTERNS[usize::from(START_B)]);
    for &value in &values {
        bits.push_widths(&PATTERNS[usize::from(value)]);
    }
    bits.push_widths(&PATTERNS[usize::from(check)]);
    bits.push_widths(&STOP);
    bits.push_spaces(QUIET_ZONE);

    EncodedSymbol {
        format: Format::Code128,
        bits,
        display_text: text.to_string(),
        checksum: check,
    }
}

/// Subset-B symbol values for each character of `text`, with out-of-range
/// characters replaced by `?`.
pub fn symbol_values(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| {
            let code = u32::from(c);
            let code = if (FIRST_CHAR..=LAST_CHAR).contains(&code) {
                code
            } else {
                log::debug!(
                    "Code128-B cannot encode {:?} (U+{:04X}), substituting {:?}",
                    c,
                    code,
                    SUBSTITUTE
                );
                u32::from(SUBSTITUTE)
            };
            (code - FIRST_CHAR) as u8
        })
        .collect()
}

/// Mod-103 check value over the data symbols, seeded with Start B.
pub fn checksum(values: &[u8]) -> u8 {
    let sum = values
        .iter()
        .zip(1u32..)
        .fold(u32::from(START_B) % CHECK_MODULUS, |acc, (&value, weight)| {
            (acc + u32::from(value) * weight) % CHECK_MODULUS
        });
    sum as u8
}

/// Total modules, quiet zones included, for `data_len` data symbols.
pub fn module_count(data_len: usize) -> usize {
    2 * QUIET_ZONE + SYMBOL_MODULES * (data_len + 2) + STOP_MODULES
}

/// Bars and spaces drawn between the quiet zones: six per start, data and
/// check symbol plus seven for the stop pattern.
pub fn element_count(data_len: usize) -> usize {
    6 * (data_len + 2) + STOP.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_table_shape() {
        for (value, widths) in PATTERNS.iter().enumerate() {
            let total: u32 = widths.iter().map(|&w| u32::from(w)).sum();
            assert_eq!(total, 11, "symbol {} sums to {}", value, total);
            assert!(widths.iter().all(|&w| (1..=4).contains(&w)));
        }
        let stop: u32 = STOP.iter().map(|&w| u32::from(w)).sum();
        assert_eq!(stop as usize, STOP_MODULES);
    }

    #[test]
    fn test_patterns_are_unique() {
        let mut seen = std::collections::HashSet::new();
        for widths in PATTERNS.iter() {
            assert!(seen.insert(*widths));
        }
    }

    #[test]
    fn test_symbol_values() {
        assert_eq!(symbol_values("AB12"), vec![33, 34, 17, 18]);
        assert_eq!(symbol_values(" ~\u{7f}"), vec![0, 94, 95]);
    }

    #[test]
    fn test_checksum_scenario() {
        // (104 + 33*1 + 34*2 + 17*3 + 18*4) mod 103
        assert_eq!(checksum(&[33, 34, 17, 18]), 19);
        assert_eq!(checksum(&[]), 1);
    }

    #[test]
    fn test_substitution_feeds_checksum() {
        let values = symbol_values("AB\u{1}");
        assert_eq!(values, vec![33, 34, 31]);
        let symbol = encode("AB\u{1}");
        // 104 + 33 + 68 + 93 = 298, 298 mod 103 = 92
        assert_eq!(symbol.checksum, 92);
        assert_eq!(symbol.bits, encode("AB?").bits);
        assert_eq!(symbol.display_text, "AB\u{1}");
    }

    #[test]
    fn test_non_ascii_is_substituted() {
        assert_eq!(symbol_values("é€\n"), vec![31, 31, 31]);
        // one substitute per scalar value, astral characters included
        assert_eq!(symbol_values("A😀"), vec![33, 31]);
    }

    #[test]
    fn test_empty_value_check_symbol() {
        let symbol = encode("");
        assert_eq!(symbol.checksum, 1);
        // start B, check symbol 1, stop
        let body = &symbol.bits.to_string()[QUIET_ZONE..QUIET_ZONE + 22];
        assert_eq!(body, "1101001000011001101100");
        assert_ne!(&body[11..], &body[..11]);
    }

    #[test]
    fn test_encode_bits() {
        let symbol = encode("AB12");
        assert_eq!(symbol.format, Format::Code128);
        assert_eq!(
            symbol.bits.to_string(),
            "000000000011010010000101000110001000101100010011100110110011100101100101110011000111010110000000000"
        );
    }

    #[test]
    fn test_lengths() {
        for text in ["", "A", "AB12", "Hello, World!"] {
            let n = text.chars().count();
            let symbol = encode(text);
            assert_eq!(symbol.bits.len(), module_count(n));
            // quiet zones add one leading and one trailing space run
            assert_eq!(symbol.bits.runs().len(), element_count(n) + 2);
            assert!(symbol.checksum <= 102);
        }
    }

    #[test]
    fn test_quiet_zones() {
        let bits = encode("X").bits;
        let slice = bits.as_slice();
        assert!(slice[..QUIET_ZONE].iter().all(|&m| !m));
        assert!(slice[slice.len() - QUIET_ZONE..].iter().all(|&m| !m));
        assert!(slice[QUIET_ZONE]);
        assert!(slice[slice.len() - QUIET_ZONE - 1]);
    }
}
