//! # EAN-13
//!
//! Encodes a 12-digit payload into the 95-module EAN-13 pattern and appends
//! the computed check digit.
//!
//! ## Layout
//!
//! | Part | Modules |
//! |------|---------|
//! | Start guard `101` | 3 |
//! | d1..d6, L or G codes chosen by d0 | 42 |
//! | Center guard `01010` | 5 |
//! | d7..d12, R codes (d12 = check digit) | 42 |
//! | End guard `101` | 3 |
//!
//! The leading digit d0 is not drawn; it only selects the L/G parity of the
//! left half.
//!
//! ```
//! use cardcode::symbol::ean13;
//!
//! let symbol = ean13::encode("590123412345").unwrap();
//! assert_eq!(symbol.display_text, "5901234123457");
//! assert_eq!(symbol.checksum, 7);
//! assert_eq!(symbol.bits.len(), 95);
//! ```

use super::{BitPattern, EncodedSymbol, Format};
use crate::error::CardcodeError;

/// Total modules in an EAN-13 symbol.
pub const MODULES: usize = 95;

/// Digits supplied by the caller; the 13th is computed.
pub const PAYLOAD_DIGITS: usize = 12;

const START_GUARD: (u16, u8) = (0b101, 3);
const CENTER_GUARD: (u16, u8) = (0b01010, 5);
const END_GUARD: (u16, u8) = (0b101, 3);

const L_CODES: [u16; 10] = [
    0b0001101, 0b0011001, 0b0010011, 0b0111101, 0b0100011, 0b0110001, 0b0101111, 0b0111011,
    0b0110111, 0b0001011,
];

const G_CODES: [u16; 10] = [
    0b0100111, 0b0110011, 0b0011011, 0b0100001, 0b0011101, 0b0111001, 0b0000101, 0b0010001,
    0b0001001, 0b0010111,
];

const R_CODES: [u16; 10] = [
    0b1110010, 0b1100110, 0b1101100, 0b1000010, 0b1011100, 0b1001110, 0b1010000, 0b1000100,
    0b1001000, 0b1110100,
];

/// Left-half parity per leading digit, d1 in the high bit. 0 = L, 1 = G.
const PARITY: [u8; 10] = [
    0b000000, 0b001011, 0b001101, 0b001110, 0b010011, 0b011001, 0b011100, 0b010101, 0b010110,
    0b011010,
];

/// Encode a raw EAN-13 value.
///
/// Non-digits are stripped. At least 12 digits must remain; anything past
/// the 12th is ignored, so a supplied check digit is recomputed rather than
/// validated.
pub fn encode(raw: &str) -> Result<EncodedSymbol, CardcodeError> {
    let digits = payload(raw)?;
    let check = checksum(&digits);

    let mut full = [0u8; PAYLOAD_DIGITS + 1];
    full[..PAYLOAD_DIGITS].copy_from_slice(&digits);
    full[PAYLOAD_DIGITS] = check;

    let display_text = full.iter().map(|&d| char::from(b'0' + d)).collect();

    Ok(EncodedSymbol {
        format: Format::Ean13,
        bits: modules(&full),
        display_text,
        checksum: check,
    })
}

/// Standard EAN-13 check digit: weight 1 on d0, d2, ..., weight 3 on
/// d1, d3, ..., counted from the left.
pub fn checksum(digits: &[u8; PAYLOAD_DIGITS]) -> u8 {
    let (odd, even) = digits
        .iter()
        .enumerate()
        .fold((0u32, 0u32), |(odd, even), (i, &d)| {
            if i % 2 == 0 {
                (odd + u32::from(d), even)
            } else {
                (odd, even + u32::from(d))
            }
        });
    let rem = (3 * even + odd) % 10;
    if rem == 0 { 0 } else { (10 - rem) as u8 }
}

/// Extract the first 12 digits of `raw`.
fn payload(raw: &str) -> Result<[u8; PAYLOAD_DIGITS], CardcodeError> {
    let digits: Vec<u8> = raw
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();

    if digits.len() < PAYLOAD_DIGITS {
        return Err(CardcodeError::InvalidInput(format!(
            "EAN-13 requires at least {} digits, got {}",
            PAYLOAD_DIGITS,
            digits.len()
        )));
    }
    if digits.len() > PAYLOAD_DIGITS {
        log::debug!(
            "EAN-13 value has {} digits, using the first {}",
            digits.len(),
            PAYLOAD_DIGITS
        );
    }

    let mut out = [0u8; PAYLOAD_DIGITS];
    out.copy_from_slice(&digits[..PAYLOAD_DIGITS]);
    Ok(out)
}

fn modules(full: &[u8; PAYLOAD_DIGITS + 1]) -> BitPattern {
    let mut bits = BitPattern::with_capacity(MODULES);
    let parity = PARITY[usize::from(full[0])];

    bits.push_code(START_GUARD.0, START_GUARD.1);
    for (pos, &d) in full[1..7].iter().enumerate() {
        let use_g = (parity >> (5 - pos)) & 1 == 1;
        let table = if use_g { &G_CODES } else { &L_CODES };
        bits.push_code(table[usize::from(d)], 7);
    }
    bits.push_code(CENTER_GUARD.0, CENTER_GUARD.1);
    for &d in &full[7..] {
        bits.push_code(R_CODES[usize::from(d)], 7);
    }
    bits.push_code(END_GUARD.0, END_GUARD.1);

    debug_assert_eq!(bits.len(), MODULES);
    bits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(s: &str) -> [u8; 12] {
        let mut out = [0u8; 12];
        for (o, b) in out.iter_mut().zip(s.bytes()) {
            *o = b - b'0';
        }
        out
    }

    #[test]
    fn test_checksum_known_values() {
        assert_eq!(checksum(&digits("590123412345")), 7);
        assert_eq!(checksum(&digits("400638133393")), 1);
        assert_eq!(checksum(&digits("978020137962")), 4);
        assert_eq!(checksum(&digits("000000000000")), 0);
    }

    #[test]
    fn test_code_tables_are_related() {
        // R is the complement of L, G is R mirrored
        for d in 0..10 {
            assert_eq!(R_CODES[d], !L_CODES[d] & 0x7f);
            let mirrored = (0..7).fold(0u16, |acc, i| (acc << 1) | ((R_CODES[d] >> i) & 1));
            assert_eq!(G_CODES[d], mirrored);
        }
    }

    #[test]
    fn test_encode_scenario() {
        let symbol = encode("590123412345").unwrap();
        assert_eq!(symbol.checksum, 7);
        assert_eq!(symbol.display_text, "5901234123457");
        assert_eq!(symbol.format, Format::Ean13);
        assert_eq!(
            symbol.bits.to_string(),
            "10100010110100111011001100100110111101001110101010110011011011001000010101110010011101000100101"
        );
    }

    #[test]
    fn test_guards() {
        let bits = encode("400638133393").unwrap().bits.to_string();
        assert!(bits.starts_with("101"));
        assert!(bits.ends_with("101"));
        assert_eq!(&bits[45..50], "01010");
    }

    #[test]
    fn test_too_few_digits() {
        let err = encode("123").unwrap_err();
        assert!(matches!(err, CardcodeError::InvalidInput(_)));
        // 11 digits after stripping separators
        assert!(encode("5901-2341-234").is_err());
    }

    #[test]
    fn test_strips_non_digits() {
        let symbol = encode(" 5901 2341-2345 ").unwrap();
        assert_eq!(symbol.display_text, "5901234123457");
    }

    #[test]
    fn test_truncates_extra_digits() {
        // A wrong 13th digit is ignored, not validated
        let symbol = encode("5901234123450").unwrap();
        assert_eq!(symbol.display_text, "5901234123457");
        let long = encode("59012341234599999").unwrap();
        assert_eq!(long.bits, symbol.bits);
    }

    #[test]
    fn test_check_digit_range() {
        for lead in 0..10u8 {
            for tail in [0u32, 7, 123_456, 999_999] {
                let value = format!("{}{:05}{:06}", lead, tail % 100_000, tail);
                let symbol = encode(&value).unwrap();
                assert!(symbol.checksum <= 9);
                assert_eq!(symbol.bits.len(), MODULES);
            }
        }
    }
}
