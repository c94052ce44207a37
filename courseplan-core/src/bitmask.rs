//! Week and period bitmasks.
//!
//! Lesson rows encode "which weeks" and "which periods of the day" as bit
//! strings. The data pipeline writes them as integers (bit 0 is position 1),
//! hand-written fixtures and older exports use digit strings where the first
//! character is position 1. Both decode to the same thing: the ascending
//! list of 1-based positions whose bit is set.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An encoded set of 1-based positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bitmask {
    /// Bit 0 is position 1.
    Integer(u64),
    /// `'1'` marks a set position, the first character is position 1.
    Digits(String),
}

impl Default for Bitmask {
    fn default() -> Self {
        Bitmask::Integer(0)
    }
}

impl Bitmask {
    /// Ascending 1-based positions whose bit is set.
    pub fn positions(&self) -> Vec<u32> {
        match self {
            Bitmask::Integer(bits) => decode_integer(*bits),
            Bitmask::Digits(digits) => decode_digits(digits),
        }
    }

    /// True when no position is set. Callers treat this as "no occurrence".
    pub fn is_empty(&self) -> bool {
        match self {
            Bitmask::Integer(bits) => *bits == 0,
            Bitmask::Digits(digits) => !digits.contains('1'),
        }
    }

    pub fn contains(&self, position: u32) -> bool {
        match self {
            Bitmask::Integer(bits) => {
                (1..=64).contains(&position) && bits >> (position - 1) & 1 == 1
            }
            Bitmask::Digits(digits) => {
                position >= 1 && digits.chars().nth(position as usize - 1) == Some('1')
            }
        }
    }

    pub fn count(&self) -> usize {
        match self {
            Bitmask::Integer(bits) => bits.count_ones() as usize,
            Bitmask::Digits(digits) => digits.chars().filter(|c| *c == '1').count(),
        }
    }
}

impl From<u64> for Bitmask {
    fn from(bits: u64) -> Self {
        Bitmask::Integer(bits)
    }
}

impl From<&str> for Bitmask {
    fn from(digits: &str) -> Self {
        Bitmask::Digits(digits.to_string())
    }
}

impl fmt::Display for Bitmask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let positions: Vec<String> = self.positions().iter().map(u32::to_string).collect();
        write!(f, "{{{}}}", positions.join(","))
    }
}

/// Decode a digit string. Anything other than `'1'` counts as unset.
pub fn decode_digits(digits: &str) -> Vec<u32> {
    digits
        .chars()
        .enumerate()
        .filter(|(_, c)| *c == '1')
        .map(|(i, _)| i as u32 + 1)
        .collect()
}

/// Decode an integer, least significant bit first.
pub fn decode_integer(bits: u64) -> Vec<u32> {
    (0..64).filter(|i| bits >> i & 1 == 1).map(|i| i + 1).collect()
}

/// Split ascending positions into maximal runs of consecutive values.
pub fn runs(positions: &[u32]) -> Vec<(u32, u32)> {
    let mut result: Vec<(u32, u32)> = Vec::new();
    for &p in positions {
        match result.last_mut() {
            Some((_, end)) if *end + 1 == p => *end = p,
            _ => result.push((p, p)),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_digits_is_one_indexed_from_the_left() {
        assert_eq!(decode_digits("0000001"), vec![7]);
        assert_eq!(decode_digits("1011"), vec![1, 3, 4]);
        assert_eq!(decode_digits("0001100"), vec![4, 5]);
    }

    #[test]
    fn test_decode_empty_and_all_zero() {
        assert!(decode_digits("").is_empty());
        assert!(decode_digits("0000000").is_empty());
        assert!(decode_integer(0).is_empty());
        assert!(Bitmask::from("000").is_empty());
        assert!(Bitmask::default().is_empty());
    }

    #[test]
    fn test_decode_ignores_other_characters() {
        assert_eq!(decode_digits("1x2 1"), vec![1, 5]);
    }

    #[test]
    fn test_decode_integer_is_lsb_first() {
        // weeks 1-4 and 7-10, as the data pipeline writes "1-4,7-10周"
        let bits = 0b11_1100_1111;
        assert_eq!(decode_integer(bits), vec![1, 2, 3, 4, 7, 8, 9, 10]);
        assert_eq!(Bitmask::Integer(24).positions(), vec![4, 5]);
        assert_eq!(decode_integer(1 << 63), vec![64]);
    }

    #[test]
    fn test_positions_match_every_set_character() {
        for s in ["", "1", "01", "110011", "0101010101010101", "1111111111111111111"] {
            let expected: Vec<u32> = s
                .char_indices()
                .filter(|(_, c)| *c == '1')
                .map(|(i, _)| i as u32 + 1)
                .collect();
            let mask = Bitmask::from(s);
            assert_eq!(mask.positions(), expected, "mask {s}");
            assert_eq!(mask.count(), expected.len());
            assert!(expected.iter().all(|p| mask.contains(*p)));
        }
    }

    #[test]
    fn test_contains_out_of_range() {
        assert!(!Bitmask::Integer(u64::MAX).contains(0));
        assert!(!Bitmask::Integer(u64::MAX).contains(65));
        assert!(!Bitmask::from("1").contains(2));
    }

    #[test]
    fn test_deserialize_number_or_string() {
        let mask: Bitmask = serde_json::from_str("24").unwrap();
        assert_eq!(mask, Bitmask::Integer(24));

        let mask: Bitmask = serde_json::from_str("\"0011\"").unwrap();
        assert_eq!(mask.positions(), vec![3, 4]);
    }

    #[test]
    fn test_runs() {
        assert_eq!(runs(&[1, 2, 5, 6]), vec![(1, 2), (5, 6)]);
        assert_eq!(runs(&[3]), vec![(3, 3)]);
        assert_eq!(runs(&[4, 5, 6]), vec![(4, 6)]);
        assert!(runs(&[]).is_empty());
    }

    #[test]
    fn test_display() {
        assert_eq!(Bitmask::Integer(0b1011).to_string(), "{1,2,4}");
    }
}
