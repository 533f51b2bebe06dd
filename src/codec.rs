//! Text adapters around the bit-level engine.
//!
//! The engine only sees `&[u8]` bit slices. Shells hand it either binary
//! strings (`"0110"`) or letters A–H, each letter standing for its 3-bit
//! index: A=000, B=001, ... H=111.

use serde::Serializer;

use crate::error::TinyA51Error;

/// Letters in index order. `LETTERS[i]` encodes as the 3-bit binary of `i`.
pub const LETTERS: [char; 8] = ['A', 'B', 'C', 'D', 'E', 'F', 'G', 'H'];

/// Bits per letter.
pub const GROUP_BITS: usize = 3;

/// Reject any element that is not 0 or 1.
pub(crate) fn check_bits(bits: &[u8]) -> Result<(), TinyA51Error> {
    match bits.iter().position(|&b| b > 1) {
        Some(position) => Err(TinyA51Error::bit(position, bits[position])),
        None => Ok(()),
    }
}

/// Parse a string of `'0'`/`'1'` characters into bits.
pub fn parse_bits(text: &str) -> Result<Vec<u8>, TinyA51Error> {
    text.chars()
        .enumerate()
        .map(|(position, c)| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            other => Err(TinyA51Error::bit(position, other)),
        })
        .collect()
}

/// Render bits as a binary string. Any element other than 0 or 1 is an
/// `InvalidBitValue`.
pub fn format_bits(bits: &[u8]) -> Result<String, TinyA51Error> {
    check_bits(bits)?;
    Ok(render(bits))
}

/// `format_bits` for bits the crate has already validated.
pub(crate) fn render(bits: &[u8]) -> String {
    bits.iter().map(|&b| char::from(b'0' + b)).collect()
}

/// 3-bit group for a single letter, case-insensitive.
pub fn letter_to_bits(letter: char) -> Option<[u8; GROUP_BITS]> {
    let upper = letter.to_ascii_uppercase();
    let index = LETTERS.iter().position(|&l| l == upper)?;
    Some([(index >> 2) as u8 & 1, (index >> 1) as u8 & 1, index as u8 & 1])
}

/// Letter for a 3-bit group.
pub fn bits_to_letter(group: [u8; GROUP_BITS]) -> Result<char, TinyA51Error> {
    check_bits(&group)?;
    let index = group.iter().fold(0usize, |acc, &b| acc << 1 | b as usize);
    Ok(LETTERS[index])
}

/// Encode letters A–H (either case) into a bit vector, three bits each.
pub fn letters_to_bits(text: &str) -> Result<Vec<u8>, TinyA51Error> {
    let mut bits = Vec::with_capacity(text.len() * GROUP_BITS);
    for (position, character) in text.chars().enumerate() {
        let group = letter_to_bits(character).ok_or(TinyA51Error::InvalidCharacter {
            position,
            character,
        })?;
        bits.extend_from_slice(&group);
    }
    Ok(bits)
}

/// Decode a bit vector back into letters.
///
/// Fails with `InvalidDataLength` unless the length is a multiple of 3.
pub fn bits_to_letters(bits: &[u8]) -> Result<String, TinyA51Error> {
    if bits.len() % GROUP_BITS != 0 {
        return Err(TinyA51Error::InvalidDataLength(bits.len()));
    }
    check_bits(bits)?;
    bits.chunks_exact(GROUP_BITS)
        .map(|chunk| bits_to_letter([chunk[0], chunk[1], chunk[2]]))
        .collect()
}

/// Serde helper: write a bit vector as a binary string.
pub(crate) fn serialize_bits<S: Serializer>(bits: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    let text = format_bits(bits).map_err(serde::ser::Error::custom)?;
    serializer.serialize_str(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_table() {
        assert_eq!(letter_to_bits('A'), Some([0, 0, 0]));
        assert_eq!(letter_to_bits('D'), Some([0, 1, 1]));
        assert_eq!(letter_to_bits('H'), Some([1, 1, 1]));
        assert_eq!(letter_to_bits('h'), Some([1, 1, 1]));
        assert_eq!(letter_to_bits('I'), None);
    }

    #[test]
    fn test_every_letter_round_trips() {
        for letter in LETTERS {
            let group = letter_to_bits(letter).unwrap();
            assert_eq!(bits_to_letter(group), Ok(letter));
        }
    }

    #[test]
    fn test_letters_to_bits() {
        assert_eq!(letters_to_bits("Hd").unwrap(), vec![1, 1, 1, 0, 1, 1]);
        assert_eq!(letters_to_bits("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_invalid_character() {
        assert_eq!(
            letters_to_bits("ABZ"),
            Err(TinyA51Error::InvalidCharacter {
                position: 2,
                character: 'Z'
            })
        );
    }

    #[test]
    fn test_bits_to_letters_length() {
        assert_eq!(
            bits_to_letters(&[0, 1, 1, 0]),
            Err(TinyA51Error::InvalidDataLength(4))
        );
        assert_eq!(bits_to_letters(&[0, 1, 1]).unwrap(), "D");
    }

    #[test]
    fn test_bits_to_letters_bad_bit() {
        assert!(matches!(
            bits_to_letters(&[0, 2, 1]),
            Err(TinyA51Error::InvalidBitValue { position: 1, .. })
        ));
    }

    #[test]
    fn test_non_binary_input_is_rejected_not_remapped() {
        assert_eq!(bits_to_letter([2, 0, 0]), Err(TinyA51Error::bit(0, 2)));
        assert_eq!(bits_to_letter([1, 3, 0]), Err(TinyA51Error::bit(1, 3)));
        assert_eq!(format_bits(&[0, 5, 2]), Err(TinyA51Error::bit(1, 5)));
    }

    #[test]
    fn test_parse_and_format_bits() {
        assert_eq!(parse_bits("0110").unwrap(), vec![0, 1, 1, 0]);
        assert_eq!(format_bits(&[1, 0, 0]).unwrap(), "100");
        assert_eq!(
            parse_bits("01a"),
            Err(TinyA51Error::bit(2, 'a'))
        );
    }
}
