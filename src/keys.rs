//! Key material and key loading.
//!
//! A `Key` is 23 validated bits. Like any secret in this crate it is:
//! - Not `Clone`. Duplicating it takes an explicit conversion.
//! - Zeroised on drop.
//!
//! Loading a key is the only way to obtain a `CipherState`. The split is
//! fixed: bits 0..6 fill X, 6..14 fill Y, 14..23 fill Z.
//!
//! This is the only module that imports `ring`; `generate_key` is the single
//! source of randomness in the crate.

use std::fmt;
use std::str::FromStr;

use ring::rand::{SecureRandom, SystemRandom};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::codec;
use crate::error::TinyA51Error;
use crate::register::KEY_BITS;
use crate::state::CipherState;

/// A 23-bit TinyA5/1 key.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bits: [u8; KEY_BITS],
}

impl Key {
    /// Build a key from a bit slice.
    ///
    /// Length is checked before content: a 22-element slice containing a 7
    /// reports `InvalidKeyLength`.
    pub fn from_bits(bits: &[u8]) -> Result<Self, TinyA51Error> {
        if bits.len() != KEY_BITS {
            return Err(TinyA51Error::InvalidKeyLength(bits.len()));
        }
        codec::check_bits(bits)?;
        let mut key = [0u8; KEY_BITS];
        key.copy_from_slice(bits);
        Ok(Self { bits: key })
    }

    /// Borrow the raw bits.
    ///
    /// `pub(crate)`: key bits only leave the crate through `to_bit_string`.
    pub(crate) fn as_bits(&self) -> &[u8; KEY_BITS] {
        &self.bits
    }

    /// The key as a binary string, for display by a shell that generated it.
    pub fn to_bit_string(&self) -> String {
        codec::render(&self.bits)
    }

    /// Populate X, Y and Z from this key.
    pub fn load(&self) -> CipherState {
        CipherState::from_key_bits(self.as_bits())
    }
}

/// Parses a string of exactly 23 `'0'`/`'1'` characters.
impl FromStr for Key {
    type Err = TinyA51Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count = s.chars().count();
        if count != KEY_BITS {
            return Err(TinyA51Error::InvalidKeyLength(count));
        }
        let mut bits = codec::parse_bits(s)?;
        let key = Self::from_bits(&bits);
        bits.zeroize();
        key
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Key(..)")
    }
}

/// Validate `bits` as a key and return the initial state it produces.
///
/// Fails with `InvalidKeyLength` unless there are exactly 23 elements, and
/// with `InvalidBitValue` if any element is not 0 or 1.
pub fn load_key(bits: &[u8]) -> Result<CipherState, TinyA51Error> {
    Ok(Key::from_bits(bits)?.load())
}

/// Generate a random key.
///
/// Draws three bytes from `SystemRandom` and keeps the low 23 bits, most
/// significant first.
pub fn generate_key() -> Result<Key, TinyA51Error> {
    let rng = SystemRandom::new();
    let mut buf = [0u8; 3];
    rng.fill(&mut buf).map_err(|_| TinyA51Error::RandomnessFailure)?;

    let mut word = u32::from_be_bytes([0, buf[0], buf[1], buf[2]]);
    let mut bits = [0u8; KEY_BITS];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = ((word >> (KEY_BITS - 1 - i)) & 1) as u8;
    }
    buf.zeroize();
    word.zeroize();

    Ok(Key { bits })
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "10010101001110100110000";

    #[test]
    fn test_parse_and_load() {
        let key: Key = KEY.parse().unwrap();
        let state = key.load();
        assert_eq!(state.x().to_string(), "100101");
        assert_eq!(state.y().to_string(), "01001110");
        assert_eq!(state.z().to_string(), "100110000");
    }

    #[test]
    fn test_length_checked_before_content() {
        assert_eq!(
            Key::from_bits(&[7; 22]).unwrap_err(),
            TinyA51Error::InvalidKeyLength(22)
        );
        assert_eq!(
            "0101".parse::<Key>().unwrap_err(),
            TinyA51Error::InvalidKeyLength(4)
        );
    }

    #[test]
    fn test_bad_bit_reported() {
        let mut bits = [0u8; KEY_BITS];
        bits[10] = 2;
        assert_eq!(load_key(&bits).unwrap_err(), TinyA51Error::bit(10, 2));

        let text = "1001010100111010011000x";
        assert_eq!(text.parse::<Key>().unwrap_err(), TinyA51Error::bit(22, 'x'));
    }

    #[test]
    fn test_debug_hides_bits() {
        let key: Key = KEY.parse().unwrap();
        assert_eq!(format!("{:?}", key), "Key(..)");
        assert_eq!(key.to_bit_string(), KEY);
    }

    #[test]
    fn test_generate_key_is_loadable() {
        let key = generate_key().unwrap();
        assert_eq!(key.to_bit_string().len(), KEY_BITS);
        assert!(load_key(key.as_bits()).is_ok());
    }
}
