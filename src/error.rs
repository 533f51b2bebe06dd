//! Error types for tinya51.
//!
//! Every variant is an input-validation failure. They are all detected
//! before any register is touched, so a failed call leaves no partial state
//! behind.

use std::fmt;

/// The single error type for all tinya51 operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TinyA51Error {
    /// The key did not contain exactly 23 bits. Carries the length received.
    InvalidKeyLength(usize),

    /// A purported bit was neither 0 nor 1.
    InvalidBitValue {
        /// Index of the offending element in its input.
        position: usize,
        /// The offending value, rendered as text.
        value: String,
    },

    /// Letter-mode data whose bit length is not a multiple of 3.
    InvalidDataLength(usize),

    /// A letter outside A–H.
    InvalidCharacter {
        /// Index of the offending character in its input.
        position: usize,
        /// The offending character.
        character: char,
    },

    /// The system's random number generator failed to produce bytes.
    RandomnessFailure,
}

impl TinyA51Error {
    pub(crate) fn bit(position: usize, value: impl fmt::Display) -> Self {
        Self::InvalidBitValue {
            position,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for TinyA51Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeyLength(len) => {
                write!(f, "key must be exactly 23 bits, got {}", len)
            }
            Self::InvalidBitValue { position, value } => {
                write!(f, "invalid bit {:?} at position {}: expected 0 or 1", value, position)
            }
            Self::InvalidDataLength(len) => {
                write!(f, "bit length {} is not a multiple of 3", len)
            }
            Self::InvalidCharacter {
                position,
                character,
            } => write!(
                f,
                "character {:?} at position {} not supported, use A-H only",
                character, position
            ),
            Self::RandomnessFailure => write!(f, "randomness source failed"),
        }
    }
}

impl std::error::Error for TinyA51Error {}
