//! The cipher's internal state: the three registers at one instant.

use serde::Serialize;

use crate::register::{self, Register};

/// Snapshot of X, Y and Z.
///
/// Only the step function produces new states, and it does so by value; a
/// `CipherState` is never mutated in place once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CipherState {
    x: Register,
    y: Register,
    z: Register,
}

impl CipherState {
    /// Split validated key bits across the registers: X takes the first six,
    /// Y the next eight, Z the last nine.
    pub(crate) fn from_key_bits(bits: &[u8; register::KEY_BITS]) -> Self {
        let (x, rest) = bits.split_at(register::X.len);
        let (y, z) = rest.split_at(register::Y.len);
        Self {
            x: Register::from_bits(&register::X, x),
            y: Register::from_bits(&register::Y, y),
            z: Register::from_bits(&register::Z, z),
        }
    }

    pub(crate) fn from_registers(x: Register, y: Register, z: Register) -> Self {
        Self { x, y, z }
    }

    pub fn x(&self) -> &Register {
        &self.x
    }

    pub fn y(&self) -> &Register {
        &self.y
    }

    pub fn z(&self) -> &Register {
        &self.z
    }

    /// The registers in X, Y, Z order.
    pub fn registers(&self) -> [&Register; 3] {
        [&self.x, &self.y, &self.z]
    }

    /// XOR of the three output bits. Meaningful on a post-clocking state.
    pub fn keystream_bit(&self) -> u8 {
        self.x.output_bit() ^ self.y.output_bit() ^ self.z.output_bit()
    }
}
