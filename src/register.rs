//! Shift registers and their fixed parameters.
//!
//! Each register is a fixed-length row of bits, index 0 leftmost. Clocking a
//! register shifts every bit one place to the right, drops the last bit, and
//! writes the XOR of the register's tap bits into index 0.
//!
//! ## Parameters
//!
//! ```text
//! register  len  control  taps        output
//!    X       6      1     2, 4, 5       5
//!    Y       8      3     6, 7          7
//!    Z       9      3     2, 7, 8       8
//! ```
//!
//! These are the only place the cipher's positions are encoded. Nothing else
//! in the crate indexes into a register by a literal.

use std::fmt;

use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Fixed geometry of one register.
#[derive(Debug, PartialEq, Eq)]
pub struct RegisterSpec {
    /// Display name (`'X'`, `'Y'` or `'Z'`).
    pub name: char,
    /// Number of bits held.
    pub len: usize,
    /// Position read by the majority function.
    pub control: usize,
    /// Positions XORed together to form the feedback bit.
    pub taps: &'static [usize],
    /// Position read into the keystream after clocking.
    pub output: usize,
}

pub const X: RegisterSpec = RegisterSpec {
    name: 'X',
    len: 6,
    control: 1,
    taps: &[2, 4, 5],
    output: 5,
};

pub const Y: RegisterSpec = RegisterSpec {
    name: 'Y',
    len: 8,
    control: 3,
    taps: &[6, 7],
    output: 7,
};

pub const Z: RegisterSpec = RegisterSpec {
    name: 'Z',
    len: 9,
    control: 3,
    taps: &[2, 7, 8],
    output: 8,
};

/// Total key length: the three register lengths laid end to end.
pub const KEY_BITS: usize = X.len + Y.len + Z.len;

/// One shift register. Its length is fixed by its `RegisterSpec` and never changes.
#[derive(Clone, PartialEq, Eq)]
pub struct Register {
    spec: &'static RegisterSpec,
    bits: Vec<u8>,
}

impl Register {
    /// Build a register from already-validated bits.
    ///
    /// `bits.len()` must equal `spec.len` and every element must be 0 or 1;
    /// key loading checks both before calling this.
    pub(crate) fn from_bits(spec: &'static RegisterSpec, bits: &[u8]) -> Self {
        debug_assert_eq!(bits.len(), spec.len);
        Self {
            spec,
            bits: bits.to_vec(),
        }
    }

    pub fn spec(&self) -> &'static RegisterSpec {
        self.spec
    }

    pub fn name(&self) -> char {
        self.spec.name
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always false; registers are never empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit at `index`, or `None` past the end.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).copied()
    }

    /// The bit fed to the majority function.
    pub fn control_bit(&self) -> u8 {
        self.bits[self.spec.control]
    }

    /// The bit contributed to the keystream.
    pub fn output_bit(&self) -> u8 {
        self.bits[self.spec.output]
    }

    /// XOR of the tap positions of the current contents.
    pub fn feedback(&self) -> u8 {
        self.spec.taps.iter().fold(0, |acc, &tap| acc ^ self.bits[tap])
    }

    /// Return the register clocked once.
    ///
    /// Pure: `self` is untouched. The result has the same length.
    pub fn rotated(&self) -> Self {
        let mut bits = Vec::with_capacity(self.bits.len());
        bits.push(self.feedback());
        bits.extend_from_slice(&self.bits[..self.bits.len() - 1]);
        Self {
            spec: self.spec,
            bits,
        }
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.spec.name, self)
    }
}

/// Renders the bits as a contiguous binary string, e.g. `100101`.
impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            write!(f, "{}", bit)?;
        }
        Ok(())
    }
}

/// Serialized as a plain array of bits, the shape the visualizer consumes.
impl Serialize for Register {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.bits.len()))?;
        for bit in &self.bits {
            seq.serialize_element(bit)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bits_is_23() {
        assert_eq!(KEY_BITS, 23);
    }

    #[test]
    fn test_positions_within_bounds() {
        for spec in [&X, &Y, &Z] {
            assert!(spec.control < spec.len);
            assert!(spec.output < spec.len);
            assert!(spec.taps.iter().all(|&t| t < spec.len));
        }
    }

    #[test]
    fn test_rotate_x() {
        // feedback = x2 ^ x4 ^ x5 = 0 ^ 0 ^ 1 = 1
        let x = Register::from_bits(&X, &[1, 0, 0, 1, 0, 1]);
        let rotated = x.rotated();
        assert_eq!(rotated.bits(), &[1, 1, 0, 0, 1, 0]);
        assert_eq!(x.bits(), &[1, 0, 0, 1, 0, 1]);
    }

    #[test]
    fn test_rotate_y() {
        // feedback = y6 ^ y7 = 1 ^ 0 = 1
        let y = Register::from_bits(&Y, &[0, 1, 0, 0, 1, 1, 1, 0]);
        assert_eq!(y.rotated().bits(), &[1, 0, 1, 0, 0, 1, 1, 1]);
    }

    #[test]
    fn test_rotate_z() {
        // feedback = z2 ^ z7 ^ z8 = 0 ^ 0 ^ 0 = 0
        let z = Register::from_bits(&Z, &[1, 0, 0, 1, 1, 0, 0, 0, 0]);
        assert_eq!(z.rotated().bits(), &[0, 1, 0, 0, 1, 1, 0, 0, 0]);
    }

    #[test]
    fn test_rotation_preserves_length() {
        let mut z = Register::from_bits(&Z, &[1; 9]);
        for _ in 0..50 {
            z = z.rotated();
            assert_eq!(z.len(), Z.len);
        }
    }

    #[test]
    fn test_display_and_serialize() {
        let x = Register::from_bits(&X, &[1, 0, 0, 1, 0, 1]);
        assert_eq!(x.to_string(), "100101");
        assert_eq!(format!("{:?}", x), "X[100101]");
        assert_eq!(serde_json::to_string(&x).unwrap(), "[1,0,0,1,0,1]");
    }
}
