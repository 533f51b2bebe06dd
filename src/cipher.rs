//! The cipher engine: majority clocking, the step function and stream
//! processing.
//!
//! One step, in order:
//! 1. Read the control bits from the current state.
//! 2. Take their majority.
//! 3. Clock every register whose control bit equals the majority.
//! 4. Read the keystream bit from the clocked state.
//! 5. XOR it into the data bit.
//!
//! Encryption and decryption are the same call. The keystream depends only
//! on the key and the step count, so running ciphertext through `process`
//! with the same key yields the plaintext.

use serde::Serialize;

use crate::codec;
use crate::error::TinyA51Error;
use crate::keys::Key;
use crate::register::Register;
use crate::state::CipherState;
use crate::trace::{ControlBits, Rotation, StepRecord, Trace};

/// The bit held by at least two of the three inputs.
pub fn majority(a: u8, b: u8, c: u8) -> u8 {
    (a & b) | (a & c) | (b & c)
}

/// The clocking half of a step, shared by `step` and `Keystream`.
struct Clocked {
    control: ControlBits,
    majority: u8,
    rotated: Rotation,
    next: CipherState,
}

fn clock(state: &CipherState) -> Clocked {
    let control = ControlBits::read(state);
    let majority = majority(control.x, control.y, control.z);
    let rotated = Rotation {
        x: control.x == majority,
        y: control.y == majority,
        z: control.z == majority,
    };

    let advance = |register: &Register, rotate: bool| {
        if rotate {
            register.rotated()
        } else {
            register.clone()
        }
    };
    let next = CipherState::from_registers(
        advance(state.x(), rotated.x),
        advance(state.y(), rotated.y),
        advance(state.z(), rotated.z),
    );

    Clocked {
        control,
        majority,
        rotated,
        next,
    }
}

/// Process one data bit.
///
/// `index` is recorded in the returned `StepRecord` as the bit's position in
/// its stream. Returns the state the next step starts from.
pub fn step(
    state: &CipherState,
    index: usize,
    data_bit: u8,
) -> Result<(CipherState, StepRecord), TinyA51Error> {
    if data_bit > 1 {
        return Err(TinyA51Error::bit(index, data_bit));
    }

    let Clocked {
        control,
        majority,
        rotated,
        next,
    } = clock(state);
    let keystream_bit = next.keystream_bit();

    let record = StepRecord {
        step: index,
        control,
        majority,
        rotated,
        before: state.clone(),
        after: next.clone(),
        keystream_bit,
        data_bit,
        output_bit: data_bit ^ keystream_bit,
    };
    Ok((next, record))
}

/// Run `data` through the cipher starting from `state`.
///
/// Every data element is validated before the first step runs. Returns the
/// output bits and, when `capture_trace` is set, the full trace.
pub fn process(
    state: &CipherState,
    data: &[u8],
    capture_trace: bool,
) -> Result<(Vec<u8>, Option<Trace>), TinyA51Error> {
    codec::check_bits(data)?;

    if !capture_trace {
        let output = data
            .iter()
            .zip(Keystream::from_state(state.clone()))
            .map(|(d, s)| d ^ s)
            .collect();
        return Ok((output, None));
    }

    let mut current = state.clone();
    let mut output = Vec::with_capacity(data.len());
    let mut steps = Vec::with_capacity(data.len());
    for (index, &bit) in data.iter().enumerate() {
        let (next, record) = step(&current, index, bit)?;
        output.push(record.output_bit);
        steps.push(record);
        current = next;
    }

    Ok((output, Some(Trace::new(state.clone(), steps))))
}

/// Infinite keystream from a starting state.
#[derive(Debug, Clone)]
pub struct Keystream {
    state: CipherState,
}

impl Keystream {
    pub fn new(key: &Key) -> Self {
        Self::from_state(key.load())
    }

    pub fn from_state(state: CipherState) -> Self {
        Self { state }
    }

    /// The state the next bit will be clocked from.
    pub fn state(&self) -> &CipherState {
        &self.state
    }
}

impl Iterator for Keystream {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.state = clock(&self.state).next;
        Some(self.state.keystream_bit())
    }
}

/// The first `n` keystream bits for `key`.
pub fn keystream(key: &Key, n: usize) -> Vec<u8> {
    Keystream::new(key).take(n).collect()
}

/// Outcome of one encrypt or decrypt call, in the shape shells serialize.
///
/// The key is deliberately absent. A captured trace is flattened into the
/// top level, so the JSON carries `input`, `result`, `initial` and `steps`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunResult {
    #[serde(serialize_with = "codec::serialize_bits")]
    pub input: Vec<u8>,
    #[serde(rename = "result", serialize_with = "codec::serialize_bits")]
    pub output: Vec<u8>,
    #[serde(flatten)]
    pub trace: Option<Trace>,
}

/// Load `key` and process `data` from the fresh state.
pub fn run(key: &Key, data: &[u8], capture_trace: bool) -> Result<RunResult, TinyA51Error> {
    let (output, trace) = process(&key.load(), data, capture_trace)?;
    Ok(RunResult {
        input: data.to_vec(),
        output,
        trace,
    })
}

/// Encrypt plaintext bits. Identical to `decrypt`.
pub fn encrypt(key: &Key, plaintext: &[u8]) -> Result<Vec<u8>, TinyA51Error> {
    Ok(process(&key.load(), plaintext, false)?.0)
}

/// Decrypt ciphertext bits. Identical to `encrypt`.
pub fn decrypt(key: &Key, ciphertext: &[u8]) -> Result<Vec<u8>, TinyA51Error> {
    Ok(process(&key.load(), ciphertext, false)?.0)
}
