//! # tinya51
//!
//! TinyA5/1: a miniature stream cipher modeled on GSM A5/1, built for
//! teaching.
//!
//! Three short shift registers (X: 6 bits, Y: 8, Z: 9) are loaded from a
//! 23-bit key. For every data bit, the registers whose control bit agrees
//! with the majority are clocked, one output bit is read from each, and
//! their XOR is the keystream bit. Every step can be captured in a `Trace`
//! for step-by-step display.
//!
//! This is not a secure cipher. The registers are far too short.
//!
//! ```
//! use tinya51::{codec, Key};
//!
//! let key: Key = "10010101001110100110000".parse().unwrap();
//! let plaintext = codec::letters_to_bits("H").unwrap();
//!
//! let ciphertext = tinya51::encrypt(&key, &plaintext).unwrap();
//! assert_eq!(codec::bits_to_letters(&ciphertext).unwrap(), "D");
//!
//! let recovered = tinya51::decrypt(&key, &ciphertext).unwrap();
//! assert_eq!(recovered, plaintext);
//! ```
//!
//! ## Public API
//!
//! The engine is `load_key` plus `process`. Everything else is a
//! convenience built on those two.

pub mod cipher;
pub mod codec;
pub mod error;
pub mod journal;
pub(crate) mod keys;
pub mod register;
pub mod state;
pub mod trace;

pub use cipher::{
    decrypt, encrypt, keystream, majority, process, run, step, Keystream, RunResult,
};
pub use error::TinyA51Error;
pub use keys::{generate_key, load_key, Key};
pub use state::CipherState;
pub use trace::{ControlBits, Play, Rotation, StepRecord, Trace, TraceCursor};
