//! Input preparation for RSA + SHA-256 email proof circuits.
//!
//! A downstream constraint system proves "this RSA signature over this
//! SHA-256-hashed message is valid" without revealing the message. Circuits
//! cannot have variable-size wires, so everything they consume has to arrive
//! fixed-width and field-constrained. This crate does that conversion: it
//! reproduces SHA-256 message padding into statically sized buffers, splits
//! the 2048-bit RSA values and the field-reduced header digest into 121-bit
//! decimal-string limbs, finds the claimed body hash inside the signed
//! headers, and emits the input record matching the requested circuit.
//!
//! Nothing here verifies anything. DKIM verification and key parsing sit
//! behind the [`dkim::DkimVerifier`] boundary and are trusted.

pub mod dkim;
pub mod error;
pub mod input_gen;
pub mod profile;

pub use error::InputError;
pub use input_gen::{generate_circuit_inputs, CircuitInputs, CircuitType};
pub use profile::CircuitProfile;
