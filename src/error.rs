use thiserror::Error;

/// Failure modes of the input pipeline. All of these are local computation
/// errors and propagate straight to the caller; nothing here is retried.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    /// The message, once padded, does not fit the configured buffer. The
    /// caller must either raise the maximum or reject the input.
    #[error("message of {len} bytes does not fit the {max} byte padded buffer")]
    OversizedInput { len: usize, max: usize },

    /// An internal consistency check on the padded layout failed. This is an
    /// implementation defect, not bad input.
    #[error("sha256 padding invariant broken: {0}")]
    PaddingInvariant(&'static str),

    /// The claimed body hash is not a substring of the signed headers, so the
    /// inputs are inconsistent with each other.
    #[error("claimed body hash does not occur in the signed headers")]
    BodyHashNotFound,

    /// An unrecognized circuit selector.
    #[error("unknown circuit type `{0}`")]
    UnknownCircuitType(String),

    /// A value needs more limbs than the profile provides.
    #[error("{bits} bit value does not fit {limbs} limbs of {limb_bits} bits")]
    ValueTooWide {
        bits: u64,
        limbs: usize,
        limb_bits: u32,
    },

    /// A limb string is not base-10.
    #[error("limb `{0}` is not a decimal string")]
    MalformedLimb(String),

    /// A circuit profile violates one of its structural constraints.
    #[error("invalid circuit profile: {0}")]
    InvalidProfile(&'static str),

    /// The upstream DKIM oracle rejected the raw email.
    #[error("dkim verification failed: {0}")]
    VerificationFailed(String),
}
