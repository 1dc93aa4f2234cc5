//! Error types for the enrollment SDK

use thiserror::Error;

/// Failures while converting between wallet key formats.
///
/// These are reported to the user at the call site and never abort the
/// process.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("empty input")]
    Empty,

    #[error("invalid base58 string: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected a JSON array of byte values")]
    NotAByteArray,

    #[error("byte value out of range: {0}")]
    ByteOutOfRange(i64),

    #[error("expected {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

/// Failures while deriving a program address.
#[derive(Error, Debug)]
pub enum PdaError {
    #[error("at least one seed is required")]
    NoSeeds,

    #[error("too many seeds: {0} (max 16)")]
    TooManySeeds(usize),

    #[error("seed {index} is {len} bytes (max 32)")]
    SeedTooLong { index: usize, len: usize },

    /// Every counter value hashed onto the curve. Fatal, never retried.
    #[error("no off-curve address found for the given seeds")]
    Exhausted,
}

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum EnrollError {
    /// Any failure surfaced by the chain client: network, insufficient
    /// funds, or a program-level rejection. Not retried, no rollback of
    /// prior workflow steps.
    #[error("rpc error: {0}")]
    Rpc(String),

    #[error(transparent)]
    Pda(#[from] PdaError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("malformed account data: {0}")]
    Record(String),

    #[error("signer error: {0}")]
    Signer(String),
}

pub type Result<T> = std::result::Result<T, EnrollError>;
