//! Error type shared by every stage of the masked cipher.
//!
//! All variants are contract violations detected before any state is built,
//! except [`Error::TagMismatch`], which is the outcome of a failed decryption.

use core::fmt;

/// Which two-share operand a [`Error::ShareLengthMismatch`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Key shares.
    Key,
    /// Nonce shares.
    Nonce,
    /// Associated data shares.
    AssociatedData,
    /// Plaintext shares.
    Plaintext,
    /// Ciphertext shares.
    Ciphertext,
    /// Tag shares.
    Tag,
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operand::Key => "key",
            Operand::Nonce => "nonce",
            Operand::AssociatedData => "associated data",
            Operand::Plaintext => "plaintext",
            Operand::Ciphertext => "ciphertext",
            Operand::Tag => "tag",
        };
        f.write_str(name)
    }
}

/// Masked cipher error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Key length is neither 16 nor 20 bytes.
    InvalidKeyLength(usize),
    /// Nonce length is not 16 bytes.
    InvalidNonceLength(usize),
    /// Permutation round count outside `1..=12`.
    InvalidRounds(usize),
    /// Rate is neither 8 nor 16 bytes.
    InvalidRate(usize),
    /// The two shares of an operand have different lengths.
    ShareLengthMismatch {
        /// Offending operand.
        operand: Operand,
        /// Length of the first share.
        first: usize,
        /// Length of the second share.
        second: usize,
    },
    /// The randomness stream holds fewer words than the operation consumes.
    RandomnessUnderflow {
        /// Words the operation needs.
        required: usize,
        /// Words left in the stream.
        available: usize,
    },
    /// The recombined tag does not match the expected tag.
    TagMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKeyLength(len) => {
                write!(f, "invalid key length: {} bytes (expected 16 or 20)", len)
            }
            Error::InvalidNonceLength(len) => {
                write!(f, "invalid nonce length: {} bytes (expected 16)", len)
            }
            Error::InvalidRounds(rounds) => {
                write!(f, "invalid round count: {} (expected 1..=12)", rounds)
            }
            Error::InvalidRate(rate) => {
                write!(f, "invalid rate: {} bytes (expected 8 or 16)", rate)
            }
            Error::ShareLengthMismatch {
                operand,
                first,
                second,
            } => write!(
                f,
                "{} shares differ in length: {} vs {} bytes",
                operand, first, second
            ),
            Error::RandomnessUnderflow {
                required,
                available,
            } => write!(
                f,
                "randomness stream underflow: {} words required, {} available",
                required, available
            ),
            Error::TagMismatch => write!(f, "authentication tag mismatch"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<Error> for aead::Error {
    fn from(_: Error) -> Self {
        aead::Error
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
