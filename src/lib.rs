#![doc = include_str!("../README.md")]
#![no_std]
#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod acquisition;
mod dom;
#[cfg(feature = "getrandom")]
pub mod dom_aead;
pub mod encoding;
mod error;
mod masked;
mod observer;
mod params;
mod permutation;
mod randomness;
pub mod register;
mod shares;
mod state;

pub use dom::dom_and;
pub use error::{Error, Operand, Result};
pub use masked::{Inputs, MaskedAscon, MaskedOutput};
pub use observer::{LogObserver, NoObserver, Observer, Stage};
pub use params::{Parameters, ASCON_128, ASCON_128A, ASCON_80PQ, MAX_ROUNDS, NONCE_SIZE, TAG_SIZE};
pub use permutation::{permute, round_constant};
pub use randomness::{fresh_words, RandomnessStream, WORDS_PER_ROUND};
pub use shares::{recombine, Share, Shared, SharedBytes};
pub use state::{StatePair, STATE_WORDS};
