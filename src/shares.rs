//! Two-share containers and the boundary recombination.
//!
//! A secret `v` is carried as `first ^ second == v`. Neither half may be
//! branched on; only [`recombine`] (and [`Shared::recombine`]) ever fold the
//! two halves together, and those are meant for the public boundary only.

use alloc::vec::Vec;

use aead::rand_core::RngCore;
use zeroize::Zeroize;

use crate::error::{Error, Operand, Result};

/// Selects one of the two state shares.
///
/// Public constants are added to exactly one share. Round constants, the
/// S-box complement, the domain separation bit and the `0x80` pad byte go
/// to [`Share::First`]; the initialization vector goes to [`Share::Second`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Share {
    /// Share 1.
    First,
    /// Share 2.
    Second,
}

impl Share {
    /// Share that receives public round constants and complements.
    pub const CONSTANTS: Share = Share::First;
    /// Share whose initial block carries the real IV.
    pub const IV: Share = Share::Second;

    /// Both shares, in order.
    pub const BOTH: [Share; 2] = [Share::First, Share::Second];

    #[inline(always)]
    pub(crate) fn index(self) -> usize {
        match self {
            Share::First => 0,
            Share::Second => 1,
        }
    }

    /// First padding byte appended to this share's data.
    pub(crate) fn padding_byte(self) -> u8 {
        if self == Share::CONSTANTS {
            0x80
        } else {
            0x00
        }
    }
}

/// A value split into two XOR shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Shared<T> {
    /// Share 1.
    pub first: T,
    /// Share 2.
    pub second: T,
}

impl<T> Shared<T> {
    /// Pairs two shares.
    pub const fn new(first: T, second: T) -> Self {
        Self { first, second }
    }

    /// One of the two shares.
    #[inline(always)]
    pub fn get(&self, share: Share) -> &T {
        match share {
            Share::First => &self.first,
            Share::Second => &self.second,
        }
    }

    /// One of the two shares, mutably.
    #[inline(always)]
    pub fn get_mut(&mut self, share: Share) -> &mut T {
        match share {
            Share::First => &mut self.first,
            Share::Second => &mut self.second,
        }
    }
}

impl Shared<u64> {
    /// Lanewise XOR of two shared words.
    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Self::new(self.first ^ other.first, self.second ^ other.second)
    }

    /// Rotates each share right by `n` bits.
    #[inline(always)]
    pub fn rotate_right(self, n: u32) -> Self {
        Self::new(self.first.rotate_right(n), self.second.rotate_right(n))
    }

    /// Unmasked word.
    pub fn recombine(self) -> u64 {
        self.first ^ self.second
    }
}

impl<'a> Shared<&'a [u8]> {
    /// Common length of the two shares.
    pub fn checked_len(&self, operand: Operand) -> Result<usize> {
        if self.first.len() != self.second.len() {
            return Err(Error::ShareLengthMismatch {
                operand,
                first: self.first.len(),
                second: self.second.len(),
            });
        }
        Ok(self.first.len())
    }
}

/// Owned byte shares, as produced by the cipher.
pub type SharedBytes = Shared<Vec<u8>>;

impl SharedBytes {
    /// Splits `value` with a uniformly random first share.
    pub fn split<R: RngCore + ?Sized>(value: &[u8], rng: &mut R) -> Self {
        let mut first = alloc::vec![0u8; value.len()];
        rng.fill_bytes(&mut first);
        let second = first.iter().zip(value).map(|(m, v)| m ^ v).collect();
        Self { first, second }
    }

    /// Splits `value` with an all-zero first share.
    ///
    /// With zero masking randomness this makes the masked core compute the
    /// unmasked cipher in share 2.
    pub fn trivial(value: &[u8]) -> Self {
        Self {
            first: alloc::vec![0u8; value.len()],
            second: value.to_vec(),
        }
    }

    /// Borrowed view of both shares.
    pub fn as_slices(&self) -> Shared<&[u8]> {
        Shared::new(self.first.as_slice(), self.second.as_slice())
    }

    /// Length of share 1 (both shares are the same length when built here).
    pub fn len(&self) -> usize {
        self.first.len()
    }

    /// `true` when both shares are empty.
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Unmasked value.
    pub fn recombine(&self) -> Result<Vec<u8>> {
        recombine(&self.first, &self.second)
    }
}

impl<T: Zeroize> Zeroize for Shared<T> {
    fn zeroize(&mut self) {
        self.first.zeroize();
        self.second.zeroize();
    }
}

/// XORs two equal-length byte shares into the unmasked value.
///
/// Only for outputs crossing the public boundary (ciphertext, tag); never
/// for intermediate state.
pub fn recombine(first: &[u8], second: &[u8]) -> Result<Vec<u8>> {
    if first.len() != second.len() {
        return Err(Error::ShareLengthMismatch {
            operand: Operand::Ciphertext,
            first: first.len(),
            second: second.len(),
        });
    }
    Ok(first.iter().zip(second).map(|(a, b)| a ^ b).collect())
}
