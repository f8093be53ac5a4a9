//! The two-share sponge state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::shares::{Share, Shared};

/// Number of 64-bit words in one share of the state.
pub const STATE_WORDS: usize = 5;

/// Both shares of the 320-bit Ascon state.
///
/// At every phase boundary `share(First)[i] ^ share(Second)[i]` is the
/// unmasked state word `i`.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct StatePair {
    shares: [[u64; STATE_WORDS]; 2],
}

impl StatePair {
    /// Builds a state from the two share arrays.
    pub fn new(first: [u64; STATE_WORDS], second: [u64; STATE_WORDS]) -> Self {
        Self {
            shares: [first, second],
        }
    }

    /// Words of one share.
    #[inline(always)]
    pub fn share(&self, share: Share) -> &[u64; STATE_WORDS] {
        &self.shares[share.index()]
    }

    #[inline(always)]
    pub(crate) fn share_mut(&mut self, share: Share) -> &mut [u64; STATE_WORDS] {
        &mut self.shares[share.index()]
    }

    /// Word `i` of both shares.
    #[inline(always)]
    pub fn word(&self, i: usize) -> Shared<u64> {
        Shared::new(self.shares[0][i], self.shares[1][i])
    }

    /// XORs `value` into word `i` of a single share.
    #[inline(always)]
    pub(crate) fn xor_word(&mut self, share: Share, i: usize, value: u64) {
        self.shares[share.index()][i] ^= value;
    }

    /// XORs a shared word into word `i`, share by share.
    #[inline(always)]
    pub(crate) fn xor_shared(&mut self, i: usize, value: Shared<u64>) {
        self.shares[0][i] ^= value.first;
        self.shares[1][i] ^= value.second;
    }

    /// Applies `f` to each share's words independently.
    #[inline(always)]
    pub(crate) fn for_each_share(&mut self, f: impl FnMut(&mut [u64; STATE_WORDS])) {
        self.shares.iter_mut().for_each(f);
    }

    /// Unmasked state.
    ///
    /// For observation and tests only; the cipher never recombines its state.
    pub fn recombined(&self) -> [u64; STATE_WORDS] {
        core::array::from_fn(|i| self.word(i).recombine())
    }
}

impl core::fmt::Debug for StatePair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("StatePair { .. }")
    }
}
