//! Input generation for side-channel trace campaigns.
//!
//! Produces the two-share operands and masking randomness for each captured
//! trace, and lets the software oracle predict what the device should return.
//! In [`AcquisitionMode::FixedVsRandom`] every even-indexed sample belongs to
//! the fixed class: each secret has two equal shares, so its true value is
//! all zeros, while the shares themselves are still fresh.

use alloc::vec::Vec;

use aead::rand_core::RngCore;

use crate::encoding::words_to_bytes;
use crate::error::Result;
use crate::masked::{Inputs, MaskedAscon, MaskedOutput};
use crate::params::{Parameters, NONCE_SIZE};
use crate::randomness::{fresh_words, RandomnessStream};
use crate::shares::SharedBytes;

/// Default length of the associated data and plaintext in a campaign.
pub const DEFAULT_DATA_LEN: usize = 16;

/// How samples of a campaign are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AcquisitionMode {
    /// All inputs random.
    #[default]
    Random,
    /// Alternating fixed-class and random-class samples.
    FixedVsRandom,
}

/// Population a sample belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleClass {
    /// Shares equal, true values zero.
    Fixed,
    /// Independent random shares.
    Random,
}

/// Operands and randomness for one trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceInput {
    /// Population of this sample.
    pub class: SampleClass,
    /// Key shares.
    pub key: SharedBytes,
    /// Nonce shares.
    pub nonce: SharedBytes,
    /// Associated data shares.
    pub associated_data: SharedBytes,
    /// Plaintext shares.
    pub plaintext: SharedBytes,
    /// Masking randomness, sized for one encryption.
    pub randomness: Vec<u64>,
}

impl TraceInput {
    /// Borrowed operands for the masked pipeline.
    pub fn inputs(&self) -> Inputs<'_> {
        Inputs {
            key: self.key.as_slices(),
            nonce: self.nonce.as_slices(),
            associated_data: self.associated_data.as_slices(),
            message: self.plaintext.as_slices(),
        }
    }

    /// Randomness serialized most-significant byte first.
    pub fn randomness_bytes(&self) -> Vec<u8> {
        words_to_bytes(&self.randomness)
    }

    /// Runs the masked encryption on this sample's own randomness.
    pub fn predict(&self, cipher: &MaskedAscon) -> Result<MaskedOutput> {
        cipher.encrypt(&self.inputs(), &mut RandomnessStream::new(&self.randomness))
    }
}

/// Endless source of [`TraceInput`]s.
#[derive(Debug)]
pub struct InputGenerator<R> {
    rng: R,
    mode: AcquisitionMode,
    cipher: MaskedAscon,
    associated_data_len: usize,
    plaintext_len: usize,
    index: usize,
}

impl<R: RngCore> InputGenerator<R> {
    /// Generator with 16-byte associated data and plaintext.
    pub fn new(rng: R, mode: AcquisitionMode, params: Parameters) -> Self {
        Self {
            rng,
            mode,
            cipher: MaskedAscon::new(params),
            associated_data_len: DEFAULT_DATA_LEN,
            plaintext_len: DEFAULT_DATA_LEN,
            index: 0,
        }
    }

    /// Overrides the associated data and plaintext lengths.
    pub fn with_lengths(mut self, associated_data_len: usize, plaintext_len: usize) -> Self {
        self.associated_data_len = associated_data_len;
        self.plaintext_len = plaintext_len;
        self
    }

    /// Cipher matching the generated shapes.
    pub fn cipher(&self) -> &MaskedAscon {
        &self.cipher
    }

    /// Class of the next sample.
    pub fn next_class(&self) -> SampleClass {
        match self.mode {
            AcquisitionMode::FixedVsRandom if self.index % 2 == 0 => SampleClass::Fixed,
            _ => SampleClass::Random,
        }
    }

    /// Draws the next sample.
    pub fn next_input(&mut self) -> TraceInput {
        let class = self.next_class();
        self.index += 1;

        let key_len = self.cipher.params().key_len();
        let key = self.operand(class, key_len);
        let nonce = self.operand(class, NONCE_SIZE);
        let associated_data = self.operand(class, self.associated_data_len);
        let plaintext = self.operand(class, self.plaintext_len);
        let required = self
            .cipher
            .required_words(self.associated_data_len, self.plaintext_len);
        let randomness = fresh_words(&mut self.rng, required);

        TraceInput {
            class,
            key,
            nonce,
            associated_data,
            plaintext,
            randomness,
        }
    }

    fn operand(&mut self, class: SampleClass, len: usize) -> SharedBytes {
        let mut first = alloc::vec![0u8; len];
        self.rng.fill_bytes(&mut first);
        let second = match class {
            SampleClass::Fixed => first.clone(),
            SampleClass::Random => {
                let mut second = alloc::vec![0u8; len];
                self.rng.fill_bytes(&mut second);
                second
            }
        };
        SharedBytes::new(first, second)
    }
}

impl<R: RngCore> Iterator for InputGenerator<R> {
    type Item = TraceInput;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.next_input())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ASCON_128, ASCON_80PQ};

    /// SplitMix64, enough to make the generator deterministic.
    struct SplitMix(u64);

    impl RngCore for SplitMix {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
            let mut z = self.0;
            z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
            z ^ (z >> 31)
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let word = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&word[..chunk.len()]);
            }
        }
        fn try_fill_bytes(
            &mut self,
            dest: &mut [u8],
        ) -> core::result::Result<(), aead::rand_core::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    #[test]
    fn fixed_vs_random_alternates() {
        let gen = InputGenerator::new(SplitMix(1), AcquisitionMode::FixedVsRandom, ASCON_128);
        let classes: Vec<_> = gen.take(4).map(|t| t.class).collect();
        assert_eq!(
            classes,
            [
                SampleClass::Fixed,
                SampleClass::Random,
                SampleClass::Fixed,
                SampleClass::Random
            ]
        );
    }

    #[test]
    fn fixed_samples_hide_all_zero_secrets() {
        let mut gen = InputGenerator::new(SplitMix(2), AcquisitionMode::FixedVsRandom, ASCON_128);
        let t = gen.next_input();
        assert_eq!(t.class, SampleClass::Fixed);
        for operand in [&t.key, &t.nonce, &t.associated_data, &t.plaintext] {
            assert!(operand.recombine().unwrap().iter().all(|b| *b == 0));
            assert_ne!(operand.first, alloc::vec![0u8; operand.len()]);
        }
    }

    #[test]
    fn random_mode_never_fixes() {
        let mut gen = InputGenerator::new(SplitMix(3), AcquisitionMode::Random, ASCON_128);
        assert!((0..6).all(|_| gen.next_input().class == SampleClass::Random));
    }

    #[test]
    fn shapes_follow_parameters() {
        let mut gen = InputGenerator::new(SplitMix(4), AcquisitionMode::Random, ASCON_80PQ)
            .with_lengths(3, 17);
        let t = gen.next_input();
        assert_eq!(t.key.len(), 20);
        assert_eq!(t.nonce.len(), 16);
        assert_eq!(t.associated_data.len(), 3);
        assert_eq!(t.plaintext.len(), 17);
        assert_eq!(t.randomness.len(), gen.cipher().required_words(3, 17));
        assert_eq!(t.randomness_bytes().len(), 8 * t.randomness.len());
    }

    #[test]
    fn prediction_uses_exactly_the_sample_randomness() {
        let mut gen = InputGenerator::new(SplitMix(5), AcquisitionMode::Random, ASCON_128);
        let t = gen.next_input();
        let out = t.predict(gen.cipher()).unwrap();
        assert_eq!(out.ciphertext.len(), DEFAULT_DATA_LEN);
        assert_eq!(out.tag().unwrap().len(), 16);
    }
}
