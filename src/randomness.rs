//! Caller-supplied masking randomness.
//!
//! The stream is a borrowed word slice plus a cursor. Words are handed out
//! strictly in order and never twice; each masked AND gate consumes exactly
//! one. Independent encryptions must use independent streams.

use alloc::vec::Vec;

use aead::rand_core::RngCore;

use crate::error::{Error, Result};

/// Words consumed by one permutation round (one per S-box AND lane).
pub const WORDS_PER_ROUND: usize = 5;

/// Sequential cursor over masking randomness.
#[derive(Debug)]
pub struct RandomnessStream<'a> {
    words: &'a [u64],
    position: usize,
}

impl<'a> RandomnessStream<'a> {
    /// Starts a stream at the first word of `words`.
    pub fn new(words: &'a [u64]) -> Self {
        Self { words, position: 0 }
    }

    /// Words not yet consumed.
    pub fn remaining(&self) -> usize {
        self.words.len() - self.position
    }

    /// Words consumed so far.
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Fails unless at least `required` words remain.
    pub fn ensure(&self, required: usize) -> Result<()> {
        if self.remaining() < required {
            return Err(Error::RandomnessUnderflow {
                required,
                available: self.remaining(),
            });
        }
        Ok(())
    }

    /// Takes the next `n` words, advancing the cursor.
    pub fn take(&mut self, n: usize) -> Result<&'a [u64]> {
        self.ensure(n)?;
        let words = self.words;
        let taken = &words[self.position..self.position + n];
        self.position += n;
        Ok(taken)
    }
}

/// Draws `n` fresh masking words from `rng`.
pub fn fresh_words<R: RngCore + ?Sized>(rng: &mut R, n: usize) -> Vec<u64> {
    (0..n).map(|_| rng.next_u64()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_advances_in_order() {
        let words = [1u64, 2, 3, 4, 5, 6, 7];
        let mut stream = RandomnessStream::new(&words);
        assert_eq!(stream.take(5).unwrap(), &[1, 2, 3, 4, 5]);
        assert_eq!(stream.consumed(), 5);
        assert_eq!(stream.take(2).unwrap(), &[6, 7]);
        assert_eq!(stream.remaining(), 0);
    }

    #[test]
    fn underflow_does_not_move_the_cursor() {
        let words = [0u64; 4];
        let mut stream = RandomnessStream::new(&words);
        assert_eq!(
            stream.take(WORDS_PER_ROUND),
            Err(Error::RandomnessUnderflow {
                required: 5,
                available: 4
            })
        );
        assert_eq!(stream.consumed(), 0);
    }
}
