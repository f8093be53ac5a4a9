//! Cipher parameter sets.

use crate::error::{Error, Result};

/// Nonce size in bytes, shared by every parameter set.
pub const NONCE_SIZE: usize = 16;

/// Tag size in bytes.
pub const TAG_SIZE: usize = 16;

/// Upper bound on permutation rounds; round constants are indexed in `0..12`.
pub const MAX_ROUNDS: usize = 12;

/// Key length, rate and round counts of an Ascon AEAD instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Parameters {
    key_len: usize,
    rate: usize,
    pa: usize,
    pb: usize,
}

/// Ascon-128: 128-bit key, 64-bit rate, 12/6 rounds.
pub const ASCON_128: Parameters = Parameters {
    key_len: 16,
    rate: 8,
    pa: 12,
    pb: 6,
};

/// Ascon-128a: 128-bit key, 128-bit rate, 12/8 rounds.
pub const ASCON_128A: Parameters = Parameters {
    key_len: 16,
    rate: 16,
    pa: 12,
    pb: 8,
};

/// Ascon-80pq: 160-bit key, 64-bit rate, 12/6 rounds.
pub const ASCON_80PQ: Parameters = Parameters {
    key_len: 20,
    rate: 8,
    pa: 12,
    pb: 6,
};

impl Parameters {
    /// Builds a custom parameter set.
    ///
    /// `pa` drives initialization and finalization, `pb` every absorbed
    /// block in between.
    pub fn new(key_len: usize, rate: usize, pa: usize, pb: usize) -> Result<Self> {
        if key_len != 16 && key_len != 20 {
            return Err(Error::InvalidKeyLength(key_len));
        }
        if rate != 8 && rate != 16 {
            return Err(Error::InvalidRate(rate));
        }
        check_rounds(pa)?;
        check_rounds(pb)?;
        Ok(Self {
            key_len,
            rate,
            pa,
            pb,
        })
    }

    /// Key length in bytes.
    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Rate in bytes.
    pub fn rate(&self) -> usize {
        self.rate
    }

    /// Rate in 64-bit words.
    pub fn rate_words(&self) -> usize {
        self.rate / 8
    }

    /// Initialization / finalization rounds.
    pub fn pa(&self) -> usize {
        self.pa
    }

    /// Rounds per absorbed block.
    pub fn pb(&self) -> usize {
        self.pb
    }

    /// Width of the IV prefix in the 40-byte initial state block.
    pub(crate) fn iv_len(&self) -> usize {
        40 - self.key_len - NONCE_SIZE
    }

    /// Writes the IV prefix: `k, r, a, b` followed by zero padding.
    pub(crate) fn write_iv(&self, out: &mut [u8]) {
        out.iter_mut().for_each(|b| *b = 0);
        out[0] = (self.key_len * 8) as u8;
        out[1] = (self.rate * 8) as u8;
        out[2] = self.pa as u8;
        out[3] = self.pb as u8;
    }
}

impl Default for Parameters {
    fn default() -> Self {
        ASCON_128
    }
}

pub(crate) fn check_rounds(rounds: usize) -> Result<()> {
    if rounds == 0 || rounds > MAX_ROUNDS {
        return Err(Error::InvalidRounds(rounds));
    }
    Ok(())
}
