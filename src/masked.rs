//! Two-share Ascon AEAD pipeline.
//!
//! Initialization, associated data, message and finalization run in order on
//! a [`StatePair`], each permutation call pulling its words from the caller's
//! [`RandomnessStream`]. Every input is validated, and the stream is checked
//! against [`MaskedAscon::required_words`], before any state exists.
//!
//! ### Usage
//!
//! ```
//! use ascon_dom::{Inputs, MaskedAscon, RandomnessStream, Shared, ASCON_128};
//!
//! let cipher = MaskedAscon::new(ASCON_128);
//! let inputs = Inputs {
//!     key: Shared::new(&[0u8; 16][..], &[0u8; 16][..]),
//!     nonce: Shared::new(&[0u8; 16][..], &[0u8; 16][..]),
//!     associated_data: Shared::new(&[][..], &[][..]),
//!     message: Shared::new(&[][..], &[][..]),
//! };
//!
//! let words = vec![0u64; cipher.required_words(0, 0)];
//! let mut randomness = RandomnessStream::new(&words);
//! let out = cipher.encrypt(&inputs, &mut randomness).unwrap();
//! assert_eq!(out.tag.len(), 16);
//! assert_eq!(randomness.remaining(), 0);
//! ```

use alloc::vec::Vec;

use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::encoding::{block_to_state, key_state, load_word, pad, store_word, words_to_bytes};
use crate::error::{Error, Operand, Result};
use crate::observer::{NoObserver, Observer, Stage};
use crate::params::{Parameters, NONCE_SIZE, TAG_SIZE};
use crate::permutation::permute;
use crate::randomness::{RandomnessStream, WORDS_PER_ROUND};
use crate::shares::{Share, Shared, SharedBytes};
use crate::state::{StatePair, STATE_WORDS};

/// Two-share operands of one AEAD call.
///
/// `message` is the plaintext for [`MaskedAscon::encrypt`] and the ciphertext
/// for [`MaskedAscon::decrypt`].
#[derive(Debug, Clone, Copy)]
pub struct Inputs<'a> {
    /// Key shares (16 or 20 bytes each, per the parameter set).
    pub key: Shared<&'a [u8]>,
    /// Nonce shares (16 bytes each).
    pub nonce: Shared<&'a [u8]>,
    /// Associated data shares.
    pub associated_data: Shared<&'a [u8]>,
    /// Plaintext or ciphertext shares.
    pub message: Shared<&'a [u8]>,
}

/// Two-share result of a masked encryption.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedOutput {
    /// Ciphertext shares, as long as the plaintext.
    pub ciphertext: SharedBytes,
    /// Tag shares, 16 bytes each.
    pub tag: SharedBytes,
}

impl MaskedOutput {
    /// Recombined ciphertext.
    pub fn ciphertext(&self) -> Result<Vec<u8>> {
        self.ciphertext.recombine()
    }

    /// Recombined tag.
    pub fn tag(&self) -> Result<[u8; TAG_SIZE]> {
        let tag = self.tag.recombine()?;
        let mut out = [0u8; TAG_SIZE];
        if tag.len() != TAG_SIZE {
            return Err(Error::ShareLengthMismatch {
                operand: Operand::Tag,
                first: tag.len(),
                second: TAG_SIZE,
            });
        }
        out.copy_from_slice(&tag);
        Ok(out)
    }

    /// Recombined `ciphertext || tag`.
    pub fn recombined(&self) -> Result<Vec<u8>> {
        let mut out = self.ciphertext()?;
        out.extend_from_slice(&self.tag()?);
        Ok(out)
    }

    /// Per-share `ciphertext || tag`, the layout read back from the device.
    pub fn into_shares(self) -> SharedBytes {
        let MaskedOutput {
            ciphertext: mut c,
            tag: t,
        } = self;
        c.first.extend_from_slice(&t.first);
        c.second.extend_from_slice(&t.second);
        c
    }
}

/// Validated operand lengths.
struct Lengths {
    associated_data: usize,
    message: usize,
}

/// First-order DOM-masked Ascon AEAD.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaskedAscon {
    params: Parameters,
}

impl MaskedAscon {
    /// Cipher over the given parameter set.
    pub const fn new(params: Parameters) -> Self {
        Self { params }
    }

    /// Parameter set in use.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Randomness words consumed by one call with the given lengths.
    ///
    /// `5·pa` for initialization and again for finalization, plus `5·pb` per
    /// padded associated data block (none if it is empty) and per message
    /// block except the last.
    pub fn required_words(&self, associated_data_len: usize, message_len: usize) -> usize {
        let rate = self.params.rate();
        let ad_blocks = if associated_data_len == 0 {
            0
        } else {
            associated_data_len / rate + 1
        };
        let message_blocks = message_len / rate;
        WORDS_PER_ROUND
            * (2 * self.params.pa() + self.params.pb() * (ad_blocks + message_blocks))
    }

    /// Encrypts two-share plaintext.
    pub fn encrypt(
        &self,
        inputs: &Inputs<'_>,
        randomness: &mut RandomnessStream<'_>,
    ) -> Result<MaskedOutput> {
        self.encrypt_observed(inputs, randomness, &mut NoObserver)
    }

    /// [`encrypt`](Self::encrypt), reporting intermediate states to `observer`.
    pub fn encrypt_observed<O: Observer + ?Sized>(
        &self,
        inputs: &Inputs<'_>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<MaskedOutput> {
        let lengths = self.validate(inputs, Operand::Plaintext)?;
        let required = self.required_words(lengths.associated_data, lengths.message);
        randomness.ensure(required)?;
        log::debug!(
            "masked encryption: {} bytes associated data, {} bytes plaintext, {} randomness words",
            lengths.associated_data,
            lengths.message,
            required
        );

        let mut state = self.initialize(inputs, randomness, observer)?;
        self.absorb_associated_data(&mut state, inputs.associated_data, randomness, observer)?;
        let ciphertext = self.absorb_plaintext(&mut state, inputs.message, randomness, observer)?;
        let tag = self.finalize(&mut state, inputs.key, randomness, observer)?;

        Ok(MaskedOutput { ciphertext, tag })
    }

    /// Decrypts two-share ciphertext and checks the recombined tag.
    ///
    /// Plaintext shares are only released when the tag matches.
    pub fn decrypt(
        &self,
        inputs: &Inputs<'_>,
        tag: &[u8],
        randomness: &mut RandomnessStream<'_>,
    ) -> Result<SharedBytes> {
        self.decrypt_observed(inputs, tag, randomness, &mut NoObserver)
    }

    /// [`decrypt`](Self::decrypt), reporting intermediate states to `observer`.
    pub fn decrypt_observed<O: Observer + ?Sized>(
        &self,
        inputs: &Inputs<'_>,
        tag: &[u8],
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<SharedBytes> {
        let lengths = self.validate(inputs, Operand::Ciphertext)?;
        let required = self.required_words(lengths.associated_data, lengths.message);
        randomness.ensure(required)?;
        log::debug!(
            "masked decryption: {} bytes associated data, {} bytes ciphertext, {} randomness words",
            lengths.associated_data,
            lengths.message,
            required
        );

        let mut state = self.initialize(inputs, randomness, observer)?;
        self.absorb_associated_data(&mut state, inputs.associated_data, randomness, observer)?;
        let mut plaintext =
            self.absorb_ciphertext(&mut state, inputs.message, randomness, observer)?;
        let computed = self.finalize(&mut state, inputs.key, randomness, observer)?;

        let computed = Zeroizing::new(computed.recombine()?);
        if !bool::from(computed.as_slice().ct_eq(tag)) {
            log::debug!("masked decryption: tag mismatch");
            plaintext.zeroize();
            return Err(Error::TagMismatch);
        }
        Ok(plaintext)
    }

    fn validate(&self, inputs: &Inputs<'_>, message: Operand) -> Result<Lengths> {
        let key_len = inputs.key.checked_len(Operand::Key)?;
        if key_len != self.params.key_len() {
            return Err(Error::InvalidKeyLength(key_len));
        }
        let nonce_len = inputs.nonce.checked_len(Operand::Nonce)?;
        if nonce_len != NONCE_SIZE {
            return Err(Error::InvalidNonceLength(nonce_len));
        }
        Ok(Lengths {
            associated_data: inputs
                .associated_data
                .checked_len(Operand::AssociatedData)?,
            message: inputs.message.checked_len(message)?,
        })
    }

    /// Loads `IV || key || nonce` (real IV in share 2, zero IV in share 1),
    /// permutes, then adds the key to the low state words.
    fn initialize<O: Observer + ?Sized>(
        &self,
        inputs: &Inputs<'_>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<StatePair> {
        let iv_len = self.params.iv_len();
        let key_end = iv_len + self.params.key_len();

        let mut state = StatePair::default();
        for share in Share::BOTH {
            let mut block = Zeroizing::new([0u8; 40]);
            if share == Share::IV {
                self.params.write_iv(&mut block[..iv_len]);
            }
            block[iv_len..key_end].copy_from_slice(inputs.key.get(share));
            block[key_end..].copy_from_slice(inputs.nonce.get(share));
            *state.share_mut(share) = block_to_state(&block);
        }

        permute(&mut state, randomness, self.params.pa(), observer)?;

        let key = Shared::new(
            Zeroizing::new(key_state(inputs.key.first)),
            Zeroizing::new(key_state(inputs.key.second)),
        );
        for i in 0..STATE_WORDS {
            state.xor_shared(i, Shared::new(key.first[i], key.second[i]));
        }
        observer.observe(Stage::Initialization, &state);
        Ok(state)
    }

    fn absorb_associated_data<O: Observer + ?Sized>(
        &self,
        state: &mut StatePair,
        associated_data: Shared<&[u8]>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<()> {
        if !associated_data.first.is_empty() {
            let rate = self.params.rate();
            let padded = self.pad_shares(associated_data);
            for block in padded.first.chunks_exact(rate).zip(padded.second.chunks_exact(rate)) {
                self.absorb_block(state, Shared::new(block.0, block.1));
                permute(state, randomness, self.params.pb(), observer)?;
            }
        }
        state.xor_word(Share::CONSTANTS, 4, 1);
        observer.observe(Stage::AssociatedData, state);
        Ok(())
    }

    fn absorb_plaintext<O: Observer + ?Sized>(
        &self,
        state: &mut StatePair,
        plaintext: Shared<&[u8]>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<SharedBytes> {
        let rate = self.params.rate();
        let padded = self.pad_shares(plaintext);
        let blocks = padded.first.len() / rate;

        let mut ciphertext = SharedBytes::new(
            Vec::with_capacity(padded.first.len()),
            Vec::with_capacity(padded.second.len()),
        );
        let pairs = padded.first.chunks_exact(rate).zip(padded.second.chunks_exact(rate));
        for (i, block) in pairs.enumerate() {
            self.absorb_block(state, Shared::new(block.0, block.1));
            for share in Share::BOTH {
                ciphertext
                    .get_mut(share)
                    .extend_from_slice(&words_to_bytes(&state.share(share)[..rate / 8]));
            }
            if i + 1 < blocks {
                permute(state, randomness, self.params.pb(), observer)?;
            }
        }
        ciphertext.first.truncate(plaintext.first.len());
        ciphertext.second.truncate(plaintext.second.len());

        observer.observe(Stage::Plaintext, state);
        Ok(ciphertext)
    }

    fn absorb_ciphertext<O: Observer + ?Sized>(
        &self,
        state: &mut StatePair,
        ciphertext: Shared<&[u8]>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<SharedBytes> {
        let rate = self.params.rate();
        let rate_words = self.params.rate_words();
        let full = ciphertext.first.len() / rate * rate;

        let mut plaintext = SharedBytes::new(
            Vec::with_capacity(ciphertext.first.len()),
            Vec::with_capacity(ciphertext.second.len()),
        );
        for offset in (0..full).step_by(rate) {
            for share in Share::BOTH {
                let block = &ciphertext.get(share)[offset..offset + rate];
                let out = plaintext.get_mut(share);
                let s = state.share_mut(share);
                for (w, chunk) in block.chunks_exact(8).enumerate() {
                    let c = load_word(chunk);
                    out.extend_from_slice(&store_word(s[w] ^ c));
                    s[w] = c;
                }
            }
            permute(state, randomness, self.params.pb(), observer)?;
        }

        let last = ciphertext.first.len() - full;
        for share in Share::BOTH {
            let tail = &ciphertext.get(share)[full..];
            let out = plaintext.get_mut(share);
            let mut rate_bytes = Zeroizing::new(words_to_bytes(&state.share(share)[..rate_words]));
            for (s, c) in rate_bytes.iter_mut().zip(tail) {
                out.push(*s ^ c);
                *s = *c;
            }
            rate_bytes[last] ^= share.padding_byte();
            for (w, chunk) in rate_bytes.chunks_exact(8).enumerate() {
                state.share_mut(share)[w] = load_word(chunk);
            }
        }

        observer.observe(Stage::Plaintext, state);
        Ok(plaintext)
    }

    /// Adds the key after the rate, permutes, adds the key tail to words 3
    /// and 4 and reads those words out as the tag shares.
    fn finalize<O: Observer + ?Sized>(
        &self,
        state: &mut StatePair,
        key: Shared<&[u8]>,
        randomness: &mut RandomnessStream<'_>,
        observer: &mut O,
    ) -> Result<SharedBytes> {
        let r = self.params.rate_words();
        for share in Share::BOTH {
            let k = key.get(share);
            state.xor_word(share, r, load_word(&k[..8]));
            state.xor_word(share, r + 1, load_word(&k[8..16]));
            state.xor_word(share, r + 2, load_word(&k[16..]));
        }

        permute(state, randomness, self.params.pa(), observer)?;

        let mut tag = SharedBytes::default();
        for share in Share::BOTH {
            let k = key.get(share);
            let n = k.len();
            state.xor_word(share, 3, load_word(&k[n - 16..n - 8]));
            state.xor_word(share, 4, load_word(&k[n - 8..]));
            tag.get_mut(share)
                .extend_from_slice(&words_to_bytes(&state.share(share)[3..]));
        }
        observer.observe(Stage::Finalization, state);
        Ok(tag)
    }

    fn absorb_block(&self, state: &mut StatePair, block: Shared<&[u8]>) {
        for (w, chunks) in block
            .first
            .chunks_exact(8)
            .zip(block.second.chunks_exact(8))
            .enumerate()
        {
            state.xor_shared(w, Shared::new(load_word(chunks.0), load_word(chunks.1)));
        }
    }

    fn pad_shares(&self, data: Shared<&[u8]>) -> Shared<Zeroizing<Vec<u8>>> {
        let rate = self.params.rate();
        Shared::new(
            Zeroizing::new(pad(data.first, rate, Share::First)),
            Zeroizing::new(pad(data.second, rate, Share::Second)),
        )
    }
}
