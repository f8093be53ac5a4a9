//! Conventional AEAD interface over the masked core.
//!
//! Every call splits the key, nonce, associated data and message into fresh
//! random shares, draws a fresh randomness stream from the OS RNG, runs the
//! two-share pipeline and recombines ciphertext and tag at the boundary.
//!
//! ### Usage
//!
//! ```
//! use aead::{AeadInPlace, KeyInit};
//! use ascon_dom::dom_aead::Ascon128Dom;
//!
//! let key = Ascon128Dom::generate_key(&mut aead::OsRng);
//! let nonce = Ascon128Dom::generate_nonce();
//! let cipher = Ascon128Dom::new(&key);
//!
//! let mut buffer = b"power trace".to_vec();
//! let tag = cipher
//!     .encrypt_in_place_detached(&nonce, b"ad", &mut buffer)
//!     .unwrap();
//! cipher
//!     .decrypt_in_place_detached(&nonce, b"ad", &mut buffer, &tag)
//!     .unwrap();
//! assert_eq!(&buffer, b"power trace");
//! ```

use alloc::vec::Vec;
use core::marker::PhantomData;

use aead::{
    consts::{U0, U16, U20},
    generic_array::{ArrayLength, GenericArray},
    rand_core::RngCore,
    AeadCore, AeadInPlace, Key, KeyInit, KeySizeUser, Nonce, OsRng, Tag,
};
use zeroize::{Zeroize, Zeroizing};

use crate::masked::{Inputs, MaskedAscon};
use crate::params::{Parameters, ASCON_128, ASCON_128A, ASCON_80PQ};
use crate::randomness::{fresh_words, RandomnessStream};
use crate::shares::SharedBytes;

/// Parameter set selected at the type level.
pub trait Variant: Clone {
    /// Key size in bytes.
    type KeySize: ArrayLength<u8>;
    /// Matching runtime parameters.
    const PARAMS: Parameters;
}

/// Ascon-128 parameters.
#[derive(Debug, Clone, Copy)]
pub struct Ascon128;
impl Variant for Ascon128 {
    type KeySize = U16;
    const PARAMS: Parameters = ASCON_128;
}

/// Ascon-128a parameters.
#[derive(Debug, Clone, Copy)]
pub struct Ascon128a;
impl Variant for Ascon128a {
    type KeySize = U16;
    const PARAMS: Parameters = ASCON_128A;
}

/// Ascon-80pq parameters.
#[derive(Debug, Clone, Copy)]
pub struct Ascon80pq;
impl Variant for Ascon80pq {
    type KeySize = U20;
    const PARAMS: Parameters = ASCON_80PQ;
}

/// Masked Ascon behind the `aead` traits.
#[derive(Clone)]
pub struct DomAead<V: Variant> {
    key: Zeroizing<Vec<u8>>,
    _variant: PhantomData<V>,
}

/// Masked Ascon-128.
pub type Ascon128Dom = DomAead<Ascon128>;
/// Masked Ascon-128a.
pub type Ascon128aDom = DomAead<Ascon128a>;
/// Masked Ascon-80pq.
pub type Ascon80pqDom = DomAead<Ascon80pq>;

impl<V: Variant> KeySizeUser for DomAead<V> {
    type KeySize = V::KeySize;
}

impl<V: Variant> KeyInit for DomAead<V> {
    fn new(key: &Key<Self>) -> Self {
        Self {
            key: Zeroizing::new(key.to_vec()),
            _variant: PhantomData,
        }
    }
}

impl<V: Variant> AeadCore for DomAead<V> {
    type NonceSize = U16;
    type TagSize = U16;
    type CiphertextOverhead = U0;
}

impl<V: Variant> AeadInPlace for DomAead<V> {
    fn encrypt_in_place_detached(
        &self,
        nonce: &Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> aead::Result<Tag<Self>> {
        let mut shares = self.split(nonce, associated_data, buffer);
        let cipher = MaskedAscon::new(V::PARAMS);
        let words = fresh_words(
            &mut OsRng,
            cipher.required_words(associated_data.len(), buffer.len()),
        );

        let out = cipher.encrypt(&shares.inputs(), &mut RandomnessStream::new(&words))?;
        shares.zeroize();

        buffer.copy_from_slice(&out.ciphertext()?);
        Ok(GenericArray::clone_from_slice(&out.tag()?))
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &Tag<Self>,
    ) -> aead::Result<()> {
        let mut shares = self.split(nonce, associated_data, buffer);
        let cipher = MaskedAscon::new(V::PARAMS);
        let words = fresh_words(
            &mut OsRng,
            cipher.required_words(associated_data.len(), buffer.len()),
        );

        let result = cipher.decrypt(&shares.inputs(), tag, &mut RandomnessStream::new(&words));
        shares.zeroize();

        let mut plaintext = result?;
        buffer.copy_from_slice(&Zeroizing::new(plaintext.recombine()?));
        plaintext.zeroize();
        Ok(())
    }
}

impl<V: Variant> DomAead<V> {
    /// Randomly generates a new nonce using the OsRng.
    pub fn generate_nonce() -> Nonce<Self> {
        let mut nonce = Nonce::<Self>::default();
        OsRng.fill_bytes(&mut nonce);
        nonce
    }

    fn split(&self, nonce: &[u8], associated_data: &[u8], message: &[u8]) -> CallShares {
        let mut rng = OsRng;
        CallShares {
            key: SharedBytes::split(&self.key, &mut rng),
            nonce: SharedBytes::split(nonce, &mut rng),
            associated_data: SharedBytes::split(associated_data, &mut rng),
            message: SharedBytes::split(message, &mut rng),
        }
    }
}

/// Owned shares of one facade call.
struct CallShares {
    key: SharedBytes,
    nonce: SharedBytes,
    associated_data: SharedBytes,
    message: SharedBytes,
}

impl CallShares {
    fn inputs(&self) -> Inputs<'_> {
        Inputs {
            key: self.key.as_slices(),
            nonce: self.nonce.as_slices(),
            associated_data: self.associated_data.as_slices(),
            message: self.message.as_slices(),
        }
    }
}

impl Zeroize for CallShares {
    fn zeroize(&mut self) {
        self.key.zeroize();
        self.nonce.zeroize();
        self.associated_data.zeroize();
        self.message.zeroize();
    }
}
