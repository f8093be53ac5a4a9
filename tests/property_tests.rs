//! Property-based tests for the masked Ascon oracle.
//!
//! Outputs must depend only on the recombined inputs, never on how they were
//! split or on the masking randomness.

use proptest::prelude::*;

use ascon_dom::{
    dom_and, Inputs, MaskedAscon, Parameters, RandomnessStream, Shared, SharedBytes, ASCON_128,
    ASCON_128A, ASCON_80PQ,
};

fn params() -> impl Strategy<Value = Parameters> {
    prop_oneof![Just(ASCON_128), Just(ASCON_128A), Just(ASCON_80PQ)]
}

/// Shares `value` under `mask`, which is cycled to the value's length.
fn share(value: &[u8], mask: &[u8]) -> SharedBytes {
    let first: Vec<u8> = value
        .iter()
        .zip(mask.iter().cycle())
        .map(|(_, m)| *m)
        .collect();
    let second = first.iter().zip(value).map(|(m, v)| m ^ v).collect();
    SharedBytes::new(first, second)
}

struct Call {
    key: SharedBytes,
    nonce: SharedBytes,
    associated_data: SharedBytes,
    message: SharedBytes,
}

impl Call {
    fn inputs(&self) -> Inputs<'_> {
        Inputs {
            key: self.key.as_slices(),
            nonce: self.nonce.as_slices(),
            associated_data: self.associated_data.as_slices(),
            message: self.message.as_slices(),
        }
    }
}

mod gate_properties {
    use super::*;

    proptest! {
        /// A DOM gate recombines to the AND of its recombined inputs
        #[test]
        fn dom_and_is_correct(x1: u64, x2: u64, y1: u64, y2: u64, z: u64) {
            let out = dom_and(Shared::new(x1, x2), Shared::new(y1, y2), z);
            prop_assert_eq!(out.recombine(), !(x1 ^ x2) & (y1 ^ y2));
        }
    }
}

mod aead_properties {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Random splitting and randomness give the trivially shared result
        #[test]
        fn output_is_independent_of_masking(
            params in params(),
            key in prop::collection::vec(any::<u8>(), 20),
            nonce in prop::collection::vec(any::<u8>(), 16),
            ad in prop::collection::vec(any::<u8>(), 0..40),
            pt in prop::collection::vec(any::<u8>(), 0..40),
            mask in prop::collection::vec(any::<u8>(), 1..32),
            seed: u64,
        ) {
            let key = &key[..params.key_len()];
            let cipher = MaskedAscon::new(params);
            let required = cipher.required_words(ad.len(), pt.len());

            let masked = Call {
                key: share(key, &mask),
                nonce: share(&nonce, &mask),
                associated_data: share(&ad, &mask),
                message: share(&pt, &mask),
            };
            let words: Vec<u64> = (0..required as u64)
                .map(|i| seed.rotate_left(i as u32 % 64) ^ i)
                .collect();
            let masked_out = cipher
                .encrypt(&masked.inputs(), &mut RandomnessStream::new(&words))
                .unwrap();

            let trivial = Call {
                key: SharedBytes::trivial(key),
                nonce: SharedBytes::trivial(&nonce),
                associated_data: SharedBytes::trivial(&ad),
                message: SharedBytes::trivial(&pt),
            };
            let zeros = vec![0u64; required];
            let trivial_out = cipher
                .encrypt(&trivial.inputs(), &mut RandomnessStream::new(&zeros))
                .unwrap();

            prop_assert_eq!(masked_out.recombined().unwrap(), trivial_out.recombined().unwrap());
            prop_assert_eq!(masked_out.ciphertext.len(), pt.len());
        }

        /// Exactly `required_words` are consumed, whatever the surplus
        #[test]
        fn consumption_matches_formula(
            params in params(),
            ad_len in 0usize..50,
            pt_len in 0usize..50,
            surplus in 0usize..20,
        ) {
            let cipher = MaskedAscon::new(params);
            let required = cipher.required_words(ad_len, pt_len);
            let call = Call {
                key: SharedBytes::trivial(&vec![1u8; params.key_len()]),
                nonce: SharedBytes::trivial(&[2u8; 16]),
                associated_data: SharedBytes::trivial(&vec![3u8; ad_len]),
                message: SharedBytes::trivial(&vec![4u8; pt_len]),
            };
            let words = vec![7u64; required + surplus];
            let mut stream = RandomnessStream::new(&words);
            cipher.encrypt(&call.inputs(), &mut stream).unwrap();
            prop_assert_eq!(stream.consumed(), required);
            prop_assert_eq!(stream.remaining(), surplus);

            if required > 0 {
                let mut short = RandomnessStream::new(&words[..required - 1]);
                prop_assert!(cipher.encrypt(&call.inputs(), &mut short).is_err());
            }
        }

        /// Decrypting a masked encryption returns the plaintext
        #[test]
        fn decrypt_inverts_encrypt(
            params in params(),
            ad in prop::collection::vec(any::<u8>(), 0..24),
            pt in prop::collection::vec(any::<u8>(), 0..48),
            mask in prop::collection::vec(any::<u8>(), 1..16),
        ) {
            let cipher = MaskedAscon::new(params);
            let key = vec![0x42u8; params.key_len()];
            let nonce = [0x24u8; 16];
            let words = vec![0x0123_4567_89ab_cdefu64; cipher.required_words(ad.len(), pt.len())];

            let call = Call {
                key: share(&key, &mask),
                nonce: share(&nonce, &mask),
                associated_data: share(&ad, &mask),
                message: share(&pt, &mask),
            };
            let out = cipher
                .encrypt(&call.inputs(), &mut RandomnessStream::new(&words))
                .unwrap();
            let tag = out.tag().unwrap();

            let back = Call { message: out.ciphertext, ..call };
            let plaintext = cipher
                .decrypt(&back.inputs(), &tag, &mut RandomnessStream::new(&words))
                .unwrap();
            prop_assert_eq!(plaintext.recombine().unwrap(), pt);
        }
    }
}
