//! Masked Ascon permutation.
//!
//! Each round adds the round constant, runs the S-box with its five AND
//! lanes replaced by DOM gates, then applies the linear diffusion layer.
//! The linear steps are applied to each share independently; only the gates
//! mix the two domains, and only through freshly blinded cross terms.

use crate::dom::dom_and;
use crate::error::Result;
use crate::observer::{Observer, Stage};
use crate::params::{check_rounds, MAX_ROUNDS};
use crate::randomness::{RandomnessStream, WORDS_PER_ROUND};
use crate::shares::{Share, Shared};
use crate::state::{StatePair, STATE_WORDS};

/// Rotation pairs of the linear layer, per word.
const ROTATIONS: [(u32, u32); STATE_WORDS] = [(19, 28), (61, 39), (1, 6), (10, 17), (7, 41)];

/// Constant of round `r` in the full 12-round schedule.
#[inline(always)]
pub fn round_constant(r: usize) -> u64 {
    (0xf0 - 0x10 * r + r) as u64
}

/// Runs the last `rounds` rounds of the permutation on both shares.
///
/// Takes `5 * rounds` words from `randomness`. Fails before touching the
/// state if `rounds` is outside `1..=12` or the stream is too short.
pub fn permute<O: Observer + ?Sized>(
    state: &mut StatePair,
    randomness: &mut RandomnessStream<'_>,
    rounds: usize,
    observer: &mut O,
) -> Result<()> {
    check_rounds(rounds)?;
    let words = randomness.take(WORDS_PER_ROUND * rounds)?;

    observer.observe(Stage::PermutationInput, state);
    for (r, z) in (MAX_ROUNDS - rounds..MAX_ROUNDS).zip(words.chunks_exact(WORDS_PER_ROUND)) {
        state.xor_word(Share::CONSTANTS, 2, round_constant(r));
        observer.observe(Stage::ConstantAddition, state);

        substitution(state, z);
        observer.observe(Stage::Substitution, state);

        linear_diffusion(state);
        observer.observe(Stage::LinearDiffusion, state);
    }
    Ok(())
}

fn substitution(state: &mut StatePair, z: &[u64]) {
    state.for_each_share(|s| {
        s[0] ^= s[4];
        s[2] ^= s[1];
        s[4] ^= s[3];
    });

    let t: [Shared<u64>; STATE_WORDS] = core::array::from_fn(|i| {
        dom_and(state.word(i), state.word((i + 1) % STATE_WORDS), z[i])
    });
    for i in 0..STATE_WORDS {
        state.xor_shared(i, t[(i + 1) % STATE_WORDS]);
    }

    state.for_each_share(|s| {
        s[1] ^= s[0];
        s[0] ^= s[4];
        s[3] ^= s[2];
    });
    state.xor_word(Share::CONSTANTS, 2, u64::MAX);
}

fn linear_diffusion(state: &mut StatePair) {
    state.for_each_share(|s| {
        for (w, (a, b)) in s.iter_mut().zip(ROTATIONS) {
            *w ^= w.rotate_right(a) ^ w.rotate_right(b);
        }
    });
}
