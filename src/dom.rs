//! Domain-oriented masked AND gate.
//!
//! Computes the two shares of `!x & y` lanewise over 64 bits, the only
//! nonlinear operation in the Ascon S-box. The two cross-domain products are
//! each blinded with the same fresh word `z` before being folded into their
//! domain; `z` must be drawn independently for every gate evaluation.

use crate::shares::Shared;

/// Masked `(!x) & y`.
///
/// The result recombines to `!(x.first ^ x.second) & (y.first ^ y.second)`.
/// The complement is applied to share 1 only, so it is a public constant
/// added to one domain.
#[inline(always)]
pub fn dom_and(x: Shared<u64>, y: Shared<u64>, z: u64) -> Shared<u64> {
    let nx1 = !x.first;

    let cross1 = (nx1 & y.second) ^ z;
    let r1 = (nx1 & y.first) ^ cross1;

    let cross2 = (x.second & y.first) ^ z;
    let r2 = (x.second & y.second) ^ cross2;

    Shared::new(r1, r2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(x: Shared<u64>, y: Shared<u64>) -> u64 {
        !x.recombine() & y.recombine()
    }

    #[test]
    fn recombines_to_and_not() {
        let samples = [
            (0u64, 0u64, 0u64, 0u64, 0u64),
            (u64::MAX, 0, 0, u64::MAX, 0x5a5a_5a5a_5a5a_5a5a),
            (
                0x0123_4567_89ab_cdef,
                0x0f0f_0f0f_f0f0_f0f0,
                0xdead_beef_cafe_babe,
                0x1357_9bdf_2468_ace0,
                0x8000_0000_0000_0001,
            ),
        ];
        for (x1, x2, y1, y2, z) in samples {
            let x = Shared::new(x1, x2);
            let y = Shared::new(y1, y2);
            assert_eq!(dom_and(x, y, z).recombine(), reference(x, y));
        }
    }

    #[test]
    fn every_single_bit_combination() {
        for bits in 0u8..32 {
            let lane = |i: u8| if (bits >> i) & 1 == 1 { u64::MAX } else { 0 };
            let x = Shared::new(lane(0), lane(1));
            let y = Shared::new(lane(2), lane(3));
            let z = lane(4);
            assert_eq!(dom_and(x, y, z).recombine(), reference(x, y));
        }
    }

    #[test]
    fn refresh_word_reaches_both_shares() {
        let x = Shared::new(0x1234u64, 0x4321);
        let y = Shared::new(0xffffu64, 0x00ff);
        let base = dom_and(x, y, 0);
        for bit in 0..64 {
            let z = 1u64 << bit;
            let out = dom_and(x, y, z);
            assert_eq!(out.first ^ base.first, z);
            assert_eq!(out.second ^ base.second, z);
        }
    }
}
