//! Register images exchanged with the capture target.
//!
//! Only the byte layout lives here; moving images to and from the device is
//! the caller's business. Operands travel as 16-byte shares interleaved into
//! one 32-byte register in 4-byte groups; results come back the same way.
//! Masking randomness fills twelve 40-byte registers.

use crate::shares::Shared;

/// Bytes of one operand share in a register.
pub const SHARE_BYTES: usize = 16;

/// Bytes of one interleaved operand register.
pub const REGISTER_BYTES: usize = 2 * SHARE_BYTES;

/// Interleaving granularity.
const GROUP: usize = 4;

/// Number of randomness registers.
pub const RANDOMNESS_REGISTERS: usize = 12;

/// Bytes per randomness register (one 320-bit state's worth).
pub const RANDOMNESS_REGISTER_BYTES: usize = 40;

/// Truncates or zero-pads `data` to `N` bytes.
pub fn fit<const N: usize>(data: &[u8]) -> [u8; N] {
    let mut out = [0u8; N];
    let n = data.len().min(N);
    out[..n].copy_from_slice(&data[..n]);
    out
}

/// Interleaves two operand shares: `d0[0..4] d1[0..4] d0[4..8] d1[4..8] ..`.
pub fn interleave(shares: Shared<&[u8]>) -> [u8; REGISTER_BYTES] {
    let d0 = fit::<SHARE_BYTES>(shares.first);
    let d1 = fit::<SHARE_BYTES>(shares.second);
    let mut out = [0u8; REGISTER_BYTES];
    for (i, pair) in out.chunks_exact_mut(2 * GROUP).enumerate() {
        pair[..GROUP].copy_from_slice(&d0[i * GROUP..(i + 1) * GROUP]);
        pair[GROUP..].copy_from_slice(&d1[i * GROUP..(i + 1) * GROUP]);
    }
    out
}

/// Splits an interleaved register back into its two shares.
pub fn deinterleave(register: &[u8; REGISTER_BYTES]) -> Shared<[u8; SHARE_BYTES]> {
    let mut shares = Shared::new([0u8; SHARE_BYTES], [0u8; SHARE_BYTES]);
    for (i, pair) in register.chunks_exact(2 * GROUP).enumerate() {
        shares.first[i * GROUP..(i + 1) * GROUP].copy_from_slice(&pair[..GROUP]);
        shares.second[i * GROUP..(i + 1) * GROUP].copy_from_slice(&pair[GROUP..]);
    }
    shares
}

/// Recombines an interleaved read-back register.
pub fn recombine_register(register: &[u8; REGISTER_BYTES]) -> [u8; SHARE_BYTES] {
    let shares = deinterleave(register);
    core::array::from_fn(|i| shares.first[i] ^ shares.second[i])
}

/// Cuts a randomness byte stream into register chunks.
///
/// The stream is truncated or zero-padded to the total register width.
pub fn randomness_registers(
    bytes: &[u8],
) -> [[u8; RANDOMNESS_REGISTER_BYTES]; RANDOMNESS_REGISTERS] {
    core::array::from_fn(|i| {
        let start = (i * RANDOMNESS_REGISTER_BYTES).min(bytes.len());
        fit::<RANDOMNESS_REGISTER_BYTES>(&bytes[start..])
    })
}
