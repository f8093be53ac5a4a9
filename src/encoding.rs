//! Byte/word conversion and sponge padding.
//!
//! Words are assembled most-significant byte first.

use alloc::vec::Vec;

use crate::shares::Share;

/// Loads up to 8 bytes as the high-order bytes of a word.
#[inline]
pub fn load_word(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    let n = bytes.len().min(8);
    buf[..n].copy_from_slice(&bytes[..n]);
    u64::from_be_bytes(buf)
}

/// Big-endian bytes of a word.
#[inline]
pub fn store_word(word: u64) -> [u8; 8] {
    word.to_be_bytes()
}

/// Parses a big-endian byte stream into words, zero-filling a short tail.
pub fn words_from_bytes(bytes: &[u8]) -> Vec<u64> {
    bytes.chunks(8).map(load_word).collect()
}

/// Serializes words most-significant byte first.
pub fn words_to_bytes(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|w| store_word(*w)).collect()
}

/// Loads a 40-byte block as five state words.
pub fn block_to_state(block: &[u8; 40]) -> [u64; 5] {
    let mut words = [0u64; 5];
    for (word, chunk) in words.iter_mut().zip(block.chunks_exact(8)) {
        *word = load_word(chunk);
    }
    words
}

/// Domain-separated padding of one share to a multiple of `rate` bytes.
///
/// Share 1 appends `0x80` and share 2 appends `0x00`, each followed by zeros,
/// so the two paddings recombine to the usual single `0x80 00..` pad.
pub fn pad(data: &[u8], rate: usize, share: Share) -> Vec<u8> {
    let fill = rate - data.len() % rate;
    let mut padded = Vec::with_capacity(data.len() + fill);
    padded.extend_from_slice(data);
    padded.push(share.padding_byte());
    padded.resize(data.len() + fill, 0);
    padded
}

/// Right-aligns a key inside a 40-byte block and loads it as state words.
pub(crate) fn key_state(key: &[u8]) -> [u64; 5] {
    let mut block = [0u8; 40];
    block[40 - key.len()..].copy_from_slice(key);
    block_to_state(&block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn short_loads_are_left_aligned() {
        assert_eq!(load_word(&[0xab]), 0xab00_0000_0000_0000);
        assert_eq!(load_word(&[]), 0);
        assert_eq!(
            load_word(&[1, 2, 3, 4, 5, 6, 7, 8, 9]),
            0x0102_0304_0506_0708
        );
    }

    #[test]
    fn word_stream_tail_is_zero_filled() {
        assert_eq!(
            words_from_bytes(&[0, 0, 0, 0, 0, 0, 0, 1, 0xff]),
            vec![1, 0xff00_0000_0000_0000]
        );
        assert_eq!(words_to_bytes(&[0x0102_0304_0506_0708])[..3], [1, 2, 3]);
    }

    #[test]
    fn padding_shares_recombine_to_standard_pad() {
        for len in 0..20 {
            let data = vec![0x11u8; len];
            let p1 = pad(&data, 8, Share::First);
            let p2 = pad(&data, 8, Share::Second);
            assert_eq!(p1.len() % 8, 0);
            assert_eq!(p1.len(), (len / 8 + 1) * 8);
            assert_eq!(p1.len(), p2.len());
            assert_eq!(p1[len], 0x80);
            assert_eq!(p2[len], 0x00);
            assert!(p1[len + 1..].iter().all(|b| *b == 0));
        }
    }

    #[test]
    fn padding_respects_wide_rate() {
        let p = pad(&[1, 2, 3], 16, Share::First);
        assert_eq!(p.len(), 16);
        assert_eq!(p[3], 0x80);
        assert_eq!(pad(&[0; 16], 16, Share::First).len(), 32);
    }

    #[test]
    fn keys_land_in_the_low_words() {
        let key: [u8; 16] = core::array::from_fn(|i| i as u8);
        let s = key_state(&key);
        assert_eq!(s[..3], [0, 0, 0]);
        assert_eq!(s[3], 0x0001_0203_0405_0607);
        assert_eq!(s[4], 0x0809_0a0b_0c0d_0e0f);

        let key: [u8; 20] = core::array::from_fn(|i| i as u8);
        let s = key_state(&key);
        assert_eq!(s[2], 0x0000_0000_0001_0203);
        assert_eq!(s[3], 0x0405_0607_0809_0a0b);
    }
}
