//! Numeric payload codecs.
//!
//! Integers occupy one word holding a 32-bit two's-complement value.
//! Doubles occupy two adjacent words, each carrying 32 bits of the IEEE-754
//! bit pattern (low half first). Reconstruction is pure bit manipulation,
//! so every value, including NaN payloads and signed zeros, round-trips
//! exactly.

use crate::tag::Word;

const HALF_MASK: u64 = 0xFFFF_FFFF;

/// Decode an integer payload word.
#[inline]
pub fn decode_integer(word: Word) -> i32 {
    word as u32 as i32
}

/// Encode an integer into its payload word.
#[inline]
pub fn encode_integer(value: i32) -> Word {
    value as u32 as Word
}

/// Join two 32-bit halves into a double.
#[inline]
pub fn decode_double(low: Word, high: Word) -> f64 {
    let bits = (low as u64 & HALF_MASK) | ((high as u64 & HALF_MASK) << 32);
    f64::from_bits(bits)
}

/// Split a double into its low and high 32-bit halves.
#[inline]
pub fn encode_double(value: f64) -> [Word; 2] {
    let bits = value.to_bits();
    [(bits & HALF_MASK) as Word, (bits >> 32) as Word]
}
