//! Register states as fixed-length bit vectors.
//!
//! This module provides the [`State`] newtype that enforces the two data-model
//! invariants the rest of the crate relies on: a state always has exactly the
//! register's length, and every element is 0 or 1.

use std::fmt;

/// The contents of an `n`-bit feedback shift register.
///
/// # Bit-order convention
///
/// Index 0 holds the *oldest* bit, the one shifted out by a transition;
/// index `n-1` holds the *newest* bit, where the feedback bit enters
/// (Fibonacci style). In the integer encoding used by
/// [`from_word`][State::from_word] / [`to_word`][State::to_word], index 0 is
/// the most significant bit of the word, so a register step on words is
/// `((w << 1) & mask) | feedback_bit`.
///
/// # Invariants
///
/// - The length is fixed at construction and never changes.
/// - Every element is 0 or 1.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct State {
    bits: Vec<u8>,
}

impl State {
    /// Creates the all-zero state of the given length.
    pub fn zero(len: usize) -> Self {
        State { bits: vec![0; len] }
    }

    /// Creates a state from explicit bit values.
    ///
    /// # Panics
    ///
    /// Panics if `bits` is empty or contains an element other than 0 or 1.
    pub fn from_bits(bits: Vec<u8>) -> Self {
        assert!(!bits.is_empty(), "a state must have at least one bit");
        assert!(
            bits.iter().all(|&b| b <= 1),
            "state elements must be 0 or 1"
        );
        State { bits }
    }

    /// Decodes an integer in `[0, 2^len)` into a `len`-bit state.
    ///
    /// Bit `len-1` of the word becomes index 0 (the oldest position).
    pub fn from_word(word: u64, len: usize) -> Self {
        debug_assert!(len >= 1 && len <= 64);
        debug_assert!(len == 64 || word < (1u64 << len));
        let bits = (0..len).map(|i| ((word >> (len - 1 - i)) & 1) as u8).collect();
        State { bits }
    }

    /// Encodes the state back into an integer. Inverse of
    /// [`from_word`][State::from_word].
    pub fn to_word(&self) -> u64 {
        self.bits.iter().fold(0u64, |acc, &b| (acc << 1) | b as u64)
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Feedback functions that may be handed
    /// registers shorter than they expect should check [`len`][State::len]
    /// first and fail gracefully.
    pub fn bit(&self, index: usize) -> u8 {
        self.bits[index]
    }

    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Number of ones in the state (used by majority/threshold functions).
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.bits {
            write!(f, "{}", b)?;
        }
        Ok(())
    }
}
