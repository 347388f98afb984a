//! The register transition model.
//!
//! [`Nfsr`] couples a register length with a feedback function and exposes
//! the deterministic one-step transition. The shift is Fibonacci style: the
//! oldest bit (index 0) is dropped, every other bit moves one position
//! toward index 0, and the feedback bit enters at index `n-1`. See
//! [`State`][crate::state::State] for the word encoding this corresponds to.

use crate::error::{Error, Result};
use crate::feedback::FeedbackFunction;
use crate::state::State;

/// An `n`-bit feedback shift register with a fixed feedback function.
pub struct Nfsr<'a> {
    len: usize,
    feedback: &'a dyn FeedbackFunction,
}

impl<'a> Nfsr<'a> {
    /// Creates a register model of the given length.
    ///
    /// # Panics
    ///
    /// Panics if `len == 0`.
    pub fn new(len: usize, feedback: &'a dyn FeedbackFunction) -> Self {
        assert!(len >= 1, "register length must be positive");
        Nfsr { len, feedback }
    }

    /// The register length in bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Evaluates the feedback bit for `state`, enforcing the single-bit
    /// contract of [`FeedbackFunction`].
    fn feedback_bit(&self, state: &State) -> Result<u8> {
        let bit = self.feedback.eval(state)?;
        if bit > 1 {
            return Err(Error::feedback(format!(
                "returned {}, which is not a bit",
                bit
            )));
        }
        Ok(bit)
    }

    /// Applies one register transition: shift out the oldest bit, shift in
    /// the feedback bit.
    pub fn step(&self, state: &State) -> Result<State> {
        if state.len() != self.len {
            return Err(Error::InvalidStateLength {
                expected: self.len,
                actual: state.len(),
            });
        }
        let bit = self.feedback_bit(state)?;
        let mut bits = Vec::with_capacity(self.len);
        bits.extend_from_slice(&state.bits()[1..]);
        bits.push(bit);
        Ok(State::from_bits(bits))
    }

    /// The same transition on the integer encoding of states. Used by the
    /// cycle engine, which enumerates words rather than bit vectors.
    pub fn step_word(&self, word: u64) -> Result<u64> {
        let bit = self.feedback_bit(&State::from_word(word, self.len))?;
        let mask = if self.len == 64 {
            u64::MAX
        } else {
            (1u64 << self.len) - 1
        };
        Ok(((word << 1) & mask) | bit as u64)
    }
}
