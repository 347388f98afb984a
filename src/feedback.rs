//! The feedback-function capability.
//!
//! A feedback function computes the single bit that enters the register on
//! each transition. The engine relies on three contract points:
//!
//! - **Totality**: the function must produce a bit for every state of the
//!   agreed length. A function that cannot (e.g. one that needs a longer
//!   register) fails with [`Error::FeedbackFunction`][crate::error::Error].
//! - **Determinism**: the same state always yields the same bit. State
//!   classification in the engine silently assumes this.
//! - **Purity**: no side effects, no internal state.

use crate::error::Result;
use crate::state::State;

/// A rule computing a new bit from the current register contents.
pub trait FeedbackFunction {
    /// Evaluates the feedback bit for `state`.
    ///
    /// Must return 0 or 1; any other value is rejected by the transition
    /// model with [`Error::FeedbackFunction`][crate::error::Error].
    fn eval(&self, state: &State) -> Result<u8>;
}

/// Plain closures over the state are feedback functions. This covers the
/// common infallible case:
///
/// ```
/// use nfsr_rs::feedback::FeedbackFunction;
/// use nfsr_rs::state::State;
///
/// let taps = |s: &State| s.bit(0) ^ s.bit(3);
/// assert_eq!(taps.eval(&State::from_word(0b1000, 4)).unwrap(), 1);
/// ```
impl<F> FeedbackFunction for F
where
    F: Fn(&State) -> u8,
{
    fn eval(&self, state: &State) -> Result<u8> {
        Ok(self(state))
    }
}
