//! Builtin feedback functions and the function registry.
//!
//! Each builtin is a small struct implementing
//! [`FeedbackFunction`][crate::feedback::FeedbackFunction]: no hierarchy,
//! just one evaluate operation per function. The linear examples
//! ([`Fibonacci`], [`GaloisLfsr`]) are classical LFSR taps; the nonlinear
//! ones ([`Grain`], [`Trivium`], [`AlternatingStep`], [`Majority`],
//! [`Threshold`]) are simplified versions of constructions found in stream
//! ciphers.
//!
//! [`FunctionRegistry`] maps names to boxed functions so a driver can look
//! them up by string. It is an explicit value constructed by the caller, not
//! a process-wide table.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::feedback::FeedbackFunction;
use crate::state::State;

fn require_len(name: &str, state: &State, min: usize) -> Result<()> {
    if state.len() < min {
        return Err(Error::feedback(format!(
            "{} requires at least {} bits in the register, got {}",
            name,
            min,
            state.len()
        )));
    }
    Ok(())
}

/// Simplified feedback function of the Grain stream cipher:
/// `x0 ^ x1 ^ x3 ^ x4 ^ (x1 & x2) ^ (x2 & x3) ^ (x3 & x4)`.
///
/// Needs a register of at least 5 bits.
#[derive(Debug, Copy, Clone)]
pub struct Grain;

impl FeedbackFunction for Grain {
    fn eval(&self, state: &State) -> Result<u8> {
        require_len("Grain", state, 5)?;
        let linear = state.bit(0) ^ state.bit(1) ^ state.bit(3) ^ state.bit(4);
        let nonlinear = (state.bit(1) & state.bit(2))
            ^ (state.bit(2) & state.bit(3))
            ^ (state.bit(3) & state.bit(4));
        Ok(linear ^ nonlinear)
    }
}

/// Simplified feedback function of the Trivium stream cipher:
/// `x0 ^ x2 ^ (x1 & x2)`. Needs at least 3 bits.
#[derive(Debug, Copy, Clone)]
pub struct Trivium;

impl FeedbackFunction for Trivium {
    fn eval(&self, state: &State) -> Result<u8> {
        require_len("Trivium", state, 3)?;
        Ok(state.bit(0) ^ state.bit(2) ^ (state.bit(1) & state.bit(2)))
    }
}

/// Simplified alternating step generator: bit 0 selects whether bit 1 or
/// bit 2 is emitted. Needs at least 3 bits.
#[derive(Debug, Copy, Clone)]
pub struct AlternatingStep;

impl FeedbackFunction for AlternatingStep {
    fn eval(&self, state: &State) -> Result<u8> {
        require_len("alternating step generator", state, 3)?;
        Ok(if state.bit(0) == 1 {
            state.bit(1)
        } else {
            state.bit(2)
        })
    }
}

/// Majority vote over all register bits; ties (possible for even lengths)
/// resolve to 0.
#[derive(Debug, Copy, Clone)]
pub struct Majority;

impl FeedbackFunction for Majority {
    fn eval(&self, state: &State) -> Result<u8> {
        Ok(u8::from(state.count_ones() > state.len() / 2))
    }
}

/// Emits 1 when the fraction of ones reaches the threshold.
#[derive(Debug, Copy, Clone)]
pub struct Threshold(pub f64);

impl FeedbackFunction for Threshold {
    fn eval(&self, state: &State) -> Result<u8> {
        let proportion = state.count_ones() as f64 / state.len() as f64;
        Ok(u8::from(proportion >= self.0))
    }
}

/// Even parity: 1 when the register holds an odd number of ones, so that the
/// total including the output is even.
#[derive(Debug, Copy, Clone)]
pub struct EvenParity;

impl FeedbackFunction for EvenParity {
    fn eval(&self, state: &State) -> Result<u8> {
        Ok((state.count_ones() % 2) as u8)
    }
}

/// The classical two-tap Fibonacci LFSR feedback `x0 ^ x[n-1]`.
#[derive(Debug, Copy, Clone)]
pub struct Fibonacci;

impl FeedbackFunction for Fibonacci {
    fn eval(&self, state: &State) -> Result<u8> {
        require_len("Fibonacci LFSR", state, 2)?;
        Ok(state.bit(0) ^ state.bit(state.len() - 1))
    }
}

/// XOR over a per-length tap table known to give maximum-length sequences.
///
/// The table covers most register lengths up to 32; lengths without an entry
/// fail with [`Error::FeedbackFunction`].
#[derive(Debug, Copy, Clone)]
pub struct GaloisLfsr;

impl GaloisLfsr {
    /// Tap positions for maximum-length LFSRs of the given register length.
    pub fn taps(len: usize) -> Option<&'static [usize]> {
        let taps: &'static [usize] = match len {
            2 => &[0, 1],
            3 => &[0, 1],
            4 => &[0, 1],
            5 => &[0, 2],
            6 => &[0, 1],
            7 => &[0, 1],
            8 => &[0, 2, 3, 4],
            9 => &[0, 4],
            10 => &[0, 3],
            11 => &[0, 2],
            15 => &[0, 1],
            16 => &[0, 1, 3, 12],
            17 => &[0, 3],
            18 => &[0, 7],
            19 => &[0, 1, 4, 18],
            20 => &[0, 3],
            21 => &[0, 2],
            22 => &[0, 1],
            23 => &[0, 5],
            24 => &[0, 1, 3, 4],
            25 => &[0, 3],
            28 => &[0, 3],
            29 => &[0, 2],
            30 => &[0, 1, 4, 6],
            31 => &[0, 3],
            32 => &[0, 1, 2, 22],
            _ => return None,
        };
        Some(taps)
    }
}

impl FeedbackFunction for GaloisLfsr {
    fn eval(&self, state: &State) -> Result<u8> {
        let taps = GaloisLfsr::taps(state.len()).ok_or_else(|| {
            Error::feedback(format!(
                "no tap positions defined for register length {}",
                state.len()
            ))
        })?;
        Ok(taps.iter().fold(0, |acc, &tap| acc ^ state.bit(tap)))
    }
}

/// A named collection of feedback functions.
///
/// The registry is constructed by the caller and passed around explicitly;
/// there is no global function table. Names are kept sorted so listings are
/// deterministic.
pub struct FunctionRegistry {
    entries: BTreeMap<String, Box<dyn FeedbackFunction>>,
}

impl FunctionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        FunctionRegistry {
            entries: BTreeMap::new(),
        }
    }

    /// Creates a registry pre-loaded with every builtin function.
    pub fn with_builtins() -> Self {
        let mut registry = FunctionRegistry::new();
        registry.insert("grain", Grain);
        registry.insert("trivium", Trivium);
        registry.insert("alternating-step", AlternatingStep);
        registry.insert("majority", Majority);
        registry.insert("threshold-70", Threshold(0.7));
        registry.insert("even-parity", EvenParity);
        registry.insert("fibonacci", Fibonacci);
        registry.insert("galois-lfsr", GaloisLfsr);
        registry
    }

    /// Registers a function under `name`, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, function: impl FeedbackFunction + 'static) {
        self.entries.insert(name.into(), Box::new(function));
    }

    /// Looks up a function by name.
    pub fn get(&self, name: &str) -> Option<&dyn FeedbackFunction> {
        self.entries.get(name).map(|f| f.as_ref())
    }

    /// All registered names, in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|s| s.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        FunctionRegistry::with_builtins()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grain_requires_five_bits() {
        let err = Grain.eval(&State::zero(4)).unwrap_err();
        assert!(matches!(err, Error::FeedbackFunction { .. }));
        assert_eq!(Grain.eval(&State::zero(5)).unwrap(), 0);
    }

    #[test]
    fn test_trivium() {
        // x0 ^ x2 ^ (x1 & x2)
        assert_eq!(Trivium.eval(&State::from_word(0b100, 3)).unwrap(), 1);
        assert_eq!(Trivium.eval(&State::from_word(0b011, 3)).unwrap(), 0);
        assert_eq!(Trivium.eval(&State::from_word(0b001, 3)).unwrap(), 1);
    }

    #[test]
    fn test_alternating_step() {
        assert_eq!(AlternatingStep.eval(&State::from_word(0b110, 3)).unwrap(), 1);
        assert_eq!(AlternatingStep.eval(&State::from_word(0b010, 3)).unwrap(), 0);
        assert_eq!(AlternatingStep.eval(&State::from_word(0b001, 3)).unwrap(), 1);
    }

    #[test]
    fn test_majority_breaks_ties_toward_zero() {
        assert_eq!(Majority.eval(&State::from_word(0b1100, 4)).unwrap(), 0);
        assert_eq!(Majority.eval(&State::from_word(0b1110, 4)).unwrap(), 1);
        assert_eq!(Majority.eval(&State::from_word(0b101, 3)).unwrap(), 1);
    }

    #[test]
    fn test_threshold() {
        let threshold = Threshold(0.7);
        assert_eq!(threshold.eval(&State::from_word(0b1101, 4)).unwrap(), 1);
        assert_eq!(threshold.eval(&State::from_word(0b1100, 4)).unwrap(), 0);
    }

    #[test]
    fn test_even_parity() {
        assert_eq!(EvenParity.eval(&State::from_word(0b101, 3)).unwrap(), 0);
        assert_eq!(EvenParity.eval(&State::from_word(0b100, 3)).unwrap(), 1);
    }

    #[test]
    fn test_galois_taps_cover_common_lengths() {
        assert_eq!(GaloisLfsr::taps(4), Some(&[0usize, 1][..]));
        assert!(GaloisLfsr::taps(13).is_none());
        let err = GaloisLfsr.eval(&State::zero(13)).unwrap_err();
        assert!(matches!(err, Error::FeedbackFunction { .. }));
    }

    #[test]
    fn test_registry_lookup_and_listing() {
        let registry = FunctionRegistry::with_builtins();
        assert!(registry.get("fibonacci").is_some());
        assert!(registry.get("unknown").is_none());
        let names: Vec<_> = registry.names().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(registry.len(), 8);
    }
}
