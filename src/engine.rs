//! Cycle decomposition of the full state space.
//!
//! A feedback shift register is a deterministic transition function on the
//! finite set of `2^n` states, so its functional graph decomposes uniquely
//! into "rho" components: each component has exactly one cycle with trees of
//! transient states feeding into it. [`CycleEngine`] enumerates every state
//! exactly once and recovers that decomposition in O(2^n) time and space.
//!
//! Walks start from every state in ascending word order, and each discovered
//! cycle is rotated to begin at its lowest word, so the result is identical
//! across repeated runs with the same inputs.

use std::fmt;

use log::debug;

use crate::error::{Error, Result};
use crate::feedback::FeedbackFunction;
use crate::register::Nfsr;
use crate::state::State;

/// Hard cap on the register length. A decomposition keeps one `u32` per
/// state, so 26 bits is already a 256 MiB classification table.
pub const MAX_REGISTER_LEN: usize = 26;

/// One cycle of the register, plus the count of transient states that
/// eventually drain into it.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Cycle {
    states: Vec<u64>,
    transient_count: usize,
}

impl Cycle {
    /// The states on the cycle, in transition order, starting at the
    /// lowest-valued member.
    pub fn states(&self) -> &[u64] {
        &self.states
    }

    /// Cycle length.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of transient states whose trajectories end on this cycle.
    pub fn transient_count(&self) -> usize {
        self.transient_count
    }

    pub fn contains(&self, word: u64) -> bool {
        self.states.contains(&word)
    }

    /// Rotates the state sequence so it starts at its minimal word.
    fn canonicalize(&mut self) {
        let mut min_at = 0;
        for (i, &word) in self.states.iter().enumerate() {
            if word < self.states[min_at] {
                min_at = i;
            }
        }
        self.states.rotate_left(min_at);
    }
}

/// The complete cycle structure of one `(length, feedback)` pair.
///
/// Covers the entire space of `2^n` states exactly once: every state is
/// either on exactly one cycle or counted as transient.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct CycleDecomposition {
    len: usize,
    cycles: Vec<Cycle>,
    transient_states: usize,
}

impl CycleDecomposition {
    /// The register length this decomposition was computed for.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// The cycles, in discovery order.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Total number of states, `2^n`.
    pub fn state_space_size(&self) -> usize {
        1usize << self.len
    }

    /// Number of states lying on some cycle.
    pub fn cycle_state_count(&self) -> usize {
        self.cycles.iter().map(Cycle::len).sum()
    }

    /// Number of states not on any cycle.
    pub fn transient_states(&self) -> usize {
        self.transient_states
    }
}

impl fmt::Display for CycleDecomposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} cycle(s) over {} states:",
            self.cycles.len(),
            self.state_space_size()
        )?;
        for (i, cycle) in self.cycles.iter().enumerate() {
            write!(f, "  #{} (length {}):", i + 1, cycle.len())?;
            for &word in cycle.states() {
                write!(f, " {}", State::from_word(word, self.len))?;
            }
            if cycle.transient_count() > 0 {
                write!(f, "  [+{} transient]", cycle.transient_count())?;
            }
            writeln!(f)?;
        }
        write!(f, "transient states: {}", self.transient_states)
    }
}

// Classification sentinels. Real component ids stay well below these because
// the state space is capped at 2^26.
const UNVISITED: u32 = u32::MAX;
const IN_WALK: u32 = u32::MAX - 1;

/// The cycle-decomposition engine.
///
/// Carries only the tractability ceiling; each call to
/// [`decompose`][CycleEngine::decompose] uses fresh classification state, so
/// one engine may serve many analyses (and separate analyses are safe to run
/// concurrently, since nothing mutable is shared).
pub struct CycleEngine {
    max_len: usize,
}

impl CycleEngine {
    /// Creates an engine that rejects register lengths above `max_len`.
    ///
    /// # Panics
    ///
    /// Panics if `max_len` is 0 or above [`MAX_REGISTER_LEN`].
    pub fn new(max_len: usize) -> Self {
        assert!(
            (1..=MAX_REGISTER_LEN).contains(&max_len),
            "max_len must be in 1..={}",
            MAX_REGISTER_LEN
        );
        CycleEngine { max_len }
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Computes the full cycle decomposition for `(len, feedback)`.
    ///
    /// Each of the `2^len` states is classified exactly once: a walk follows
    /// transitions from an unvisited state until it either closes on itself
    /// (a new cycle, with the walk's prefix transient into it) or reaches an
    /// already-classified state (the whole walk is transient into that
    /// state's cycle). Any transition error aborts the decomposition with no
    /// partial result.
    pub fn decompose(
        &self,
        len: usize,
        feedback: &dyn FeedbackFunction,
    ) -> Result<CycleDecomposition> {
        if len == 0 || len > self.max_len {
            return Err(Error::UnsupportedRegisterLength {
                len,
                max: self.max_len,
            });
        }

        let size = 1usize << len;
        let nfsr = Nfsr::new(len, feedback);

        // Component id per state; `position` is only meaningful while the
        // state is marked IN_WALK.
        let mut component: Vec<u32> = vec![UNVISITED; size];
        let mut position: Vec<u32> = vec![0; size];
        let mut cycles: Vec<Cycle> = Vec::new();
        let mut path: Vec<u64> = Vec::new();

        for start in 0..size as u64 {
            if component[start as usize] != UNVISITED {
                continue;
            }
            debug!("walk from {:0len$b}", start, len = len);

            path.clear();
            let mut current = start;
            loop {
                match component[current as usize] {
                    UNVISITED => {
                        component[current as usize] = IN_WALK;
                        position[current as usize] = path.len() as u32;
                        path.push(current);
                        current = nfsr.step_word(current)?;
                    }
                    IN_WALK => {
                        // The walk closed on itself: the suffix from the
                        // first repeat is a new cycle, the prefix is
                        // transient into it.
                        let entry = position[current as usize] as usize;
                        let id = cycles.len() as u32;
                        for &word in &path {
                            component[word as usize] = id;
                        }
                        let mut cycle = Cycle {
                            states: path.split_off(entry),
                            transient_count: path.len(),
                        };
                        cycle.canonicalize();
                        debug!(
                            "cycle #{} of length {} ({} transient feeders so far)",
                            id + 1,
                            cycle.len(),
                            cycle.transient_count
                        );
                        cycles.push(cycle);
                        break;
                    }
                    id => {
                        // The walk drained into a known component; every
                        // state on it is transient into that cycle.
                        for &word in &path {
                            component[word as usize] = id;
                        }
                        cycles[id as usize].transient_count += path.len();
                        break;
                    }
                }
            }
        }

        let cycle_states: usize = cycles.iter().map(Cycle::len).sum();
        let transient_states: usize = cycles.iter().map(Cycle::transient_count).sum();
        if cycle_states + transient_states != size {
            return Err(Error::InternalConsistency {
                detail: format!(
                    "{} cycle states + {} transient states != {} total",
                    cycle_states, transient_states, size
                ),
            });
        }
        debug!(
            "decomposition done: {} cycles, {} cycle states, {} transient",
            cycles.len(),
            cycle_states,
            transient_states
        );

        Ok(CycleDecomposition {
            len,
            cycles,
            transient_states,
        })
    }
}

impl Default for CycleEngine {
    fn default() -> Self {
        CycleEngine::new(MAX_REGISTER_LEN)
    }
}

/// Decomposes `(len, feedback)` with a default-configured engine.
///
/// The primary entry point of the crate; see
/// [`CycleEngine::decompose`] for the semantics.
pub fn decompose(len: usize, feedback: &dyn FeedbackFunction) -> Result<CycleDecomposition> {
    CycleEngine::default().decompose(len, feedback)
}
