//! Aggregate statistics over a cycle decomposition.

use std::collections::BTreeMap;
use std::fmt;

use crate::engine::CycleDecomposition;
use crate::error::{Error, Result};

/// Whether the decomposition contains a maximal-length cycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Maximality {
    /// One cycle covers all `2^n` states, the theoretical best case.
    Full,
    /// A cycle covers `2^n - 1` states, i.e. everything except the all-zero
    /// fixed point. The classical LFSR maximal case.
    Nonzero,
    /// No maximal cycle.
    None,
}

/// The distribution statistics for one cycle decomposition.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionReport {
    /// Number of cycles.
    pub cycle_count: usize,
    /// Cycle lengths, in discovery order.
    pub lengths: Vec<usize>,
    /// Cycle-length histogram: length -> number of cycles with that length.
    pub histogram: BTreeMap<usize, usize>,
    /// Number of states not on any cycle.
    pub transient_states: usize,
    /// Length of the longest cycle (0 only for an empty decomposition,
    /// which the engine never produces).
    pub max_cycle_len: usize,
    /// Total number of states, `2^n`.
    pub state_space_size: usize,
    /// Fraction of the state space lying on cycles.
    pub cycle_coverage: f64,
    /// Maximal-length classification of the longest cycle.
    pub maximality: Maximality,
}

/// Computes the distribution statistics for a decomposition.
///
/// Re-checks the coverage invariant defensively: if the cycle lengths plus
/// the transient count do not sum to `2^n`, the decomposition is corrupt and
/// [`Error::InternalConsistency`] is returned.
pub fn summarize(decomposition: &CycleDecomposition) -> Result<DistributionReport> {
    let state_space_size = decomposition.state_space_size();
    let lengths: Vec<usize> = decomposition.cycles().iter().map(|c| c.len()).collect();
    let cycle_states: usize = lengths.iter().sum();
    let transient_states = decomposition.transient_states();

    if cycle_states + transient_states != state_space_size {
        return Err(Error::InternalConsistency {
            detail: format!(
                "cycle lengths sum to {} and transients to {}, expected {} states",
                cycle_states, transient_states, state_space_size
            ),
        });
    }

    let mut histogram = BTreeMap::new();
    for &len in &lengths {
        *histogram.entry(len).or_insert(0) += 1;
    }
    let max_cycle_len = lengths.iter().copied().max().unwrap_or(0);
    let maximality = if max_cycle_len == state_space_size {
        Maximality::Full
    } else if max_cycle_len == state_space_size - 1 {
        Maximality::Nonzero
    } else {
        Maximality::None
    };

    Ok(DistributionReport {
        cycle_count: lengths.len(),
        lengths,
        histogram,
        transient_states,
        max_cycle_len,
        state_space_size,
        cycle_coverage: cycle_states as f64 / state_space_size as f64,
        maximality,
    })
}

impl fmt::Display for DistributionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "cycle distribution over {} states:",
            self.state_space_size
        )?;
        for (&len, &count) in &self.histogram {
            writeln!(f, "  {} cycle(s) of length {}", count, len)?;
        }
        writeln!(f, "  total cycles: {}", self.cycle_count)?;
        writeln!(
            f,
            "  states on cycles: {} ({:.1}%)",
            self.state_space_size - self.transient_states,
            self.cycle_coverage * 100.0
        )?;
        writeln!(f, "  transient states: {}", self.transient_states)?;
        match self.maximality {
            Maximality::Full => write!(f, "  maximal cycle: full period 2^n = {}", self.max_cycle_len),
            Maximality::Nonzero => write!(
                f,
                "  maximal cycle: period 2^n - 1 = {} (all nonzero states)",
                self.max_cycle_len
            ),
            Maximality::None => write!(f, "  longest cycle: {}", self.max_cycle_len),
        }
    }
}
