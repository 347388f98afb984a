//! # nfsr-rs: Feedback Shift Register Cycle Analysis in Rust
//!
//! **`nfsr-rs`** analyzes the cycle structure of **Nonlinear/Linear Feedback
//! Shift Registers (NFSRs/LFSRs)**. Given a register length `n` and a
//! feedback function, it models the register as a deterministic finite-state
//! machine over all `2^n` states and computes how that space decomposes into
//! cycles and transient tails. This is the brute-force way to evaluate
//! candidate feedback functions for stream ciphers: a good function has a
//! maximal-length cycle, a bad one shatters the space into many short ones.
//!
//! ## What is a feedback shift register?
//!
//! On each clock tick the register shifts by one position: the oldest bit
//! falls out and a new bit, computed by the *feedback function* from the
//! current contents, enters at the other end (Fibonacci style). Since the
//! state space is finite and the transition is deterministic, every
//! trajectory is eventually periodic, and the whole space partitions into
//! disjoint "rho" components: one cycle each, with trees of transient states
//! feeding into it.
//!
//! ## Key Features
//!
//! - **Exhaustive decomposition**: every one of the `2^n` states is
//!   classified exactly once: O(2^n), never O(2^n · cycle length).
//! - **Canonical output**: walks start in ascending state order and each
//!   cycle starts at its lowest member, so results are reproducible
//!   bit-for-bit.
//! - **Expression compiler**: build ad-hoc feedback functions from text like
//!   `"x[0] ^ x[1] & x[2]"` via a real parser, with no dynamic code evaluation.
//! - **Function catalog**: simplified Grain/Trivium feedback, majority,
//!   parity, threshold, and classical LFSR tap tables, behind one
//!   [`FeedbackFunction`][crate::feedback::FeedbackFunction] trait.
//!
//! ## Basic Usage
//!
//! ```rust
//! use nfsr_rs::engine::decompose;
//! use nfsr_rs::report::{summarize, Maximality};
//! use nfsr_rs::state::State;
//!
//! // A 4-bit Fibonacci LFSR with taps at x[0] and x[3].
//! let feedback = |s: &State| s.bit(0) ^ s.bit(3);
//!
//! let decomposition = decompose(4, &feedback).unwrap();
//! let report = summarize(&decomposition).unwrap();
//!
//! // One 15-cycle through all nonzero states, plus the all-zero fixed point.
//! assert_eq!(report.cycle_count, 2);
//! assert_eq!(report.max_cycle_len, 15);
//! assert_eq!(report.maximality, Maximality::Nonzero);
//! assert_eq!(report.transient_states, 0);
//! ```
//!
//! ## Core Components
//!
//! - **[`engine`]**: the cycle-decomposition engine, the heart of the crate.
//! - **[`expr`]**: the bit-expression compiler.
//! - **[`catalog`]**: example feedback functions and the function registry.
//! - **[`register`]**: the one-step transition model.
//! - **[`report`]**: distribution statistics over a decomposition.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod expr;
pub mod feedback;
pub mod register;
pub mod report;
pub mod state;
