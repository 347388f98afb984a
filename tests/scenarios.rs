//! End-to-end scenarios: decompose well-known registers and check the full
//! pipeline from feedback function (native or compiled) to report.

use nfsr_rs::catalog::{Fibonacci, FunctionRegistry, Grain, Trivium};
use nfsr_rs::engine::{decompose, CycleEngine};
use nfsr_rs::error::Error;
use nfsr_rs::expr::compile_expression;
use nfsr_rs::register::Nfsr;
use nfsr_rs::report::{summarize, Maximality};
use nfsr_rs::state::State;

use test_log::test;

#[test]
fn xor_of_all_three_bits() {
    // n=3, feedback x[0]^x[1]^x[2]: the all-zero state is a fixed point and
    // every state is covered exactly once.
    let feedback = |s: &State| s.bit(0) ^ s.bit(1) ^ s.bit(2);
    let decomposition = decompose(3, &feedback).unwrap();

    let zero_cycle = decomposition
        .cycles()
        .iter()
        .find(|c| c.contains(0))
        .expect("all-zero state must be on a cycle");
    assert_eq!(zero_cycle.len(), 1);

    assert_eq!(
        decomposition.cycle_state_count() + decomposition.transient_states(),
        8
    );
}

#[test]
fn four_bit_fibonacci_lfsr_is_maximal() {
    // The classical maximal-length taps x[0]^x[3]: one 15-cycle over all
    // nonzero states plus the all-zero fixed point.
    let feedback = |s: &State| s.bit(0) ^ s.bit(3);
    let decomposition = decompose(4, &feedback).unwrap();

    let mut lengths: Vec<usize> = decomposition.cycles().iter().map(|c| c.len()).collect();
    lengths.sort_unstable();
    assert_eq!(lengths, vec![1, 15]);
    assert_eq!(decomposition.transient_states(), 0);

    let report = summarize(&decomposition).unwrap();
    assert_eq!(report.maximality, Maximality::Nonzero);
}

#[test]
fn compiled_expression_matches_native_function() {
    let compiled = compile_expression("x[0] ^ x[1] & x[2]", 3).unwrap();
    let native = |s: &State| s.bit(0) ^ (s.bit(1) & s.bit(2));

    let via_compiled = decompose(3, &compiled).unwrap();
    let via_native = decompose(3, &native).unwrap();
    assert_eq!(via_compiled, via_native);
}

#[test]
fn oversized_register_is_rejected_without_enumeration() {
    let engine = CycleEngine::default();
    let must_not_run = |_: &State| -> u8 { panic!("no state may be evaluated") };
    let err = engine.decompose(40, &must_not_run).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedRegisterLength { len: 40, .. }
    ));
}

#[test]
fn out_of_range_index_fails_at_compile_time() {
    let err = compile_expression("x[5]", 3).unwrap_err();
    assert_eq!(err, Error::IndexOutOfRange { index: 5, len: 3 });
}

#[test]
fn decompose_is_deterministic() {
    let first = decompose(5, &Grain).unwrap();
    let second = decompose(5, &Grain).unwrap();
    assert_eq!(first, second);
}

#[test]
fn cycle_members_have_exact_period() {
    let decomposition = decompose(4, &Trivium).unwrap();
    let nfsr = Nfsr::new(4, &Trivium);
    for cycle in decomposition.cycles() {
        for &start in cycle.states() {
            let mut word = start;
            for step in 1..=cycle.len() {
                word = nfsr.step_word(word).unwrap();
                assert_eq!(word == start, step == cycle.len());
            }
        }
    }
}

#[test]
fn zero_fixed_point_whenever_feedback_of_zero_is_zero() {
    let registry = FunctionRegistry::with_builtins();
    for name in ["trivium", "majority", "even-parity", "fibonacci"] {
        let feedback = registry.get(name).unwrap();
        assert_eq!(feedback.eval(&State::zero(4)).unwrap(), 0);
        let decomposition = decompose(4, feedback).unwrap();
        let zero_cycle = decomposition.cycles().iter().find(|c| c.contains(0));
        assert_eq!(zero_cycle.map(|c| c.len()), Some(1), "function {}", name);
    }
}

#[test]
fn catalog_functions_cover_the_space() {
    let registry = FunctionRegistry::with_builtins();
    for name in registry.names() {
        let feedback = registry.get(name).unwrap();
        // Grain needs 5 bits, everything else is happy with 5 too.
        let decomposition = decompose(5, feedback).unwrap();
        assert_eq!(
            decomposition.cycle_state_count() + decomposition.transient_states(),
            32,
            "function {}",
            name
        );
    }
}

#[test]
fn fibonacci_catalog_entry_equals_tap_expression() {
    let compiled = compile_expression("x[0] ^ x[3]", 4).unwrap();
    assert_eq!(
        decompose(4, &Fibonacci).unwrap(),
        decompose(4, &compiled).unwrap()
    );
}
