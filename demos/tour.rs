//! A tour of the builtin feedback functions: run a handful of small
//! registers through the engine and print their cycle structure.

use nfsr_rs::catalog::{Fibonacci, Grain, Trivium};
use nfsr_rs::engine::decompose;
use nfsr_rs::expr::compile_expression;
use nfsr_rs::feedback::FeedbackFunction;
use nfsr_rs::report::summarize;
use nfsr_rs::state::State;

fn run(name: &str, length: usize, feedback: &dyn FeedbackFunction) -> color_eyre::Result<()> {
    println!("===== {} (n = {}) =====", name, length);
    let decomposition = decompose(length, feedback)?;
    println!("{}", decomposition);
    println!("{}", summarize(&decomposition)?);
    println!();
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    // An ad-hoc nonlinear function, written natively.
    let nonlinear = |s: &State| s.bit(0) ^ (s.bit(1) & s.bit(2));
    run("example nonlinear function", 3, &nonlinear)?;

    run("Fibonacci LFSR", 4, &Fibonacci)?;
    run("Grain stream cipher", 5, &Grain)?;
    run("Trivium stream cipher", 4, &Trivium)?;

    let custom = compile_expression("x[0] ^ x[1] ^ (x[2] & x[3])", 4)?;
    run("custom: x[0] ^ x[1] ^ (x[2] & x[3])", 4, &custom)?;

    Ok(())
}
