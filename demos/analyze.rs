//! Analyze one feedback function: either a named catalog entry or a custom
//! bit expression.
//!
//! ```console
//! $ cargo run --example analyze -- --length 4 --function fibonacci
//! $ cargo run --example analyze -- --length 4 --expr "x[0] ^ x[1] ^ (x[2] & x[3])"
//! $ cargo run --example analyze -- --list
//! ```

use clap::Parser;

use nfsr_rs::catalog::FunctionRegistry;
use nfsr_rs::engine::CycleEngine;
use nfsr_rs::expr::compile_expression;
use nfsr_rs::feedback::FeedbackFunction;
use nfsr_rs::report::summarize;

#[derive(Debug, Parser)]
#[command(about = "Cycle-structure analysis of a feedback shift register")]
struct Args {
    /// Register length in bits.
    #[arg(short = 'n', long, default_value_t = 4)]
    length: usize,

    /// Named feedback function from the builtin catalog.
    #[arg(short, long, default_value = "fibonacci", conflicts_with = "expr")]
    function: String,

    /// Custom feedback expression, e.g. "x[0] ^ x[1] & x[2]".
    #[arg(short, long)]
    expr: Option<String>,

    /// List the available catalog functions and exit.
    #[arg(long)]
    list: bool,

    /// Log engine progress.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Info
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let registry = FunctionRegistry::with_builtins();

    if args.list {
        println!("available feedback functions:");
        for name in registry.names() {
            println!("  {}", name);
        }
        return Ok(());
    }

    let compiled;
    let feedback: &dyn FeedbackFunction = match &args.expr {
        Some(expr) => {
            compiled = compile_expression(expr, args.length)?;
            println!(
                "analyzing expression {} over a {}-bit register",
                compiled, args.length
            );
            &compiled
        }
        None => {
            let function = registry
                .get(&args.function)
                .ok_or_else(|| color_eyre::eyre::eyre!("unknown function '{}'", args.function))?;
            println!(
                "analyzing '{}' over a {}-bit register",
                args.function, args.length
            );
            function
        }
    };

    let engine = CycleEngine::default();
    let decomposition = engine.decompose(args.length, feedback)?;
    println!("{}", decomposition);
    println!("{}", summarize(&decomposition)?);

    Ok(())
}
