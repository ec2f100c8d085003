use clap::{Parser, ValueEnum};
use std::path::Path;
use std::process::ExitCode;

use tmsim::loader::DefinitionLoader;
use tmsim::machine::DeterministicMachine;
use tmsim::multitape::MultiTapeMachine;
use tmsim::nondeterministic::NondeterministicMachine;
use tmsim::types::{MachineError, DEFAULT_MAX_STEPS, DEFAULT_PATH_BUDGET};

#[derive(Clone, Copy, ValueEnum)]
enum Engine {
    /// Single-tape deterministic execution
    Deterministic,
    /// Breadth-first nondeterministic exploration
    Nondeterministic,
    /// Synchronized k-tape execution
    Multitape,
}

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file (JSON) to execute
    #[clap(short, long)]
    definition: String,

    /// The engine to run the definition with
    #[clap(short, long, value_enum, default_value_t = Engine::Deterministic)]
    engine: Engine,

    /// The input word (single-tape engines)
    #[clap(short, long, default_value = "")]
    word: String,

    /// Initial tape contents, one per tape (multi-tape engine)
    #[clap(short, long)]
    tape: Vec<String>,

    /// Maximum number of steps before the run times out
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Maximum number of configurations to explore (nondeterministic engine)
    #[clap(long, default_value_t = DEFAULT_PATH_BUDGET)]
    path_budget: usize,

    /// Print the execution trace
    #[clap(short = 'd', long)]
    trace: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), MachineError> {
    let definition = DefinitionLoader::load(Path::new(&cli.definition))?;

    match cli.engine {
        Engine::Deterministic => {
            let machine = DeterministicMachine::from_definition(&definition)?;
            let outcome = machine.simulate(&cli.word, cli.max_steps)?;

            if cli.trace {
                for snapshot in &outcome.trace {
                    println!("{:>4}  {}", snapshot.step, snapshot);
                }
            }
            println!(
                "{} in {} steps (final state: {})",
                verdict(outcome.accepted),
                outcome.steps,
                outcome.final_state
            );
            if let Some(reason) = &outcome.reason {
                println!("reason: {:?}", reason);
            }
            println!("final tape: {}", outcome.final_tape);
        }
        Engine::Nondeterministic => {
            let machine = NondeterministicMachine::from_definition(&definition)?;
            let exploration = machine.simulate(&cli.word, cli.path_budget)?;

            if cli.trace {
                for (i, path) in exploration.accepted_paths.iter().enumerate() {
                    println!("accepting path {}:", i + 1);
                    for snapshot in path {
                        println!("{:>4}  {}", snapshot.step, snapshot);
                    }
                }
            }
            println!(
                "{} accepting path(s), {} configuration(s) explored{}",
                exploration.accepted_paths.len(),
                exploration.paths_explored,
                if exploration.timeout {
                    ", budget exhausted"
                } else {
                    ""
                }
            );
        }
        Engine::Multitape => {
            let machine = MultiTapeMachine::from_definition(&definition)?;
            let outcome = machine.run(&cli.tape, cli.max_steps)?;

            if cli.trace {
                for snapshot in &outcome.trace {
                    println!("{:>4}  {}", snapshot.step, snapshot);
                }
            }
            println!(
                "{} in {} steps (final state: {})",
                verdict(outcome.accepted),
                outcome.steps,
                outcome.final_state
            );
            for (i, tape) in outcome.final_tapes.iter().enumerate() {
                println!("tape {}: {}", i, tape);
            }
        }
    }

    Ok(())
}

fn verdict(accepted: bool) -> &'static str {
    if accepted {
        "accepted"
    } else {
        "rejected"
    }
}
