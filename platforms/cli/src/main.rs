use clap::Parser;
use std::path::Path;
use std::process;
use tmtrace::{Catalog, DefinitionLoader, MachineError, Outcome, Simulator, DEFAULT_MAX_STEPS};

#[derive(Parser)]
#[clap(author, version, about, long_about = None, arg_required_else_help = true)]
struct Cli {
    /// The machine definition file (JSON) to simulate
    #[clap(short, long, conflicts_with = "sample")]
    machine: Option<String>,

    /// Run an embedded sample machine by name (see --list-samples)
    #[clap(short, long)]
    sample: Option<String>,

    /// List the embedded sample machines and exit
    #[clap(long)]
    list_samples: bool,

    /// Input strings to simulate
    #[clap(short, long)]
    input: Vec<String>,

    /// A file of test inputs, one per line ('#' lines are comments)
    #[clap(long)]
    inputs_file: Option<String>,

    /// Ceiling on the number of transitions per run
    #[clap(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,

    /// Print every instantaneous description of each run
    #[clap(short, long)]
    trace: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), MachineError> {
    if cli.list_samples {
        for name in Catalog::names() {
            println!("{}", name);
        }
        return Ok(());
    }

    let machine = match (&cli.machine, &cli.sample) {
        (Some(path), _) => DefinitionLoader::load_file(Path::new(path))?,
        (None, Some(name)) => Catalog::get(name)?,
        (None, None) => {
            return Err(MachineError::ValidationError(
                "either --machine or --sample is required".to_string(),
            ))
        }
    };

    let mut inputs = cli.input.clone();
    if let Some(path) = &cli.inputs_file {
        inputs.extend(DefinitionLoader::load_inputs(Path::new(path))?);
    }

    println!("{}", machine);
    println!();
    println!("{}", machine.transition_summary());

    let simulator = Simulator::with_max_steps(&machine, cli.max_steps);
    let results = simulator.simulate_all(&inputs);

    for (input, outcome) in &results {
        print_outcome(input, outcome, cli.trace);
    }

    print_summary(&results);
    Ok(())
}

fn print_outcome(input: &str, outcome: &Outcome, trace: bool) {
    println!("Simulating '{}'", input);

    if trace {
        for config in &outcome.trace {
            println!("  {}", config.compact());
        }
    }

    let status = if outcome.accepted() {
        "ACCEPTED"
    } else {
        "REJECTED"
    };
    println!("  {}: {}", status, outcome.message);
    println!();
}

fn print_summary(results: &[(String, Outcome)]) {
    if results.is_empty() {
        return;
    }

    let accepted = results.iter().filter(|(_, o)| o.accepted()).count();
    println!("Results: {}/{} inputs accepted", accepted, results.len());

    for (input, outcome) in results {
        let status = if outcome.accepted() { "accepted" } else { "rejected" };
        println!("  '{}' -> {} ({} steps)", input, status, outcome.steps());
    }
}
