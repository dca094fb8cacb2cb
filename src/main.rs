use clap::Parser;
use regmach::dialect::Dialect;
use regmach::lcbf::Lcbf;
use regmach::machine::{Machine, MachineConfig, interpret};
use regmach::nbf::Nbf;
use regmach::ragaraja::Ragaraja;

#[derive(Parser)]
#[command(
    name = "regmach",
    about = "Circular-tape register machine with pluggable instruction sets"
)]
struct Cli {
    /// Program text to execute.
    program: String,

    /// Which instruction set to use (lcbf, nbf, ragaraja).
    #[arg(long, default_value = "lcbf")]
    dialect: String,

    /// Random seed for dialects with ambiguous instructions.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Comma-separated values consumed by the input instruction.
    #[arg(long)]
    input: Option<String>,

    /// Number of cells on the tape.
    #[arg(long, default_value_t = 30)]
    tape_size: usize,

    /// Abort after this many steps (for programs that may not halt).
    #[arg(long)]
    max_steps: Option<usize>,
}

/// Parse a comma-separated list of integers.
fn parse_input(s: &str) -> Result<Vec<i64>, String> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map_err(|e| format!("Invalid input value '{part}': {e}"))
        })
        .collect()
}

fn main() {
    let cli = Cli::parse();

    let input = match cli.input.as_deref().map(parse_input).transpose() {
        Ok(values) => values.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    match cli.dialect.as_str() {
        "lcbf" => run(&cli, input, &mut Lcbf),
        "nbf" => run(&cli, input, &mut Nbf::seeded(cli.seed)),
        "ragaraja" => run(&cli, input, &mut Ragaraja::seeded(cli.seed)),
        other => {
            eprintln!("Unknown dialect: {other}. Available: lcbf, nbf, ragaraja");
            std::process::exit(1);
        }
    }
}

fn run<D: Dialect>(cli: &Cli, input: Vec<i64>, dialect: &mut D) {
    let config = MachineConfig {
        tape_size: cli.tape_size,
        input,
        max_steps: cli.max_steps,
        ..Default::default()
    };
    report(&interpret(&cli.program, dialect, config));
}

fn report(machine: &Machine) {
    for warning in &machine.warnings {
        eprintln!("{warning}");
    }
    println!("tape: {}", join(machine.tape.iter()));
    println!("data pointer: {}", machine.data_pointer);
    println!("output: {}", join(machine.output.iter()));
    println!("input left: {}", join(machine.input.iter()));
    println!("steps: {}", machine.steps);
}

fn join<'a>(values: impl Iterator<Item = &'a i64>) -> String {
    values
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
