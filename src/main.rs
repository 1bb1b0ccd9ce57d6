use std::{
    fs,
    io::{self, BufRead, Write},
};

use clap::Parser;
use m87::interpreter::{
    driver::{RunState, Runner, RunnerConfig},
    evaluator::core::MAX_EXECUTION_STEPS,
};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// m87 is a small, statically typed scripting language with structs,
/// first-class types and interactive input.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells m87 to read a file instead of a script.
    #[arg(short, long)]
    file: bool,

    /// Evaluation steps a run may take before it is aborted.
    #[arg(long, default_value_t = MAX_EXECUTION_STEPS)]
    max_steps: usize,

    /// Logs what the interpreter does to stderr.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let default_level = if args.verbose { "m87=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr))
                                  .with(filter)
                                  .init();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let config = RunnerConfig { max_steps: args.max_steps };
    let stdout = io::stdout();
    if let Err(e) = run(&script, config, io::stdin().lock(), stdout.lock()) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/// Runs `script`, writing output as it appears and answering requests for
/// input with lines read from `input`.
///
/// # Errors
/// Any lexer, parser or runtime error, an I/O failure, or `input` running
/// dry while the program still waits for a line.
fn run(script: &str,
       config: RunnerConfig,
       mut input: impl BufRead,
       mut out: impl Write)
       -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = Runner::with_config(script, config)?;
    let mut printed = 0;
    let mut state = runner.run();

    loop {
        let output = runner.output();
        for line in &output[printed..] {
            writeln!(out, "{line}")?;
        }
        printed = output.len();

        match state? {
            RunState::Finished => return Ok(()),
            RunState::AwaitingInput { prompt } => {
                write!(out, "{prompt}")?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    runner.stop();
                    return Err("input ended while the program was waiting for a line".into());
                }
                let line = line.trim_end_matches(['\r', '\n']).to_string();
                state = runner.resume(line);
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(script: &str, input: &str) -> (Result<(), String>, String) {
        let mut out = Vec::new();
        let result = run(script, RunnerConfig::default(), input.as_bytes(), &mut out);
        (result.map_err(|e| e.to_string()), String::from_utf8(out).unwrap())
    }

    #[test]
    fn answers_input_from_the_reader() {
        let (result, out) = run_with("let n: string = input(\"name? \")\nprint(\"hi \", n)",
                                     "Ada\n");
        assert_eq!(result, Ok(()));
        assert_eq!(out, "name? hi Ada\n");
    }

    #[test]
    fn closed_input_stops_the_run() {
        let src = "while true {\nprint(input(\"> \"))\n}";
        let (result, out) = run_with(src, "a\n");

        let err = result.unwrap_err();
        assert!(err.contains("input ended"), "{err}");
        assert_eq!(out, "> a\n> ");
    }
}
