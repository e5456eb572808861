use clap::{Parser, Subcommand};
use intcode::arcade::{self, ArcadeConfig};
use intcode::batch::run_batch;
use intcode::computer;
use intcode::error::Result;
use intcode::hull::{self, Color};
use intcode::program::Program;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "intcode", about = "Run Intcode programs and their host devices")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program to completion and print its outputs, one per line.
    Run {
        /// Program file, or inline comma-separated program text.
        program: String,

        /// Comma-separated input values (e.g. 1,2,3).
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        input: Vec<i64>,
    },

    /// Run a program once per input set, in parallel.
    Batch {
        /// Program file, or inline comma-separated program text.
        program: String,

        /// Input sets separated by ';' (e.g. "1,2;3,4").
        #[arg(long, value_parser = parse_sets, allow_hyphen_values = true)]
        inputs: InputSets,
    },

    /// Drive the hull-painting robot.
    Paint {
        /// Program file, or inline comma-separated program text.
        program: String,

        /// Start on a white panel instead of a black one.
        #[arg(long)]
        start_white: bool,
    },

    /// Run the arcade cabinet.
    Arcade {
        /// Program file, or inline comma-separated program text.
        program: String,

        /// Insert free play and let the joystick follow the ball.
        #[arg(long)]
        play: bool,
    },
}

#[derive(Clone, Debug, PartialEq)]
struct InputSets(Vec<Vec<i64>>);

/// Parse "1,2,3" into values. The empty string is no values.
fn parse_values(s: &str) -> std::result::Result<Vec<i64>, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|v| {
            v.trim()
                .parse::<i64>()
                .map_err(|e| format!("Invalid input value '{v}': {e}"))
        })
        .collect()
}

/// Parse "1,2;3,4" into input sets.
fn parse_sets(s: &str) -> std::result::Result<InputSets, String> {
    s.split(';').map(parse_values).collect::<std::result::Result<_, _>>().map(InputSets)
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,intcode=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli.command) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run { program, input } => {
            let program = Program::source(&program)?;
            info!(words = program.len(), "running program");
            for value in computer::run(&program, input)? {
                println!("{value}");
            }
        }
        Command::Batch { program, inputs } => {
            let program = Program::source(&program)?;
            let InputSets(sets) = inputs;
            info!(runs = sets.len(), "running batch");
            for (i, result) in run_batch(&program, &sets).into_iter().enumerate() {
                match result {
                    Ok(outputs) => {
                        let line: Vec<String> = outputs.iter().map(i64::to_string).collect();
                        println!("{i}: {}", line.join(","));
                    }
                    Err(e) => println!("{i}: error: {e}"),
                }
            }
        }
        Command::Paint {
            program,
            start_white,
        } => {
            let program = Program::source(&program)?;
            let start = if start_white { Color::White } else { Color::Black };
            let hull = hull::paint(&program, start)?;
            println!("{} panels painted", hull.painted());
            print!("{}", hull.render());
        }
        Command::Arcade { program, play } => {
            let program = Program::source(&program)?;
            let cabinet = arcade::play(&program, ArcadeConfig { free_play: play })?;
            print!("{}", cabinet.render());
            if play {
                println!("score: {}", cabinet.score);
            } else {
                println!("{} blocks", cabinet.blocks());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_values() {
        assert_eq!(parse_values("1, -2,3"), Ok(vec![1, -2, 3]));
        assert_eq!(parse_values(""), Ok(vec![]));
        assert!(parse_values("1,a").is_err());
    }

    #[test]
    fn test_parse_sets() {
        assert_eq!(parse_sets("1,2;3"), Ok(InputSets(vec![vec![1, 2], vec![3]])));
        assert_eq!(parse_sets(";5"), Ok(InputSets(vec![vec![], vec![5]])));
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from(["intcode", "run", "3,0,4,0,99", "--input", "7,-1"]).unwrap();
        match cli.command {
            Command::Run { program, input } => {
                assert_eq!(program, "3,0,4,0,99");
                assert_eq!(input, vec![7, -1]);
            }
            _ => panic!("expected run"),
        }

        let cli = Cli::try_parse_from(["intcode", "run", "99"]).unwrap();
        assert!(matches!(cli.command, Command::Run { input, .. } if input.is_empty()));

        let cli = Cli::try_parse_from(["intcode", "batch", "99", "--inputs", "1;2,3"]).unwrap();
        match cli.command {
            Command::Batch { inputs, .. } => {
                assert_eq!(inputs, InputSets(vec![vec![1], vec![2, 3]]));
            }
            _ => panic!("expected batch"),
        }
    }
}
