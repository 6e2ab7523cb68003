//! Command-line interface (CLI) for exprkit-calc.
//!
//! Evaluates one expression, given with `--expr` or read as a single line from
//! standard input, and prints its tokenized, fully parenthesized and pretty
//! forms followed by the value. Set `RUST_LOG=trace` to watch the scanner and
//! the condensation rounds.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use smartstring::alias::String;
use std::io::{self, BufRead, Write};

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluates an expression
    Eval {
        /// Expression text; read from standard input when omitted
        #[arg(short, long)]
        expr: Option<String>,
    },
}

fn read_line() -> Result<std::string::String> {
    print!("Enter an expression to parse: ");
    io::stdout().flush()?;
    let mut line = std::string::String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("can't read expression from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    match args.command {
        Commands::Eval { expr } => {
            let input = match expr {
                Some(expr) => expr.to_string(),
                None => read_line()?,
            };
            let ev = exprkit_calc::evaluate(&input)
                .with_context(|| format!("can't evaluate {:?}", input))?;
            println!("Tokenized String: {}", ev.tokenized);
            println!("Parsed String: {}", ev.parsed);
            println!("Pretty String: {}", ev.pretty);
            println!("Evaluates to: {}", ev.value);
        }
    }

    Ok(())
}
