use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use gambit_cli::Session;

/// Play chess against yourself in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Moves to make before handing over control, such as `--moves e2e4 e7e5`
    #[arg(short, long, num_args = 1..)]
    moves: Vec<String>,

    /// Draw the board without colors
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let mut session = Session::new();
    if !args.moves.is_empty() {
        session
            .make_move(&args.moves, &mut io::stdout())
            .context("Failed to apply opening moves")?;
    }

    session.run()
}
