use clap::Parser;
use dammen::prelude::*;
use dammen::utils::cli;

fn main() -> miette::Result<()> {
    init();

    let span = span!(Level::DEBUG, "main");
    let _guard = span.enter();
    match cli::Cli::parse().command {
        Some(cmd) => match cmd {
            cli::Commands::Play {
                position,
                depth,
                time_ms,
                weights,
            } => {
                trace!(position, depth, ?time_ms, "starting game");
                cli::run_game_loop(&position, depth, time_ms, weights.as_deref())?;
            }
            cli::Commands::Analyze { position, depth } => {
                trace!(position, depth, "analyzing");
                cli::analyze(&position, depth)?;
            }
            cli::Commands::Selfplay { depth, max_moves } => {
                trace!(depth, max_moves, "selfplay");
                cli::selfplay(depth, max_moves)?;
            }
        },
        None => {
            cli::run_game_loop(START_POSITION, DEFAULT_DEPTH, None, None)?;
        }
    }
    Ok(())
}
