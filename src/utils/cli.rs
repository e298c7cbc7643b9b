use std::io::Write;

use clap::{Parser, Subcommand};

use crate::prelude::*;

#[derive(Parser)]
#[command(name = env!("CARGO_PKG_NAME"), version = env!("CARGO_PKG_VERSION"), about = env!("CARGO_PKG_DESCRIPTION") )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play interactively against the engine (you are Red)
    Play {
        /// Starting position, e.g. "R:R1-20:B31-50"
        #[arg(short, long, default_value = START_POSITION)]
        position: String,
        /// Search depth
        #[arg(short, long, default_value = "8")]
        depth: u8,
        /// Time budget per move in milliseconds (overrides depth)
        #[arg(short, long)]
        time_ms: Option<u64>,
        /// TOML file with evaluation weight overrides
        #[arg(short, long)]
        weights: Option<String>,
    },

    /// Search a position once and print the best move
    Analyze {
        /// Position to analyze
        #[arg(short, long, default_value = START_POSITION)]
        position: String,
        /// Search depth
        #[arg(short, long, default_value = "8")]
        depth: u8,
    },

    /// Engine vs engine from the starting position
    Selfplay {
        /// Search depth for both sides
        #[arg(short, long, default_value = "6")]
        depth: u8,
        /// Stop after this many moves if no result
        #[arg(short, long, default_value = "150")]
        max_moves: u32,
    },
}

#[derive(Parser, Debug)]
#[command(name = "game_cmd", no_binary_name = true)]
pub struct GameCommand {
    #[command(subcommand)]
    pub cmd: GameSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum GameSubcommand {
    /// Make a move, e.g. "move 33 28" (captures resolve automatically)
    #[clap(visible_alias = "m")]
    Move { from: String, to: String },

    /// Print the current board state
    #[clap(visible_alias = "p")]
    Print,

    /// Ask the engine for the best move in the current position
    #[clap(visible_alias = "h")]
    Hint,

    /// Show the static evaluation of the current position
    #[clap(visible_alias = "e")]
    Eval,

    /// Show the current position notation, or set a new one
    #[clap(visible_alias = "f")]
    Fen { set: Option<String> },

    /// Change the engine search depth
    #[clap(visible_alias = "d")]
    Depth { depth: u8 },

    /// Set the console log level (trace|debug|info|warn|error) and/or
    /// toggle file logging, e.g. "log debug" or "log --file true"
    #[clap(visible_alias = "l")]
    Log {
        level: Option<String>,
        #[arg(short, long)]
        file: Option<bool>,
    },

    /// Restart from the original position
    #[clap(visible_alias = "r")]
    Restart,

    /// Clear screen
    #[clap(visible_alias = "c")]
    Clear,

    /// Quit game
    #[clap(visible_alias = "q")]
    Quit,
}

fn read_command() -> Result<Option<GameCommand>> {
    print!("> ");
    std::io::stdout().flush().into_diagnostic()?;

    let mut line = String::new();
    std::io::stdin()
        .read_line(&mut line)
        .into_diagnostic()
        .context("Reading command")?;
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let words = shell_words::split(line)
        .into_diagnostic()
        .context("Splitting command")?;
    match GameCommand::try_parse_from(words) {
        Ok(cmd) => Ok(Some(cmd)),
        Err(e) => {
            println!("{e}");
            Ok(None)
        }
    }
}

fn announce(board: &Board, status: GameStatus) -> bool {
    match status {
        GameStatus::Ongoing => false,
        GameStatus::Draw => {
            println!("{board}");
            println!("Draw: one king each.");
            true
        }
        GameStatus::Win(side) => {
            println!("{board}");
            println!("{side} wins: opponent has no legal move.");
            true
        }
    }
}

fn engine_reply(board: &mut Board, search: &mut AlphaBetaSearch) -> Result<bool> {
    match engine::choose_move(board, None, search) {
        Some(mv) => {
            println!("Engine plays {mv}");
            board.apply_move(mv)?;
            Ok(announce(board, board.game_status()))
        }
        None => {
            // No legal engine move: the human side has already won.
            Ok(announce(board, board.game_status()))
        }
    }
}

/// Interactive loop: the human plays Red, the engine Black.
pub fn run_game_loop(
    position: &str,
    depth: u8,
    time_ms: Option<u64>,
    weights: Option<&str>,
) -> Result<()> {
    let start = Board::from_position(position)?;
    let mut board = start;

    let evaluator: Box<dyn Evaluator> = match weights {
        Some(path) => {
            let w = EvalWeights::from_toml_file(path)?;
            Box::new(HeuristicEvaluator::with_weights(w))
        }
        None => Box::new(HeuristicEvaluator::new()),
    };
    let mut search = AlphaBetaSearch::with_evaluator(depth, evaluator);
    if let Some(ms) = time_ms {
        search.set_time(ms);
    }

    println!("{board}");

    loop {
        let Some(command) = read_command()? else {
            continue;
        };

        match command.cmd {
            GameSubcommand::Move { from, to } => {
                let spec = format!("{from}-{to}");
                let (from, to) = match parse_move_spec(&spec) {
                    Ok(pair) => pair,
                    Err(e) => {
                        println!("{e}");
                        continue;
                    }
                };
                let Some(mv) = move_gen::resolve_move(&board, from, to) else {
                    println!("Illegal move: {from}-{to}");
                    continue;
                };
                board.apply_move(mv)?;
                println!("{board}");
                if announce(&board, board.game_status()) {
                    break;
                }
                if engine_reply(&mut board, &mut search)? {
                    break;
                }
                println!("{board}");
            }
            GameSubcommand::Print => println!("{board}"),
            GameSubcommand::Hint => {
                let result = search.find_best_move(&board);
                match result.best_move {
                    Some(mv) => println!(
                        "Best move: {mv} (score {}, depth {}, {} nodes)",
                        result.score, result.depth, result.nodes_searched
                    ),
                    None => println!("No legal moves."),
                }
            }
            GameSubcommand::Eval => {
                let score = search.evaluator.evaluate(&board, board.stm);
                println!("{} to move, eval {score}", board.stm);
            }
            GameSubcommand::Fen { set } => match set {
                Some(notation) => match Board::from_position(&notation) {
                    Ok(new_board) => {
                        board = new_board;
                        println!("{board}");
                    }
                    Err(e) => println!("{e}"),
                },
                None => println!("{}", board.to_position()),
            },
            GameSubcommand::Depth { depth } => {
                search.set_depth(depth);
                println!("Depth set to {depth}");
            }
            GameSubcommand::Log { level, file } => {
                if let Some(level) = level {
                    match level.parse::<Level>() {
                        Ok(level) => {
                            set_log_level(level)?;
                            println!("Console log level set to {level}");
                        }
                        Err(_) => println!("Unknown log level '{level}'"),
                    }
                }
                if let Some(enable) = file {
                    toggle_file_logging(enable)?;
                    println!(
                        "File logging {}",
                        if enable { "enabled" } else { "disabled" }
                    );
                }
            }
            GameSubcommand::Restart => {
                board = start;
                search.clear();
                println!("{board}");
            }
            GameSubcommand::Clear => utils::clear_screen()?,
            GameSubcommand::Quit => break,
        }
    }

    Ok(())
}

/// One-shot search of a position.
pub fn analyze(position: &str, depth: u8) -> Result<()> {
    let board = Board::from_position(position)?;
    println!("{board}");

    let mut search = AlphaBetaSearch::new(depth);
    search.config.emit_info = true;
    let result = search.find_best_move(&board);

    match result.best_move {
        Some(mv) => println!(
            "Best move: {mv} (score {}, depth {}, {} nodes, {} nps)",
            result.score,
            result.depth,
            result.nodes_searched,
            result.nps()
        ),
        None => println!("No legal moves: {} has lost.", board.stm),
    }
    Ok(())
}

/// Engine vs engine smoke game.
pub fn selfplay(depth: u8, max_moves: u32) -> Result<()> {
    let mut board = Board::new();
    let mut search = AlphaBetaSearch::new(depth);

    for move_number in 1..=max_moves {
        match board.game_status() {
            GameStatus::Ongoing => {}
            status => {
                announce(&board, status);
                return Ok(());
            }
        }

        let Some(mv) = engine::choose_move(&board, None, &mut search) else {
            announce(&board, board.game_status());
            return Ok(());
        };
        info!(move_number, side = %board.stm, mv = %mv, "selfplay");
        println!("{move_number:3}. {} {mv}", board.stm);
        board.apply_move(mv)?;
    }

    println!("No result after {max_moves} moves.");
    println!("{board}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_command_parses_level_and_file_toggle() {
        let cmd = GameCommand::try_parse_from(["log", "debug"]).unwrap();
        let GameSubcommand::Log { level, file } = cmd.cmd else {
            panic!("expected log subcommand");
        };
        assert_eq!(level.as_deref(), Some("debug"));
        assert!(file.is_none());
        assert!("debug".parse::<Level>().is_ok());

        let cmd = GameCommand::try_parse_from(["log", "--file", "true"]).unwrap();
        let GameSubcommand::Log { level, file } = cmd.cmd else {
            panic!("expected log subcommand");
        };
        assert!(level.is_none());
        assert_eq!(file, Some(true));
    }

    #[test]
    fn move_command_accepts_bare_squares() {
        let cmd = GameCommand::try_parse_from(["move", "33", "28"]).unwrap();
        let GameSubcommand::Move { from, to } = cmd.cmd else {
            panic!("expected move subcommand");
        };
        assert_eq!(from, "33");
        assert_eq!(to, "28");
    }
}
