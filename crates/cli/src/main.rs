mod analyze;
mod game;
mod players;
mod selfplay;
mod ui;

use std::path::PathBuf;

use amazons_core::level::NUM_LEVELS;
use amazons_core::types::Depth;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
struct EngineParams {
    /// Level of the White AI (0 easy, 1 medium, 2 hard)
    #[arg(long, default_value = "2", value_parser = parse_level)]
    white_level: usize,

    /// Level of the Black AI (0 easy, 1 medium, 2 hard)
    #[arg(long, default_value = "2", value_parser = parse_level)]
    black_level: usize,

    /// Search this many plies instead of following the ply-count schedule
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=6))]
    depth: Option<Depth>,

    /// Pause before the AI answers a ply, in milliseconds
    #[arg(long, default_value = "500")]
    think_ms: u64,

    /// Default file for `save`; selfplay writes the finished game here
    #[arg(long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    save: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(name = "amazons-cli", version, about = "Game of the Amazons in the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<SubCommands>,

    #[command(flatten)]
    engine_params: EngineParams,
}

#[derive(Debug, Subcommand)]
enum SubCommands {
    /// Let the AI play both sides
    Selfplay {
        #[command(flatten)]
        engine_params: EngineParams,
    },
    /// Print the AI's choice for a saved position
    Analyze {
        #[arg()]
        file: PathBuf,

        #[command(flatten)]
        engine_params: EngineParams,
    },
}

fn parse_level(s: &str) -> Result<usize, String> {
    let level: usize = s.parse().map_err(|_| format!("`{s}` is not a level"))?;
    if level < NUM_LEVELS {
        Ok(level)
    } else {
        Err(format!("level must be between 0 and {}", NUM_LEVELS - 1))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    let result = match args.command {
        Some(SubCommands::Selfplay { engine_params }) => selfplay::run(&engine_params),
        Some(SubCommands::Analyze {
            file,
            engine_params,
        }) => {
            if !file.exists() {
                eprintln!("File does not exist: {}", file.display());
                return;
            }
            analyze::run(&file, &engine_params)
        }
        None => ui::ui_loop(&args.engine_params),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
