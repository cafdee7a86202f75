use clap::Parser;
use fruitbell::core::config::{self, CliOverrides};
use fruitbell::term;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "fruitbell", about = "Ring the bell before the AI does")]
struct Args {
    /// Number of rounds to play
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Seed for a reproducible card and delay sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Config file (default: ~/.fruitbell/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write a debug log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let cli = CliOverrides {
        rounds: args.rounds,
        seed: args.seed,
        log_file: args.log_file,
    };
    let loaded = config::load_config(args.config.as_deref());
    let (resolved, problems) =
        config::resolve_or_fallback(loaded, &cli, |key| std::env::var(key).ok());
    for problem in &problems {
        eprintln!("{problem}; using defaults");
    }

    // Stdout is the game board, so logs only ever go to a file
    if let Some(path) = &resolved.log_file {
        let log_config = ConfigBuilder::new()
            .set_time_format_rfc3339()
            .build();
        let level = resolved.log_level.parse().unwrap_or(LevelFilter::Debug);

        match File::create(path) {
            Ok(log_file) => {
                let _ = WriteLogger::init(level, log_config, log_file);
            }
            Err(e) => eprintln!("Could not open log file {}: {e}", path.display()),
        }
    }

    log::info!("fruitbell starting: {:?}", resolved);

    term::run(resolved).await?;
    Ok(())
}
