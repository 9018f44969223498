use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;
use tracing::warn;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const EXIT_SUCCESS: i32 = 0;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build puzzles from the raw archives (default if no subcommand)
    Build,
    /// Score one tweet and show which rules fired
    Score {
        /// Tweet text; cleaned the same way archive tweets are
        text: String,
    },
    /// Write the default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "tweetle")]
#[command(about = "Guess-the-author puzzle generator", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/tweetle/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Number of puzzles to attempt
    #[arg(long)]
    count: Option<u32>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Output JSON path
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the raw archives
    #[arg(long)]
    raw_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tweetle={}", level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let command = cli.command.unwrap_or(Commands::Build);
    let config_path = cli.config.map(PathBuf::from);

    match command {
        Commands::Score { text } => {
            let cleaned = tweetle::ingest::clean_text(&text);
            let result = tweetle::scoring::evaluate(&cleaned);
            let use_colors = tweetle::output::should_use_colors();
            if cleaned != text {
                println!("Cleaned: {}", cleaned);
            }
            println!("{}", tweetle::output::format_breakdown(&result, use_colors));
        }
        Commands::Init { force } => {
            match tweetle::config::write_default_config(config_path, force) {
                Ok(path) => println!("Config written to {}", path.display()),
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            }
        }
        Commands::Build => {
            let start_time = Instant::now();

            // Load config
            let mut config = match tweetle::config::load_config(config_path) {
                Ok(c) => c,
                Err(e) => {
                    eprintln!("Config error: {:#}", e);
                    std::process::exit(EXIT_CONFIG);
                }
            };

            // Command-line flags win over the file
            if let Some(count) = cli.count {
                config.count = count;
            }
            if let Some(seed) = cli.seed {
                config.seed = seed;
            }
            if let Some(output) = cli.output {
                config.output = output;
            }
            if let Some(raw_dir) = cli.raw_dir {
                config.raw_dir = raw_dir;
            }

            if let Err(errors) = tweetle::config::validate_config(&config) {
                eprintln!("Config errors:");
                for error in errors {
                    eprintln!("  - {}", error);
                }
                std::process::exit(EXIT_CONFIG);
            }

            if !tweetle::config::has_enough_authors(&config) {
                warn!(
                    "Only {} authors configured; puzzles need 4, nothing will be generated",
                    config.authors.len()
                );
            }

            let report = tweetle::build::generate(&config);

            if let Err(e) = tweetle::output::write_puzzles(&config.output, &report.puzzles) {
                eprintln!("Failed to save puzzles: {:#}", e);
                std::process::exit(EXIT_IO);
            }

            println!("{}", tweetle::output::format_summary(&report));
            println!("Saved to {}", config.output.display());

            if let Some(first) = report.puzzles.first() {
                let use_colors = tweetle::output::should_use_colors();
                println!();
                println!("{}", tweetle::output::format_puzzle(first, use_colors));
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Total: {} puzzles in {:?}", report.produced(), start_time.elapsed());
            }
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
