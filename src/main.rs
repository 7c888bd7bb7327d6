//! Binary entrypoint for the Lady Black CLI.
//!
//! Commands:
//! - `play` (default) - run one interactive session in this terminal
//! - `init` - write a starter `ladyblack.toml`
//! - `riddle` - fetch one riddle from the configured oracle and print it as JSON
//!
//! See the library crate docs for module-level details: `ladyblack::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::{error, info};

use ladyblack::config::{Config, OracleBackend};
use ladyblack::game::Game;
use ladyblack::stats;
use ladyblack::terminal::{ConsoleTerminal, SurfaceError};

#[derive(Parser)]
#[command(name = "ladyblack")]
#[command(about = "A midnight riddle game with a ghost who does not like losing")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "ladyblack.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a session
    Play {
        /// Oracle backend: http or anthropic
        #[arg(long)]
        backend: Option<OracleBackend>,

        /// Riddle server root for the http backend
        #[arg(long)]
        base_url: Option<String>,

        /// Skip all narration delays
        #[arg(long)]
        fast: bool,
    },
    /// Write a default configuration file
    Init,
    /// Fetch a single riddle and print it as JSON
    Riddle {
        /// Oracle backend: http or anthropic
        #[arg(long)]
        backend: Option<OracleBackend>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Play {
        backend: None,
        base_url: None,
        fast: false,
    });

    match command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            println!("Wrote {}", cli.config);
        }
        Commands::Riddle { backend } => {
            let mut config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            if let Some(backend) = backend {
                config.oracle.backend = backend;
            }
            let oracle = ladyblack::oracle::from_config(&config.oracle)?;
            let riddle = oracle.generate_riddle().await?;
            println!("{}", serde_json::to_string_pretty(&riddle)?);
        }
        Commands::Play {
            backend,
            base_url,
            fast,
        } => {
            let mut config = Config::load_or_default(&cli.config).await?;
            init_logging(&Some(config.clone()), cli.verbose);
            if let Some(backend) = backend {
                config.oracle.backend = backend;
            }
            if let Some(url) = base_url {
                config.oracle.base_url = url;
            }
            if fast {
                config.display.pacing = 0.0;
            }
            play(config).await?;
        }
    }

    Ok(())
}

async fn play(config: Config) -> Result<()> {
    info!(
        "Starting Lady Black v{} with {:?} oracle",
        env!("CARGO_PKG_VERSION"),
        config.oracle.backend
    );
    let oracle = ladyblack::oracle::from_config(&config.oracle)?;
    let term = ConsoleTerminal::stdio(config.display.color, config.display.pacing);
    let mut game = Game::new(term, oracle).with_wrap_width(config.display.wrap_width);

    let outcome = game.run().await;
    // The console leaves the cursor at the end of the last line.
    println!();
    info!("session stats: {}", stats::snapshot());

    match outcome {
        Ok(end) => {
            info!("session finished: {:?}", end);
            Ok(())
        }
        Err(err) => match err.downcast_ref::<SurfaceError>() {
            Some(SurfaceError::InputClosed) => {
                info!("input closed; leaving the manor");
                Ok(())
            }
            _ => {
                error!("fatal: {:#}", err);
                eprintln!("FATAL: {}", err);
                std::process::exit(1);
            }
        },
    }
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match (verbosity, config) {
        (0, Some(cfg)) => cfg.logging.level_filter(),
        (0, None) => log::LevelFilter::Info,
        (1, _) => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let file = config
        .as_ref()
        .and_then(|cfg| cfg.logging.file.clone())
        .and_then(|path| {
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .ok()
        });

    match file {
        Some(f) => {
            let sink = std::sync::Mutex::new(f);
            builder.format(move |_fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                if let Ok(mut guard) = sink.lock() {
                    let _ = writeln!(guard, "{} [{}] {}", ts, record.level(), record.args());
                }
                Ok(())
            });
        }
        None => {
            // stderr shares the screen with the game unless it is redirected
            let shares_screen =
                atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout);
            if shares_screen && verbosity == 0 {
                builder.filter_level(log::LevelFilter::Off);
            }
            builder.target(env_logger::Target::Stderr);
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    }
    let _ = builder.try_init();
}
