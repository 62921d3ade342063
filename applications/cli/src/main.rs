/// Podcastr - terminal podcast player
use clap::{Parser, Subcommand};
use podcastr_cli::{listing, CliConfig, Repl};
use podcastr_playback::PlayerSession;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "podcastr")]
#[command(about = "Podcastr episode listing and player", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "PODCASTR_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List episodes, newest first
    List {
        /// JSON export of the episodes endpoint
        #[arg(short, long)]
        episodes: PathBuf,
    },
    /// Start the interactive player
    Play {
        /// JSON export of the episodes endpoint
        #[arg(short, long)]
        episodes: PathBuf,

        /// Start playing the whole list from this episode (past the end starts at the last)
        #[arg(short, long)]
        start: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log.filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Commands::List { episodes } => list(&config, &episodes)?,
        Commands::Play { episodes, start } => play(&config, &episodes, start)?,
    }

    Ok(())
}

fn list(config: &CliConfig, episodes: &Path) -> anyhow::Result<()> {
    let catalog = listing::load_catalog(episodes, &config.catalog)?;

    let mut stdout = BufWriter::new(io::stdout().lock());
    listing::write_catalog(&catalog, &mut stdout)?;
    stdout.flush()?;
    Ok(())
}

fn play(config: &CliConfig, episodes: &Path, start: Option<usize>) -> anyhow::Result<()> {
    let catalog = listing::load_catalog(episodes, &config.catalog)?;
    tracing::info!("Starting player with {} episodes", catalog.len());

    let session = PlayerSession::new(config.session());
    let mut repl = Repl::new(session, catalog, config.player.tick_seconds);

    let mut stdout = io::stdout().lock();
    if let Some(index) = start {
        repl.execute(podcastr_cli::Command::List(index), &mut stdout)?;
    }
    repl.run(io::stdin().lock(), &mut stdout)?;
    Ok(())
}
