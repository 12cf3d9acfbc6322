use anyhow::Context;
use clap::Parser;
use nearest_store::browser;
use nearest_store::config::{LoggingSettings, Settings};
use nearest_store::{Pipeline, Session};
use std::path::PathBuf;
use tokio::io::{stdin, stdout, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nearest-store")]
#[command(about = "Find the least crowded grocery store near a Canadian postal code")]
struct Cli {
    /// Configuration file to load instead of config/default.toml and config/local.toml
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Run once for this postal code instead of prompting
    #[arg(long, short)]
    postal_code: Option<String>,

    /// Only consider stores that are open now
    #[arg(long)]
    open_now: bool,

    /// Do not open the map in a browser
    #[arg(long)]
    no_browser: bool,
}

fn init_tracing(logging: &LoggingSettings) {
    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr);

    if logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .context("Failed to load configuration")?;

    if cli.open_now {
        settings.search.open_now = true;
    }
    if cli.no_browser {
        settings.output.open_browser = false;
    }

    init_tracing(&settings.logging);
    info!("Configuration loaded successfully");

    let pipeline = Pipeline::from_settings(&settings).context("Failed to initialize providers")?;
    let open_browser = settings.output.open_browser;
    let on_outcome = |outcome: &nearest_store::RunOutcome| {
        if open_browser {
            if let Err(e) = browser::open(&outcome.map_path) {
                warn!("Could not open {} in a browser: {}", outcome.map_path.display(), e);
            }
        }
    };

    let mut session = Session::new(&pipeline);
    let mut output = stdout();

    let completed = match cli.postal_code {
        Some(postal_code) => {
            // One attempt, then the quit sentinel
            let script = format!("{}\nq\n", postal_code);
            session.drive(&mut script.as_bytes(), &mut output, on_outcome).await?
        }
        None => {
            let mut input = BufReader::new(stdin());
            session.drive(&mut input, &mut output, on_outcome).await?
        }
    };

    info!("Session finished after {} completed runs", completed);
    Ok(())
}
