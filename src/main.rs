mod error;
mod extract;
mod fetch;
mod output;
mod state;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use error::Result;
use output::OutputSink;
use state::StateStore;

const URL: &str = "https://uni-freiburg.de/en/studies/during-your-studies/apis/";
const DEFAULT_STATE_DIR: &str = ".state";

const START_MARKER: &str = "Current social events";
const END_MARKER: &str = "Past events";

#[derive(Parser)]
#[command(name = "apis_watch", about = "Watch the APIS page for social event updates")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the page, compare against persisted state, emit step outputs
    Check {
        /// Page to watch
        #[arg(long, default_value = URL)]
        url: String,
        /// Directory holding the digest and text state files
        #[arg(long, default_value = DEFAULT_STATE_DIR)]
        state_dir: PathBuf,
    },
    /// Print the persisted section without fetching anything
    Show {
        #[arg(long, default_value = DEFAULT_STATE_DIR)]
        state_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        // Print the reason and exit non-zero so the workflow run is flagged.
        println!("ERROR: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Check { url, state_dir } => {
            let html = fetch::fetch_page(&url).await?;
            let store = StateStore::new(state_dir);
            let mut sink = output::GithubOutput::from_env();

            let changed = check_page(&html, &url, &store, sink.as_mut())?;
            if changed {
                println!("CHANGED: Current social events updated.");
            } else {
                println!("No change.");
            }
            Ok(())
        }
        Commands::Show { state_dir } => {
            let store = StateStore::new(state_dir);
            match (store.read_digest()?, store.read_text()?) {
                (Some(digest), Some(text)) => {
                    println!("sha256: {digest}");
                    println!("---");
                    println!("{text}");
                }
                _ => println!("No persisted state. Run 'check' first."),
            }
            Ok(())
        }
    }
}

/// One watch pass over already-fetched markup: extract the section between
/// the markers, compare its digest against the persisted one, persist the
/// new state, emit the step outputs. Returns whether the section changed.
///
/// State is written on every successful pass, not only on change, so the
/// next run always compares against the latest content. A failure anywhere
/// before the write stage leaves the state files untouched.
fn check_page(
    html: &str,
    url: &str,
    store: &StateStore,
    sink: &mut dyn OutputSink,
) -> Result<bool> {
    let block = extract::extract_section(html, START_MARKER, END_MARKER)?;
    let digest = state::sha256_hex(&block);

    let prev = store.read_digest()?;
    let changed = prev.as_deref() != Some(digest.as_str());

    store.write(&digest, &block)?;

    sink.emit("changed", if changed { "true" } else { "false" })?;
    sink.emit("url", url)?;
    sink.emit("content", &block)?;

    Ok(changed)
}

// ── Tests ──
