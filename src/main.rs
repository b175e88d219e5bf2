use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use release_notes_sync::clock::SystemClock;
use release_notes_sync::config::Config;
use release_notes_sync::db::Database;
use release_notes_sync::fetcher::ReleaseFetcher;
use release_notes_sync::github::GithubClient;
use release_notes_sync::importer::{NotesImporter, SourceOutcome};

#[derive(Parser)]
#[command(name = "relnotes")]
#[command(about = "Sync release notes in a release catalog with GitHub releases")]
struct Cli {
    /// Path to the release catalog (overrides RELNOTES_DB)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Import release notes from GitHub for every tracked source
    Sync,
    /// Manage release sources
    Source {
        #[command(subcommand)]
        command: SourceCommands,
    },
    /// Manage release versions
    Version {
        #[command(subcommand)]
        command: VersionCommands,
    },
    /// Print the stored notes of a release version
    Notes {
        /// Release source, e.g. github.com/owner/repo
        source: String,
        /// Version without the `v` prefix, e.g. 1.2.3
        version: String,
    },
}

#[derive(Subcommand)]
enum SourceCommands {
    /// Track a release source
    Add {
        /// Release source, e.g. github.com/owner/repo
        source: String,
    },
    /// List tracked release sources
    List,
}

#[derive(Subcommand)]
enum VersionCommands {
    /// Track a version of a release source
    Add {
        source: String,
        /// Version without the `v` prefix, e.g. 1.2.3
        version: String,
    },
    /// List tracked versions of a release source
    List { source: String },
}

/// Initialize tracing with output to stderr so stdout only carries command output
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "release_notes_sync=info".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut config = Config::from_env();
    if cli.db.is_some() {
        config.catalog_path = cli.db;
    }

    let db = Database::open(config.catalog_path()?)?;
    db.migrate()?;

    match cli.command.unwrap_or(Commands::Sync) {
        Commands::Sync => sync(db, &config).await?,
        Commands::Source { command } => match command {
            SourceCommands::Add { source } => {
                db.add_source(&source)?;
                println!("Tracking {}", source);
            }
            SourceCommands::List => {
                for source in db.get_all_sources()? {
                    println!("{}", source);
                }
            }
        },
        Commands::Version { command } => match command {
            VersionCommands::Add { source, version } => {
                let record = db.add_version(&source, &version)?;
                println!("Tracking {}", record);
            }
            VersionCommands::List { source } => {
                for record in db.get_versions_by_source(&source)? {
                    println!("{}", record.version_raw);
                }
            }
        },
        Commands::Notes { source, version } => {
            let record = db
                .find_version(&source, &version)?
                .ok_or_else(|| anyhow::anyhow!("Version {} of {} not found", version, source))?;
            match db.get_version_notes(record.id)? {
                Some(note) => println!("{}", note.content),
                None => eprintln!("No notes imported for {}", record),
            }
        }
    }

    Ok(())
}

async fn sync(db: Database, config: &Config) -> anyhow::Result<()> {
    if config.github_token.is_none() {
        tracing::warn!("GH_PERSONAL_ACCESS_TOKEN not set, GitHub allows only 60 requests per hour");
    }

    let client = GithubClient::new(&config.github_api_url, config.github_token.clone())?;
    let fetcher = ReleaseFetcher::new(client, SystemClock)
        .with_page_size(config.page_size)
        .with_low_water_mark(config.low_water_mark);

    let report = NotesImporter::new(db, fetcher).sync().await?;

    for entry in &report.sources {
        match &entry.outcome {
            SourceOutcome::Synced { updated, unmatched } => {
                println!("{}: {} updated, {} unmatched", entry.source, updated, unmatched);
            }
            SourceOutcome::FetchFailed { error } => {
                println!("{}: skipped ({})", entry.source, error);
            }
            SourceOutcome::Unsupported | SourceOutcome::NoVersions => {}
        }
    }

    println!("Done");
    Ok(())
}
