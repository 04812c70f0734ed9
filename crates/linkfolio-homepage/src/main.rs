//! Linkfolio - link-in-bio pages
//!
//! ## Usage
//!
//! ```bash
//! # Serve pages from a fixture file
//! linkfolio --fixture fixtures/demo.json serve --bind 127.0.0.1:8080
//!
//! # Serve pages from Firestore
//! LINKFOLIO_FIRESTORE_PROJECT=my-project linkfolio serve
//!
//! # Print a page's links
//! linkfolio --fixture fixtures/demo.json show alice
//!
//! # Write alice's contact card to ./cards/Alice_Smith.vcf
//! linkfolio --fixture fixtures/demo.json export alice --out-dir cards
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use linkfolio_core::{
    DirectorySink, DocumentStore, InMemoryDocumentStore, ProfileLoader, ProfileSession, ViewState,
    deliver_artifact,
};
use linkfolio_firestore::{FirestoreConfig, FirestoreStore};
use linkfolio_homepage::{AppState, HomepageConfig, serve};
use linkfolio_logging::{LinkfolioSubscriberBuilder, LogConfig, WorkerGuard};
use tracing::info;

/// Linkfolio - link-in-bio pages
#[derive(Parser)]
#[command(name = "linkfolio")]
#[command(about = "Serve and export link-in-bio pages")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,

    /// Default log level (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Console log format
    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct StoreArgs {
    /// Read pages from a JSON fixture file
    #[arg(long, global = true, env = "LINKFOLIO_FIXTURE", conflicts_with = "firestore_project")]
    fixture: Option<PathBuf>,

    /// Read pages from this Firestore project
    #[arg(long, global = true, env = "LINKFOLIO_FIRESTORE_PROJECT")]
    firestore_project: Option<String>,

    /// Firestore web API key
    #[arg(long, global = true, env = "LINKFOLIO_FIRESTORE_API_KEY", hide_env_values = true)]
    firestore_api_key: Option<String>,

    /// Firestore REST root (for the emulator)
    #[arg(long, global = true)]
    firestore_base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Pretty,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP homepage
    Serve {
        /// Listen address
        #[arg(long, env = "LINKFOLIO_BIND", default_value_t = HomepageConfig::default().bind)]
        bind: SocketAddr,
    },
    /// Print a page's links
    Show {
        /// Profile identifier
        user_id: String,
    },
    /// Write a page's contact card to a directory
    Export {
        /// Profile identifier
        user_id: String,
        /// Destination directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(&cli)?;

    let loader = ProfileLoader::new(build_store(&cli.store)?);

    match cli.command {
        Command::Serve { bind } => {
            let config = HomepageConfig::default().with_bind(bind);
            serve(config, AppState::new(loader))
                .await
                .context("homepage server failed")?;
        }
        Command::Show { user_id } => cmd_show(loader, &user_id).await?,
        Command::Export { user_id, out_dir } => cmd_export(&loader, &user_id, out_dir).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let pretty = matches!(cli.log_format, LogFormat::Pretty);

    LinkfolioSubscriberBuilder::new()
        .with_config(LogConfig::cli(pretty, &cli.log_level))
        .try_init()
        .context("failed to initialize logging")
}

fn build_store(args: &StoreArgs) -> Result<Arc<dyn DocumentStore>> {
    if let Some(path) = &args.fixture {
        let store = InMemoryDocumentStore::from_fixture_file(path)
            .with_context(|| format!("failed to load fixture {}", path.display()))?;
        info!(path = %path.display(), "Using fixture store");
        return Ok(Arc::new(store));
    }

    if let Some(project) = &args.firestore_project {
        let mut config = FirestoreConfig::new(project);
        if let Some(key) = &args.firestore_api_key {
            config = config.with_api_key(key);
        }
        if let Some(base_url) = &args.firestore_base_url {
            config = config.with_base_url(base_url);
        }
        let store = FirestoreStore::new(config).context("failed to create Firestore client")?;
        info!(project = %project, "Using Firestore store");
        return Ok(Arc::new(store));
    }

    bail!("no store configured: pass --fixture or --firestore-project")
}

async fn cmd_show(loader: ProfileLoader, user_id: &str) -> Result<()> {
    let session = ProfileSession::new(loader);
    session.navigate(user_id).await;

    let ViewState::Ready(page) = session.current() else {
        bail!("User not found: {user_id}");
    };

    println!("{}", page.profile.name);
    if let Some(title) = &page.profile.title {
        println!("{title}");
    }
    for row in &page.rows {
        println!("  {}  {:<24} {}", row.icon.glyph(), row.label, row.href);
    }
    Ok(())
}

async fn cmd_export(loader: &ProfileLoader, user_id: &str, out_dir: PathBuf) -> Result<()> {
    let Some(page) = loader.load_outcome(user_id).await.into_page() else {
        bail!("User not found: {user_id}");
    };

    let artifact = page.contact_card();
    let sink = DirectorySink::new(out_dir);
    let destination = sink.destination_for(&artifact)?;

    deliver_artifact(&sink, &artifact)
        .with_context(|| format!("failed to write {}", destination.display()))?;

    println!("Wrote {}", destination.display());
    Ok(())
}
