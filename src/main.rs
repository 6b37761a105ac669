//! PhonoFix CLI - serve the web UI or edit the phoneme table from the terminal

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use phonofix::config::{self, PhonofixConfig};
use phonofix::storage::SqliteStore;
use phonofix::ui::{self, Icons, TableBuilder};
use phonofix::{Access, check_inputs};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "phonofix")]
#[command(version)]
#[command(about = "PhonoFix - maintain a text-to-phoneme lookup table")]
#[command(long_about = r#"
PhonoFix keeps a table of (text, phoneme) pairs, keyed by text:
  • Insert a pair, or replace the phoneme of an existing text
  • Search texts with a case-insensitive regular expression
  • Edit the table from a two-tab web page

Example usage:
  phonofix serve --port 7860
  phonofix add "hello" "h|e|l|o"
  phonofix search "hel"
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Database connection string (path to the SQLite file)
    #[arg(short, long, global = true, env = config::DATABASE_ENV)]
    database: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the web UI
    Serve {
        /// Address to bind (defaults to the config file, then 127.0.0.1)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (defaults to the config file, then 7860)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Insert a text, or update its phoneme if it already exists
    Add {
        /// Text key
        text: String,

        /// Phoneme, syllables separated by '|'
        phoneme: String,
    },

    /// List entries whose text matches a case-insensitive pattern
    Search {
        /// Regular expression; lists everything when omitted
        query: Option<String>,

        /// Maximum rows to display (defaults to the config display limit)
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show statistics about the store
    Stats {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a starter config file
    Init {
        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },
}

fn open_store(cli_database: Option<&str>, config: &PhonofixConfig) -> anyhow::Result<SqliteStore> {
    let path = config.database_path(cli_database);
    config::ensure_db_dir(&path)?;
    Ok(SqliteStore::open(&path)?)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    let database = cli.database.as_deref();

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| config.host().to_string());
            let port = port.unwrap_or_else(|| config.port());
            let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

            let store = open_store(database, &config)?;
            ui::header("PhonoFix");
            ui::info("Database", &config.database_path(database).display().to_string());

            tokio::runtime::Runtime::new()?
                .block_on(phonofix::server::start_server(addr, store, config.display_limit()))?;
        }

        Commands::Add { text, phoneme } => {
            if !check_inputs(&text, &phoneme) {
                anyhow::bail!("text and phoneme must both be non-empty");
            }

            let store = open_store(database, &config)?;
            let status = Access::new(&store).upsert(&text, &phoneme);
            ui::status_line(&status);
            store.close()?;

            if status.is_error() {
                std::process::exit(1);
            }
        }

        Commands::Search { query, limit, json } => {
            let store = open_store(database, &config)?;
            let outcome = Access::new(&store).search(query.as_deref());
            store.close()?;

            if let Some(message) = &outcome.error {
                ui::error(message);
                std::process::exit(1);
            }

            let limit = limit.unwrap_or_else(|| config.display_limit());
            let shown = outcome.entries.truncated(limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else if shown.is_empty() {
                println!("{} No entries found.", Icons::EMPTY);
            } else {
                println!("{}", ui::entries_table(&shown));
                if outcome.entries.len() > limit {
                    println!("Showing {} of {} entries", limit, outcome.entries.len());
                }
            }
        }

        Commands::Stats { json } => {
            let store = open_store(database, &config)?;
            let stats = store.stats()?;
            store.close()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
                return Ok(());
            }

            println!("{} PhonoFix Statistics ({})", Icons::STATS, config.database_path(database).display());
            let mut table = TableBuilder::new();
            table.add_row("Entries", &stats.entries.to_string());
            table.add_row("Unique text index", if stats.unique_text_index { "present" } else { "missing" });
            println!("{}", table.build());

            if !stats.unique_text_index {
                ui::warn("Without a unique index on text, add inserts duplicates instead of updating");
            }
        }

        Commands::Init { force } => {
            let path = cli.config.clone().unwrap_or_else(config::default_config_path);
            config::write_config(&path, &PhonofixConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }
    }

    Ok(())
}
