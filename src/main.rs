//! bookmarks-mcp CLI - serve the bookmarks archive to an agent, or poke at it locally

use std::path::PathBuf;
use std::process::ExitCode;

use bookmarks_mcp::gateway::tool_text;
use bookmarks_mcp::query::{QueryExecutor, QueryFormat};
use bookmarks_mcp::ui::{self, Icons};
use bookmarks_mcp::{server, Gateway, GatewayConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "bookmarks-mcp")]
#[command(version)]
#[command(about = "Read-only MCP gateway over a SQLite bookmarks archive")]
#[command(long_about = r#"
bookmarks-mcp exposes a bookmarks archive to an agent through three tools:
  • get_schema   - every table definition
  • run_query    - arbitrary SQL on a read-only connection
  • search_text  - FTS5 search joined to users and links

Example usage:
  DB_PATH=bookmarks.db bookmarks-mcp serve
  bookmarks-mcp --database bookmarks.db search "rust AND async"
  bookmarks-mcp --database bookmarks.db query "SELECT count(*) FROM bookmarks" --format table
"#)]
struct Cli {
    /// Path to the bookmarks database
    #[arg(short, long, global = true, env = "DB_PATH")]
    database: Option<PathBuf>,

    /// TOML config file (defaults to ./bookmarks-mcp.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the MCP tools on stdin/stdout (default)
    Serve,

    /// Print every table definition
    Schema,

    /// Run a SQL statement read-only
    Query {
        /// SQL to execute
        sql: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Full-text search over bookmarks (FTS5 syntax)
    Search {
        /// Search expression
        query: String,
    },

    /// Row counts for the tables the search relies on
    Stats,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Table,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries protocol or command output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let gateway = match GatewayConfig::resolve(cli.database, cli.config.as_deref()).and_then(Gateway::new) {
        Ok(gateway) => gateway,
        Err(e) => {
            ui::error(&e.to_string());
            return ExitCode::FAILURE;
        }
    };

    match run(gateway, cli.command.unwrap_or(Commands::Serve)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(gateway: Gateway, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve => server::serve(gateway)?,

        Commands::Schema => {
            println!("{}", gateway.get_schema()?);
        }

        Commands::Query { sql, format } => {
            let output = match format {
                OutputFormat::Text => gateway.run_query_as(&sql, QueryFormat::Text)?,
                OutputFormat::Json => gateway.run_query_as(&sql, QueryFormat::Json)?,
                OutputFormat::Table => {
                    let store = gateway.open()?;
                    let outcome = QueryExecutor::new(&store).execute(&sql).map(|result| ui::query_table(&result));
                    tool_text(outcome)?
                }
            };
            println!("{}", output);
        }

        Commands::Search { query } => {
            let output = gateway.search_text(&query)?;
            if output.is_empty() {
                ui::warn(&format!("No bookmarks match {:?}", query));
            } else {
                println!("{}", output);
            }
        }

        Commands::Stats => {
            let store = gateway.open()?;
            let stats = store.stats()?;

            ui::header(Icons::STATS, "Bookmarks Archive Statistics");
            ui::info("Database", &store.path().display().to_string());
            println!("{}", ui::stats_table(&stats));

            if stats.is_complete() {
                ui::success("All search tables present");
            } else {
                ui::warn("Some tables are missing; search_text will fail until they exist");
            }
        }
    }

    Ok(())
}
