use clap::{Parser, Subcommand};
use std::io::Write;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::filter::EnvFilter;

use headcount_cli::app_state::AppState;
use headcount_cli::{commands, readline};

/// Initialize logging, writing to HEADCOUNT_LOG_PATH if set, otherwise stderr.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    if let Ok(path) = std::env::var("HEADCOUNT_LOG_PATH") {
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(true)
                .with_ansi(false)
                .with_writer(file)
                .init();
            return;
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), String> {
    init_logging();

    let state = Arc::new(RwLock::new(AppState::new()));

    loop {
        let line = readline()?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match respond(line, Arc::clone(&state)).await {
            Ok(quit) => {
                if quit {
                    break;
                }
            }
            Err(err) => {
                write!(std::io::stdout(), "{err}").map_err(|e| e.to_string())?;
                std::io::stdout().flush().map_err(|e| e.to_string())?;
            }
        }
    }

    Ok(())
}

#[derive(Parser)]
#[command(version, about = "live player and queue counts from game-server logs")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Select the server subsequent commands act on
    Use {
        #[arg(short, long)]
        guild: u64,
        #[arg(short, long)]
        server: String,
    },
    /// Feed one raw log line through the tracker (quote the line)
    Line { raw: String },
    Counts,
    Reset,
    Servers,
    /// Replace the server registry from a TOML file
    LoadRegistry {
        #[arg(short, long)]
        path: String,
    },
    Exit,
}

async fn respond(line: &str, state: Arc<RwLock<AppState>>) -> Result<bool, String> {
    let mut args = shlex::split(line).ok_or("error: Invalid quoting")?;
    args.insert(0, "headcount".to_string());
    let cli = Cli::try_parse_from(args).map_err(|e| e.to_string())?;

    match &cli.command {
        Some(Commands::Use { guild, server }) => {
            commands::use_server(*guild, server, Arc::clone(&state)).await
        }
        Some(Commands::Line { raw }) => commands::feed_line(raw, Arc::clone(&state)).await,
        Some(Commands::Counts) => commands::show_counts(Arc::clone(&state)).await,
        Some(Commands::Reset) => commands::reset(Arc::clone(&state)).await,
        Some(Commands::Servers) => commands::list_servers(Arc::clone(&state)).await,
        Some(Commands::LoadRegistry { path }) => {
            commands::load_registry(path, Arc::clone(&state)).await
        }
        Some(Commands::Exit) => {
            commands::exit();
            return Ok(true);
        }
        None => {}
    }
    Ok(false)
}
