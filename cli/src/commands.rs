use std::path::Path;
use std::sync::Arc;

use tokio::sync::RwLock;

use headcount_core::config::TrackerConfig;
use headcount_types::ServerKey;

use crate::app_state::AppState;

/// Select the server that subsequent commands act on.
pub async fn use_server(guild_id: u64, server_id: &str, state: Arc<RwLock<AppState>>) {
    if guild_id == 0 || server_id.is_empty() {
        println!("error: guild id must be non-zero and server id non-empty");
        return;
    }

    let key = ServerKey::new(guild_id, server_id);
    let mut s = state.write().await;
    if s.config.find(guild_id, server_id).is_none() {
        println!("note: {key} is not in the registry, tracking ad hoc");
    }
    println!("active server: {key}");
    s.active_server = Some(key);
}

/// Feed one raw log line through the tracker for the active server.
pub async fn feed_line(raw: &str, state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    let Some(key) = s.active_server.clone() else {
        println!("no active server; `use --guild <id> --server <id>` first");
        return;
    };

    let applied = s.tracker.apply(&key, raw).await;
    s.sinks.dispatch(&key, &applied);

    if applied.event.is_none() {
        println!("no lifecycle match");
        return;
    }

    match serde_json::to_string_pretty(&applied) {
        Ok(json) => println!("{json}"),
        Err(e) => println!("error: {e}"),
    }
}

/// Show counts for the active server, or for every registry entry.
pub async fn show_counts(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;

    if let Some(key) = &s.active_server {
        let counts = s.tracker.live_counts(key).await;
        println!(
            "{key}: players={} queue={}",
            counts.player_count, counts.queue_count
        );
        return;
    }

    for entry in &s.config.servers {
        let counts = s.tracker.live_counts(&entry.key()).await;
        println!(
            "{}: players={} queue={}",
            entry.display_name(),
            counts.player_count,
            counts.queue_count
        );
    }
}

/// Discard all lifecycle state for the active server.
pub async fn reset(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;
    let Some(key) = &s.active_server else {
        println!("no active server");
        return;
    };
    s.tracker.reset(key).await;
    println!("reset {key}");
}

/// List registry entries and which servers currently hold state.
pub async fn list_servers(state: Arc<RwLock<AppState>>) {
    let s = state.read().await;

    if s.config.servers.is_empty() {
        println!("registry is empty");
    }
    for entry in &s.config.servers {
        let marker = if s.active_server.as_ref() == Some(&entry.key()) {
            "*"
        } else {
            " "
        };
        println!("{marker} {} ({})", entry.display_name(), entry.key());
    }

    let tracked = s.tracker.tracked_keys().await;
    if !tracked.is_empty() {
        println!("tracking state held for {} server(s)", tracked.len());
    }
}

/// Replace the registry from an explicit TOML file.
pub async fn load_registry(path: &str, state: Arc<RwLock<AppState>>) {
    match TrackerConfig::load_file(Path::new(path)) {
        Ok(config) => {
            let mut s = state.write().await;
            println!("loaded {} server(s) from {path}", config.servers.len());
            if s.active_server.is_none() {
                s.active_server = config.servers.first().map(|e| e.key());
            }
            s.config = config;
        }
        Err(e) => println!("{e}"),
    }
}

pub fn exit() {
    println!("quitting...");
}
