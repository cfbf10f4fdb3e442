// src/main.rs

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use walkdir::WalkDir;

use visitor_counter::pipeline::SessionCounter;
use visitor_counter::session;
use visitor_counter::types::{Config, Counts};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "visitor_counter=info".to_string()),
        )
        .init();

    info!("🚪 Visitor Counter Starting");

    let config = Config::load_or_default("config.yaml")?;
    info!("✓ Configuration loaded");
    info!(
        "Counting policies: tie_break={:?}, dedupe={:?}, both_diagonals={}",
        config.counting.tie_break, config.counting.dedupe, config.counting.use_both_diagonals
    );

    // CLI argument overrides the configured session path
    let session_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| config.input.session_path.clone());

    let session_files = find_session_files(Path::new(&session_path));
    if session_files.is_empty() {
        error!("No session files found at {}", session_path);
        return Ok(());
    }
    info!("Found {} session file(s) to process", session_files.len());

    let mut processed = 0usize;
    for (idx, path) in session_files.iter().enumerate() {
        info!(
            "Processing session {}/{}: {}",
            idx + 1,
            session_files.len(),
            path.display()
        );

        match process_session(path, &config) {
            Ok(counts) => {
                processed += 1;
                info!("✓ Session processed successfully");
                info!("  Entries: {}", counts.entries);
                info!("  Exits: {}", counts.exits);
                info!("  Currently present: {}", counts.present);
            }
            Err(e) => {
                // A broken session must not take down the rest of the run
                error!("✗ Session {} failed: {:#}", path.display(), e);
            }
        }
    }

    if processed < session_files.len() {
        warn!(
            "{}/{} sessions failed",
            session_files.len() - processed,
            session_files.len()
        );
    }

    Ok(())
}

fn process_session(path: &Path, config: &Config) -> Result<Counts> {
    let data = session::load_session(path)?;
    let calibration = session::extract_calibration(&data)?;
    let counter = SessionCounter::new(calibration, config.counting);
    Ok(counter.run())
}

/// A single session file, or every `*.json` under a directory.
fn find_session_files(path: &Path) -> Vec<PathBuf> {
    if path.is_file() {
        return vec![path.to_path_buf()];
    }

    let mut sessions = Vec::new();
    for entry in WalkDir::new(path)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let p = entry.path();
        if p.extension().map_or(false, |ext| ext == "json") {
            sessions.push(p.to_path_buf());
        }
    }
    sessions.sort();
    sessions
}
