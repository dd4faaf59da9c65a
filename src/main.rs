use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use player_cards::{EngineConfig, derive_profiles, export, http_client, sheet};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let source = positional_arg(&args)
        .or_else(|| std::env::var("PLAYERS_CSV").ok().filter(|v| !v.trim().is_empty()))
        .context("no player sheet given (pass a path/URL or set PLAYERS_CSV)")?;
    let cfg = EngineConfig::from_env();

    let raw = http_client::load_source(&source)?;
    let records = sheet::parse_players_csv(&raw)?;
    let profiles = derive_profiles(&records, &cfg);
    info!(
        players = profiles.len(),
        scale = ?cfg.scale,
        reference = ?cfg.reference,
        "profiles derived"
    );

    if profiles.is_empty() {
        println!("CSV loaded but no data rows found.");
    }
    for p in &profiles {
        let attrs = p
            .attributes
            .iter()
            .map(|(a, v)| format!("{a} {v:>2}"))
            .collect::<Vec<_>>()
            .join("  ");
        println!("{:>3}  {:<5} {:<20} {attrs}", p.rating, position_label(&p.position), p.name);
    }

    if let Some(path) = flag_path(&args, "--json") {
        export::write_profiles_json(&path, &profiles)?;
        info!(path = %path.display(), "wrote json");
    }
    if let Some(path) = flag_path(&args, "--xlsx") {
        let report = export::export_profiles_xlsx(&path, &profiles)?;
        info!(path = %path.display(), players = report.players, "wrote workbook");
    }

    Ok(())
}

fn position_label(position: &str) -> &str {
    if position.is_empty() { "-" } else { position }
}

fn positional_arg(args: &[String]) -> Option<String> {
    let mut skip_next = false;
    for arg in args {
        if skip_next {
            skip_next = false;
            continue;
        }
        if arg == "--json" || arg == "--xlsx" {
            skip_next = true;
            continue;
        }
        if arg.starts_with("--") {
            continue;
        }
        if !arg.trim().is_empty() {
            return Some(arg.clone());
        }
    }
    None
}

fn flag_path(args: &[String], flag: &str) -> Option<PathBuf> {
    let prefix = format!("{flag}=");
    for (idx, arg) in args.iter().enumerate() {
        if let Some(path) = arg.strip_prefix(&prefix) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        if arg == flag {
            let Some(next) = args.get(idx + 1) else {
                continue;
            };
            if !next.trim().is_empty() {
                return Some(PathBuf::from(next));
            }
        }
    }
    None
}
