// Playgate - Offer-gated streaming content toolkit
// Copyright (C) 2025 Playgate contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! Batch-fetch movie records into a standalone snapshot file.
//!
//! Unlike `add-content`, this does not merge into the site catalog: it
//! writes a fresh `{"Movies": [...]}` document (plus a timestamped backup
//! copy) for seeding a deployment or eyeballing what the metadata API
//! returns.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{CommandFactory, Parser};
use serde::Serialize;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use playgate::catalog::ContentRecord;
use playgate::config::TmdbConfig;
use playgate::tmdb::TmdbClient;

/// Fixed delay between consecutive fetches, skipped after the last one.
const REQUEST_DELAY: Duration = Duration::from_millis(500);

#[derive(Parser)]
#[command(name = "fetch-content")]
#[command(about = "Fetch movie metadata into a snapshot file", long_about = None)]
struct Cli {
    /// Movie ids to fetch (comma-separated, repeatable)
    #[arg(long = "movie", value_name = "ID[,ID...]", value_delimiter = ',')]
    movies: Vec<u64>,

    /// Snapshot file to write
    #[arg(long, value_name = "FILE", default_value = "movies_with_images.json")]
    out: PathBuf,
}

#[derive(Serialize)]
struct Snapshot {
    #[serde(rename = "Movies")]
    movies: Vec<ContentRecord>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    if cli.movies.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = TmdbConfig::from_env()?;
    let client = TmdbClient::new(config)?;

    let requested = cli.movies.len();
    let mut records = Vec::new();
    for (index, &id) in cli.movies.iter().enumerate() {
        match client.movie_details(id).await {
            Ok(details) => {
                let record = details.into_record();
                println!("{} ({}) - {}", record.title, record.release_date, record.rating);
                records.push(record);
            }
            Err(err) => warn!(id, error = %err, "failed to fetch movie, skipping"),
        }

        if index + 1 < requested {
            tokio::time::sleep(REQUEST_DELAY).await;
        }
    }

    print_summary(&records, requested);

    let snapshot = Snapshot { movies: records };
    let json = serde_json::to_string_pretty(&snapshot)?;
    fs::write(&cli.out, &json)?;
    println!("Snapshot saved to {}", cli.out.display());

    let backup = backup_name(&cli.out);
    fs::write(&backup, &json)?;
    println!("Backup saved to {}", backup.display());

    Ok(())
}

fn print_summary(records: &[ContentRecord], requested: usize) {
    let with_posters = records.iter().filter(|r| !r.poster.is_empty()).count();
    let with_backdrops = records.iter().filter(|r| !r.thumbnail.is_empty()).count();
    let ratings: Vec<f64> = records
        .iter()
        .filter_map(|r| r.rating.parse().ok())
        .collect();

    println!();
    println!("FETCH SUMMARY");
    println!("=============");
    println!("Movies fetched: {}/{}", records.len(), requested);
    println!("With posters:   {}", with_posters);
    println!("With backdrops: {}", with_backdrops);
    if !ratings.is_empty() {
        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        println!("Average rating: {:.1}", average);
    }
}

fn backup_name(out: &Path) -> PathBuf {
    let stem = out
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "snapshot".to_string());
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S");
    let file = format!("{}_backup_{}.json", stem, timestamp);
    match out.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(file),
        _ => PathBuf::from(file),
    }
}
