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


//! Merge freshly fetched movie/TV records into the site catalog.
//!
//! ```text
//! add-content --movie 575265
//! add-content --tv 248852
//! add-content --movie 575265,617126 --tv 248852
//! ```

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use playgate::catalog::{import_content, CatalogStore};
use playgate::config::TmdbConfig;
use playgate::tmdb::TmdbClient;

#[derive(Parser)]
#[command(name = "add-content")]
#[command(about = "Add movies and TV series to the content catalog", long_about = None)]
struct Cli {
    /// Movie ids to add (comma-separated, repeatable)
    #[arg(long = "movie", value_name = "ID[,ID...]", value_delimiter = ',')]
    movies: Vec<u64>,

    /// TV series ids to add (comma-separated, repeatable)
    #[arg(long = "tv", value_name = "ID[,ID...]", value_delimiter = ',')]
    tv: Vec<u64>,

    /// Catalog file to update
    #[arg(long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    // No ids requested: show usage and exit cleanly.
    if cli.movies.is_empty() && cli.tv.is_empty() {
        Cli::command().print_help()?;
        println!();
        return Ok(());
    }

    let config = TmdbConfig::from_env()?;
    let client = TmdbClient::new(config)?;

    let store = CatalogStore::new(&cli.config);
    let mut catalog = store.load()?;
    info!(
        movies = catalog.movies.len(),
        series = catalog.series.len(),
        "catalog loaded"
    );

    let outcome = import_content(&client, &mut catalog, &cli.movies, &cli.tv).await;

    println!("{}", "=".repeat(50));
    println!("SUMMARY");
    println!("{}", "=".repeat(50));
    println!("Movies added:    {}", outcome.added_movies);
    println!("TV series added: {}", outcome.added_series);
    if outcome.skipped_movies > 0 {
        println!("Movies skipped (already exist):    {}", outcome.skipped_movies);
    }
    if outcome.skipped_series > 0 {
        println!("TV series skipped (already exist): {}", outcome.skipped_series);
    }
    for (kind, id) in &outcome.failed {
        println!("Failed to fetch {} {}, skipped", kind, id);
    }
    println!("{}", "=".repeat(50));

    if outcome.anything_added() {
        store.save(&catalog)?;
        println!(
            "Final count: {} movies, {} series",
            catalog.movies.len(),
            catalog.series.len()
        );
    } else {
        println!("No new content to add.");
    }

    Ok(())
}
