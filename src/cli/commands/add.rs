use super::{open_catalog, report};
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_add_movie(config: &Config, title: &str, notes: &str) -> anyhow::Result<()> {
    println!("Looking up: {title}");

    let catalog = open_catalog(config).await?;

    match catalog.create(title, notes).await {
        Ok(movie) => {
            println!("✓ Added: {} ({})", movie.title, movie.external_id);
            println!("  ID: {} | Rating: {:.1}", movie.id, movie.rating);
            Ok(())
        }
        Err(e) => report(e),
    }
}
