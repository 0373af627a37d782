use super::{open_catalog, parse_movie_id, report};
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_update_note(config: &Config, id_str: &str, notes: &str) -> anyhow::Result<()> {
    let Some(id) = parse_movie_id(id_str) else {
        return Ok(());
    };

    if notes.trim().is_empty() {
        println!("Notes cannot be empty.");
        return Ok(());
    }

    let catalog = open_catalog(config).await?;
    match catalog.update(id, notes).await {
        Ok(movie) => {
            println!("✓ Updated notes for: {}", movie.title);
            Ok(())
        }
        Err(e) => report(e),
    }
}
