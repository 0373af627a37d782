//! List movies command handler

use super::open_catalog;
use crate::config::Config;
use crate::domain::ListFilters;
use crate::services::CatalogService;

pub async fn cmd_list_movies(
    config: &Config,
    sort_by: Option<&str>,
    order: Option<&str>,
    filters: &ListFilters,
) -> anyhow::Result<()> {
    let catalog = open_catalog(config).await?;
    let movies = catalog.list(sort_by, order, filters).await?;

    if movies.is_empty() {
        println!("No movies found.");
        println!();
        println!("Add a movie with: cinedex add \"movie title\"");
        return Ok(());
    }

    println!("Movies ({} total)", movies.len());
    println!("{:-<70}", "");

    for movie in movies {
        let released = movie
            .released
            .map_or_else(|| "unknown".to_string(), |d| d.to_string());

        println!("{} [{}]", movie.title, movie.external_id);
        println!(
            "  ID: {} | Released: {} | Rating: {:.1}",
            movie.id, released, movie.rating
        );
    }

    Ok(())
}
