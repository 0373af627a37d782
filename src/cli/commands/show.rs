use super::{open_catalog, parse_movie_id, report};
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_show_movie(config: &Config, id_str: &str) -> anyhow::Result<()> {
    let Some(id) = parse_movie_id(id_str) else {
        return Ok(());
    };

    let catalog = open_catalog(config).await?;
    let movie = match catalog.get(id).await {
        Ok(movie) => movie,
        Err(e) => return report(e),
    };

    println!("Movie Info");
    println!("{:-<60}", "");
    println!("Title:    {}", movie.title);
    println!("ID:       {}", movie.id);
    println!("IMDb:     {}", movie.external_id);
    println!(
        "Released: {}",
        movie
            .released
            .map_or_else(|| "unknown".to_string(), |d| d.to_string())
    );
    println!("Rating:   {:.1}", movie.rating);
    println!("Director: {}", movie.director);
    println!("Writer:   {}", movie.writer);
    println!("Actors:   {}", movie.actors);
    println!("Added:    {}", movie.created_at);
    if !movie.notes.is_empty() {
        println!();
        println!("Notes:    {}", movie.notes);
    }

    Ok(())
}
