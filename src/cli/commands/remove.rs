use super::{open_catalog, parse_movie_id, report};
use crate::config::Config;
use crate::services::CatalogService;

pub async fn cmd_remove_movie(config: &Config, id_str: &str, skip_confirm: bool) -> anyhow::Result<()> {
    let Some(id) = parse_movie_id(id_str) else {
        return Ok(());
    };

    let catalog = open_catalog(config).await?;

    let movie = match catalog.get(id).await {
        Ok(movie) => movie,
        Err(e) => return report(e),
    };

    if !skip_confirm {
        println!("Remove '{}' (ID: {}) from the catalog?", movie.title, movie.id);
        println!("Enter 'y' to confirm, anything else to cancel:");

        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    match catalog.remove(id).await {
        Ok(removal) => {
            println!("✓ {}", removal.message);
            Ok(())
        }
        Err(e) => report(e),
    }
}
