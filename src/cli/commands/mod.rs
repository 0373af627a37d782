mod add;
mod list;
mod note;
mod remove;
mod serve;
mod show;

pub use add::cmd_add_movie;
pub use list::cmd_list_movies;
pub use note::cmd_update_note;
pub use remove::cmd_remove_movie;
pub use serve::cmd_serve;
pub use show::cmd_show_movie;

use std::sync::Arc;

use crate::clients::OmdbClient;
use crate::config::Config;
use crate::db::Store;
use crate::domain::MovieId;
use crate::services::{CatalogError, DefaultCatalogService, QueryPlanner};

async fn open_catalog(config: &Config) -> anyhow::Result<DefaultCatalogService> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;
    let provider = Arc::new(OmdbClient::from_config(&config.omdb)?);

    Ok(DefaultCatalogService::new(
        provider,
        Arc::new(store),
        QueryPlanner::from_config(&config.catalog),
    ))
}

fn parse_movie_id(id_str: &str) -> Option<MovieId> {
    match id_str.trim().parse::<i32>() {
        Ok(id) if id > 0 => Some(MovieId::new(id)),
        _ => {
            println!("Invalid movie ID: {id_str}");
            println!("Use 'cinedex list' to see movie IDs.");
            None
        }
    }
}

/// Prints errors the user can act on; anything else aborts the command.
fn report(err: CatalogError) -> anyhow::Result<()> {
    match err {
        CatalogError::NotFound(_) | CatalogError::Conflict(_) | CatalogError::InvalidInput(_) => {
            println!("{err}");
            Ok(())
        }
        other => Err(other.into()),
    }
}
