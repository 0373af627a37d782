use crate::db::StoreError;
use crate::domain::{FilterSpec, MovieId, SortField, SortSpec};
use crate::entities::{movies, prelude::*};
use crate::models::movie::{MovieRecord, NewMovie};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, Order, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use tracing::{debug, info};

pub struct MovieRepository {
    conn: DatabaseConnection,
}

impl MovieRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: movies::Model) -> MovieRecord {
        MovieRecord {
            id: MovieId::new(model.id),
            title: model.title,
            notes: model.notes,
            released: model.released,
            external_id: model.external_id,
            rating: model.rating,
            director: model.director,
            writer: model.writer,
            actors: model.actors,
            created_at: model.created_at,
        }
    }

    pub async fn create(&self, movie: NewMovie) -> Result<MovieRecord, StoreError> {
        let external_id = movie.external_id.clone();
        let active_model = movies::ActiveModel {
            title: Set(movie.title),
            notes: Set(movie.notes),
            released: Set(movie.released),
            external_id: Set(movie.external_id),
            rating: Set(movie.rating),
            director: Set(movie.director),
            writer: Set(movie.writer),
            actors: Set(movie.actors),
            created_at: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let model = match active_model.insert(&self.conn).await {
            Ok(model) => model,
            Err(err) => {
                if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
                    return Err(StoreError::Duplicate(external_id));
                }
                return Err(err.into());
            }
        };

        info!("Added movie: {} ({})", model.title, model.external_id);
        Ok(Self::map_model(model))
    }

    pub async fn find_by_external_id(
        &self,
        external_id: &str,
    ) -> Result<Option<MovieRecord>, StoreError> {
        let model = Movies::find()
            .filter(movies::Column::ExternalId.eq(external_id))
            .one(&self.conn)
            .await?;

        Ok(model.map(Self::map_model))
    }

    pub async fn get(&self, id: MovieId) -> Result<Option<MovieRecord>, StoreError> {
        let model = Movies::find_by_id(id.value()).one(&self.conn).await?;
        Ok(model.map(Self::map_model))
    }

    pub async fn update_notes(&self, id: MovieId, notes: &str) -> Result<bool, StoreError> {
        let result = Movies::update_many()
            .col_expr(movies::Column::Notes, Expr::value(notes))
            .filter(movies::Column::Id.eq(id.value()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn delete(&self, id: MovieId) -> Result<bool, StoreError> {
        let result = Movies::delete_by_id(id.value()).exec(&self.conn).await?;

        let removed = result.rows_affected > 0;
        if removed {
            info!("Removed movie with ID: {id}");
        }
        Ok(removed)
    }

    pub async fn query(
        &self,
        sort: &SortSpec,
        filter: &FilterSpec,
    ) -> Result<Vec<MovieRecord>, StoreError> {
        let column = match sort.field {
            SortField::Released => movies::Column::Released,
            SortField::Rating => movies::Column::Rating,
        };
        let order = if sort.order.is_ascending() {
            Order::Asc
        } else {
            Order::Desc
        };

        // Absent values sort as zero instead of being pushed to either end.
        let sort_key: SimpleExpr = Func::coalesce([
            SimpleExpr::from(Expr::col((movies::Entity, column))),
            Expr::value(0),
        ])
        .into();

        debug!(field = %sort.field, order = %sort.order, "Querying movies");

        let rows = Movies::find()
            .order_by(sort_key, order)
            .order_by(movies::Column::Id, Order::Asc)
            .all(&self.conn)
            .await?;

        // SQLite LOWER() only folds ASCII, so substring filters run here.
        Ok(rows
            .into_iter()
            .map(Self::map_model)
            .filter(|movie| filter.matches(movie))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{RecordStore, Store};
    use crate::domain::SortOrder;
    use chrono::NaiveDate;

    fn new_movie(external_id: &str, title: &str) -> NewMovie {
        NewMovie {
            title: title.to_string(),
            notes: "note".to_string(),
            released: None,
            external_id: external_id.to_string(),
            rating: 0.0,
            director: String::new(),
            writer: String::new(),
            actors: String::new(),
        }
    }

    fn ordering(field: SortField, order: SortOrder) -> SortSpec {
        SortSpec { field, order }
    }

    async fn seeded_store() -> Store {
        let store = Store::in_memory().await.unwrap();

        let mut inception = new_movie("tt1375666", "Inception");
        inception.released = NaiveDate::from_ymd_opt(2010, 7, 16);
        inception.rating = 8.8;
        inception.director = "Christopher Nolan".to_string();
        inception.writer = "Christopher Nolan".to_string();
        inception.actors = "Leonardo DiCaprio, Elliot Page".to_string();
        store.create(inception).await.unwrap();

        let mut heat = new_movie("tt0113277", "Heat");
        heat.released = NaiveDate::from_ymd_opt(1995, 12, 15);
        heat.rating = 8.3;
        heat.director = "Michael Mann".to_string();
        heat.writer = "Michael Mann".to_string();
        heat.actors = "Al Pacino, Robert De Niro".to_string();
        store.create(heat).await.unwrap();

        let mut lost = new_movie("tt9999999", "Lost Reel");
        lost.director = "Unknown".to_string();
        lost.actors = "Leonardo Nobody".to_string();
        store.create(lost).await.unwrap();

        store
    }

    fn titles(records: &[MovieRecord]) -> Vec<&str> {
        records.iter().map(|m| m.title.as_str()).collect()
    }

    #[tokio::test]
    async fn create_assigns_id_and_reads_back() {
        let store = Store::in_memory().await.unwrap();
        let created = store.create(new_movie("tt1", "One")).await.unwrap();

        assert!(created.id.value() > 0);
        let fetched = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);

        let by_external = store.find_by_external_id("tt1").await.unwrap().unwrap();
        assert_eq!(by_external.id, created.id);
        assert!(store.find_by_external_id("tt2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn unique_external_id_is_enforced_by_storage() {
        let store = Store::in_memory().await.unwrap();
        store.create(new_movie("tt1", "One")).await.unwrap();

        let err = store.create(new_movie("tt1", "Again")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(ref id) if id == "tt1"));
    }

    #[tokio::test]
    async fn update_notes_touches_only_notes() {
        let store = seeded_store().await;
        let before = store.find_by_external_id("tt0113277").await.unwrap().unwrap();

        assert!(store.update_notes(before.id, "rewatch").await.unwrap());

        let after = store.find_by_id(before.id).await.unwrap().unwrap();
        assert_eq!(after.notes, "rewatch");
        assert_eq!(MovieRecord { notes: before.notes.clone(), ..after }, before);

        assert!(!store.update_notes(MovieId::new(999), "x").await.unwrap());
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_was_removed() {
        let store = seeded_store().await;
        let heat = store.find_by_external_id("tt0113277").await.unwrap().unwrap();

        assert!(store.delete(heat.id).await.unwrap());
        assert!(!store.delete(heat.id).await.unwrap());
        assert!(store.find_by_id(heat.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn query_orders_absent_release_dates_as_zero() {
        let store = seeded_store().await;
        let none = FilterSpec::default();

        let asc = store
            .query(&ordering(SortField::Released, SortOrder::Ascending), &none)
            .await
            .unwrap();
        assert_eq!(titles(&asc), vec!["Lost Reel", "Heat", "Inception"]);

        let desc = store
            .query(&ordering(SortField::Released, SortOrder::Descending), &none)
            .await
            .unwrap();
        assert_eq!(titles(&desc), vec!["Inception", "Heat", "Lost Reel"]);
    }

    #[tokio::test]
    async fn query_orders_by_rating() {
        let store = seeded_store().await;

        let desc = store
            .query(
                &ordering(SortField::Rating, SortOrder::Descending),
                &FilterSpec::default(),
            )
            .await
            .unwrap();
        assert_eq!(titles(&desc), vec!["Inception", "Heat", "Lost Reel"]);
    }

    #[tokio::test]
    async fn query_title_filter_is_case_insensitive_substring() {
        let store = seeded_store().await;
        let filter = FilterSpec {
            title: Some("incep".to_string()),
            search: None,
        };

        let found = store
            .query(&ordering(SortField::Released, SortOrder::Ascending), &filter)
            .await
            .unwrap();
        assert_eq!(titles(&found), vec!["Inception"]);
    }

    #[tokio::test]
    async fn query_search_matches_any_credit_column() {
        let store = seeded_store().await;
        let sort = ordering(SortField::Released, SortOrder::Ascending);

        let by_actor = FilterSpec {
            title: None,
            search: Some("leonardo".to_string()),
        };
        let found = store.query(&sort, &by_actor).await.unwrap();
        assert_eq!(titles(&found), vec!["Lost Reel", "Inception"]);

        let by_director = FilterSpec {
            title: None,
            search: Some("mann".to_string()),
        };
        let found = store.query(&sort, &by_director).await.unwrap();
        assert_eq!(titles(&found), vec!["Heat"]);

        let both = FilterSpec {
            title: Some("lost".to_string()),
            search: Some("leonardo".to_string()),
        };
        let found = store.query(&sort, &both).await.unwrap();
        assert_eq!(titles(&found), vec!["Lost Reel"]);
    }

    #[tokio::test]
    async fn query_treats_wildcards_literally() {
        let store = seeded_store().await;
        let filter = FilterSpec {
            title: Some("%".to_string()),
            search: None,
        };

        let found = store
            .query(&ordering(SortField::Released, SortOrder::Ascending), &filter)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn query_filters_fold_non_ascii_case() {
        let store = seeded_store().await;
        let mut elite = new_movie("tt0861739", "Élite Squad");
        elite.director = "José Padilha".to_string();
        elite.actors = "Wagner Moura".to_string();
        store.create(elite).await.unwrap();

        let sort = ordering(SortField::Released, SortOrder::Ascending);
        for needle in ["élite", "ÉLITE", "squad"] {
            let filter = FilterSpec {
                title: Some(needle.to_string()),
                search: None,
            };
            let found = store.query(&sort, &filter).await.unwrap();
            assert_eq!(titles(&found), vec!["Élite Squad"], "title needle {needle}");
        }

        let by_director = FilterSpec {
            title: None,
            search: Some("JOSÉ".to_string()),
        };
        let found = store.query(&sort, &by_director).await.unwrap();
        assert_eq!(titles(&found), vec!["Élite Squad"]);
    }
}
