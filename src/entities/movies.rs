use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub notes: String,
    pub released: Option<Date>,
    /// Provider identifier (IMDb id); the catalog's deduplication key.
    #[sea_orm(unique)]
    pub external_id: String,
    pub rating: f64,
    pub director: String,
    pub writer: String,
    #[sea_orm(column_type = "Text")]
    pub actors: String,
    pub created_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
