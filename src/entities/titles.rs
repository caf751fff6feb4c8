use crate::models::title::{Platform, TitleType};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub pk: i32,
    pub show_id: String,
    pub title: String,
    /// `title` case-folded for substring search.
    pub title_folded: String,
    #[sea_orm(column_name = "type")]
    pub title_type: TitleType,
    pub director: Option<String>,
    pub director_folded: Option<String>,
    /// JSON array of cast member names, in credit order.
    pub cast: String,
    pub country: Option<String>,
    pub country_folded: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// JSON array of genre names.
    pub genres: String,
    pub description: Option<String>,
    pub platform: Platform,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
