use crate::entities::{prelude::*, titles};
use crate::models::title::{NewTitle, Title, TitlePatch, fold_case};
use anyhow::{Context, Result};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use tracing::{debug, warn};

/// Record store adapter for the `titles` table.
pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: titles::Model) -> Result<Title> {
        let cast = Self::decode_list(model.pk, "cast", &model.cast)?;
        let genres = Self::decode_list(model.pk, "genres", &model.genres)?;

        Ok(Title {
            pk: model.pk,
            show_id: model.show_id,
            title: model.title,
            title_type: model.title_type,
            director: model.director,
            cast,
            country: model.country,
            date_added: model.date_added,
            release_year: model.release_year,
            rating: model.rating,
            duration: model.duration,
            genres,
            description: model.description,
            platform: model.platform,
        })
    }

    fn decode_list(pk: i32, column: &str, raw: &str) -> Result<Vec<String>> {
        serde_json::from_str(raw).map_err(|e| {
            warn!(pk, column, error = %e, "Stored list column is not a JSON string array");
            anyhow::anyhow!("Corrupt '{column}' column for title {pk}: {e}")
        })
    }

    fn encode_list(values: &[String]) -> Result<String> {
        serde_json::to_string(values).context("Failed to encode list column")
    }

    pub async fn count(&self, condition: Condition) -> Result<u64> {
        let total = Titles::find().filter(condition).count(&self.conn).await?;
        Ok(total)
    }

    /// Rows matching `condition` in insertion order, bounded by `offset`/`limit`.
    pub async fn list_page(
        &self,
        condition: Condition,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Title>> {
        let rows = Titles::find()
            .filter(condition)
            .order_by_asc(titles::Column::Pk)
            .offset(offset)
            .limit(limit)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, pk: i32) -> Result<Option<Title>> {
        let row = Titles::find_by_id(pk).one(&self.conn).await?;
        row.map(Self::map_model).transpose()
    }

    pub async fn insert(&self, title: &NewTitle) -> Result<i32> {
        let active_model = titles::ActiveModel {
            show_id: Set(title.show_id.clone()),
            title: Set(title.title.clone()),
            title_folded: Set(fold_case(&title.title)),
            title_type: Set(title.title_type),
            director: Set(title.director.clone()),
            director_folded: Set(title.director.as_deref().map(fold_case)),
            cast: Set(Self::encode_list(&title.cast)?),
            country: Set(title.country.clone()),
            country_folded: Set(title.country.as_deref().map(fold_case)),
            date_added: Set(title.date_added.clone()),
            release_year: Set(title.release_year.clone()),
            rating: Set(title.rating.clone()),
            duration: Set(title.duration.clone()),
            genres: Set(Self::encode_list(&title.genres)?),
            description: Set(title.description.clone()),
            platform: Set(title.platform),
            ..Default::default()
        };

        let res = Titles::insert(active_model).exec(&self.conn).await?;
        Ok(res.last_insert_id)
    }

    /// Writes only the fields present in `patch`. Returns the affected row count.
    pub async fn update(&self, pk: i32, patch: &TitlePatch) -> Result<u64> {
        if patch.is_empty() {
            return Ok(0);
        }

        let mut active_model = titles::ActiveModel::default();

        if let Some(show_id) = &patch.show_id {
            active_model.show_id = Set(show_id.clone());
        }
        if let Some(title) = &patch.title {
            active_model.title = Set(title.clone());
            active_model.title_folded = Set(fold_case(title));
        }
        if let Some(title_type) = patch.title_type {
            active_model.title_type = Set(title_type);
        }
        if let Some(director) = &patch.director {
            active_model.director = Set(director.clone());
            active_model.director_folded = Set(director.as_deref().map(fold_case));
        }
        if let Some(cast) = &patch.cast {
            active_model.cast = Set(Self::encode_list(cast)?);
        }
        if let Some(country) = &patch.country {
            active_model.country = Set(country.clone());
            active_model.country_folded = Set(country.as_deref().map(fold_case));
        }
        if let Some(date_added) = &patch.date_added {
            active_model.date_added = Set(date_added.clone());
        }
        if let Some(release_year) = &patch.release_year {
            active_model.release_year = Set(release_year.clone());
        }
        if let Some(rating) = &patch.rating {
            active_model.rating = Set(rating.clone());
        }
        if let Some(duration) = &patch.duration {
            active_model.duration = Set(duration.clone());
        }
        if let Some(genres) = &patch.genres {
            active_model.genres = Set(Self::encode_list(genres)?);
        }
        if let Some(description) = &patch.description {
            active_model.description = Set(description.clone());
        }
        if let Some(platform) = patch.platform {
            active_model.platform = Set(platform);
        }

        let result = Titles::update_many()
            .set(active_model)
            .filter(titles::Column::Pk.eq(pk))
            .exec(&self.conn)
            .await?;

        debug!(pk, rows = result.rows_affected, "Applied title patch");
        Ok(result.rows_affected)
    }

    pub async fn delete(&self, pk: i32) -> Result<u64> {
        let result = Titles::delete_by_id(pk).exec(&self.conn).await?;
        Ok(result.rows_affected)
    }
}
