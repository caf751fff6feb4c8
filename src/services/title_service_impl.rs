//! `SeaORM` implementation of the `TitleService` trait.

use crate::config::SecurityConfig;
use crate::constants::field_limits;
use crate::db::Store;
use crate::models::title::{NewTitle, Title, TitlePatch};
use crate::services::auth::{ApiKey, ApiKeyGate};
use crate::services::filter::TitleFilter;
use crate::services::pagination::{PageInfo, PageRequest};
use crate::services::title_service::{TitleError, TitlePage, TitleService};
use async_trait::async_trait;
use tracing::{debug, info, warn};

pub struct SeaOrmTitleService {
    store: Store,
    gate: ApiKeyGate,
}

impl SeaOrmTitleService {
    #[must_use]
    pub fn new(store: Store, security: &SecurityConfig) -> Self {
        Self {
            store,
            gate: ApiKeyGate::new(security.api_keys.iter().cloned()),
        }
    }

    fn require_key(&self, credential: Option<&str>, operation: &str) -> Result<ApiKey, TitleError> {
        self.gate.authorize(credential).map_err(|err| {
            warn!("Rejected {operation} request: {err}");
            TitleError::from(err)
        })
    }

    fn check_len(field: &str, value: &str, max: usize) -> Result<(), TitleError> {
        if value.chars().count() > max {
            return Err(TitleError::Validation(format!(
                "Field '{field}' must be {max} characters or less"
            )));
        }
        Ok(())
    }

    fn check_required(field: &str, value: &str, max: usize) -> Result<(), TitleError> {
        if value.trim().is_empty() {
            return Err(TitleError::Validation(format!(
                "Field '{field}' is required and cannot be empty"
            )));
        }
        Self::check_len(field, value, max)
    }

    fn check_optional(field: &str, value: Option<&str>, max: usize) -> Result<(), TitleError> {
        value.map_or(Ok(()), |v| Self::check_len(field, v, max))
    }

    fn check_list(field: &str, values: &[String], max: usize) -> Result<(), TitleError> {
        for (i, value) in values.iter().enumerate() {
            if value.chars().count() > max {
                return Err(TitleError::Validation(format!(
                    "Entry {i} of '{field}' must be {max} characters or less"
                )));
            }
        }
        Ok(())
    }

    fn validate_new_title(payload: &NewTitle) -> Result<(), TitleError> {
        Self::check_required("show_id", &payload.show_id, field_limits::SHOW_ID)?;
        Self::check_required("title", &payload.title, field_limits::TITLE)?;
        Self::check_optional(
            "director",
            payload.director.as_deref(),
            field_limits::DIRECTOR,
        )?;
        Self::check_list("cast", &payload.cast, field_limits::CAST_MEMBER)?;
        Self::check_optional("country", payload.country.as_deref(), field_limits::COUNTRY)?;
        Self::check_optional(
            "date_added",
            payload.date_added.as_deref(),
            field_limits::DATE_ADDED,
        )?;
        Self::check_optional(
            "release_year",
            payload.release_year.as_deref(),
            field_limits::RELEASE_YEAR,
        )?;
        Self::check_optional("rating", payload.rating.as_deref(), field_limits::RATING)?;
        Self::check_optional(
            "duration",
            payload.duration.as_deref(),
            field_limits::DURATION,
        )?;
        Self::check_list("genres", &payload.genres, field_limits::GENRE)?;
        Self::check_optional(
            "description",
            payload.description.as_deref(),
            field_limits::DESCRIPTION,
        )
    }

    fn validate_patch(patch: &TitlePatch) -> Result<(), TitleError> {
        fn cleared(value: Option<&Option<String>>) -> Option<&str> {
            value.and_then(Option::as_deref)
        }

        if let Some(show_id) = &patch.show_id {
            Self::check_required("show_id", show_id, field_limits::SHOW_ID)?;
        }
        if let Some(title) = &patch.title {
            Self::check_required("title", title, field_limits::TITLE)?;
        }
        if let Some(cast) = &patch.cast {
            Self::check_list("cast", cast, field_limits::CAST_MEMBER)?;
        }
        if let Some(genres) = &patch.genres {
            Self::check_list("genres", genres, field_limits::GENRE)?;
        }

        Self::check_optional(
            "director",
            cleared(patch.director.as_ref()),
            field_limits::DIRECTOR,
        )?;
        Self::check_optional(
            "country",
            cleared(patch.country.as_ref()),
            field_limits::COUNTRY,
        )?;
        Self::check_optional(
            "date_added",
            cleared(patch.date_added.as_ref()),
            field_limits::DATE_ADDED,
        )?;
        Self::check_optional(
            "release_year",
            cleared(patch.release_year.as_ref()),
            field_limits::RELEASE_YEAR,
        )?;
        Self::check_optional(
            "rating",
            cleared(patch.rating.as_ref()),
            field_limits::RATING,
        )?;
        Self::check_optional(
            "duration",
            cleared(patch.duration.as_ref()),
            field_limits::DURATION,
        )?;
        Self::check_optional(
            "description",
            cleared(patch.description.as_ref()),
            field_limits::DESCRIPTION,
        )
    }
}

#[async_trait]
impl TitleService for SeaOrmTitleService {
    async fn list(
        &self,
        page: PageRequest,
        filter: &TitleFilter,
    ) -> Result<TitlePage, TitleError> {
        let condition = filter.to_condition();

        debug!(
            filters = filter.active_count(),
            page = page.page(),
            limit = page.limit(),
            "Listing titles"
        );

        let total = self
            .store
            .count_titles(condition.clone())
            .await
            .map_err(|e| TitleError::database("Failed to count titles", format!("{e:#}")))?;

        let titles = self
            .store
            .list_titles(condition, page.offset(), page.limit())
            .await
            .map_err(|e| {
                TitleError::database(
                    &format!(
                        "Failed to get titles by page (page={}, limit={})",
                        page.page(),
                        page.limit()
                    ),
                    format!("{e:#}"),
                )
            })?;

        let info = PageInfo::compute(page, total);

        Ok(TitlePage {
            total: info.total,
            titles,
            total_pages: info.total_pages,
            page: info.page,
            has_next: info.has_next,
            has_prev: info.has_prev,
        })
    }

    async fn get(&self, pk: i32) -> Result<Title, TitleError> {
        self.store
            .get_title(pk)
            .await
            .map_err(|e| {
                TitleError::database(
                    &format!("Failed to get title record with primary key: {pk}"),
                    format!("{e:#}"),
                )
            })?
            .ok_or(TitleError::NotFound(pk))
    }

    async fn create(
        &self,
        payload: NewTitle,
        credential: Option<&str>,
    ) -> Result<Title, TitleError> {
        self.require_key(credential, "create")?;
        Self::validate_new_title(&payload)?;

        let pk = self
            .store
            .insert_title(&payload)
            .await
            .map_err(|e| TitleError::database("Failed to create title record", format!("{e:#}")))?;

        info!(pk, title = %payload.title, platform = %payload.platform, "Created title");
        Ok(payload.into_title(pk))
    }

    async fn update(
        &self,
        pk: i32,
        patch: TitlePatch,
        credential: Option<&str>,
    ) -> Result<Title, TitleError> {
        self.require_key(credential, "update")?;
        Self::validate_patch(&patch)?;

        let rows = self.store.update_title(pk, &patch).await.map_err(|e| {
            TitleError::database(
                &format!("Failed to update record with primary key: {pk}"),
                format!("{e:#}"),
            )
        })?;

        if rows > 0 {
            info!(pk, "Updated title");
        }

        self.get(pk).await
    }

    async fn delete(&self, pk: i32, credential: Option<&str>) -> Result<(), TitleError> {
        self.require_key(credential, "delete")?;

        let rows = self.store.delete_title(pk).await.map_err(|e| {
            TitleError::database(
                &format!("Failed to delete record with primary key: {pk}"),
                format!("{e:#}"),
            )
        })?;

        if rows > 0 {
            info!(pk, "Deleted title");
        } else {
            debug!(pk, "Delete matched no title");
        }
        Ok(())
    }

    fn authorize(&self, credential: Option<&str>) -> Result<ApiKey, TitleError> {
        self.require_key(credential, "secure")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::title::{Platform, TitleType};

    const KEY: &str = "test-key";

    async fn service() -> SeaOrmTitleService {
        let store = Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store");
        let security = SecurityConfig {
            api_keys: vec![KEY.to_string(), "other-key".to_string()],
        };
        SeaOrmTitleService::new(store, &security)
    }

    fn new_title(title: &str, platform: Platform) -> NewTitle {
        NewTitle {
            show_id: format!("s-{}", title.to_lowercase()),
            title: title.to_string(),
            title_type: TitleType::Movie,
            director: None,
            cast: vec![],
            country: None,
            date_added: None,
            release_year: None,
            rating: None,
            duration: None,
            genres: vec![],
            description: None,
            platform,
        }
    }

    async fn seed_alpha_beta(svc: &SeaOrmTitleService) {
        svc.create(new_title("Alpha", Platform::Netflix), Some(KEY))
            .await
            .unwrap();
        svc.create(new_title("Beta", Platform::Hulu), Some(KEY))
            .await
            .unwrap();
    }

    async fn count(svc: &SeaOrmTitleService, filter: &TitleFilter) -> u64 {
        svc.list(PageRequest::default(), filter).await.unwrap().total
    }

    #[tokio::test]
    async fn test_list_first_page() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        let page = svc
            .list(PageRequest::new(1, 1).unwrap(), &TitleFilter::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
        assert!(!page.has_prev);
        assert_eq!(page.titles.len(), 1);
        assert_eq!(page.titles[0].pk, 1);
        assert_eq!(page.titles[0].title, "Alpha");
    }

    #[tokio::test]
    async fn test_list_second_page_and_beyond() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        let second = svc
            .list(PageRequest::new(2, 1).unwrap(), &TitleFilter::default())
            .await
            .unwrap();
        assert_eq!(second.titles[0].title, "Beta");
        assert!(second.has_prev);
        assert!(!second.has_next);

        let beyond = svc
            .list(PageRequest::new(9, 1).unwrap(), &TitleFilter::default())
            .await
            .unwrap();
        assert!(beyond.titles.is_empty());
        assert_eq!(beyond.total, 2);
    }

    #[tokio::test]
    async fn test_list_empty_store() {
        let svc = service().await;
        let page = svc
            .list(PageRequest::default(), &TitleFilter::default())
            .await
            .unwrap();

        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_list_platform_filter() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        let filter = TitleFilter {
            platform: Some(Platform::Netflix),
            ..Default::default()
        };
        let page = svc.list(PageRequest::default(), &filter).await.unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.titles[0].pk, 1);
    }

    #[tokio::test]
    async fn test_filters_only_narrow() {
        let svc = service().await;

        let mut drama = new_title("The Crown", Platform::Netflix);
        drama.title_type = TitleType::TvShow;
        drama.genres = vec!["Drama".to_string(), "British TV Shows".to_string()];
        drama.director = Some("Stephen Daldry".to_string());
        drama.country = Some("United Kingdom".to_string());
        drama.release_year = Some("2016".to_string());
        svc.create(drama, Some(KEY)).await.unwrap();

        let mut comedy = new_title("Crowning Glory", Platform::Hulu);
        comedy.genres = vec!["Comedy".to_string(), "Drama".to_string()];
        comedy.country = Some("United States".to_string());
        comedy.release_year = Some("2016".to_string());
        svc.create(comedy, Some(KEY)).await.unwrap();

        let everything = count(&svc, &TitleFilter::default()).await;
        assert_eq!(everything, 2);

        let by_title = TitleFilter {
            title: Some("crown".to_string()),
            ..Default::default()
        };
        assert_eq!(count(&svc, &by_title).await, 2);

        let by_title_and_country = TitleFilter {
            country: Some("kingdom".to_string()),
            ..by_title.clone()
        };
        assert_eq!(count(&svc, &by_title_and_country).await, 1);

        let by_all = TitleFilter {
            title_type: Some(TitleType::TvShow),
            release_yr: Some(2016),
            genres: vec!["drama".to_string()],
            director: Some("DALDRY".to_string()),
            ..by_title_and_country.clone()
        };
        assert_eq!(count(&svc, &by_all).await, 1);

        let impossible = TitleFilter {
            platform: Some(Platform::Hulu),
            ..by_all
        };
        assert_eq!(count(&svc, &impossible).await, 0);
    }

    #[tokio::test]
    async fn test_genres_require_every_requested_genre() {
        let svc = service().await;

        let mut first = new_title("First", Platform::Netflix);
        first.genres = vec!["Sci-Fi".to_string(), "Drama".to_string()];
        svc.create(first, Some(KEY)).await.unwrap();

        let mut second = new_title("Second", Platform::Netflix);
        second.genres = vec!["Dramedy".to_string()];
        svc.create(second, Some(KEY)).await.unwrap();

        let genres = |names: &[&str]| TitleFilter {
            genres: names.iter().map(ToString::to_string).collect(),
            ..Default::default()
        };

        assert_eq!(count(&svc, &genres(&["drama"])).await, 1);
        assert_eq!(count(&svc, &genres(&["drama", "sci-fi"])).await, 1);
        assert_eq!(count(&svc, &genres(&["drama", "comedy"])).await, 0);
        assert_eq!(count(&svc, &genres(&["dramedy"])).await, 1);
    }

    #[tokio::test]
    async fn test_genre_elements_match_case_sensitively() {
        let svc = service().await;

        let mut lower = new_title("Lower", Platform::Netflix);
        lower.genres = vec!["drama".to_string()];
        svc.create(lower, Some(KEY)).await.unwrap();

        let drama = TitleFilter {
            genres: vec!["Drama".to_string()],
            ..Default::default()
        };
        assert_eq!(count(&svc, &drama).await, 0);
    }

    #[tokio::test]
    async fn test_substring_filters_ignore_non_ascii_case() {
        let svc = service().await;

        let mut elite = new_title("Élite", Platform::Netflix);
        elite.country = Some("España".to_string());
        elite.director = Some("Ramón Salazar".to_string());
        svc.create(elite, Some(KEY)).await.unwrap();
        seed_alpha_beta(&svc).await;

        for needle in ["élite", "ÉLITE", "Élite", "LITE"] {
            let filter = TitleFilter {
                title: Some(needle.to_string()),
                ..Default::default()
            };
            assert_eq!(count(&svc, &filter).await, 1, "title filter {needle}");
        }

        let filter = TitleFilter {
            director: Some("RAMÓN".to_string()),
            country: Some("ESPAÑA".to_string()),
            ..Default::default()
        };
        assert_eq!(count(&svc, &filter).await, 1);

        let patch = TitlePatch {
            title: Some("Über".to_string()),
            ..Default::default()
        };
        svc.update(1, patch, Some(KEY)).await.unwrap();

        let old = TitleFilter {
            title: Some("élite".to_string()),
            ..Default::default()
        };
        assert_eq!(count(&svc, &old).await, 0);

        let new = TitleFilter {
            title: Some("ÜBER".to_string()),
            ..Default::default()
        };
        assert_eq!(count(&svc, &new).await, 1);
    }

    #[tokio::test]
    async fn test_list_skip_window() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        let page = svc
            .list(PageRequest::from_skip(1, 25).unwrap(), &TitleFilter::default())
            .await
            .unwrap();

        assert_eq!(page.total, 2);
        assert_eq!(page.titles.len(), 1);
        assert_eq!(page.titles[0].title, "Beta");
        assert!(page.has_prev);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_out_of_range_release_year_is_ignored() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        let ancient = TitleFilter {
            release_yr: Some(1850),
            ..Default::default()
        };
        assert_eq!(
            count(&svc, &ancient).await,
            count(&svc, &TitleFilter::default()).await
        );

        let recent = TitleFilter {
            release_yr: Some(2020),
            ..Default::default()
        };
        assert_eq!(count(&svc, &recent).await, 0);
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let svc = service().await;
        assert!(matches!(svc.get(42).await, Err(TitleError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_create_assigns_pk_and_roundtrips_lists() {
        let svc = service().await;

        let mut payload = new_title("Alpha", Platform::AppleTv);
        payload.cast = vec!["B. Actor".to_string(), "A. Actor".to_string()];
        payload.genres = vec!["Thriller".to_string()];

        let created = svc.create(payload, Some(KEY)).await.unwrap();
        assert_eq!(created.pk, 1);

        let fetched = svc.get(created.pk).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.cast, vec!["B. Actor", "A. Actor"]);
    }

    #[tokio::test]
    async fn test_create_validates_payload() {
        let svc = service().await;

        let mut blank = new_title("Alpha", Platform::Netflix);
        blank.title = "   ".to_string();
        assert!(matches!(
            svc.create(blank, Some(KEY)).await,
            Err(TitleError::Validation(_))
        ));

        let mut long_genre = new_title("Alpha", Platform::Netflix);
        long_genre.genres = vec!["x".repeat(51)];
        assert!(matches!(
            svc.create(long_genre, Some(KEY)).await,
            Err(TitleError::Validation(_))
        ));

        assert_eq!(count(&svc, &TitleFilter::default()).await, 0);
    }

    #[tokio::test]
    async fn test_mutations_require_valid_key() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        for credential in [None, Some("wrong"), Some("")] {
            assert!(matches!(
                svc.create(new_title("Gamma", Platform::Hbo), credential)
                    .await,
                Err(TitleError::Unauthorized)
            ));

            let patch = TitlePatch {
                title: Some("Hacked".to_string()),
                ..Default::default()
            };
            assert!(matches!(
                svc.update(1, patch, credential).await,
                Err(TitleError::Unauthorized)
            ));

            assert!(matches!(
                svc.delete(1, credential).await,
                Err(TitleError::Unauthorized)
            ));
        }

        assert_eq!(count(&svc, &TitleFilter::default()).await, 2);
        assert_eq!(svc.get(1).await.unwrap().title, "Alpha");
        assert!(svc.authorize(Some("other-key")).is_ok());
    }

    #[tokio::test]
    async fn test_update_single_field_preserves_others() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;
        let before = svc.get(2).await.unwrap();

        let patch = TitlePatch {
            title: Some("Beta Max".to_string()),
            ..Default::default()
        };
        let updated = svc.update(2, patch, Some(KEY)).await.unwrap();

        assert_eq!(updated.pk, 2);
        assert_eq!(updated.title, "Beta Max");
        assert_eq!(updated.platform, Platform::Hulu);
        assert_eq!(
            Title {
                title: before.title.clone(),
                ..updated.clone()
            },
            before
        );
    }

    #[tokio::test]
    async fn test_update_empty_patch_is_noop() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;
        let before = svc.get(1).await.unwrap();

        let after = svc
            .update(1, TitlePatch::default(), Some(KEY))
            .await
            .unwrap();
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_update_can_clear_nullable_field() {
        let svc = service().await;
        let mut payload = new_title("Alpha", Platform::Netflix);
        payload.director = Some("Someone".to_string());
        payload.genres = vec!["Drama".to_string()];
        svc.create(payload, Some(KEY)).await.unwrap();

        let patch = TitlePatch {
            director: Some(None),
            genres: Some(vec!["Comedy".to_string(), "Drama".to_string()]),
            ..Default::default()
        };
        let updated = svc.update(1, patch, Some(KEY)).await.unwrap();

        assert_eq!(updated.director, None);
        assert_eq!(updated.genres, vec!["Comedy", "Drama"]);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let svc = service().await;

        let patch = TitlePatch {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            svc.update(99, patch, Some(KEY)).await,
            Err(TitleError::NotFound(99))
        ));
        assert!(matches!(
            svc.update(99, TitlePatch::default(), Some(KEY)).await,
            Err(TitleError::NotFound(99))
        ));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let svc = service().await;
        seed_alpha_beta(&svc).await;

        svc.delete(404, Some(KEY)).await.unwrap();
        assert_eq!(count(&svc, &TitleFilter::default()).await, 2);

        svc.delete(1, Some(KEY)).await.unwrap();
        svc.delete(1, Some(KEY)).await.unwrap();
        assert_eq!(count(&svc, &TitleFilter::default()).await, 1);
        assert!(matches!(svc.get(1).await, Err(TitleError::NotFound(1))));
    }
}
