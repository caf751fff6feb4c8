use std::str::FromStr;

use super::ApiError;
use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use crate::services::filter::TitleFilter;
use crate::services::pagination::PageRequest;

fn parse_param<T>(name: &str, value: &str) -> Result<T, ApiError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ApiError::validation(format!("Invalid value for '{name}': {e}")))
}

/// Builds the page window and filter from raw query pairs.
///
/// `genres` may repeat (`?genres=Drama&genres=Comedy`). `skip` is an
/// alternative to `page` for callers that track a raw row offset. Unknown keys
/// are ignored.
pub fn parse_list_query(pairs: Vec<(String, String)>) -> Result<(PageRequest, TitleFilter), ApiError> {
    let mut page = None;
    let mut skip = None;
    let mut limit = DEFAULT_LIMIT;
    let mut filter = TitleFilter::default();

    for (key, value) in pairs {
        match key.as_str() {
            "page" => page = Some(parse_param("page", &value)?),
            "skip" => skip = Some(parse_param("skip", &value)?),
            "limit" => limit = parse_param("limit", &value)?,
            "title" => filter.title = Some(value),
            "type" => filter.title_type = Some(parse_param("type", &value)?),
            "release_yr" => filter.release_yr = Some(parse_param("release_yr", &value)?),
            "platform" => filter.platform = Some(parse_param("platform", &value)?),
            "genres" | "genres[]" => filter.genres.push(value),
            "director" => filter.director = Some(value),
            "country" => filter.country = Some(value),
            _ => {}
        }
    }

    let window = match (page, skip) {
        (Some(_), Some(_)) => {
            return Err(ApiError::validation(
                "Use either 'page' or 'skip', not both",
            ));
        }
        (None, Some(skip)) => PageRequest::from_skip(skip, limit),
        (page, None) => PageRequest::new(page.unwrap_or(DEFAULT_PAGE), limit),
    }
    .map_err(ApiError::validation)?;
    Ok((window, filter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::title::{Platform, TitleType};

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let (window, filter) = parse_list_query(vec![]).unwrap();
        assert_eq!(window, PageRequest::default());
        assert_eq!(filter, TitleFilter::default());
    }

    #[test]
    fn test_all_filters() {
        let (window, filter) = parse_list_query(pairs(&[
            ("page", "2"),
            ("limit", "10"),
            ("title", "alpha"),
            ("type", "TV Show"),
            ("release_yr", "2019"),
            ("platform", "Disney+"),
            ("genres", "drama"),
            ("genres", "comedy"),
            ("director", "nolan"),
            ("country", "india"),
            ("unused", "x"),
        ]))
        .unwrap();

        assert_eq!(window.page(), 2);
        assert_eq!(window.limit(), 10);
        assert_eq!(filter.title.as_deref(), Some("alpha"));
        assert_eq!(filter.title_type, Some(TitleType::TvShow));
        assert_eq!(filter.release_yr, Some(2019));
        assert_eq!(filter.platform, Some(Platform::DisneyPlus));
        assert_eq!(filter.genres, vec!["drama", "comedy"]);
        assert_eq!(filter.director.as_deref(), Some("nolan"));
        assert_eq!(filter.country.as_deref(), Some("india"));
    }

    #[test]
    fn test_out_of_range_year_is_accepted_by_parser() {
        let (_, filter) = parse_list_query(pairs(&[("release_yr", "1850")])).unwrap();
        assert_eq!(filter.release_yr, Some(1850));
        assert_eq!(filter.effective_release_year(), None);
    }

    #[test]
    fn test_skip_window() {
        let (window, _) = parse_list_query(pairs(&[("skip", "50"), ("limit", "25")])).unwrap();
        assert_eq!(window.offset(), 50);
        assert_eq!(window.page(), 3);

        assert!(parse_list_query(pairs(&[("skip", "5"), ("page", "2")])).is_err());
        assert!(parse_list_query(pairs(&[("skip", "-1")])).is_err());
    }

    #[test]
    fn test_rejects_unbindable_page() {
        assert!(parse_list_query(pairs(&[("page", "9223372036854775807")])).is_err());
        assert!(parse_list_query(pairs(&[("page", "18446744073709551616")])).is_err());
    }

    #[test]
    fn test_rejects_malformed_values() {
        assert!(parse_list_query(pairs(&[("page", "0")])).is_err());
        assert!(parse_list_query(pairs(&[("page", "one")])).is_err());
        assert!(parse_list_query(pairs(&[("limit", "0")])).is_err());
        assert!(parse_list_query(pairs(&[("limit", "5000")])).is_err());
        assert!(parse_list_query(pairs(&[("platform", "Peacock")])).is_err());
        assert!(parse_list_query(pairs(&[("type", "Series")])).is_err());
        assert!(parse_list_query(pairs(&[("release_yr", "soon")])).is_err());
    }
}
