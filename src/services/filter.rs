//! Predicate construction for title listing.
//!
//! Every supplied filter contributes one condition and the conditions are
//! AND-ed together. Absent filters contribute nothing, so an empty
//! [`TitleFilter`] selects every record.

use crate::constants::release_year;
use crate::entities::titles;
use crate::models::title::{Platform, TitleType, fold_case};
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr, SimpleExpr};
use sea_orm::{ColumnTrait, Condition};

const LIKE_ESCAPE: char = '\\';

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TitleFilter {
    pub title: Option<String>,
    pub title_type: Option<TitleType>,
    pub release_yr: Option<i32>,
    pub platform: Option<Platform>,
    pub genres: Vec<String>,
    pub director: Option<String>,
    pub country: Option<String>,
}

impl TitleFilter {
    /// The release year to filter on, if it lies strictly between the bounds.
    /// Out-of-range years are dropped rather than rejected.
    #[must_use]
    pub fn effective_release_year(&self) -> Option<i32> {
        self.release_yr
            .filter(|yr| *yr > release_year::FLOOR && *yr < release_year::CEILING)
    }

    /// Requested genres, title-cased and de-duplicated in request order.
    #[must_use]
    pub fn normalized_genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::with_capacity(self.genres.len());
        for genre in &self.genres {
            let genre = genre.trim();
            if genre.is_empty() {
                continue;
            }
            let genre = title_case(genre);
            if !genres.contains(&genre) {
                genres.push(genre);
            }
        }
        genres
    }

    /// Number of filters that will actually narrow the result.
    #[must_use]
    pub fn active_count(&self) -> usize {
        [
            non_blank(self.title.as_deref()).is_some(),
            self.title_type.is_some(),
            self.effective_release_year().is_some(),
            self.platform.is_some(),
            !self.normalized_genres().is_empty(),
            non_blank(self.director.as_deref()).is_some(),
            non_blank(self.country.as_deref()).is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Builds the composite predicate. Field order is fixed: title, type,
    /// release year, platform, genres, director, country.
    #[must_use]
    pub fn to_condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(title) = non_blank(self.title.as_deref()) {
            condition = condition.add(contains_folded(titles::Column::TitleFolded, title));
        }

        if let Some(title_type) = self.title_type {
            condition = condition.add(titles::Column::TitleType.eq(title_type));
        }

        if let Some(year) = self.effective_release_year() {
            condition = condition.add(titles::Column::ReleaseYear.eq(year.to_string()));
        }

        if let Some(platform) = self.platform {
            condition = condition.add(titles::Column::Platform.eq(platform));
        }

        for genre in self.normalized_genres() {
            condition = condition.add(has_list_element(titles::Column::Genres, &genre));
        }

        if let Some(director) = non_blank(self.director.as_deref()) {
            condition = condition.add(contains_folded(titles::Column::DirectorFolded, director));
        }

        if let Some(country) = non_blank(self.country.as_deref()) {
            condition = condition.add(contains_folded(titles::Column::CountryFolded, country));
        }

        condition
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the
/// rest, so `"sci-fi"` becomes `"Sci-Fi"`.
#[must_use]
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;

    for c in input.chars() {
        if in_word {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        in_word = c.is_alphabetic();
    }

    out
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

// Searches the case-folded shadow of a text column.
fn contains_folded(column: titles::Column, needle: &str) -> SimpleExpr {
    let pattern = format!("%{}%", escape_like(&fold_case(needle)));
    Expr::col(column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

// List columns hold JSON arrays, so finding the quoted element is an exact
// element test. `instr` is case-sensitive where `LIKE` is not.
fn has_list_element(column: titles::Column, element: &str) -> SimpleExpr {
    let quoted = serde_json::Value::String(element.to_string()).to_string();
    Expr::expr(
        Func::cust(Alias::new("instr"))
            .arg(Expr::col(column))
            .arg(quoted),
    )
    .gt(0)
}
