use sea_orm::entity::prelude::*;
use sea_orm::Iterable;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of a catalog entry.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum TitleType {
    #[sea_orm(string_value = "Movie")]
    #[serde(rename = "Movie")]
    Movie,
    #[sea_orm(string_value = "TV Show")]
    #[serde(rename = "TV Show")]
    TvShow,
    #[sea_orm(string_value = "Other")]
    #[serde(rename = "Other")]
    Other,
}

impl TitleType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "Movie",
            Self::TvShow => "TV Show",
            Self::Other => "Other",
        }
    }
}

/// Streaming platform a title is available on.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(50))")]
pub enum Platform {
    #[sea_orm(string_value = "Amazon Prime")]
    #[serde(rename = "Amazon Prime")]
    AmazonPrime,
    #[sea_orm(string_value = "Netflix")]
    #[serde(rename = "Netflix")]
    Netflix,
    #[sea_orm(string_value = "Hulu")]
    #[serde(rename = "Hulu")]
    Hulu,
    #[sea_orm(string_value = "HBO")]
    #[serde(rename = "HBO")]
    Hbo,
    #[sea_orm(string_value = "Disney+")]
    #[serde(rename = "Disney+")]
    DisneyPlus,
    #[sea_orm(string_value = "Apple TV")]
    #[serde(rename = "Apple TV")]
    AppleTv,
    #[sea_orm(string_value = "YouTube")]
    #[serde(rename = "YouTube")]
    YouTube,
    #[sea_orm(string_value = "Other")]
    #[serde(rename = "Other")]
    Other,
}

impl Platform {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::AmazonPrime => "Amazon Prime",
            Self::Netflix => "Netflix",
            Self::Hulu => "Hulu",
            Self::Hbo => "HBO",
            Self::DisneyPlus => "Disney+",
            Self::AppleTv => "Apple TV",
            Self::YouTube => "YouTube",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {kind} '{value}'. Expected one of: {}", .expected.join(", "))]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
    pub expected: Vec<&'static str>,
}

macro_rules! display_from_str {
    ($ty:ty, $kind:literal) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$ty>::iter()
                    .find(|v| v.as_str() == s)
                    .ok_or_else(|| UnknownVariant {
                        kind: $kind,
                        value: s.to_string(),
                        expected: <$ty>::iter().map(|v| v.as_str()).collect(),
                    })
            }
        }
    };
}

display_from_str!(TitleType, "type");
display_from_str!(Platform, "platform");

/// Case folding shared by the stored search columns and substring filters.
///
/// SQLite's `LOWER()` and `LIKE` only fold ASCII, so both sides are folded
/// here instead.
#[must_use]
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// A persisted catalog record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title {
    pub pk: i32,
    pub show_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
    pub platform: Platform,
}

/// Payload for creating a record. `pk` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTitle {
    pub show_id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub title_type: TitleType,
    #[serde(default)]
    pub director: Option<String>,
    #[serde(default)]
    pub cast: Vec<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub date_added: Option<String>,
    #[serde(default)]
    pub release_year: Option<String>,
    #[serde(default)]
    pub rating: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub platform: Platform,
}

impl NewTitle {
    #[must_use]
    pub fn into_title(self, pk: i32) -> Title {
        Title {
            pk,
            show_id: self.show_id,
            title: self.title,
            title_type: self.title_type,
            director: self.director,
            cast: self.cast,
            country: self.country,
            date_added: self.date_added,
            release_year: self.release_year,
            rating: self.rating,
            duration: self.duration,
            genres: self.genres,
            description: self.description,
            platform: self.platform,
        }
    }
}

/// Merge-patch payload. Absent fields are left untouched.
///
/// Nullable columns use `Option<Option<_>>`: the outer `None` means the key was
/// absent, `Some(None)` means it was sent as `null` and clears the column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitlePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub title_type: Option<TitleType>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub director: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cast: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub country: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_added: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub release_year: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genres: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
}

impl TitlePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.show_id.is_none()
            && self.title.is_none()
            && self.title_type.is_none()
            && self.director.is_none()
            && self.cast.is_none()
            && self.country.is_none()
            && self.date_added.is_none()
            && self.release_year.is_none()
            && self.rating.is_none()
            && self.duration.is_none()
            && self.genres.is_none()
            && self.description.is_none()
            && self.platform.is_none()
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn explicit_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
