/// Header carrying the caller's API key on mutating requests.
pub const API_KEY_HEADER: &str = "access_token";

/// Separator between keys in the `API_KEYS` environment variable.
pub const API_KEY_DELIMITER: &str = "||";

pub mod pagination {

    pub const DEFAULT_PAGE: u64 = 1;

    pub const DEFAULT_LIMIT: u64 = 25;

    pub const MAX_LIMIT: u64 = 1000;
}

pub mod release_year {

    /// Exclusive lower bound for the `release_yr` filter.
    pub const FLOOR: i32 = 1900;

    /// Exclusive upper bound for the `release_yr` filter.
    pub const CEILING: i32 = 2100;
}

/// Column widths of the `titles` table, in characters.
pub mod field_limits {

    pub const SHOW_ID: usize = 100;

    pub const TITLE: usize = 200;

    pub const DIRECTOR: usize = 100;

    pub const CAST_MEMBER: usize = 100;

    pub const COUNTRY: usize = 100;

    pub const DATE_ADDED: usize = 20;

    pub const RELEASE_YEAR: usize = 20;

    pub const RATING: usize = 20;

    pub const DURATION: usize = 50;

    pub const GENRE: usize = 50;

    pub const DESCRIPTION: usize = 1000;
}
