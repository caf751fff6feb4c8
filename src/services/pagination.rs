use crate::constants::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT};

/// Largest row offset the store can bind (SQLite integers are signed 64-bit).
const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// A validated page window: `page >= 1`, `1 <= limit <= MAX_LIMIT` and an
/// offset that fits the store's integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
    offset: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Result<Self, String> {
        if page < 1 {
            return Err(format!("Invalid page: {page}. Page must be 1 or greater"));
        }
        check_limit(limit)?;

        let offset = (page - 1)
            .checked_mul(limit)
            .filter(|offset| *offset <= MAX_OFFSET)
            .ok_or_else(|| format!("Invalid page: {page}. Page is out of range for limit {limit}"))?;

        Ok(Self {
            page,
            limit,
            offset,
        })
    }

    /// Window starting `skip` rows in. `page` is the page that row falls on.
    pub fn from_skip(skip: u64, limit: u64) -> Result<Self, String> {
        check_limit(limit)?;

        if skip > MAX_OFFSET {
            return Err(format!("Invalid skip: {skip}. Skip must be at most {MAX_OFFSET}"));
        }

        Ok(Self {
            page: skip / limit + 1,
            limit,
            offset: skip,
        })
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }
}

fn check_limit(limit: u64) -> Result<(), String> {
    if (1..=MAX_LIMIT).contains(&limit) {
        Ok(())
    } else {
        Err(format!(
            "Invalid limit: {limit}. Limit must be between 1 and {MAX_LIMIT}"
        ))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Page metadata derived from a window and the total match count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageInfo {
    #[must_use]
    pub const fn compute(request: PageRequest, total: u64) -> Self {
        let total_pages = total.div_ceil(request.limit);
        Self {
            page: request.page,
            total,
            total_pages,
            has_prev: request.offset > 0,
            has_next: request.offset.saturating_add(request.limit) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(page: u64, limit: u64, total: u64) -> PageInfo {
        PageInfo::compute(PageRequest::new(page, limit).unwrap(), total)
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 25).unwrap().offset(), 0);
        assert_eq!(PageRequest::new(3, 10).unwrap().offset(), 20);
        assert_eq!(PageRequest::default().offset(), 0);
        assert_eq!(PageRequest::default().limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn test_rejects_invalid_window() {
        assert!(PageRequest::new(0, 10).is_err());
        assert!(PageRequest::new(1, 0).is_err());
        assert!(PageRequest::new(1, MAX_LIMIT + 1).is_err());
        assert!(PageRequest::new(1, MAX_LIMIT).is_ok());
    }

    #[test]
    fn test_rejects_offset_beyond_store_range() {
        assert!(PageRequest::new(9_223_372_036_854_775_807, 25).is_err());
        assert!(PageRequest::new(400_000_000_000_000_000, 25).is_err());
        assert!(PageRequest::new(u64::MAX, MAX_LIMIT).is_err());

        let last = PageRequest::new(MAX_OFFSET / 1000 + 1, 1000).unwrap();
        assert!(last.offset() <= MAX_OFFSET);
    }

    #[test]
    fn test_skip_window() {
        let window = PageRequest::from_skip(50, 25).unwrap();
        assert_eq!(window.offset(), 50);
        assert_eq!(window.page(), 3);

        let window = PageRequest::from_skip(3, 25).unwrap();
        assert_eq!(window.page(), 1);
        let page_info = PageInfo::compute(window, 30);
        assert!(page_info.has_prev);
        assert!(page_info.has_next);
        assert!(!PageInfo::compute(window, 28).has_next);

        assert!(PageRequest::from_skip(u64::MAX, 25).is_err());
        assert!(PageRequest::from_skip(0, 0).is_err());
    }

    #[test]
    fn test_total_pages_rounds_up() {
        assert_eq!(info(1, 10, 1).total_pages, 1);
        assert_eq!(info(1, 10, 10).total_pages, 1);
        assert_eq!(info(1, 10, 11).total_pages, 2);
        assert_eq!(info(1, 1, 2).total_pages, 2);
    }

    #[test]
    fn test_empty_result_has_no_pages() {
        for page in [1, 2, 50] {
            let page_info = info(page, 25, 0);
            assert_eq!(page_info.total_pages, 0);
            assert!(!page_info.has_next);
            assert_eq!(page_info.has_prev, page > 1);
        }
    }

    #[test]
    fn test_prev_next_flags() {
        let first = info(1, 1, 2);
        assert!(!first.has_prev);
        assert!(first.has_next);

        let last = info(2, 1, 2);
        assert!(last.has_prev);
        assert!(!last.has_next);

        let beyond = info(5, 1, 2);
        assert!(beyond.has_prev);
        assert!(!beyond.has_next);
    }

    #[test]
    fn test_flags_match_definition_exhaustively() {
        for limit in 1..=7u64 {
            for total in 0..=30u64 {
                for page in 1..=8u64 {
                    let page_info = info(page, limit, total);
                    let expected_pages = (total + limit - 1) / limit;
                    assert_eq!(page_info.total_pages, expected_pages);
                    assert_eq!(page_info.has_next, page < expected_pages);
                    assert_eq!(page_info.has_prev, page > 1);
                }
            }
        }
    }
}
