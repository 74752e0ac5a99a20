// src/domain/pagination.rs
//
// Pagination window over an id-ordered result set.

use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 50;

/// A page of `limit` rows starting at row `offset * limit`.
///
/// `offset` counts pages, not rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    limit: u32,
    offset: u32,
}

impl PageRequest {
    pub fn new(limit: u32, offset: u32) -> DomainResult<Self> {
        if limit > MAX_PAGE_LIMIT {
            return Err(DomainError::InvalidArgument(format!(
                "limit must be at most {}, got {}",
                MAX_PAGE_LIMIT, limit
            )));
        }
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Index of the first row in the window.
    pub fn first_row(&self) -> u64 {
        u64::from(self.offset) * u64::from(self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_row_is_offset_times_limit() {
        let page = PageRequest::new(5, 3).unwrap();
        assert_eq!(page.first_row(), 15);
        assert_eq!(page.limit(), 5);
    }

    #[test]
    fn test_zero_limit_is_allowed() {
        let page = PageRequest::new(0, 4).unwrap();
        assert_eq!(page.first_row(), 0);
    }

    #[test]
    fn test_limit_above_maximum_is_rejected() {
        let err = PageRequest::new(MAX_PAGE_LIMIT + 1, 0).unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn test_large_offsets_do_not_overflow() {
        let page = PageRequest::new(MAX_PAGE_LIMIT, u32::MAX).unwrap();
        assert_eq!(page.first_row(), u64::from(u32::MAX) * 50);
    }
}
