// src/domain/rating.rs
//
// A single vote applied to a rating counter.

use crate::domain::{DomainError, DomainResult};

/// The only adjustments a rating accepts: one step up or one step down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingDelta {
    Up,
    Down,
}

impl RatingDelta {
    /// Parses a raw delta; anything but +1 / -1 is rejected.
    pub fn from_raw(delta: i64) -> DomainResult<Self> {
        match delta {
            1 => Ok(RatingDelta::Up),
            -1 => Ok(RatingDelta::Down),
            other => Err(DomainError::InvalidArgument(format!(
                "rating must be either 1 or -1, got {}",
                other
            ))),
        }
    }

    pub fn value(self) -> i64 {
        match self {
            RatingDelta::Up => 1,
            RatingDelta::Down => -1,
        }
    }
}

impl TryFrom<i64> for RatingDelta {
    type Error = DomainError;

    fn try_from(delta: i64) -> DomainResult<Self> {
        Self::from_raw(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_deltas_are_accepted() {
        assert_eq!(RatingDelta::from_raw(1), Ok(RatingDelta::Up));
        assert_eq!(RatingDelta::from_raw(-1), Ok(RatingDelta::Down));
        assert_eq!(RatingDelta::Down.value(), -1);
    }

    #[test]
    fn test_other_deltas_are_invalid_arguments() {
        for raw in [0, 2, -2, 100, i64::MIN] {
            assert!(
                matches!(RatingDelta::try_from(raw), Err(DomainError::InvalidArgument(_))),
                "delta {} should be rejected",
                raw
            );
        }
    }
}
