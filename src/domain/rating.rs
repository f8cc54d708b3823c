// src/domain/rating.rs
use crate::constants::{DEFAULT_RATING, MAX_RATING};
use crate::domain::DomainError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if (1..=MAX_RATING).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidRating(value))
        }
    }

    /// Stored ratings outside 1..=5 are clamped rather than rejected.
    pub fn clamped(value: u8) -> Self {
        Self(value.clamp(1, MAX_RATING))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(DEFAULT_RATING)
    }
}

impl TryFrom<u8> for Rating {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> u8 {
        rating.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Star {
    pub value: u8,
    pub filled: bool,
}

/// A row of five star controls.
///
/// Read-only rows reflect a stored rating. Interactive rows turn a click on
/// star `n` into a pending rating of `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRow {
    rating: u8,
    interactive: bool,
}

impl StarRow {
    pub fn read_only(rating: u8) -> Self {
        Self {
            rating,
            interactive: false,
        }
    }

    pub fn interactive(rating: Rating) -> Self {
        Self {
            rating: rating.value(),
            interactive: true,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn stars(&self) -> impl Iterator<Item = Star> + '_ {
        (1..=MAX_RATING).map(move |value| Star {
            value,
            filled: value <= self.rating,
        })
    }

    pub fn click(&self, star: u8) -> Option<Rating> {
        if !self.interactive {
            return None;
        }
        Rating::new(star).ok()
    }
}
