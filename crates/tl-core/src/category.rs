//! Category codes as the single source of truth for the log vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Broad kind of activity a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Task,
    Break,
    Fixed,
    Misc,
}

/// Closed set of category codes accepted after the `_` delimiter.
///
/// Each kind has three tiers, written by repeating its letter (`t`, `tt`,
/// `ttt`). `Misc` is never written in the log; it is assigned to event lines
/// that carry no category at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Task1,
    Task2,
    Task3,
    Break1,
    Break2,
    Break3,
    Fixed1,
    Fixed2,
    Fixed3,
    Misc,
}

impl Category {
    /// Every category, in table order.
    pub const ALL: [Self; 10] = [
        Self::Task1,
        Self::Task2,
        Self::Task3,
        Self::Break1,
        Self::Break2,
        Self::Break3,
        Self::Fixed1,
        Self::Fixed2,
        Self::Fixed3,
        Self::Misc,
    ];

    /// Events in this category are logged but never counted.
    pub const IGNORED: Self = Self::Fixed3;

    /// Code as written in the log.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Task1 => "t",
            Self::Task2 => "tt",
            Self::Task3 => "ttt",
            Self::Break1 => "b",
            Self::Break2 => "bb",
            Self::Break3 => "bbb",
            Self::Fixed1 => "f",
            Self::Fixed2 => "ff",
            Self::Fixed3 => "fff",
            Self::Misc => "mis",
        }
    }

    #[must_use]
    pub const fn kind(self) -> Kind {
        match self {
            Self::Task1 | Self::Task2 | Self::Task3 => Kind::Task,
            Self::Break1 | Self::Break2 | Self::Break3 => Kind::Break,
            Self::Fixed1 | Self::Fixed2 | Self::Fixed3 => Kind::Fixed,
            Self::Misc => Kind::Misc,
        }
    }

    /// Position in [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for category codes outside the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in Category::ALL {
            let s = variant.to_string();
            let parsed: Category = s.parse().expect("should parse");
            assert_eq!(parsed, variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn index_matches_table_order() {
        for (i, category) in Category::ALL.iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn codes_are_case_sensitive() {
        assert!("T".parse::<Category>().is_err());
        assert!("tttt".parse::<Category>().is_err());
    }

    #[test]
    fn unknown_category_errors() {
        let err = "xyz".parse::<Category>().unwrap_err();
        assert_eq!(err.to_string(), "unknown category: xyz");
    }

    #[test]
    fn ignored_is_third_tier_fixed() {
        assert_eq!(Category::IGNORED.as_str(), "fff");
        assert_eq!(Category::IGNORED.kind(), Kind::Fixed);
    }

    #[test]
    fn serializes_as_code() {
        let json = serde_json::to_string(&Category::Break2).unwrap();
        assert_eq!(json, "\"bb\"");
        let parsed: Category = serde_json::from_str("\"ttt\"").unwrap();
        assert_eq!(parsed, Category::Task3);
        assert!(serde_json::from_str::<Category>("\"q\"").is_err());
    }
}
