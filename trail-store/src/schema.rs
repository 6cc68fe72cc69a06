//! Database schema definitions for the trail store.
//!
//! Defines trail difficulty grades and the DuckDB schema.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Hiking difficulty grade of a trail (Italian CAI scale).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// T - tourist path
    Easy,
    /// E - hiking trail
    Medium,
    /// EE - expert hikers
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "facile" | "t" => Some(Difficulty::Easy),
            "medium" | "media" | "e" => Some(Difficulty::Medium),
            "hard" | "difficile" | "ee" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SQL schema for creating the trail database tables.
pub const SCHEMA_SQL: &str = r#"
-- Shelters: the catalog of mountain refuges
CREATE TABLE IF NOT EXISTS shelter (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    locality VARCHAR NOT NULL,
    altitude INTEGER NOT NULL,
    capacity INTEGER NOT NULL,
    is_open BOOLEAN NOT NULL
);

-- Trails: dated undirected connections between two shelters
CREATE TABLE IF NOT EXISTS trail (
    shelter_id1 BIGINT NOT NULL,
    shelter_id2 BIGINT NOT NULL,
    distance DOUBLE,
    difficulty VARCHAR,
    duration VARCHAR,
    year INTEGER NOT NULL
);

-- Metadata table: version, import info
CREATE TABLE IF NOT EXISTS metadata (
    key VARCHAR PRIMARY KEY,
    value VARCHAR
);

CREATE INDEX IF NOT EXISTS idx_shelter_name ON shelter(name);
CREATE INDEX IF NOT EXISTS idx_trail_year ON trail(year);
"#;

/// Schema version recorded in `metadata`.
pub const SCHEMA_VERSION: &str = "1.0.0";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_roundtrip() {
        for d in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            assert_eq!(Difficulty::parse(d.as_str()), Some(d));
        }
    }

    #[test]
    fn test_difficulty_accepts_cai_grades() {
        assert_eq!(Difficulty::parse("EE"), Some(Difficulty::Hard));
        assert_eq!(Difficulty::parse("facile"), Some(Difficulty::Easy));
        assert_eq!(Difficulty::parse("extreme"), None);
    }
}
