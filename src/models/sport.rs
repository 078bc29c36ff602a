// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sport taxonomy: numeric sport codes mapped to display metadata.

use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Coarse grouping of sports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SportCategory {
    Running,
    Cycling,
    Swimming,
    Strength,
    Outdoor,
    Winter,
    Indoor,
    Other,
}

/// A sport as reported by the activity API.
///
/// Equality and hashing use `code` only: two instances built independently
/// for the same code are the same sport.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "SportCode")]
pub struct SportType {
    pub code: i32,
    pub name: String,
    pub category: SportCategory,
    pub icon: String,
    pub color: String,
}

/// Deserialization shim: only the code is trusted, the rest comes from the table.
#[derive(Deserialize)]
struct SportCode {
    code: i32,
}

impl From<SportCode> for SportType {
    fn from(raw: SportCode) -> Self {
        SportType::from_code(raw.code)
    }
}

impl PartialEq for SportType {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for SportType {}

impl Hash for SportType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

struct SportDefinition {
    code: i32,
    name: &'static str,
    category: SportCategory,
    icon: &'static str,
    color: &'static str,
}

const fn sport(
    code: i32,
    name: &'static str,
    category: SportCategory,
    icon: &'static str,
    color: &'static str,
) -> SportDefinition {
    SportDefinition {
        code,
        name,
        category,
        icon,
        color,
    }
}

const KNOWN_SPORTS: &[SportDefinition] = &[
    sport(100, "Run", SportCategory::Running, "🏃", "#FF6B35"),
    sport(101, "Indoor Run", SportCategory::Indoor, "🏃", "#FF8C5A"),
    sport(102, "Trail Run", SportCategory::Running, "⛰️", "#C0552B"),
    sport(103, "Track Run", SportCategory::Running, "🏟️", "#FF9F1C"),
    sport(104, "Hike", SportCategory::Outdoor, "🥾", "#6A994E"),
    sport(105, "Mountain Climb", SportCategory::Outdoor, "🧗", "#386641"),
    sport(106, "Walk", SportCategory::Outdoor, "🚶", "#A7C957"),
    sport(200, "Road Bike", SportCategory::Cycling, "🚴", "#2A9D8F"),
    sport(201, "Indoor Bike", SportCategory::Indoor, "🚴", "#52B69A"),
    sport(202, "E-Bike", SportCategory::Cycling, "⚡", "#34A0A4"),
    sport(203, "Mountain Bike", SportCategory::Cycling, "🚵", "#1A759F"),
    sport(300, "Pool Swim", SportCategory::Swimming, "🏊", "#0077B6"),
    sport(301, "Open Water", SportCategory::Swimming, "🌊", "#023E8A"),
    sport(400, "Gym Cardio", SportCategory::Indoor, "💪", "#9D4EDD"),
    sport(401, "Elliptical", SportCategory::Indoor, "🏋️", "#7B2CBF"),
    sport(402, "Strength", SportCategory::Strength, "🏋️", "#5A189A"),
    sport(403, "Rowing Machine", SportCategory::Indoor, "🚣", "#3C096C"),
    sport(404, "Jump Rope", SportCategory::Indoor, "🪢", "#C77DFF"),
    sport(500, "Ski", SportCategory::Winter, "⛷️", "#90E0EF"),
    sport(501, "Snowboard", SportCategory::Winter, "🏂", "#48CAE4"),
    sport(502, "XC Ski", SportCategory::Winter, "🎿", "#00B4D8"),
    sport(503, "Ski Touring", SportCategory::Winter, "🏔️", "#0096C7"),
    sport(700, "Rowing", SportCategory::Outdoor, "🚣", "#F4A261"),
    sport(702, "Whitewater", SportCategory::Outdoor, "🛶", "#E76F51"),
    sport(704, "Flatwater", SportCategory::Outdoor, "🛶", "#E9C46A"),
    sport(705, "Windsurfing", SportCategory::Outdoor, "🏄", "#264653"),
    sport(706, "Speedsurfing", SportCategory::Outdoor, "🏄", "#287271"),
    sport(800, "Triathlon", SportCategory::Other, "🏅", "#D62828"),
    sport(801, "Multisport", SportCategory::Other, "🏅", "#F77F00"),
];

const OTHER_NAME: &str = "Other";
const OTHER_ICON: &str = "🏅";
const OTHER_COLOR: &str = "#9E9E9E";

impl SportType {
    /// Look up a known sport code.
    pub fn lookup(code: i32) -> Option<SportType> {
        KNOWN_SPORTS
            .iter()
            .find(|def| def.code == code)
            .map(|def| SportType {
                code: def.code,
                name: def.name.to_string(),
                category: def.category,
                icon: def.icon.to_string(),
                color: def.color.to_string(),
            })
    }

    /// Resolve a sport code, synthesizing an "Other" sport that keeps the code
    /// when it is not in the table.
    pub fn from_code(code: i32) -> SportType {
        Self::lookup(code).unwrap_or_else(|| SportType {
            code,
            name: OTHER_NAME.to_string(),
            category: SportCategory::Other,
            icon: OTHER_ICON.to_string(),
            color: OTHER_COLOR.to_string(),
        })
    }

    pub fn is_known(&self) -> bool {
        KNOWN_SPORTS.iter().any(|def| def.code == self.code)
    }
}

/// All sports in the taxonomy, in table order.
pub fn known_sports() -> Vec<SportType> {
    KNOWN_SPORTS
        .iter()
        .map(|def| SportType::from_code(def.code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_lookup() {
        let run = SportType::from_code(100);
        assert_eq!(run.name, "Run");
        assert_eq!(run.category, SportCategory::Running);
        assert!(run.is_known());
    }

    #[test]
    fn test_unknown_code_keeps_code() {
        let other = SportType::from_code(9999);
        assert_eq!(other.code, 9999);
        assert_eq!(other.name, "Other");
        assert_eq!(other.category, SportCategory::Other);
        assert!(!other.is_known());
        assert!(SportType::lookup(9999).is_none());
    }

    #[test]
    fn test_equality_by_code_only() {
        let a = SportType::from_code(1);
        let mut b = SportType::from_code(1);
        b.name = "Renamed".to_string();
        assert_eq!(a, b);
        assert_ne!(a, SportType::from_code(2));
    }

    #[test]
    fn test_table_codes_are_unique() {
        let sports = known_sports();
        let mut codes: Vec<i32> = sports.iter().map(|s| s.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), sports.len());
    }

    #[test]
    fn test_deserialize_rehydrates_from_table() {
        let sport: SportType =
            serde_json::from_str(r#"{"code":200,"name":"stale","category":"OTHER"}"#).unwrap();
        assert_eq!(sport.name, "Road Bike");
        assert_eq!(sport.category, SportCategory::Cycling);
    }
}
