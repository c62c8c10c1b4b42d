use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Amenity tags a building may carry.
///
/// The vocabulary is closed; anything else is rejected at graph construction
/// time (or dropped, depending on [`crate::graph::CategoryPolicy`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Study,
    Dining,
    Coffee,
    Microwave,
    Gym,
    Library,
    Atm,
    #[serde(rename = "math learning centre")]
    MathLearningCentre,
    #[serde(rename = "writing centre")]
    WritingCentre,
    Transportation,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Category; 10] = [
        Category::Study,
        Category::Dining,
        Category::Coffee,
        Category::Microwave,
        Category::Gym,
        Category::Library,
        Category::Atm,
        Category::MathLearningCentre,
        Category::WritingCentre,
        Category::Transportation,
    ];

    /// Canonical label used in datasets and serialized output.
    pub fn label(self) -> &'static str {
        match self {
            Category::Study => "study",
            Category::Dining => "dining",
            Category::Coffee => "coffee",
            Category::Microwave => "microwave",
            Category::Gym => "gym",
            Category::Library => "library",
            Category::Atm => "atm",
            Category::MathLearningCentre => "math learning centre",
            Category::WritingCentre => "writing centre",
            Category::Transportation => "transportation",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Case-insensitive; `_` and `-` are accepted in place of spaces.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value
            .trim()
            .to_ascii_lowercase()
            .replace(['_', '-'], " ");

        Category::ALL
            .into_iter()
            .find(|category| category.label() == normalized)
            .ok_or_else(|| Error::UnknownCategory {
                value: value.to_string(),
            })
    }
}
