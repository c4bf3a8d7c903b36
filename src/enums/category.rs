use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bug,
    Feature,
    Enhancement,
    Documentation,
    Question,
    Maintenance,
    Security,
    Other,
}

impl Category {
    /// Maps free text from a model reply onto the closed vocabulary.
    /// Anything outside it lands on `Other`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "bug" => Category::Bug,
            "feature" => Category::Feature,
            "enhancement" => Category::Enhancement,
            "documentation" => Category::Documentation,
            "question" => Category::Question,
            "maintenance" => Category::Maintenance,
            "security" => Category::Security,
            _ => Category::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Bug => "bug",
            Category::Feature => "feature",
            Category::Enhancement => "enhancement",
            Category::Documentation => "documentation",
            Category::Question => "question",
            Category::Maintenance => "maintenance",
            Category::Security => "security",
            Category::Other => "other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
