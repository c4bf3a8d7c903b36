use std::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone, Copy, Eq, Hash, PartialEq, Ord, PartialOrd)]
#[serde(rename_all = "kebab-case")]
pub enum Effort {
    Trivial,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl Effort {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "trivial" => Effort::Trivial,
            "small" => Effort::Small,
            "medium" => Effort::Medium,
            "large" => Effort::Large,
            "extra-large" | "extra_large" | "xl" => Effort::ExtraLarge,
            _ => Effort::Medium,
        }
    }

    pub fn is_low(&self) -> bool {
        matches!(self, Effort::Trivial | Effort::Small)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Effort::Trivial => "trivial",
            Effort::Small => "small",
            Effort::Medium => "medium",
            Effort::Large => "large",
            Effort::ExtraLarge => "extra-large",
        }
    }
}

impl Default for Effort {
    fn default() -> Self {
        Effort::Medium
    }
}

impl fmt::Display for Effort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
