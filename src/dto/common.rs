use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Difficulty level requested for a game and attached to each question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Warm-up questions.
    #[default]
    Easy,
    /// Intermediate questions.
    Medium,
    /// Hardest questions of the bank.
    Hard,
}

impl Difficulty {
    /// Lowercase label used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Question category a game draws from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Cat trivia only.
    #[default]
    Cats,
    /// Any category.
    Mixed,
}

impl Category {
    /// Lowercase label used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Cats => "cats",
            Category::Mixed => "mixed",
        }
    }

    /// Whether a stored category label belongs to this selection.
    ///
    /// `Mixed` accepts every label.
    pub fn accepts(&self, label: &str) -> bool {
        match self {
            Category::Mixed => true,
            other => other.as_str().eq_ignore_ascii_case(label.trim()),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixed_accepts_any_label() {
        assert!(Category::Mixed.accepts("cats"));
        assert!(Category::Mixed.accepts("geography"));
        assert!(Category::Cats.accepts(" Cats "));
        assert!(!Category::Cats.accepts("dogs"));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Difficulty::Hard).unwrap(), "\"hard\"");
        let category: Category = serde_json::from_str("\"mixed\"").unwrap();
        assert_eq!(category, Category::Mixed);
    }
}
