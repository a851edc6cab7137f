use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::dto::question::{QuestionPayload, RawOptions};

/// Question row as persisted by the relational store.
///
/// Options are kept as a JSON-encoded list of strings, mirroring the `options` column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuestionEntity {
    /// Auto-incremented primary key.
    pub id: i64,
    /// Question text.
    pub question: String,
    /// JSON-encoded ordered list of option labels.
    pub options: String,
    /// Index of the right option.
    pub correct_index: i64,
    /// Explanation displayed once the question is answered.
    #[serde(default)]
    pub explanation: String,
    /// Category label (e.g. "cats").
    pub category: String,
    /// Difficulty label ("easy", "medium" or "hard").
    pub difficulty: String,
    /// Optional image reference.
    #[serde(default)]
    pub image: Option<String>,
    /// Row creation timestamp.
    #[serde(default = "SystemTime::now")]
    pub created_at: SystemTime,
}

impl QuestionEntity {
    /// Build a row from plain option labels, encoding them the way the store does.
    pub fn new(
        id: i64,
        question: impl Into<String>,
        options: &[&str],
        correct_index: i64,
        category: impl Into<String>,
        difficulty: impl Into<String>,
    ) -> Self {
        Self {
            id,
            question: question.into(),
            options: serde_json::to_string(options).unwrap_or_else(|_| "[]".into()),
            correct_index,
            explanation: String::new(),
            category: category.into(),
            difficulty: difficulty.into(),
            image: None,
            created_at: SystemTime::now(),
        }
    }

    /// Attach the explanation shown after answering.
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = explanation.into();
        self
    }
}

/// Rows use the legacy naming convention, so they go through the same adapter as wire data.
impl From<QuestionEntity> for QuestionPayload {
    fn from(value: QuestionEntity) -> Self {
        Self {
            id: Some(value.id),
            question: Some(value.question),
            options: Some(RawOptions::Encoded(value.options)),
            legacy_correct_index: Some(value.correct_index),
            explanation: Some(value.explanation),
            category: Some(value.category),
            difficulty: Some(value.difficulty),
            image: value.image,
            ..Self::default()
        }
    }
}
