//! Canonical question shape and the boundary adapter that repairs incoming question data.
//!
//! Two wire conventions are in circulation: the current one (`text`, `correctIndex`, options as a
//! JSON array) and the legacy one inherited from the relational schema (`question`,
//! `correct_index`, options as a JSON-encoded string). [`QuestionPayload`] accepts both and
//! [`QuestionPayload::normalize`] always yields a [`Question`] with exactly four options and a
//! correct index in `0..=3`.

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, PickFirst, serde_as};
use tracing::debug;
use utoipa::ToSchema;

/// Number of answer options every question carries.
pub const OPTION_COUNT: usize = 4;
/// Labels used when an option is missing from the source data.
const PLACEHOLDER_OPTIONS: [&str; OPTION_COUNT] = ["Option A", "Option B", "Option C", "Option D"];

/// Multiple-choice question in its canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Identifier in the question bank.
    pub id: i64,
    /// Question shown to the player.
    pub text: String,
    /// Exactly four options, placeholders filling any gap.
    #[schema(value_type = Vec<String>)]
    pub options: [String; OPTION_COUNT],
    /// Index into `options` of the right answer, always in `0..=3`.
    #[serde(rename = "correctIndex")]
    pub correct_option_index: usize,
    /// Shown once the question is answered; may be empty.
    pub explanation: String,
    /// Category label as stored.
    pub category: String,
    /// Difficulty label as stored.
    pub difficulty: String,
    /// Optional illustration URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Question {
    /// Whether `option_index` designates the right answer.
    pub fn is_correct(&self, option_index: usize) -> bool {
        self.correct_option_index == option_index
    }
}

/// Naming convention detected on an incoming question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireFormat {
    /// `text` + `correctIndex`.
    Current,
    /// `question` + `correct_index`.
    Legacy,
}

/// Options as they arrive: a JSON array, or the JSON-encoded string stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    /// Plain JSON array.
    List(Vec<String>),
    /// JSON array encoded in a string, as stored by the relational schema.
    Encoded(String),
}

impl RawOptions {
    fn into_list(self) -> Vec<String> {
        match self {
            RawOptions::List(options) => options,
            RawOptions::Encoded(encoded) => match serde_json::from_str::<Vec<String>>(&encoded) {
                Ok(options) => options,
                Err(err) => {
                    debug!(error = %err, "options string is not a JSON array of strings");
                    Vec::new()
                }
            },
        }
    }
}

/// Question as received over the wire, tolerant to both naming conventions.
#[serde_as]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPayload {
    /// Numeric or stringified id.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    pub id: Option<i64>,
    /// Question text, current convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Question text, legacy convention.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    /// Options as a list or as a JSON-encoded string.
    #[serde(default)]
    pub options: Option<RawOptions>,
    /// `correctIndex`, current convention.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_index: Option<i64>,
    /// `correct_index`, legacy convention.
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "correct_index", skip_serializing_if = "Option::is_none")]
    pub legacy_correct_index: Option<i64>,
    /// Explanation, empty when absent.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Category label.
    #[serde(default)]
    pub category: Option<String>,
    /// Difficulty label.
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Illustration URL.
    #[serde(default)]
    pub image: Option<String>,
}

impl QuestionPayload {
    /// Detect which naming convention the payload follows.
    ///
    /// A payload carrying any current-convention field is treated as current.
    pub fn wire_format(&self) -> WireFormat {
        if self.text.is_some() || self.correct_index.is_some() {
            WireFormat::Current
        } else if self.question.is_some() || self.legacy_correct_index.is_some() {
            WireFormat::Legacy
        } else {
            WireFormat::Current
        }
    }

    /// Repair the payload into the canonical [`Question`] shape, substituting defaults for
    /// anything missing or out of range.
    pub fn normalize(self) -> Question {
        let format = self.wire_format();
        let id = self.id.unwrap_or_default();
        let mut repaired = false;

        let (primary_text, fallback_text) = match format {
            WireFormat::Current => (self.text, self.question),
            WireFormat::Legacy => (self.question, self.text),
        };
        let text = primary_text.or(fallback_text).unwrap_or_else(|| {
            repaired = true;
            String::new()
        });

        let (primary_index, fallback_index) = match format {
            WireFormat::Current => (self.correct_index, self.legacy_correct_index),
            WireFormat::Legacy => (self.legacy_correct_index, self.correct_index),
        };
        let correct_option_index = match primary_index.or(fallback_index) {
            Some(index) if (0..OPTION_COUNT as i64).contains(&index) => index as usize,
            _ => {
                repaired = true;
                0
            }
        };

        let mut listed = self.options.map(RawOptions::into_list).unwrap_or_default();
        if listed.len() != OPTION_COUNT {
            repaired = true;
        }
        listed.truncate(OPTION_COUNT);
        let mut listed = listed.into_iter();
        let options = PLACEHOLDER_OPTIONS
            .map(|placeholder| listed.next().unwrap_or_else(|| placeholder.to_string()));

        if repaired {
            debug!(id, ?format, "repaired malformed question payload");
        }

        Question {
            id,
            text,
            options,
            correct_option_index,
            explanation: self.explanation.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            difficulty: self.difficulty.unwrap_or_default(),
            image: self.image,
        }
    }
}

impl From<QuestionPayload> for Question {
    fn from(value: QuestionPayload) -> Self {
        value.normalize()
    }
}
