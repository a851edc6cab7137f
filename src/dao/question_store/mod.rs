mod json;

use futures::future::BoxFuture;

use crate::dao::{models::QuestionEntity, storage::StorageResult};
use crate::dto::common::{Category, Difficulty};

pub use self::json::JsonQuestionStore;

/// Criteria used to draw questions for a new session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionFilter {
    /// Exact difficulty to match.
    pub difficulty: Difficulty,
    /// Category to match; `Mixed` matches all.
    pub category: Category,
}

impl QuestionFilter {
    /// Whether a stored row matches the filter.
    pub fn matches(&self, entity: &QuestionEntity) -> bool {
        self.difficulty
            .as_str()
            .eq_ignore_ascii_case(entity.difficulty.trim())
            && self.category.accepts(&entity.category)
    }
}

/// Read access to the question bank.
pub trait QuestionStore: Send + Sync {
    /// Every row matching `filter`.
    fn list_questions(
        &self,
        filter: QuestionFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Rows for `ids`, in the order of `ids`; unknown ids are skipped.
    fn find_questions(&self, ids: Vec<i64>) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>>;
    /// Number of stored rows.
    fn count(&self) -> BoxFuture<'static, StorageResult<usize>>;
}
