use std::{collections::HashMap, path::Path, sync::Arc};

use futures::future::BoxFuture;
use tracing::info;

use crate::dao::{
    models::QuestionEntity,
    question_store::{QuestionFilter, QuestionStore},
    storage::{StorageError, StorageResult},
};

/// In-memory question bank seeded from a JSON array of [`QuestionEntity`] rows.
#[derive(Clone)]
pub struct JsonQuestionStore {
    rows: Arc<Vec<QuestionEntity>>,
}

impl JsonQuestionStore {
    /// Wrap already loaded rows.
    pub fn new(rows: Vec<QuestionEntity>) -> Self {
        Self {
            rows: Arc::new(rows),
        }
    }

    /// Read and decode the seed file at `path`.
    pub async fn load(path: &Path) -> StorageResult<Self> {
        let contents = tokio::fs::read_to_string(path).await.map_err(|source| {
            StorageError::unavailable(format!("cannot read `{}`", path.display()), source)
        })?;
        let rows = serde_json::from_str::<Vec<QuestionEntity>>(&contents).map_err(|source| {
            StorageError::corrupt(format!("cannot decode `{}`", path.display()), source)
        })?;
        info!(path = %path.display(), count = rows.len(), "loaded question bank");
        Ok(Self::new(rows))
    }

    /// Small bank shipped with the binary, used when no seed file is configured.
    pub fn builtin() -> Self {
        Self::new(builtin_questions())
    }
}

impl QuestionStore for JsonQuestionStore {
    fn list_questions(
        &self,
        filter: QuestionFilter,
    ) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let rows = self.rows.clone();
        Box::pin(async move {
            Ok(rows
                .iter()
                .filter(|row| filter.matches(row))
                .cloned()
                .collect())
        })
    }

    fn find_questions(&self, ids: Vec<i64>) -> BoxFuture<'static, StorageResult<Vec<QuestionEntity>>> {
        let rows = self.rows.clone();
        Box::pin(async move {
            let by_id = rows
                .iter()
                .map(|row| (row.id, row))
                .collect::<HashMap<_, _>>();
            Ok(ids
                .iter()
                .filter_map(|id| by_id.get(id).map(|row| (*row).clone()))
                .collect())
        })
    }

    fn count(&self) -> BoxFuture<'static, StorageResult<usize>> {
        let count = self.rows.len();
        Box::pin(async move { Ok(count) })
    }
}

fn builtin_questions() -> Vec<QuestionEntity> {
    vec![
        QuestionEntity::new(
            1,
            "How many toes does a typical cat have?",
            &["16", "18", "20", "22"],
            1,
            "cats",
            "easy",
        )
        .with_explanation("Five on each front paw and four on each back paw."),
        QuestionEntity::new(
            2,
            "What is a group of kittens called?",
            &["A kindle", "A pride", "A clowder", "A parliament"],
            0,
            "cats",
            "easy",
        )
        .with_explanation("A group of adult cats is a clowder; kittens form a kindle."),
        QuestionEntity::new(
            3,
            "Roughly how many hours a day does an adult cat sleep?",
            &["4-6", "8-10", "12-16", "20-22"],
            2,
            "cats",
            "easy",
        )
        .with_explanation("Cats conserve energy and sleep between 12 and 16 hours a day."),
        QuestionEntity::new(
            4,
            "Which organ lets cats 'taste' scents?",
            &["Jacobson's organ", "Eustachian tube", "Nictitating membrane", "Carpal pad"],
            0,
            "cats",
            "medium",
        )
        .with_explanation("The vomeronasal (Jacobson's) organ sits in the roof of the mouth."),
        QuestionEntity::new(
            5,
            "Which cat breed is known for having no tail?",
            &["Siamese", "Manx", "Bengal", "Persian"],
            1,
            "cats",
            "medium",
        )
        .with_explanation("The Manx carries a dominant gene that shortens the spine."),
        QuestionEntity::new(
            6,
            "What frequency range is a cat's purr typically in?",
            &["5-10 Hz", "25-150 Hz", "300-500 Hz", "1-2 kHz"],
            1,
            "cats",
            "hard",
        )
        .with_explanation("Purring sits between 25 and 150 Hz."),
        QuestionEntity::new(
            7,
            "Which planet has the shortest day?",
            &["Earth", "Mars", "Jupiter", "Venus"],
            2,
            "science",
            "easy",
        )
        .with_explanation("Jupiter rotates in just under ten hours."),
        QuestionEntity::new(
            8,
            "What is the capital of Australia?",
            &["Sydney", "Melbourne", "Perth", "Canberra"],
            3,
            "geography",
            "medium",
        )
        .with_explanation("Canberra was purpose-built as a compromise capital."),
        QuestionEntity::new(
            9,
            "Which element has the chemical symbol W?",
            &["Tungsten", "Wolframite", "Vanadium", "Xenon"],
            0,
            "science",
            "hard",
        )
        .with_explanation("W comes from its German name, Wolfram."),
    ]
}
