/// Database model definitions.
pub mod models;
/// Question storage and retrieval operations.
pub mod question_store;
/// Storage abstraction layer errors.
pub mod storage;
