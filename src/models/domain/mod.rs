pub mod persisted;
pub mod quiz;
pub mod quiz_question;
pub use persisted::{PersistedOption, PersistedQuestion, PersistedQuiz};
pub use quiz::{QuizMeta, QuizSpec};
pub use quiz_question::{QuestionRecord, QuizDocument};
