use serde::Serialize;

use crate::models::domain::{QuestionRecord, QuizDocument, QuizMeta};

/// Body of `POST /api/quizzes` on the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateQuizRequest {
    pub title: String,
    pub description: String,
    pub topic: String,
    #[serde(rename = "numberOfQuestions")]
    pub question_count: u32,
    #[serde(rename = "numberOfOptions")]
    pub option_count: u32,
    pub prompt: String,
    #[serde(rename = "quizJSON")]
    pub quiz_json: String,
}

impl CreateQuizRequest {
    pub fn new(meta: &QuizMeta, document: &QuizDocument) -> Self {
        CreateQuizRequest {
            title: meta.title.clone(),
            description: meta.description.clone(),
            topic: meta.topic.clone(),
            question_count: meta.question_count,
            option_count: meta.option_count,
            prompt: meta.prompt.clone(),
            quiz_json: document.to_json(),
        }
    }
}

/// Body of `POST /api/questions` on the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub quiz_id: i64,
    pub question_text: String,
}

impl CreateQuestionRequest {
    pub fn new(quiz_id: i64, record: &QuestionRecord) -> Self {
        CreateQuestionRequest {
            quiz_id,
            question_text: record.text.clone(),
        }
    }
}

/// Body of `POST /api/options` on the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOptionRequest {
    pub question_id: i64,
    pub option_text: String,
    pub is_correct: bool,
}

impl CreateOptionRequest {
    pub fn new(question_id: i64, record: &QuestionRecord, option_text: &str) -> Self {
        CreateOptionRequest {
            question_id,
            option_text: option_text.to_string(),
            is_correct: record.is_correct(option_text),
        }
    }
}
