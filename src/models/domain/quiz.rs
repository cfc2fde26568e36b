use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::quiz_prompt::quiz_metadata_prompt;

/// Parameters an instructor supplies when asking for a generated quiz.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QuizSpec {
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    #[validate(length(min = 1, max = 2000))]
    pub description: String,

    #[validate(length(min = 1, max = 200))]
    pub topic: String,

    #[serde(alias = "numberOfQuestions")]
    #[validate(range(min = 1, max = 50))]
    pub question_count: u32,

    #[serde(alias = "numberOfOptions")]
    #[validate(range(min = 1, max = 26))]
    pub option_count: u32,
}

impl QuizSpec {
    pub fn new(
        title: &str,
        description: &str,
        topic: &str,
        question_count: u32,
        option_count: u32,
    ) -> Self {
        QuizSpec {
            title: title.to_string(),
            description: description.to_string(),
            topic: topic.to_string(),
            question_count,
            option_count,
        }
    }

    pub fn question_count(&self) -> usize {
        self.question_count as usize
    }

    pub fn option_count(&self) -> usize {
        self.option_count as usize
    }
}

/// Quiz-level fields sent with the quiz create request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizMeta {
    pub title: String,
    pub description: String,
    pub topic: String,
    pub question_count: u32,
    pub option_count: u32,
    pub prompt: String,
}

impl From<&QuizSpec> for QuizMeta {
    fn from(spec: &QuizSpec) -> Self {
        QuizMeta {
            title: spec.title.clone(),
            description: spec.description.clone(),
            topic: spec.topic.clone(),
            question_count: spec.question_count,
            option_count: spec.option_count,
            prompt: quiz_metadata_prompt(&spec.topic),
        }
    }
}
