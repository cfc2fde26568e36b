use serde::{Deserialize, Serialize};

/// One question after repair: `options` has exactly the requested length,
/// holds no duplicates, and contains `correct_answer`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuestionRecord {
    #[serde(rename = "question")]
    pub text: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}

impl QuestionRecord {
    pub fn is_correct(&self, option: &str) -> bool {
        // Exact comparison; case and punctuation differences count as wrong.
        option == self.correct_answer
    }
}

/// The normalized quiz. Serializes to the same `{"questions": [...]}` shape
/// the generator is asked to produce.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizDocument {
    pub questions: Vec<QuestionRecord>,
}

impl QuizDocument {
    pub fn new(questions: Vec<QuestionRecord>) -> Self {
        Self { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| r#"{"questions":[]}"#.to_string())
    }
}
