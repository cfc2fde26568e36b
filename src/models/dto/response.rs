use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{errors::PipelineError, services::ingestion::IngestionReport};

/// Success-shaped body of the store's quiz create call. Fields are optional
/// because a `400` answer arrives on the same path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuizResponse {
    #[serde(rename = "quizId", default)]
    pub quiz_id: Option<i64>,
    #[serde(rename = "quizJSON", default)]
    pub quiz_json: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateQuestionResponse {
    #[serde(rename = "questionId", default)]
    pub question_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOptionResponse {
    #[serde(rename = "optionId", default)]
    pub option_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub code: &'static str,
    pub message: String,
}

impl From<&PipelineError> for ErrorEntry {
    fn from(err: &PipelineError) -> Self {
        ErrorEntry {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// Returned by `POST /api/quizzes/generate` once the quiz itself exists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateQuizResponse {
    pub run_id: Uuid,
    pub quiz_id: Option<i64>,
    pub question_ids: Vec<i64>,
    pub option_ids: Vec<i64>,
    pub skipped_questions: Vec<usize>,
    pub used_fallback: bool,
    pub errors: Vec<ErrorEntry>,
}

impl From<&IngestionReport> for GenerateQuizResponse {
    fn from(report: &IngestionReport) -> Self {
        GenerateQuizResponse {
            run_id: report.run_id,
            quiz_id: report.quiz_id(),
            question_ids: report.questions.iter().map(|q| q.id).collect(),
            option_ids: report.options.iter().map(|o| o.id).collect(),
            skipped_questions: report.skipped_questions.clone(),
            used_fallback: report.used_fallback,
            errors: report.errors.iter().map(ErrorEntry::from).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiz_response_reads_store_field_names() {
        let parsed: CreateQuizResponse =
            serde_json::from_str(r#"{"quizId": 12, "instructorId": 3, "quizJSON": "{}"}"#).unwrap();
        assert_eq!(parsed.quiz_id, Some(12));
        assert_eq!(parsed.quiz_json.as_deref(), Some("{}"));
    }

    #[test]
    fn missing_identifier_deserializes_as_none() {
        let parsed: CreateOptionResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.option_id, None);
    }

    #[test]
    fn error_entry_uses_stable_code() {
        let entry = ErrorEntry::from(&PipelineError::MissingCredential);
        assert_eq!(entry.code, "MISSING_CREDENTIAL");
        assert_eq!(entry.message, "No session credential available");
    }
}
