use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Outcome of a single create call against the remote store that did not
/// yield an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Unexpected status code: {0}")]
    UnexpectedRemoteStatus(u16),

    #[error("Rejected by store: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Store response carried no identifier")]
    MissingIdentifier,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Invalid store response: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            StoreError::InvalidResponse(err.to_string())
        } else {
            StoreError::Transport(err.to_string())
        }
    }
}

/// Every failure the generate-and-ingest pipeline can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("Malformed quiz document: {0}")]
    MalformedDocument(String),

    #[error("Invalid quiz parameters: {0}")]
    InvalidSpec(String),

    #[error("No session credential available")]
    MissingCredential,

    #[error("Text generation failed: {0}")]
    GenerationFailed(String),

    #[error("Quiz creation failed: {0}")]
    QuizCreationFailed(StoreError),

    #[error("Question {} creation failed: {reason}", .index + 1)]
    QuestionCreationFailed { index: usize, reason: StoreError },

    #[error(
        "Option {} of question {} creation failed: {reason}",
        .option_index + 1,
        .question_index + 1
    )]
    OptionCreationFailed {
        question_index: usize,
        option_index: usize,
        reason: StoreError,
    },
}

impl PipelineError {
    pub fn code(&self) -> &'static str {
        match self {
            PipelineError::MalformedDocument(_) => "MALFORMED_DOCUMENT",
            PipelineError::InvalidSpec(_) => "INVALID_SPEC",
            PipelineError::MissingCredential => "MISSING_CREDENTIAL",
            PipelineError::GenerationFailed(_) => "GENERATION_FAILED",
            PipelineError::QuizCreationFailed(_) => "QUIZ_CREATION_FAILED",
            PipelineError::QuestionCreationFailed { .. } => "QUESTION_CREATION_FAILED",
            PipelineError::OptionCreationFailed { .. } => "OPTION_CREATION_FAILED",
        }
    }

    /// Fatal errors stop the whole pipeline; the rest only drop one branch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PipelineError::InvalidSpec(_)
                | PipelineError::MissingCredential
                | PipelineError::GenerationFailed(_)
                | PipelineError::QuizCreationFailed(_)
        )
    }
}

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::UpstreamError(_) => "UPSTREAM_ERROR",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub kind: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            kind: self.error_code(),
        })
    }
}

impl From<PipelineError> for AppError {
    fn from(err: PipelineError) -> Self {
        match err {
            PipelineError::MissingCredential => AppError::Unauthorized(err.to_string()),
            PipelineError::GenerationFailed(_) | PipelineError::QuizCreationFailed(_) => {
                AppError::UpstreamError(err.to_string())
            }
            PipelineError::MalformedDocument(_) | PipelineError::InvalidSpec(_) => {
                AppError::ValidationError(err.to_string())
            }
            PipelineError::QuestionCreationFailed { .. }
            | PipelineError::OptionCreationFailed { .. } => AppError::InternalError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthorized("test".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::UpstreamError("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::Unauthorized("no token".into());
        assert_eq!(err.to_string(), "Unauthorized: no token");
    }

    #[test]
    fn test_pipeline_error_messages_are_one_based() {
        let err = PipelineError::OptionCreationFailed {
            question_index: 0,
            option_index: 2,
            reason: StoreError::UnexpectedRemoteStatus(500),
        };
        assert_eq!(
            err.to_string(),
            "Option 3 of question 1 creation failed: Unexpected status code: 500"
        );
    }

    #[test]
    fn test_rejected_joins_messages() {
        let err = StoreError::Rejected(vec!["title empty".into(), "bad topic".into()]);
        assert_eq!(err.to_string(), "Rejected by store: title empty; bad topic");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(PipelineError::MissingCredential.is_fatal());
        assert!(PipelineError::QuizCreationFailed(StoreError::MissingIdentifier).is_fatal());
        assert!(!PipelineError::MalformedDocument("x".into()).is_fatal());
        assert!(!PipelineError::QuestionCreationFailed {
            index: 0,
            reason: StoreError::MissingIdentifier,
        }
        .is_fatal());
    }

    #[test]
    fn test_pipeline_error_maps_to_http_status() {
        let missing: AppError = PipelineError::MissingCredential.into();
        assert_eq!(missing.status_code(), StatusCode::UNAUTHORIZED);

        let quiz: AppError =
            PipelineError::QuizCreationFailed(StoreError::UnexpectedRemoteStatus(503)).into();
        assert_eq!(quiz.status_code(), StatusCode::BAD_GATEWAY);

        let invalid: AppError = PipelineError::InvalidSpec("option_count: range".into()).into();
        assert_eq!(invalid.status_code(), StatusCode::BAD_REQUEST);
    }
}
