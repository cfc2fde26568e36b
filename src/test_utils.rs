use crate::models::domain::{QuestionRecord, QuizDocument, QuizSpec};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Two questions, two options each.
    pub fn test_spec() -> QuizSpec {
        QuizSpec::new("Arithmetic", "Small sums", "addition", 2, 2)
    }

    pub fn test_document() -> QuizDocument {
        QuizDocument::new(vec![
            QuestionRecord {
                text: "2+2?".to_string(),
                options: vec!["4".to_string(), "5".to_string()],
                correct_answer: "4".to_string(),
            },
            QuestionRecord {
                text: "3+3?".to_string(),
                options: vec!["6".to_string(), "7".to_string()],
                correct_answer: "6".to_string(),
            },
        ])
    }

    /// Generator output for [`test_document`], wrapped the way models tend to
    /// answer: fenced, with commentary around it.
    pub fn generated_text() -> String {
        format!(
            "Here is your quiz:\n```json\n{}\n```\nGood luck!",
            test_document().to_json()
        )
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::normalizer;

    #[test]
    fn test_generated_text_normalizes_to_document() {
        let spec = test_spec();
        let document = normalizer::normalize(&generated_text(), spec.option_count()).unwrap();
        assert_eq!(document, test_document());
    }

    #[test]
    fn test_spec_matches_document_shape() {
        let spec = test_spec();
        let document = test_document();
        assert_eq!(document.len(), spec.question_count());
        assert!(document
            .questions
            .iter()
            .all(|q| q.options.len() == spec.option_count()));
    }
}
