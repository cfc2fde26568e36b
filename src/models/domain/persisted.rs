//! Records as acknowledged by the remote store. Identifiers are assigned by
//! the store and are always positive.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersistedQuiz {
    pub id: i64,
    /// Document echoed back by the store, if it sent one. Ingestion always
    /// walks the local document instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub echoed_document: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersistedQuestion {
    pub id: i64,
    pub quiz_id: i64,
    pub index: usize,
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PersistedOption {
    pub id: i64,
    pub question_id: i64,
    pub question_index: usize,
    pub text: String,
    pub is_correct: bool,
}
