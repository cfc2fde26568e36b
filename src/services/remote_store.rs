use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    config::Config,
    errors::{AppError, AppResult, StoreError},
    models::dto::{
        request::{CreateOptionRequest, CreateQuestionRequest, CreateQuizRequest},
        response::{CreateOptionResponse, CreateQuestionResponse, CreateQuizResponse},
    },
    services::session::SessionContext,
};

/// What the store handed back for an answered create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedQuiz {
    pub quiz_id: i64,
    pub echoed_document: Option<String>,
}

/// The create half of the remote quiz store. Identifiers are assigned by the
/// store; a call either yields one or fails with a [`StoreError`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteStore: Send + Sync {
    async fn create_quiz(
        &self,
        session: &SessionContext,
        request: &CreateQuizRequest,
    ) -> Result<CreatedQuiz, StoreError>;

    async fn create_question(
        &self,
        session: &SessionContext,
        request: &CreateQuestionRequest,
    ) -> Result<i64, StoreError>;

    async fn create_option(
        &self,
        session: &SessionContext,
        request: &CreateOptionRequest,
    ) -> Result<i64, StoreError>;
}

pub struct HttpRemoteStore {
    client: reqwest::Client,
}

impl HttpRemoteStore {
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.store_timeout_secs))
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build store client: {}", e)))?;

        Ok(Self { client })
    }

    /// POSTs `body` and returns the parsed response when the store answered
    /// with `201` or `400`, together with the body for error extraction.
    async fn post<B, R>(
        &self,
        session: &SessionContext,
        path: &str,
        body: &B,
    ) -> Result<(R, Value), StoreError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned + Default + Send,
    {
        let url = session.endpoint(path);

        let response = self
            .client
            .post(&url)
            .bearer_auth(session.credential())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Request to {} failed: {}", url, e);
                StoreError::from(e)
            })?;

        let status = response.status();
        if !is_answered(status) {
            log::warn!("Store answered {} with unexpected status {}", url, status);
            return Err(StoreError::UnexpectedRemoteStatus(status.as_u16()));
        }

        let text = response.text().await.map_err(StoreError::from)?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|e| StoreError::InvalidResponse(format!("{}: {}", e, text)))?;

        // 400 bodies are usually a bare list of messages, not the success shape
        let parsed = parse_or_default::<R>(&url, &value);

        Ok((parsed, value))
    }
}

#[async_trait]
impl RemoteStore for HttpRemoteStore {
    async fn create_quiz(
        &self,
        session: &SessionContext,
        request: &CreateQuizRequest,
    ) -> Result<CreatedQuiz, StoreError> {
        let (response, body): (CreateQuizResponse, Value) =
            self.post(session, "/api/quizzes", request).await?;

        let quiz_id = assigned_id(response.quiz_id, &body)?;
        Ok(CreatedQuiz {
            quiz_id,
            echoed_document: response.quiz_json,
        })
    }

    async fn create_question(
        &self,
        session: &SessionContext,
        request: &CreateQuestionRequest,
    ) -> Result<i64, StoreError> {
        let (response, body): (CreateQuestionResponse, Value) =
            self.post(session, "/api/questions", request).await?;

        assigned_id(response.question_id, &body)
    }

    async fn create_option(
        &self,
        session: &SessionContext,
        request: &CreateOptionRequest,
    ) -> Result<i64, StoreError> {
        let (response, body): (CreateOptionResponse, Value) =
            self.post(session, "/api/options", request).await?;

        assigned_id(response.option_id, &body)
    }
}

fn parse_or_default<R: DeserializeOwned + Default>(url: &str, value: &Value) -> R {
    serde_json::from_value::<R>(value.clone()).unwrap_or_else(|e| {
        log::debug!("Store answer from {} does not match the success shape: {}", url, e);
        R::default()
    })
}

fn is_answered(status: StatusCode) -> bool {
    status == StatusCode::CREATED || status == StatusCode::BAD_REQUEST
}

/// A positive identifier means success; anything else is a rejection, with
/// the body's messages when it carried any.
fn assigned_id(id: Option<i64>, body: &Value) -> Result<i64, StoreError> {
    match id {
        Some(id) if id > 0 => Ok(id),
        _ => {
            let messages = rejection_messages(body);
            if messages.is_empty() {
                Err(StoreError::MissingIdentifier)
            } else {
                Err(StoreError::Rejected(messages))
            }
        }
    }
}

fn rejection_messages(body: &Value) -> Vec<String> {
    match body {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::Object(map) => map
            .get("messages")
            .or_else(|| map.get("errors"))
            .map(rejection_messages)
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}
