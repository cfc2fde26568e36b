#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicI64, AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use quickquiz_server::{
    config::Config,
    errors::{PipelineError, StoreError},
    models::dto::request::{CreateOptionRequest, CreateQuestionRequest, CreateQuizRequest},
    services::{remote_store::CreatedQuiz, RemoteStore, SessionContext, TextGenerator},
};

#[derive(Debug, Clone)]
pub struct StoredQuestion {
    pub quiz_id: i64,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct StoredOption {
    pub question_id: i64,
    pub text: String,
    pub is_correct: bool,
}

/// Store double that assigns sequential ids and fails on request.
pub struct InMemoryStore {
    next_id: AtomicI64,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: Duration,
    pub quizzes: Arc<RwLock<HashMap<i64, CreateQuizRequest>>>,
    pub questions: Arc<RwLock<HashMap<i64, StoredQuestion>>>,
    pub options: Arc<RwLock<HashMap<i64, StoredOption>>>,
    pub credentials_seen: Arc<RwLock<Vec<String>>>,
    quiz_failure: Option<StoreError>,
    failing_questions: HashSet<String>,
    failing_options: HashSet<String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            latency: Duration::from_millis(0),
            quizzes: Arc::new(RwLock::new(HashMap::new())),
            questions: Arc::new(RwLock::new(HashMap::new())),
            options: Arc::new(RwLock::new(HashMap::new())),
            credentials_seen: Arc::new(RwLock::new(Vec::new())),
            quiz_failure: None,
            failing_questions: HashSet::new(),
            failing_options: HashSet::new(),
        }
    }

    pub fn failing_quiz(mut self, error: StoreError) -> Self {
        self.quiz_failure = Some(error);
        self
    }

    pub fn failing_question(mut self, text: &str) -> Self {
        self.failing_questions.insert(text.to_string());
        self
    }

    pub fn failing_option(mut self, text: &str) -> Self {
        self.failing_options.insert(text.to_string());
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    fn assign_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst)
    }

    async fn enter(&self, session: &SessionContext) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        self.credentials_seen
            .write()
            .await
            .push(session.credential().to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    fn leave(&self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl RemoteStore for InMemoryStore {
    async fn create_quiz(
        &self,
        session: &SessionContext,
        request: &CreateQuizRequest,
    ) -> Result<CreatedQuiz, StoreError> {
        self.enter(session).await;
        let result = match &self.quiz_failure {
            Some(error) => Err(error.clone()),
            None => {
                let id = self.assign_id();
                self.quizzes.write().await.insert(id, request.clone());
                Ok(CreatedQuiz {
                    quiz_id: id,
                    echoed_document: Some(request.quiz_json.clone()),
                })
            }
        };
        self.leave();
        result
    }

    async fn create_question(
        &self,
        session: &SessionContext,
        request: &CreateQuestionRequest,
    ) -> Result<i64, StoreError> {
        self.enter(session).await;
        let result = if self.failing_questions.contains(&request.question_text) {
            Err(StoreError::Rejected(vec!["Question text rejected.".to_string()]))
        } else if !self.quizzes.read().await.contains_key(&request.quiz_id) {
            Err(StoreError::Rejected(vec!["Quiz does not exist.".to_string()]))
        } else {
            let id = self.assign_id();
            self.questions.write().await.insert(
                id,
                StoredQuestion {
                    quiz_id: request.quiz_id,
                    text: request.question_text.clone(),
                },
            );
            Ok(id)
        };
        self.leave();
        result
    }

    async fn create_option(
        &self,
        session: &SessionContext,
        request: &CreateOptionRequest,
    ) -> Result<i64, StoreError> {
        self.enter(session).await;
        let result = if self.failing_options.contains(&request.option_text) {
            Err(StoreError::UnexpectedRemoteStatus(500))
        } else if !self.questions.read().await.contains_key(&request.question_id) {
            Err(StoreError::Rejected(vec!["Question does not exist.".to_string()]))
        } else {
            let id = self.assign_id();
            self.options.write().await.insert(
                id,
                StoredOption {
                    question_id: request.question_id,
                    text: request.option_text.clone(),
                    is_correct: request.is_correct,
                },
            );
            Ok(id)
        };
        self.leave();
        result
    }
}

/// Generator double that always answers with the same text.
pub struct ScriptedGenerator {
    reply: Result<String, PipelineError>,
    pub prompts: Arc<RwLock<Vec<String>>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn failing(error: PipelineError) -> Self {
        Self {
            reply: Err(error),
            prompts: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        self.prompts.write().await.push(prompt.to_string());
        self.reply.clone()
    }
}

pub fn session() -> SessionContext {
    SessionContext::new(Some("instructor-token"), "http://store.test").expect("valid session")
}

pub fn config() -> Config {
    Config {
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        store_base_url: "http://store.test".to_string(),
        store_timeout_secs: 5,
        openai_api_key: SecretString::from("test_openai_key".to_string()),
        openai_api_base: "http://localhost:9999/v1".to_string(),
        openai_model: "gpt-4o-mini".to_string(),
        question_concurrency: 2,
        option_concurrency: 2,
    }
}

pub const GENERATED_QUIZ: &str = r#"Sure! Here is the quiz.
```json
{"questions":[
  {"question":"Largest planet?","options":["Jupiter","Saturn","Mars"],"correct_answer":"Jupiter"},
  {"question":"Red planet?","options":["Venus","Mars","Mars"],"correct_answer":"Mars"},
  {"question":"Closest to the sun?","options":[],"correct_answer":"Mercury"}
]}
```"#;
