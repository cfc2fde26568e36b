//! Persists a normalized quiz as quiz, question and option records.
//!
//! The quiz must exist before any question is sent, and a question before
//! any of its options, because the store assigns the identifiers the
//! children refer to. Siblings run concurrently up to [`IngestionLimits`];
//! results are collected in document order. Nothing is retried.

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use uuid::Uuid;

use crate::{
    config::Config,
    errors::PipelineError,
    models::{
        domain::{
            PersistedOption, PersistedQuestion, PersistedQuiz, QuestionRecord, QuizDocument,
            QuizMeta,
        },
        dto::request::{CreateOptionRequest, CreateQuestionRequest, CreateQuizRequest},
    },
    services::{
        error_aggregator::{self, ErrorAggregator},
        remote_store::RemoteStore,
        session::SessionContext,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestionLimits {
    pub question_concurrency: usize,
    pub option_concurrency: usize,
}

impl Default for IngestionLimits {
    fn default() -> Self {
        Self {
            question_concurrency: 4,
            option_concurrency: 4,
        }
    }
}

impl From<&Config> for IngestionLimits {
    fn from(config: &Config) -> Self {
        Self {
            question_concurrency: config.question_concurrency.max(1),
            option_concurrency: config.option_concurrency.max(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IngestionReport {
    pub run_id: Uuid,
    pub quiz: Option<PersistedQuiz>,
    pub questions: Vec<PersistedQuestion>,
    pub options: Vec<PersistedOption>,
    /// Indices of questions that had no options and were never sent.
    pub skipped_questions: Vec<usize>,
    pub errors: Vec<PipelineError>,
    pub used_fallback: bool,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl IngestionReport {
    pub fn quiz_id(&self) -> Option<i64> {
        self.quiz.as_ref().map(|quiz| quiz.id)
    }

    /// A run succeeds once the quiz exists, whatever happened to its children.
    pub fn is_success(&self) -> bool {
        self.quiz.is_some()
    }

    pub fn fatal_error(&self) -> Option<&PipelineError> {
        self.errors.iter().find(|e| e.is_fatal())
    }

    pub fn render_errors(&self) -> Vec<String> {
        error_aggregator::render(&self.errors)
    }

    /// Marks the run as built from a placeholder quiz because the generated
    /// text could not be read.
    pub fn with_recovered(mut self, error: PipelineError) -> Self {
        self.used_fallback = true;
        self.errors.insert(0, error);
        self
    }
}

#[derive(Debug, Default)]
struct QuestionOutcome {
    question: Option<PersistedQuestion>,
    options: Vec<PersistedOption>,
    errors: Vec<PipelineError>,
    skipped: bool,
}

pub struct QuizIngestor<'a> {
    store: &'a dyn RemoteStore,
    session: &'a SessionContext,
    limits: IngestionLimits,
    run_id: Uuid,
}

impl<'a> QuizIngestor<'a> {
    pub fn new(
        store: &'a dyn RemoteStore,
        session: &'a SessionContext,
        limits: IngestionLimits,
    ) -> Self {
        Self {
            store,
            session,
            limits,
            run_id: Uuid::new_v4(),
        }
    }

    pub async fn ingest(&self, document: &QuizDocument, meta: &QuizMeta) -> IngestionReport {
        let started_at = Utc::now();
        let mut errors = ErrorAggregator::new();

        log::info!(
            "Creating quiz '{}' with {} questions for run {}",
            meta.title,
            document.len(),
            self.run_id
        );

        let request = CreateQuizRequest::new(meta, document);
        let quiz = match self.store.create_quiz(self.session, &request).await {
            Ok(created) => PersistedQuiz {
                id: created.quiz_id,
                echoed_document: created.echoed_document,
            },
            Err(reason) => {
                errors.record(PipelineError::QuizCreationFailed(reason));
                return self.report(started_at, None, Vec::new(), errors);
            }
        };

        let quiz_id = quiz.id;
        let outcomes: Vec<QuestionOutcome> = stream::iter(document.questions.iter().enumerate())
            .map(|(index, record)| self.ingest_question(quiz_id, index, record))
            .buffered(self.limits.question_concurrency.max(1))
            .collect()
            .await;

        let report = self.report(started_at, Some(quiz), outcomes, errors);

        log::info!(
            "Run {} finished: quiz {:?}, {} questions, {} options, {} errors",
            self.run_id,
            report.quiz_id(),
            report.questions.len(),
            report.options.len(),
            report.errors.len()
        );

        report
    }

    async fn ingest_question(
        &self,
        quiz_id: i64,
        index: usize,
        record: &QuestionRecord,
    ) -> QuestionOutcome {
        if record.options.is_empty() {
            log::warn!(
                "Question {} has no options after normalization, skipping (run {})",
                index + 1,
                self.run_id
            );
            return QuestionOutcome {
                skipped: true,
                ..QuestionOutcome::default()
            };
        }

        let request = CreateQuestionRequest::new(quiz_id, record);
        let question_id = match self.store.create_question(self.session, &request).await {
            Ok(id) => id,
            Err(reason) => {
                return QuestionOutcome {
                    errors: vec![PipelineError::QuestionCreationFailed { index, reason }],
                    ..QuestionOutcome::default()
                };
            }
        };

        log::debug!(
            "Created question {} as {} for quiz {} (run {})",
            index + 1,
            question_id,
            quiz_id,
            self.run_id
        );

        let results: Vec<(usize, &String, bool, Result<i64, _>)> =
            stream::iter(record.options.iter().enumerate())
                .map(move |(option_index, text)| async move {
                    let request = CreateOptionRequest::new(question_id, record, text);
                    let result = self.store.create_option(self.session, &request).await;
                    (option_index, text, request.is_correct, result)
                })
                .buffered(self.limits.option_concurrency.max(1))
                .collect()
                .await;

        let mut outcome = QuestionOutcome {
            question: Some(PersistedQuestion {
                id: question_id,
                quiz_id,
                index,
                text: record.text.clone(),
            }),
            ..QuestionOutcome::default()
        };

        for (option_index, text, is_correct, result) in results {
            match result {
                Ok(option_id) => outcome.options.push(PersistedOption {
                    id: option_id,
                    question_id,
                    question_index: index,
                    text: text.clone(),
                    is_correct,
                }),
                Err(reason) => outcome.errors.push(PipelineError::OptionCreationFailed {
                    question_index: index,
                    option_index,
                    reason,
                }),
            }
        }

        outcome
    }

    fn report(
        &self,
        started_at: DateTime<Utc>,
        quiz: Option<PersistedQuiz>,
        outcomes: Vec<QuestionOutcome>,
        mut errors: ErrorAggregator,
    ) -> IngestionReport {
        let mut questions = Vec::new();
        let mut options = Vec::new();
        let mut skipped_questions = Vec::new();

        for (index, outcome) in outcomes.into_iter().enumerate() {
            if outcome.skipped {
                skipped_questions.push(index);
            }
            questions.extend(outcome.question);
            options.extend(outcome.options);
            errors.extend(outcome.errors);
        }

        IngestionReport {
            run_id: self.run_id,
            quiz,
            questions,
            options,
            skipped_questions,
            errors: errors.into_errors(),
            used_fallback: false,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

/// Convenience wrapper for a single ingestion run.
pub async fn ingest(
    document: &QuizDocument,
    meta: &QuizMeta,
    store: &dyn RemoteStore,
    session: &SessionContext,
    limits: IngestionLimits,
) -> IngestionReport {
    QuizIngestor::new(store, session, limits)
        .ingest(document, meta)
        .await
}
