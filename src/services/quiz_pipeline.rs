use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::quiz_prompt::build_quiz_prompt,
    errors::PipelineError,
    models::domain::{QuizMeta, QuizSpec},
    services::{
        fallback,
        ingestion::{IngestionLimits, IngestionReport, QuizIngestor},
        normalizer::{self, ParseOutcome},
        remote_store::RemoteStore,
        session::SessionContext,
        text_generator::TextGenerator,
    },
};

/// Generate, normalize and ingest one quiz.
pub struct QuizPipeline {
    generator: Arc<dyn TextGenerator>,
    store: Arc<dyn RemoteStore>,
    limits: IngestionLimits,
}

impl QuizPipeline {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn RemoteStore>,
        limits: IngestionLimits,
    ) -> Self {
        Self {
            generator,
            store,
            limits,
        }
    }

    /// Returns `Err` only for failures that stop the run before the quiz is
    /// created. A quiz the store refuses comes back as a report carrying the
    /// fatal error, so callers always see what was attempted.
    pub async fn run(
        &self,
        spec: &QuizSpec,
        session: &SessionContext,
    ) -> Result<IngestionReport, PipelineError> {
        spec.validate()
            .map_err(|e| PipelineError::InvalidSpec(e.to_string()))?;

        let prompt = build_quiz_prompt(&spec.topic, spec.question_count(), spec.option_count());
        let raw = self.generator.generate(&prompt).await?;

        let (document, recovered) = match normalizer::parse(&raw, spec.option_count()) {
            ParseOutcome::Valid(document) => (document, None),
            ParseOutcome::Malformed(reason) => {
                log::warn!(
                    "Generated quiz for '{}' could not be read ({}), using placeholders",
                    spec.topic,
                    reason
                );
                let document =
                    fallback::synthesize(&spec.topic, spec.question_count(), spec.option_count());
                (document, Some(PipelineError::MalformedDocument(reason)))
            }
        };

        let meta = QuizMeta::from(spec);
        let ingestor = QuizIngestor::new(self.store.as_ref(), session, self.limits);
        let report = ingestor.ingest(&document, &meta).await;

        Ok(match recovered {
            Some(error) => report.with_recovered(error),
            None => report,
        })
    }
}
