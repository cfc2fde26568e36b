use crate::errors::PipelineError;

/// Ordered collection of everything that went wrong during one run.
#[derive(Debug, Default, Clone)]
pub struct ErrorAggregator {
    errors: Vec<PipelineError>,
}

impl ErrorAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, error: PipelineError) {
        if error.is_fatal() {
            log::error!("{}", error);
        } else {
            log::warn!("{}", error);
        }
        self.errors.push(error);
    }

    pub fn extend(&mut self, errors: impl IntoIterator<Item = PipelineError>) {
        for error in errors {
            self.record(error);
        }
    }

    pub fn into_errors(self) -> Vec<PipelineError> {
        self.errors
    }
}

/// One human-readable line per error, in the order they were recorded.
pub fn render(errors: &[PipelineError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}
