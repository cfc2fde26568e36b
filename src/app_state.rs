use std::sync::Arc;

use crate::{
    config::Config,
    errors::AppResult,
    services::{
        HttpRemoteStore, IngestionLimits, OpenAiTextGenerator, QuizPipeline, RemoteStore,
        TextGenerator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<QuizPipeline>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        let generator = Arc::new(OpenAiTextGenerator::new(&config));
        let store = Arc::new(HttpRemoteStore::new(&config)?);

        Ok(Self::with_collaborators(config, generator, store))
    }

    pub fn with_collaborators(
        config: Config,
        generator: Arc<dyn TextGenerator>,
        store: Arc<dyn RemoteStore>,
    ) -> Self {
        let pipeline = QuizPipeline::new(generator, store, IngestionLimits::from(&config));

        Self {
            pipeline: Arc::new(pipeline),
            config: Arc::new(config),
        }
    }
}
