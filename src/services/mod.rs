pub mod error_aggregator;
pub mod fallback;
pub mod ingestion;
pub mod normalizer;
pub mod quiz_pipeline;
pub mod remote_store;
pub mod session;
pub mod text_generator;

pub use ingestion::{IngestionLimits, IngestionReport};
pub use quiz_pipeline::QuizPipeline;
pub use remote_store::{HttpRemoteStore, RemoteStore};
pub use session::SessionContext;
pub use text_generator::{OpenAiTextGenerator, TextGenerator};
