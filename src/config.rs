use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_OPENAI_API_KEY: &str = "openai_api_key";

#[derive(Clone, Debug)]
pub struct Config {
    pub web_server_host: String,
    pub web_server_port: u16,
    pub store_base_url: String,
    pub store_timeout_secs: u64,
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub question_concurrency: usize,
    pub option_concurrency: usize,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            store_base_url: env::var("QUIZ_STORE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
            store_timeout_secs: env::var("QUIZ_STORE_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY")
                .unwrap_or_else(|_| DEFAULT_OPENAI_API_KEY.to_string())),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            question_concurrency: parse_concurrency(env::var("QUESTION_CONCURRENCY").ok()),
            option_concurrency: parse_concurrency(env::var("OPTION_CONCURRENCY").ok()),
        }
    }

    /// Rejects configuration that only makes sense on a developer machine.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let api_key = self.openai_api_key.expose_secret();
        if api_key == DEFAULT_OPENAI_API_KEY || api_key.trim().is_empty() {
            return Err(AppError::InternalError(
                "OPENAI_API_KEY is using default value! Set OPENAI_API_KEY environment variable."
                    .to_string(),
            ));
        }

        if !(self.store_base_url.starts_with("http://")
            || self.store_base_url.starts_with("https://"))
        {
            return Err(AppError::InternalError(format!(
                "QUIZ_STORE_BASE_URL must be an http(s) URL, got '{}'",
                self.store_base_url
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            store_base_url: "http://localhost:8081".to_string(),
            store_timeout_secs: 5,
            openai_api_key: SecretString::from("test_openai_key".to_string()),
            openai_api_base: "http://localhost:9999/v1".to_string(),
            openai_model: "gpt-4o-mini".to_string(),
            question_concurrency: 2,
            option_concurrency: 2,
        }
    }
}

fn parse_concurrency(value: Option<String>) -> usize {
    value
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(4)
        .max(1)
}
