use secrecy::{ExposeSecret, SecretString};

use crate::errors::PipelineError;

/// Credential and store endpoint for one pipeline run. Built once at the
/// edge and passed explicitly to everything that talks to the store.
#[derive(Clone, Debug)]
pub struct SessionContext {
    credential: SecretString,
    store_base_url: String,
}

impl SessionContext {
    /// Fails with [`PipelineError::MissingCredential`] when the credential is
    /// absent or blank, before anything touches the network.
    pub fn new(credential: Option<&str>, store_base_url: &str) -> Result<Self, PipelineError> {
        let credential = credential
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(PipelineError::MissingCredential)?;

        Ok(Self {
            credential: SecretString::from(credential.to_string()),
            store_base_url: store_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn credential(&self) -> &str {
        self.credential.expose_secret()
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.store_base_url, path.trim_start_matches('/'))
    }
}
