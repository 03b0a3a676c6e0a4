use thiserror::Error;

/// Failure of a repository operation.
///
/// Storage faults, conflicts and invalid input all surface as `Technical`;
/// callers are not expected to branch on the cause.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("technical error: {0}")]
    Technical(String),
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl RepositoryError {
    pub fn technical(msg: impl Into<String>) -> Self { Self::Technical(msg.into()) }

    pub fn is_unsupported(&self) -> bool { matches!(self, Self::Unsupported(_)) }
}

impl From<models::errors::ModelError> for RepositoryError {
    fn from(e: models::errors::ModelError) -> Self { Self::Technical(e.to_string()) }
}

impl From<std::io::Error> for RepositoryError {
    fn from(e: std::io::Error) -> Self { Self::Technical(format!("io: {e}")) }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(e: serde_json::Error) -> Self { Self::Technical(format!("serialization: {e}")) }
}
