use std::fmt;

/// Configuration could not be loaded or failed validation.
///
/// Raised at startup only; nothing in the request path produces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// A request against one of the dashboard endpoints failed.
///
/// Covers connection errors, non-success HTTP statuses and bodies that do not
/// decode. Never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub endpoint: String,
    pub message: String,
}

impl FetchError {
    pub fn new(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fetch failed for {}: {}", self.endpoint, self.message)
    }
}

impl std::error::Error for FetchError {}

/// Walks an error chain looking for a [`FetchError`].
pub fn as_fetch_error(err: &anyhow::Error) -> Option<&FetchError> {
    err.chain().find_map(|e| e.downcast_ref::<FetchError>())
}

/// Walks an error chain looking for a [`ConfigError`].
pub fn as_config_error(err: &anyhow::Error) -> Option<&ConfigError> {
    err.chain().find_map(|e| e.downcast_ref::<ConfigError>())
}
