use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Authentication error: No token found.")]
    NotAuthenticated,

    #[error("Invalid sign-up form: {0}")]
    InvalidSignup(#[from] validator::ValidationErrors),

    #[error("Please accept the terms and conditions to continue.")]
    TermsNotAccepted,

    /// Non-2xx response; `message` is the body's `msg` or a per-call fallback
    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
