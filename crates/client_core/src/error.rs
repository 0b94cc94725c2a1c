use thiserror::Error;

/// Failure taxonomy for backend round trips. The backend signals outcome
/// only through a `{"bool": "true"|"false"}` body, never through HTTP status
/// codes, so every variant here funnels into the same user-facing failure
/// branch; the variants exist so logs and tests can tell the cases apart.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered, and the answer was `bool == "false"`.
    #[error("{operation} refused by backend")]
    Rejected { operation: &'static str },

    /// The request never produced a usable response.
    #[error("{operation} transport failure: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a body the envelope decoder cannot read.
    #[error("{operation} returned an invalid response: {detail}")]
    InvalidResponse {
        operation: &'static str,
        detail: String,
    },

    /// Declared extension point with no implementation behind it yet.
    #[error("{operation} is not supported by this client")]
    Unsupported { operation: &'static str },
}

impl ClientError {
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Rejected { operation }
            | Self::Transport { operation, .. }
            | Self::InvalidResponse { operation, .. }
            | Self::Unsupported { operation } => operation,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
