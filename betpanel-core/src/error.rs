use thiserror::Error;

/// Result type for betpanel operations
pub type PanelResult<T> = Result<T, PanelError>;

/// Failure taxonomy shared by every betpanel crate.
///
/// The split between `NotAuthenticated` and `Network` is load-bearing:
/// guards fail closed on both, but only the former means "the stored
/// credential is stale" and only the latter means "retry later is
/// sensible".
#[derive(Error, Debug, Clone)]
pub enum PanelError {
    /// Missing, invalid, or expired credential (includes 401 responses).
    #[error("not authenticated: {0}")]
    NotAuthenticated(String),

    /// Transport-level failure: no response arrived at all.
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status other than 401.
    /// The message is the backend's own, surfaced verbatim.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Persistent storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// A persisted tenant selector held something other than the two
    /// known values.
    #[error("invalid tenant selector: {0:?}")]
    InvalidTenant(String),
}

impl PanelError {
    pub fn not_authenticated(msg: impl Into<String>) -> Self {
        Self::NotAuthenticated(msg.into())
    }

    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn invalid_tenant(value: impl Into<String>) -> Self {
        Self::InvalidTenant(value.into())
    }

    /// True when the failure means the session is gone and the user
    /// must re-authenticate (as opposed to "retry later").
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated(_) | Self::Api { status: 401, .. }
        )
    }

    /// HTTP status carried by the error, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::NotAuthenticated(_) => Some(401),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PanelError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(err.to_string())
    }
}
