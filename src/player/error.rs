/// Opaque failure surfaced by a provider.
///
/// The core does not interpret the contents; it relays the value as a
/// public [`PlayerEvent::Error`](crate::events::PlayerEvent::Error) and
/// performs no state rollback. Hosts that want recovery listen for the
/// event and drive the backend themselves.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("provider failure: {message}")]
pub struct ProviderError {
    /// Provider-supplied failure description
    pub message: String,
}

impl ProviderError {
    /// Create a provider error from a failure description.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors that can occur during player operations
#[derive(thiserror::Error, Debug)]
pub enum PlayerError {
    /// A provider is already mounted on this player
    #[error("a provider is already mounted")]
    AlreadyMounted,

    /// No provider is currently mounted
    #[error("no provider is mounted")]
    NotMounted,

    /// The provider handle outlived its mount; the emission was dropped
    #[error("provider handle outlived its mount")]
    Unmounted,

    /// The requested command needs a backend and none is attached
    #[error("no backend attached for {operation}")]
    NoBackend {
        /// Name of the command that required a backend
        operation: &'static str,
    },

    /// A backend command failed
    #[error("backend command failed: {0}")]
    Backend(#[from] ProviderError),
}

/// Convenience alias for player operation results.
pub type Result<T> = std::result::Result<T, PlayerError>;
