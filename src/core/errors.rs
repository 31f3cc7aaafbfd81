// Domain error types

use thiserror::Error;

/// Main error type for permission evaluation plumbing
///
/// Policy failures never pass through this type: the evaluator hands a
/// policy's own error back to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PermissionError {
    /// The platform answered the member-info call with a failure status
    #[error("Remote call failed (retcode {retcode}): {message}")]
    RemoteCallFailed { retcode: i64, message: String },

    /// The member-info call never produced a platform answer
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl PermissionError {
    /// Whether this error came from the remote member-info lookup
    ///
    /// Remote failures are absorbed by the member cache and degrade to
    /// "member info absent".
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            PermissionError::RemoteCallFailed { .. } | PermissionError::Transport(_)
        )
    }
}
