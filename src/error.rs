use thiserror::Error;

/// Reasons a window-manager operation did not change any state.
///
/// The façade never surfaces these to its callers: the plain operations log
/// them and degrade to a no-op. The `try_*` variants hand them back for
/// callers that want to know why nothing happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WmError {
    #[error("unknown window: {id}")]
    UnknownWindow { id: String },

    #[error("invalid transition '{op}' for window {id}: {reason}")]
    InvalidStateTransition {
        id: String,
        op: &'static str,
        reason: &'static str,
    },
}

impl WmError {
    pub(crate) fn unknown(id: &str) -> Self {
        Self::UnknownWindow { id: id.to_string() }
    }

    pub(crate) fn invalid(id: &str, op: &'static str, reason: &'static str) -> Self {
        Self::InvalidStateTransition {
            id: id.to_string(),
            op,
            reason,
        }
    }
}

pub type WmResult<T> = Result<T, WmError>;
