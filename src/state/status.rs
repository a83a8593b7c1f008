use solana_sdk::signature::Signature;

/// The status projection shown to the user. Written by the submission
/// pipeline and by action error paths, read by the presentation layer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum PendingStatus {
    #[default]
    Idle,
    InProgress(String),
    /// `signature` is `None` for informational outcomes that did not
    /// submit anything, e.g. a ticket that was already checked in.
    Success {
        message: String,
        signature: Option<Signature>,
    },
    Failure {
        message: String,
        logs: Vec<String>,
    },
}

impl PendingStatus {
    pub fn is_idle(&self) -> bool {
        matches!(self, PendingStatus::Idle)
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PendingStatus::Failure { .. })
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            PendingStatus::Idle => None,
            PendingStatus::InProgress(message) => Some(message),
            PendingStatus::Success { message, .. } => Some(message),
            PendingStatus::Failure { message, .. } => Some(message),
        }
    }
}
