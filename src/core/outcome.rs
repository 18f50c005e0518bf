use crate::error::SessionError;

/// How one registration attempt ended.
#[derive(Debug)]
pub enum SessionOutcome {
    /// The controller returned from `ProcessPod` without error.
    Completed,
    /// The attempt ended early; see the error for why.
    Aborted(SessionError),
}

impl SessionOutcome {
    /// True when the process is shutting down.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionOutcome::Aborted(err) if err.is_fatal())
    }
}
