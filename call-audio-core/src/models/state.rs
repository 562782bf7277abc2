use super::device::AudioMode;

/// Session lifecycle phase.
///
/// `start` is synchronous, so callers only ever observe these two phases:
/// ```text
/// stopped → running → stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Stopped,
    Running,
}

impl SessionPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }
}

/// Platform audio configuration captured before a session mutates it.
///
/// Captured exactly once at acquire and consumed exactly once at release;
/// the session restores these values no matter what happened in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioSnapshot {
    pub mode: AudioMode,
    pub microphone_muted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_helpers() {
        assert!(SessionPhase::Running.is_running());
        assert!(!SessionPhase::Stopped.is_running());
    }
}
