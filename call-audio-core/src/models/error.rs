use thiserror::Error;

/// Errors surfaced by audio control operations.
///
/// Focus denial is deliberately absent: a refused focus grant is logged
/// degradation, not a failure, and the session proceeds without priority.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ControlError {
    #[error("session already running")]
    AlreadyRunning,

    #[error("session not running")]
    NotRunning,

    #[error("called outside the control thread")]
    OffControlThread,

    #[error("wired headset monitor already registered")]
    MonitorRegistered,

    #[error("invalid session config: {0}")]
    InvalidConfig(String),

    #[error("device not available")]
    DeviceNotAvailable,

    #[error("platform error: {0}")]
    Platform(String),
}

/// Record a broken caller contract.
///
/// Panics in debug builds; release builds only log, and the caller
/// returns the matching `ControlError`.
pub(crate) fn contract_violation(what: &str) {
    log::error!("contract violation: {}", what);
    debug_assert!(false, "contract violation: {}", what);
}
