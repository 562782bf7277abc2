/// How long the session intends to hold the shared audio resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusGain {
    /// Short-lived claim; prior holders are expected to pause and resume.
    Transient,
    /// Open-ended claim.
    Persistent,
}

/// What the claimed audio stream is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamUsage {
    VoiceCommunication,
    Media,
}

/// Content hint attached to the claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentHint {
    Speech,
    Music,
}

/// Parameters of an exclusive audio-resource request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub gain: FocusGain,
    pub usage: StreamUsage,
    pub content: ContentHint,
}

impl Default for FocusRequest {
    /// Transient voice-communication claim with a speech hint, the request
    /// a call session makes.
    fn default() -> Self {
        Self {
            gain: FocusGain::Transient,
            usage: StreamUsage::VoiceCommunication,
            content: ContentHint::Speech,
        }
    }
}

/// Opaque handle to a focus claim held at the platform.
///
/// Move-only: the token is surrendered back to the platform exactly once
/// via `abandon_focus`.
#[derive(Debug, PartialEq, Eq)]
pub struct FocusToken(pub u64);

/// The platform's answer to a focus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusDecision {
    Granted,
    Denied,
}

/// Outcome of `request_focus`.
///
/// The token is valid and must be abandoned at release even when the
/// decision was `Denied`; denial only means no playback priority.
#[derive(Debug, PartialEq, Eq)]
pub struct FocusGrant {
    pub token: FocusToken,
    pub decision: FocusDecision,
}

impl FocusGrant {
    pub fn is_granted(&self) -> bool {
        self.decision == FocusDecision::Granted
    }
}
