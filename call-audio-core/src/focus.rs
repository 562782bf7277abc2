//! Acquisition and release of the exclusive shared audio resource.
//!
//! `FocusGuard::acquire` seizes focus, mode and microphone state in one
//! step and hands back an [`AudioClaim`] holding everything needed to put
//! the platform back exactly as it was. The claim is move-only: release
//! consumes it, so a claim cannot be released twice and a release without
//! a prior acquire cannot be expressed.

use crate::models::config::SessionConfig;
use crate::models::focus::{FocusDecision, FocusGrant};
use crate::models::state::AudioSnapshot;
use crate::traits::audio_platform::AudioPlatform;

/// Exclusive claim on the platform audio resource.
///
/// Owned by the session for exactly the `running` span. Dropping a claim
/// without releasing it leaks the platform state; use [`FocusGuard::release`]
/// or the RAII [`ScopedClaim`].
#[derive(Debug)]
pub struct AudioClaim {
    grant: FocusGrant,
    snapshot: AudioSnapshot,
}

impl AudioClaim {
    /// Whether the platform granted playback priority. A denied claim is
    /// still a live claim; the session runs without priority.
    pub fn is_granted(&self) -> bool {
        self.grant.is_granted()
    }

    /// The platform configuration this claim will restore.
    pub fn snapshot(&self) -> AudioSnapshot {
        self.snapshot
    }
}

/// Acquires and releases the shared audio resource against a platform
/// backend, snapshotting prior state for exact restoration.
#[derive(Clone, Copy)]
pub struct FocusGuard<'p> {
    platform: &'p dyn AudioPlatform,
}

impl<'p> FocusGuard<'p> {
    pub fn new(platform: &'p dyn AudioPlatform) -> Self {
        Self { platform }
    }

    /// Claim the audio resource for a session.
    ///
    /// Snapshots the pre-call mode and microphone state, requests focus,
    /// switches the platform into the configured call mode and unmutes the
    /// microphone if the config asks for it. Focus denial is logged and
    /// otherwise ignored; the session must work without priority.
    pub fn acquire(&self, config: &SessionConfig) -> AudioClaim {
        let snapshot = AudioSnapshot {
            mode: self.platform.mode(),
            microphone_muted: self.platform.is_microphone_muted(),
        };

        let grant = self.platform.request_focus(&config.focus);
        match grant.decision {
            FocusDecision::Granted => {
                log::debug!("audio focus granted for voice communication");
            }
            FocusDecision::Denied => {
                log::warn!("audio focus request denied, continuing without priority");
            }
        }

        self.platform.set_mode(config.mode);

        if config.unmute_microphone {
            self.set_microphone_muted(false);
        }

        AudioClaim { grant, snapshot }
    }

    /// Release a claim, restoring the exact pre-acquire state.
    ///
    /// Restores microphone mute, then mode, then surrenders the focus
    /// token. The token is abandoned even for a denied grant.
    pub fn release(&self, claim: AudioClaim) {
        let AudioClaim { grant, snapshot } = claim;

        self.set_microphone_muted(snapshot.microphone_muted);
        self.platform.set_mode(snapshot.mode);
        self.platform.abandon_focus(grant.token);
        log::debug!("audio resource released, prior state restored");
    }

    /// Acquire with guaranteed release on every exit path, including
    /// panics. The claim is released when the returned value drops.
    pub fn scoped(&self, config: &SessionConfig) -> ScopedClaim<'p> {
        ScopedClaim {
            guard: *self,
            claim: Some(self.acquire(config)),
        }
    }

    // A set matching the current value is a no-op.
    fn set_microphone_muted(&self, muted: bool) {
        if self.platform.is_microphone_muted() == muted {
            return;
        }
        self.platform.set_microphone_muted(muted);
    }
}

/// RAII wrapper around an [`AudioClaim`]; releases on drop.
pub struct ScopedClaim<'p> {
    guard: FocusGuard<'p>,
    claim: Option<AudioClaim>,
}

impl ScopedClaim<'_> {
    pub fn is_granted(&self) -> bool {
        self.claim.as_ref().is_some_and(AudioClaim::is_granted)
    }
}

impl Drop for ScopedClaim<'_> {
    fn drop(&mut self) {
        if let Some(claim) = self.claim.take() {
            self.guard.release(claim);
        }
    }
}
