use crate::models::device::AudioMode;
use crate::models::focus::{FocusGrant, FocusRequest, FocusToken};

/// Interface to the platform's shared audio subsystem.
///
/// Implemented by:
/// - `MmDeviceAudioPlatform` (Windows)
/// - `MockAudioPlatform` (tests)
///
/// All calls are fast, bounded system calls; none block on long-running
/// I/O. The core treats the mode, microphone state and focus claim as a
/// single process-wide exclusive asset owned by whoever acquired it last;
/// nested acquisition by concurrent sessions is undefined.
pub trait AudioPlatform: Send + Sync {
    /// Current global audio mode.
    fn mode(&self) -> AudioMode;

    /// Switch the global audio mode.
    fn set_mode(&self, mode: AudioMode);

    fn is_microphone_muted(&self) -> bool;

    fn set_microphone_muted(&self, muted: bool);

    /// Claim priority for this session's audio.
    ///
    /// The returned token is valid regardless of the grant decision and
    /// must be passed back to `abandon_focus` exactly once.
    fn request_focus(&self, request: &FocusRequest) -> FocusGrant;

    /// Surrender a focus claim.
    fn abandon_focus(&self, token: FocusToken);

    /// Route output through the loudspeaker instead of the earpiece.
    fn set_speakerphone_on(&self, on: bool);

    fn is_speakerphone_on(&self) -> bool;

    /// Bring up the Bluetooth voice (SCO) link.
    fn start_bluetooth_sco(&self);

    /// Tear down the Bluetooth voice link.
    fn stop_bluetooth_sco(&self);

    /// Whether the Bluetooth voice link is currently carrying audio.
    fn is_bluetooth_sco_on(&self) -> bool;
}
