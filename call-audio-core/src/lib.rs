//! # call-audio-core
//!
//! Platform-agnostic call audio routing core.
//!
//! Decides which physical device (earpiece, loudspeaker, wired headset,
//! Bluetooth) carries a voice session's audio, and manages the session's
//! exclusive claim on the shared platform audio resource — focus, global
//! mode, microphone state — restoring everything exactly on stop.
//! Platform-specific backends (Windows MMDevice, test doubles) implement
//! the `AudioPlatform` trait and plug into the generic `CallAudioSession`.
//!
//! ## Architecture
//!
//! ```text
//! call-audio-core (this crate)
//! ├── traits/       ← AudioPlatform, CapabilityProbe, PlugEventSource, RouteObserver
//! ├── models/       ← AudioDevice, AudioMode, RouteSignals, SessionConfig, ControlError
//! ├── focus         ← FocusGuard / AudioClaim (acquire, snapshot, restore)
//! ├── monitor       ← WiredHeadsetMonitor (plug-event normalization)
//! ├── routing/      ← priority table + RoutePolicy strategies
//! ├── session/      ← CallAudioSession (lifecycle orchestrator)
//! └── testing       ← MockAudioPlatform, MockPlugSource, RecordingObserver
//! ```
//!
//! The whole crate is single-threaded by contract: every mutating call
//! runs on the control thread that constructed the session.

pub mod focus;
pub mod models;
pub mod monitor;
pub mod routing;
pub mod session;
pub mod testing;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use focus::{AudioClaim, FocusGuard, ScopedClaim};
pub use models::config::SessionConfig;
pub use models::device::{AudioDevice, AudioMode, PlatformFeature};
pub use models::error::ControlError;
pub use models::focus::{
    ContentHint, FocusDecision, FocusGain, FocusGrant, FocusRequest, FocusToken, StreamUsage,
};
pub use models::signals::RouteSignals;
pub use models::state::{AudioSnapshot, SessionPhase};
pub use monitor::{WiredHeadsetMonitor, WiredPlugCallback};
pub use routing::policy::{BluetoothRoutePolicy, PassiveRoutePolicy, RoutePolicy, ScoState};
pub use routing::selector::{default_route, select_route};
pub use session::controller::CallAudioSession;
pub use traits::audio_platform::AudioPlatform;
pub use traits::capability_probe::CapabilityProbe;
pub use traits::plug_events::{PlugEventSource, RawPlugCallback};
pub use traits::route_observer::RouteObserver;
