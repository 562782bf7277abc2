//! # call-audio-windows
//!
//! Windows MMDevice backend for call-audio-kit.
//!
//! Provides:
//! - `MmDeviceAudioPlatform` — `AudioPlatform` over the default communications endpoints
//! - `MmDeviceCapabilities` — `CapabilityProbe` derived from endpoint form factors
//! - `PollingHeadsetWatcher` — `PlugEventSource` polling the render endpoint list
//! - `EndpointClassifier` — render endpoint → route class mapping
//!
//! ## Platform Requirements
//! - Windows 10+ with the MMDevice API
//! - Visual Studio Build Tools + Windows SDK for linking
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use call_audio_core::CallAudioSession;
//! use call_audio_windows::{MmDeviceAudioPlatform, MmDeviceCapabilities, PollingHeadsetWatcher};
//!
//! let platform = Arc::new(MmDeviceAudioPlatform::new());
//! let mut session = CallAudioSession::new(
//!     platform,
//!     &MmDeviceCapabilities,
//!     Box::new(PollingHeadsetWatcher::new()),
//! );
//! ```
//!
//! The watcher delivers plug events on its own thread; marshal them onto
//! the session's control thread before calling into the session.

#[cfg(target_os = "windows")]
pub mod capabilities;
#[cfg(target_os = "windows")]
pub mod endpoints;
#[cfg(target_os = "windows")]
pub mod headset_watcher;
#[cfg(target_os = "windows")]
pub mod platform;

#[cfg(target_os = "windows")]
pub use capabilities::MmDeviceCapabilities;
#[cfg(target_os = "windows")]
pub use endpoints::EndpointClassifier;
#[cfg(target_os = "windows")]
pub use headset_watcher::PollingHeadsetWatcher;
#[cfg(target_os = "windows")]
pub use platform::MmDeviceAudioPlatform;
