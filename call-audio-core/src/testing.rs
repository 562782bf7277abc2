//! Test doubles for exercising call audio flows without platform hardware.
//!
//! Shipped as a public module so host applications can drive full session
//! lifecycles in their own tests and CI.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::models::device::{AudioDevice, AudioMode, PlatformFeature};
use crate::models::focus::{FocusDecision, FocusGrant, FocusRequest, FocusToken};
use crate::traits::audio_platform::AudioPlatform;
use crate::traits::capability_probe::CapabilityProbe;
use crate::traits::plug_events::{PlugEventSource, RawPlugCallback};
use crate::traits::route_observer::RouteObserver;

/// A platform call recorded by [`MockAudioPlatform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformCall {
    SetMode(AudioMode),
    SetMicrophoneMuted(bool),
    RequestFocus,
    AbandonFocus(u64),
    SetSpeakerphoneOn(bool),
    StartBluetoothSco,
    StopBluetoothSco,
}

struct MockPlatformState {
    mode: AudioMode,
    microphone_muted: bool,
    speakerphone_on: bool,
    sco_on: bool,
    deny_focus: bool,
    sco_connects: bool,
    next_token: u64,
    calls: Vec<PlatformCall>,
}

/// In-memory audio platform with a recorded call log.
pub struct MockAudioPlatform {
    state: Mutex<MockPlatformState>,
}

impl MockAudioPlatform {
    pub fn new() -> Self {
        Self::with_state(AudioMode::Normal, false)
    }

    /// A platform whose pre-session mode and microphone state are fixed,
    /// for restoration round-trip tests.
    pub fn with_state(mode: AudioMode, microphone_muted: bool) -> Self {
        Self {
            state: Mutex::new(MockPlatformState {
                mode,
                microphone_muted,
                speakerphone_on: false,
                sco_on: false,
                deny_focus: false,
                sco_connects: false,
                next_token: 1,
                calls: Vec::new(),
            }),
        }
    }

    /// Refuse every focus request.
    pub fn deny_focus(self) -> Self {
        self.state.lock().deny_focus = true;
        self
    }

    /// Report the SCO link as up as soon as it is started.
    pub fn connect_sco_immediately(self) -> Self {
        self.state.lock().sco_connects = true;
        self
    }

    /// Every mutating call made so far, in order.
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }
}

impl Default for MockAudioPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlatform for MockAudioPlatform {
    fn mode(&self) -> AudioMode {
        self.state.lock().mode
    }

    fn set_mode(&self, mode: AudioMode) {
        let mut state = self.state.lock();
        state.mode = mode;
        state.calls.push(PlatformCall::SetMode(mode));
    }

    fn is_microphone_muted(&self) -> bool {
        self.state.lock().microphone_muted
    }

    fn set_microphone_muted(&self, muted: bool) {
        let mut state = self.state.lock();
        state.microphone_muted = muted;
        state.calls.push(PlatformCall::SetMicrophoneMuted(muted));
    }

    fn request_focus(&self, _request: &FocusRequest) -> FocusGrant {
        let mut state = self.state.lock();
        let token = FocusToken(state.next_token);
        state.next_token += 1;
        state.calls.push(PlatformCall::RequestFocus);
        FocusGrant {
            token,
            decision: if state.deny_focus {
                FocusDecision::Denied
            } else {
                FocusDecision::Granted
            },
        }
    }

    fn abandon_focus(&self, token: FocusToken) {
        self.state.lock().calls.push(PlatformCall::AbandonFocus(token.0));
    }

    fn set_speakerphone_on(&self, on: bool) {
        let mut state = self.state.lock();
        state.speakerphone_on = on;
        state.calls.push(PlatformCall::SetSpeakerphoneOn(on));
    }

    fn is_speakerphone_on(&self) -> bool {
        self.state.lock().speakerphone_on
    }

    fn start_bluetooth_sco(&self) {
        let mut state = self.state.lock();
        if state.sco_connects {
            state.sco_on = true;
        }
        state.calls.push(PlatformCall::StartBluetoothSco);
    }

    fn stop_bluetooth_sco(&self) {
        let mut state = self.state.lock();
        state.sco_on = false;
        state.calls.push(PlatformCall::StopBluetoothSco);
    }

    fn is_bluetooth_sco_on(&self) -> bool {
        self.state.lock().sco_on
    }
}

/// Plug event source driven by hand from tests.
///
/// Clone it before handing it to the session; the clone shares the
/// subscription and can emit raw plug states after the session has taken
/// ownership of the original.
#[derive(Clone, Default)]
pub struct MockPlugSource {
    callback: Arc<Mutex<Option<RawPlugCallback>>>,
}

impl MockPlugSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a raw plug state tag to the subscriber, if any.
    pub fn emit(&self, raw_state: i32) {
        let callback = self.callback.lock().clone();
        if let Some(callback) = callback {
            callback(raw_state);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.callback.lock().is_some()
    }
}

impl PlugEventSource for MockPlugSource {
    fn subscribe(&mut self, callback: RawPlugCallback) {
        *self.callback.lock() = Some(callback);
    }

    fn unsubscribe(&mut self) {
        *self.callback.lock() = None;
    }
}

/// Observer recording every route notification.
#[derive(Default)]
pub struct RecordingObserver {
    routes: Mutex<Vec<AudioDevice>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(&self) -> Vec<AudioDevice> {
        self.routes.lock().clone()
    }
}

impl RouteObserver for RecordingObserver {
    fn on_route_changed(&self, route: AudioDevice) {
        self.routes.lock().push(route);
    }
}

/// Fixed capability answers.
#[derive(Debug, Clone, Copy)]
pub struct StaticCapabilities {
    pub earpiece: bool,
    pub bluetooth: bool,
}

impl CapabilityProbe for StaticCapabilities {
    fn has_feature(&self, feature: PlatformFeature) -> bool {
        match feature {
            PlatformFeature::Earpiece => self.earpiece,
            PlatformFeature::Bluetooth => self.bluetooth,
        }
    }
}
