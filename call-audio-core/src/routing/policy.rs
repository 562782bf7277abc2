//! Route activation strategies.
//!
//! The policy trait is the specialization seam: the default methods give
//! the passive base behavior (priority-table selection, no activation,
//! hands-free reported false), and concrete deployments swap in a policy
//! that performs the platform calls actually switching the output route.

use crate::models::device::AudioDevice;
use crate::models::signals::RouteSignals;
use crate::routing::selector::select_route;
use crate::traits::audio_platform::AudioPlatform;

/// Strategy deciding and applying the active route.
pub trait RoutePolicy: Send {
    /// Route choice for the current signal set. The default is the
    /// standard priority table.
    fn select(&self, signals: &RouteSignals, default_device: AudioDevice) -> AudioDevice {
        select_route(signals, default_device)
    }

    /// Reported hands-free state. The passive base always answers `false`;
    /// activating policies answer from the route they actually applied.
    fn is_handsfree(&self) -> bool {
        false
    }

    /// Apply the chosen route to the platform. The default performs no
    /// device activation.
    fn activate(&mut self, platform: &dyn AudioPlatform, route: AudioDevice) {
        let _ = (platform, route);
    }
}

/// Base policy: tracks route state without touching the platform.
#[derive(Debug, Default)]
pub struct PassiveRoutePolicy;

impl RoutePolicy for PassiveRoutePolicy {}

/// State of the Bluetooth voice (SCO) link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoState {
    Disconnected,
    Connecting,
    Connected,
}

/// Activating policy for deployments with a Bluetooth link stack.
///
/// Switches the loudspeaker on the platform and drives the SCO link up
/// and down as the Bluetooth route comes and goes.
#[derive(Debug)]
pub struct BluetoothRoutePolicy {
    sco: ScoState,
    active: AudioDevice,
}

impl BluetoothRoutePolicy {
    pub fn new() -> Self {
        Self {
            sco: ScoState::Disconnected,
            active: AudioDevice::None,
        }
    }

    pub fn sco_state(&self) -> ScoState {
        self.sco
    }
}

impl Default for BluetoothRoutePolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RoutePolicy for BluetoothRoutePolicy {
    fn is_handsfree(&self) -> bool {
        self.active.is_handsfree()
    }

    fn activate(&mut self, platform: &dyn AudioPlatform, route: AudioDevice) {
        match route {
            AudioDevice::Bluetooth => {
                if self.sco == ScoState::Disconnected {
                    log::debug!("bringing up bluetooth voice link");
                    platform.start_bluetooth_sco();
                    self.sco = ScoState::Connecting;
                }
                if platform.is_bluetooth_sco_on() {
                    self.sco = ScoState::Connected;
                }
            }
            other => {
                if self.sco != ScoState::Disconnected {
                    log::debug!("tearing down bluetooth voice link");
                    platform.stop_bluetooth_sco();
                    self.sco = ScoState::Disconnected;
                }
                platform.set_speakerphone_on(other == AudioDevice::SpeakerPhone);
            }
        }
        self.active = route;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::AudioMode;
    use crate::testing::{MockAudioPlatform, PlatformCall};

    #[test]
    fn passive_policy_never_touches_the_platform() {
        let platform = MockAudioPlatform::with_state(AudioMode::Normal, false);
        let mut policy = PassiveRoutePolicy;

        policy.activate(&platform, AudioDevice::SpeakerPhone);
        policy.activate(&platform, AudioDevice::Bluetooth);

        assert!(platform.calls().is_empty());
        assert!(!policy.is_handsfree());
    }

    #[test]
    fn bluetooth_policy_drives_sco_link() {
        let platform = MockAudioPlatform::with_state(AudioMode::Normal, false);
        let mut policy = BluetoothRoutePolicy::new();
        assert_eq!(policy.sco_state(), ScoState::Disconnected);

        policy.activate(&platform, AudioDevice::Bluetooth);
        assert_eq!(policy.sco_state(), ScoState::Connecting);
        assert!(platform
            .calls()
            .contains(&PlatformCall::StartBluetoothSco));

        policy.activate(&platform, AudioDevice::Earpiece);
        assert_eq!(policy.sco_state(), ScoState::Disconnected);
        assert!(platform.calls().contains(&PlatformCall::StopBluetoothSco));
    }

    #[test]
    fn sco_marked_connected_once_link_reports_up() {
        let platform =
            MockAudioPlatform::with_state(AudioMode::Normal, false).connect_sco_immediately();
        let mut policy = BluetoothRoutePolicy::new();

        policy.activate(&platform, AudioDevice::Bluetooth);
        assert_eq!(policy.sco_state(), ScoState::Connected);
    }

    #[test]
    fn repeated_bluetooth_activation_starts_sco_once() {
        let platform = MockAudioPlatform::with_state(AudioMode::Normal, false);
        let mut policy = BluetoothRoutePolicy::new();

        policy.activate(&platform, AudioDevice::Bluetooth);
        policy.activate(&platform, AudioDevice::Bluetooth);

        let starts = platform
            .calls()
            .iter()
            .filter(|call| **call == PlatformCall::StartBluetoothSco)
            .count();
        assert_eq!(starts, 1);
    }

    #[test]
    fn handsfree_reported_from_applied_route() {
        let platform = MockAudioPlatform::with_state(AudioMode::Normal, false);
        let mut policy = BluetoothRoutePolicy::new();
        assert!(!policy.is_handsfree());

        policy.activate(&platform, AudioDevice::SpeakerPhone);
        assert!(policy.is_handsfree());
        assert!(platform
            .calls()
            .contains(&PlatformCall::SetSpeakerphoneOn(true)));

        policy.activate(&platform, AudioDevice::Earpiece);
        assert!(!policy.is_handsfree());
    }
}
