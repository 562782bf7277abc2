use serde::{Deserialize, Serialize};

/// The physical route carrying a session's audio.
///
/// Exactly one route is active at any time. `None` means no route has been
/// selected yet (before `start`) or the session has been torn down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioDevice {
    SpeakerPhone,
    WiredHeadset,
    Earpiece,
    Bluetooth,
    None,
}

impl AudioDevice {
    /// Whether this route plays through a speaker the user holds away
    /// from the ear.
    pub fn is_handsfree(&self) -> bool {
        matches!(self, Self::SpeakerPhone)
    }
}

/// Global audio-subsystem mode of the host platform.
///
/// The session switches the platform into a communication mode for its
/// lifetime and restores the prior mode on stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioMode {
    Normal,
    Ringtone,
    InCall,
    InCommunication,
}

impl AudioMode {
    /// Whether this mode configures the subsystem for bidirectional voice.
    pub fn is_call_mode(&self) -> bool {
        matches!(self, Self::InCall | Self::InCommunication)
    }
}

/// Static hardware facts a backend can be asked about.
///
/// Absence of a feature is an ordinary `false`, never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformFeature {
    /// A dedicated earpiece-class speaker (telephony handsets have one,
    /// tablets and desktops usually do not).
    Earpiece,
    /// A Bluetooth radio capable of carrying a voice link.
    Bluetooth,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialized_route_names() {
        let json = serde_json::to_string(&AudioDevice::SpeakerPhone).unwrap();
        assert_eq!(json, "\"speaker_phone\"");
        let json = serde_json::to_string(&AudioDevice::WiredHeadset).unwrap();
        assert_eq!(json, "\"wired_headset\"");
        let json = serde_json::to_string(&AudioDevice::None).unwrap();
        assert_eq!(json, "\"none\"");

        let device: AudioDevice = serde_json::from_str("\"bluetooth\"").unwrap();
        assert_eq!(device, AudioDevice::Bluetooth);
    }

    #[test]
    fn call_modes() {
        assert!(AudioMode::InCommunication.is_call_mode());
        assert!(AudioMode::InCall.is_call_mode());
        assert!(!AudioMode::Normal.is_call_mode());
        assert!(!AudioMode::Ringtone.is_call_mode());
    }
}
