use super::device::AudioMode;
use super::focus::FocusRequest;

/// Configuration applied at session start.
///
/// Defaults reproduce the fixed behavior of a plain voice call: transient
/// voice-communication focus, in-communication mode, microphone forced
/// unmuted, wired headset monitoring on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Focus request issued when the session claims the audio resource.
    pub focus: FocusRequest,

    /// Mode the platform is switched into for the session's lifetime.
    pub mode: AudioMode,

    /// Unmute the microphone at start. The prior mute state is restored
    /// at stop either way.
    pub unmute_microphone: bool,

    /// Subscribe to wired-accessory plug events for the session's lifetime.
    pub monitor_wired_headset: bool,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.mode.is_call_mode() {
            return Err(format!(
                "session mode must be a call mode, got {:?}",
                self.mode
            ));
        }
        Ok(())
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            focus: FocusRequest::default(),
            mode: AudioMode::InCommunication,
            unmute_microphone: true,
            monitor_wired_headset: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn non_call_mode_rejected() {
        let config = SessionConfig {
            mode: AudioMode::Normal,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
