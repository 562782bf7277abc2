//! `AudioPlatform` over the Windows MMDevice endpoints.
//!
//! Microphone mute drives the default communications capture endpoint
//! through `IAudioEndpointVolume`. The global mode, focus claim and route
//! activation flags are tracked process-locally: Windows owns
//! communications ducking and default-endpoint choice itself, so those
//! calls configure this process's view and are logged for the host.

use parking_lot::Mutex;
use windows::core::*;
use windows::Win32::Media::Audio::Endpoints::IAudioEndpointVolume;
use windows::Win32::Media::Audio::*;
use windows::Win32::System::Com::*;

use call_audio_core::models::device::AudioMode;
use call_audio_core::models::error::ControlError;
use call_audio_core::models::focus::{FocusDecision, FocusGrant, FocusRequest, FocusToken};
use call_audio_core::traits::audio_platform::AudioPlatform;

struct PlatformState {
    mode: AudioMode,
    speakerphone_on: bool,
    sco_on: bool,
    next_token: u64,
}

/// Windows implementation of the platform audio resource.
pub struct MmDeviceAudioPlatform {
    state: Mutex<PlatformState>,
}

impl MmDeviceAudioPlatform {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(PlatformState {
                mode: AudioMode::Normal,
                speakerphone_on: false,
                sco_on: false,
                next_token: 1,
            }),
        }
    }

    /// Run `f` against the default communications capture endpoint's
    /// volume control. COM is initialized for the duration of the call.
    fn with_capture_volume<T>(
        f: impl FnOnce(&IAudioEndpointVolume) -> windows::core::Result<T>,
    ) -> Result<T, ControlError> {
        unsafe {
            CoInitializeEx(None, COINIT_MULTITHREADED)
                .map_err(|e| ControlError::Platform(format!("CoInitializeEx failed: {}", e)))?;

            let _com_guard = CoUninitializeGuard;

            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                    .map_err(|e| ControlError::Platform(format!("failed to create enumerator: {}", e)))?;

            let device = enumerator
                .GetDefaultAudioEndpoint(eCapture, eCommunications)
                .map_err(|_| ControlError::DeviceNotAvailable)?;

            let volume: IAudioEndpointVolume = device
                .Activate(CLSCTX_ALL, None)
                .map_err(|e| ControlError::Platform(format!("Activate failed: {}", e)))?;

            f(&volume).map_err(|e| ControlError::Platform(format!("endpoint volume call failed: {}", e)))
        }
    }
}

impl Default for MmDeviceAudioPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioPlatform for MmDeviceAudioPlatform {
    fn mode(&self) -> AudioMode {
        self.state.lock().mode
    }

    fn set_mode(&self, mode: AudioMode) {
        log::debug!("audio mode -> {:?}", mode);
        self.state.lock().mode = mode;
    }

    fn is_microphone_muted(&self) -> bool {
        match Self::with_capture_volume(|volume| unsafe { volume.GetMute() }) {
            Ok(muted) => muted.as_bool(),
            Err(e) => {
                log::error!("failed to read microphone mute: {}", e);
                false
            }
        }
    }

    fn set_microphone_muted(&self, muted: bool) {
        let result = Self::with_capture_volume(|volume| unsafe {
            volume.SetMute(muted, std::ptr::null())
        });
        if let Err(e) = result {
            log::error!("failed to set microphone mute: {}", e);
        }
    }

    fn request_focus(&self, request: &FocusRequest) -> FocusGrant {
        // Communications streams are prioritized by the OS ducking policy;
        // there is no separate grant to lose.
        let mut state = self.state.lock();
        let token = FocusToken(state.next_token);
        state.next_token += 1;
        log::debug!("focus claim {:?} ({:?})", token, request.usage);
        FocusGrant {
            token,
            decision: FocusDecision::Granted,
        }
    }

    fn abandon_focus(&self, token: FocusToken) {
        log::debug!("focus claim {:?} abandoned", token);
    }

    fn set_speakerphone_on(&self, on: bool) {
        log::debug!("loudspeaker routing requested: {}", on);
        self.state.lock().speakerphone_on = on;
    }

    fn is_speakerphone_on(&self) -> bool {
        self.state.lock().speakerphone_on
    }

    fn start_bluetooth_sco(&self) {
        log::debug!("bluetooth voice link requested");
        self.state.lock().sco_on = true;
    }

    fn stop_bluetooth_sco(&self) {
        log::debug!("bluetooth voice link dropped");
        self.state.lock().sco_on = false;
    }

    fn is_bluetooth_sco_on(&self) -> bool {
        self.state.lock().sco_on
    }
}

/// RAII guard to call CoUninitialize when dropped.
struct CoUninitializeGuard;

impl Drop for CoUninitializeGuard {
    fn drop(&mut self) {
        unsafe {
            CoUninitialize();
        }
    }
}
