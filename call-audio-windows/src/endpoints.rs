//! Render-endpoint classification via the MMDevice API.
//!
//! Maps active render (output) endpoints onto the core's route classes:
//! Bluetooth transports to `Bluetooth`, headphone/headset form factors to
//! `WiredHeadset`, handset form factors to `Earpiece`, everything else to
//! `SpeakerPhone`.

use windows::core::*;
use windows::Win32::Devices::FunctionDiscovery::*;
use windows::Win32::Media::Audio::*;
use windows::Win32::System::Com::StructuredStorage::PropVariantClear;
use windows::Win32::System::Com::*;
use windows::Win32::System::Variant::*;

use call_audio_core::models::device::AudioDevice;
use call_audio_core::models::error::ControlError;

// EndpointFormFactor values from mmdeviceapi.h.
const FORM_FACTOR_HEADPHONES: u32 = 3;
const FORM_FACTOR_HEADSET: u32 = 5;
const FORM_FACTOR_HANDSET: u32 = 6;

/// Classifies render endpoints into route classes.
pub struct EndpointClassifier {
    enumerator: IMMDeviceEnumerator,
}

impl EndpointClassifier {
    /// Create a new classifier.
    ///
    /// Requires COM to be initialized on the calling thread.
    pub fn new() -> Result<Self, ControlError> {
        unsafe {
            let enumerator: IMMDeviceEnumerator =
                CoCreateInstance(&MMDeviceEnumerator, None, CLSCTX_ALL)
                    .map_err(|e| ControlError::Platform(format!("failed to create enumerator: {}", e)))?;
            Ok(Self { enumerator })
        }
    }

    /// Route classes of all active render endpoints.
    pub fn classify_render_endpoints(&self) -> Result<Vec<AudioDevice>, ControlError> {
        unsafe {
            let collection = self
                .enumerator
                .EnumAudioEndpoints(eRender, DEVICE_STATE_ACTIVE)
                .map_err(|e| ControlError::Platform(format!("EnumAudioEndpoints failed: {}", e)))?;

            let count = collection
                .GetCount()
                .map_err(|e| ControlError::Platform(format!("GetCount failed: {}", e)))?;

            let mut routes = Vec::new();
            for i in 0..count {
                let device = match collection.Item(i) {
                    Ok(d) => d,
                    Err(_) => continue,
                };
                routes.push(Self::classify(&device));
            }
            Ok(routes)
        }
    }

    /// Whether a wired headset endpoint is currently attached.
    pub fn wired_headset_present(&self) -> Result<bool, ControlError> {
        Ok(self
            .classify_render_endpoints()?
            .contains(&AudioDevice::WiredHeadset))
    }

    /// Whether an earpiece-class (handset) endpoint exists.
    pub fn earpiece_present(&self) -> Result<bool, ControlError> {
        Ok(self
            .classify_render_endpoints()?
            .contains(&AudioDevice::Earpiece))
    }

    /// Whether a Bluetooth render endpoint is currently attached.
    pub fn bluetooth_present(&self) -> Result<bool, ControlError> {
        Ok(self
            .classify_render_endpoints()?
            .contains(&AudioDevice::Bluetooth))
    }

    fn classify(device: &IMMDevice) -> AudioDevice {
        if Self::is_bluetooth_transport(device) {
            return AudioDevice::Bluetooth;
        }
        match Self::form_factor(device) {
            Some(FORM_FACTOR_HEADPHONES) | Some(FORM_FACTOR_HEADSET) => AudioDevice::WiredHeadset,
            Some(FORM_FACTOR_HANDSET) => AudioDevice::Earpiece,
            _ => AudioDevice::SpeakerPhone,
        }
    }

    /// Check PKEY_Device_EnumeratorName for a Bluetooth bus.
    fn is_bluetooth_transport(device: &IMMDevice) -> bool {
        unsafe {
            let store = match device.OpenPropertyStore(STGM_READ) {
                Ok(s) => s,
                Err(_) => return false,
            };

            let mut prop = std::mem::zeroed::<PROPVARIANT>();
            let mut bluetooth = false;
            if store
                .GetValue(&PKEY_Device_EnumeratorName, &mut prop)
                .is_ok()
            {
                if prop.Anonymous.Anonymous.vt == VT_LPWSTR {
                    let pwsz = prop.Anonymous.Anonymous.Anonymous.pwszVal;
                    if !pwsz.is_null() {
                        let len = (0..)
                            .take_while(|&i| *pwsz.offset(i) != 0)
                            .count();
                        let name = String::from_utf16_lossy(std::slice::from_raw_parts(pwsz, len));
                        bluetooth = name.contains("BTHENUM") || name.contains("BTHLEENUM");
                    }
                }
                PropVariantClear(&mut prop).ok();
            }
            bluetooth
        }
    }

    /// Read the PKEY_AudioEndpoint_FormFactor property from a device.
    fn form_factor(device: &IMMDevice) -> Option<u32> {
        unsafe {
            let store = device.OpenPropertyStore(STGM_READ).ok()?;

            let mut prop = std::mem::zeroed::<PROPVARIANT>();
            store
                .GetValue(&PKEY_AudioEndpoint_FormFactor, &mut prop)
                .ok()?;

            let value = if prop.Anonymous.Anonymous.vt == VT_UI4 {
                Some(prop.Anonymous.Anonymous.Anonymous.ulVal)
            } else {
                None
            };

            PropVariantClear(&mut prop).ok();
            value
        }
    }
}
