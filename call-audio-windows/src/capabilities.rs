//! Capability probing via endpoint enumeration.
//!
//! Windows exposes no feature registry for audio hardware, so static
//! facts are derived from the endpoint list: an earpiece means a
//! handset-form-factor render endpoint, Bluetooth support means a
//! Bluetooth-bus endpoint is visible. A probe failure answers `false` —
//! capability absence is never an error.

use windows::Win32::System::Com::*;

use call_audio_core::models::device::PlatformFeature;
use call_audio_core::traits::capability_probe::CapabilityProbe;

use crate::endpoints::EndpointClassifier;

/// Capability answers derived from the MMDevice endpoint list.
pub struct MmDeviceCapabilities;

impl CapabilityProbe for MmDeviceCapabilities {
    fn has_feature(&self, feature: PlatformFeature) -> bool {
        let probed = probe(|classifier| match feature {
            PlatformFeature::Earpiece => classifier.earpiece_present(),
            PlatformFeature::Bluetooth => classifier.bluetooth_present(),
        });
        match probed {
            Ok(present) => present,
            Err(e) => {
                log::warn!("capability probe for {:?} failed: {}", feature, e);
                false
            }
        }
    }
}

fn probe<T>(
    f: impl FnOnce(&EndpointClassifier) -> Result<T, call_audio_core::ControlError>,
) -> Result<T, call_audio_core::ControlError> {
    unsafe {
        CoInitializeEx(None, COINIT_MULTITHREADED).map_err(|e| {
            call_audio_core::ControlError::Platform(format!("CoInitializeEx failed: {}", e))
        })?;
    }
    let result = EndpointClassifier::new().and_then(|classifier| f(&classifier));
    unsafe {
        CoUninitialize();
    }
    result
}
