//! Route priority table.

use crate::models::device::{AudioDevice, PlatformFeature};
use crate::models::signals::RouteSignals;
use crate::traits::capability_probe::CapabilityProbe;

/// Pick the active route for the current signal set.
///
/// Priority, highest first: Bluetooth link, wired headset, user-requested
/// loudspeaker, then the unit's default device.
pub fn select_route(signals: &RouteSignals, default_device: AudioDevice) -> AudioDevice {
    if signals.has_bluetooth {
        AudioDevice::Bluetooth
    } else if signals.has_wired_headset {
        AudioDevice::WiredHeadset
    } else if signals.handsfree_requested {
        AudioDevice::SpeakerPhone
    } else {
        default_device
    }
}

/// The fallback route when nothing is attached and nothing was requested:
/// the earpiece when the unit has one, the loudspeaker otherwise.
pub fn default_route(probe: &dyn CapabilityProbe) -> AudioDevice {
    if probe.has_feature(PlatformFeature::Earpiece) {
        AudioDevice::Earpiece
    } else {
        AudioDevice::SpeakerPhone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticCapabilities;

    fn signals(wired: bool, bluetooth: bool, handsfree: bool) -> RouteSignals {
        RouteSignals {
            has_wired_headset: wired,
            has_bluetooth: bluetooth,
            handsfree_requested: handsfree,
        }
    }

    #[test]
    fn priority_table() {
        use AudioDevice::*;

        // (wired, bluetooth, handsfree) → expected, for each default device
        let table = [
            ((false, false, false), Earpiece, SpeakerPhone),
            ((false, false, true), SpeakerPhone, SpeakerPhone),
            ((true, false, false), WiredHeadset, WiredHeadset),
            ((true, false, true), WiredHeadset, WiredHeadset),
            ((false, true, false), Bluetooth, Bluetooth),
            ((false, true, true), Bluetooth, Bluetooth),
            ((true, true, false), Bluetooth, Bluetooth),
            ((true, true, true), Bluetooth, Bluetooth),
        ];

        for ((wired, bluetooth, handsfree), with_earpiece, without_earpiece) in table {
            let s = signals(wired, bluetooth, handsfree);
            assert_eq!(
                select_route(&s, Earpiece),
                with_earpiece,
                "signals {:?} with earpiece default",
                s
            );
            assert_eq!(
                select_route(&s, SpeakerPhone),
                without_earpiece,
                "signals {:?} with speakerphone default",
                s
            );
        }
    }

    #[test]
    fn wireless_beats_wired() {
        let s = signals(true, true, false);
        assert_eq!(select_route(&s, AudioDevice::Earpiece), AudioDevice::Bluetooth);
    }

    #[test]
    fn default_route_follows_earpiece_capability() {
        let handset = StaticCapabilities {
            earpiece: true,
            bluetooth: true,
        };
        let tablet = StaticCapabilities {
            earpiece: false,
            bluetooth: true,
        };
        assert_eq!(default_route(&handset), AudioDevice::Earpiece);
        assert_eq!(default_route(&tablet), AudioDevice::SpeakerPhone);
    }
}
