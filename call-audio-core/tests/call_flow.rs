//! Full-lifecycle session tests driven through the public test doubles.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::thread;

use call_audio_core::testing::{
    MockAudioPlatform, MockPlugSource, PlatformCall, RecordingObserver, StaticCapabilities,
};
use call_audio_core::{
    AudioDevice, AudioMode, AudioPlatform, BluetoothRoutePolicy, CallAudioSession, ControlError,
    RouteObserver, SessionConfig,
};

const HANDSET: StaticCapabilities = StaticCapabilities {
    earpiece: true,
    bluetooth: true,
};

const TABLET: StaticCapabilities = StaticCapabilities {
    earpiece: false,
    bluetooth: false,
};

struct Harness {
    session: CallAudioSession<MockAudioPlatform>,
    platform: Arc<MockAudioPlatform>,
    plug: MockPlugSource,
    observer: Arc<RecordingObserver>,
}

fn harness(platform: MockAudioPlatform, probe: StaticCapabilities) -> Harness {
    let platform = Arc::new(platform);
    let plug = MockPlugSource::new();
    let session = CallAudioSession::new(Arc::clone(&platform), &probe, Box::new(plug.clone()));
    Harness {
        session,
        platform,
        plug,
        observer: Arc::new(RecordingObserver::new()),
    }
}

#[test]
fn restoration_round_trip() {
    let mut h = harness(MockAudioPlatform::with_state(AudioMode::Ringtone, true), HANDSET);

    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(h.session.is_running());
    assert_eq!(h.platform.mode(), AudioMode::InCommunication);
    assert!(!h.platform.is_microphone_muted());

    // Arbitrary activity in between must not affect restoration.
    h.plug.emit(1);
    h.session.set_handsfree(true).unwrap();
    h.plug.emit(0);

    h.session.stop().unwrap();
    assert!(!h.session.is_running());
    assert_eq!(h.platform.mode(), AudioMode::Ringtone);
    assert!(h.platform.is_microphone_muted());
    assert_eq!(h.session.current_route(), AudioDevice::None);
}

#[test]
fn denied_focus_still_starts_and_unmutes() {
    let platform = MockAudioPlatform::with_state(AudioMode::Normal, true).deny_focus();
    let mut h = harness(platform, HANDSET);

    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(h.session.is_running());
    assert!(!h.platform.is_microphone_muted());
    assert_eq!(h.session.current_route(), AudioDevice::Earpiece);

    h.session.stop().unwrap();
    assert!(h
        .platform
        .calls()
        .iter()
        .any(|call| matches!(call, PlatformCall::AbandonFocus(_))));
}

#[test]
fn initial_route_follows_capabilities() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::Earpiece);
    assert_eq!(h.observer.routes(), vec![AudioDevice::Earpiece]);
    h.session.stop().unwrap();

    let mut h = harness(MockAudioPlatform::new(), TABLET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::SpeakerPhone);
    h.session.stop().unwrap();
}

#[test]
fn wired_plug_switches_route() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();

    h.plug.emit(1);
    assert_eq!(h.session.current_route(), AudioDevice::WiredHeadset);

    h.plug.emit(0);
    assert_eq!(h.session.current_route(), AudioDevice::Earpiece);

    assert_eq!(
        h.observer.routes(),
        vec![
            AudioDevice::Earpiece,
            AudioDevice::WiredHeadset,
            AudioDevice::Earpiece,
        ]
    );

    h.session.stop().unwrap();
}

#[test]
fn repeated_plug_state_produces_no_notifications() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();

    h.plug.emit(1);
    let after_first = h.observer.routes().len();
    h.plug.emit(1);
    h.plug.emit(1);
    assert_eq!(h.observer.routes().len(), after_first);

    h.session.stop().unwrap();
}

#[test]
fn wireless_link_beats_wired_headset() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();

    h.plug.emit(1);
    h.session.report_bluetooth_attached(true).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::Bluetooth);

    h.session.report_bluetooth_attached(false).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::WiredHeadset);

    h.session.stop().unwrap();
}

#[test]
fn handsfree_toggle_is_idempotent() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    let baseline = h.observer.routes().len();

    h.session.set_handsfree(true).unwrap();
    h.session.set_handsfree(true).unwrap();

    let routes = h.observer.routes();
    assert_eq!(routes.len(), baseline + 1);
    assert_eq!(routes.last(), Some(&AudioDevice::SpeakerPhone));

    h.session.set_handsfree(false).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::Earpiece);

    h.session.stop().unwrap();
}

#[test]
fn monitor_torn_down_on_stop() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(h.plug.is_subscribed());

    h.session.stop().unwrap();
    assert!(!h.plug.is_subscribed());

    // A late event is dropped by the source, not routed.
    h.plug.emit(1);
    assert_eq!(h.session.current_route(), AudioDevice::None);
}

#[test]
fn double_start_is_a_contract_violation() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();

    let second_observer = Arc::new(RecordingObserver::new());
    let second = catch_unwind(AssertUnwindSafe(|| h.session.start(second_observer)));
    match second {
        // debug builds panic on the contract violation
        Err(_) => {}
        Ok(result) => assert_eq!(result, Err(ControlError::AlreadyRunning)),
    }

    assert!(h.session.is_running());
    h.session.stop().unwrap();
}

#[test]
fn double_stop_is_guarded() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    h.session.stop().unwrap();

    assert_eq!(h.session.stop(), Err(ControlError::NotRunning));
}

#[test]
fn off_thread_mutation_is_rejected() {
    let h = harness(MockAudioPlatform::new(), HANDSET);
    let session = h.session;

    let result = thread::spawn(move || session.set_handsfree(true)).join();
    match result {
        // debug builds panic on the contract violation
        Err(_) => {}
        Ok(ret) => assert_eq!(ret, Err(ControlError::OffControlThread)),
    }
}

#[test]
fn bluetooth_policy_activates_devices() {
    let platform = MockAudioPlatform::new().connect_sco_immediately();
    let mut h = harness(platform, HANDSET);
    h.session
        .set_policy(Box::new(BluetoothRoutePolicy::new()))
        .unwrap();

    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(!h.session.is_handsfree());

    h.session.report_bluetooth_attached(true).unwrap();
    assert_eq!(h.session.current_route(), AudioDevice::Bluetooth);
    assert!(h.platform.calls().contains(&PlatformCall::StartBluetoothSco));

    h.session.report_bluetooth_attached(false).unwrap();
    assert!(h.platform.calls().contains(&PlatformCall::StopBluetoothSco));

    h.session.set_handsfree(true).unwrap();
    assert!(h.session.is_handsfree());
    assert!(h.platform.is_speakerphone_on());

    // Stop tears the loudspeaker back down.
    h.session.stop().unwrap();
    assert!(!h.platform.is_speakerphone_on());
}

#[test]
fn config_controls_monitor_registration() {
    let mut h = harness(MockAudioPlatform::new(), HANDSET);
    h.session
        .configure(SessionConfig {
            monitor_wired_headset: false,
            ..Default::default()
        })
        .unwrap();

    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(!h.plug.is_subscribed());

    // Without the monitor the wired signal never arrives.
    h.plug.emit(1);
    assert_eq!(h.session.current_route(), AudioDevice::Earpiece);

    h.session.stop().unwrap();
}

#[test]
fn preserved_mute_when_configured_off() {
    let platform = MockAudioPlatform::with_state(AudioMode::Normal, true);
    let mut h = harness(platform, HANDSET);
    h.session
        .configure(SessionConfig {
            unmute_microphone: false,
            ..Default::default()
        })
        .unwrap();

    h.session.start(Arc::clone(&h.observer) as Arc<dyn RouteObserver>).unwrap();
    assert!(h.platform.is_microphone_muted());
    h.session.stop().unwrap();
    assert!(h.platform.is_microphone_muted());
}
