use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;

use crate::focus::{AudioClaim, FocusGuard};
use crate::models::config::SessionConfig;
use crate::models::device::AudioDevice;
use crate::models::error::{contract_violation, ControlError};
use crate::models::signals::RouteSignals;
use crate::models::state::SessionPhase;
use crate::monitor::WiredHeadsetMonitor;
use crate::routing::policy::{PassiveRoutePolicy, RoutePolicy};
use crate::routing::selector::default_route;
use crate::traits::audio_platform::AudioPlatform;
use crate::traits::capability_probe::CapabilityProbe;
use crate::traits::plug_events::PlugEventSource;
use crate::traits::route_observer::RouteObserver;

/// Mutable routing state shared with the attachment callback.
struct RouterCore {
    phase: SessionPhase,
    signals: RouteSignals,
    active: AudioDevice,
    default_device: AudioDevice,
    policy: Box<dyn RoutePolicy>,
    observer: Option<Arc<dyn RouteObserver>>,
}

impl RouterCore {
    /// Recompute the active route from the current signals.
    ///
    /// Safe to call in any phase; a no-op while stopped. Activation and
    /// observer notification only happen when the route actually changes.
    fn update(&mut self, platform: &dyn AudioPlatform) {
        if !self.phase.is_running() {
            return;
        }

        let route = self.policy.select(&self.signals, self.default_device);
        if route == self.active {
            return;
        }

        log::debug!("audio route {:?} -> {:?}", self.active, route);
        self.policy.activate(platform, route);
        self.active = route;

        if let Some(observer) = &self.observer {
            observer.on_route_changed(route);
        }
    }
}

/// Session lifecycle façade.
///
/// Owns the platform claim for exactly the running span and coordinates
/// the attachment monitor, route policy and observer around it. Generic
/// over the platform backend; see `call-audio-windows` for the reference
/// implementation and [`crate::testing::MockAudioPlatform`] for tests.
///
/// Every mutating entry point must run on the thread that constructed the
/// session (the control thread). Off-thread calls are contract violations,
/// not races.
pub struct CallAudioSession<P: AudioPlatform + 'static> {
    platform: Arc<P>,
    config: SessionConfig,
    core: Arc<Mutex<RouterCore>>,
    monitor: WiredHeadsetMonitor,
    claim: Option<AudioClaim>,
    control_thread: ThreadId,
}

impl<P: AudioPlatform + 'static> CallAudioSession<P> {
    /// Build a session over a platform backend.
    ///
    /// Capabilities are probed once here to fix the default device; the
    /// passive route policy and default config are installed.
    pub fn new(
        platform: Arc<P>,
        probe: &dyn CapabilityProbe,
        plug_source: Box<dyn PlugEventSource>,
    ) -> Self {
        let default_device = default_route(probe);
        log::debug!("default audio device: {:?}", default_device);

        Self {
            platform,
            config: SessionConfig::default(),
            core: Arc::new(Mutex::new(RouterCore {
                phase: SessionPhase::Stopped,
                signals: RouteSignals::default(),
                active: AudioDevice::None,
                default_device,
                policy: Box::new(PassiveRoutePolicy),
                observer: None,
            })),
            monitor: WiredHeadsetMonitor::new(plug_source),
            claim: None,
            control_thread: thread::current().id(),
        }
    }

    /// Replace the session config. Only allowed while stopped.
    pub fn configure(&mut self, config: SessionConfig) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        if self.is_running() {
            contract_violation("configure while running");
            return Err(ControlError::AlreadyRunning);
        }
        config.validate().map_err(ControlError::InvalidConfig)?;
        self.config = config;
        Ok(())
    }

    /// Swap the route policy. Only allowed while stopped.
    pub fn set_policy(&mut self, policy: Box<dyn RoutePolicy>) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        if self.is_running() {
            contract_violation("policy swap while running");
            return Err(ControlError::AlreadyRunning);
        }
        self.core.lock().policy = policy;
        Ok(())
    }

    /// Begin audio control.
    ///
    /// Claims the audio resource (snapshotting prior state), registers the
    /// wired-headset monitor, installs the observer and computes the
    /// initial route. Starting a running session is a contract violation.
    pub fn start(&mut self, observer: Arc<dyn RouteObserver>) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        if self.is_running() {
            contract_violation("session started twice");
            return Err(ControlError::AlreadyRunning);
        }

        log::debug!("starting call audio control");
        let claim = FocusGuard::new(self.platform.as_ref()).acquire(&self.config);
        self.claim = Some(claim);

        if self.config.monitor_wired_headset {
            let core = Arc::clone(&self.core);
            let platform = Arc::clone(&self.platform);
            let register = self.monitor.register(Arc::new(move |plugged| {
                let mut core = core.lock();
                core.signals.has_wired_headset = plugged;
                core.update(platform.as_ref());
            }));
            if let Err(err) = register {
                // Unwind the claim so a failed start leaks nothing.
                if let Some(claim) = self.claim.take() {
                    FocusGuard::new(self.platform.as_ref()).release(claim);
                }
                return Err(err);
            }
        }

        let mut core = self.core.lock();
        core.observer = Some(observer);
        core.phase = SessionPhase::Running;
        core.signals.handsfree_requested = false;
        core.update(self.platform.as_ref());
        Ok(())
    }

    /// End audio control and restore the pre-session platform state.
    ///
    /// Stopping a stopped session is guarded: logged and rejected, never
    /// a crash.
    pub fn stop(&mut self) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        if !self.is_running() {
            log::warn!("stop on a session that is not running");
            return Err(ControlError::NotRunning);
        }

        log::debug!("stopping call audio control");

        // Specialization teardown first (stops the SCO link, drops the
        // loudspeaker) while the platform claim is still held.
        {
            let mut core = self.core.lock();
            core.policy.activate(self.platform.as_ref(), AudioDevice::None);
        }
        if self.monitor.is_registered() {
            self.monitor.unregister();
        }

        if let Some(claim) = self.claim.take() {
            FocusGuard::new(self.platform.as_ref()).release(claim);
        }

        let mut core = self.core.lock();
        core.observer = None;
        core.phase = SessionPhase::Stopped;
        core.active = AudioDevice::None;
        Ok(())
    }

    /// Request or drop loudspeaker routing.
    ///
    /// Writing the current value again is a no-op: no recomputation, no
    /// notification.
    pub fn set_handsfree(&self, on: bool) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        let mut core = self.core.lock();
        if core.signals.handsfree_requested == on {
            return Ok(());
        }
        core.signals.handsfree_requested = on;
        core.update(self.platform.as_ref());
        Ok(())
    }

    /// Hands-free state as reported by the installed policy.
    pub fn is_handsfree(&self) -> bool {
        self.core.lock().policy.is_handsfree()
    }

    /// Record a wireless voice-link attachment change reported by the
    /// external link-management stack.
    pub fn report_bluetooth_attached(&self, attached: bool) -> Result<(), ControlError> {
        self.ensure_control_thread()?;
        let mut core = self.core.lock();
        if core.signals.has_bluetooth == attached {
            return Ok(());
        }
        core.signals.has_bluetooth = attached;
        core.update(self.platform.as_ref());
        Ok(())
    }

    /// Force a route recomputation from the current signals.
    ///
    /// Advisory: safe in any phase (a no-op while stopped) and never
    /// fails.
    pub fn update_route(&self) {
        self.core.lock().update(self.platform.as_ref());
    }

    /// The currently active route; `None` while stopped.
    pub fn current_route(&self) -> AudioDevice {
        self.core.lock().active
    }

    /// Current attachment and intent signals.
    pub fn signals(&self) -> RouteSignals {
        self.core.lock().signals
    }

    pub fn is_running(&self) -> bool {
        self.core.lock().phase.is_running()
    }

    fn ensure_control_thread(&self) -> Result<(), ControlError> {
        if thread::current().id() == self.control_thread {
            return Ok(());
        }
        contract_violation("called outside the control thread");
        Err(ControlError::OffControlThread)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::device::AudioMode;
    use crate::testing::{
        MockAudioPlatform, MockPlugSource, RecordingObserver, StaticCapabilities,
    };

    fn handset_session() -> (CallAudioSession<MockAudioPlatform>, MockPlugSource) {
        let platform = Arc::new(MockAudioPlatform::with_state(AudioMode::Normal, false));
        let plug = MockPlugSource::new();
        let probe = StaticCapabilities {
            earpiece: true,
            bluetooth: true,
        };
        let session = CallAudioSession::new(platform, &probe, Box::new(plug.clone()));
        (session, plug)
    }

    #[test]
    fn configure_rejected_while_running() {
        let (mut session, _plug) = handset_session();
        session.start(Arc::new(RecordingObserver::new())).unwrap();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            session.configure(SessionConfig::default())
        }));
        match result {
            Err(_) => {}
            Ok(ret) => assert_eq!(ret, Err(ControlError::AlreadyRunning)),
        }
    }

    #[test]
    fn update_route_before_start_is_a_noop() {
        let (session, _plug) = handset_session();
        session.update_route();
        assert_eq!(session.current_route(), AudioDevice::None);
        assert!(!session.is_running());
    }

    #[test]
    fn handsfree_signal_accepted_while_stopped() {
        let (session, _plug) = handset_session();
        session.set_handsfree(true).unwrap();
        assert!(session.signals().handsfree_requested);
        // No route is computed until the session runs.
        assert_eq!(session.current_route(), AudioDevice::None);
    }

    #[test]
    fn start_resets_handsfree_request() {
        let (mut session, _plug) = handset_session();
        session.set_handsfree(true).unwrap();

        session.start(Arc::new(RecordingObserver::new())).unwrap();
        assert!(!session.signals().handsfree_requested);
        assert_eq!(session.current_route(), AudioDevice::Earpiece);

        session.stop().unwrap();
    }
}
