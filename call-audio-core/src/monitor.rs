//! Wired-accessory attachment monitoring.

use std::sync::Arc;

use crate::models::error::{contract_violation, ControlError};
use crate::traits::plug_events::{PlugEventSource, RawPlugCallback};

const STATE_UNPLUGGED: i32 = 0;
const STATE_PLUGGED: i32 = 1;

/// Callback receiving the normalized wired-headset attachment state.
pub type WiredPlugCallback = Arc<dyn Fn(bool) + Send + Sync>;

/// Normalizes the platform's raw plug broadcasts into a boolean signal.
///
/// Registration is paired with the session lifecycle: registered during
/// `start`, unregistered on every `stop` path. The raw state tag follows
/// the broadcast convention (`0` unplugged, `1` plugged); unknown tags
/// fail safe to unplugged.
pub struct WiredHeadsetMonitor {
    source: Box<dyn PlugEventSource>,
    registered: bool,
}

impl WiredHeadsetMonitor {
    pub fn new(source: Box<dyn PlugEventSource>) -> Self {
        Self {
            source,
            registered: false,
        }
    }

    /// Subscribe to plug events, delivering the normalized state to
    /// `on_change`. Registering twice without an intervening
    /// `unregister` is a contract violation.
    pub fn register(&mut self, on_change: WiredPlugCallback) -> Result<(), ControlError> {
        if self.registered {
            contract_violation("wired headset monitor registered twice");
            return Err(ControlError::MonitorRegistered);
        }

        let callback: RawPlugCallback =
            Arc::new(move |raw_state| on_change(normalize(raw_state)));
        self.source.subscribe(callback);
        self.registered = true;
        Ok(())
    }

    /// Drop the subscription. Safe to call when not registered.
    pub fn unregister(&mut self) {
        if !self.registered {
            log::warn!("wired headset monitor unregister without register");
            return;
        }
        self.source.unsubscribe();
        self.registered = false;
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

fn normalize(raw_state: i32) -> bool {
    match raw_state {
        STATE_PLUGGED => true,
        STATE_UNPLUGGED => false,
        other => {
            log::warn!("unknown plug state tag {}, treating as unplugged", other);
            false
        }
    }
}
