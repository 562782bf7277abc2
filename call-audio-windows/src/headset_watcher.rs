//! Wired-headset attachment watcher.
//!
//! Windows broadcasts no plug intent for desktop apps, so attachment is
//! derived by polling the render endpoint list on a dedicated thread and
//! diffing headset presence. Events are delivered on the watcher thread;
//! the host is responsible for marshalling them onto the session's
//! control thread before touching the session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use windows::Win32::System::Com::*;

use call_audio_core::traits::plug_events::{PlugEventSource, RawPlugCallback};

use crate::endpoints::EndpointClassifier;

const STATE_UNPLUGGED: i32 = 0;
const STATE_PLUGGED: i32 = 1;

/// Polling `PlugEventSource` over the MMDevice endpoint list.
pub struct PollingHeadsetWatcher {
    interval: Duration,
    running: Arc<AtomicBool>,
    watch_handle: Mutex<Option<thread::JoinHandle<()>>>,
}

impl PollingHeadsetWatcher {
    pub fn new() -> Self {
        Self::with_interval(Duration::from_millis(900))
    }

    pub fn with_interval(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
            watch_handle: Mutex::new(None),
        }
    }
}

impl Default for PollingHeadsetWatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl PlugEventSource for PollingHeadsetWatcher {
    fn subscribe(&mut self, callback: RawPlugCallback) {
        if self.running.swap(true, Ordering::SeqCst) {
            log::warn!("headset watcher already subscribed");
            return;
        }

        let running = Arc::clone(&self.running);
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("headset-watch".into())
            .spawn(move || {
                if let Err(e) = watch_loop(running.clone(), interval, callback) {
                    log::error!("headset watcher error: {}", e);
                }
                running.store(false, Ordering::SeqCst);
            })
            .expect("failed to spawn headset watcher thread");

        *self.watch_handle.lock() = Some(handle);
    }

    fn unsubscribe(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.watch_handle.lock().take() {
            let _ = handle.join();
        }
    }
}

/// Poll loop running on the watcher thread.
fn watch_loop(
    running: Arc<AtomicBool>,
    interval: Duration,
    callback: RawPlugCallback,
) -> Result<(), call_audio_core::ControlError> {
    unsafe {
        CoInitializeEx(None, COINIT_MULTITHREADED).map_err(|e| {
            call_audio_core::ControlError::Platform(format!("CoInitializeEx failed: {}", e))
        })?;
    }
    let _com_guard = CoUninitializeGuard;

    let classifier = EndpointClassifier::new()?;
    let mut last_present: Option<bool> = None;

    while running.load(Ordering::SeqCst) {
        match classifier.wired_headset_present() {
            Ok(present) => {
                if last_present != Some(present) {
                    last_present = Some(present);
                    callback(if present { STATE_PLUGGED } else { STATE_UNPLUGGED });
                }
            }
            Err(e) => log::warn!("headset poll failed: {}", e),
        }
        thread::sleep(interval);
    }

    Ok(())
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
