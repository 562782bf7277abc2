use crate::models::device::AudioDevice;

/// Notification target for route changes.
///
/// Invoked at most once per actual change; recomputations that leave the
/// active route unchanged produce no callback. A session holds at most one
/// observer, installed at `start` and dropped at `stop`.
///
/// The callback runs synchronously while the session's state is held;
/// it must not call back into the session.
pub trait RouteObserver: Send + Sync {
    fn on_route_changed(&self, route: AudioDevice);
}
