use std::sync::Arc;

/// Callback receiving the raw accessory plug state tag.
///
/// State convention: `0` = unplugged, `1` = plugged. Any other value is
/// treated as unplugged by the monitor.
pub type RawPlugCallback = Arc<dyn Fn(i32) + Send + Sync>;

/// Subscription to the platform's wired-accessory attachment broadcast.
///
/// Events must be delivered synchronously on the session's control thread.
/// `subscribe`/`unsubscribe` are paired exactly once per session; after
/// `unsubscribe` returns, no further callback invocations may occur.
pub trait PlugEventSource: Send {
    fn subscribe(&mut self, callback: RawPlugCallback);

    fn unsubscribe(&mut self);
}
