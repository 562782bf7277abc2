/// Boolean attachment and intent signals feeding route selection.
///
/// Wired state is written by the attachment monitor, Bluetooth state by the
/// external link-management collaborator, and the hands-free flag by the
/// user-facing API. Route selection only ever reads these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteSignals {
    /// A wired headset is physically plugged in.
    pub has_wired_headset: bool,
    /// A wireless (Bluetooth) voice link is attached.
    pub has_bluetooth: bool,
    /// The user asked for loudspeaker output.
    pub handsfree_requested: bool,
}
