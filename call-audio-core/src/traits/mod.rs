pub mod audio_platform;
pub mod capability_probe;
pub mod plug_events;
pub mod route_observer;
