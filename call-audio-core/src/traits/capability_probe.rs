use crate::models::device::PlatformFeature;

/// One-shot query for static hardware facts.
///
/// Probed once at session construction; the answers never change for the
/// lifetime of the process. An absent feature is a plain `false`.
pub trait CapabilityProbe {
    fn has_feature(&self, feature: PlatformFeature) -> bool;
}
