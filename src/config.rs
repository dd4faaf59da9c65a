use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::confidence::DEFAULT_Z;
use crate::rating::RatingScale;
use crate::reliability::{DEFAULT_GAMMA, PeerReference};

pub const DEFAULT_STAT_CAP: f64 = 1.0;
const ALLOWED_STAT_CAPS: [f64; 2] = [1.0, 1.5];

/// Knobs for one computation run. Mixing scales or references inside a dataset
/// produces ratings that are not comparable, so a run takes exactly one config.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub z: f64,
    pub gamma: f64,
    /// Goals/assists per match that count as a full 1.0.
    pub stat_cap: f64,
    pub scale: RatingScale,
    pub reference: PeerReference,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            z: DEFAULT_Z,
            gamma: DEFAULT_GAMMA,
            stat_cap: DEFAULT_STAT_CAP,
            scale: RatingScale::Compressed,
            reference: PeerReference::Max,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; invalid values keep the default.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(raw) = lookup("CARDS_RATING_SCALE") {
            match RatingScale::parse(&raw) {
                Some(scale) => cfg.scale = scale,
                None => warn!(value = %raw, "ignoring CARDS_RATING_SCALE"),
            }
        }
        if let Some(raw) = lookup("CARDS_PEER_REFERENCE") {
            match PeerReference::parse(&raw) {
                Some(reference) => cfg.reference = reference,
                None => warn!(value = %raw, "ignoring CARDS_PEER_REFERENCE"),
            }
        }
        if let Some(raw) = lookup("CARDS_STAT_CAP") {
            match positive(&raw).filter(|cap| ALLOWED_STAT_CAPS.contains(cap)) {
                Some(cap) => cfg.stat_cap = cap,
                None => warn!(value = %raw, "ignoring CARDS_STAT_CAP (expected 1.0 or 1.5)"),
            }
        }
        if let Some(raw) = lookup("CARDS_WILSON_Z") {
            match positive(&raw) {
                Some(z) => cfg.z = z,
                None => warn!(value = %raw, "ignoring CARDS_WILSON_Z"),
            }
        }
        if let Some(raw) = lookup("CARDS_RELIABILITY_GAMMA") {
            match positive(&raw) {
                Some(gamma) => cfg.gamma = gamma,
                None => warn!(value = %raw, "ignoring CARDS_RELIABILITY_GAMMA"),
            }
        }
        cfg
    }
}

fn positive(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}
