use serde::{Deserialize, Serialize};

use crate::normalize::clamp01;

pub const DEFAULT_GAMMA: f64 = 1.2;
pub const MAX_REFERENCE_FLOOR: f64 = 8.0;
pub const MEDIAN_REFERENCE_FLOOR: f64 = 6.0;

/// Which peer statistic appearances are measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeerReference {
    #[default]
    Max,
    Median,
}

impl PeerReference {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "max" | "maximum" => Some(Self::Max),
            "median" => Some(Self::Median),
            _ => None,
        }
    }
}

/// Pass-wide appearance statistics, reduced once before any profile is derived.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeerStats {
    pub max_appearances: u32,
    /// Median over players with at least one appearance; 0 when there are none.
    pub median_appearances: f64,
}

impl PeerStats {
    pub fn from_appearances(apps: impl IntoIterator<Item = u32>) -> Self {
        let mut nonzero: Vec<u32> = Vec::new();
        let mut max_appearances = 0u32;
        for a in apps {
            max_appearances = max_appearances.max(a);
            if a > 0 {
                nonzero.push(a);
            }
        }
        nonzero.sort_unstable();
        let median_appearances = match nonzero.len() {
            0 => 0.0,
            n if n % 2 == 1 => nonzero[n / 2] as f64,
            n => (nonzero[n / 2 - 1] as f64 + nonzero[n / 2] as f64) / 2.0,
        };
        Self {
            max_appearances,
            median_appearances,
        }
    }

    /// Peer maximum with its floor applied; always used for appearance volume.
    pub fn max_reference(&self) -> f64 {
        (self.max_appearances as f64).max(MAX_REFERENCE_FLOOR)
    }

    pub fn reference(&self, kind: PeerReference) -> f64 {
        match kind {
            PeerReference::Max => self.max_reference(),
            PeerReference::Median => self.median_appearances.max(MEDIAN_REFERENCE_FLOOR),
        }
    }
}

/// Damping factor in [0,1] for players with few appearances relative to peers.
pub fn reliability(appearances: u32, reference: f64, gamma: f64) -> f64 {
    if reference <= 0.0 || appearances == 0 {
        return 0.0;
    }
    clamp01((appearances as f64 / reference).powf(gamma))
}
