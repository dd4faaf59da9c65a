use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::normalize::clamp01;
use crate::reliability::{PeerStats, reliability};

/// Rating category. Anything that is not a known goalkeeper code plays outfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Goalkeeper,
    Outfield,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleWeights {
    pub win: f64,
    pub goals: f64,
    pub assists: f64,
    pub appearances: f64,
}

const GOALKEEPER_WEIGHTS: RoleWeights = RoleWeights {
    win: 0.70,
    goals: 0.05,
    assists: 0.05,
    appearances: 0.20,
};

const OUTFIELD_WEIGHTS: RoleWeights = RoleWeights {
    win: 0.55,
    goals: 0.22,
    assists: 0.13,
    appearances: 0.10,
};

impl Role {
    pub fn from_position(position: &str) -> Self {
        match position.trim().to_ascii_uppercase().as_str() {
            "GK" | "P" | "P/GK" => Role::Goalkeeper,
            _ => Role::Outfield,
        }
    }

    pub fn weights(self) -> RoleWeights {
        match self {
            Role::Goalkeeper => GOALKEEPER_WEIGHTS,
            Role::Outfield => OUTFIELD_WEIGHTS,
        }
    }
}

/// How the final 0..1 score is shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingScale {
    /// 60-100, the gold-card look.
    #[default]
    Compressed,
    /// 0-100.
    Full,
}

impl RatingScale {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compressed" | "60-100" | "card" => Some(Self::Compressed),
            "full" | "0-100" | "raw" => Some(Self::Full),
            _ => None,
        }
    }

    pub fn to_display(self, final01: f64) -> u8 {
        let v = clamp01(final01);
        let shown = match self {
            RatingScale::Compressed => 60.0 + 40.0 * v,
            RatingScale::Full => 100.0 * v,
        };
        shown.round() as u8
    }
}

/// Every rating input squeezed into [0,1]. Shared with the attribute mapper so both
/// read the same caps and the same reliability.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingInputs {
    pub win_conservative: f64,
    pub goals01: f64,
    pub assists01: f64,
    pub appearances01: f64,
    pub reliability: f64,
}

impl RatingInputs {
    pub fn new(
        win_conservative01: f64,
        assists_per_match: f64,
        goals_per_match: f64,
        appearances: u32,
        peers: &PeerStats,
        cfg: &EngineConfig,
    ) -> Self {
        if appearances == 0 {
            // No matches: per-match rates carry no evidence.
            return Self::default();
        }
        let cap = if cfg.stat_cap > 0.0 { cfg.stat_cap } else { 1.0 };
        Self {
            win_conservative: clamp01(win_conservative01),
            goals01: clamp01(goals_per_match / cap),
            assists01: clamp01(assists_per_match / cap),
            appearances01: clamp01(appearances as f64 / peers.max_reference()),
            reliability: reliability(appearances, peers.reference(cfg.reference), cfg.gamma),
        }
    }

    /// Weighted sum before damping.
    pub fn base01(&self, role: Role) -> f64 {
        let w = role.weights();
        w.win * self.win_conservative
            + w.goals * self.goals01
            + w.assists * self.assists01
            + w.appearances * self.appearances01
    }

    pub fn final01(&self, role: Role) -> f64 {
        clamp01(self.base01(role) * self.reliability)
    }
}

pub fn compute_rating(
    position: &str,
    win_conservative01: f64,
    assists_per_match: f64,
    goals_per_match: f64,
    appearances: u32,
    peers: &PeerStats,
    cfg: &EngineConfig,
) -> u8 {
    let inputs = RatingInputs::new(
        win_conservative01,
        assists_per_match,
        goals_per_match,
        appearances,
        peers,
        cfg,
    );
    cfg.scale
        .to_display(inputs.final01(Role::from_position(position)))
}
