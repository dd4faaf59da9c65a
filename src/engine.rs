//! Raw sheet rows in, card profiles out.
//!
//! The pass has exactly one barrier: appearances are reduced to [`PeerStats`]
//! first, then every record is derived independently (in parallel).

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::attributes::{Attributes, DefenseRole, compute_attributes};
use crate::config::EngineConfig;
use crate::confidence::conservative_win_rate;
use crate::normalize::{normalize_int, normalize_percent01, normalize_rate};
use crate::rating::{RatingInputs, Role};
use crate::reliability::PeerStats;

/// One player row as it comes off the sheet, cells untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlayerRecord {
    pub surname: String,
    pub position: String,
    pub appearances: String,
    pub win_rate: String,
    pub assists_per_match: String,
    pub goals_per_match: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStats {
    pub appearances: u32,
    pub win_rate01: f64,
    pub assists_per_match: f64,
    pub goals_per_match: f64,
    pub position: String,
}

impl NormalizedStats {
    pub fn from_raw(raw: &RawPlayerRecord) -> Self {
        Self {
            appearances: normalize_int(&raw.appearances),
            win_rate01: normalize_percent01(&raw.win_rate),
            assists_per_match: normalize_rate(&raw.assists_per_match),
            goals_per_match: normalize_rate(&raw.goals_per_match),
            position: raw.position.trim().to_ascii_uppercase(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPlayerProfile {
    pub id: String,
    pub name: String,
    pub position: String,
    pub appearances: u32,
    pub win_rate: f64,
    pub assists_per_match: f64,
    pub goals_per_match: f64,
    pub rating: u8,
    pub attributes: Attributes,
    pub win_rate_conservative: f64,
    pub reliability: f64,
    pub photo: String,
}

/// Derive one profile per record, in input order.
pub fn derive_profiles(records: &[RawPlayerRecord], cfg: &EngineConfig) -> Vec<DerivedPlayerProfile> {
    let stats: Vec<NormalizedStats> = records.iter().map(NormalizedStats::from_raw).collect();
    let peers = PeerStats::from_appearances(stats.iter().map(|s| s.appearances));
    debug!(
        players = stats.len(),
        max_appearances = peers.max_appearances,
        median_appearances = peers.median_appearances,
        "peer stats reduced"
    );

    records
        .par_iter()
        .zip(stats.par_iter())
        .enumerate()
        .map(|(idx, (raw, norm))| derive_profile(idx, raw, norm, &peers, cfg))
        .collect()
}

pub fn derive_profile(
    idx: usize,
    raw: &RawPlayerRecord,
    stats: &NormalizedStats,
    peers: &PeerStats,
    cfg: &EngineConfig,
) -> DerivedPlayerProfile {
    let win_cons = conservative_win_rate(stats.appearances, stats.win_rate01, cfg.z);
    let inputs = RatingInputs::new(
        win_cons,
        stats.assists_per_match,
        stats.goals_per_match,
        stats.appearances,
        peers,
        cfg,
    );
    let role = Role::from_position(&stats.position);
    let rating = cfg.scale.to_display(inputs.final01(role));
    let attributes = compute_attributes(&inputs, DefenseRole::from_position(&stats.position));

    let surname = raw.surname.trim();
    let name = if surname.is_empty() {
        format!("Player {}", idx + 1)
    } else {
        surname.to_string()
    };

    DerivedPlayerProfile {
        id: profile_id(idx, surname, &stats.position),
        photo: photo_path(surname),
        name,
        position: stats.position.clone(),
        appearances: stats.appearances,
        win_rate: stats.win_rate01,
        assists_per_match: stats.assists_per_match,
        goals_per_match: stats.goals_per_match,
        rating,
        attributes,
        win_rate_conservative: win_cons,
        reliability: inputs.reliability,
    }
}

/// Index prefix keeps ids unique even for duplicate names.
pub fn profile_id(idx: usize, surname: &str, position: &str) -> String {
    format!("{idx}-{surname}-{position}")
}

/// `"De Rossi"` -> `players/de-rossi.png`.
pub fn photo_path(surname: &str) -> String {
    let mut slug = String::with_capacity(surname.len());
    let mut in_space = false;
    for c in surname.to_lowercase().chars() {
        if c.is_whitespace() {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
            continue;
        }
        in_space = false;
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
            slug.push(c);
        }
    }
    format!("players/{slug}.png")
}
