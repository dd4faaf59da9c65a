use serde::{Deserialize, Serialize};

use crate::rating::{RatingInputs, Role};

pub const ATTRIBUTE_BASE: f64 = 55.0;
pub const ATTRIBUTE_MIN: u8 = 30;
pub const ATTRIBUTE_MAX: u8 = 99;

const DEFENSIVE_POSITIONS: [&str; 6] = ["CB", "LB", "RB", "LWB", "RWB", "CDM"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Attribute {
    Pac,
    Sho,
    Pas,
    Dri,
    Def,
    Phy,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Pac,
        Attribute::Sho,
        Attribute::Pas,
        Attribute::Dri,
        Attribute::Def,
        Attribute::Phy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Attribute::Pac => "PAC",
            Attribute::Sho => "SHO",
            Attribute::Pas => "PAS",
            Attribute::Dri => "DRI",
            Attribute::Def => "DEF",
            Attribute::Phy => "PHY",
        }
    }
}

impl std::fmt::Display for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Which DEF bonus a player receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefenseRole {
    Defensive,
    NonDefensive,
}

impl DefenseRole {
    pub fn from_position(position: &str) -> Self {
        let p = position.trim().to_ascii_uppercase();
        if DEFENSIVE_POSITIONS.contains(&p.as_str())
            || Role::from_position(&p) == Role::Goalkeeper
        {
            DefenseRole::Defensive
        } else {
            DefenseRole::NonDefensive
        }
    }

    /// Depends on position only, so DEF keeps it even with zero appearances.
    fn bonus(self) -> f64 {
        match self {
            DefenseRole::Defensive => 20.0,
            DefenseRole::NonDefensive => 6.0,
        }
    }
}

/// The six card attributes, serialized as `{"PAC": .., "SHO": .., ..}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Attributes {
    pub pac: u8,
    pub sho: u8,
    pub pas: u8,
    pub dri: u8,
    pub def: u8,
    pub phy: u8,
}

impl Attributes {
    pub fn get(&self, attr: Attribute) -> u8 {
        match attr {
            Attribute::Pac => self.pac,
            Attribute::Sho => self.sho,
            Attribute::Pas => self.pas,
            Attribute::Dri => self.dri,
            Attribute::Def => self.def,
            Attribute::Phy => self.phy,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, u8)> + '_ {
        Attribute::ALL.into_iter().map(|a| (a, self.get(a)))
    }
}

pub fn compute_attributes(inputs: &RatingInputs, defense: DefenseRole) -> Attributes {
    let win = inputs.win_conservative;
    let presence = inputs.reliability;
    let g = inputs.goals01;
    let a = inputs.assists01;

    Attributes {
        pac: stat(20.0 * g + 10.0 * win + 10.0 * presence),
        sho: stat(35.0 * g + 10.0 * win),
        pas: stat(35.0 * a + 8.0 * win),
        dri: stat(22.0 * a + 12.0 * g + 8.0 * win),
        def: stat(defense.bonus() + 14.0 * win + 6.0 * presence),
        phy: stat(18.0 * presence + 12.0 * win),
    }
}

fn stat(delta: f64) -> u8 {
    let v = (ATTRIBUTE_BASE + delta).round();
    v.clamp(ATTRIBUTE_MIN as f64, ATTRIBUTE_MAX as f64) as u8
}
