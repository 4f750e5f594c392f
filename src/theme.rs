use std::fmt;

use serde::{Deserialize, Serialize};

/// Category quota table: `(category tag, desired count)` in draw order.
pub type QuotaTable = &'static [(&'static str, usize)];

const NATURE: QuotaTable = &[
    ("park", 4),
    ("zoo", 5),
    ("theme_park", 5),
    ("viewpoint", 4),
    ("picnic_site", 3),
    ("camp_site", 5),
    ("nature_reserve", 4),
    ("artwork", 2),
];

const ART: QuotaTable = &[
    ("museum", 2),
    ("gallery", 5),
    ("artwork", 2),
    ("attraction", 5),
];

const FOOD: QuotaTable = &[
    ("restaurant", 5),
    ("cafe", 5),
    ("bar", 5),
    ("pub", 5),
    ("food_court", 2),
];

const HISTORY: QuotaTable = &[
    ("museum", 5),
    ("monument", 5),
    ("memorial", 5),
    ("castle", 5),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Nature,
    Art,
    Food,
    History,
    #[serde(alias = "empty", alias = "")]
    None,
}

impl Theme {
    pub fn quotas(self) -> QuotaTable {
        match self {
            Theme::Nature => NATURE,
            Theme::Art => ART,
            Theme::Food => FOOD,
            Theme::History => HISTORY,
            Theme::None => &[],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Nature => "nature",
            Theme::Art => "art",
            Theme::Food => "food",
            Theme::History => "history",
            Theme::None => "none",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the route is travelled; decides how wide the search corridor is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementMode {
    Foot,
    Bike,
    Car,
    #[serde(other)]
    Other,
}

impl MovementMode {
    /// Half of the corridor width, in degrees.
    pub fn half_width(self) -> f64 {
        match self {
            MovementMode::Foot => 0.0125,
            MovementMode::Bike => 0.075,
            MovementMode::Car => 0.3,
            MovementMode::Other => 0.05,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MovementMode::Foot => "foot",
            MovementMode::Bike => "bike",
            MovementMode::Car => "car",
            MovementMode::Other => "other",
        }
    }
}

impl fmt::Display for MovementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
