use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad climate band used by the recommendation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClimateZone {
    Tropical,
    Subtropical,
    #[serde(rename = "Semi-arid")]
    SemiArid,
    Temperate,
    Arid,
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ClimateZone::Tropical => "Tropical",
            ClimateZone::Subtropical => "Subtropical",
            ClimateZone::SemiArid => "Semi-arid",
            ClimateZone::Temperate => "Temperate",
            ClimateZone::Arid => "Arid",
        };
        f.write_str(label)
    }
}

const STATE_CLIMATE: &[(&str, ClimateZone)] = &[
    ("rajasthan", ClimateZone::SemiArid),
    ("gujarat", ClimateZone::SemiArid),
    ("telangana", ClimateZone::SemiArid),
    ("andhra pradesh", ClimateZone::SemiArid),
    ("kerala", ClimateZone::Tropical),
    ("tamil nadu", ClimateZone::Tropical),
    ("karnataka", ClimateZone::Tropical),
    ("goa", ClimateZone::Tropical),
    ("maharashtra", ClimateZone::Tropical),
    ("odisha", ClimateZone::Tropical),
    ("west bengal", ClimateZone::Subtropical),
    ("bihar", ClimateZone::Subtropical),
    ("uttar pradesh", ClimateZone::Subtropical),
    ("jharkhand", ClimateZone::Subtropical),
    ("assam", ClimateZone::Subtropical),
    ("meghalaya", ClimateZone::Subtropical),
    ("tripura", ClimateZone::Subtropical),
    ("nagaland", ClimateZone::Subtropical),
    ("manipur", ClimateZone::Subtropical),
    ("mizoram", ClimateZone::Subtropical),
    ("arunachal pradesh", ClimateZone::Subtropical),
    ("sikkim", ClimateZone::Subtropical),
    ("madhya pradesh", ClimateZone::SemiArid),
    ("chhattisgarh", ClimateZone::Subtropical),
    ("punjab", ClimateZone::Subtropical),
    ("haryana", ClimateZone::SemiArid),
    ("himachal pradesh", ClimateZone::Temperate),
    ("uttarakhand", ClimateZone::Temperate),
    ("jammu and kashmir", ClimateZone::Temperate),
    ("ladakh", ClimateZone::Arid),
];

/// Climate band for a canonical state name; unknown regions count as tropical.
pub fn climate_zone(state: &str) -> ClimateZone {
    let key = state.trim().to_lowercase();
    STATE_CLIMATE
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, zone)| *zone)
        .unwrap_or(ClimateZone::Tropical)
}
