use std::fmt;

use serde::{Deserialize, Serialize};

/// One independently scored risk category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hazard {
    Earthquake,
    Flood,
    Wildfire,
}

impl Hazard {
    /// Dashboard order, left to right.
    pub const ALL: [Hazard; 3] = [Hazard::Earthquake, Hazard::Flood, Hazard::Wildfire];

    /// Key used in prediction payloads (`earthquake`, `flood`, `wildfire`).
    pub const fn wire_key(self) -> &'static str {
        match self {
            Self::Earthquake => "earthquake",
            Self::Flood => "flood",
            Self::Wildfire => "wildfire",
        }
    }

    /// Short id used for DOM element ids (`fill-eq`, `risk-fire`, ...).
    pub const fn dom_id(self) -> &'static str {
        match self {
            Self::Earthquake => "eq",
            Self::Flood => "flood",
            Self::Wildfire => "fire",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Earthquake => "Earthquake",
            Self::Flood => "Flood",
            Self::Wildfire => "Wildfire",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Earthquake => 0,
            Self::Flood => 1,
            Self::Wildfire => 2,
        }
    }
}

impl fmt::Display for Hazard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_key())
    }
}

/// A validated map click. Only constructed through `validate::validate_coordinate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    pub(crate) const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// `"lat, lng"` with exactly four decimals each.
    pub fn display(&self) -> String {
        format_lat_lng(self.latitude, self.longitude)
    }
}

pub(crate) fn format_lat_lng(latitude: f64, longitude: f64) -> String {
    format!("{latitude:.4}, {longitude:.4}")
}

/// Risk score for a single hazard after normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RiskAssessment {
    /// 0..=100 percentage as reported by the server (not clamped here).
    pub probability: f64,
    pub level: Option<String>,
    pub message: Option<String>,
    pub nearby_count: Option<u64>,
}

/// Server-computed aggregate. Display-only.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OverallRisk {
    pub risk_level: Option<String>,
    pub max_probability: Option<f64>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationInfo {
    pub coordinates: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationInfo {
    pub fn from_coordinate(coord: &Coordinate) -> Self {
        Self {
            coordinates: coord.display(),
            latitude: Some(coord.latitude()),
            longitude: Some(coord.longitude()),
        }
    }
}

/// The single normalized unit handed from the normalizer to the projector.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    pub earthquake: RiskAssessment,
    pub flood: RiskAssessment,
    pub wildfire: RiskAssessment,
    pub overall: Option<OverallRisk>,
    pub location: Option<LocationInfo>,
    pub timestamp: Option<String>,
}

impl PredictionResult {
    pub fn risk(&self, hazard: Hazard) -> &RiskAssessment {
        match hazard {
            Hazard::Earthquake => &self.earthquake,
            Hazard::Flood => &self.flood,
            Hazard::Wildfire => &self.wildfire,
        }
    }

    pub fn max_probability(&self) -> f64 {
        self.earthquake
            .probability
            .max(self.flood.probability)
            .max(self.wildfire.probability)
    }
}
