//! Raw satellite records, as reported by the provider
use crate::constants::UNKNOWN_CATEGORY;
use crate::position::GeodeticPoint;
use serde::{Deserialize, Deserializer, Serialize};

/// [SatelliteRecord] describes one satellite currently above the observer.
/// Field names follow the provider's JSON. Positions may be incomplete,
/// such records are simply not ranked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteRecord {
    /// Catalog number
    #[serde(rename = "satid", default)]
    pub id: u64,
    #[serde(rename = "satname", default)]
    pub name: String,
    /// Provider category, "Unknown" when absent
    #[serde(
        default = "unknown_category",
        deserialize_with = "category_or_unknown"
    )]
    pub category: String,
    /// International designator (COSPAR)
    #[serde(rename = "intDesignator", default, skip_serializing_if = "Option::is_none")]
    pub int_designator: Option<String>,
    #[serde(rename = "launchDate", default, skip_serializing_if = "Option::is_none")]
    pub launch_date: Option<String>,
    /// Latitude in decimal degrees
    #[serde(rename = "satlat", default)]
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees
    #[serde(rename = "satlng", default)]
    pub longitude: Option<f64>,
    /// Altitude in km
    #[serde(rename = "satalt", default)]
    pub altitude: Option<f64>,
}

fn unknown_category() -> String {
    UNKNOWN_CATEGORY.to_string()
}

fn category_or_unknown<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let category = Option::<String>::deserialize(deserializer)?;
    Ok(category
        .filter(|c| !c.is_empty())
        .unwrap_or_else(unknown_category))
}

impl SatelliteRecord {
    /// Builds a complete record, category is "Unknown"
    pub fn new(id: u64, name: &str, latitude: f64, longitude: f64, altitude_km: f64) -> Self {
        Self {
            id,
            name: name.to_string(),
            category: unknown_category(),
            int_designator: None,
            launch_date: None,
            latitude: Some(latitude),
            longitude: Some(longitude),
            altitude: Some(altitude_km),
        }
    }
    /// Copies and returns Self with given category
    pub fn with_category(&self, category: &str) -> Self {
        let mut s = self.clone();
        s.category = category.to_string();
        s
    }
    /// Returns [GeodeticPoint] of this satellite, if both latitude
    /// and longitude are known (and finite). A missing altitude is 0 km.
    pub fn geodetic_point(&self) -> Option<GeodeticPoint> {
        let lat = self.latitude.filter(|lat| lat.is_finite())?;
        let lon = self.longitude.filter(|lon| lon.is_finite())?;
        let alt = self.altitude.filter(|alt| alt.is_finite()).unwrap_or(0.0);
        Some(GeodeticPoint::new(lat, lon, alt))
    }
}

impl std::fmt::Display for SatelliteRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
