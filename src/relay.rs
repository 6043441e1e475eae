//! Satellite data relay exchange.
//!
//! The relay forwards the observer coordinates to the satellite position
//! provider. It is an external collaborator: this module only describes
//! what goes in and out of it, and how its reply is consumed.
use crate::{cfg::Config, position::ObserverPosition, satellite::SatelliteRecord, Error};

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a satellite data request
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SatelliteRequest {
    pub observer_latitude: f64,
    pub observer_longitude: f64,
    /// Observer altitude in meters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observer_altitude: Option<f64>,
}

impl From<&ObserverPosition> for SatelliteRequest {
    fn from(observer: &ObserverPosition) -> Self {
        Self {
            observer_latitude: observer.latitude,
            observer_longitude: observer.longitude,
            observer_altitude: Some(observer.altitude),
        }
    }
}

impl SatelliteRequest {
    /// Serializes Self to the relay's JSON body
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| Error::FetchFailed(e.to_string()))
    }
}

/// A [SatelliteRelay] answers a [SatelliteRequest] with the raw reply body.
/// Transport failures and non successful statuses are reported
/// as [Error::FetchFailed]. The call may block for as long as the relay
/// takes to answer.
pub trait SatelliteRelay {
    fn fetch(&mut self, request: &SatelliteRequest) -> Result<String, Error>;
}

/// Consumes a relay reply. Only a JSON array is accepted: anything else
/// fails the whole reply, nothing is partially consumed.
/// Array entries that do not describe a satellite are skipped.
pub fn parse_response(body: &str) -> Result<Vec<SatelliteRecord>, Error> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| Error::InvalidResponseShape(e.to_string()))?;

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(ref map) => {
            let reason = map
                .get("error")
                .and_then(|e| e.as_str())
                .unwrap_or("not an array");
            return Err(Error::InvalidResponseShape(reason.to_string()));
        },
        _ => return Err(Error::InvalidResponseShape("not an array".to_string())),
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<SatelliteRecord>(entry) {
            Ok(record) => Some(record),
            Err(e) => {
                trace!("skipping malformed entry: {}", e);
                None
            },
        })
        .collect())
}

/// Provider "what's up" query, as issued by the relay
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AboveQuery {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: f64,
    /// Search radius, in degrees above the horizon
    pub search_radius_deg: u16,
    /// Provider category id
    pub category: u16,
}

impl AboveQuery {
    /// Builds the query for given request. A missing altitude is 0.
    pub fn new(request: &SatelliteRequest, cfg: &Config) -> Self {
        Self {
            latitude: request.observer_latitude,
            longitude: request.observer_longitude,
            altitude: request.observer_altitude.unwrap_or(0.0),
            search_radius_deg: cfg.search_radius_deg,
            category: cfg.category,
        }
    }
    /// Returns the provider API path for this query
    pub fn path(&self) -> String {
        format!(
            "satellite/above/{}/{}/{}/{}/{}",
            self.latitude, self.longitude, self.altitude, self.search_radius_deg, self.category
        )
    }
}

/// Provider query summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboveInfo {
    #[serde(default)]
    pub category: String,
    #[serde(rename = "transactionscount", default)]
    pub transactions: u32,
    #[serde(rename = "satcount", default)]
    pub satellites: u32,
}

/// Provider reply envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AboveResponse {
    #[serde(default)]
    pub info: AboveInfo,
    #[serde(default)]
    pub above: Option<Vec<Value>>,
}

impl AboveResponse {
    /// Converts the provider envelope to the relay reply body:
    /// the bare `above` array, or an error object when it is missing.
    pub fn into_relay_body(self) -> String {
        match self.above {
            Some(above) => Value::Array(above).to_string(),
            None => serde_json::json!({ "error": "No data found" }).to_string(),
        }
    }
}
