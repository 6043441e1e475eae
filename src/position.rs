//! Observer and geodetic positions
use crate::{constants::KM_PER_M, Error};
use dms_coordinates::DMS;
use serde::{Deserialize, Serialize};

/// [GeodeticPoint] is what distances are computed on:
/// latitude and longitude in decimal degrees, altitude in km.
#[derive(Default, Copy, Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct GeodeticPoint {
    pub latitude_ddeg: f64,
    pub longitude_ddeg: f64,
    pub altitude_km: f64,
}

impl GeodeticPoint {
    /// Builds a new [GeodeticPoint]
    pub fn new(latitude_ddeg: f64, longitude_ddeg: f64, altitude_km: f64) -> Self {
        Self {
            latitude_ddeg,
            longitude_ddeg,
            altitude_km,
        }
    }
}

impl From<(f64, f64, f64)> for GeodeticPoint {
    fn from(lla: (f64, f64, f64)) -> Self {
        Self::new(lla.0, lla.1, lla.2)
    }
}

impl From<GeodeticPoint> for (f64, f64, f64) {
    fn from(val: GeodeticPoint) -> Self {
        (val.latitude_ddeg, val.longitude_ddeg, val.altitude_km)
    }
}

/// Raw fix, as returned by a location source.
/// Altitude (in meters) is often missing.
#[derive(Default, Copy, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
}

impl PositionFix {
    /// Builds a fix without altitude information
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }
    /// Copies and returns Self with given altitude, in meters
    pub fn with_altitude(&self, altitude_m: f64) -> Self {
        let mut s = *self;
        s.altitude = Some(altitude_m);
        s
    }
}

/// The user position that serves as distance reference.
/// Created once per refresh cycle and never modified afterwards.
#[derive(Default, Copy, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObserverPosition {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
    /// Altitude in meters, 0 when unknown
    pub altitude: f64,
}

impl ObserverPosition {
    /// Builds a new [ObserverPosition], altitude expressed in meters
    pub fn new(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude,
        }
    }
    /// Builds a validated [ObserverPosition] from a raw [PositionFix].
    /// A missing or non finite altitude is normalized to 0.
    pub fn from_fix(fix: &PositionFix) -> Result<Self, Error> {
        let altitude = fix.altitude.filter(|alt| alt.is_finite()).unwrap_or(0.0);
        let observer = Self::new(fix.latitude, fix.longitude, altitude);
        if observer.is_valid() {
            Ok(observer)
        } else {
            Err(Error::InvalidObserver {
                latitude: fix.latitude,
                longitude: fix.longitude,
            })
        }
    }
    /// Returns true if coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.altitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
    /// Converts Self to a [GeodeticPoint], altitude converted to km
    pub fn to_geodetic_point(&self) -> GeodeticPoint {
        GeodeticPoint::new(self.latitude, self.longitude, self.altitude * KM_PER_M)
    }
    /// Returns (latitude, longitude) in DMS notation
    pub fn to_dms(&self) -> (DMS, DMS) {
        (
            DMS::from_ddeg_latitude(self.latitude),
            DMS::from_ddeg_longitude(self.longitude),
        )
    }
}

impl std::fmt::Display for ObserverPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({:.6}°, {:.6}°, {:.1}m)",
            self.latitude, self.longitude, self.altitude
        )
    }
}
