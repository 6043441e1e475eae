//! Constant values used across the crate

/// Mean Earth radius used by the haversine formula, in km
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Meters to kilometers
pub(crate) const KM_PER_M: f64 = 1.0E-3;

/// Default ranked set size
pub const DEFAULT_TOP_N: usize = 10;

/// Default relay search radius, in degrees above the horizon
pub const DEFAULT_SEARCH_RADIUS_DEG: u16 = 90;

/// Default relay category filter (provider id)
pub const DEFAULT_CATEGORY: u16 = 52;

/// Category given to records the provider did not classify
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Default map zoom level
pub const DEFAULT_MAP_ZOOM: u8 = 2;

/// Closest-link line width
pub(crate) const CLOSEST_LINK_WEIGHT: f64 = 10.0;
