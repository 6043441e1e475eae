//! Closest satellites overhead.
//!
//! This package ranks the satellites reported above an observer by their
//! true 3D distance, and keeps a map view consistent with the latest
//! ranking, refresh after refresh.
//!
//! Data flows strictly:
//! position -> (relay fetch) -> [SatelliteRecord]s -> [ranking::rank]
//! -> [RankedSet] -> [MapHandle::reconcile].
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cfg;
pub mod constants;
pub mod geodesy;
pub mod map;
pub mod position;
pub mod ranking;
pub mod refresh;
pub mod relay;
pub mod satellite;

#[cfg(test)]
mod tests;

use thiserror::Error;

pub mod prelude {
    pub use crate::cfg::{Config, ConfigError, MapConfig};
    pub use crate::geodesy::{distance_3d, haversine_km};
    pub use crate::map::{
        plot::PlotlyMap, Layer, LayerId, LayerRole, MapHandle, MapSurface, MarkerIcon, Tooltip,
    };
    pub use crate::position::{GeodeticPoint, ObserverPosition, PositionFix};
    pub use crate::ranking::{rank, RankedSatellite, RankedSet};
    pub use crate::refresh::{
        CycleState, FailureKind, LoadingFlag, Outcome, PositionSource, RefreshReport, Refresher,
    };
    pub use crate::relay::{
        parse_response, AboveQuery, AboveResponse, SatelliteRelay, SatelliteRequest,
    };
    pub use crate::satellite::SatelliteRecord;
    pub use crate::Error;
    // Pub re-export
    pub use hifitime::Epoch;
}

/// Refresh cycle errors.
/// Incomplete satellite records are not errors: they are filtered out
/// while ranking.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("location unavailable: {0}")]
    LocationUnavailable(String),
    #[error("invalid observer position (lat={latitude}°, lon={longitude}°)")]
    InvalidObserver { latitude: f64, longitude: f64 },
    #[error("satellite data fetch failed: {0}")]
    FetchFailed(String),
    #[error("invalid relay response: {0}")]
    InvalidResponseShape(String),
    #[error("a refresh is already in progress")]
    RefreshInProgress,
}
