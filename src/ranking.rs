//! Proximity ranking
use crate::{
    geodesy::distance_3d,
    position::{GeodeticPoint, ObserverPosition},
    satellite::SatelliteRecord,
};

use itertools::Itertools;
use log::{debug, trace};

/// [SatelliteRecord] tied to its distance to the observer
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSatellite {
    pub record: SatelliteRecord,
    /// Position the distance was computed from
    pub point: GeodeticPoint,
    /// 3D distance to the observer, in whole km
    pub distance_km: f64,
}

impl RankedSatellite {
    pub fn id(&self) -> u64 {
        self.record.id
    }
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Satellites sorted by increasing distance, closest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedSet(Vec<RankedSatellite>);

impl RankedSet {
    /// Returns the closest satellite, if any
    pub fn closest(&self) -> Option<&RankedSatellite> {
        self.0.first()
    }
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> std::slice::Iter<'_, RankedSatellite> {
        self.0.iter()
    }
    pub fn as_slice(&self) -> &[RankedSatellite] {
        &self.0
    }
}

impl std::ops::Index<usize> for RankedSet {
    type Output = RankedSatellite;
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a RankedSet {
    type Item = &'a RankedSatellite;
    type IntoIter = std::slice::Iter<'a, RankedSatellite>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Ranks the satellites by distance to the observer, and retains the
/// `limit` closest ones. Records lacking latitude or longitude are dropped
/// before truncation. Equal distances preserve the provider order.
pub fn rank(observer: &ObserverPosition, raw: &[SatelliteRecord], limit: usize) -> RankedSet {
    let reference = observer.to_geodetic_point();

    let ranked = raw
        .iter()
        .filter_map(|record| match record.geodetic_point() {
            Some(point) => Some(RankedSatellite {
                record: record.clone(),
                point,
                distance_km: distance_3d(&reference, &point),
            }),
            None => {
                trace!("{}: incomplete position", record);
                None
            },
        })
        // stable: ties keep provider order
        .sorted_by(|a, b| a.distance_km.total_cmp(&b.distance_km))
        .take(limit)
        .collect::<Vec<_>>();

    debug!(
        "ranked {}/{} satellites (closest: {:?})",
        ranked.len(),
        raw.len(),
        ranked.first().map(|sat| (sat.record.id, sat.distance_km)),
    );

    RankedSet(ranked)
}
