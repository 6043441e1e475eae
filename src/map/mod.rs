//! Map layer reconciliation.
//!
//! [MapHandle] owns the rendering surface and a role keyed view of every
//! layer it created on it. Each refresh is reconciled against that view,
//! so layers never accumulate from one cycle to the next.
use crate::{
    cfg::MapConfig,
    constants::CLOSEST_LINK_WEIGHT,
    position::ObserverPosition,
    ranking::{RankedSatellite, RankedSet},
};

use log::debug;
use std::collections::BTreeMap;

pub mod plot;

/// Surface specific layer identifier
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl std::fmt::Display for LayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "layer#{}", self.0)
    }
}

/// Role a layer plays on the map
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LayerRole {
    /// Base tiles, never removed
    Base,
    Observer,
    /// Satellite marker, by rank (0 is the closest)
    Satellite(usize),
    /// Highlight of the closest satellite
    ClosestSatellite,
    /// Line from the observer to the closest satellite
    ClosestLink,
}

impl LayerRole {
    /// Persistent layers survive reconciliation
    pub fn is_persistent(&self) -> bool {
        matches!(self, Self::Base)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MarkerIcon {
    Observer,
    Satellite,
    ClosestSatellite,
}

/// Hover information attached to a marker
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub title: String,
    pub fields: Vec<(String, String)>,
}

impl Tooltip {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            fields: Vec::new(),
        }
    }
    fn field(mut self, name: &str, value: String) -> Self {
        self.fields.push((name.to_string(), value));
        self
    }
    fn observer(observer: &ObserverPosition) -> Self {
        let (lat_dms, lon_dms) = observer.to_dms();
        Self::new("This is You!")
            .field("Latitude", format!("{}° ({})", observer.latitude, lat_dms))
            .field("Longitude", format!("{}° ({})", observer.longitude, lon_dms))
    }
    fn satellite(title: &str, sat: &RankedSatellite) -> Self {
        Self::new(title)
            .field("Satellite", sat.record.name.clone())
            .field("Latitude", format!("{}°", sat.point.latitude_ddeg))
            .field("Longitude", format!("{}°", sat.point.longitude_ddeg))
            .field("Altitude", format!("{} km", sat.point.altitude_km))
            .field("Distance From You", format!("{} km", sat.distance_km))
    }
}

impl std::fmt::Display for Tooltip {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "<b>{}</b>", self.title)?;
        for (name, value) in self.fields.iter() {
            write!(f, "<br><b>{}:</b> {}", name, value)?;
        }
        Ok(())
    }
}

/// Layer description, handed to the [MapSurface]
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Tiles {
        style: String,
    },
    Marker {
        /// (latitude, longitude) in decimal degrees
        position: (f64, f64),
        icon: MarkerIcon,
        tooltip: Tooltip,
    },
    Polyline {
        /// (latitude, longitude) vertices, in decimal degrees
        points: Vec<(f64, f64)>,
        color: String,
        weight: f64,
    },
}

impl Layer {
    fn observer_marker(observer: &ObserverPosition) -> Self {
        Self::Marker {
            position: (observer.latitude, observer.longitude),
            icon: MarkerIcon::Observer,
            tooltip: Tooltip::observer(observer),
        }
    }
    fn satellite_marker(sat: &RankedSatellite) -> Self {
        Self::Marker {
            position: (sat.point.latitude_ddeg, sat.point.longitude_ddeg),
            icon: MarkerIcon::Satellite,
            tooltip: Tooltip::satellite("Satellite", sat),
        }
    }
    fn closest_marker(sat: &RankedSatellite) -> Self {
        Self::Marker {
            position: (sat.point.latitude_ddeg, sat.point.longitude_ddeg),
            icon: MarkerIcon::ClosestSatellite,
            tooltip: Tooltip::satellite("Closest Satellite", sat),
        }
    }
    fn closest_link(observer: &ObserverPosition, sat: &RankedSatellite) -> Self {
        Self::Polyline {
            points: vec![
                (observer.latitude, observer.longitude),
                (sat.point.latitude_ddeg, sat.point.longitude_ddeg),
            ],
            color: "green".to_string(),
            weight: CLOSEST_LINK_WEIGHT,
        }
    }
}

/// Rendering surface providing marker and line primitives.
/// [MapHandle] is its only writer.
pub trait MapSurface {
    /// Draws a new layer and returns its identifier
    fn add_layer(&mut self, layer: Layer) -> LayerId;
    /// Removes a previously drawn layer
    fn remove_layer(&mut self, id: LayerId);
    /// Centers the view, latitude and longitude in decimal degrees
    fn set_view(&mut self, center: (f64, f64), zoom: u8);
    /// Recomputes the viewport size, after the container was resized
    fn invalidate_size(&mut self);
}

/// Initialized map. Callers must not reconcile the same handle concurrently.
#[derive(Debug)]
pub struct MapHandle<S: MapSurface> {
    surface: S,
    layers: BTreeMap<LayerRole, LayerId>,
}

impl<S: MapSurface> MapHandle<S> {
    /// Initializes the map on given surface: centers the view on the
    /// observer, adds the base tiles and the observer marker.
    /// The surface is consumed, a map can only be initialized once.
    pub fn initialize(surface: S, observer: &ObserverPosition, cfg: &MapConfig) -> Self {
        let mut handle = Self {
            surface,
            layers: BTreeMap::new(),
        };
        handle
            .surface
            .set_view((observer.latitude, observer.longitude), cfg.zoom);
        handle.place(
            LayerRole::Base,
            Layer::Tiles {
                style: cfg.style.clone(),
            },
        );
        handle.reconcile(observer, &RankedSet::default());
        debug!("map initialized at {}", observer);
        handle
    }

    /// Brings the map in line with the latest ranked set.
    /// On return there is exactly one observer marker, one marker per
    /// ranked satellite, and the closest satellite highlight and link
    /// exist only if the set is not empty.
    pub fn reconcile(&mut self, observer: &ObserverPosition, ranked: &RankedSet) {
        let stale = self
            .layers
            .keys()
            .filter(|role| !role.is_persistent())
            .copied()
            .collect::<Vec<_>>();

        for role in stale.iter() {
            if let Some(id) = self.layers.remove(role) {
                self.surface.remove_layer(id);
            }
        }

        self.place(LayerRole::Observer, Layer::observer_marker(observer));

        for (index, sat) in ranked.iter().enumerate() {
            self.place(LayerRole::Satellite(index), Layer::satellite_marker(sat));
        }

        if let Some(closest) = ranked.closest() {
            self.place(LayerRole::ClosestSatellite, Layer::closest_marker(closest));
            self.place(LayerRole::ClosestLink, Layer::closest_link(observer, closest));
        }

        debug!(
            "map reconciled: {} stale layers removed, {} satellites drawn",
            stale.len(),
            ranked.len()
        );
    }

    /// Forwards a container resize to the surface.
    /// Unrelated to reconciliation.
    pub fn resize(&mut self) {
        self.surface.invalidate_size();
    }

    /// Returns the underlying surface
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Tears the map down, returning the surface
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Layer currently tied to given role
    #[cfg(test)]
    pub(crate) fn layer(&self, role: LayerRole) -> Option<LayerId> {
        self.layers.get(&role).copied()
    }

    /*
     * Draws the layer and ties it to given role,
     * replacing whatever previously held that role
     */
    fn place(&mut self, role: LayerRole, layer: Layer) {
        let id = self.surface.add_layer(layer);
        if let Some(previous) = self.layers.insert(role, id) {
            self.surface.remove_layer(previous);
        }
    }
}
