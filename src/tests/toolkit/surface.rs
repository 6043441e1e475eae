use crate::map::{Layer, LayerId, MapSurface, MarkerIcon};
use std::collections::BTreeMap;

/// [MapSurface] that only keeps track of what was drawn
#[derive(Debug, Default)]
pub struct FakeSurface {
    next_id: u64,
    pub layers: BTreeMap<LayerId, Layer>,
    pub view: Option<((f64, f64), u8)>,
    pub invalidations: usize,
    pub additions: usize,
    pub removals: usize,
}

impl MapSurface for FakeSurface {
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        self.additions += 1;
        self.layers.insert(id, layer);
        id
    }
    fn remove_layer(&mut self, id: LayerId) {
        assert!(
            self.layers.remove(&id).is_some(),
            "removing unknown layer {}",
            id
        );
        self.removals += 1;
    }
    fn set_view(&mut self, center: (f64, f64), zoom: u8) {
        self.view = Some((center, zoom));
    }
    fn invalidate_size(&mut self) {
        self.invalidations += 1;
    }
}

impl FakeSurface {
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    fn markers(&self, icon: MarkerIcon) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Marker { icon: i, .. } if *i == icon))
            .count()
    }
    pub fn base_layers(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Tiles { .. }))
            .count()
    }
    pub fn observer_markers(&self) -> usize {
        self.markers(MarkerIcon::Observer)
    }
    pub fn satellite_markers(&self) -> usize {
        self.markers(MarkerIcon::Satellite)
    }
    pub fn closest_markers(&self) -> usize {
        self.markers(MarkerIcon::ClosestSatellite)
    }
    pub fn closest_links(&self) -> usize {
        self.layers
            .values()
            .filter(|layer| matches!(layer, Layer::Polyline { .. }))
            .count()
    }
    /// Position of the observer marker, if any
    pub fn observer_position(&self) -> Option<(f64, f64)> {
        self.layers.values().find_map(|layer| match layer {
            Layer::Marker {
                position,
                icon: MarkerIcon::Observer,
                ..
            } => Some(*position),
            _ => None,
        })
    }
}
