//! HTML map surface, rendered with plotly
use super::{Layer, LayerId, MapSurface, MarkerIcon};
use log::trace;
use std::collections::BTreeMap;

use plotly::{
    color::NamedColor,
    common::{HoverInfo, Line, Marker, MarkerSymbol, Mode},
    layout::{Center, DragMode, Mapbox, MapboxStyle, Margin},
    Layout, Plot, ScatterMapbox,
};

/// [MapSurface] drawing on a plotly world map
#[derive(Debug, Clone)]
pub struct PlotlyMap {
    next_id: u64,
    center: (f64, f64),
    zoom: u8,
    resized: usize,
    layers: BTreeMap<LayerId, Layer>,
}

impl Default for PlotlyMap {
    fn default() -> Self {
        Self {
            next_id: 0,
            center: (0.0, 0.0),
            zoom: 1,
            resized: 0,
            layers: BTreeMap::new(),
        }
    }
}

impl MapSurface for PlotlyMap {
    fn add_layer(&mut self, layer: Layer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        trace!("{}: {:?}", id, layer);
        self.layers.insert(id, layer);
        id
    }
    fn remove_layer(&mut self, id: LayerId) {
        self.layers.remove(&id);
    }
    fn set_view(&mut self, center: (f64, f64), zoom: u8) {
        self.center = center;
        self.zoom = zoom;
    }
    fn invalidate_size(&mut self) {
        self.resized += 1;
    }
}

fn mapbox_style(style: &str) -> MapboxStyle {
    match style {
        "carto-darkmatter" => MapboxStyle::CartoDarkMatter,
        "carto-positron" => MapboxStyle::CartoPositron,
        "white-bg" => MapboxStyle::WhiteBg,
        _ => MapboxStyle::OpenStreetMap,
    }
}

/*
 * Marker (size, color) per icon
 */
fn marker_style(icon: MarkerIcon) -> (usize, NamedColor) {
    match icon {
        MarkerIcon::Observer => (20, NamedColor::DodgerBlue),
        MarkerIcon::Satellite => (12, NamedColor::White),
        MarkerIcon::ClosestSatellite => (14, NamedColor::LimeGreen),
    }
}

impl PlotlyMap {
    /// Number of layers currently drawn
    pub fn len(&self) -> usize {
        self.layers.len()
    }
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
    /// Iterates the layers currently drawn, in drawing order
    pub fn layers(&self) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.values()
    }
    /// Number of viewport invalidations so far
    pub fn resized(&self) -> usize {
        self.resized
    }
    /// Builds the plotly world map for the layers currently drawn
    pub fn to_plot(&self) -> Plot {
        let style = self
            .layers
            .values()
            .find_map(|layer| match layer {
                Layer::Tiles { style } => Some(mapbox_style(style)),
                _ => None,
            })
            .unwrap_or(MapboxStyle::OpenStreetMap);

        let layout = Layout::new()
            .drag_mode(DragMode::Zoom)
            .margin(Margin::new().top(0).left(0).bottom(0).right(0))
            .show_legend(false)
            .mapbox(
                Mapbox::new()
                    .style(style)
                    .center(Center::new(self.center.0, self.center.1))
                    .zoom(self.zoom),
            );

        let mut plot = Plot::new();
        plot.set_layout(layout);

        for layer in self.layers.values() {
            match layer {
                Layer::Tiles { .. } => {},
                Layer::Marker {
                    position,
                    icon,
                    tooltip,
                } => {
                    let (size, color) = marker_style(*icon);
                    let trace = ScatterMapbox::new(vec![position.0], vec![position.1])
                        .mode(Mode::Markers)
                        .marker(
                            Marker::new()
                                .size(size)
                                .symbol(MarkerSymbol::Circle)
                                .color(color),
                        )
                        .hover_info(HoverInfo::Text)
                        .hover_text_array(vec![tooltip.to_string()])
                        .name(&tooltip.title);
                    plot.add_trace(trace);
                },
                Layer::Polyline {
                    points,
                    color,
                    weight,
                } => {
                    let lat = points.iter().map(|p| p.0).collect::<Vec<_>>();
                    let lon = points.iter().map(|p| p.1).collect::<Vec<_>>();
                    let trace = ScatterMapbox::new(lat, lon)
                        .mode(Mode::Lines)
                        .line(Line::new().color(color.clone()).width(*weight))
                        .hover_info(HoverInfo::Skip)
                        .name("Closest link");
                    plot.add_trace(trace);
                },
            }
        }
        plot
    }
    /// Renders the map as an inline HTML fragment
    pub fn render_html(&self, div_id: &str) -> String {
        self.to_plot().to_inline_html(Some(div_id))
    }
}
