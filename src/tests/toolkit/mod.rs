use crate::prelude::*;
use rand::{distributions::Alphanumeric, Rng};

/* Fake rendering surface */
mod surface;
pub use surface::FakeSurface;

/* Scripted position source & relay */
mod collaborators;
pub use collaborators::{ScriptedPosition, ScriptedRelay};

/*
 * Installs the test logger, once
 */
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/*
 * Random complete satellite record, somewhere in LEO
 */
pub fn random_record<R: Rng>(rng: &mut R, id: u64) -> SatelliteRecord {
    let name = (0..8)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect::<String>();
    SatelliteRecord::new(
        id,
        &name,
        rng.gen_range(-90.0..=90.0),
        rng.gen_range(-180.0..=180.0),
        rng.gen_range(160.0..=2000.0),
    )
}

/*
 * Random valid observer
 */
pub fn random_observer<R: Rng>(rng: &mut R) -> ObserverPosition {
    ObserverPosition::new(
        rng.gen_range(-90.0..=90.0),
        rng.gen_range(-180.0..=180.0),
        rng.gen_range(0.0..=4000.0),
    )
}

/*
 * Relay reply body describing given records
 */
pub fn relay_body(records: &[SatelliteRecord]) -> String {
    serde_json::to_string(records).unwrap()
}

/*
 * Tests that the surface content matches the ranked set
 * the map was last reconciled with
 */
pub fn check_layers(surface: &FakeSurface, ranked: &RankedSet) {
    assert_eq!(surface.base_layers(), 1, "base tiles missing or duplicated");
    assert_eq!(surface.observer_markers(), 1, "observer marker count");
    assert_eq!(
        surface.satellite_markers(),
        ranked.len(),
        "satellite marker count"
    );
    let expected = usize::from(!ranked.is_empty());
    assert_eq!(surface.closest_markers(), expected, "closest marker count");
    assert_eq!(surface.closest_links(), expected, "closest link count");
    assert_eq!(
        surface.len(),
        2 + ranked.len() + 2 * expected,
        "orphaned layers"
    );
}
