//! Refresh cycle orchestration.
//!
//! One cycle: locate the observer, fetch the satellites above, rank them,
//! reconcile the map. Failures end the cycle without touching the map.
use crate::{
    cfg::{Config, ConfigError},
    map::{MapHandle, MapSurface},
    position::{ObserverPosition, PositionFix},
    ranking::{rank, RankedSet},
    relay::{parse_response, SatelliteRelay, SatelliteRequest},
    Error,
};

use hifitime::Epoch;
use log::{debug, error, info, warn};

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// A [PositionSource] provides the current observer fix.
/// The call may block, bounded by the platform location timeout.
pub trait PositionSource {
    fn locate(&mut self) -> Result<PositionFix, Error>;
}

/// Shared busy indicator, set for the whole duration of a cycle.
/// Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct LoadingFlag(Arc<AtomicBool>);

impl LoadingFlag {
    pub fn is_loading(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
    /*
     * Raises the flag, returns false if it was already raised
     */
    pub(crate) fn raise(&self) -> bool {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }
    pub(crate) fn clear(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Lowers the [LoadingFlag] when dropped, unwinding included
struct LoadingGuard<'a>(&'a LoadingFlag);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

/// Reason a cycle failed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Position could not be acquired (or was invalid)
    Locating,
    /// Relay failed or replied with something unusable
    Fetching,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CycleState {
    #[default]
    Idle,
    Locating,
    Fetching,
    Ranking,
    Rendering,
    Failed(FailureKind),
}

impl std::fmt::Display for CycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Locating => f.write_str("locating"),
            Self::Fetching => f.write_str("fetching"),
            Self::Ranking => f.write_str("ranking"),
            Self::Rendering => f.write_str("rendering"),
            Self::Failed(FailureKind::Locating) => f.write_str("failed (locating)"),
            Self::Failed(FailureKind::Fetching) => f.write_str("failed (fetching)"),
        }
    }
}

/// Successful cycle summary
#[derive(Debug, Clone, PartialEq)]
pub struct RefreshReport {
    pub observer: ObserverPosition,
    pub ranked: RankedSet,
    /// Completion time, when the system clock is available
    pub completed_at: Option<Epoch>,
}

/// Cycle outcome
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Map now reflects the new ranking
    Rendered(RefreshReport),
    /// Cycle failed, map left untouched
    Failed(Error),
    /// Another cycle was in flight, nothing was done
    Rejected(Error),
}

impl Outcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered(_))
    }
}

/// [Refresher] runs refresh cycles, end to end.
pub struct Refresher<P: PositionSource, R: SatelliteRelay, S: MapSurface> {
    cfg: Config,
    source: P,
    relay: R,
    surface: Option<S>,
    map: Option<MapHandle<S>>,
    state: CycleState,
    loading: LoadingFlag,
    last_error: Option<Error>,
}

impl<P: PositionSource, R: SatelliteRelay, S: MapSurface> Refresher<P, R, S> {
    /// Builds a new [Refresher]. The map is initialized on the
    /// first successful cycle. Fails if [Config] is not valid.
    pub fn new(cfg: Config, source: P, relay: R, surface: S) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            source,
            relay,
            surface: Some(surface),
            map: None,
            state: CycleState::Idle,
            loading: LoadingFlag::default(),
            last_error: None,
        })
    }

    /// Uses given busy flag, owned by the presentation layer
    pub fn with_loading_flag(mut self, loading: LoadingFlag) -> Self {
        self.loading = loading;
        self
    }

    /// Shares the busy flag with the presentation layer
    pub fn loading_flag(&self) -> LoadingFlag {
        self.loading.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Current (or final) state of the latest cycle
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Cause of the latest failed cycle, cleared on success
    pub fn last_error(&self) -> Option<&Error> {
        self.last_error.as_ref()
    }

    pub fn is_map_initialized(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&MapHandle<S>> {
        self.map.as_ref()
    }

    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    /// Forwards a container resize to the map, if any
    pub fn resize(&mut self) {
        if let Some(map) = self.map.as_mut() {
            map.resize();
        }
    }

    /// Runs one refresh cycle. Errors never escape: they are logged,
    /// recorded and returned as [Outcome::Failed].
    /// A refresh requested while the busy flag is raised is rejected.
    pub fn refresh(&mut self) -> Outcome {
        if !self.loading.raise() {
            warn!("refresh rejected: cycle in progress");
            return Outcome::Rejected(Error::RefreshInProgress);
        }

        let loading = self.loading.clone();
        let _guard = LoadingGuard(&loading);

        match self.run_cycle() {
            Ok(report) => {
                self.transition(CycleState::Idle);
                self.last_error = None;
                Outcome::Rendered(report)
            },
            Err((kind, e)) => {
                error!("refresh failed: {}", e);
                self.transition(CycleState::Failed(kind));
                self.last_error = Some(e.clone());
                Outcome::Failed(e)
            },
        }
    }

    fn transition(&mut self, state: CycleState) {
        debug!("{} -> {}", self.state, state);
        self.state = state;
    }

    fn run_cycle(&mut self) -> Result<RefreshReport, (FailureKind, Error)> {
        self.transition(CycleState::Locating);
        let observer = self.locate().map_err(|e| (FailureKind::Locating, e))?;

        self.transition(CycleState::Fetching);
        let raw = self
            .relay
            .fetch(&SatelliteRequest::from(&observer))
            .and_then(|body| parse_response(&body))
            .map_err(|e| (FailureKind::Fetching, e))?;

        self.transition(CycleState::Ranking);
        let ranked = rank(&observer, &raw, self.cfg.top_n);

        self.transition(CycleState::Rendering);
        self.render(&observer, &ranked);

        info!(
            "{}: {} satellites ranked, closest: {}",
            observer,
            ranked.len(),
            ranked
                .closest()
                .map(|sat| format!("{} at {} km", sat.record, sat.distance_km))
                .unwrap_or_else(|| "none".to_string()),
        );

        Ok(RefreshReport {
            observer,
            ranked,
            completed_at: Epoch::now().ok(),
        })
    }

    fn locate(&mut self) -> Result<ObserverPosition, Error> {
        let fix = self.source.locate()?;
        ObserverPosition::from_fix(&fix)
    }

    fn render(&mut self, observer: &ObserverPosition, ranked: &RankedSet) {
        if let Some(map) = self.map.as_mut() {
            map.reconcile(observer, ranked);
        } else if let Some(surface) = self.surface.take() {
            let mut map = MapHandle::initialize(surface, observer, &self.cfg.map);
            map.reconcile(observer, ranked);
            self.map = Some(map);
        }
    }
}
