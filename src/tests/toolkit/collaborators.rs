use crate::prelude::*;
use std::collections::VecDeque;

/// [PositionSource] replaying scripted fixes.
/// Once the script is exhausted, the last fix is repeated.
#[derive(Debug, Default)]
pub struct ScriptedPosition {
    script: VecDeque<Result<PositionFix, Error>>,
    last: Option<Result<PositionFix, Error>>,
    pub calls: usize,
}

impl ScriptedPosition {
    pub fn fixed(fix: PositionFix) -> Self {
        Self::default().then(Ok(fix))
    }
    pub fn failing(cause: &str) -> Self {
        Self::default().then(Err(Error::LocationUnavailable(cause.to_string())))
    }
    pub fn then(mut self, reply: Result<PositionFix, Error>) -> Self {
        self.script.push_back(reply);
        self
    }
}

impl PositionSource for ScriptedPosition {
    fn locate(&mut self) -> Result<PositionFix, Error> {
        self.calls += 1;
        if let Some(reply) = self.script.pop_front() {
            self.last = Some(reply);
        }
        self.last
            .clone()
            .unwrap_or_else(|| Err(Error::LocationUnavailable("no script".to_string())))
    }
}

/// [SatelliteRelay] replaying scripted replies, recording requests
/// and the state of the busy flag at request time.
#[derive(Debug, Default)]
pub struct ScriptedRelay {
    script: VecDeque<Result<String, Error>>,
    pub requests: Vec<SatelliteRequest>,
    pub loading: Option<LoadingFlag>,
    pub loading_seen: Vec<bool>,
}

impl ScriptedRelay {
    pub fn replying(body: &str) -> Self {
        Self::default().then(Ok(body.to_string()))
    }
    pub fn then(mut self, reply: Result<String, Error>) -> Self {
        self.script.push_back(reply);
        self
    }
}

impl SatelliteRelay for ScriptedRelay {
    fn fetch(&mut self, request: &SatelliteRequest) -> Result<String, Error> {
        self.requests.push(*request);
        if let Some(flag) = &self.loading {
            self.loading_seen.push(flag.is_loading());
        }
        self.script
            .pop_front()
            .unwrap_or_else(|| Err(Error::FetchFailed("no script".to_string())))
    }
}
