use serde::{Deserialize, Serialize};

/// Observation state of the visibility watcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WatcherState {
    /// Never armed; no observer registration exists.
    #[default]
    Unarmed,
    /// Armed and waiting for an intersecting observation.
    Watching,
    /// Previously armed and since stood down; the host should drop its
    /// observer registration.
    Disarmed,
}

/// Deferred-activation trigger for instances flagged `autoload` or
/// resolved short-form.
///
/// The watcher itself decides; the host observes actual viewport
/// intersection and reports it as a page event. Exactly one deferred
/// activation fires per arming: the first intersecting observation while
/// the instance is not yet activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityWatcher {
    state: WatcherState,
}

impl VisibilityWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Whether the host should keep an observer registration alive.
    pub fn observing(&self) -> bool {
        self.state == WatcherState::Watching
    }

    /// Align the watcher with the arming criteria of the current
    /// configuration epoch.
    ///
    /// Arms (or re-arms) when the criteria hold, stands a watching
    /// watcher down when they no longer do. A watcher that was never
    /// armed stays `Unarmed`, so hosts never tear down a registration
    /// that never existed.
    pub fn sync(&mut self, wants_watching: bool) {
        let next = match (self.state, wants_watching) {
            (_, true) => WatcherState::Watching,
            (WatcherState::Watching, false) => WatcherState::Disarmed,
            (state, false) => state,
        };
        if next != self.state {
            log::debug!("Visibility watcher: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Whether an observation should trigger deferred activation.
    pub fn should_fire(&self, intersecting: bool, already_activated: bool) -> bool {
        self.state == WatcherState::Watching && intersecting && !already_activated
    }

    /// Stand down after a fired deferred activation or a direct
    /// click/programmatic activation.
    pub fn disarm(&mut self) {
        if self.state == WatcherState::Watching {
            log::debug!("Visibility watcher disarmed");
            self.state = WatcherState::Disarmed;
        }
    }
}
