// src/search/lookup.rs
//
// Scheduling for search-as-you-type location lookups: a debounce window
// before a request is issued, and last-started-wins when answers arrive out
// of order. Time is passed in so this stays a plain state machine.

use crate::errors::ServerError;
use crate::geo::{Place, PlacesLookup};
use std::time::{Duration, Instant};
use tracing::debug;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Option<(String, Instant)>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// A keystroke: replaces any pending text and restarts the window.
    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.pending = Some((text.into(), now + self.window));
    }

    /// Hands out the pending text once its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(text, _)| text),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// Identifies one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Only the most recently started request may apply its response, and only once.
#[derive(Debug, Default)]
pub struct RequestSequencer {
    latest: u64,
    applied: bool,
    closed: bool,
}

impl RequestSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) -> Ticket {
        self.latest += 1;
        self.applied = false;
        Ticket(self.latest)
    }

    pub fn accept(&mut self, ticket: Ticket) -> bool {
        if self.closed || self.applied || ticket.0 != self.latest {
            return false;
        }
        self.applied = true;
        true
    }

    /// After unmount nothing is accepted any more.
    pub fn close(&mut self) {
        self.closed = true;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Debounced, last-write-wins place search feeding a location picker.
pub struct LocationLookup<P: PlacesLookup> {
    places: P,
    debouncer: Debouncer,
    sequencer: RequestSequencer,
    suggestions: Vec<Place>,
}

impl<P: PlacesLookup> LocationLookup<P> {
    pub fn new(places: P, window: Duration) -> Self {
        Self {
            places,
            debouncer: Debouncer::new(window),
            sequencer: RequestSequencer::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn type_text(&mut self, text: &str, now: Instant) {
        if self.sequencer.is_closed() {
            return;
        }
        self.debouncer.input(text, now);
    }

    /// Issues a lookup if the debounce window elapsed. Returns the ticket and
    /// the query so the caller can run it and hand the answer to `complete`.
    pub fn due(&mut self, now: Instant) -> Option<(Ticket, String)> {
        if self.sequencer.is_closed() {
            return None;
        }
        let query = self.debouncer.poll(now)?;
        let query = query.trim().to_string();
        if query.is_empty() {
            self.suggestions.clear();
            return None;
        }
        Some((self.sequencer.begin(), query))
    }

    pub fn run(&self, query: &str) -> Result<Vec<Place>, ServerError> {
        self.places.search(query)
    }

    /// Applies a response if it belongs to the newest request. Stale answers are dropped.
    pub fn complete(&mut self, ticket: Ticket, result: Result<Vec<Place>, ServerError>) -> bool {
        if !self.sequencer.accept(ticket) {
            debug!(?ticket, "discarding stale place lookup response");
            return false;
        }
        match result {
            Ok(places) => self.suggestions = places,
            Err(e) => {
                debug!(error = %e, "place lookup failed");
                self.suggestions.clear();
            }
        }
        true
    }

    pub fn suggestions(&self) -> &[Place] {
        &self.suggestions
    }

    pub fn unmount(&mut self) {
        self.debouncer.cancel();
        self.sequencer.close();
    }
}
