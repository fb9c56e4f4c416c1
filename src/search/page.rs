// src/search/page.rs

use crate::db::source::ListingSource;
use crate::domain::listing::Listing;
use crate::search::controller::{FilterController, Preset, UrlChange};
use crate::search::filters::{FilterField, FilterState, SortKey};
use crate::search::lookup::{Debouncer, DEFAULT_DEBOUNCE};
use crate::search::predicates::matching_indices;
use crate::search::sort::sort_indices;
use crate::search::url_codec;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PagePhase {
    /// Collection requested, not here yet.
    Loading,
    /// Collection here, first URL-derived filter pass running.
    Initializing,
    Ready,
    /// Fetch failed; `retry` is offered.
    LoadError(String),
}

/// Drives the listing page: URL and form events in, an ordered result set out.
///
/// The collection is fetched once and kept; filtering and sorting work on
/// index vectors into it.
#[derive(Debug)]
pub struct PropertiesPage {
    phase: PagePhase,
    mounted: bool,
    query: String,
    controller: FilterController,
    sort: SortKey,
    show_advanced: bool,
    listings: Vec<Listing>,
    filtered: Vec<usize>,
    ordered: Vec<usize>,
    location_input: Debouncer,
}

impl PropertiesPage {
    pub fn mount(query: &str) -> Self {
        Self::mount_with_debounce(query, DEFAULT_DEBOUNCE)
    }

    pub fn mount_with_debounce(query: &str, debounce: Duration) -> Self {
        Self {
            phase: PagePhase::Loading,
            mounted: true,
            query: query.to_string(),
            controller: FilterController::new(),
            sort: SortKey::default(),
            show_advanced: false,
            listings: Vec::new(),
            filtered: Vec::new(),
            ordered: Vec::new(),
            location_input: Debouncer::new(debounce),
        }
    }

    /// Fetches the collection. Also serves as the retry action after `LoadError`.
    pub fn load<S: ListingSource>(&mut self, source: &S) -> &PagePhase {
        if !self.mounted {
            return &self.phase;
        }
        self.phase = PagePhase::Loading;

        match source.list_all() {
            Ok(listings) => {
                self.listings = listings;
                self.phase = PagePhase::Initializing;
                self.initialize();
                self.phase = PagePhase::Ready;
                debug!(
                    total = self.listings.len(),
                    shown = self.ordered.len(),
                    "listing page ready"
                );
            }
            Err(e) => {
                warn!(error = %e, "listing collection unavailable");
                self.listings.clear();
                self.filtered.clear();
                self.ordered.clear();
                self.phase = PagePhase::LoadError(e.to_string());
            }
        }
        &self.phase
    }

    pub fn retry<S: ListingSource>(&mut self, source: &S) -> &PagePhase {
        self.load(source)
    }

    fn initialize(&mut self) {
        let init = self.controller.initialize_from_url(&self.query);
        self.show_advanced = init.show_advanced;
        self.sort = url_codec::decode_sort(&self.query);
        self.refilter();
    }

    fn refilter(&mut self) {
        let state = self.controller.state();
        self.filtered = if state.is_inactive() {
            (0..self.listings.len()).collect()
        } else {
            matching_indices(&self.listings, state)
        };
        self.ordered = self.filtered.clone();
        sort_indices(&self.listings, &mut self.ordered, self.sort);
        debug_assert_eq!(self.ordered.len(), self.filtered.len());
    }

    fn is_live(&self) -> bool {
        self.mounted && self.phase == PagePhase::Ready
    }

    /// Browser navigation. Returns whether the result set was recomputed.
    pub fn on_url_change(&mut self, query: &str) -> bool {
        if !self.is_live() {
            return false;
        }
        self.query = query.to_string();
        let sort = url_codec::decode_sort(query);
        match self.controller.on_url_change(query) {
            UrlChange::Changed(_) => {
                self.sort = sort;
                self.refilter();
                true
            }
            UrlChange::Unchanged => self.change_sort(sort),
        }
    }

    /// Form submit. Returns the query string to push onto history.
    pub fn submit(&mut self, state: FilterState) -> String {
        self.controller.replace(state);
        self.after_explicit_change()
    }

    pub fn apply_preset(&mut self, preset: Preset) -> String {
        self.controller.apply_preset(preset);
        self.after_explicit_change()
    }

    pub fn reset(&mut self) -> String {
        let reset = self.controller.reset();
        self.show_advanced = reset.show_advanced;
        self.location_input.cancel();
        self.after_explicit_change()
    }

    fn after_explicit_change(&mut self) -> String {
        self.query = self.query_string();
        if self.is_live() {
            self.refilter();
        }
        self.query.clone()
    }

    /// Re-orders the current filtered set only. Returns false when the order
    /// (by listing id) would not change, leaving the output untouched.
    pub fn change_sort(&mut self, key: SortKey) -> bool {
        if !self.is_live() {
            self.sort = key;
            return false;
        }
        let mut next = self.filtered.clone();
        sort_indices(&self.listings, &mut next, key);
        self.sort = key;

        let same = next.len() == self.ordered.len()
            && next
                .iter()
                .zip(&self.ordered)
                .all(|(a, b)| self.listings[*a].id == self.listings[*b].id);
        if same {
            return false;
        }
        self.ordered = next;
        true
    }

    /// A keystroke in the free-text location box.
    pub fn type_location(&mut self, text: &str, now: Instant) {
        if self.mounted {
            self.location_input.input(text, now);
        }
    }

    /// Applies the debounced location text once its window passed.
    pub fn poll_location(&mut self, now: Instant) -> bool {
        if !self.is_live() {
            return false;
        }
        match self.location_input.poll(now) {
            Some(text) => {
                self.controller.on_field_change(FilterField::Location, &text);
                self.query = self.query_string();
                self.refilter();
                true
            }
            None => false,
        }
    }

    pub fn unmount(&mut self) {
        self.mounted = false;
        self.location_input.cancel();
    }

    pub fn phase(&self) -> &PagePhase {
        &self.phase
    }

    pub fn state(&self) -> &FilterState {
        self.controller.state()
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn show_advanced(&self) -> bool {
        self.show_advanced
    }

    pub fn active_filter_count(&self) -> usize {
        self.controller.active_count()
    }

    /// The query string the page was last driven with, as received.
    pub fn raw_query(&self) -> &str {
        &self.query
    }

    pub fn query_string(&self) -> String {
        url_codec::encode_with_sort(self.controller.state(), self.sort)
    }

    pub fn results(&self) -> Vec<&Listing> {
        self.ordered.iter().map(|&i| &self.listings[i]).collect()
    }

    pub fn result_ids(&self) -> Vec<i64> {
        self.ordered.iter().map(|&i| self.listings[i].id).collect()
    }

    pub fn result_count(&self) -> usize {
        self.ordered.len()
    }

    pub fn total_count(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty_result(&self) -> bool {
        self.phase == PagePhase::Ready && self.ordered.is_empty()
    }
}
