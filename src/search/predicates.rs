// src/search/predicates.rs

use crate::domain::listing::Listing;
use crate::search::filters::FilterState;
use std::borrow::Cow;

/// Keeps the listings that satisfy every active predicate, in input order.
///
/// An inactive state hands the input slice straight back without copying.
pub fn apply_filters<'a>(listings: &'a [Listing], state: &FilterState) -> Cow<'a, [Listing]> {
    if state.is_inactive() {
        return Cow::Borrowed(listings);
    }
    let needle = location_needle(state);
    Cow::Owned(
        listings
            .iter()
            .filter(|l| matches_with(l, state, needle.as_deref()))
            .cloned()
            .collect(),
    )
}

/// Index form of `apply_filters` for callers that keep the collection elsewhere.
pub fn matching_indices(listings: &[Listing], state: &FilterState) -> Vec<usize> {
    let needle = location_needle(state);
    listings
        .iter()
        .enumerate()
        .filter(|(_, l)| matches_with(l, state, needle.as_deref()))
        .map(|(i, _)| i)
        .collect()
}

pub fn matches(listing: &Listing, state: &FilterState) -> bool {
    matches_with(listing, state, location_needle(state).as_deref())
}

fn location_needle(state: &FilterState) -> Option<String> {
    state.location_needle().map(str::to_lowercase)
}

// Exact-match enums first, the substring scan last.
fn matches_with(listing: &Listing, state: &FilterState, needle: Option<&str>) -> bool {
    if state.operation.is_some_and(|op| listing.operation != op) {
        return false;
    }
    if state.kind.is_some_and(|kind| listing.kind != kind) {
        return false;
    }
    if state.furnished.is_some_and(|f| listing.furnished != f) {
        return false;
    }
    if state.price_min.is_some_and(|min| listing.price < min)
        || state.price_max.is_some_and(|max| listing.price > max)
    {
        return false;
    }
    if state.bedrooms_min.is_some_and(|n| listing.bedrooms < n)
        || state.bathrooms_min.is_some_and(|n| listing.bathrooms < n)
        || state.parking_min.is_some_and(|n| listing.parking < n)
    {
        return false;
    }
    if state.area_min.is_some_and(|min| listing.built_area < min)
        || state.area_max.is_some_and(|max| listing.built_area > max)
    {
        return false;
    }
    match needle {
        Some(needle) => location_matches(listing, needle),
        None => true,
    }
}

/// `needle` must already be lowercase. Any one address field containing it is enough.
fn location_matches(listing: &Listing, needle: &str) -> bool {
    let addr = &listing.address;
    [
        addr.street.as_str(),
        addr.neighborhood.as_str(),
        addr.city.as_str(),
        addr.state.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}
