// Drives the search core through the library's public paths only.

use chrono::{TimeZone, Utc};
use inmobiliaria::db::source::ListingSource;
use inmobiliaria::domain::listing::{Address, Listing, Operation, PropertyKind};
use inmobiliaria::errors::ServerError;
use inmobiliaria::geo::DisabledLookup;
use inmobiliaria::search::filters::{FilterState, SortKey};
use inmobiliaria::search::lookup::{Debouncer, LocationLookup, RequestSequencer};
use inmobiliaria::search::page::{PagePhase, PropertiesPage};
use inmobiliaria::search::predicates::{apply_filters, matches};
use inmobiliaria::search::sort::apply_sort;
use std::time::{Duration, Instant};

fn listing(id: i64, title: &str, operation: Operation, price: f64, city: &str) -> Listing {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(id);
    Listing {
        id,
        title: title.to_string(),
        description: String::new(),
        price,
        operation,
        kind: PropertyKind::Casa,
        bedrooms: 3,
        bathrooms: 2,
        parking: 1,
        built_area: 120.0,
        lot_area: 0.0,
        age_years: 0.0,
        furnished: false,
        address: Address {
            city: city.to_string(),
            ..Address::default()
        },
        coordinates: None,
        images: Vec::new(),
        available: true,
        featured: false,
        created_at: created,
        updated_at: created,
        amenities: Vec::new(),
    }
}

fn catalog() -> Vec<Listing> {
    vec![
        listing(1, "Casa Mérida", Operation::Venta, 3_000_000.0, "Mérida"),
        listing(2, "Casa Puebla", Operation::Renta, 15_000.0, "Puebla"),
        listing(3, "Casa Oaxaca", Operation::Venta, 1_800_000.0, "Oaxaca"),
    ]
}

struct Catalog;

impl ListingSource for Catalog {
    fn list_all(&self) -> Result<Vec<Listing>, ServerError> {
        Ok(catalog())
    }
}

#[test]
fn filter_then_sort_from_outside_the_crate() {
    let all = catalog();
    let state = FilterState {
        operation: Some(Operation::Venta),
        ..FilterState::default()
    };
    let filtered = apply_filters(&all, &state);
    assert!(filtered.iter().all(|l| matches(l, &state)));

    let sorted = apply_sort(&filtered, SortKey::PrecioAsc);
    let ids: Vec<i64> = sorted.iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[test]
fn page_follows_navigation_and_stops_after_unmount() {
    let mut page = PropertiesPage::mount_with_debounce("?operacion=venta", Duration::from_millis(50));
    assert_eq!(page.retry(&Catalog), &PagePhase::Ready);
    assert_eq!(page.result_ids(), vec![3, 1]);

    assert!(!page.on_url_change("operacion=venta"));
    assert!(page.change_sort(SortKey::PrecioDesc));
    assert_eq!(page.result_ids(), vec![1, 3]);

    let t0 = Instant::now();
    page.type_location("oaxaca", t0);
    assert!(!page.poll_location(t0));
    assert!(page.poll_location(t0 + Duration::from_millis(60)));
    assert_eq!(page.result_ids(), vec![3]);

    page.unmount();
    page.type_location("puebla", t0);
    assert!(!page.poll_location(t0 + Duration::from_secs(1)));
    assert!(!page.on_url_change("operacion=renta"));
    assert_eq!(page.result_ids(), vec![3]);
}

#[test]
fn lookup_scheduling_is_public() {
    let mut debouncer = Debouncer::new(Duration::from_millis(10));
    let t0 = Instant::now();
    debouncer.input("con", t0);
    assert!(debouncer.is_pending());

    let mut seq = RequestSequencer::new();
    let first = seq.begin();
    let second = seq.begin();
    assert!(!seq.accept(first));
    assert!(seq.accept(second));

    let mut lookup = LocationLookup::new(DisabledLookup, Duration::from_millis(10));
    lookup.type_text("Condesa", t0);
    let (ticket, query) = lookup.due(t0 + Duration::from_millis(20)).unwrap();
    let result = lookup.run(&query);
    assert!(lookup.complete(ticket, result));
    assert!(lookup.suggestions().is_empty());
}
