use crate::domain::listing::Operation;
use crate::router::handle;
use crate::tests::fixtures::new_listing;
use crate::tests::utils::{get, init_test_app, read_body, seed};
use serde_json::Value;

#[test]
fn listings_endpoint_returns_ordered_filtered_json() {
    let app = init_test_app();
    for (title, price) in [("Casa B", 3_000_000.0), ("Casa A", 1_500_000.0), ("Casa C", 2_000_000.0)] {
        let mut input = new_listing(title);
        input.price = price;
        seed(&app, &input);
    }
    let mut rent = new_listing("Depto Renta");
    rent.operation = Operation::Renta;
    rent.price = 20_000.0;
    seed(&app, &rent);

    let resp = handle(get("/api/propiedades?operacion=venta&orden=precio_asc"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers().get("Content-Type").unwrap(), "application/json");

    let json: Value = serde_json::from_str(&read_body(resp)).unwrap();
    assert_eq!(json["total"], 4);
    assert_eq!(json["count"], 3);
    assert_eq!(json["active_filters"], 1);
    assert_eq!(json["sort"], "precio_asc");
    let titles: Vec<&str> = json["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Casa A", "Casa C", "Casa B"]);
}

#[test]
fn places_endpoint_with_lookups_disabled() {
    let app = init_test_app();

    let body = read_body(handle(get("/api/lugares?q=Condesa"), &app).unwrap());
    assert_eq!(body, "[]");

    let body = read_body(handle(get("/api/lugares?q=+"), &app).unwrap());
    assert_eq!(body, "[]");

    let body = read_body(handle(get("/api/lugares?lat=19.41&lng=-99.17"), &app).unwrap());
    assert_eq!(body, "null");
}
