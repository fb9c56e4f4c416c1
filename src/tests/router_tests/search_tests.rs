use crate::domain::listing::{Operation, PropertyKind};
use crate::errors::ServerError;
use crate::router::{handle, AppContext};
use crate::tests::fixtures::new_listing;
use crate::tests::utils::{get, init_test_app, location, read_body, seed};
use astra::Body;
use http::{Method, Request};

/// Two public listings and one hidden one.
fn seeded_app() -> AppContext {
    let app = init_test_app();

    let mut house = new_listing("Casa Atoyac");
    house.featured = true;
    seed(&app, &house);

    let mut flat = new_listing("Depto Condesa");
    flat.operation = Operation::Renta;
    flat.kind = PropertyKind::Departamento;
    flat.price = 18_000.0;
    flat.furnished = true;
    flat.address.neighborhood = "Condesa".into();
    seed(&app, &flat);

    let mut hidden = new_listing("Casa Oculta");
    hidden.available = false;
    seed(&app, &hidden);

    app
}

#[test]
fn listing_page_shows_only_available() {
    let app = seeded_app();
    let resp = handle(get("/propiedades"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = read_body(resp);
    assert!(body.contains("Casa Atoyac"));
    assert!(body.contains("Depto Condesa"));
    assert!(!body.contains("Casa Oculta"));
    assert!(body.contains("2 de 2 propiedades"));
    assert!(!body.contains("filtros-activos"));
}

#[test]
fn url_filters_drive_the_results() {
    let app = seeded_app();
    let body = read_body(handle(get("/propiedades?operacion=renta"), &app).unwrap());

    assert!(body.contains("Depto Condesa"));
    assert!(!body.contains("Casa Atoyac"));
    assert!(body.contains("1 de 2 propiedades"));
    assert!(body.contains("1 filtros activos"));
    assert!(body.contains("<option value=\"renta\" selected>"));
}

#[test]
fn unreadable_params_are_ignored() {
    let app = seeded_app();
    let body = read_body(handle(get("/propiedades?recamaras=abc&precio_min=-5"), &app).unwrap());
    assert!(body.contains("2 de 2 propiedades"));
}

#[test]
fn sort_key_orders_cards() {
    let app = seeded_app();
    let body = read_body(handle(get("/propiedades?orden=precio_asc"), &app).unwrap());
    let cheap = body.find("Depto Condesa").unwrap();
    let pricey = body.find("Casa Atoyac").unwrap();
    assert!(cheap < pricey);

    let body = read_body(handle(get("/propiedades?orden=precio_desc"), &app).unwrap());
    assert!(body.find("Casa Atoyac").unwrap() < body.find("Depto Condesa").unwrap());
}

#[test]
fn location_filter_opens_advanced_panel() {
    let app = seeded_app();
    let body = read_body(handle(get("/propiedades?ubicacion=CONDESA"), &app).unwrap());
    assert!(body.contains("<details class=\"advanced\" open"));
    assert!(body.contains("Depto Condesa"));
    assert!(!body.contains("Casa Atoyac"));
}

#[test]
fn empty_result_shows_empty_state() {
    let app = seeded_app();
    let body = read_body(handle(get("/propiedades?precio_min=999999999"), &app).unwrap());
    assert!(body.contains("sin-resultados"));
    assert!(body.contains("0 de 2 propiedades"));
}

#[test]
fn form_submit_redirects_to_canonical_query() {
    let app = seeded_app();
    let resp = handle(
        get("/propiedades?enviar=1&operacion=venta&tipo=&precio_min=&precio_max=&ubicacion=+&orden=recientes"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/propiedades?operacion=venta");

    let resp = handle(get("/propiedades?enviar=1&orden=titulo_desc"), &app).unwrap();
    assert_eq!(location(&resp), "/propiedades?orden=titulo_desc");
}

#[test]
fn preset_stacks_on_current_filters() {
    let app = seeded_app();
    let resp = handle(
        get("/propiedades?precio_max=20000&preset=departamento_renta"),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(
        location(&resp),
        "/propiedades?operacion=renta&tipo=departamento&precio_max=20000"
    );
}

#[test]
fn unknown_preset_just_renders() {
    let app = seeded_app();
    let resp = handle(get("/propiedades?preset=castillos"), &app).unwrap();
    assert_eq!(resp.status(), 200);
}

#[test]
fn reset_keeps_only_the_sort() {
    let app = seeded_app();
    let resp = handle(
        get("/propiedades?operacion=venta&recamaras=3&orden=precio_asc&limpiar=1"),
        &app,
    )
    .unwrap();
    assert_eq!(location(&resp), "/propiedades?orden=precio_asc");
}

#[test]
fn first_visit_sets_cookie_and_shows_splash() {
    let app = seeded_app();
    let resp = handle(get("/"), &app).unwrap();
    let cookie = resp
        .headers()
        .get("Set-Cookie")
        .expect("visit cookie")
        .to_str()
        .unwrap()
        .to_string();
    assert!(cookie.starts_with("visitado=1"));
    let body = read_body(resp);
    assert!(body.contains("intro-splash"));
    assert!(body.contains("Propiedades destacadas"));
    assert!(body.contains("Casa Atoyac"));

    let returning = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header("Cookie", "visitado=1")
        .body(Body::empty())
        .unwrap();
    let resp = handle(returning, &app).unwrap();
    assert!(resp.headers().get("Set-Cookie").is_none());
    assert!(!read_body(resp).contains("intro-splash"));
}

#[test]
fn detail_page_and_missing_listings() {
    let app = init_test_app();
    let mut input = new_listing("Casa con Jardín");
    input.images = vec!["https://img/1.jpg".into(), "https://img/2.jpg".into()];
    input.amenity_ids = vec![2];
    let id = seed(&app, &input);

    let body = read_body(handle(get(&format!("/propiedades/{id}")), &app).unwrap());
    assert!(body.contains("Casa con Jardín"));
    assert!(body.contains("https://img/2.jpg"));
    assert!(body.contains("Jardín"));

    assert!(matches!(
        handle(get("/propiedades/9999"), &app),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(get("/propiedades/abc"), &app),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn unknown_route_is_not_found() {
    let app = init_test_app();
    assert!(matches!(handle(get("/nada"), &app), Err(ServerError::NotFound)));
}

#[test]
fn load_failure_offers_retry() {
    let app = seeded_app();
    app.db
        .with_conn(|conn| {
            conn.execute_batch("ALTER TABLE listings RENAME TO listings_archivo;")?;
            Ok(())
        })
        .unwrap();

    let resp = handle(get("/propiedades?operacion=venta"), &app).unwrap();
    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    assert!(body.contains("Reintentar"));
    assert!(body.contains("href=\"/propiedades?operacion=venta\""));
}
