use crate::db::{ListingSource, ListingStore, SqliteListings};
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::fixtures::new_listing;
use crate::tests::utils::{
    get, init_test_app, location, post_form, read_body, seed, TEST_ADMIN_KEY,
};
use astra::Body;
use http::{Method, Request};

const LISTING_FORM: &str = "titulo=Casa+Tlalpan&operacion=venta&tipo=casa&precio=3200000\
    &recamaras=3&banos=2&estacionamientos=2&construccion=190&ciudad=Tlalpan&estado=CDMX\
    &amenidad=1&disponible=1";

#[test]
fn anonymous_admin_gets_login_form() {
    let app = init_test_app();
    let resp = handle(get("/admin"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = read_body(resp);
    assert!(body.contains("Iniciar sesión"));
    assert!(!body.contains("Nueva propiedad"));
}

#[test]
fn login_sets_admin_cookie() {
    let app = init_test_app();

    let wrong = handle(post_form("/admin/login", "clave=otra", None), &app);
    assert!(matches!(wrong, Err(ServerError::Unauthorized(_))));

    let resp = handle(
        post_form("/admin/login", &format!("clave={TEST_ADMIN_KEY}"), None),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin");
    let cookie = resp.headers().get("Set-Cookie").unwrap().to_str().unwrap();
    assert!(cookie.starts_with(&format!("admin_key={TEST_ADMIN_KEY};")));

    let with_cookie = Request::builder()
        .method(Method::GET)
        .uri("/admin")
        .header("Cookie", format!("admin_key={TEST_ADMIN_KEY}"))
        .body(Body::empty())
        .unwrap();
    let body = read_body(handle(with_cookie, &app).unwrap());
    assert!(body.contains("Administración de propiedades"));
}

#[test]
fn admin_can_create_update_and_delete() {
    let app = init_test_app();

    let resp = handle(
        post_form("/admin/propiedades", LISTING_FORM, Some(TEST_ADMIN_KEY)),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert_eq!(location(&resp), "/admin");

    let store = SqliteListings::admin(&app.db);
    let created = store.list_all().unwrap();
    assert_eq!(created.len(), 1);
    let id = created[0].id;
    assert_eq!(created[0].title, "Casa Tlalpan");
    assert_eq!(created[0].amenities.len(), 1);

    let body = read_body(handle(get("/propiedades"), &app).unwrap());
    assert!(body.contains("Casa Tlalpan"));

    let edited = LISTING_FORM
        .replace("precio=3200000", "precio=2900000")
        .replace("&disponible=1", "");
    let resp = handle(
        post_form(&format!("/admin/propiedades/{id}"), &edited, Some(TEST_ADMIN_KEY)),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    let updated = store.get(id).unwrap();
    assert_eq!(updated.price, 2_900_000.0);
    assert!(!updated.available);

    // Hidden now: gone from the public page.
    let body = read_body(handle(get("/propiedades"), &app).unwrap());
    assert!(!body.contains("Casa Tlalpan"));

    let resp = handle(
        post_form(&format!("/admin/propiedades/{id}/eliminar"), "", Some(TEST_ADMIN_KEY)),
        &app,
    )
    .unwrap();
    assert_eq!(resp.status(), 302);
    assert!(matches!(store.get(id), Err(ServerError::NotFound)));
}

#[test]
fn mutations_require_the_key() {
    let app = init_test_app();
    let id = seed(&app, &new_listing("Casa Protegida"));

    let attempts = [
        post_form("/admin/propiedades", LISTING_FORM, None),
        post_form(&format!("/admin/propiedades/{id}"), LISTING_FORM, Some("mala")),
        post_form(&format!("/admin/propiedades/{id}/eliminar"), "", None),
    ];
    for req in attempts {
        assert!(matches!(handle(req, &app), Err(ServerError::Unauthorized(_))));
    }
    assert!(SqliteListings::admin(&app.db).get(id).is_ok());
}

#[test]
fn invalid_form_is_rejected() {
    let app = init_test_app();
    let resp = handle(
        post_form(
            "/admin/propiedades",
            "titulo=+&operacion=venta&tipo=casa&precio=100",
            Some(TEST_ADMIN_KEY),
        ),
        &app,
    );
    assert!(matches!(resp, Err(ServerError::BadRequest(_))));

    let resp = handle(
        post_form(
            "/admin/propiedades",
            "titulo=Casa&operacion=venta&tipo=castillo&precio=100",
            Some(TEST_ADMIN_KEY),
        ),
        &app,
    );
    assert!(matches!(resp, Err(ServerError::BadRequest(_))));

    let resp = handle(
        post_form(
            "/admin/propiedades",
            "titulo=Casa&operacion=venta&tipo=casa&precio=100&amenidad=424242",
            Some(TEST_ADMIN_KEY),
        ),
        &app,
    );
    assert!(matches!(resp, Err(ServerError::BadRequest(_))));
    assert!(SqliteListings::admin(&app.db).list_all().unwrap().is_empty());
}

#[test]
fn export_is_admin_only_and_follows_filters() {
    let app = init_test_app();
    seed(&app, &new_listing("Casa Exportable"));

    assert!(matches!(
        handle(get("/propiedades/exportar"), &app),
        Err(ServerError::Unauthorized(_))
    ));

    let req = Request::builder()
        .method(Method::GET)
        .uri("/propiedades/exportar?operacion=venta&orden=precio_desc")
        .header("X-Admin-Key", TEST_ADMIN_KEY)
        .body(Body::empty())
        .unwrap();
    let resp = handle(req, &app).unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("Content-Type").unwrap(),
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
    );
    let disposition = resp
        .headers()
        .get("Content-Disposition")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("propiedades.xlsx"));
}
