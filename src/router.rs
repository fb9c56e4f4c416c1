use crate::auth::AdminGate;
use crate::config::AppConfig;
use crate::db::{Database, ListingSource, ListingStore, SqliteListings};
use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::forms::{new_listing_from_form, FormData};
use crate::geo::{DisabledLookup, NominatimClient, Place, PlacesLookup};
use crate::lifecycle::{AppLifecycle, CookieStore};
use crate::responses::{
    html_response_with_cookies, json_response, redirect, ResultResp,
};
use crate::search::controller::{FilterController, Preset};
use crate::search::filters::{FilterState, SortKey};
use crate::search::page::{PagePhase, PropertiesPage};
use crate::search::{sort, url_codec};
use crate::spreadsheets::export_listings_xlsx;
use crate::templates::components::filter_form::SUBMIT_PARAM;
use crate::templates::{self, PageChrome};
use astra::Request;
use serde::Serialize;
use std::time::Duration;
use tracing::{info, warn};

const PRESET_PARAM: &str = "preset";
const RESET_PARAM: &str = "limpiar";
const FEATURED_ON_HOME: usize = 6;

/// Everything a request handler needs, built once at start-up.
pub struct AppContext {
    pub db: Database,
    pub admin: AdminGate,
    pub places: Box<dyn PlacesLookup>,
    pub debounce: Duration,
}

impl AppContext {
    pub fn from_config(cfg: &AppConfig, db: Database) -> Result<Self, ServerError> {
        let (admin, generated) = AdminGate::from_config(cfg.admin_key.as_deref());
        if let Some(key) = generated {
            warn!("INMOBILIARIA_ADMIN_KEY not set; generated admin key for this run: {key}");
        }

        let places: Box<dyn PlacesLookup> = if cfg.geocoder_disabled {
            info!("places lookup disabled");
            Box::new(DisabledLookup)
        } else {
            info!(url = %cfg.geocoder_url, "places lookup enabled");
            Box::new(NominatimClient::new(&cfg.geocoder_url)?)
        };

        Ok(Self {
            db,
            admin,
            places,
            debounce: cfg.debounce,
        })
    }
}

pub fn handle(mut req: Request, ctx: &AppContext) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = req.uri().query().unwrap_or("").to_string();
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => home(&req, ctx),
        ("GET", ["propiedades"]) => properties(&req, ctx, &query),
        ("GET", ["propiedades", "exportar"]) => export(&req, ctx, &query),
        ("GET", ["propiedades", id]) => property_detail(&req, ctx, parse_id(id)?),

        ("GET", ["api", "propiedades"]) => api_listings(ctx, &query),
        ("GET", ["api", "lugares"]) => api_places(ctx, &query),

        ("GET", ["admin"]) => admin(&req, ctx),
        ("POST", ["admin", "login"]) => admin_login(&mut req, ctx),
        ("POST", ["admin", "propiedades"]) => {
            ctx.admin.authorize(&req)?;
            let input = new_listing_from_form(&FormData::from_request(&mut req)?)?;
            SqliteListings::admin(&ctx.db).create(&input)?;
            redirect("/admin", &[])
        }
        ("POST", ["admin", "propiedades", id]) => {
            ctx.admin.authorize(&req)?;
            let id = parse_id(id)?;
            let input = new_listing_from_form(&FormData::from_request(&mut req)?)?;
            SqliteListings::admin(&ctx.db).update(id, &input)?;
            redirect("/admin", &[])
        }
        ("POST", ["admin", "propiedades", id, "eliminar"]) => {
            ctx.admin.authorize(&req)?;
            SqliteListings::admin(&ctx.db).delete(parse_id(id)?)?;
            redirect("/admin", &[])
        }

        _ => Err(ServerError::NotFound),
    }
}

fn parse_id(raw: &str) -> Result<i64, ServerError> {
    raw.parse().map_err(|_| ServerError::NotFound)
}

/// Reads the visitor cookies once and records the visit.
fn chrome(req: &Request, ctx: &AppContext) -> (PageChrome, CookieStore) {
    let mut cookies = CookieStore::from_request(req);
    let lifecycle = AppLifecycle::start(&mut cookies);
    let is_admin = ctx.admin.authorize(req).is_ok();
    (PageChrome::new(lifecycle, is_admin), cookies)
}

fn listings_url(query: &str) -> String {
    if query.is_empty() {
        "/propiedades".to_string()
    } else {
        format!("/propiedades?{query}")
    }
}

fn home(req: &Request, ctx: &AppContext) -> ResultResp {
    let (chrome, cookies) = chrome(req, ctx);
    let all = SqliteListings::public(&ctx.db).list_all()?;
    let mut featured: Vec<&Listing> = all.iter().filter(|l| l.featured).collect();
    featured.sort_by(|a, b| sort::compare(a, b, SortKey::Recientes));
    featured.truncate(FEATURED_ON_HOME);

    html_response_with_cookies(
        templates::pages::home_page(chrome, &featured),
        cookies.set_cookie_headers(),
    )
}

fn load_page(ctx: &AppContext, query: &str) -> PropertiesPage {
    let mut page = PropertiesPage::mount_with_debounce(query, ctx.debounce);
    page.load(&SqliteListings::public(&ctx.db));
    page
}

/// The search page. Form submits, presets and resets are applied to the
/// page and answered with a redirect to the canonical URL, so the address
/// bar always holds exactly the active filters.
fn properties(req: &Request, ctx: &AppContext, query: &str) -> ResultResp {
    let (chrome, cookies) = chrome(req, ctx);
    let mut page = load_page(ctx, query);
    let headers = cookies.set_cookie_headers();

    if page.phase() == &PagePhase::Ready {
        if url_codec::param(query, SUBMIT_PARAM).is_some() {
            let form = FormData::parse(query);
            let mut controller = FilterController::new();
            let state = controller.apply_form(form.pairs()).clone();
            return redirect(&listings_url(&page.submit(state)), headers);
        }
        if let Some(preset) = url_codec::param(query, PRESET_PARAM).and_then(|p| Preset::parse(&p)) {
            return redirect(&listings_url(&page.apply_preset(preset)), headers);
        }
        if url_codec::param(query, RESET_PARAM).is_some() {
            return redirect(&listings_url(&page.reset()), headers);
        }
    }

    html_response_with_cookies(templates::pages::properties_page(chrome, &page), headers)
}

fn property_detail(req: &Request, ctx: &AppContext, id: i64) -> ResultResp {
    let (chrome, cookies) = chrome(req, ctx);
    // Admins can preview hidden listings.
    let store = if chrome.is_admin {
        SqliteListings::admin(&ctx.db)
    } else {
        SqliteListings::public(&ctx.db)
    };
    let listing = store.get(id)?;
    html_response_with_cookies(
        templates::pages::property_detail_page(chrome, &listing),
        cookies.set_cookie_headers(),
    )
}

fn export(req: &Request, ctx: &AppContext, query: &str) -> ResultResp {
    ctx.admin.authorize(req)?;
    let page = load_page(ctx, query);
    if let PagePhase::LoadError(msg) = page.phase() {
        return Err(ServerError::DbError(msg.clone()));
    }
    info!(rows = page.result_count(), "exporting listings");
    export_listings_xlsx(&page.results(), "propiedades.xlsx")
}

#[derive(Serialize)]
struct ListingsPayload<'a> {
    filters: &'a FilterState,
    sort: SortKey,
    active_filters: usize,
    total: usize,
    count: usize,
    results: Vec<&'a Listing>,
}

fn api_listings(ctx: &AppContext, query: &str) -> ResultResp {
    let page = load_page(ctx, query);
    if let PagePhase::LoadError(msg) = page.phase() {
        return Err(ServerError::DbError(msg.clone()));
    }
    json_response(&ListingsPayload {
        filters: page.state(),
        sort: page.sort(),
        active_filters: page.active_filter_count(),
        total: page.total_count(),
        count: page.result_count(),
        results: page.results(),
    })
}

/// `?q=` searches by text; `?lat=&lng=` resolves a point.
fn api_places(ctx: &AppContext, query: &str) -> ResultResp {
    let coord = |name: &str| url_codec::param(query, name).and_then(|v| v.trim().parse::<f64>().ok());
    if let (Some(lat), Some(lng)) = (coord("lat"), coord("lng")) {
        let place: Option<Place> = ctx.places.reverse(lat, lng)?;
        return json_response(&place);
    }

    let text = url_codec::param(query, "q").unwrap_or_default();
    if text.trim().is_empty() {
        return json_response(&Vec::<Place>::new());
    }
    json_response(&ctx.places.search(&text)?)
}

fn admin(req: &Request, ctx: &AppContext) -> ResultResp {
    let (chrome, cookies) = chrome(req, ctx);
    if !chrome.is_admin {
        return html_response_with_cookies(
            templates::pages::admin_login_page(chrome),
            cookies.set_cookie_headers(),
        );
    }

    let store = SqliteListings::admin(&ctx.db);
    let vm = templates::pages::AdminVm {
        listings: store.list_all()?,
        amenities: store.amenities()?,
    };
    html_response_with_cookies(
        templates::pages::admin_page(chrome, &vm),
        cookies.set_cookie_headers(),
    )
}

fn admin_login(req: &mut Request, ctx: &AppContext) -> ResultResp {
    let form = FormData::from_request(req)?;
    let key = form.get("clave").unwrap_or("").trim();
    if !ctx.admin.verify(key) {
        warn!("rejected admin login");
        return Err(ServerError::Unauthorized("clave incorrecta".into()));
    }
    info!("admin logged in");
    redirect("/admin", &[AdminGate::login_cookie(key)])
}
