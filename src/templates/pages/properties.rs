// templates/pages/properties.rs

use crate::search::controller::Preset;
use crate::search::page::{PagePhase, PropertiesPage};
use crate::templates::components::{filter_form, listing_card};
use crate::templates::{desktop_layout, PageChrome};
use maud::{html, Markup};

/// Presets stack on top of whatever is already in the URL.
fn preset_href(query: &str, preset: Preset) -> String {
    if query.is_empty() {
        format!("/propiedades?preset={}", preset.slug())
    } else {
        format!("/propiedades?{query}&preset={}", preset.slug())
    }
}

/// Retrying repeats the exact request that failed.
fn retry_href(raw_query: &str) -> String {
    let raw_query = raw_query.trim_start_matches('?');
    if raw_query.is_empty() {
        "/propiedades".to_string()
    } else {
        format!("/propiedades?{raw_query}")
    }
}

pub fn properties_page(chrome: PageChrome, page: &PropertiesPage) -> Markup {
    let query = page.query_string();
    let suffix = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };

    desktop_layout(
        "Propiedades",
        chrome,
        html! {
            h1 { "Propiedades" }

            ul class="presets" {
                @for preset in Preset::ALL {
                    li {
                        a href=(preset_href(&query, preset)) {
                            (preset.label())
                        }
                    }
                }
            }

            (filter_form(page.state(), page.sort(), page.show_advanced()))

            @match page.phase() {
                PagePhase::Loading | PagePhase::Initializing => {
                    p class="loading" { "Cargando propiedades…" }
                }
                PagePhase::LoadError(_) => {
                    div class="card error" id="error-carga" {
                        p { "No pudimos cargar las propiedades." }
                        a href=(retry_href(page.raw_query())) class="btn" { "Reintentar" }
                    }
                }
                PagePhase::Ready => {
                    p class="summary" {
                        (page.result_count()) " de " (page.total_count()) " propiedades"
                        @if page.active_filter_count() > 0 {
                            " · " span class="badge" id="filtros-activos" { (page.active_filter_count()) " filtros activos" }
                        }
                        @if chrome.is_admin {
                            " · " a href=(format!("/propiedades/exportar{suffix}")) { "Exportar a Excel" }
                        }
                    }
                    @if page.is_empty_result() {
                        div class="card empty" id="sin-resultados" {
                            p { "Ninguna propiedad coincide con tu búsqueda." }
                            a href="/propiedades?limpiar=1" { "Limpiar filtros" }
                        }
                    } @else {
                        div class="grid" id="resultados" {
                            @for listing in page.results() {
                                (listing_card(listing))
                            }
                        }
                    }
                }
            }
        },
    )
}
