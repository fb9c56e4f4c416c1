// templates/components/filter_form.rs
//
// The search form. Input names are the query parameter names, so a plain GET
// submit lands on the same decoder the URL uses.

use crate::domain::listing::{Operation, PropertyKind};
use crate::search::filters::{FilterField, FilterState, SortKey};
use crate::search::url_codec::SORT_PARAM;
use maud::{html, Markup};

/// Marks a GET as a form submit rather than a plain visit.
pub const SUBMIT_PARAM: &str = "enviar";

fn num<T: ToString>(v: Option<T>) -> String {
    v.map(|v| v.to_string()).unwrap_or_default()
}

fn count_select(field: FilterField, label: &str, current: Option<u32>) -> Markup {
    html! {
        label {
            (label)
            select name=(field.name()) {
                option value="" selected[current.is_none()] { "Cualquiera" }
                @for n in 1..=5u32 {
                    option value=(n) selected[current == Some(n)] { (n) "+" }
                }
            }
        }
    }
}

pub fn filter_form(state: &FilterState, sort: SortKey, show_advanced: bool) -> Markup {
    html! {
        form id="filtros" class="card filter-form" action="/propiedades" method="get" {
            input type="hidden" name=(SUBMIT_PARAM) value="1";

            label {
                "Operación"
                select name=(FilterField::Operation.name()) {
                    option value="" selected[state.operation.is_none()] { "Todas" }
                    @for op in Operation::ALL {
                        option value=(op.slug()) selected[state.operation == Some(op)] { (op.label()) }
                    }
                }
            }

            label {
                "Tipo"
                select name=(FilterField::Kind.name()) {
                    option value="" selected[state.kind.is_none()] { "Todos" }
                    @for kind in PropertyKind::ALL {
                        option value=(kind.slug()) selected[state.kind == Some(kind)] { (kind.label()) }
                    }
                }
            }

            label {
                "Precio mínimo"
                input type="number" min="0" step="any" name=(FilterField::PriceMin.name()) value=(num(state.price_min));
            }
            label {
                "Precio máximo"
                input type="number" min="0" step="any" name=(FilterField::PriceMax.name()) value=(num(state.price_max));
            }

            (count_select(FilterField::ParkingMin, "Estacionamientos", state.parking_min))

            details class="advanced" open[show_advanced] {
                summary { "Búsqueda avanzada" }

                (count_select(FilterField::BedroomsMin, "Recámaras", state.bedrooms_min))
                (count_select(FilterField::BathroomsMin, "Baños", state.bathrooms_min))

                label {
                    "Ubicación"
                    input
                        type="search"
                        name=(FilterField::Location.name())
                        value=(state.location)
                        placeholder="Colonia, ciudad o estado"
                        autocomplete="off"
                        data-sugerencias="/api/lugares";
                }

                label {
                    "Área mínima (m²)"
                    input type="number" min="0" step="any" name=(FilterField::AreaMin.name()) value=(num(state.area_min));
                }
                label {
                    "Área máxima (m²)"
                    input type="number" min="0" step="any" name=(FilterField::AreaMax.name()) value=(num(state.area_max));
                }

                label {
                    "Amueblado"
                    select name=(FilterField::Furnished.name()) {
                        option value="" selected[state.furnished.is_none()] { "Indistinto" }
                        option value="true" selected[state.furnished == Some(true)] { "Sí" }
                        option value="false" selected[state.furnished == Some(false)] { "No" }
                    }
                }
            }

            label {
                "Ordenar por"
                select name=(SORT_PARAM) {
                    @for key in SortKey::ALL {
                        option value=(key.slug()) selected[sort == key] { (key.label()) }
                    }
                }
            }

            button type="submit" class="btn" { "Buscar" }
            a href="/propiedades?limpiar=1" class="btn-link" { "Limpiar filtros" }
        }
    }
}
