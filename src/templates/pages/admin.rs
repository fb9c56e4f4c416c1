use crate::domain::listing::{format_price, Amenity, Listing, Operation, PropertyKind};
use crate::templates::{desktop_layout, PageChrome};
use maud::{html, Markup};

pub struct AdminVm {
    pub listings: Vec<Listing>,
    pub amenities: Vec<Amenity>,
}

const TH: &str = "padding: 12px 8px; border-bottom: 2px solid #e5e7eb; text-align: left;";
const TD: &str = "padding: 8px; border-bottom: 1px solid #f3f4f6;";

pub fn admin_login_page(chrome: PageChrome) -> Markup {
    desktop_layout(
        "Acceso de administración",
        chrome,
        html! {
            div class="card" style="max-width: 420px; margin: 2rem auto;" {
                h1 { "Iniciar sesión" }
                form action="/admin/login" method="post" {
                    label {
                        "Clave de administración"
                        input type="password" name="clave" required autocomplete="current-password";
                    }
                    button type="submit" class="btn" { "Entrar" }
                }
            }
        },
    )
}

/// Create and edit share one form; `existing` pre-fills it.
fn listing_form(action: &str, existing: Option<&Listing>, amenities: &[Amenity]) -> Markup {
    let text = |f: fn(&Listing) -> String| existing.map(f).unwrap_or_default();
    let selected_amenity = |id: i64| {
        existing
            .map(|l| l.amenities.iter().any(|a| a.id == id))
            .unwrap_or(false)
    };
    let op = existing.map(|l| l.operation);
    let kind = existing.map(|l| l.kind);

    html! {
        form action=(action) method="post" class="listing-form" style="display: grid; grid-template-columns: repeat(3, 1fr); gap: 8px;" {
            label { "Título" input type="text" name="titulo" required value=(text(|l| l.title.clone())); }
            label {
                "Operación"
                select name="operacion" {
                    @for o in Operation::ALL {
                        option value=(o.slug()) selected[op == Some(o)] { (o.label()) }
                    }
                }
            }
            label {
                "Tipo"
                select name="tipo" {
                    @for k in PropertyKind::ALL {
                        option value=(k.slug()) selected[kind == Some(k)] { (k.label()) }
                    }
                }
            }
            label { "Precio" input type="number" min="0" step="any" name="precio" required value=(text(|l| l.price.to_string())); }
            label { "Recámaras" input type="number" min="0" name="recamaras" value=(text(|l| l.bedrooms.to_string())); }
            label { "Baños" input type="number" min="0" name="banos" value=(text(|l| l.bathrooms.to_string())); }
            label { "Estacionamientos" input type="number" min="0" name="estacionamientos" value=(text(|l| l.parking.to_string())); }
            label { "Construcción (m²)" input type="number" min="0" step="any" name="construccion" value=(text(|l| l.built_area.to_string())); }
            label { "Terreno (m²)" input type="number" min="0" step="any" name="terreno" value=(text(|l| l.lot_area.to_string())); }
            label { "Antigüedad (años)" input type="number" min="0" step="any" name="antiguedad" value=(text(|l| l.age_years.to_string())); }
            label { "Calle" input type="text" name="calle" value=(text(|l| l.address.street.clone())); }
            label { "Colonia" input type="text" name="colonia" value=(text(|l| l.address.neighborhood.clone())); }
            label { "Ciudad" input type="text" name="ciudad" value=(text(|l| l.address.city.clone())); }
            label { "Estado" input type="text" name="estado" value=(text(|l| l.address.state.clone())); }
            label { "C.P." input type="text" name="cp" value=(text(|l| l.address.postal_code.clone())); }
            label { "Latitud" input type="number" step="any" name="lat" value=(text(|l| l.coordinates.map(|c| c.lat.to_string()).unwrap_or_default())); }
            label { "Longitud" input type="number" step="any" name="lng" value=(text(|l| l.coordinates.map(|c| c.lng.to_string()).unwrap_or_default())); }
            label style="grid-column: span 3;" {
                "Descripción"
                textarea name="descripcion" rows="3" { (text(|l| l.description.clone())) }
            }
            label style="grid-column: span 3;" {
                "Imágenes (una URL por línea, la primera es la portada)"
                textarea name="imagenes" rows="3" { (text(|l| l.images.join("\n"))) }
            }
            fieldset style="grid-column: span 3;" {
                legend { "Amenidades" }
                @for a in amenities {
                    label style="margin-right: 12px;" {
                        input type="checkbox" name="amenidad" value=(a.id) checked[selected_amenity(a.id)];
                        " " (a.name)
                    }
                }
            }
            label { input type="checkbox" name="amueblado" value="1" checked[existing.map(|l| l.furnished).unwrap_or(false)]; " Amueblado" }
            label { input type="checkbox" name="disponible" value="1" checked[existing.map(|l| l.available).unwrap_or(true)]; " Disponible" }
            label { input type="checkbox" name="destacado" value="1" checked[existing.map(|l| l.featured).unwrap_or(false)]; " Destacada" }
            button type="submit" style="padding: 8px 16px; background: #10b981; color: white; border: none; border-radius: 4px; cursor: pointer;" {
                @if existing.is_some() { "Guardar cambios" } @else { "Publicar" }
            }
        }
    }
}

pub fn admin_page(chrome: PageChrome, vm: &AdminVm) -> Markup {
    desktop_layout(
        "Administración",
        chrome,
        html! {
            div class="container" {
                h1 { "Administración de propiedades" }
                p { a href="/propiedades/exportar" { "Exportar todo a Excel" } }

                div class="card" style="margin-bottom: 2rem;" {
                    h3 { "Nueva propiedad" }
                    (listing_form("/admin/propiedades", None, &vm.amenities))
                }

                div class="card" {
                    h3 { "Propiedades (" (vm.listings.len()) ")" }
                    div style="overflow-x: auto;" {
                        table style="width: 100%; border-collapse: collapse; margin-top: 1rem;" {
                            thead {
                                tr {
                                    th style=(TH) { "ID" }
                                    th style=(TH) { "Título" }
                                    th style=(TH) { "Operación" }
                                    th style=(TH) { "Precio" }
                                    th style=(TH) { "Estado" }
                                    th style=(TH) { "Acciones" }
                                }
                            }
                            tbody {
                                @for listing in &vm.listings {
                                    tr {
                                        td style=(TD) { (listing.id) }
                                        td style=(TD) { a href=(format!("/propiedades/{}", listing.id)) { (listing.title) } }
                                        td style=(TD) { (listing.operation.label()) " · " (listing.kind.label()) }
                                        td style=(TD) { (format_price(listing.price)) }
                                        td style=(TD) {
                                            @if listing.available {
                                                span style="color: green;" { "Publicada" }
                                            } @else {
                                                span style="color: #6b7280;" { "Oculta" }
                                            }
                                        }
                                        td style=(TD) {
                                            details {
                                                summary { "Editar" }
                                                (listing_form(&format!("/admin/propiedades/{}", listing.id), Some(listing), &vm.amenities))
                                            }
                                            form action=(format!("/admin/propiedades/{}/eliminar", listing.id)) method="post" onsubmit="return confirm('¿Eliminar esta propiedad?');" style="margin: 0;" {
                                                button type="submit" style="color: #dc2626; background: none; border: none; cursor: pointer; font-size: 0.9em; font-weight: 500; padding: 0;" {
                                                    "Eliminar"
                                                }
                                            }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        },
    )
}
