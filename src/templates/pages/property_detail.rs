use crate::domain::listing::{format_price, Listing, Operation};
use crate::templates::{desktop_layout, PageChrome};
use maud::{html, Markup};

pub fn property_detail_page(chrome: PageChrome, listing: &Listing) -> Markup {
    desktop_layout(
        &listing.title,
        chrome,
        html! {
            article class="property-detail" {
                a href="/propiedades" { "← Volver a resultados" }
                h1 { (listing.title) }
                p class="price" {
                    (format_price(listing.price))
                    @if listing.operation == Operation::Renta { " / mes" }
                }
                p { (listing.operation.label()) " · " (listing.kind.label()) }

                @if let Some(cover) = listing.cover_image() {
                    img class="cover" src=(cover) alt=(listing.title);
                }
                @if !listing.gallery().is_empty() {
                    div class="gallery" {
                        @for url in listing.gallery() {
                            img src=(url) alt=(listing.title) loading="lazy";
                        }
                    }
                }

                section class="card" {
                    h3 { "Características" }
                    dl {
                        dt { "Recámaras" } dd { (listing.bedrooms) }
                        dt { "Baños" } dd { (listing.bathrooms) }
                        dt { "Estacionamientos" } dd { (listing.parking) }
                        dt { "Construcción" } dd { (listing.built_area) " m²" }
                        @if listing.lot_area > 0.0 {
                            dt { "Terreno" } dd { (listing.lot_area) " m²" }
                        }
                        dt { "Antigüedad" } dd { (listing.age_years) " años" }
                        dt { "Amueblado" } dd { @if listing.furnished { "Sí" } @else { "No" } }
                    }
                }

                @if !listing.amenities.is_empty() {
                    section class="card" {
                        h3 { "Amenidades" }
                        ul class="amenities" {
                            @for amenity in &listing.amenities {
                                li { (amenity.name) }
                            }
                        }
                    }
                }

                section class="card" {
                    h3 { "Ubicación" }
                    p { (listing.address.one_line()) }
                    @if let Some(c) = listing.coordinates {
                        a href=(format!("https://www.openstreetmap.org/?mlat={}&mlon={}#map=17/{}/{}", c.lat, c.lng, c.lat, c.lng)) {
                            "Ver en el mapa"
                        }
                    }
                }

                @if !listing.description.is_empty() {
                    section { p { (listing.description) } }
                }
            }
        },
    )
}
