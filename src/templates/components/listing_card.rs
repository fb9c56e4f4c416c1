use crate::domain::listing::{format_price, Listing, Operation};
use maud::{html, Markup};

pub fn listing_card(listing: &Listing) -> Markup {
    html! {
        article class="card listing-card" data-id=(listing.id) {
            a href=(format!("/propiedades/{}", listing.id)) {
                @if let Some(cover) = listing.cover_image() {
                    img src=(cover) alt=(listing.title) loading="lazy";
                }
                h2 { (listing.title) }
            }
            div class="card-body" {
                p class="price" {
                    (format_price(listing.price))
                    @if listing.operation == Operation::Renta { " / mes" }
                }
                p class="tags" {
                    span { (listing.operation.label()) }
                    " · "
                    span { (listing.kind.label()) }
                    @if listing.featured { " · " span class="badge" { "Destacada" } }
                }
                ul class="facts" {
                    li { (listing.bedrooms) " rec." }
                    li { (listing.bathrooms) " baños" }
                    li { (listing.parking) " est." }
                    li { (listing.built_area) " m²" }
                }
                p class="address" { (listing.address.one_line()) }
            }
        }
    }
}
