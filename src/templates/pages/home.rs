// templates/pages/home.rs

use crate::domain::listing::Listing;
use crate::search::controller::Preset;
use crate::templates::{components::listing_card, desktop_layout, PageChrome};
use maud::{html, Markup};

pub fn home_page(chrome: PageChrome, featured: &[&Listing]) -> Markup {
    desktop_layout(
        "Inicio",
        chrome,
        html! {
            section class="hero" {
                h1 { "Encuentra tu próximo hogar" }
                form action="/propiedades" method="get" {
                    input type="hidden" name="enviar" value="1";
                    input type="search" name="ubicacion" placeholder="¿Dónde buscas?";
                    button type="submit" class="btn" { "Buscar" }
                }
                ul class="presets" {
                    @for preset in Preset::ALL {
                        li { a href=(format!("/propiedades?preset={}", preset.slug())) { (preset.label()) } }
                    }
                }
            }

            section {
                h2 { "Propiedades destacadas" }
                @if featured.is_empty() {
                    p { "Pronto publicaremos nuevas propiedades." }
                } @else {
                    div class="grid" {
                        @for listing in featured {
                            (listing_card(listing))
                        }
                    }
                }
                a href="/propiedades" { "Ver todas las propiedades" }
            }
        },
    )
}
