use crate::lifecycle::AppLifecycle;
use maud::{html, Markup, DOCTYPE};

/// Per-request facts the layout needs besides the page body.
#[derive(Debug, Clone, Copy)]
pub struct PageChrome {
    pub lifecycle: AppLifecycle,
    pub is_admin: bool,
}

impl PageChrome {
    pub fn new(lifecycle: AppLifecycle, is_admin: bool) -> Self {
        Self {
            lifecycle,
            is_admin,
        }
    }
}

pub fn desktop_layout(title: &str, chrome: PageChrome, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " · Inmobiliaria" }
                link rel="icon" href="/static/favicon/favicon.ico";
                link rel="stylesheet" href="/static/main.css";
            }
            body {
                @if chrome.lifecycle.first_visit {
                    div id="intro" class="intro-splash" {
                        h1 { "Bienvenido" }
                        p { "Encuentra tu próxima casa, departamento u oficina." }
                        a href="#contenido" { "Entrar" }
                    }
                }
                header class="flex items-center justify-between px-6 py-3 shadow" {
                    svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="24"
                        height="24"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="#524ed2"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        class="icon icon-tabler icon-tabler-home"
                    {
                        path stroke="none" d="M0 0h24v24H0z" fill="none" {}
                        path d="M5 12l-2 0l9 -9l9 9l-2 0" {}
                        path d="M5 12v7a2 2 0 0 0 2 2h10a2 2 0 0 0 2 -2v-7" {}
                        path d="M9 21v-6a2 2 0 0 1 2 -2h2a2 2 0 0 1 2 2v6" {}
                    }
                    h3 { "Inmobiliaria" }
                    nav {
                        ul {
                            li { a href="/" { "Inicio" } }
                            li { a href="/propiedades" { "Propiedades" } }
                            @if chrome.is_admin {
                                li { a href="/admin" { "Admin" } }
                            }
                        }
                    }
                }
                main id="contenido" {
                    (content)
                }
            }
        }
    }
}
