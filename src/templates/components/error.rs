use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};
use maud::{html, DOCTYPE};
use tracing::{error, warn};

/// Convert a ServerError into a proper HTML response page
pub fn html_error_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => render_error(404, "Página no encontrada"),

        ServerError::BadRequest(msg) => render_error(400, &msg),

        ServerError::Unauthorized(msg) => render_error(401, &msg),

        ServerError::DbError(msg) => {
            error!(error = %msg, "database error");
            render_error(500, "Error de base de datos")
        }

        ServerError::Upstream(msg) => {
            warn!(error = %msg, "upstream service failed");
            render_error(502, "Servicio externo no disponible")
        }

        ServerError::InternalError => render_error(500, "Error interno del servidor"),

        ServerError::XlsxError(msg) => {
            error!(error = %msg, "spreadsheet export failed");
            render_error(500, "No se pudo generar la hoja de cálculo")
        }
    }
}

/// Build a basic HTML error page
fn render_error(status: u16, message: &str) -> Response {
    let page = html! {
        (DOCTYPE)
        html lang="es" {
            head {
                meta charset="utf-8";
                title { "Error " (status) }
                style {
                    "body { font-family: system-ui, sans-serif; max-width: 720px; margin: 4rem auto; padding: 1rem; }"
                    "h1 { font-size: 2rem; margin-bottom: 1rem; }"
                    "p { font-size: 1.1rem; color: #444; }"
                }
            }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "← Volver al inicio" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::from("Error")))
}
