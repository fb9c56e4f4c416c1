use crate::domain::listing::Listing;
use crate::errors::ServerError;
use crate::responses::xlsx_response;
use crate::responses::ResultResp;
use rust_xlsxwriter::{Workbook, XlsxError};

const HEADERS: [&str; 16] = [
    "ID",
    "Título",
    "Operación",
    "Tipo",
    "Precio",
    "Recámaras",
    "Baños",
    "Estacionamientos",
    "Construcción (m²)",
    "Terreno (m²)",
    "Amueblado",
    "Dirección",
    "Colonia",
    "Ciudad",
    "Estado",
    "Portada",
];

fn cell_err(what: &'static str) -> impl Fn(XlsxError) -> ServerError {
    move |e| ServerError::XlsxError(format!("Failed to write {what}: {e}"))
}

/// One row per listing, in the order given (the page's filtered, sorted order).
pub fn build_listings_workbook(listings: &[&Listing]) -> Result<Vec<u8>, ServerError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string(0, col as u16, *header)
            .map_err(|e| {
                ServerError::XlsxError(format!("Failed to write header '{}': {}", header, e))
            })?;
    }

    for (i, listing) in listings.iter().enumerate() {
        let r = (i + 1) as u32;
        let addr = &listing.address;

        worksheet
            .write_number(r, 0, listing.id as f64)
            .map_err(cell_err("id"))?;
        worksheet
            .write_string(r, 1, &listing.title)
            .map_err(cell_err("title"))?;
        worksheet
            .write_string(r, 2, listing.operation.label())
            .map_err(cell_err("operation"))?;
        worksheet
            .write_string(r, 3, listing.kind.label())
            .map_err(cell_err("kind"))?;
        worksheet
            .write_number(r, 4, listing.price)
            .map_err(cell_err("price"))?;
        worksheet
            .write_number(r, 5, listing.bedrooms as f64)
            .map_err(cell_err("bedrooms"))?;
        worksheet
            .write_number(r, 6, listing.bathrooms as f64)
            .map_err(cell_err("bathrooms"))?;
        worksheet
            .write_number(r, 7, listing.parking as f64)
            .map_err(cell_err("parking"))?;
        worksheet
            .write_number(r, 8, listing.built_area)
            .map_err(cell_err("built area"))?;
        worksheet
            .write_number(r, 9, listing.lot_area)
            .map_err(cell_err("lot area"))?;
        worksheet
            .write_string(r, 10, if listing.furnished { "Sí" } else { "No" })
            .map_err(cell_err("furnished"))?;
        worksheet
            .write_string(r, 11, &addr.street)
            .map_err(cell_err("street"))?;
        worksheet
            .write_string(r, 12, &addr.neighborhood)
            .map_err(cell_err("neighborhood"))?;
        worksheet
            .write_string(r, 13, &addr.city)
            .map_err(cell_err("city"))?;
        worksheet
            .write_string(r, 14, &addr.state)
            .map_err(cell_err("state"))?;
        worksheet
            .write_string(r, 15, listing.cover_image().unwrap_or(""))
            .map_err(cell_err("cover image"))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| ServerError::XlsxError(format!("Failed to save workbook: {}", e)))
}

pub fn export_listings_xlsx(listings: &[&Listing], filename: &str) -> ResultResp {
    let buffer = build_listings_workbook(listings)?;
    xlsx_response(buffer, filename)
}
