// src/forms.rs
//
// Request body decoding for the HTML forms.

use crate::domain::listing::{Address, Coordinates, NewListing, Operation, PropertyKind};
use crate::errors::ServerError;
use astra::Request;
use std::io::Read;
use url::form_urlencoded;

/// Upper bound on a form body; the listing form is a few KB at most.
const MAX_FORM_BYTES: u64 = 64 * 1024;

/// Decoded `application/x-www-form-urlencoded` pairs, in submit order.
#[derive(Debug, Default, Clone)]
pub struct FormData {
    pairs: Vec<(String, String)>,
}

impl FormData {
    pub fn parse(raw: &str) -> Self {
        Self {
            pairs: form_urlencoded::parse(raw.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect(),
        }
    }

    pub fn from_request(req: &mut Request) -> Result<Self, ServerError> {
        let mut raw = String::new();
        req.body_mut()
            .reader()
            .take(MAX_FORM_BYTES)
            .read_to_string(&mut raw)
            .map_err(|e| ServerError::BadRequest(format!("unreadable form body: {e}")))?;
        Ok(Self::parse(&raw))
    }

    /// Last value for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn text(&self, name: &str) -> String {
        self.get(name).map(|v| v.trim().to_string()).unwrap_or_default()
    }

    fn checked(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    fn number(&self, name: &str, label: &str) -> Result<Option<f64>, ServerError> {
        match self.get(name).map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(None),
            Some(raw) => raw
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ServerError::BadRequest(format!("{label}: '{raw}' no es un número"))),
        }
    }

    fn count(&self, name: &str, label: &str) -> Result<u32, ServerError> {
        match self.get(name).map(str::trim).filter(|v| !v.is_empty()) {
            None => Ok(0),
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| ServerError::BadRequest(format!("{label}: '{raw}' no es un entero"))),
        }
    }
}

/// Builds the admin input from the listing form. Range checks happen in the store.
pub fn new_listing_from_form(form: &FormData) -> Result<NewListing, ServerError> {
    let operation = Operation::parse(&form.text("operacion"))
        .ok_or_else(|| ServerError::BadRequest("operación inválida".into()))?;
    let kind = PropertyKind::parse(&form.text("tipo"))
        .ok_or_else(|| ServerError::BadRequest("tipo de propiedad inválido".into()))?;
    let price = form
        .number("precio", "precio")?
        .ok_or_else(|| ServerError::BadRequest("el precio es obligatorio".into()))?;

    let coordinates = match (form.number("lat", "latitud")?, form.number("lng", "longitud")?) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        (None, None) => None,
        _ => {
            return Err(ServerError::BadRequest(
                "latitud y longitud van juntas".into(),
            ))
        }
    };

    let images = form
        .get("imagenes")
        .unwrap_or("")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect();

    let amenity_ids = form
        .get_all("amenidad")
        .map(|raw| {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| ServerError::BadRequest(format!("amenidad inválida: '{raw}'")))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewListing {
        title: form.text("titulo"),
        description: form.text("descripcion"),
        price,
        operation,
        kind,
        bedrooms: form.count("recamaras", "recámaras")?,
        bathrooms: form.count("banos", "baños")?,
        parking: form.count("estacionamientos", "estacionamientos")?,
        built_area: form.number("construccion", "construcción")?.unwrap_or(0.0),
        lot_area: form.number("terreno", "terreno")?.unwrap_or(0.0),
        age_years: form.number("antiguedad", "antigüedad")?.unwrap_or(0.0),
        furnished: form.checked("amueblado"),
        address: Address {
            street: form.text("calle"),
            neighborhood: form.text("colonia"),
            city: form.text("ciudad"),
            state: form.text("estado"),
            postal_code: form.text("cp"),
        },
        coordinates,
        images,
        available: form.checked("disponible"),
        featured: form.checked("destacado"),
        amenity_ids,
    })
}
