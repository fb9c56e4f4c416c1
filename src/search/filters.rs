// src/search/filters.rs

use crate::domain::listing::{Operation, PropertyKind};
use serde::Serialize;

/// Every search predicate. `None` (or an empty `location`) means inactive.
///
/// `furnished` is a tri-state: `None` skips the check, `Some(false)` keeps
/// only unfurnished listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterState {
    pub operation: Option<Operation>,
    pub kind: Option<PropertyKind>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub bedrooms_min: Option<u32>,
    pub bathrooms_min: Option<u32>,
    pub parking_min: Option<u32>,
    pub location: String,
    pub area_min: Option<f64>,
    pub area_max: Option<f64>,
    pub furnished: Option<bool>,
}

impl FilterState {
    pub fn is_inactive(&self) -> bool {
        active_count(self) == 0
    }

    /// Location needle with surrounding whitespace removed; `None` when blank.
    pub fn location_needle(&self) -> Option<&str> {
        let needle = self.location.trim();
        (!needle.is_empty()).then_some(needle)
    }

    /// Bedrooms, bathrooms or location set: the caller expands the advanced panel.
    pub fn has_advanced(&self) -> bool {
        self.bedrooms_min.is_some() || self.bathrooms_min.is_some() || self.location_needle().is_some()
    }
}

/// Number of predicates that are set. `furnished: Some(false)` counts.
pub fn active_count(state: &FilterState) -> usize {
    [
        state.operation.is_some(),
        state.kind.is_some(),
        state.price_min.is_some(),
        state.price_max.is_some(),
        state.bedrooms_min.is_some(),
        state.bathrooms_min.is_some(),
        state.parking_min.is_some(),
        state.location_needle().is_some(),
        state.area_min.is_some(),
        state.area_max.is_some(),
        state.furnished.is_some(),
    ]
    .iter()
    .filter(|active| **active)
    .count()
}

/// Editable fields; `name()` is both the form input name and the query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Operation,
    Kind,
    PriceMin,
    PriceMax,
    BedroomsMin,
    BathroomsMin,
    ParkingMin,
    Location,
    AreaMin,
    AreaMax,
    Furnished,
}

impl FilterField {
    pub const ALL: [FilterField; 11] = [
        FilterField::Operation,
        FilterField::Kind,
        FilterField::PriceMin,
        FilterField::PriceMax,
        FilterField::BedroomsMin,
        FilterField::BathroomsMin,
        FilterField::ParkingMin,
        FilterField::Location,
        FilterField::AreaMin,
        FilterField::AreaMax,
        FilterField::Furnished,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterField::Operation => "operacion",
            FilterField::Kind => "tipo",
            FilterField::PriceMin => "precio_min",
            FilterField::PriceMax => "precio_max",
            FilterField::BedroomsMin => "recamaras",
            FilterField::BathroomsMin => "banos",
            FilterField::ParkingMin => "estacionamientos",
            FilterField::Location => "ubicacion",
            FilterField::AreaMin => "area_min",
            FilterField::AreaMax => "area_max",
            FilterField::Furnished => "amueblado",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Parses a non-negative, finite decimal. Blank or malformed text is `None`.
pub fn parse_amount(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Parses an "N+" threshold. Blank or malformed text is `None`.
pub fn parse_count(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok()
}

/// Tri-state parse: blank or unrecognised text is `None`.
pub fn parse_tristate(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "si" | "sí" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Result ordering. `Recientes` is the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Recientes,
    PrecioAsc,
    PrecioDesc,
    AreaAsc,
    AreaDesc,
    TituloAsc,
    TituloDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 7] = [
        SortKey::Recientes,
        SortKey::PrecioAsc,
        SortKey::PrecioDesc,
        SortKey::AreaAsc,
        SortKey::AreaDesc,
        SortKey::TituloAsc,
        SortKey::TituloDesc,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SortKey::Recientes => "recientes",
            SortKey::PrecioAsc => "precio_asc",
            SortKey::PrecioDesc => "precio_desc",
            SortKey::AreaAsc => "area_asc",
            SortKey::AreaDesc => "area_desc",
            SortKey::TituloAsc => "titulo_asc",
            SortKey::TituloDesc => "titulo_desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Recientes => "Más recientes",
            SortKey::PrecioAsc => "Precio: menor a mayor",
            SortKey::PrecioDesc => "Precio: mayor a menor",
            SortKey::AreaAsc => "Área: menor a mayor",
            SortKey::AreaDesc => "Área: mayor a menor",
            SortKey::TituloAsc => "Título: A-Z",
            SortKey::TituloDesc => "Título: Z-A",
        }
    }

    /// Unknown slugs fall back to the default ordering.
    pub fn parse(raw: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == raw.trim())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_inactive() {
        let state = FilterState::default();
        assert!(state.is_inactive());
        assert_eq!(active_count(&state), 0);
        assert!(!state.has_advanced());
    }

    #[test]
    fn furnished_false_counts_as_active() {
        let state = FilterState {
            furnished: Some(false),
            ..FilterState::default()
        };
        assert_eq!(active_count(&state), 1);
        assert!(!state.is_inactive());
    }

    #[test]
    fn blank_location_is_not_active() {
        let state = FilterState {
            location: "   ".into(),
            ..FilterState::default()
        };
        assert_eq!(active_count(&state), 0);
        assert_eq!(state.location_needle(), None);
    }

    #[test]
    fn counts_every_set_predicate() {
        let state = FilterState {
            operation: Some(Operation::Venta),
            kind: Some(PropertyKind::Casa),
            price_min: Some(1.0),
            price_max: Some(2.0),
            bedrooms_min: Some(3),
            bathrooms_min: Some(2),
            parking_min: Some(1),
            location: "Condesa".into(),
            area_min: Some(50.0),
            area_max: Some(300.0),
            furnished: Some(true),
        };
        assert_eq!(active_count(&state), 11);
        assert!(state.has_advanced());
    }

    #[test]
    fn field_names_round_trip() {
        for field in FilterField::ALL {
            assert_eq!(FilterField::from_name(field.name()), Some(field));
        }
        assert_eq!(FilterField::from_name("orden"), None);
    }

    #[test]
    fn amount_parse_rejects_garbage() {
        assert_eq!(parse_amount("9000000"), Some(9_000_000.0));
        assert_eq!(parse_amount(" 12.5 "), Some(12.5));
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("-1"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn count_parse_rejects_fractions() {
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("abc"), None);
        assert_eq!(parse_count("-2"), None);
    }

    #[test]
    fn tristate_parse() {
        assert_eq!(parse_tristate("true"), Some(true));
        assert_eq!(parse_tristate("false"), Some(false));
        assert_eq!(parse_tristate("No"), Some(false));
        assert_eq!(parse_tristate(""), None);
        assert_eq!(parse_tristate("maybe"), None);
    }

    #[test]
    fn unknown_sort_slug_is_default() {
        assert_eq!(SortKey::parse("precio_desc"), SortKey::PrecioDesc);
        assert_eq!(SortKey::parse("random"), SortKey::Recientes);
        assert_eq!(SortKey::parse(""), SortKey::Recientes);
    }
}
