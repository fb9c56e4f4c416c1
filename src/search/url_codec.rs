// src/search/url_codec.rs
//
// FilterState <-> query string. Inactive predicates are never written, and
// anything unreadable on the way back in decodes to the inactive value.

use crate::domain::listing::{Operation, PropertyKind};
use crate::search::filters::{
    parse_amount, parse_count, parse_tristate, FilterField, FilterState, SortKey,
};
use url::form_urlencoded;

pub const SORT_PARAM: &str = "orden";

/// Writes one parameter per active predicate, in `FilterField::ALL` order.
pub fn encode(state: &FilterState) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (name, value) in encoded_pairs(state) {
        out.append_pair(name, &value);
    }
    out.finish()
}

/// Same as `encode`, plus `orden` when the key isn't the default.
pub fn encode_with_sort(state: &FilterState, sort: SortKey) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (name, value) in encoded_pairs(state) {
        out.append_pair(name, &value);
    }
    if sort != SortKey::default() {
        out.append_pair(SORT_PARAM, sort.slug());
    }
    out.finish()
}

fn encoded_pairs(state: &FilterState) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();
    let mut push = |field: FilterField, value: Option<String>| {
        if let Some(v) = value {
            pairs.push((field.name(), v));
        }
    };

    push(FilterField::Operation, state.operation.map(|o| o.slug().to_string()));
    push(FilterField::Kind, state.kind.map(|k| k.slug().to_string()));
    push(FilterField::PriceMin, state.price_min.map(|v| v.to_string()));
    push(FilterField::PriceMax, state.price_max.map(|v| v.to_string()));
    push(FilterField::BedroomsMin, state.bedrooms_min.map(|v| v.to_string()));
    push(FilterField::BathroomsMin, state.bathrooms_min.map(|v| v.to_string()));
    push(FilterField::ParkingMin, state.parking_min.map(|v| v.to_string()));
    push(
        FilterField::Location,
        state.location_needle().map(|_| state.location.clone()),
    );
    push(FilterField::AreaMin, state.area_min.map(|v| v.to_string()));
    push(FilterField::AreaMax, state.area_max.map(|v| v.to_string()));
    push(FilterField::Furnished, state.furnished.map(|v| v.to_string()));

    pairs
}

fn strip_question_mark(query: &str) -> &str {
    query.strip_prefix('?').unwrap_or(query)
}

/// Decodes a query string (leading `?` optional). Never fails.
pub fn decode(query: &str) -> FilterState {
    let mut state = FilterState::default();
    for (name, value) in form_urlencoded::parse(strip_question_mark(query).as_bytes()) {
        if let Some(field) = FilterField::from_name(&name) {
            set_field(&mut state, field, &value);
        }
    }
    state
}

/// Reads `orden`; missing or unknown means the default key.
pub fn decode_sort(query: &str) -> SortKey {
    form_urlencoded::parse(strip_question_mark(query).as_bytes())
        .filter(|(name, _)| name == SORT_PARAM)
        .last()
        .map(|(_, value)| SortKey::parse(&value))
        .unwrap_or_default()
}

/// Looks up a single raw parameter value (last occurrence wins).
pub fn param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(strip_question_mark(query).as_bytes())
        .filter(|(k, _)| k == name)
        .last()
        .map(|(_, v)| v.into_owned())
}

/// Typed decode of one raw value into its field. Shared with the form controller,
/// so a field edit and a URL parameter always agree.
pub(crate) fn set_field(state: &mut FilterState, field: FilterField, raw: &str) {
    match field {
        FilterField::Operation => state.operation = Operation::parse(raw),
        FilterField::Kind => state.kind = PropertyKind::parse(raw),
        FilterField::PriceMin => state.price_min = parse_amount(raw),
        FilterField::PriceMax => state.price_max = parse_amount(raw),
        FilterField::BedroomsMin => state.bedrooms_min = parse_count(raw),
        FilterField::BathroomsMin => state.bathrooms_min = parse_count(raw),
        FilterField::ParkingMin => state.parking_min = parse_count(raw),
        FilterField::Location => {
            state.location = if raw.trim().is_empty() {
                String::new()
            } else {
                raw.to_string()
            }
        }
        FilterField::AreaMin => state.area_min = parse_amount(raw),
        FilterField::AreaMax => state.area_max = parse_amount(raw),
        FilterField::Furnished => state.furnished = parse_tristate(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_state_encodes_to_empty_string() {
        assert_eq!(encode(&FilterState::default()), "");
    }

    #[test]
    fn encode_skips_inactive_and_writes_plain_decimals() {
        let state = FilterState {
            operation: Some(Operation::Venta),
            price_min: Some(9_000_000.0),
            area_max: Some(120.5),
            location: "Roma Norte".into(),
            furnished: Some(false),
            ..FilterState::default()
        };
        assert_eq!(
            encode(&state),
            "operacion=venta&precio_min=9000000&ubicacion=Roma+Norte&area_max=120.5&amueblado=false"
        );
    }

    #[test]
    fn decode_reads_every_known_param() {
        let state = decode(
            "?operacion=renta&tipo=departamento&precio_min=1000&precio_max=25000&recamaras=2\
             &banos=1&estacionamientos=1&ubicacion=Del+Valle&area_min=40&area_max=90&amueblado=true",
        );
        assert_eq!(state.operation, Some(Operation::Renta));
        assert_eq!(state.kind, Some(PropertyKind::Departamento));
        assert_eq!(state.price_min, Some(1000.0));
        assert_eq!(state.price_max, Some(25000.0));
        assert_eq!(state.bedrooms_min, Some(2));
        assert_eq!(state.bathrooms_min, Some(1));
        assert_eq!(state.parking_min, Some(1));
        assert_eq!(state.location, "Del Valle");
        assert_eq!(state.area_min, Some(40.0));
        assert_eq!(state.area_max, Some(90.0));
        assert_eq!(state.furnished, Some(true));
    }

    #[test]
    fn malformed_bedrooms_decode_to_inactive() {
        let state = decode("?recamaras=abc");
        assert_eq!(state.bedrooms_min, None);
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn malformed_values_fail_open() {
        let state = decode("precio_min=lots&tipo=castillo&operacion=&amueblado=quizas&banos=-1");
        assert_eq!(state, FilterState::default());
    }

    #[test]
    fn unknown_params_are_ignored() {
        let state = decode("utm_source=newsletter&tipo=casa&page=2");
        assert_eq!(
            state,
            FilterState {
                kind: Some(PropertyKind::Casa),
                ..FilterState::default()
            }
        );
    }

    #[test]
    fn percent_encoded_location_decodes() {
        let state = decode("ubicacion=Coyoac%C3%A1n");
        assert_eq!(state.location, "Coyoacán");
    }

    #[test]
    fn last_repeated_param_wins() {
        assert_eq!(decode("recamaras=2&recamaras=4").bedrooms_min, Some(4));
    }

    #[test]
    fn decode_is_idempotent_through_encode() {
        let queries = [
            "",
            "ubicacion=%20%20",
            "?operacion=venta&tipo=casa",
            "precio_min=abc&recamaras=3&ubicacion=%20condesa%20",
            "amueblado=false&area_min=10.25&foo=bar",
            "ubicacion=San+Pedro+Garza+Garc%C3%ADa&estacionamientos=2",
        ];
        for q in queries {
            let once = decode(q);
            assert_eq!(decode(&encode(&once)), once, "query {q}");
        }
    }

    #[test]
    fn sort_param_round_trips_and_defaults() {
        let state = FilterState {
            kind: Some(PropertyKind::Oficina),
            ..FilterState::default()
        };
        let q = encode_with_sort(&state, SortKey::PrecioDesc);
        assert_eq!(q, "tipo=oficina&orden=precio_desc");
        assert_eq!(decode_sort(&q), SortKey::PrecioDesc);
        assert_eq!(decode(&q), state);

        assert_eq!(encode_with_sort(&state, SortKey::Recientes), "tipo=oficina");
        assert_eq!(decode_sort("orden=bogus"), SortKey::Recientes);
        assert_eq!(decode_sort(""), SortKey::Recientes);
    }
}
