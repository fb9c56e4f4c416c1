// src/domain/listing.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Transaction kind of a listing. Slugs are the public query-string values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Venta,
    Renta,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::Venta, Operation::Renta];

    pub fn slug(self) -> &'static str {
        match self {
            Operation::Venta => "venta",
            Operation::Renta => "renta",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Venta => "Venta",
            Operation::Renta => "Renta",
        }
    }

    /// Unknown or empty slugs yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "venta" => Some(Operation::Venta),
            "renta" => Some(Operation::Renta),
            _ => None,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyKind {
    Casa,
    Departamento,
    Local,
    Terreno,
    Oficina,
}

impl PropertyKind {
    pub const ALL: [PropertyKind; 5] = [
        PropertyKind::Casa,
        PropertyKind::Departamento,
        PropertyKind::Local,
        PropertyKind::Terreno,
        PropertyKind::Oficina,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            PropertyKind::Casa => "casa",
            PropertyKind::Departamento => "departamento",
            PropertyKind::Local => "local",
            PropertyKind::Terreno => "terreno",
            PropertyKind::Oficina => "oficina",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropertyKind::Casa => "Casa",
            PropertyKind::Departamento => "Departamento",
            PropertyKind::Local => "Local comercial",
            PropertyKind::Terreno => "Terreno",
            PropertyKind::Oficina => "Oficina",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "casa" => Some(PropertyKind::Casa),
            "departamento" => Some(PropertyKind::Departamento),
            "local" => Some(PropertyKind::Local),
            "terreno" => Some(PropertyKind::Terreno),
            "oficina" => Some(PropertyKind::Oficina),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
}

impl Address {
    /// "street, neighborhood, city, state" skipping empty parts.
    pub fn one_line(&self) -> String {
        [
            self.street.as_str(),
            self.neighborhood.as_str(),
            self.city.as_str(),
            self.state.as_str(),
        ]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub id: i64,
    pub name: String,
    pub category: String,
}

/// A property as published on the site. Read-only from the search core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub operation: Operation,
    pub kind: PropertyKind,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    /// Constructed area in m².
    pub built_area: f64,
    pub lot_area: f64,
    pub age_years: f64,
    pub furnished: bool,
    pub address: Address,
    pub coordinates: Option<Coordinates>,
    /// Index 0 is the cover image.
    pub images: Vec<String>,
    pub available: bool,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
}

impl Listing {
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    /// Images after the cover, in their stored order.
    pub fn gallery(&self) -> &[String] {
        self.images.get(1..).unwrap_or(&[])
    }
}

/// Admin input shape: everything except the identifier and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub operation: Operation,
    pub kind: PropertyKind,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub parking: u32,
    pub built_area: f64,
    pub lot_area: f64,
    pub age_years: f64,
    pub furnished: bool,
    pub address: Address,
    pub coordinates: Option<Coordinates>,
    pub images: Vec<String>,
    pub available: bool,
    pub featured: bool,
    #[serde(default)]
    pub amenity_ids: Vec<i64>,
}

/// Formats a price the way the site shows it: "$8,500,000".
pub fn format_price(price: f64) -> String {
    let whole = price.round() as i64;
    let digits = whole.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if whole < 0 {
        format!("-${out}")
    } else {
        format!("${out}")
    }
}
