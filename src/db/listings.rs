use crate::db::connection::Database;
use crate::db::source::{ListingSource, ListingStore};
use crate::domain::listing::{
    Address, Amenity, Coordinates, Listing, NewListing, Operation, PropertyKind,
};
use crate::errors::ServerError;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::collections::HashMap;
use tracing::info;

const SELECT_LISTINGS: &str = r#"
    SELECT
        id, title, description, price, operation, kind,
        bedrooms, bathrooms, parking, built_area, lot_area, age_years, furnished,
        street, neighborhood, city, state, postal_code, latitude, longitude,
        available, featured, created_at, updated_at
    FROM listings
"#;

/// SQLite-backed listing collection.
///
/// `public` handles only see available listings; `admin` handles see everything.
#[derive(Clone, Debug)]
pub struct SqliteListings {
    db: Database,
    only_available: bool,
}

impl SqliteListings {
    pub fn public(db: &Database) -> Self {
        Self {
            db: db.clone(),
            only_available: true,
        }
    }

    pub fn admin(db: &Database) -> Self {
        Self {
            db: db.clone(),
            only_available: false,
        }
    }
}

fn conversion_error(idx: usize, msg: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, msg.into())
}

/// Maps a `SELECT_LISTINGS` row. Images and amenities are attached afterwards.
fn row_to_listing(row: &Row<'_>) -> rusqlite::Result<Listing> {
    let operation: String = row.get(4)?;
    let kind: String = row.get(5)?;
    let latitude: Option<f64> = row.get(18)?;
    let longitude: Option<f64> = row.get(19)?;

    Ok(Listing {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        operation: Operation::parse(&operation)
            .ok_or_else(|| conversion_error(4, format!("unknown operation '{operation}'")))?,
        kind: PropertyKind::parse(&kind)
            .ok_or_else(|| conversion_error(5, format!("unknown kind '{kind}'")))?,
        bedrooms: row.get(6)?,
        bathrooms: row.get(7)?,
        parking: row.get(8)?,
        built_area: row.get(9)?,
        lot_area: row.get(10)?,
        age_years: row.get(11)?,
        furnished: row.get(12)?,
        address: Address {
            street: row.get(13)?,
            neighborhood: row.get(14)?,
            city: row.get(15)?,
            state: row.get(16)?,
            postal_code: row.get(17)?,
        },
        coordinates: latitude.zip(longitude).map(|(lat, lng)| Coordinates { lat, lng }),
        available: row.get(20)?,
        featured: row.get(21)?,
        created_at: row.get(22)?,
        updated_at: row.get(23)?,
        images: Vec::new(),
        amenities: Vec::new(),
    })
}

fn load_images(conn: &Connection) -> Result<HashMap<i64, Vec<String>>, ServerError> {
    let mut stmt = conn.prepare(
        "SELECT listing_id, url FROM listing_images ORDER BY listing_id, position",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))?;

    let mut out: HashMap<i64, Vec<String>> = HashMap::new();
    for r in rows {
        let (listing_id, url) = r?;
        out.entry(listing_id).or_default().push(url);
    }
    Ok(out)
}

fn load_amenities(conn: &Connection) -> Result<HashMap<i64, Vec<Amenity>>, ServerError> {
    let mut stmt = conn.prepare(
        r#"
        SELECT la.listing_id, a.id, a.name, a.category
        FROM listing_amenities la
        JOIN amenities a ON a.id = la.amenity_id
        ORDER BY la.listing_id, a.category, a.name
        "#,
    )?;
    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            Amenity {
                id: row.get(1)?,
                name: row.get(2)?,
                category: row.get(3)?,
            },
        ))
    })?;

    let mut out: HashMap<i64, Vec<Amenity>> = HashMap::new();
    for r in rows {
        let (listing_id, amenity) = r?;
        out.entry(listing_id).or_default().push(amenity);
    }
    Ok(out)
}

fn attach_children(conn: &Connection, listings: &mut [Listing]) -> Result<(), ServerError> {
    let mut images = load_images(conn)?;
    let mut amenities = load_amenities(conn)?;
    for listing in listings.iter_mut() {
        listing.images = images.remove(&listing.id).unwrap_or_default();
        listing.amenities = amenities.remove(&listing.id).unwrap_or_default();
    }
    Ok(())
}

fn write_children(conn: &Connection, id: i64, input: &NewListing) -> Result<(), ServerError> {
    conn.execute("DELETE FROM listing_images WHERE listing_id = ?1", params![id])?;
    for (position, url) in input.images.iter().enumerate() {
        conn.execute(
            "INSERT INTO listing_images (listing_id, position, url) VALUES (?1, ?2, ?3)",
            params![id, position as i64, url],
        )?;
    }

    conn.execute("DELETE FROM listing_amenities WHERE listing_id = ?1", params![id])?;
    for amenity_id in &input.amenity_ids {
        let known: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM amenities WHERE id = ?1)",
            params![amenity_id],
            |row| row.get(0),
        )?;
        if !known {
            return Err(ServerError::BadRequest(format!(
                "unknown amenity id {amenity_id}"
            )));
        }
        conn.execute(
            "INSERT OR IGNORE INTO listing_amenities (listing_id, amenity_id) VALUES (?1, ?2)",
            params![id, amenity_id],
        )?;
    }
    Ok(())
}

fn find_listing(conn: &Connection, id: i64) -> Result<Option<Listing>, ServerError> {
    let sql = format!("{SELECT_LISTINGS} WHERE id = ?1");
    let found = conn.query_row(&sql, params![id], row_to_listing).optional()?;

    let Some(mut listing) = found else {
        return Ok(None);
    };

    let mut stmt =
        conn.prepare("SELECT url FROM listing_images WHERE listing_id = ?1 ORDER BY position")?;
    listing.images = stmt
        .query_map(params![id], |row| row.get::<_, String>(0))?
        .collect::<Result<_, _>>()?;

    let mut stmt = conn.prepare(
        r#"
        SELECT a.id, a.name, a.category
        FROM listing_amenities la
        JOIN amenities a ON a.id = la.amenity_id
        WHERE la.listing_id = ?1
        ORDER BY a.category, a.name
        "#,
    )?;
    listing.amenities = stmt
        .query_map(params![id], |row| {
            Ok(Amenity {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
            })
        })?
        .collect::<Result<_, _>>()?;

    Ok(Some(listing))
}

fn validate(input: &NewListing) -> Result<(), ServerError> {
    if input.title.trim().is_empty() {
        return Err(ServerError::BadRequest("title is required".into()));
    }
    let amounts = [
        ("price", input.price),
        ("built_area", input.built_area),
        ("lot_area", input.lot_area),
        ("age_years", input.age_years),
    ];
    for (name, value) in amounts {
        if !value.is_finite() || value < 0.0 {
            return Err(ServerError::BadRequest(format!(
                "{name} must be a non-negative number"
            )));
        }
    }
    Ok(())
}

impl ListingSource for SqliteListings {
    fn list_all(&self) -> Result<Vec<Listing>, ServerError> {
        let only_available = self.only_available;
        self.db.with_conn(|conn| {
            let sql = if only_available {
                format!("{SELECT_LISTINGS} WHERE available = 1 ORDER BY id")
            } else {
                format!("{SELECT_LISTINGS} ORDER BY id")
            };
            let mut stmt = conn.prepare(&sql)?;
            let mut listings = stmt
                .query_map([], row_to_listing)?
                .collect::<Result<Vec<_>, _>>()?;
            attach_children(conn, &mut listings)?;
            Ok(listings)
        })
    }
}

impl ListingStore for SqliteListings {
    fn get(&self, id: i64) -> Result<Listing, ServerError> {
        let only_available = self.only_available;
        self.db.with_conn(|conn| match find_listing(conn, id)? {
            Some(l) if l.available || !only_available => Ok(l),
            _ => Err(ServerError::NotFound),
        })
    }

    fn create(&self, input: &NewListing) -> Result<Listing, ServerError> {
        validate(input)?;
        let now: DateTime<Utc> = Utc::now();

        let id = self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                r#"
                INSERT INTO listings (
                    title, description, price, operation, kind,
                    bedrooms, bathrooms, parking, built_area, lot_area, age_years, furnished,
                    street, neighborhood, city, state, postal_code, latitude, longitude,
                    available, featured, created_at, updated_at
                ) VALUES (
                    ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12,
                    ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?22
                )
                "#,
                params![
                    input.title.trim(),
                    input.description,
                    input.price,
                    input.operation.slug(),
                    input.kind.slug(),
                    input.bedrooms,
                    input.bathrooms,
                    input.parking,
                    input.built_area,
                    input.lot_area,
                    input.age_years,
                    input.furnished,
                    input.address.street,
                    input.address.neighborhood,
                    input.address.city,
                    input.address.state,
                    input.address.postal_code,
                    input.coordinates.map(|c| c.lat),
                    input.coordinates.map(|c| c.lng),
                    input.available,
                    input.featured,
                    now,
                ],
            )?;
            let id = tx.last_insert_rowid();
            write_children(&tx, id, input)?;
            tx.commit()?;
            Ok(id)
        })?;

        info!(id, title = %input.title, "listing created");
        ListingStore::get(&SqliteListings::admin(&self.db), id)
    }

    fn update(&self, id: i64, input: &NewListing) -> Result<Listing, ServerError> {
        validate(input)?;
        let now: DateTime<Utc> = Utc::now();

        self.db.with_conn(|conn| {
            let tx = conn.transaction()?;
            let changed = tx.execute(
                r#"
                UPDATE listings SET
                    title = ?2, description = ?3, price = ?4, operation = ?5, kind = ?6,
                    bedrooms = ?7, bathrooms = ?8, parking = ?9, built_area = ?10,
                    lot_area = ?11, age_years = ?12, furnished = ?13,
                    street = ?14, neighborhood = ?15, city = ?16, state = ?17,
                    postal_code = ?18, latitude = ?19, longitude = ?20,
                    available = ?21, featured = ?22, updated_at = ?23
                WHERE id = ?1
                "#,
                params![
                    id,
                    input.title.trim(),
                    input.description,
                    input.price,
                    input.operation.slug(),
                    input.kind.slug(),
                    input.bedrooms,
                    input.bathrooms,
                    input.parking,
                    input.built_area,
                    input.lot_area,
                    input.age_years,
                    input.furnished,
                    input.address.street,
                    input.address.neighborhood,
                    input.address.city,
                    input.address.state,
                    input.address.postal_code,
                    input.coordinates.map(|c| c.lat),
                    input.coordinates.map(|c| c.lng),
                    input.available,
                    input.featured,
                    now,
                ],
            )?;
            if changed == 0 {
                return Err(ServerError::NotFound);
            }
            write_children(&tx, id, input)?;
            tx.commit()?;
            Ok(())
        })?;

        info!(id, "listing updated");
        ListingStore::get(&SqliteListings::admin(&self.db), id)
    }

    fn delete(&self, id: i64) -> Result<(), ServerError> {
        let deleted = self
            .db
            .with_conn(|conn| Ok(conn.execute("DELETE FROM listings WHERE id = ?1", params![id])?))?;
        if deleted == 0 {
            return Err(ServerError::NotFound);
        }
        info!(id, "listing deleted");
        Ok(())
    }

    fn amenities(&self) -> Result<Vec<Amenity>, ServerError> {
        self.db.with_conn(|conn| {
            let mut stmt =
                conn.prepare("SELECT id, name, category FROM amenities ORDER BY category, name")?;
            let rows = stmt
                .query_map([], |row| {
                    Ok(Amenity {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        category: row.get(2)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            Ok(rows)
        })
    }
}
