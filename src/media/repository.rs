use crate::media::model::{
    Category, CategoryCard, MediaFilter, MediaReference, NewMediaReference, SortOrder,
};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

// ── Private helpers ───────────────────────────────────────────────────────────

/// Execute a prepared statement, collect all rows with `f`, and return a Vec.
fn collect_rows<T, F>(
    conn: &Connection,
    sql: &str,
    params: impl rusqlite::Params,
    f: F,
) -> rusqlite::Result<Vec<T>>
where
    F: Fn(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
{
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params, f)?;
    rows.collect()
}

/// Read a TEXT column into one of the closed enums.
fn parse_column<T>(row: &rusqlite::Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr<Err = String>,
{
    let text: String = row.get(idx)?;
    text.parse().map_err(|e: String| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, e.into())
    })
}

const MEDIA_COLUMNS: &str = "id, media_type, category, embed_url, full_url, title, created_at";

fn media_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediaReference> {
    Ok(MediaReference {
        id: row.get(0)?,
        media_type: parse_column(row, 1)?,
        category: parse_column(row, 2)?,
        raw_url: row.get(3)?,
        full_resolution_url: row.get(4)?,
        title: row.get(5)?,
        created_at: row.get(6)?,
    })
}

/// Fixed-width UTC timestamp so lexical order matches chronological order.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

// ── Portfolio items ───────────────────────────────────────────────────────────

/// Insert a new portfolio item. The store assigns the id and timestamp.
pub fn insert_media(conn: &Connection, new: &NewMediaReference) -> rusqlite::Result<MediaReference> {
    let id = uuid::Uuid::now_v7().to_string();
    let created_at = now_timestamp();
    conn.execute(
        "INSERT INTO portfolio_items (id, media_type, category, embed_url, full_url, title, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            id,
            new.media_type.as_str(),
            new.category.slug(),
            new.raw_url,
            new.full_resolution_url,
            new.title,
            created_at
        ],
    )?;
    Ok(MediaReference {
        id,
        media_type: new.media_type,
        category: new.category,
        raw_url: new.raw_url.clone(),
        full_resolution_url: new.full_resolution_url.clone(),
        title: new.title.clone(),
        created_at,
    })
}

pub fn get_media(conn: &Connection, id: &str) -> rusqlite::Result<Option<MediaReference>> {
    conn.query_row(
        &format!("SELECT {} FROM portfolio_items WHERE id = ?1", MEDIA_COLUMNS),
        params![id],
        media_from_row,
    )
    .optional()
}

/// Overwrite the editable fields of an item. `created_at` is preserved so
/// ordering does not change on edit. Returns `None` if the id is unknown.
pub fn update_media(
    conn: &Connection,
    id: &str,
    new: &NewMediaReference,
) -> rusqlite::Result<Option<MediaReference>> {
    let changed = conn.execute(
        "UPDATE portfolio_items
            SET media_type = ?1, category = ?2, embed_url = ?3, full_url = ?4, title = ?5
          WHERE id = ?6",
        params![
            new.media_type.as_str(),
            new.category.slug(),
            new.raw_url,
            new.full_resolution_url,
            new.title,
            id
        ],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    get_media(conn, id)
}

/// Returns true if a row was deleted.
pub fn delete_media(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute("DELETE FROM portfolio_items WHERE id = ?1", params![id])?;
    Ok(changed > 0)
}

/// List items matching `filter`. Newest first unless asked otherwise; rows
/// sharing a timestamp keep insertion order.
pub fn list_media(conn: &Connection, filter: &MediaFilter) -> rusqlite::Result<Vec<MediaReference>> {
    let order = match filter.order {
        SortOrder::NewestFirst => "created_at DESC, rowid DESC",
        SortOrder::OldestFirst => "created_at ASC, rowid ASC",
    };
    let sql = format!(
        "SELECT {} FROM portfolio_items
          WHERE (?1 IS NULL OR category = ?1)
            AND (?2 IS NULL OR media_type = ?2)
          ORDER BY {}",
        MEDIA_COLUMNS, order
    );
    collect_rows(
        conn,
        &sql,
        params![
            filter.category.map(|c| c.slug()),
            filter.media_type.map(|m| m.as_str())
        ],
        media_from_row,
    )
}

/// Item counts per category, in catalogue order, including empty categories.
pub fn count_by_category(conn: &Connection) -> rusqlite::Result<Vec<(Category, i64)>> {
    let counts: std::collections::HashMap<String, i64> = collect_rows(
        conn,
        "SELECT category, COUNT(*) FROM portfolio_items GROUP BY category",
        [],
        |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)),
    )?
    .into_iter()
    .collect();
    Ok(Category::ALL
        .into_iter()
        .map(|c| (c, counts.get(c.slug()).copied().unwrap_or(0)))
        .collect())
}

// ── Category cards ────────────────────────────────────────────────────────────

/// Stored landing-page cards ordered by display order. The `all` filter
/// pseudo-category is never a card.
pub fn list_category_cards(conn: &Connection) -> rusqlite::Result<Vec<CategoryCard>> {
    collect_rows(
        conn,
        "SELECT slug, display_label, thumbnail_url, display_order
           FROM portfolio_categories
          WHERE slug <> 'all'
          ORDER BY display_order ASC, id ASC",
        [],
        |row| {
            Ok(CategoryCard {
                slug: row.get(0)?,
                display_label: row.get(1)?,
                thumbnail_url: row.get(2)?,
                display_order: row.get(3)?,
            })
        },
    )
}

pub fn upsert_category_card(conn: &Connection, card: &CategoryCard) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO portfolio_categories (slug, display_label, thumbnail_url, display_order)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(slug) DO UPDATE SET
            display_label = excluded.display_label,
            thumbnail_url = excluded.thumbnail_url,
            display_order = excluded.display_order",
        params![
            card.slug,
            card.display_label,
            card.thumbnail_url,
            card.display_order
        ],
    )?;
    Ok(())
}
