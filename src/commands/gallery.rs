use crate::commands::with_db;
use crate::config;
use crate::media::model::{Category, CategoryCard, MediaFilter, MediaReference, MediaType};
use crate::media::repository;
use crate::resolver::to_thumbnail_url;
use crate::state::AppState;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryTile {
    pub index: usize,
    pub thumbnail_url: String,
    pub is_video: bool,
    pub item: MediaReference,
}

/// One category page. `items` is the list a lightbox opens over; tile `index`
/// is the matching start index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GalleryPage {
    pub slug: String,
    pub label: String,
    pub count_label: String,
    pub tiles: Vec<GalleryTile>,
    pub items: Vec<MediaReference>,
}

/// Item total for one catalogue category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub slug: String,
    pub label: String,
    pub item_count: i64,
}

pub fn count_label(count: usize) -> String {
    let noun = if count == 1 { "item" } else { "items" };
    format!("{} {} in this collection", count, noun)
}

/// Landing-page cards. The built-in catalogue stands in when nothing is stored.
pub fn list_category_cards(state: &AppState) -> Result<Vec<CategoryCard>, String> {
    let width = config::read_config(&state.home)
        .map_err(|e| e.to_string())?
        .thumbnail_width;
    let stored = with_db(state, |conn| {
        repository::list_category_cards(conn).map_err(|e| e.to_string())
    })?;
    if stored.is_empty() {
        tracing::debug!("no stored category cards, using catalogue");
        return Ok(Category::ALL
            .into_iter()
            .zip(1..)
            .map(|(category, order)| CategoryCard::fallback(category, order))
            .collect());
    }
    Ok(stored
        .into_iter()
        .map(|mut card| {
            card.thumbnail_url = card
                .thumbnail_url
                .map(|url| to_thumbnail_url(&url, MediaType::Photo, width));
            card
        })
        .collect())
}

/// Per-category item totals in catalogue order, empty categories included.
pub fn category_counts(state: &AppState) -> Result<Vec<CategoryCount>, String> {
    let counts = with_db(state, |conn| {
        repository::count_by_category(conn).map_err(|e| e.to_string())
    })?;
    Ok(counts
        .into_iter()
        .map(|(category, item_count)| CategoryCount {
            slug: category.slug().to_string(),
            label: category.label().to_string(),
            item_count,
        })
        .collect())
}

pub fn list_gallery(slug: String, state: &AppState) -> Result<GalleryPage, String> {
    tracing::info!("list_gallery: slug={}", slug);
    let category = Category::from_slug(&slug).ok_or_else(|| {
        tracing::warn!("unknown category requested: {}", slug);
        format!("Category not found: {}", slug)
    })?;
    let mut config = config::read_config(&state.home).map_err(|e| e.to_string())?;
    let items = with_db(state, |conn| {
        repository::list_media(conn, &MediaFilter::category(category)).map_err(|e| e.to_string())
    })?;

    let width = config.thumbnail_width;
    let tiles = items
        .iter()
        .enumerate()
        .map(|(index, item)| GalleryTile {
            index,
            thumbnail_url: to_thumbnail_url(&item.raw_url, item.media_type, width),
            is_video: item.media_type == MediaType::Video,
            item: item.clone(),
        })
        .collect();

    if config.last_category.as_deref() != Some(category.slug()) {
        config.last_category = Some(category.slug().to_string());
        config::write_config(&state.home, &config).map_err(|e| e.to_string())?;
    }

    Ok(GalleryPage {
        slug: category.slug().to_string(),
        label: category.label().to_string(),
        count_label: count_label(items.len()),
        tiles,
        items,
    })
}

pub fn get_last_category(state: &AppState) -> Result<Option<String>, String> {
    Ok(config::read_config(&state.home)
        .map_err(|e| e.to_string())?
        .last_category)
}
