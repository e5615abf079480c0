use crate::auth::User;
use crate::commands::with_db;
use crate::config::append_operation_log;
use crate::media::model::{CategoryCard, MediaFilter, MediaReference, MediaType, NewMediaReference};
use crate::media::repository;
use crate::media::validate::{
    host_matches_media_type, normalize_category_card, normalize_new_media, parse_category,
    ValidationError,
};
use crate::notify::{Notifier, Toast};
use crate::resolver::to_embed_url;
use crate::state::AppState;
use serde::Deserialize;

/// Admin form as submitted. Category arrives as a picker slug.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminForm {
    pub media_type: MediaType,
    pub category: String,
    pub url: String,
    #[serde(default)]
    pub full_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl AdminForm {
    pub fn validate(self) -> Result<NewMediaReference, ValidationError> {
        let category = parse_category(&self.category)?;
        normalize_new_media(NewMediaReference {
            media_type: self.media_type,
            category,
            raw_url: self.url,
            full_resolution_url: self.full_url,
            title: self.title,
        })
    }
}

pub fn require_admin(state: &AppState) -> Result<User, String> {
    let user = state
        .current_user
        .lock()
        .map_err(|_| "lock poisoned".to_string())?
        .clone();
    match user {
        Some(user) if user.is_admin => Ok(user),
        Some(user) => Err(format!("Account {} does not have admin access", user.email)),
        None => Err("Not signed in".to_string()),
    }
}

pub fn list_items(state: &AppState, notifier: &dyn Notifier) -> Result<Vec<MediaReference>, String> {
    require_admin(state)?;
    with_db(state, |conn| {
        repository::list_media(conn, &MediaFilter::default()).map_err(|e| e.to_string())
    })
    .inspect_err(|_| notifier.notify(Toast::error("Error", "Failed to load portfolio items")))
}

/// Create (no `editing_id`) or update an item from the admin form.
pub fn save_item(
    editing_id: Option<String>,
    form: AdminForm,
    state: &AppState,
    notifier: &dyn Notifier,
) -> Result<MediaReference, String> {
    let admin = require_admin(state)?;
    tracing::info!(
        "save_item: editing={:?} admin={}",
        editing_id.as_deref(),
        admin.email
    );

    let mut new = form.validate().map_err(|e| {
        notifier.notify(Toast::error("Validation Error", e.to_string()));
        e.to_string()
    })?;
    if !host_matches_media_type(&new.raw_url, new.media_type) {
        tracing::warn!(
            "{} link is not on the expected host: {}",
            new.media_type,
            new.raw_url
        );
    }
    new.raw_url = to_embed_url(&new.raw_url);

    let saved = with_db(state, |conn| match editing_id.as_deref() {
        Some(id) => repository::update_media(conn, id, &new)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Item not found: {}", id)),
        None => repository::insert_media(conn, &new).map_err(|e| e.to_string()),
    })
    .inspect_err(|e| notifier.notify(Toast::error("Error", e.clone())))?;

    let (event, message) = match editing_id {
        Some(_) => ("ITEM_UPDATED", "Item updated successfully"),
        None => ("ITEM_CREATED", "Item added successfully"),
    };
    append_operation_log(
        &state.home,
        &format!(
            "{} id={} type={} category={}",
            event, saved.id, saved.media_type, saved.category
        ),
    );
    notifier.notify(Toast::success("Success", message));
    Ok(saved)
}

pub fn delete_item(id: String, state: &AppState, notifier: &dyn Notifier) -> Result<(), String> {
    require_admin(state)?;
    tracing::info!("delete_item: id={}", id);
    let deleted = with_db(state, |conn| {
        repository::delete_media(conn, &id).map_err(|e| e.to_string())
    })
    .inspect_err(|_| notifier.notify(Toast::error("Error", "Failed to delete item")))?;
    if !deleted {
        notifier.notify(Toast::error("Error", "Failed to delete item"));
        return Err(format!("Item not found: {}", id));
    }
    append_operation_log(&state.home, &format!("ITEM_DELETED id={}", id));
    notifier.notify(Toast::success("Deleted", "Portfolio item deleted successfully"));
    Ok(())
}

/// Create or replace the landing-page card for one category.
pub fn set_category_card(
    card: CategoryCard,
    state: &AppState,
    notifier: &dyn Notifier,
) -> Result<CategoryCard, String> {
    require_admin(state)?;
    tracing::info!("set_category_card: slug={}", card.slug);
    let card = normalize_category_card(card).map_err(|e| {
        notifier.notify(Toast::error("Validation Error", e.to_string()));
        e.to_string()
    })?;
    with_db(state, |conn| {
        repository::upsert_category_card(conn, &card).map_err(|e| e.to_string())
    })
    .inspect_err(|e| notifier.notify(Toast::error("Error", e.clone())))?;
    append_operation_log(
        &state.home,
        &format!("CARD_SAVED slug={} order={}", card.slug, card.display_order),
    );
    notifier.notify(Toast::success("Success", "Category card saved"));
    Ok(card)
}
