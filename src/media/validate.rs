use crate::media::model::{Category, CategoryCard, MediaType, NewMediaReference};
use crate::resolver::{classify_host, MediaHost};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a valid URL: {0}")]
    InvalidUrl(String),
    #[error("Unknown category: {0}")]
    InvalidCategory(String),
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),
}

/// Absolute http(s) URL with a non-empty host and no whitespace.
pub fn is_valid_url(url: &str) -> bool {
    if url.chars().any(char::is_whitespace) {
        return false;
    }
    match reqwest::Url::parse(url) {
        Ok(parsed) => {
            matches!(parsed.scheme(), "http" | "https")
                && parsed.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.chars().any(char::is_whitespace)
}

/// Trim the admin form and reject what the store must never hold.
/// Blank optional fields collapse to `None`.
pub fn normalize_new_media(form: NewMediaReference) -> Result<NewMediaReference, ValidationError> {
    let raw_url = form.raw_url.trim().to_string();
    if raw_url.is_empty() {
        return Err(ValidationError::MissingField("URL"));
    }
    if !is_valid_url(&raw_url) {
        return Err(ValidationError::InvalidUrl(raw_url));
    }
    let full_resolution_url = non_blank(form.full_resolution_url);
    if let Some(full) = &full_resolution_url {
        if !is_valid_url(full) {
            return Err(ValidationError::InvalidUrl(full.clone()));
        }
    }
    Ok(NewMediaReference {
        media_type: form.media_type,
        category: form.category,
        raw_url,
        full_resolution_url,
        title: non_blank(form.title),
    })
}

/// Category picker value; `all` is a filter, never a stored category.
pub fn parse_category(slug: &str) -> Result<Category, ValidationError> {
    Category::from_slug(slug.trim()).ok_or_else(|| ValidationError::InvalidCategory(slug.to_string()))
}

/// Landing-page card edit. The slug must name a catalogue category; a blank
/// label falls back to the catalogue label.
pub fn normalize_category_card(card: CategoryCard) -> Result<CategoryCard, ValidationError> {
    let category = parse_category(&card.slug)?;
    let thumbnail_url = non_blank(card.thumbnail_url);
    if let Some(url) = &thumbnail_url {
        if !is_valid_url(url) {
            return Err(ValidationError::InvalidUrl(url.clone()));
        }
    }
    Ok(CategoryCard {
        slug: category.slug().to_string(),
        display_label: non_blank(Some(card.display_label))
            .unwrap_or_else(|| category.label().to_string()),
        thumbnail_url,
        display_order: card.display_order,
    })
}

/// Photos are expected on Drive and videos on YouTube. Anything else still
/// renders, just without derived thumbnails.
pub fn host_matches_media_type(url: &str, media_type: MediaType) -> bool {
    matches!(
        (classify_host(url), media_type),
        (MediaHost::GoogleDrive, MediaType::Photo) | (MediaHost::YouTube, MediaType::Video)
    )
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
