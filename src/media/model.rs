use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Photo,
    Video,
}

impl MediaType {
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Photo => "photo",
            MediaType::Video => "video",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "photo" => Ok(MediaType::Photo),
            "video" => Ok(MediaType::Video),
            other => Err(format!("unknown media type: {}", other)),
        }
    }
}

/// The closed set of portfolio categories. Slugs double as the stored key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Wedding,
    PreWedding,
    BabyShowerMaternity,
    BirthdaysFamily,
    Drone,
    ModelCandid,
}

impl Category {
    /// Catalogue order, which is also the fallback card order.
    pub const ALL: [Category; 6] = [
        Category::Wedding,
        Category::PreWedding,
        Category::BabyShowerMaternity,
        Category::BirthdaysFamily,
        Category::Drone,
        Category::ModelCandid,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            Category::Wedding => "wedding",
            Category::PreWedding => "pre-wedding",
            Category::BabyShowerMaternity => "baby-shower-maternity",
            Category::BirthdaysFamily => "birthdays-family",
            Category::Drone => "drone",
            Category::ModelCandid => "model-candid",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Wedding => "Wedding",
            Category::PreWedding => "Pre-Wedding",
            Category::BabyShowerMaternity => "Baby Shower & Maternity",
            Category::BirthdaysFamily => "Birthdays & Family",
            Category::Drone => "Drone Shoot",
            Category::ModelCandid => "Model & Candid",
        }
    }

    /// Returns `None` for anything outside the catalogue, including the
    /// `all` pseudo-category used by filter bars.
    pub fn from_slug(slug: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::from_slug(s).ok_or_else(|| format!("unknown category: {}", s))
    }
}

/// One portfolio entry as stored by the item store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaReference {
    pub id: String,
    pub media_type: MediaType,
    pub category: Category,
    /// Source-of-truth link as entered by an operator.
    pub raw_url: String,
    /// Operator-supplied override for the highest quality rendition.
    pub full_resolution_url: Option<String>,
    pub title: Option<String>,
    pub created_at: String, // RFC 3339, UTC
}

/// Admin form payload used for both create and update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMediaReference {
    pub media_type: MediaType,
    pub category: Category,
    pub raw_url: String,
    #[serde(default)]
    pub full_resolution_url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFilter {
    pub category: Option<Category>,
    pub media_type: Option<MediaType>,
    pub order: SortOrder,
}

impl MediaFilter {
    pub fn category(category: Category) -> Self {
        Self {
            category: Some(category),
            ..Self::default()
        }
    }
}

/// A landing-page card linking to one category gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryCard {
    pub slug: String,
    pub display_label: String,
    pub thumbnail_url: Option<String>,
    pub display_order: i64,
}

impl CategoryCard {
    pub fn fallback(category: Category, display_order: i64) -> Self {
        Self {
            slug: category.slug().to_string(),
            display_label: category.label().to_string(),
            thumbnail_url: None,
            display_order,
        }
    }
}
