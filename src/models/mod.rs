//! Gift certificate records and the listing response envelope.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::listing::{ListingItem, SortField};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Tag attached to a gift certificate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tag {
    /// Backend identifier; absent for tags not yet stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Tag name.
    pub name: String,
}

impl Tag {
    /// Creates an unsaved tag.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

/// A gift certificate as returned by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftCertificate {
    /// Backend identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Price in the shop currency.
    pub price: f64,
    /// Validity in days.
    #[serde(default)]
    pub duration: Option<u32>,
    /// Creation timestamp.
    #[serde(default)]
    pub create: Option<DateTime<Utc>>,
    /// Last modification timestamp.
    #[serde(default)]
    pub last_update: Option<DateTime<Utc>>,
    /// Attached tags.
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl GiftCertificate {
    /// Returns the tag names joined for display.
    #[must_use]
    pub fn tag_list(&self) -> String {
        self.tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl ListingItem for GiftCertificate {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|item| item.name.eq_ignore_ascii_case(tag))
    }

    fn compare_by(&self, other: &Self, field: SortField) -> Ordering {
        match field {
            SortField::Created => self.create.cmp(&other.create),
            SortField::Name => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            SortField::Description => self
                .description
                .to_lowercase()
                .cmp(&other.description.to_lowercase()),
            SortField::Price => self.price.total_cmp(&other.price),
        }
    }
}

/// One page of listing results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult<T> {
    /// Items on the requested page.
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    /// Number of pages the whole result spans.
    pub total_pages: u32,
    /// Number of items matching the filters across all pages.
    #[serde(default)]
    pub found_items: Option<u64>,
    /// Page the backend actually served.
    #[serde(default)]
    pub current_page: Option<u32>,
    /// Page size the backend actually used.
    #[serde(default)]
    pub page_size: Option<u32>,
}

impl<T> ListingResult<T> {
    /// Creates a result holding `items` out of `total_pages`.
    #[must_use]
    pub const fn new(items: Vec<T>, total_pages: u32) -> Self {
        Self {
            items,
            total_pages,
            found_items: None,
            current_page: None,
            page_size: None,
        }
    }

    /// Records the total number of matching items.
    #[must_use]
    pub const fn with_found_items(mut self, found_items: u64) -> Self {
        self.found_items = Some(found_items);
        self
    }

    /// Records the page and page size the result was served for.
    #[must_use]
    pub const fn with_position(mut self, current_page: u32, page_size: u32) -> Self {
        self.current_page = Some(current_page);
        self.page_size = Some(page_size);
        self
    }
}
