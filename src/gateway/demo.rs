//! In-memory listing source used by the storefront demo.

use std::num::NonZeroUsize;

use async_trait::async_trait;

use super::ListingGateway;
use crate::listing::{ListingError, ListingQuery, window};
use crate::models::{GiftCertificate, ListingResult};

/// Serves listing pages from a fixed list of certificates.
///
/// Filtering and sorting follow the same rules a backend applies, so the
/// listing behaves identically against either source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DemoCatalogGateway {
    items: Vec<GiftCertificate>,
}

impl DemoCatalogGateway {
    /// Creates a source serving `items` in their given order.
    #[must_use]
    pub const fn new(items: Vec<GiftCertificate>) -> Self {
        Self { items }
    }

    /// Returns every item matching `query`, sorted, ignoring paging.
    #[must_use]
    pub fn matching(&self, query: &ListingQuery) -> Vec<GiftCertificate> {
        let mut matched: Vec<GiftCertificate> = self
            .items
            .iter()
            .filter(|item| query.matches(*item))
            .cloned()
            .collect();
        matched.sort_by(|left, right| query.compare(left, right));
        matched
    }
}

#[async_trait]
impl ListingGateway for DemoCatalogGateway {
    async fn fetch(
        &self,
        query: &ListingQuery,
    ) -> Result<ListingResult<GiftCertificate>, ListingError> {
        let matched = self.matching(query);
        let page_size = NonZeroUsize::new(query.page_size().items()).ok_or_else(|| {
            ListingError::malformed(format!("page size {} is zero", query.page_size()))
        })?;
        let page = usize::try_from(query.page()).unwrap_or(usize::MAX);

        let total_pages = u32::try_from(window::total_pages(matched.len(), page_size))
            .unwrap_or(u32::MAX);
        let found_items = u64::try_from(matched.len()).unwrap_or(u64::MAX);
        let items = window::page_slice(&matched, page_size, page).to_vec();

        Ok(ListingResult::new(items, total_pages)
            .with_found_items(found_items)
            .with_position(query.page(), query.page_size().get()))
    }
}
