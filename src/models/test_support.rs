//! Builders for gift certificate fixtures.
//!
//! ```
//! use certlist::models::test_support::numbered_certificates;
//!
//! let items = numbered_certificates(3);
//! assert_eq!(items.len(), 3);
//! assert_eq!(items.last().map(|item| item.name.as_str()), Some("P3"));
//! ```

use super::{GiftCertificate, Tag};

/// Creates a certificate named `name` with a matching description.
#[must_use]
pub fn certificate(id: u64, name: &str) -> GiftCertificate {
    GiftCertificate {
        id,
        name: name.to_owned(),
        description: format!("{name} gift certificate"),
        price: f64::from(u32::try_from(id).unwrap_or(u32::MAX)),
        ..GiftCertificate::default()
    }
}

/// Creates a certificate carrying `tags`.
#[must_use]
pub fn tagged_certificate(id: u64, name: &str, tags: &[&str]) -> GiftCertificate {
    GiftCertificate {
        tags: tags.iter().map(|tag| Tag::named(*tag)).collect(),
        ..certificate(id, name)
    }
}

/// Creates certificates `P1..=Pn` with ids and prices `1..=n`.
#[must_use]
pub fn numbered_certificates(count: u64) -> Vec<GiftCertificate> {
    (1..=count)
        .map(|id| certificate(id, &format!("P{id}")))
        .collect()
}
