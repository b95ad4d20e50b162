//! Fabricated storefront catalogue.
//!
//! The storefront demo runs without a backend. Its certificates are built
//! from a fixed table, timestamped relative to the moment the catalogue is
//! created and tagged with their category.

use std::num::NonZeroUsize;

use chrono::{DateTime, TimeDelta, Utc};

use crate::models::{GiftCertificate, Tag};

/// Certificates revealed per storefront scroll step.
pub const STOREFRONT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(8) {
    Some(size) => size,
    None => NonZeroUsize::MIN,
};

/// Storefront categories; each certificate is tagged with one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Photo sessions.
    Photo,
    /// Restaurants and cooking.
    Food,
    /// Trips, tours and rides.
    Travel,
    /// Driving and motor events.
    Cars,
    /// Salons and wellbeing.
    Beauty,
}

impl Category {
    /// Every category in display order.
    pub const ALL: [Self; 5] = [
        Self::Photo,
        Self::Food,
        Self::Travel,
        Self::Cars,
        Self::Beauty,
    ];

    /// Returns the category name, which doubles as its tag name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Photo => "Photo",
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Cars => "Cars",
            Self::Beauty => "Beauty",
        }
    }

    const fn tag_id(self) -> u64 {
        match self {
            Self::Photo => 1,
            Self::Food => 2,
            Self::Travel => 3,
            Self::Cars => 4,
            Self::Beauty => 5,
        }
    }

    /// Returns the tag carried by certificates in this category.
    #[must_use]
    pub fn tag(self) -> Tag {
        Tag {
            id: Some(self.tag_id()),
            name: self.name().to_owned(),
        }
    }
}

const CATALOGUE: [(&str, Category, f64); 35] = [
    ("Zoo Exhibition", Category::Travel, 8.0),
    ("Cooking Courses", Category::Food, 25.0),
    ("Yoga Sessions", Category::Beauty, 12.0),
    ("Gym Discount", Category::Beauty, 10.0),
    ("Photo Session", Category::Photo, 35.0),
    ("Planetarium", Category::Travel, 15.0),
    ("Horse Ride", Category::Travel, 75.0),
    ("Massage", Category::Beauty, 25.0),
    ("Air Balloon Ride", Category::Travel, 105.0),
    ("Extreme Driving", Category::Cars, 45.0),
    ("Driver License", Category::Cars, 30.0),
    ("Motorbike Ride", Category::Cars, 30.0),
    ("Make Up", Category::Beauty, 30.0),
    ("Helicopter Ride", Category::Travel, 120.0),
    ("Haircut for Men", Category::Beauty, 55.0),
    ("Haircut for Women", Category::Beauty, 110.0),
    ("Nail Art", Category::Beauty, 120.0),
    ("Spa", Category::Beauty, 150.0),
    ("Solarium", Category::Beauty, 100.0),
    ("Quad Biking", Category::Cars, 50.0),
    ("Kart Racing", Category::Cars, 25.0),
    ("F1 Race Tickets Discount", Category::Cars, 45.0),
    ("Motorbike Fest Tickets Discount", Category::Cars, 49.0),
    ("Car Salon Discount", Category::Cars, 1200.0),
    ("Vintage Cars Exhibition", Category::Cars, 37.5),
    ("Mountain Hiking", Category::Travel, 1050.5),
    ("Cruise Tickets Discount", Category::Travel, 1750.5),
    ("City Tour", Category::Travel, 95.75),
    ("Museum Tour", Category::Travel, 83.45),
    ("Wedding Photo Session", Category::Photo, 120.0),
    ("ID Photo Session", Category::Photo, 20.55),
    ("Family Photo Session", Category::Photo, 20.55),
    ("Chinese Restaurant Coupons", Category::Food, 55.55),
    ("Italian Restaurant Coupons", Category::Food, 67.45),
    ("Advanced Cooking Courses", Category::Food, 67.45),
];

/// Builds the demo catalogue, newest certificate first.
///
/// Entry `n` (1-based) is created `n` seconds after `now` and stays valid
/// for `n` days.
#[must_use]
pub fn demo_catalog(now: DateTime<Utc>) -> Vec<GiftCertificate> {
    let mut items: Vec<GiftCertificate> = (1_u32..)
        .zip(CATALOGUE)
        .map(|(ordinal, (name, category, price))| {
            let created = now
                .checked_add_signed(TimeDelta::seconds(i64::from(ordinal)))
                .unwrap_or(now);
            GiftCertificate {
                id: u64::from(ordinal),
                name: name.to_owned(),
                description: format!("{name} gift certificate ({})", category.name()),
                price,
                duration: Some(ordinal),
                create: Some(created),
                last_update: Some(created),
                tags: vec![category.tag()],
            }
        })
        .collect();
    items.sort_by(|left, right| right.create.cmp(&left.create));
    items
}
