//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`admin_listing`]: Page through the backend listing
//! - [`storefront`]: Scroll the demo storefront catalogue
//!
//! Output formatting utilities are in [`output`].

pub mod admin_listing;
pub mod output;
pub mod storefront;
