//! Unit tests for configuration loading and precedence.
//!
//! Tests are organised into modules by functional area:
//! - `precedence`: Layer precedence tests
//! - `operation_mode`: Operation mode determination tests
//! - `field_resolution`: Token, base URL, page size and sort resolution tests
