//! # Battle Development Tools
//!
//! Command-line helpers around the battle core:
//! - Catalog loading and validation
//! - Army composition previews
//! - Headless battle runs

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog_loader;
pub mod simulate;
pub mod validate;
