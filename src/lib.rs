// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Jonathan D. A. Jewell <hyperpolymath>

//! Weekly Gallery: Image of the Week
//!
//! Scans `CW_<n>` week folders of uploaded images, tallies the votes of
//! closed weeks and serves everything as a single HTML page.

pub mod config;
pub mod error;
pub mod gallery;
pub mod web;

pub use config::AppConfig;
pub use error::{GalleryError, Result};
