//! Shared test utilities for the autoconf workspace.
//!
//! This crate provides on-disk fixtures so catalog roots and session files
//! are not rebuilt by hand in every test suite. It is a dev-dependency only,
//! never published.
//!
//! # Modules
//!
//! - [`catalog`]: [`TestCatalog`] builder for catalog roots and session files

pub mod catalog;

pub use catalog::TestCatalog;
