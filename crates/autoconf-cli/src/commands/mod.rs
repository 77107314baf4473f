//! Command implementations for autoconf-cli

pub mod candidates;
pub mod resolve;

pub use candidates::run_candidates;
pub use resolve::run_resolve;
