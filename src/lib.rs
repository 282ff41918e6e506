//! Locale-sensitive service provider registry.
//!
//! Given a service category (number formats, currency names, ...) and a
//! locale, decide which of several adapters serves the request, walking the
//! locale fallback chain and caching which adapters support each locale.

pub mod config;
pub mod error;
pub mod locale;
pub mod provider;

pub use error::PoolError;
