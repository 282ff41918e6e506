//! Locale values and the fallback rules used for provider lookup.
//!
//! # Architecture
//!
//! - `tag`: the `Locale` value type, assembled from subtags
//! - `fallback`: candidate chains and lookup normalization
//!
//! # Example
//!
//! ```rust
//! use locale_provider_pool::locale::{candidate_locales, Locale};
//!
//! let chain = candidate_locales(&Locale::new("fr", "FR", ""));
//! assert_eq!(chain.last(), Some(&Locale::root()));
//! ```

mod fallback;
mod tag;

pub use fallback::{candidate_locales, lookup_locale};
pub(crate) use fallback::lookup_locale_reporting;
pub use tag::{IllformedLocale, Locale, UNICODE_EXTENSION};
