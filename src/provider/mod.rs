//! Locale service provider registry.
//!
//! Resolves which adapter serves a locale-sensitive service for a locale,
//! and caches that resolution.
//!
//! # Architecture
//!
//! - `category`: the closed set of service categories
//! - `adapter`: adapter kinds and the collaborator traits (`AdapterSource`,
//!   `LocaleServiceAdapter`) with in-memory implementations
//! - `registry`: one `ServiceRegistry` per category, holding adapter slots
//!   and lookup caches
//! - `pool`: `ProviderPool`, the get-or-create map of registries and the
//!   lookup entry points
//! - `metrics`: counters shared by a pool and its registries
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use locale_provider_pool::locale::Locale;
//! use locale_provider_pool::provider::{
//!     AdapterKind, NameTableAdapter, ProviderPool, Resolution, ServiceCategory,
//!     StaticAdapterSource,
//! };
//!
//! let builtin = NameTableAdapter::new().with_name(Locale::root(), "USD", "US Dollar");
//! let source = StaticAdapterSource::default().with_adapter(
//!     AdapterKind::Builtin,
//!     ServiceCategory::CurrencyName,
//!     Arc::new(builtin),
//! );
//! let pool = ProviderPool::new(Arc::new(source));
//!
//! let name = pool
//!     .localized_name(
//!         ServiceCategory::CurrencyName,
//!         &Locale::new("en", "GB", ""),
//!         "USD",
//!         NameTableAdapter::lookup,
//!     )
//!     .unwrap();
//! assert_eq!(name, Resolution::Found("US Dollar".to_string()));
//! ```

mod adapter;
mod category;
mod metrics;
mod pool;
mod registry;

pub use adapter::{
    AdapterKind, AdapterSource, LocaleServiceAdapter, NameTableAdapter, StaticAdapterSource,
};
pub use category::ServiceCategory;
pub use metrics::{MetricsReport, PoolMetrics};
pub use pool::{LookupMode, ProviderPool, Resolution};
pub use registry::ServiceRegistry;
