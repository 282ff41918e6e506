//! Per-category registry: adapter slots and lookup caches.
//!
//! A `ServiceRegistry` is created once per category by the pool. Its adapter
//! slots are filled in the constructor and read-only afterwards. The two
//! caches fill lazily:
//!
//! - the available-locale set is computed once (single-flight `OnceLock`),
//!   since it enumerates every adapter's full locale table
//! - kind lists are memoized per locale with insert-if-absent; racing
//!   computations are idempotent and the first insert wins

use crate::locale::{lookup_locale_reporting, Locale};
use crate::provider::{
    AdapterKind, AdapterSource, LocaleServiceAdapter, PoolMetrics, ServiceCategory,
};
use dashmap::DashMap;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

pub struct ServiceRegistry {
    category: ServiceCategory,
    adapters: HashMap<AdapterKind, Arc<dyn LocaleServiceAdapter>>,
    preference: Vec<AdapterKind>,
    kinds_by_locale: DashMap<Locale, Arc<[AdapterKind]>>,
    available_locales: OnceLock<HashSet<Locale>>,
    metrics: Arc<PoolMetrics>,
}

impl ServiceRegistry {
    /// Query `source` for every adapter kind serving `category`.
    ///
    /// The built-in kind is always queried. Optional kinds are queried only
    /// when the source lists them in its preference.
    pub(crate) fn new(
        category: ServiceCategory,
        source: &dyn AdapterSource,
        metrics: Arc<PoolMetrics>,
    ) -> Self {
        let mut preference = Vec::new();
        for kind in source.adapter_preference() {
            if !preference.contains(&kind) {
                preference.push(kind);
            }
        }
        if !preference.contains(&AdapterKind::Builtin) {
            preference.push(AdapterKind::Builtin);
        }

        let mut adapters = HashMap::new();
        match source.adapter_for(AdapterKind::Builtin, category) {
            Some(adapter) => {
                adapters.entry(AdapterKind::Builtin).or_insert(adapter);
            }
            None => warn!(
                "No built-in adapter for {}, lookups rely on other providers only",
                category
            ),
        }

        for kind in AdapterKind::ALL {
            if kind == AdapterKind::Builtin || !preference.contains(&kind) {
                continue;
            }
            if let Some(adapter) = source.adapter_for(kind, category) {
                adapters.entry(kind).or_insert(adapter);
            }
        }

        debug!(
            "Registry for {} created with {} adapter(s)",
            category,
            adapters.len()
        );

        Self {
            category,
            adapters,
            preference,
            kinds_by_locale: DashMap::new(),
            available_locales: OnceLock::new(),
            metrics,
        }
    }

    pub fn category(&self) -> ServiceCategory {
        self.category
    }

    /// The adapter registered for `kind`, if any.
    pub fn adapter(&self, kind: AdapterKind) -> Option<&Arc<dyn LocaleServiceAdapter>> {
        self.adapters.get(&kind)
    }

    /// Registered adapter kinds, highest priority first.
    pub fn adapter_kinds(&self) -> Vec<AdapterKind> {
        self.preference
            .iter()
            .copied()
            .filter(|kind| self.adapters.contains_key(kind))
            .collect()
    }

    /// Whether any adapter other than the built-in one is registered.
    pub fn has_external_providers(&self) -> bool {
        self.adapters.len() != 1 || !self.adapters.contains_key(&AdapterKind::Builtin)
    }

    /// Union of every adapter's locales in lookup form, without root.
    pub fn available_locales(&self) -> &HashSet<Locale> {
        self.available_locales.get_or_init(|| {
            self.metrics.record_availability_computation();

            let mut available = HashSet::new();
            for adapter in self.adapters.values() {
                for locale in adapter.available_locales() {
                    available.insert(lookup_locale_reporting(&locale, |_| {
                        self.metrics.record_degraded_normalization()
                    }));
                }
            }

            // Root is implicitly supported and never listed.
            available.remove(&Locale::root());

            debug!(
                "Computed {} available locale(s) for {}",
                available.len(),
                self.category
            );
            available
        })
    }

    /// Adapter kinds supporting exactly `locale`, in priority order.
    ///
    /// An empty list is a cached answer like any other.
    pub fn kinds_for_locale(&self, locale: &Locale) -> Arc<[AdapterKind]> {
        if let Some(kinds) = self.kinds_by_locale.get(locale) {
            self.metrics.record_kinds_cache_hit();
            return Arc::clone(kinds.value());
        }
        self.metrics.record_kinds_cache_miss();

        let kinds: Arc<[AdapterKind]> = self
            .preference
            .iter()
            .copied()
            .filter(|kind| {
                self.adapters
                    .get(kind)
                    .is_some_and(|adapter| adapter.is_supported_locale(locale))
            })
            .collect();

        let cached = self.kinds_by_locale.entry(locale.clone()).or_insert(kinds);
        Arc::clone(cached.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PoolConfig;
    use crate::provider::{NameTableAdapter, StaticAdapterSource};

    fn table(locales: &[Locale]) -> Arc<dyn LocaleServiceAdapter> {
        let adapter = locales
            .iter()
            .cloned()
            .fold(NameTableAdapter::new(), NameTableAdapter::with_locale);
        Arc::new(adapter)
    }

    fn registry(source: &StaticAdapterSource) -> ServiceRegistry {
        ServiceRegistry::new(
            ServiceCategory::NumberFormat,
            source,
            Arc::new(PoolMetrics::new()),
        )
    }

    // ==================== Construction Tests ====================

    #[test]
    fn test_builtin_only_has_no_external_providers() {
        let source = StaticAdapterSource::default().with_adapter(
            AdapterKind::Builtin,
            ServiceCategory::NumberFormat,
            table(&[Locale::new("en", "US", "")]),
        );
        let registry = registry(&source);

        assert!(!registry.has_external_providers());
        assert_eq!(registry.adapter_kinds(), vec![AdapterKind::Builtin]);
    }

    #[test]
    fn test_plugin_makes_external_providers() {
        let source = StaticAdapterSource::default()
            .with_adapter(AdapterKind::Builtin, ServiceCategory::NumberFormat, table(&[]))
            .with_adapter(AdapterKind::Plugin, ServiceCategory::NumberFormat, table(&[]));
        let registry = registry(&source);

        assert!(registry.has_external_providers());
        assert_eq!(
            registry.adapter_kinds(),
            vec![AdapterKind::Builtin, AdapterKind::Plugin]
        );
    }

    #[test]
    fn test_missing_builtin_counts_as_external() {
        let source = StaticAdapterSource::default().with_adapter(
            AdapterKind::Host,
            ServiceCategory::NumberFormat,
            table(&[]),
        );
        let registry = registry(&source);

        assert!(registry.adapter(AdapterKind::Builtin).is_none());
        assert!(registry.has_external_providers());
    }

    #[test]
    fn test_kind_outside_preference_is_never_queried() {
        let config = PoolConfig {
            adapter_preference: vec![AdapterKind::Plugin, AdapterKind::Builtin],
        };
        let source = StaticAdapterSource::new(&config)
            .with_adapter(AdapterKind::Builtin, ServiceCategory::NumberFormat, table(&[]))
            .with_adapter(AdapterKind::Host, ServiceCategory::NumberFormat, table(&[]));
        let registry = registry(&source);

        assert!(registry.adapter(AdapterKind::Host).is_none());
        assert!(!registry.has_external_providers());
    }

    #[test]
    fn test_builtin_appended_to_preference_when_missing() {
        let config = PoolConfig {
            adapter_preference: vec![AdapterKind::Plugin, AdapterKind::Plugin],
        };
        let source = StaticAdapterSource::new(&config)
            .with_adapter(AdapterKind::Builtin, ServiceCategory::NumberFormat, table(&[]))
            .with_adapter(AdapterKind::Plugin, ServiceCategory::NumberFormat, table(&[]));
        let registry = registry(&source);

        assert_eq!(
            registry.adapter_kinds(),
            vec![AdapterKind::Plugin, AdapterKind::Builtin]
        );
    }

    // ==================== Availability Tests ====================

    #[test]
    fn test_available_locales_union_without_root() {
        let source = StaticAdapterSource::default()
            .with_adapter(
                AdapterKind::Builtin,
                ServiceCategory::NumberFormat,
                table(&[Locale::root(), Locale::new("en", "US", "")]),
            )
            .with_adapter(
                AdapterKind::Plugin,
                ServiceCategory::NumberFormat,
                table(&[
                    Locale::new("en", "US", ""),
                    Locale::new("de", "DE", "").with_extension('u', "nu-latn"),
                ]),
            );
        let registry = registry(&source);
        let available = registry.available_locales();

        assert_eq!(available.len(), 2);
        assert!(available.contains(&Locale::new("en", "US", "")));
        assert!(available.contains(&Locale::new("de", "DE", "")));
        assert!(!available.contains(&Locale::root()));
    }

    #[test]
    fn test_available_locales_keeps_irregular_form() {
        let source = StaticAdapterSource::default().with_adapter(
            AdapterKind::Builtin,
            ServiceCategory::NumberFormat,
            table(&[Locale::th_th_th()]),
        );
        let registry = registry(&source);

        assert!(registry.available_locales().contains(&Locale::th_th_th()));
    }

    #[test]
    fn test_available_locales_counts_degraded_normalization() {
        let source = StaticAdapterSource::default().with_adapter(
            AdapterKind::Builtin,
            ServiceCategory::NumberFormat,
            table(&[Locale::with_script("en", "Latn", "US", "X").with_extension('u', "nu-arab")]),
        );
        let metrics = Arc::new(PoolMetrics::new());
        let registry =
            ServiceRegistry::new(ServiceCategory::NumberFormat, &source, Arc::clone(&metrics));

        assert!(registry
            .available_locales()
            .contains(&Locale::new("en", "US", "X")));
        assert_eq!(metrics.degraded_normalizations(), 1);
    }

    // ==================== Kind Cache Tests ====================

    #[test]
    fn test_kinds_for_locale_priority_order_and_memoized() {
        let config = PoolConfig {
            adapter_preference: vec![
                AdapterKind::Host,
                AdapterKind::Plugin,
                AdapterKind::Builtin,
            ],
        };
        let de = Locale::new("de", "DE", "");
        let source = StaticAdapterSource::new(&config)
            .with_adapter(AdapterKind::Builtin, ServiceCategory::NumberFormat, table(&[]))
            .with_adapter(
                AdapterKind::Plugin,
                ServiceCategory::NumberFormat,
                table(&[de.clone()]),
            )
            .with_adapter(
                AdapterKind::Host,
                ServiceCategory::NumberFormat,
                table(&[de.clone()]),
            );
        let metrics = Arc::new(PoolMetrics::new());
        let registry =
            ServiceRegistry::new(ServiceCategory::NumberFormat, &source, Arc::clone(&metrics));

        let first = registry.kinds_for_locale(&de);
        let second = registry.kinds_for_locale(&de);

        assert_eq!(&*first, &[AdapterKind::Host, AdapterKind::Plugin]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(metrics.kinds_cache_misses(), 1);
        assert_eq!(metrics.kinds_cache_hits(), 1);
    }

    #[test]
    fn test_empty_kind_list_is_cached() {
        let source = StaticAdapterSource::default().with_adapter(
            AdapterKind::Builtin,
            ServiceCategory::NumberFormat,
            table(&[Locale::new("en", "US", "")]),
        );
        let metrics = Arc::new(PoolMetrics::new());
        let registry =
            ServiceRegistry::new(ServiceCategory::NumberFormat, &source, Arc::clone(&metrics));
        let fr = Locale::for_language("fr");

        assert!(registry.kinds_for_locale(&fr).is_empty());
        assert!(registry.kinds_for_locale(&fr).is_empty());
        assert_eq!(metrics.kinds_cache_misses(), 1);
        assert_eq!(metrics.kinds_cache_hits(), 1);
    }
}
