//! Provider pool: one registry per service category and the lookup entry
//! points used by locale-sensitive services.
//!
//! The pool is an ordinary value. Embedders that want a process-wide
//! instance keep it in their own `OnceLock` and pass references around.

use crate::error::PoolError;
use crate::locale::{candidate_locales, Locale};
use crate::provider::{
    AdapterKind, AdapterSource, LocaleServiceAdapter, PoolMetrics, ServiceCategory,
    ServiceRegistry,
};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::collections::HashSet;
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Outcome of a lookup that did not fail.
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<S> {
    Found(S),

    /// No adapter produced a result for any candidate locale
    NotFound,
}

impl<S> Resolution<S> {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }

    pub fn into_option(self) -> Option<S> {
        match self {
            Resolution::Found(value) => Some(value),
            Resolution::NotFound => None,
        }
    }

    pub fn unwrap_or_else(self, default: impl FnOnce() -> S) -> S {
        match self {
            Resolution::Found(value) => value,
            Resolution::NotFound => default(),
        }
    }
}

impl<S> From<Option<S>> for Resolution<S> {
    fn from(value: Option<S>) -> Self {
        match value {
            Some(found) => Resolution::Found(found),
            None => Resolution::NotFound,
        }
    }
}

/// What a call site expects back from adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupMode {
    /// A localized object every eligible adapter must produce. A missing
    /// result is logged as a provider contract violation.
    Object,

    /// A localized name keyed by a string. Missing names are expected.
    Name,
}

/// Map from service category to its registry, plus the cross-category
/// available-locale aggregate.
pub struct ProviderPool {
    source: Arc<dyn AdapterSource>,
    registries: DashMap<ServiceCategory, Arc<ServiceRegistry>>,
    all_available_locales: OnceLock<Vec<Locale>>,
    metrics: Arc<PoolMetrics>,
}

impl ProviderPool {
    pub fn new(source: Arc<dyn AdapterSource>) -> Self {
        Self {
            source,
            registries: DashMap::new(),
            all_available_locales: OnceLock::new(),
            metrics: Arc::new(PoolMetrics::new()),
        }
    }

    pub fn metrics(&self) -> &PoolMetrics {
        &self.metrics
    }

    /// Get or create the registry for `category`.
    ///
    /// Concurrent first calls may each construct a registry; only the first
    /// one inserted is kept and every caller receives it.
    pub fn registry(&self, category: ServiceCategory) -> Arc<ServiceRegistry> {
        if let Some(existing) = self.registries.get(&category) {
            return Arc::clone(existing.value());
        }

        let created = Arc::new(ServiceRegistry::new(
            category,
            self.source.as_ref(),
            Arc::clone(&self.metrics),
        ));

        match self.registries.entry(category) {
            Entry::Occupied(entry) => {
                debug!("Discarding redundant registry for {}", category);
                Arc::clone(entry.get())
            }
            Entry::Vacant(entry) => Arc::clone(entry.insert(created).value()),
        }
    }

    /// Locales supported by any adapter of `category`, sorted, without root.
    pub fn available_locales(&self, category: ServiceCategory) -> Vec<Locale> {
        let mut locales: Vec<Locale> = self
            .registry(category)
            .available_locales()
            .iter()
            .cloned()
            .collect();
        locales.sort();
        locales
    }

    /// Locales supported by any adapter of any category, sorted.
    ///
    /// Computed on first call and reused afterwards.
    pub fn all_available_locales(&self) -> Vec<Locale> {
        self.all_available_locales
            .get_or_init(|| {
                let mut all = HashSet::new();
                for category in ServiceCategory::ALL {
                    all.extend(self.registry(category).available_locales().iter().cloned());
                }

                let mut locales: Vec<Locale> = all.into_iter().collect();
                locales.sort();
                debug!(
                    "Computed {} available locale(s) across all categories",
                    locales.len()
                );
                locales
            })
            .clone()
    }

    /// Resolve a localized object: every eligible adapter is expected to
    /// produce one.
    pub fn localized_object<S, F>(
        &self,
        category: ServiceCategory,
        locale: &Locale,
        getter: F,
    ) -> Result<Resolution<S>, PoolError>
    where
        F: Fn(&dyn LocaleServiceAdapter, &Locale, Option<&str>) -> Option<S>,
    {
        self.resolve(category, Some(locale), None, LookupMode::Object, getter)
    }

    /// Resolve a localized name for `key`. Adapters without a name are skipped
    /// silently.
    pub fn localized_name<S, F>(
        &self,
        category: ServiceCategory,
        locale: &Locale,
        key: &str,
        getter: F,
    ) -> Result<Resolution<S>, PoolError>
    where
        F: Fn(&dyn LocaleServiceAdapter, &Locale, Option<&str>) -> Option<S>,
    {
        self.resolve(category, Some(locale), Some(key), LookupMode::Name, getter)
    }

    /// Find the first adapter result for `locale`.
    ///
    /// Candidates from [`candidate_locales`] only decide which adapters are
    /// eligible; `getter` always receives the requested `locale`. Root is
    /// implicitly available to every adapter.
    ///
    /// # Errors
    /// Returns [`PoolError::InvalidArgument`] when `locale` is `None`. No
    /// adapter is invoked in that case.
    pub fn resolve<S, F>(
        &self,
        category: ServiceCategory,
        locale: Option<&Locale>,
        key: Option<&str>,
        mode: LookupMode,
        getter: F,
    ) -> Result<Resolution<S>, PoolError>
    where
        F: Fn(&dyn LocaleServiceAdapter, &Locale, Option<&str>) -> Option<S>,
    {
        let locale = locale.ok_or(PoolError::InvalidArgument("locale must be present"))?;
        let registry = self.registry(category);

        if !registry.has_external_providers() {
            self.metrics.record_fast_path();
            if let Some(builtin) = registry.adapter(AdapterKind::Builtin) {
                if let Some(found) = getter(builtin.as_ref(), locale, key) {
                    return Ok(Resolution::Found(found));
                }
                if mode == LookupMode::Object {
                    self.report_contract_violation(builtin.as_ref(), AdapterKind::Builtin, locale);
                }
            }
            self.metrics.record_not_found();
            return Ok(Resolution::NotFound);
        }

        let candidates = candidate_locales(locale);
        self.metrics.record_fallback_chain();
        let available = registry.available_locales();

        for candidate in &candidates {
            self.metrics.record_candidate_examined();
            if !candidate.is_root() && !available.contains(candidate) {
                continue;
            }

            for &kind in registry.kinds_for_locale(candidate).iter() {
                let Some(adapter) = registry.adapter(kind) else {
                    continue;
                };
                match getter(adapter.as_ref(), locale, key) {
                    Some(found) => return Ok(Resolution::Found(found)),
                    None if mode == LookupMode::Object => {
                        self.report_contract_violation(adapter.as_ref(), kind, locale);
                    }
                    None => {}
                }
            }
        }

        debug!(
            "No {} provider found for {} after {} candidate(s)",
            category,
            locale,
            candidates.len()
        );
        self.metrics.record_not_found();
        Ok(Resolution::NotFound)
    }

    fn report_contract_violation(
        &self,
        adapter: &dyn LocaleServiceAdapter,
        kind: AdapterKind,
        locale: &Locale,
    ) {
        self.metrics.record_contract_violation();
        warn!(
            "A locale sensitive service provider returned no localized object, which should not happen. provider: {} {:?} locale: {}",
            kind, adapter, locale
        );
    }
}
