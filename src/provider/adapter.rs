//! Adapter kinds and the collaborator traits the pool consumes.
//!
//! The pool never discovers adapters itself. An [`AdapterSource`] reports the
//! adapter kinds available on this platform in priority order and hands out
//! one [`LocaleServiceAdapter`] per (kind, category) pair.
//!
//! [`StaticAdapterSource`] and [`NameTableAdapter`] are in-memory
//! implementations for embedders that assemble their adapters up front.

use crate::config::PoolConfig;
use crate::error::UnknownAdapterKind;
use crate::locale::{candidate_locales, Locale};
use crate::provider::ServiceCategory;
use serde::Serialize;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Source of a locale service adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum AdapterKind {
    /// Locale data shipped with the runtime. Mandatory for every category.
    Builtin,

    /// Externally supplied plugin implementations.
    Plugin,

    /// Extended locale data tables (e.g. CLDR).
    ExtendedData,

    /// Locale data of the host operating system.
    Host,
}

impl AdapterKind {
    /// Every kind, in declaration order.
    pub const ALL: [AdapterKind; 4] = [
        AdapterKind::Builtin,
        AdapterKind::Plugin,
        AdapterKind::ExtendedData,
        AdapterKind::Host,
    ];

    /// Priority order used when nothing else is configured.
    pub const DEFAULT_PREFERENCE: [AdapterKind; 4] = AdapterKind::ALL;

    pub fn name(self) -> &'static str {
        match self {
            AdapterKind::Builtin => "BUILTIN",
            AdapterKind::Plugin => "PLUGIN",
            AdapterKind::ExtendedData => "CLDR",
            AdapterKind::Host => "HOST",
        }
    }
}

impl fmt::Display for AdapterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdapterKind {
    type Err = UnknownAdapterKind;

    /// Accepts the kind names case-insensitively, plus the legacy aliases
    /// `JRE`/`COMPAT` (builtin) and `SPI` (plugin).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "BUILTIN" | "JRE" | "COMPAT" => Ok(AdapterKind::Builtin),
            "PLUGIN" | "SPI" => Ok(AdapterKind::Plugin),
            "CLDR" | "EXTENDED" => Ok(AdapterKind::ExtendedData),
            "HOST" => Ok(AdapterKind::Host),
            _ => Err(UnknownAdapterKind(s.trim().to_string())),
        }
    }
}

/// One adapter instance serving a single service category.
///
/// Result extraction happens in caller-supplied getters, which reach the
/// concrete provider type through [`LocaleServiceAdapter::as_any`].
pub trait LocaleServiceAdapter: Any + Send + Sync + fmt::Debug {
    /// Every locale this adapter has data for.
    fn available_locales(&self) -> Vec<Locale>;

    /// Whether this adapter can serve `locale`.
    ///
    /// The default compares extension-stripped forms against
    /// [`available_locales`](Self::available_locales). The root locale is
    /// implicitly supported by every adapter.
    fn is_supported_locale(&self, locale: &Locale) -> bool {
        if locale.base_eq(&Locale::root()) {
            return true;
        }
        self.available_locales()
            .iter()
            .any(|available| available.base_eq(locale))
    }

    fn as_any(&self) -> &dyn Any;
}

/// Produces adapters for the pool. Replaces plugin discovery.
pub trait AdapterSource: Send + Sync {
    /// Adapter kinds available here, highest priority first.
    fn adapter_preference(&self) -> Vec<AdapterKind>;

    /// The adapter of `kind` for `category`, if that kind serves it.
    fn adapter_for(
        &self,
        kind: AdapterKind,
        category: ServiceCategory,
    ) -> Option<Arc<dyn LocaleServiceAdapter>>;
}

/// In-memory adapter source with a fixed table of adapters.
pub struct StaticAdapterSource {
    preference: Vec<AdapterKind>,
    adapters: HashMap<(AdapterKind, ServiceCategory), Arc<dyn LocaleServiceAdapter>>,
}

impl StaticAdapterSource {
    /// Create an empty source using the configured priority order.
    pub fn new(config: &PoolConfig) -> Self {
        Self {
            preference: config.adapter_preference.clone(),
            adapters: HashMap::new(),
        }
    }

    /// Register `adapter` as the `kind` adapter of `category`.
    pub fn with_adapter(
        mut self,
        kind: AdapterKind,
        category: ServiceCategory,
        adapter: Arc<dyn LocaleServiceAdapter>,
    ) -> Self {
        self.adapters.insert((kind, category), adapter);
        self
    }

    /// Register one shared adapter as the `kind` adapter of every category.
    pub fn with_adapter_for_all(
        mut self,
        kind: AdapterKind,
        adapter: Arc<dyn LocaleServiceAdapter>,
    ) -> Self {
        for category in ServiceCategory::ALL {
            self.adapters.insert((kind, category), Arc::clone(&adapter));
        }
        self
    }
}

impl Default for StaticAdapterSource {
    fn default() -> Self {
        Self::new(&PoolConfig::default())
    }
}

impl AdapterSource for StaticAdapterSource {
    fn adapter_preference(&self) -> Vec<AdapterKind> {
        self.preference.clone()
    }

    fn adapter_for(
        &self,
        kind: AdapterKind,
        category: ServiceCategory,
    ) -> Option<Arc<dyn LocaleServiceAdapter>> {
        self.adapters.get(&(kind, category)).cloned()
    }
}

/// Adapter backed by a table of localized names keyed by locale and key.
///
/// Name lookups follow the candidate chain internally, so a name registered
/// for `fr` also serves `fr_CA`.
#[derive(Debug, Clone, Default)]
pub struct NameTableAdapter {
    locales: Vec<Locale>,
    names: HashMap<(Locale, String), String>,
}

impl NameTableAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare `locale` as supported without adding names.
    pub fn with_locale(mut self, locale: Locale) -> Self {
        if !self.locales.contains(&locale) {
            self.locales.push(locale);
        }
        self
    }

    /// Add a localized name. The locale becomes supported as well.
    pub fn with_name(self, locale: Locale, key: &str, name: &str) -> Self {
        let mut adapter = self.with_locale(locale.clone());
        adapter
            .names
            .insert((locale.strip_extensions(), key.to_string()), name.to_string());
        adapter
    }

    /// The name for `key`, searching from `locale` towards root.
    pub fn name(&self, locale: &Locale, key: &str) -> Option<String> {
        candidate_locales(locale).into_iter().find_map(|candidate| {
            self.names
                .get(&(candidate.strip_extensions(), key.to_string()))
                .cloned()
        })
    }

    /// Getter for [`ProviderPool::localized_name`](crate::provider::ProviderPool::localized_name)
    /// over pools whose adapters are `NameTableAdapter`s.
    pub fn lookup(
        adapter: &dyn LocaleServiceAdapter,
        locale: &Locale,
        key: Option<&str>,
    ) -> Option<String> {
        let table = adapter.as_any().downcast_ref::<NameTableAdapter>()?;
        table.name(locale, key?)
    }
}

impl LocaleServiceAdapter for NameTableAdapter {
    fn available_locales(&self) -> Vec<Locale> {
        self.locales.clone()
    }

    fn is_supported_locale(&self, locale: &Locale) -> bool {
        locale.base_eq(&Locale::root())
            || self.locales.iter().any(|supported| supported.base_eq(locale))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== AdapterKind Tests ====================

    #[test]
    fn test_adapter_kind_from_str_aliases() {
        assert_eq!("builtin".parse::<AdapterKind>(), Ok(AdapterKind::Builtin));
        assert_eq!("JRE".parse::<AdapterKind>(), Ok(AdapterKind::Builtin));
        assert_eq!("COMPAT".parse::<AdapterKind>(), Ok(AdapterKind::Builtin));
        assert_eq!(" spi ".parse::<AdapterKind>(), Ok(AdapterKind::Plugin));
        assert_eq!("cldr".parse::<AdapterKind>(), Ok(AdapterKind::ExtendedData));
        assert_eq!("Host".parse::<AdapterKind>(), Ok(AdapterKind::Host));
    }

    #[test]
    fn test_adapter_kind_from_str_unknown() {
        let err = "ICU".parse::<AdapterKind>().unwrap_err();
        assert_eq!(err, UnknownAdapterKind("ICU".to_string()));
        assert!(err.to_string().contains("ICU"));
    }

    #[test]
    fn test_adapter_kind_serializes_by_variant() {
        let json = serde_json::to_value(AdapterKind::DEFAULT_PREFERENCE).expect("serialize");
        assert_eq!(json, serde_json::json!(["Builtin", "Plugin", "ExtendedData", "Host"]));
    }

    #[test]
    fn test_adapter_kind_display_roundtrips() {
        for kind in AdapterKind::ALL {
            assert_eq!(kind.to_string().parse::<AdapterKind>(), Ok(kind));
        }
    }

    // ==================== Default Support Tests ====================

    #[test]
    fn test_default_supported_locale_ignores_extensions() {
        let adapter = NameTableAdapter::new().with_locale(Locale::new("de", "DE", ""));
        let requested = Locale::new("de", "DE", "").with_extension('u', "co-phonebk");

        assert!(adapter.is_supported_locale(&requested));
        assert!(!adapter.is_supported_locale(&Locale::for_language("de")));
    }

    #[test]
    fn test_name_table_support_matches_declared_locales() {
        let adapter = NameTableAdapter::new()
            .with_name(Locale::new("fr", "CA", ""), "fr", "français (Canada)")
            .with_locale(Locale::with_script("sr", "Latn", "RS", ""));

        let extended = Locale::new("fr", "CA", "").with_extension('u', "nu-latn");
        assert!(adapter.is_supported_locale(&extended));
        assert!(adapter.is_supported_locale(&Locale::with_script("sr", "Latn", "RS", "")));
        assert!(!adapter.is_supported_locale(&Locale::new("sr", "RS", "")));
        assert!(!adapter.is_supported_locale(&Locale::for_language("fr")));
    }

    #[test]
    fn test_root_is_implicitly_supported() {
        let adapter = NameTableAdapter::new();
        assert!(adapter.is_supported_locale(&Locale::root()));
    }

    #[test]
    fn test_irregular_locale_supported_by_base_form() {
        let adapter = NameTableAdapter::new().with_locale(Locale::ja_jp_jp());
        assert!(adapter.is_supported_locale(&Locale::ja_jp_jp()));
        assert!(adapter.is_supported_locale(&Locale::ja_jp_jp().strip_extensions()));
    }

    // ==================== NameTableAdapter Tests ====================

    #[test]
    fn test_name_table_follows_candidate_chain() {
        let adapter = NameTableAdapter::new()
            .with_name(Locale::for_language("fr"), "de", "allemand")
            .with_name(Locale::root(), "de", "German");

        assert_eq!(
            adapter.name(&Locale::new("fr", "CA", ""), "de"),
            Some("allemand".to_string())
        );
        assert_eq!(
            adapter.name(&Locale::new("es", "ES", ""), "de"),
            Some("German".to_string())
        );
        assert_eq!(adapter.name(&Locale::new("fr", "CA", ""), "xx"), None);
    }

    #[test]
    fn test_lookup_requires_key_and_table_adapter() {
        let adapter = NameTableAdapter::new().with_name(Locale::root(), "en", "English");
        assert_eq!(
            NameTableAdapter::lookup(&adapter, &Locale::root(), Some("en")),
            Some("English".to_string())
        );
        assert_eq!(NameTableAdapter::lookup(&adapter, &Locale::root(), None), None);
    }

    #[test]
    fn test_with_locale_deduplicates() {
        let adapter = NameTableAdapter::new()
            .with_locale(Locale::for_language("it"))
            .with_name(Locale::for_language("it"), "it", "italiano");
        assert_eq!(adapter.available_locales(), vec![Locale::for_language("it")]);
    }

    // ==================== StaticAdapterSource Tests ====================

    #[test]
    fn test_static_source_returns_registered_adapters() {
        let adapter: Arc<dyn LocaleServiceAdapter> = Arc::new(NameTableAdapter::new());
        let source = StaticAdapterSource::default()
            .with_adapter(AdapterKind::Plugin, ServiceCategory::CurrencyName, adapter);

        assert!(source
            .adapter_for(AdapterKind::Plugin, ServiceCategory::CurrencyName)
            .is_some());
        assert!(source
            .adapter_for(AdapterKind::Plugin, ServiceCategory::LocaleName)
            .is_none());
        assert_eq!(source.adapter_preference(), AdapterKind::DEFAULT_PREFERENCE.to_vec());
    }

    #[test]
    fn test_static_source_shared_adapter_for_all() {
        let adapter: Arc<dyn LocaleServiceAdapter> = Arc::new(NameTableAdapter::new());
        let source = StaticAdapterSource::default()
            .with_adapter_for_all(AdapterKind::Builtin, Arc::clone(&adapter));

        for category in ServiceCategory::ALL {
            let found = source
                .adapter_for(AdapterKind::Builtin, category)
                .expect("registered for every category");
            assert!(Arc::ptr_eq(&found, &adapter));
        }
    }
}
