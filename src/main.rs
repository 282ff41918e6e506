use anyhow::Result;
use locale_provider_pool::config::PoolConfig;
use locale_provider_pool::locale::Locale;
use locale_provider_pool::provider::{
    AdapterKind, NameTableAdapter, ProviderPool, ServiceCategory, StaticAdapterSource,
};
use std::sync::Arc;
use tracing::info;

/// Usage: `locale-provider-pool [language [region [variant]]]`
fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("locale_provider_pool=info".parse()?),
        )
        .init();

    let config = PoolConfig::from_env()?;
    info!("Adapter preference: {:?}", config.adapter_preference);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let part = |index: usize| args.get(index).map(String::as_str).unwrap_or("");
    let requested = Locale::new(part(0), part(1), part(2));

    let pool = ProviderPool::new(Arc::new(demo_source(&config)));

    info!("Resolving locale names for '{}'", requested);
    let names: Vec<_> = ["en", "fr", "de"]
        .into_iter()
        .map(|key| {
            pool.localized_name(
                ServiceCategory::LocaleName,
                &requested,
                key,
                NameTableAdapter::lookup,
            )
            .map(|name| (key, name.into_option()))
        })
        .collect::<Result<_, _>>()?;

    let names: serde_json::Map<String, serde_json::Value> = names
        .into_iter()
        .map(|(key, name)| (key.to_string(), serde_json::json!(name)))
        .collect();
    let available: Vec<String> = pool
        .available_locales(ServiceCategory::LocaleName)
        .iter()
        .map(Locale::to_string)
        .collect();
    let all_available: Vec<String> = pool
        .all_available_locales()
        .iter()
        .map(Locale::to_string)
        .collect();

    let output = serde_json::json!({
        "category": ServiceCategory::LocaleName,
        "adapter_preference": config.adapter_preference,
        "requested": requested.to_string(),
        "names": names,
        "available_locales": available,
        "all_available_locales": all_available,
        "metrics": pool.metrics().report(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(())
}

/// Built-in English, French and German language names, plus a plugin that
/// adds Canadian French.
fn demo_source(config: &PoolConfig) -> StaticAdapterSource {
    let builtin = NameTableAdapter::new()
        .with_name(Locale::root(), "en", "English")
        .with_name(Locale::root(), "fr", "French")
        .with_name(Locale::root(), "de", "German")
        .with_name(Locale::for_language("fr"), "en", "anglais")
        .with_name(Locale::for_language("fr"), "fr", "français")
        .with_name(Locale::for_language("fr"), "de", "allemand")
        .with_name(Locale::for_language("de"), "en", "Englisch")
        .with_name(Locale::for_language("de"), "fr", "Französisch")
        .with_name(Locale::for_language("de"), "de", "Deutsch");

    let plugin = NameTableAdapter::new()
        .with_name(Locale::new("fr", "CA", ""), "en", "anglais (Canada)")
        .with_name(Locale::new("fr", "CA", ""), "fr", "français (Canada)");

    StaticAdapterSource::new(config)
        .with_adapter_for_all(AdapterKind::Builtin, Arc::new(builtin))
        .with_adapter(
            AdapterKind::Plugin,
            ServiceCategory::LocaleName,
            Arc::new(plugin),
        )
}
