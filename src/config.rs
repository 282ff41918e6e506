use crate::provider::AdapterKind;
use anyhow::{Context, Result};
use std::env::VarError;
use tracing::warn;

/// Environment variable holding the comma-separated adapter preference.
pub const LOCALE_PROVIDERS_ENV: &str = "LOCALE_PROVIDERS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Adapter kinds in priority order, highest first
    pub adapter_preference: Vec<AdapterKind>,
}

impl PoolConfig {
    pub fn from_env() -> Result<Self> {
        let adapter_preference = match std::env::var(LOCALE_PROVIDERS_ENV) {
            Ok(raw) => parse_preference(&raw),
            Err(VarError::NotPresent) => AdapterKind::DEFAULT_PREFERENCE.to_vec(),
            Err(e) => {
                return Err(e).context("LOCALE_PROVIDERS is not valid unicode");
            }
        };

        Ok(Self { adapter_preference })
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            adapter_preference: AdapterKind::DEFAULT_PREFERENCE.to_vec(),
        }
    }
}

/// Parse a preference list such as `CLDR,COMPAT`.
///
/// Unknown names are skipped with a warning and duplicates keep their first
/// position. The built-in kind is appended as the last resort when missing.
/// An empty or entirely invalid list yields the default preference.
pub fn parse_preference(raw: &str) -> Vec<AdapterKind> {
    let mut preference = Vec::new();

    for name in raw.split(',').map(str::trim).filter(|name| !name.is_empty()) {
        match name.parse::<AdapterKind>() {
            Ok(kind) if !preference.contains(&kind) => preference.push(kind),
            Ok(_) => {}
            Err(e) => warn!("{}, ignored", e),
        }
    }

    if preference.is_empty() {
        return AdapterKind::DEFAULT_PREFERENCE.to_vec();
    }
    if !preference.contains(&AdapterKind::Builtin) {
        preference.push(AdapterKind::Builtin);
    }
    preference
}
