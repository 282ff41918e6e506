//! Locale value type.
//!
//! A `Locale` is assembled from its subtags (language, script, region,
//! variant and extensions). Identifier strings are never parsed here; callers
//! that read locale tags from configuration or the host do that themselves and
//! hand over the parts.

use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

/// Singleton of the Unicode locale extension (`u-...`).
pub const UNICODE_EXTENSION: char = 'u';

/// Raised when a locale's base fields are not well-formed BCP 47 subtags.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("ill-formed {field} subtag: {value:?}")]
pub struct IllformedLocale {
    /// Which field failed validation ("language", "script", "region", "variant")
    pub field: &'static str,

    /// The offending value
    pub value: String,
}

/// A locale made of language, script, region, variant and extension subtags.
///
/// Case is normalized on construction: language lowercase, script titlecase,
/// region uppercase. The variant is kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Locale {
    language: String,
    script: String,
    region: String,
    variant: String,
    extensions: BTreeMap<char, String>,
}

static LANGUAGE_REGEX: OnceLock<Regex> = OnceLock::new();
static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
static REGION_REGEX: OnceLock<Regex> = OnceLock::new();
static VARIANT_REGEX: OnceLock<Regex> = OnceLock::new();

impl Locale {
    /// The root (neutral) locale. Every adapter implicitly supports it.
    pub fn root() -> Self {
        Self::default()
    }

    /// Build a locale from language, region and variant.
    pub fn new(language: &str, region: &str, variant: &str) -> Self {
        Self::with_script(language, "", region, variant)
    }

    /// Build a language-only locale such as `fr`.
    pub fn for_language(language: &str) -> Self {
        Self::new(language, "", "")
    }

    /// Build a locale from all four base fields.
    ///
    /// `ja_JP_JP` and `th_TH_TH` receive their legacy compatibility
    /// extensions (`u-ca-japanese` and `u-nu-thai`), so the irregular forms
    /// compare equal no matter how they were assembled.
    pub fn with_script(language: &str, script: &str, region: &str, variant: &str) -> Self {
        let language = language.to_ascii_lowercase();
        let script = title_case(script);
        let region = region.to_ascii_uppercase();
        let extensions = compatibility_extensions(&language, &script, &region, variant);

        Self {
            language,
            script,
            region,
            variant: variant.to_string(),
            extensions,
        }
    }

    /// The Japanese imperial calendar locale, `ja_JP_JP_#u-ca-japanese`.
    pub fn ja_jp_jp() -> Self {
        Self::new("ja", "JP", "JP")
    }

    /// The Thai digits locale, `th_TH_TH_#u-nu-thai`.
    pub fn th_th_th() -> Self {
        Self::new("th", "TH", "TH")
    }

    /// Return a copy carrying the given extension. An empty value removes it.
    pub fn with_extension(mut self, key: char, value: &str) -> Self {
        let key = key.to_ascii_lowercase();
        if value.is_empty() {
            self.extensions.remove(&key);
        } else {
            self.extensions.insert(key, value.to_ascii_lowercase());
        }
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Value of the extension with the given singleton, if present.
    pub fn extension(&self, key: char) -> Option<&str> {
        self.extensions
            .get(&key.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn has_extensions(&self) -> bool {
        !self.extensions.is_empty()
    }

    pub fn is_root(&self) -> bool {
        self.language.is_empty()
            && self.script.is_empty()
            && self.region.is_empty()
            && self.variant.is_empty()
            && self.extensions.is_empty()
    }

    /// True for `ja_JP_JP` and `th_TH_TH` in their compatibility form.
    pub fn is_irregular(&self) -> bool {
        self.script.is_empty()
            && self.extensions.len() == 1
            && matches!(
                (
                    self.language.as_str(),
                    self.region.as_str(),
                    self.variant.as_str()
                ),
                ("ja", "JP", "JP") | ("th", "TH", "TH")
            )
            && self.extensions
                == compatibility_extensions(&self.language, "", &self.region, &self.variant)
    }

    /// The base fields only, with every extension dropped.
    ///
    /// Unlike [`Locale::with_script`] this never re-attaches compatibility
    /// extensions, so `ja_JP_JP` strips to a plain `ja_JP_JP`.
    pub fn strip_extensions(&self) -> Locale {
        if !self.has_extensions() {
            return self.clone();
        }
        Locale {
            extensions: BTreeMap::new(),
            ..self.clone()
        }
    }

    /// Drop all extensions after checking that the base fields are
    /// well-formed subtags.
    ///
    /// The legacy two-letter variants are rewritten first: `ja_JP_JP` becomes
    /// `ja_JP`, `th_TH_TH` becomes `th_TH` and `no_NO_NY` becomes `nn_NO`.
    pub fn clear_extensions(&self) -> Result<Locale, IllformedLocale> {
        let mut base = self.strip_extensions();
        match (base.language.as_str(), base.region.as_str(), base.variant.as_str()) {
            ("ja", "JP", "JP") | ("th", "TH", "TH") => base.variant.clear(),
            ("no", "NO", "NY") => {
                base.language = "nn".to_string();
                base.variant.clear();
            }
            _ => {}
        }
        base.validate()?;
        Ok(base)
    }

    /// True when both locales share language, script, region and variant.
    pub fn base_eq(&self, other: &Locale) -> bool {
        self.language == other.language
            && self.script == other.script
            && self.region == other.region
            && self.variant == other.variant
    }

    /// Check every base field against the BCP 47 subtag grammar.
    ///
    /// Empty fields are valid. Variants may hold several subtags separated by
    /// `_` or `-`.
    pub fn validate(&self) -> Result<(), IllformedLocale> {
        let language_re =
            LANGUAGE_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z]{2,8}$").unwrap());
        let script_re = SCRIPT_REGEX.get_or_init(|| Regex::new(r"^[A-Za-z]{4}$").unwrap());
        let region_re =
            REGION_REGEX.get_or_init(|| Regex::new(r"^(?:[A-Za-z]{2}|[0-9]{3})$").unwrap());
        let variant_re = VARIANT_REGEX
            .get_or_init(|| Regex::new(r"^(?:[0-9A-Za-z]{5,8}|[0-9][0-9A-Za-z]{3})$").unwrap());

        check_field("language", &self.language, language_re)?;
        check_field("script", &self.script, script_re)?;
        check_field("region", &self.region, region_re)?;

        if !self.variant.is_empty()
            && !self
                .variant
                .split(['_', '-'])
                .all(|subtag| variant_re.is_match(subtag))
        {
            return Err(IllformedLocale {
                field: "variant",
                value: self.variant.clone(),
            });
        }

        Ok(())
    }

    fn extension_id(&self) -> String {
        self.extensions
            .iter()
            .map(|(key, value)| format!("{key}-{value}"))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl fmt::Display for Locale {
    /// Renders `language_REGION_variant_#Script_ext`, e.g. `zh_TW_#Hant` or
    /// `ja_JP_JP_#u-ca-japanese`. The root locale renders as an empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let l = !self.language.is_empty();
        let s = !self.script.is_empty();
        let r = !self.region.is_empty();
        let v = !self.variant.is_empty();
        let e = self.has_extensions();

        f.write_str(&self.language)?;
        if r || (l && (v || s || e)) {
            write!(f, "_{}", self.region)?;
        }
        if v && (l || r) {
            write!(f, "_{}", self.variant)?;
        }
        if s && (l || r) {
            write!(f, "_#{}", self.script)?;
        }
        if e && (l || r) {
            f.write_str("_")?;
            if !s {
                f.write_str("#")?;
            }
            f.write_str(&self.extension_id())?;
        }
        Ok(())
    }
}

fn check_field(field: &'static str, value: &str, re: &Regex) -> Result<(), IllformedLocale> {
    if value.is_empty() || re.is_match(value) {
        Ok(())
    } else {
        Err(IllformedLocale {
            field,
            value: value.to_string(),
        })
    }
}

fn title_case(value: &str) -> String {
    value
        .char_indices()
        .map(|(i, c)| {
            if i == 0 {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn compatibility_extensions(
    language: &str,
    script: &str,
    region: &str,
    variant: &str,
) -> BTreeMap<char, String> {
    let mut extensions = BTreeMap::new();
    if script.is_empty() {
        match (language, region, variant) {
            ("ja", "JP", "JP") => {
                extensions.insert(UNICODE_EXTENSION, "ca-japanese".to_string());
            }
            ("th", "TH", "TH") => {
                extensions.insert(UNICODE_EXTENSION, "nu-thai".to_string());
            }
            _ => {}
        }
    }
    extensions
}
