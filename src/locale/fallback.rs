//! Locale fallback: candidate chains and lookup normalization.
//!
//! `candidate_locales` produces the standard resource-bundle candidate list,
//! most specific first and always ending at the root locale. Consumers of the
//! resulting order assume this exact sequence, so the Norwegian and Chinese
//! special cases are part of the contract.

use super::tag::{IllformedLocale, Locale};
use tracing::warn;

/// Return the ordered candidate locales for service lookup.
///
/// Only the base fields of `locale` take part; user extensions never appear
/// in a candidate. `ja_JP_JP` and `th_TH_TH` candidates carry their
/// compatibility extension since it is part of those locales' identity.
pub fn candidate_locales(locale: &Locale) -> Vec<Locale> {
    let language = locale.language();
    let mut script = locale.script();
    let mut region = locale.region();
    let mut variant = locale.variant();

    let mut is_bokmal = false;
    let mut is_nynorsk = false;
    if language == "no" {
        if region == "NO" && variant == "NY" {
            variant = "";
            is_nynorsk = true;
        } else {
            is_bokmal = true;
        }
    }

    if language == "nb" || is_bokmal {
        // Every nb entry is followed by its legacy "no" twin, except root.
        let mut list = Vec::new();
        for candidate in default_candidates("nb", script, region, variant) {
            if candidate.language().is_empty() {
                list.push(candidate);
                break;
            }
            let twin = Locale::with_script(
                "no",
                candidate.script(),
                candidate.region(),
                candidate.variant(),
            );
            list.push(candidate);
            list.push(twin);
        }
        return list;
    }

    if language == "nn" || is_nynorsk {
        let mut list = default_candidates("nn", script, region, variant);
        let root = list.pop();
        list.extend([
            Locale::new("no", "NO", "NY"),
            Locale::new("no", "NO", ""),
            Locale::for_language("no"),
        ]);
        list.extend(root);
        return list;
    }

    if language == "zh" {
        if script.is_empty() && !region.is_empty() {
            script = match region {
                "TW" | "HK" | "MO" => "Hant",
                "CN" | "SG" => "Hans",
                _ => script,
            };
        } else if !script.is_empty() && region.is_empty() {
            region = match script {
                "Hans" => "CN",
                "Hant" => "TW",
                _ => region,
            };
        }
    }

    default_candidates(language, script, region, variant)
}

fn default_candidates(language: &str, script: &str, region: &str, variant: &str) -> Vec<Locale> {
    let variants = variant_prefixes(variant);
    let mut list = Vec::new();

    for v in &variants {
        list.push(Locale::with_script(language, script, region, v));
    }
    if !region.is_empty() {
        list.push(Locale::with_script(language, script, region, ""));
    }
    if !script.is_empty() {
        list.push(Locale::with_script(language, script, "", ""));

        // Once the script is reached, start over without it.
        for v in &variants {
            list.push(Locale::new(language, region, v));
        }
        if !region.is_empty() {
            list.push(Locale::new(language, region, ""));
        }
    }
    if !language.is_empty() {
        list.push(Locale::for_language(language));
    }
    list.push(Locale::root());

    list
}

/// `A_B_C` yields `A_B_C`, `A_B`, `A`.
fn variant_prefixes(variant: &str) -> Vec<&str> {
    let mut prefixes = Vec::new();
    if variant.is_empty() {
        return prefixes;
    }

    let mut end = variant.len();
    loop {
        let prefix = &variant[..end];
        prefixes.push(prefix);
        match prefix.rfind('_') {
            Some(index) => end = index,
            None => break,
        }
    }
    prefixes
}

/// Return the form of `locale` used as an availability key.
///
/// Extensions are removed, except for the two irregular locales whose legacy
/// variant is itself meaningful. Once those carry further extensions they
/// lose the legacy variant (`no_NO_NY` turns into `nn_NO` the same way).
/// Never fails: a locale whose extensions
/// cannot be cleared cleanly is rebuilt from language, region and variant.
pub fn lookup_locale(locale: &Locale) -> Locale {
    lookup_locale_reporting(locale, |_| {})
}

pub(crate) fn lookup_locale_reporting(
    locale: &Locale,
    on_degraded: impl FnOnce(&IllformedLocale),
) -> Locale {
    if !locale.has_extensions() || locale.is_irregular() {
        return locale.clone();
    }

    match locale.clear_extensions() {
        Ok(clean) => clean,
        Err(e) => {
            warn!(
                "Locale {} has non-empty extensions but ill-formed fields ({}), script will be lost",
                locale, e
            );
            on_degraded(&e);
            Locale::new(locale.language(), locale.region(), locale.variant())
        }
    }
}
