//! Language utilities for the translation target setting
//!
//! Users may write the target language as an ISO 639-1 code (`fr`),
//! an ISO 639-2/T or 639-2/B code (`fra`, `fre`) or an English name
//! (`French`). Translation services want the shortest code available.

use isolang::Language;

use crate::errors::ConfigError;

/// Map ISO 639-2/B codes that differ from their ISO 639-2/T form
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"),
        "ger" => Some("deu"),
        "dut" => Some("nld"),
        "gre" => Some("ell"),
        "chi" => Some("zho"),
        "cze" => Some("ces"),
        "ice" => Some("isl"),
        "alb" => Some("sqi"),
        "arm" => Some("hye"),
        "baq" => Some("eus"),
        "bur" => Some("mya"),
        "per" => Some("fas"),
        "geo" => Some("kat"),
        "may" => Some("msa"),
        "mac" => Some("mkd"),
        "rum" => Some("ron"),
        "slo" => Some("slk"),
        "wel" => Some("cym"),
        _ => None,
    }
}

/// Capitalize each word so "brazilian portuguese" finds "Brazilian Portuguese"
fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Look up a language by code or English name
pub fn find_language(name: &str) -> Option<Language> {
    let normalized = name.trim().to_lowercase();

    match normalized.chars().count() {
        // isolang knows single-letter names such as "E"; no code or real name is that short
        0 | 1 => None,
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = part2b_to_part2t(&normalized).unwrap_or(normalized.as_str());
            Language::from_639_3(part2t)
        }
        _ => Language::from_name(&title_case(&normalized)),
    }
}

/// Resolve a configured language to the code sent to translation services.
///
/// Prefers the ISO 639-1 code and falls back to ISO 639-3.
pub fn resolve_language_code(name: &str) -> Result<String, ConfigError> {
    let language = find_language(name).ok_or_else(|| ConfigError::InvalidLanguage(name.to_string()))?;

    Ok(language
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| language.to_639_3().to_string()))
}

/// English name of a configured language
pub fn get_language_name(name: &str) -> Result<String, ConfigError> {
    find_language(name)
        .map(|language| language.to_name().to_string())
        .ok_or_else(|| ConfigError::InvalidLanguage(name.to_string()))
}
