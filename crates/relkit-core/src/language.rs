//! # Language Normalizer
//!
//! Canonicalizes free-form language labels found in MediaInfo reports and
//! curator input ("English (SDH)", "Chinese (Traditional)", "Forced") and maps
//! them to regional-indicator flag glyphs.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Glyph returned when no region matches.
pub const GLOBE_GLYPH: &str = "\u{1F310}";

/// Canonical name used when a label reduces to nothing.
pub const UNKNOWN_LANGUAGE: &str = "unknown";

const SPANISH_LATAM: &str = "spanish (latin america)";
const PORTUGUESE_BRAZIL: &str = "portuguese (brazil)";

/// Language → region table. Each row lists the canonical name first, then
/// ISO 639-1 and common ISO 639-2 codes.
const LANGUAGE_REGIONS: &[(&[&str], &str)] = &[
    (&["english", "en", "eng"], "US"),
    (&["japanese", "ja", "jpn"], "JP"),
    (&["chinese", "zh", "zho", "chi"], "CN"),
    (&["cantonese", "yue"], "HK"),
    (&["korean", "ko", "kor"], "KR"),
    (&["french", "fr", "fra", "fre"], "FR"),
    (&["german", "de", "deu", "ger"], "DE"),
    (&["spanish", "es", "spa"], "ES"),
    (&["portuguese", "pt", "por"], "PT"),
    (&["italian", "it", "ita"], "IT"),
    (&["russian", "ru", "rus"], "RU"),
    (&["arabic", "ar", "ara"], "SA"),
    (&["hindi", "hi", "hin"], "IN"),
    (&["tamil", "ta", "tam"], "IN"),
    (&["telugu", "te", "tel"], "IN"),
    (&["bengali", "bn", "ben"], "BD"),
    (&["thai", "th", "tha"], "TH"),
    (&["vietnamese", "vi", "vie"], "VN"),
    (&["indonesian", "id", "ind"], "ID"),
    (&["malay", "ms", "msa", "may"], "MY"),
    (&["filipino", "tl", "fil", "tagalog"], "PH"),
    (&["turkish", "tr", "tur"], "TR"),
    (&["polish", "pl", "pol"], "PL"),
    (&["dutch", "nl", "nld", "dut"], "NL"),
    (&["swedish", "sv", "swe"], "SE"),
    (&["norwegian", "no", "nor", "nb", "nob"], "NO"),
    (&["danish", "da", "dan"], "DK"),
    (&["finnish", "fi", "fin"], "FI"),
    (&["icelandic", "is", "isl", "ice"], "IS"),
    (&["greek", "el", "ell", "gre"], "GR"),
    (&["hebrew", "he", "heb"], "IL"),
    (&["persian", "fa", "fas", "per"], "IR"),
    (&["czech", "cs", "ces", "cze"], "CZ"),
    (&["slovak", "sk", "slk", "slo"], "SK"),
    (&["hungarian", "hu", "hun"], "HU"),
    (&["romanian", "ro", "ron", "rum"], "RO"),
    (&["bulgarian", "bg", "bul"], "BG"),
    (&["ukrainian", "uk", "ukr"], "UA"),
    (&["croatian", "hr", "hrv"], "HR"),
    (&["serbian", "sr", "srp"], "RS"),
    (&["slovenian", "sl", "slv"], "SI"),
    (&["estonian", "et", "est"], "EE"),
    (&["latvian", "lv", "lav"], "LV"),
    (&["lithuanian", "lt", "lit"], "LT"),
    (&["catalan", "ca", "cat"], "ES"),
    // Regional variants sit last so prefix matching prefers the base language.
    (&[SPANISH_LATAM, "es-419"], "MX"),
    (&[PORTUGUESE_BRAZIL, "pt-br"], "BR"),
];

/// A canonical language paired with its flag glyph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageFlag {
    /// Canonical, lowercase language name (deduplication key).
    pub language: String,
    /// Regional-indicator flag, or [`GLOBE_GLYPH`].
    pub flag: String,
}

/// Normalizes language labels and resolves flag glyphs.
///
/// Never fails on input: unknown languages get the globe glyph.
#[derive(Debug, Clone)]
pub struct LanguageNormalizer {
    re_qualifier: Regex,
    re_marker: Regex,
    re_chinese: Regex,
}

impl LanguageNormalizer {
    /// Constructs a normalizer with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `RelkitError::RegexError` if a pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_qualifier: Regex::new(r"\([^)]*\)|\[[^\]]*\]")?,
            re_marker: Regex::new(
                r"(?i)\b(?:sdh|cc|forced|commentary|descriptive|hearing[\s-]*impaired)\b",
            )?,
            re_chinese: Regex::new(r"(?i)\b(?:chinese|mandarin|simplified|traditional)\b")?,
        })
    }

    /// Reduces a raw label to its canonical language name.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::language::LanguageNormalizer;
    ///
    /// let n = LanguageNormalizer::new().unwrap();
    /// assert_eq!(n.canonicalize("English (SDH)"), "english");
    /// assert_eq!(n.canonicalize("Chinese (Traditional)"), "chinese");
    /// assert_eq!(n.canonicalize("Spanish (Latin America)"), "spanish (latin america)");
    /// ```
    pub fn canonicalize(&self, label: &str) -> String {
        let lower = label.trim().to_lowercase();

        // Regional variants must be recognized before qualifiers are stripped.
        if lower.contains("spanish")
            && ["latin", "latam", "419", "mexic"].iter().any(|k| lower.contains(k))
        {
            return SPANISH_LATAM.to_string();
        }
        if lower.contains("portuguese")
            && ["brazil", "brasil", "(br)", "-br"].iter().any(|k| lower.contains(k))
        {
            return PORTUGUESE_BRAZIL.to_string();
        }
        if lower.contains("cantonese") {
            return "cantonese".to_string();
        }
        if self.re_chinese.is_match(&lower) {
            return "chinese".to_string();
        }

        let stripped = self.re_qualifier.replace_all(&lower, " ");
        let stripped = self.re_marker.replace_all(&stripped, " ");
        let canonical = stripped
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .trim_matches(|c: char| c == '-' || c == ',' || c == '/' || c == ' ')
            .to_string();

        if canonical.is_empty() {
            UNKNOWN_LANGUAGE.to_string()
        } else {
            canonical
        }
    }

    /// Resolves the flag glyph for a canonical language.
    pub fn flag_for(&self, canonical: &str) -> String {
        region_for(canonical)
            .and_then(region_flag)
            .unwrap_or_else(|| GLOBE_GLYPH.to_string())
    }

    /// Canonicalizes a label and looks up its flag.
    pub fn normalize(&self, label: &str) -> LanguageFlag {
        let language = self.canonicalize(label);
        let flag = self.flag_for(&language);
        LanguageFlag { language, flag }
    }

    /// Normalizes a list of labels, keeping one entry per canonical language
    /// in first-seen order.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::language::LanguageNormalizer;
    ///
    /// let n = LanguageNormalizer::new().unwrap();
    /// let flags = n.unique_flags(["English", "English (SDH)", "Japanese"]);
    /// assert_eq!(flags.len(), 2);
    /// ```
    pub fn unique_flags<I, S>(&self, labels: I) -> Vec<LanguageFlag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<LanguageFlag> = Vec::new();
        for label in labels {
            let entry = self.normalize(label.as_ref());
            if !out.iter().any(|seen| seen.language == entry.language) {
                out.push(entry);
            }
        }
        out
    }
}

/// Title-cases a canonical name for display: "spanish (latin america)" →
/// "Spanish (Latin America)".
pub fn display_name(canonical: &str) -> String {
    let mut out = String::with_capacity(canonical.len());
    let mut upper_next = true;
    for c in canonical.chars() {
        if upper_next && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
            if !c.is_alphanumeric() {
                upper_next = true;
            }
        }
    }
    out
}

/// Converts a two-letter region code into its regional-indicator flag.
///
/// Returns `None` unless the code is exactly two ASCII letters.
pub fn region_flag(code: &str) -> Option<String> {
    if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    code.bytes()
        .map(|b| char::from_u32(0x1F1E6 + u32::from(b.to_ascii_uppercase() - b'A')))
        .collect()
}

fn region_for(canonical: &str) -> Option<&'static str> {
    if let Some(region) = LANGUAGE_REGIONS
        .iter()
        .find(|(keys, _)| keys.contains(&canonical))
        .map(|(_, region)| *region)
    {
        return Some(region);
    }

    if canonical.len() < 3 {
        return None;
    }
    LANGUAGE_REGIONS
        .iter()
        .find(|(keys, _)| {
            keys.iter()
                .filter(|k| k.len() > 3)
                .any(|k| canonical.starts_with(k) || k.starts_with(canonical))
        })
        .map(|(_, region)| *region)
}
