//! # Summary Heuristic
//!
//! Condenses a structured MediaInfo report into one line such as
//! `HEVC 10-bit 4K DV | TrueHD 7.1 + DD 5.1 | Subs: 3 (English, Japanese, French)`.

use serde::{Deserialize, Serialize};

use super::structured::{AudioInfo, MediaInfoStructured, TextInfo, VideoInfo};
use crate::error::{RelkitError, Result};
use crate::language::{display_name, LanguageNormalizer};

/// Tunables for [`SummaryHeuristic`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryConfig {
    /// Placed between segments.
    pub separator: String,
    /// Distinct audio descriptors kept.
    pub max_audio_descriptors: usize,
    /// Subtitle languages listed in full up to this many.
    pub max_listed_languages: usize,
    /// Languages listed before the ellipsis when over the limit.
    pub truncated_languages: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            separator: " | ".to_string(),
            max_audio_descriptors: 2,
            max_listed_languages: 4,
            truncated_languages: 3,
        }
    }
}

impl SummaryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    pub fn with_max_audio_descriptors(mut self, max: usize) -> Self {
        self.max_audio_descriptors = max;
        self
    }

    pub fn with_language_limits(mut self, listed: usize, truncated: usize) -> Self {
        self.max_listed_languages = listed;
        self.truncated_languages = truncated;
        self
    }

    /// Checks that the limits are usable.
    ///
    /// # Errors
    ///
    /// Returns `RelkitError::InvalidConfig` for a zero audio limit or a
    /// truncation count larger than the listing limit.
    pub fn validate(&self) -> Result<()> {
        if self.max_audio_descriptors == 0 {
            return Err(RelkitError::InvalidConfig(
                "max_audio_descriptors must be at least 1".into(),
            ));
        }
        if self.truncated_languages > self.max_listed_languages {
            return Err(RelkitError::InvalidConfig(format!(
                "truncated_languages ({}) exceeds max_listed_languages ({})",
                self.truncated_languages, self.max_listed_languages
            )));
        }
        Ok(())
    }
}

/// Builds one-line human summaries from structured MediaInfo.
#[derive(Debug, Clone)]
pub struct SummaryHeuristic {
    config: SummaryConfig,
    languages: LanguageNormalizer,
}

impl SummaryHeuristic {
    /// # Errors
    ///
    /// Fails if `config` is invalid or the language patterns fail to compile.
    pub fn new(config: SummaryConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            languages: LanguageNormalizer::new()?,
        })
    }

    /// Creates a heuristic sharing an existing normalizer.
    pub fn with_normalizer(config: SummaryConfig, languages: LanguageNormalizer) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, languages })
    }

    pub fn config(&self) -> &SummaryConfig {
        &self.config
    }

    /// Produces the summary line; segments with no data are omitted, so a
    /// report with nothing recognizable yields an empty string.
    pub fn summarize(&self, info: &MediaInfoStructured) -> String {
        let segments: Vec<String> = [
            info.video.first().and_then(|v| self.video_segment(v)),
            self.audio_segment(&info.audio),
            self.subtitle_segment(&info.text),
        ]
        .into_iter()
        .flatten()
        .collect();

        segments.join(&self.config.separator)
    }

    /// `"{codec} [{n}-bit] {resolution} [{hdr}]"` for one video stream.
    pub fn video_segment(&self, video: &VideoInfo) -> Option<String> {
        let mut parts: Vec<String> = Vec::new();

        if let Some(format) = video.format.as_deref() {
            parts.push(format.to_string());
        }
        if let Some(bits) = video.bit_depth_bits().filter(|&b| b != 8) {
            parts.push(format!("{bits}-bit"));
        }
        if let Some(height) = video.height_px() {
            parts.push(resolution_label(height));
        }
        if let Some(hdr) = hdr_label(video) {
            parts.push(hdr.to_string());
        }

        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Distinct audio descriptors, first ones first, joined by `" + "`.
    pub fn audio_segment(&self, audio: &[AudioInfo]) -> Option<String> {
        let mut descriptors: Vec<String> = Vec::new();
        for descriptor in audio.iter().filter_map(audio_descriptor) {
            if descriptors.len() == self.config.max_audio_descriptors {
                break;
            }
            if !descriptors.contains(&descriptor) {
                descriptors.push(descriptor);
            }
        }

        (!descriptors.is_empty()).then(|| descriptors.join(" + "))
    }

    /// `"Subs: {count}"` with the distinct languages when few enough.
    pub fn subtitle_segment(&self, text: &[TextInfo]) -> Option<String> {
        if text.is_empty() {
            return None;
        }

        let mut languages: Vec<String> = Vec::new();
        for label in text.iter().filter_map(|t| t.language.as_deref()) {
            let canonical = self.languages.canonicalize(label);
            if !languages.contains(&canonical) {
                languages.push(canonical);
            }
        }

        let count = text.len();
        let listed: Vec<String> = if languages.len() > self.config.max_listed_languages {
            languages
                .iter()
                .take(self.config.truncated_languages)
                .map(|l| display_name(l))
                .chain(std::iter::once("...".to_string()))
                .collect()
        } else {
            languages.iter().map(|l| display_name(l)).collect()
        };

        if listed.is_empty() {
            Some(format!("Subs: {count}"))
        } else {
            Some(format!("Subs: {count} ({})", listed.join(", ")))
        }
    }
}

/// Resolution bucket by frame height.
pub fn resolution_label(height: u32) -> String {
    match height {
        h if h >= 2160 => "4K".to_string(),
        h if h >= 1080 => "1080p".to_string(),
        h if h >= 720 => "720p".to_string(),
        h if h >= 576 => "576p".to_string(),
        h if h >= 480 => "480p".to_string(),
        h => format!("{h}p"),
    }
}

/// HDR marker: the explicit `HDR format` label wins; transfer
/// characteristics are consulted only when it is absent.
pub fn hdr_label(video: &VideoInfo) -> Option<&'static str> {
    if let Some(format) = video.hdr_format.as_deref() {
        let format = format.to_lowercase();
        return Some(if format.contains("dolby vision") {
            "DV"
        } else if format.contains("hdr10+") {
            "HDR10+"
        } else if format.contains("hdr10") {
            "HDR10"
        } else if format.contains("hlg") {
            "HLG"
        } else {
            "HDR"
        });
    }

    let transfer = video.transfer_characteristics.as_deref()?.to_lowercase();
    if transfer.contains("pq") || transfer.contains("smpte st 2084") {
        Some("HDR10")
    } else if transfer.contains("hlg") {
        Some("HLG")
    } else {
        None
    }
}

/// Codec label plus channel layout, e.g. `"DD+ 5.1"`.
pub fn audio_descriptor(audio: &AudioInfo) -> Option<String> {
    let codec = audio
        .commercial_name
        .as_deref()
        .and_then(commercial_codec)
        .map(str::to_string)
        .or_else(|| audio.format.as_deref().map(format_codec))?;

    Some(match audio.channel_count() {
        Some(n) => format!("{codec} {}", channel_label(n)),
        None => codec,
    })
}

/// Channel count → layout name.
pub fn channel_label(channels: u32) -> String {
    match channels {
        1 => "1.0".to_string(),
        2 => "2.0".to_string(),
        6 => "5.1".to_string(),
        7 => "6.1".to_string(),
        8 => "7.1".to_string(),
        n => format!("{n}ch"),
    }
}

fn commercial_codec(name: &str) -> Option<&'static str> {
    let name = name.to_lowercase();
    if name.contains("atmos") {
        Some("Atmos")
    } else if name.contains("truehd") {
        Some("TrueHD")
    } else if name.contains("dts") {
        Some(if name.contains("hd") { "DTS-HD MA" } else { "DTS" })
    } else {
        None
    }
}

fn format_codec(format: &str) -> String {
    match format.trim().to_uppercase().as_str() {
        "E-AC-3" | "EAC3" => "DD+".to_string(),
        "AC-3" | "AC3" => "DD".to_string(),
        "AAC" => "AAC".to_string(),
        "FLAC" => "FLAC".to_string(),
        "OPUS" => "Opus".to_string(),
        "TRUEHD" | "MLP FBA" => "TrueHD".to_string(),
        "DTS" => "DTS".to_string(),
        _ => format.trim().to_string(),
    }
}
