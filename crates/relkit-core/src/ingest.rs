//! # Ingest Facade
//!
//! One entry point over every artifact decoder, sharing a single
//! configuration and one compiled language table.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bbcode::{extract_specs_with, BBCodeExtractor, BBCodeRenderer, SpecEntry};
use crate::error::Result;
use crate::language::{LanguageFlag, LanguageNormalizer};
use crate::mediainfo::{MediaInfoParser, MediaInfoStructured, SummaryConfig, SummaryHeuristic};
use crate::torrent::{TorrentDecoder, TorrentEntry};

/// Configuration for the [`Ingestor`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Summary line settings.
    pub summary: SummaryConfig,
}

impl IngestConfig {
    /// Create a new configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the summary settings.
    pub fn with_summary(mut self, summary: SummaryConfig) -> Self {
        self.summary = summary;
        self
    }

    /// Set the separator between summary segments.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.summary = self.summary.with_separator(separator);
        self
    }

    /// Set how many distinct audio descriptors the summary keeps.
    pub fn with_max_audio_descriptors(mut self, max: usize) -> Self {
        self.summary = self.summary.with_max_audio_descriptors(max);
        self
    }

    /// # Errors
    ///
    /// Returns `RelkitError::InvalidConfig` if any nested setting is unusable.
    pub fn validate(&self) -> Result<()> {
        self.summary.validate()
    }
}

/// Everything derived from one MediaInfo report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReport {
    pub structured: MediaInfoStructured,
    /// One-line description; empty when nothing was recognized.
    pub summary: String,
    /// Unique audio languages in stream order.
    pub audio_languages: Vec<LanguageFlag>,
    /// Unique subtitle languages in stream order.
    pub subtitle_languages: Vec<LanguageFlag>,
}

/// Facade bundling the BBCode, MediaInfo, language and torrent components.
#[derive(Debug, Clone)]
pub struct Ingestor {
    config: IngestConfig,
    extractor: BBCodeExtractor,
    renderer: BBCodeRenderer,
    mediainfo: MediaInfoParser,
    summary: SummaryHeuristic,
    languages: LanguageNormalizer,
    torrent: TorrentDecoder,
}

impl Ingestor {
    /// Create an ingestor with the given configuration.
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or a static pattern does not
    /// compile.
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        let languages = LanguageNormalizer::new()?;
        let summary = SummaryHeuristic::with_normalizer(config.summary.clone(), languages.clone())?;

        Ok(Self {
            config,
            extractor: BBCodeExtractor::new(),
            renderer: BBCodeRenderer::new(),
            mediainfo: MediaInfoParser::new(),
            summary,
            languages,
            torrent: TorrentDecoder::new(),
        })
    }

    /// Create an ingestor with default configuration.
    pub fn with_defaults() -> Result<Self> {
        Self::new(IngestConfig::default())
    }

    /// Extract and render the outermost spec blocks of a release post.
    pub fn specs(&self, post: &str) -> Vec<SpecEntry> {
        extract_specs_with(&self.extractor, &self.renderer, post)
    }

    /// Parse a MediaInfo report and derive its summary and language flags.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::ingest::Ingestor;
    ///
    /// let ingestor = Ingestor::with_defaults().unwrap();
    /// let report = ingestor.mediainfo(
    ///     "Video\nFormat : AVC\nHeight : 1 080 pixels\n\nText\nLanguage : English\n",
    /// );
    /// assert_eq!(report.summary, "AVC 1080p | Subs: 1 (English)");
    /// assert_eq!(report.subtitle_languages[0].language, "english");
    /// ```
    pub fn mediainfo(&self, report: &str) -> MediaReport {
        let parsed = self.mediainfo.parse(report);
        let structured = MediaInfoStructured::from_parsed(&parsed);
        let summary = self.summary.summarize(&structured);

        let audio_languages = self
            .languages
            .unique_flags(structured.audio.iter().filter_map(|a| a.language.as_deref()));
        let subtitle_languages = self
            .languages
            .unique_flags(structured.text.iter().filter_map(|t| t.language.as_deref()));

        debug!(
            sections = parsed.section_count(),
            audio = structured.audio.len(),
            text = structured.text.len(),
            "mediainfo report ingested"
        );

        MediaReport {
            structured,
            summary,
            audio_languages,
            subtitle_languages,
        }
    }

    /// Decode a `.torrent` file.
    ///
    /// # Errors
    ///
    /// Propagates bencode and torrent layout errors.
    pub fn torrent(&self, data: &[u8]) -> Result<TorrentEntry> {
        self.torrent.decode(data)
    }

    /// Unique language flags for curator-supplied labels.
    pub fn flags<I, S>(&self, labels: I) -> Vec<LanguageFlag>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.languages.unique_flags(labels)
    }

    /// Get the ingestor configuration.
    pub fn config(&self) -> &IngestConfig {
        &self.config
    }
}

/// Convenience function to ingest a MediaInfo report with default settings.
pub fn ingest_mediainfo(report: &str) -> Result<MediaReport> {
    let ingestor = Ingestor::with_defaults()?;
    Ok(ingestor.mediainfo(report))
}

/// Convenience function to produce unique flags with default settings.
pub fn language_flags<I, S>(labels: I) -> Result<Vec<LanguageFlag>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    Ok(LanguageNormalizer::new()?.unique_flags(labels))
}
