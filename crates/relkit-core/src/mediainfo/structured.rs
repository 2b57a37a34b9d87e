use serde::{Deserialize, Serialize};

use super::parser::{split_header, MediaInfoParsed, MediaInfoSection, MediaInfoParser};

/// Container-level information from the `General` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    pub complete_name: Option<String>,
    pub format: Option<String>,
    pub format_version: Option<String>,
    pub file_size: Option<String>,
    pub duration: Option<String>,
    pub overall_bit_rate: Option<String>,
    pub frame_rate: Option<String>,
    /// `Movie name`, falling back to `Title`.
    pub title: Option<String>,
    pub encoded_date: Option<String>,
    pub writing_application: Option<String>,
}

/// One video stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub id: Option<String>,
    pub format: Option<String>,
    pub format_profile: Option<String>,
    pub codec_id: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
    pub display_aspect_ratio: Option<String>,
    pub frame_rate_mode: Option<String>,
    pub frame_rate: Option<String>,
    pub bit_rate: Option<String>,
    pub bit_depth: Option<String>,
    pub chroma_subsampling: Option<String>,
    pub scan_type: Option<String>,
    pub color_primaries: Option<String>,
    pub transfer_characteristics: Option<String>,
    pub hdr_format: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub default: Option<String>,
    pub forced: Option<String>,
}

impl VideoInfo {
    /// Width in pixels ("1 920 pixels" → 1920).
    pub fn width_px(&self) -> Option<u32> {
        self.width.as_deref().and_then(leading_number)
    }

    /// Height in pixels ("1 080 pixels" → 1080).
    pub fn height_px(&self) -> Option<u32> {
        self.height.as_deref().and_then(leading_number)
    }

    /// Bit depth ("10 bits" → 10).
    pub fn bit_depth_bits(&self) -> Option<u32> {
        self.bit_depth.as_deref().and_then(leading_number)
    }
}

/// One audio stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioInfo {
    pub id: Option<String>,
    pub format: Option<String>,
    pub commercial_name: Option<String>,
    pub codec_id: Option<String>,
    pub channels: Option<String>,
    pub channel_layout: Option<String>,
    pub sampling_rate: Option<String>,
    pub bit_rate: Option<String>,
    pub bit_rate_mode: Option<String>,
    pub compression_mode: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub default: Option<String>,
    pub forced: Option<String>,
}

impl AudioInfo {
    /// Channel count ("6 channels" → 6; "8 / 6 channels" → 8).
    pub fn channel_count(&self) -> Option<u32> {
        self.channels.as_deref().and_then(leading_number)
    }
}

/// One subtitle stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextInfo {
    pub id: Option<String>,
    pub format: Option<String>,
    pub codec_id: Option<String>,
    pub language: Option<String>,
    pub title: Option<String>,
    pub default: Option<String>,
    pub forced: Option<String>,
}

/// Typed projection of a MediaInfo report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfoStructured {
    pub general: Option<GeneralInfo>,
    pub video: Vec<VideoInfo>,
    pub audio: Vec<AudioInfo>,
    pub text: Vec<TextInfo>,
}

impl MediaInfoStructured {
    /// Projects parsed sections onto the typed shape.
    ///
    /// Only the first `General` section is used. Stream kinds also collect
    /// groups keyed `"<Kind> #N"`, after the plain group, in key order.
    /// Aggregated fields contribute their first value.
    pub fn from_parsed(parsed: &MediaInfoParsed) -> Self {
        Self {
            general: parsed.get("General").first().map(general_info),
            video: streams(parsed, "Video").map(video_info).collect(),
            audio: streams(parsed, "Audio").map(audio_info).collect(),
            text: streams(parsed, "Text").map(text_info).collect(),
        }
    }

    /// Parses and projects a raw report in one step.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::mediainfo::MediaInfoStructured;
    ///
    /// let report = "Video\nFormat : AVC\nHeight : 720 pixels\n\nAudio\nFormat : AAC\n\nAudio #2\nFormat : AC-3\n";
    /// let info = MediaInfoStructured::parse(report);
    /// assert_eq!(info.video[0].height_px(), Some(720));
    /// assert_eq!(info.audio.len(), 2);
    /// ```
    pub fn parse(report: &str) -> Self {
        Self::from_parsed(&MediaInfoParser::new().parse(report))
    }

    /// Returns `true` if no section of any known kind was found.
    pub fn is_empty(&self) -> bool {
        self.general.is_none() && self.video.is_empty() && self.audio.is_empty() && self.text.is_empty()
    }
}

fn streams<'a>(
    parsed: &'a MediaInfoParsed,
    kind: &'a str,
) -> impl Iterator<Item = &'a MediaInfoSection> {
    let indexed = parsed
        .iter()
        .filter(move |(name, _)| matches!(split_header(name), (base, Some(_)) if base == kind))
        .flat_map(|(_, sections)| sections.iter());
    parsed.get(kind).iter().chain(indexed)
}

/// First non-empty value among `keys`.
fn field(section: &MediaInfoSection, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| section.first(key))
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

fn general_info(s: &MediaInfoSection) -> GeneralInfo {
    GeneralInfo {
        complete_name: field(s, &["Complete name"]),
        format: field(s, &["Format"]),
        format_version: field(s, &["Format version"]),
        file_size: field(s, &["File size"]),
        duration: field(s, &["Duration"]),
        overall_bit_rate: field(s, &["Overall bit rate"]),
        frame_rate: field(s, &["Frame rate"]),
        title: field(s, &["Movie name", "Title"]),
        encoded_date: field(s, &["Encoded date"]),
        writing_application: field(s, &["Writing application"]),
    }
}

fn video_info(s: &MediaInfoSection) -> VideoInfo {
    VideoInfo {
        id: field(s, &["ID"]),
        format: field(s, &["Format"]),
        format_profile: field(s, &["Format profile"]),
        codec_id: field(s, &["Codec ID"]),
        width: field(s, &["Width"]),
        height: field(s, &["Height"]),
        display_aspect_ratio: field(s, &["Display aspect ratio"]),
        frame_rate_mode: field(s, &["Frame rate mode"]),
        frame_rate: field(s, &["Frame rate"]),
        bit_rate: field(s, &["Bit rate", "Nominal bit rate"]),
        bit_depth: field(s, &["Bit depth"]),
        chroma_subsampling: field(s, &["Chroma subsampling"]),
        scan_type: field(s, &["Scan type"]),
        color_primaries: field(s, &["Color primaries"]),
        transfer_characteristics: field(s, &["Transfer characteristics"]),
        hdr_format: field(s, &["HDR format"]),
        language: field(s, &["Language"]),
        title: field(s, &["Title"]),
        default: field(s, &["Default"]),
        forced: field(s, &["Forced"]),
    }
}

fn audio_info(s: &MediaInfoSection) -> AudioInfo {
    AudioInfo {
        id: field(s, &["ID"]),
        format: field(s, &["Format"]),
        commercial_name: field(s, &["Commercial name"]),
        codec_id: field(s, &["Codec ID"]),
        channels: field(s, &["Channel(s)", "Channels"]),
        channel_layout: field(s, &["Channel layout"]),
        sampling_rate: field(s, &["Sampling rate"]),
        bit_rate: field(s, &["Bit rate", "Nominal bit rate"]),
        bit_rate_mode: field(s, &["Bit rate mode"]),
        compression_mode: field(s, &["Compression mode"]),
        language: field(s, &["Language"]),
        title: field(s, &["Title"]),
        default: field(s, &["Default"]),
        forced: field(s, &["Forced"]),
    }
}

fn text_info(s: &MediaInfoSection) -> TextInfo {
    TextInfo {
        id: field(s, &["ID"]),
        format: field(s, &["Format"]),
        codec_id: field(s, &["Codec ID"]),
        language: field(s, &["Language"]),
        title: field(s, &["Title"]),
        default: field(s, &["Default"]),
        forced: field(s, &["Forced"]),
    }
}

/// Leading number with MediaInfo's space digit grouping: "1 080 pixels" →
/// 1080, "8 / 6 channels" → 8.
pub(crate) fn leading_number(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == ' ')
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mediainfo::parser::{FieldValue, SectionData};

    fn section(header: &str, fields: &[(&str, &str)]) -> MediaInfoSection {
        let (base, index) = split_header(header);
        let mut data = SectionData::new();
        for (k, v) in fields {
            data.insert(k.to_string(), FieldValue::One(v.to_string()));
        }
        MediaInfoSection {
            header: header.to_string(),
            base: base.to_string(),
            index,
            data,
        }
    }

    #[test]
    fn test_audio_streams_keep_document_order() {
        let info = MediaInfoStructured::parse(
            "Audio\nFormat : E-AC-3\nLanguage : English\n\nAudio #2\nFormat : AAC\nLanguage : Japanese\n",
        );
        assert_eq!(info.audio.len(), 2);
        assert_eq!(info.audio[0].format.as_deref(), Some("E-AC-3"));
        assert_eq!(info.audio[1].language.as_deref(), Some("Japanese"));
    }

    #[test]
    fn test_index_keyed_groups_follow_plain_group() {
        let mut parsed = MediaInfoParsed::default();
        parsed.push("Audio #3", section("Audio #3", &[("Format", "FLAC")]));
        parsed.push("Audio", section("Audio", &[("Format", "AAC")]));
        parsed.push("Audio #2", section("Audio #2", &[("Format", "DTS")]));
        parsed.push("Audiobook #1", section("Audiobook #1", &[("Format", "MP3")]));

        let info = MediaInfoStructured::from_parsed(&parsed);
        let formats: Vec<_> = info.audio.iter().filter_map(|a| a.format.as_deref()).collect();
        assert_eq!(formats, ["AAC", "FLAC", "DTS"]);
    }

    #[test]
    fn test_general_uses_first_section_only() {
        let info = MediaInfoStructured::parse(
            "General\nFormat : Matroska\nMovie name : Pilot\n\nGeneral\nFormat : MPEG-4\n",
        );
        let general = info.general.unwrap();
        assert_eq!(general.format.as_deref(), Some("Matroska"));
        assert_eq!(general.title.as_deref(), Some("Pilot"));
    }

    #[test]
    fn test_aggregated_fields_use_first_value() {
        let info = MediaInfoStructured::parse(
            "Video\nFormat : HEVC\nHDR format : Dolby Vision, Version 1.0\nHDR format : SMPTE ST 2086\n",
        );
        assert_eq!(
            info.video[0].hdr_format.as_deref(),
            Some("Dolby Vision, Version 1.0")
        );
    }

    #[test]
    fn test_missing_kinds_are_empty_not_errors() {
        let info = MediaInfoStructured::parse("Menu\n00:00:00.000 : Chapter 1\n");
        assert!(info.is_empty());
        assert!(MediaInfoStructured::parse("").is_empty());
    }

    #[test]
    fn test_numeric_helpers() {
        let info = MediaInfoStructured::parse(
            "Video\nWidth : 3 840 pixels\nHeight : 2 160 pixels\nBit depth : 10 bits\n\nAudio\nChannel(s) : 8 / 6 channels\n",
        );
        assert_eq!(info.video[0].width_px(), Some(3840));
        assert_eq!(info.video[0].height_px(), Some(2160));
        assert_eq!(info.video[0].bit_depth_bits(), Some(10));
        assert_eq!(info.audio[0].channel_count(), Some(8));
        assert_eq!(leading_number("pixels"), None);
    }

    #[test]
    fn test_structured_is_serializable() {
        let info = MediaInfoStructured::parse("General\nFormat : Matroska\n\nText\nLanguage : English\n");
        let json = serde_json::to_string(&info).unwrap();
        let back: MediaInfoStructured = serde_json::from_str(&json).unwrap();
        assert_eq!(info, back);
    }
}
