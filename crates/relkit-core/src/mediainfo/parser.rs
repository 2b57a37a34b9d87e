use serde::{Deserialize, Serialize};
use tracing::trace;

use super::ordered::OrderedMap;

/// A field value: a single string, or every value of a key that repeats
/// within one section, in report order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    One(String),
    Many(Vec<String>),
}

impl FieldValue {
    /// The first (canonical) value.
    pub fn first(&self) -> &str {
        match self {
            Self::One(v) => v,
            Self::Many(vs) => vs.first().map(String::as_str).unwrap_or(""),
        }
    }

    /// All values in report order.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::One(v) => vec![v.as_str()],
            Self::Many(vs) => vs.iter().map(String::as_str).collect(),
        }
    }

    fn push(&mut self, value: String) {
        match self {
            Self::One(first) => {
                let first = std::mem::take(first);
                *self = Self::Many(vec![first, value]);
            }
            Self::Many(vs) => vs.push(value),
        }
    }
}

/// Ordered field data of one section.
pub type SectionData = OrderedMap<FieldValue>;

/// One blank-line-delimited block of a MediaInfo report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaInfoSection {
    /// Header line as written, e.g. `"Audio #2"`.
    pub header: String,
    /// Header without the stream index, e.g. `"Audio"`.
    pub base: String,
    /// Stream index from a `#N` suffix.
    pub index: Option<u32>,
    pub data: SectionData,
}

impl MediaInfoSection {
    /// First value of `key`, if present.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.data.get(key).map(FieldValue::first)
    }
}

/// Sections of a report grouped by base name, in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MediaInfoParsed {
    sections: OrderedMap<Vec<MediaInfoSection>>,
}

impl MediaInfoParsed {
    /// Sections grouped under `name`, or an empty slice.
    pub fn get(&self, name: &str) -> &[MediaInfoSection] {
        self.sections.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Group names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sections.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MediaInfoSection])> {
        self.sections.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Total number of sections across all groups.
    pub fn section_count(&self) -> usize {
        self.sections.iter().map(|(_, v)| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Appends a section under `group`.
    pub fn push(&mut self, group: &str, section: MediaInfoSection) {
        self.sections.get_or_insert_with(group, Vec::new).push(section);
    }
}

/// Tolerant parser for MediaInfo `--Output=Text` reports.
///
/// Never fails: unrecognized lines are skipped and an empty or garbage
/// report yields an empty (or near-empty) [`MediaInfoParsed`].
#[derive(Debug, Clone, Copy, Default)]
pub struct MediaInfoParser;

impl MediaInfoParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses a report into named sections.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::mediainfo::MediaInfoParser;
    ///
    /// let report = "General\nFormat : Matroska\n\nAudio #2\nFormat : AAC\n";
    /// let parsed = MediaInfoParser::new().parse(report);
    /// assert_eq!(parsed.get("Audio")[0].index, Some(2));
    /// assert_eq!(parsed.get("General")[0].first("Format"), Some("Matroska"));
    /// ```
    pub fn parse(&self, report: &str) -> MediaInfoParsed {
        let text = normalize_report(report);
        let mut parsed = MediaInfoParsed::default();

        for block in blocks(&text) {
            let section = parse_block(&block);
            trace!(
                header = %section.header,
                fields = section.data.len(),
                "mediainfo section"
            );
            let base = section.base.clone();
            parsed.push(&base, section);
        }

        parsed
    }
}

/// Convenience function to parse a report with the default parser.
pub fn parse_mediainfo(report: &str) -> MediaInfoParsed {
    MediaInfoParser::new().parse(report)
}

/// Splits `"Audio #2"` into `("Audio", Some(2))`.
pub(crate) fn split_header(header: &str) -> (&str, Option<u32>) {
    let header = header.trim();
    if let Some((name, index)) = header.rsplit_once('#') {
        let name = name.trim_end();
        let index = index.trim();
        if !name.is_empty() && !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(index) = index.parse() {
                return (name, Some(index));
            }
        }
    }
    (header, None)
}

/// Undoes copy/paste damage: escaped newlines, CR line endings, no-break
/// spaces and a byte-order mark.
fn normalize_report(raw: &str) -> String {
    let mut text = raw.trim_start_matches('\u{feff}').to_string();

    // A report pasted from a JSON string or log line arrives with literal "\n".
    if text.matches("\\n").count() > text.matches('\n').count() {
        text = text
            .replace("\\r\\n", "\n")
            .replace("\\n", "\n")
            .replace("\\r", "\n")
            .replace("\\t", "\t");
    }

    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace(['\u{a0}', '\u{202f}'], " ")
}

/// Groups consecutive non-blank lines.
fn blocks(text: &str) -> Vec<Vec<&str>> {
    let mut out = Vec::new();
    let mut current = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        out.push(current);
    }

    out
}

fn parse_block(lines: &[&str]) -> MediaInfoSection {
    let header = lines.first().map(|l| l.trim()).unwrap_or_default();
    let (base, index) = split_header(header);
    let mut data = SectionData::new();

    for line in lines.iter().skip(1) {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim().to_string());
        match data.get_mut(key) {
            Some(existing) => existing.push(value),
            None => data.insert(key.to_string(), FieldValue::One(value)),
        }
    }

    MediaInfoSection {
        header: header.to_string(),
        base: base.to_string(),
        index,
        data,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = "General
Unique ID                                : 1234
Complete name                            : Show.S01E01.mkv
Format                                   : Matroska

Video
ID                                       : 1
Format                                   : HEVC
Width                                    : 1 920 pixels
Height                                   : 1 080 pixels

Audio
ID                                       : 2
Format                                   : E-AC-3
Language                                 : English

Audio #2
ID                                       : 3
Format                                   : AAC
Language                                 : Japanese

Text
Language                                 : English
";

    #[test]
    fn test_groups_sections_by_base_name() {
        let parsed = parse_mediainfo(REPORT);
        let names: Vec<_> = parsed.names().collect();
        assert_eq!(names, ["General", "Video", "Audio", "Text"]);

        let audio = parsed.get("Audio");
        assert_eq!(audio.len(), 2);
        assert_eq!(audio[0].index, None);
        assert_eq!(audio[1].index, Some(2));
        assert_eq!(audio[1].header, "Audio #2");
        assert_eq!(audio[1].first("Language"), Some("Japanese"));
        assert_eq!(parsed.section_count(), 5);
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let parsed = parse_mediainfo("General\nEncoded date : UTC 2021-03-04 05:06:07\n");
        assert_eq!(
            parsed.get("General")[0].first("Encoded date"),
            Some("UTC 2021-03-04 05:06:07")
        );
    }

    #[test]
    fn test_repeated_keys_aggregate_in_order() {
        let parsed = parse_mediainfo(
            "Video\nFormat : AVC\nFormat : HEVC\nFormat : AV1\nWidth : 1 280 pixels\n",
        );
        let video = &parsed.get("Video")[0];
        assert_eq!(
            video.data.get("Format"),
            Some(&FieldValue::Many(vec![
                "AVC".into(),
                "HEVC".into(),
                "AV1".into()
            ]))
        );
        assert_eq!(video.first("Format"), Some("AVC"));
        let formats = video.data.get("Format").map(FieldValue::values);
        assert_eq!(formats, Some(vec!["AVC", "HEVC", "AV1"]));
        assert_eq!(
            video.data.get("Width").map(FieldValue::values),
            Some(vec!["1 280 pixels"])
        );
        let keys: Vec<_> = video.data.keys().collect();
        assert_eq!(keys, ["Format", "Width"]);
    }

    #[test]
    fn test_header_only_block_kept_with_empty_data() {
        let parsed = parse_mediainfo("Menu\n\nGeneral\nFormat : MPEG-4\n");
        let menu = parsed.get("Menu");
        assert_eq!(menu.len(), 1);
        assert!(menu[0].data.is_empty());
    }

    #[test]
    fn test_single_block_report() {
        let parsed = parse_mediainfo("General\nFormat : Matroska\nno colon here\n");
        assert_eq!(parsed.section_count(), 1);
        assert_eq!(parsed.get("General")[0].data.len(), 1);
    }

    #[test]
    fn test_tolerates_escaped_newlines_and_crlf() {
        let escaped = r"General\nFormat : Matroska\n\nVideo\nFormat : AVC\n";
        let parsed = parse_mediainfo(escaped);
        assert_eq!(parsed.get("Video")[0].first("Format"), Some("AVC"));

        let crlf = "General\r\nFormat : Matroska\r\n\r\n\r\nVideo\r\nFormat : AVC\r\n";
        let parsed = parse_mediainfo(crlf);
        assert_eq!(parsed.section_count(), 2);
        assert_eq!(parsed.get("General")[0].first("Format"), Some("Matroska"));
    }

    #[test]
    fn test_tolerates_nbsp_and_whitespace_only_separators() {
        let report = "\u{feff}General\nFile size\u{a0}: 1.2\u{a0}GiB\n \t \nAudio\nFormat : AAC";
        let parsed = parse_mediainfo(report);
        assert_eq!(parsed.get("General")[0].first("File size"), Some("1.2 GiB"));
        assert_eq!(parsed.get("Audio").len(), 1);
    }

    #[test]
    fn test_empty_report_yields_nothing() {
        assert!(parse_mediainfo("").is_empty());
        assert!(parse_mediainfo("\n\n  \n").is_empty());
    }

    #[test]
    fn test_split_header_variants() {
        assert_eq!(split_header("Audio #12"), ("Audio", Some(12)));
        assert_eq!(split_header("Audio"), ("Audio", None));
        assert_eq!(split_header("Text #x"), ("Text #x", None));
        assert_eq!(split_header("#3"), ("#3", None));
    }

    #[test]
    fn test_parsed_serializes_as_ordered_object() {
        let parsed = parse_mediainfo("Video\nFormat : AVC\nFormat : HEVC\n");
        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(
            json,
            r#"{"Video":[{"header":"Video","base":"Video","index":null,"data":{"Format":["AVC","HEVC"]}}]}"#
        );
        let back: MediaInfoParsed = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }
}
