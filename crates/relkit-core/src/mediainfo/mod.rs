//! # MediaInfo
//!
//! Parsing of MediaInfo `--Output=Text` reports in three stages:
//!
//! 1. [`MediaInfoParser`] splits the report into sections with ordered,
//!    repeat-aggregating field data.
//! 2. [`MediaInfoStructured`] projects sections onto fixed general, video,
//!    audio and text records.
//! 3. [`SummaryHeuristic`] derives a one-line description.
//!
//! Every stage is tolerant: malformed input produces partial or empty output.

pub mod ordered;
pub mod parser;
pub mod structured;
pub mod summary;

pub use ordered::OrderedMap;
pub use parser::{
    parse_mediainfo, FieldValue, MediaInfoParsed, MediaInfoParser, MediaInfoSection, SectionData,
};
pub use structured::{AudioInfo, GeneralInfo, MediaInfoStructured, TextInfo, VideoInfo};
pub use summary::{SummaryConfig, SummaryHeuristic};
