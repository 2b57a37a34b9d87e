//! # Relkit Core
//!
//! Turns the artifacts a curator attaches to a release (forum BBCode posts,
//! MediaInfo text reports and `.torrent` files) into typed records, plus
//! summary lines and language flags derived from them.
//!
//! ## Quick Start
//!
//! ```rust
//! use relkit_core::Ingestor;
//!
//! let ingestor = Ingestor::with_defaults().unwrap();
//!
//! let specs = ingestor.specs("[quote=Video][b]HEVC[/b][/quote]");
//! assert_eq!(specs[0].content, "<strong>HEVC</strong>");
//!
//! let report = ingestor.mediainfo("Audio\nFormat : E-AC-3\nChannel(s) : 6 channels\n");
//! assert_eq!(report.summary, "DD+ 5.1");
//!
//! let torrent = ingestor.torrent(b"d4:infod6:lengthi7e4:name5:a.mkvee").unwrap();
//! assert_eq!(torrent.total_size(), 7);
//! ```
pub mod bbcode;
pub mod error;
pub mod ingest;
pub mod language;
pub mod mediainfo;
pub mod torrent;

// Re-export primary API
pub use bbcode::{
    extract_blocks, extract_specs, extract_specs_with, BBCodeBlock, BBCodeExtractor,
    BBCodeRenderer, BlockKind, SpecEntry,
};
pub use error::{RelkitError, Result, TorrentError};
pub use ingest::{IngestConfig, Ingestor, MediaReport};
pub use language::{LanguageFlag, LanguageNormalizer};
pub use mediainfo::{
    parse_mediainfo, AudioInfo, FieldValue, GeneralInfo, MediaInfoParsed, MediaInfoParser,
    MediaInfoSection, MediaInfoStructured, SummaryConfig, SummaryHeuristic, TextInfo, VideoInfo,
};
pub use torrent::bencode::BencodeError;
pub use torrent::{decode_torrent, TorrentDecoder, TorrentEntry, TorrentFile};
