//! # Torrent Decoder
//!
//! Reads the name and file list out of a `.torrent` metainfo file. Unlike the
//! text parsers in this crate, decoding is strict: malformed bencode or an
//! `info` dictionary without a file list is an error, never an empty result.

pub mod bencode;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use tracing::debug;

use crate::error::{Result, TorrentError};
use bencode::{Dict, Value};

/// A single file described by a torrent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentFile {
    /// Path relative to the torrent root, components joined with `/`.
    pub path: String,
    /// Declared size in bytes.
    pub size: u64,
}

/// The parts of a torrent the release pipeline stores.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TorrentEntry {
    /// `info.name`.
    pub name: String,
    /// Files in declaration order.
    pub files: Vec<TorrentFile>,
    /// Lowercase hex SHA-1 of the bencoded `info` dictionary.
    pub info_hash: String,
    /// Primary tracker URL.
    pub announce: Option<String>,
    /// Free-form comment.
    pub comment: Option<String>,
    /// `info.files` was present (as opposed to a single `length`).
    #[serde(default)]
    pub multi_file: bool,
}

impl TorrentEntry {
    /// Sum of all file sizes.
    #[must_use]
    pub fn total_size(&self) -> u64 {
        self.files.iter().map(|f| f.size).sum()
    }

    /// Returns `true` for torrents declaring a `files` list rather than a single `length`.
    #[must_use]
    pub fn is_multi_file(&self) -> bool {
        self.multi_file
    }
}

/// Decoder for BitTorrent metainfo files.
#[derive(Debug, Clone, Copy, Default)]
pub struct TorrentDecoder;

impl TorrentDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decodes raw `.torrent` bytes.
    ///
    /// # Errors
    ///
    /// Returns `RelkitError::Bencode` for malformed input and
    /// `RelkitError::Torrent` when the dictionary lacks a usable name or
    /// file list.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::torrent::TorrentDecoder;
    ///
    /// let raw = b"d4:infod6:lengthi1024e4:name8:clip.mkvee";
    /// let entry = TorrentDecoder::new().decode(raw).unwrap();
    /// assert_eq!(entry.name, "clip.mkv");
    /// assert_eq!(entry.files[0].size, 1024);
    /// ```
    pub fn decode(&self, data: &[u8]) -> Result<TorrentEntry> {
        let root = bencode::decode(data)?;
        let root = root.as_dict().ok_or(bencode::BencodeError::NotADictionary)?;

        let info = root
            .get(b"info")
            .ok_or(TorrentError::MissingInfo)?
            .as_dict()
            .ok_or(TorrentError::InvalidField("info"))?;

        let name = utf8_field(info, b"name.utf-8", b"name", "info.name")?
            .ok_or(TorrentError::MissingField("info.name"))?;

        let multi_file = info.get(b"files").is_some();
        let files = if let Some(files) = info.get(b"files") {
            let list = files.as_list().ok_or(TorrentError::InvalidField("info.files"))?;
            if list.is_empty() {
                return Err(TorrentError::MissingFileList.into());
            }
            list.iter().map(file_entry).collect::<std::result::Result<Vec<_>, _>>()?
        } else if let Some(length) = info.get(b"length") {
            vec![TorrentFile {
                path: name.clone(),
                size: length_value(length, "info.length")?,
            }]
        } else {
            return Err(TorrentError::MissingFileList.into());
        };

        let entry = TorrentEntry {
            info_hash: info_hash(info),
            announce: utf8_field(root, b"announce", b"announce", "announce")?,
            comment: utf8_field(root, b"comment.utf-8", b"comment", "comment")?,
            name,
            files,
            multi_file,
        };

        debug!(
            name = %entry.name,
            files = entry.files.len(),
            total = entry.total_size(),
            "decoded torrent"
        );
        Ok(entry)
    }
}

/// Convenience function to decode a torrent with the default decoder.
pub fn decode_torrent(data: &[u8]) -> Result<TorrentEntry> {
    TorrentDecoder::new().decode(data)
}

fn info_hash(info: &Dict<'_>) -> String {
    Sha1::digest(info.raw())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Reads a text field, preferring the `.utf-8` variant some clients emit.
fn utf8_field(
    dict: &Dict<'_>,
    preferred: &[u8],
    fallback: &[u8],
    field: &'static str,
) -> std::result::Result<Option<String>, TorrentError> {
    let Some(value) = dict.get(preferred).or_else(|| dict.get(fallback)) else {
        return Ok(None);
    };
    let bytes = value.as_bytes().ok_or(TorrentError::InvalidField(field))?;
    let text = std::str::from_utf8(bytes).map_err(|_| TorrentError::InvalidUtf8(field))?;
    Ok(Some(text.to_string()))
}

fn length_value(value: &Value<'_>, field: &'static str) -> std::result::Result<u64, TorrentError> {
    let length = value.as_integer().ok_or(TorrentError::InvalidField(field))?;
    u64::try_from(length).map_err(|_| TorrentError::NegativeLength(length))
}

fn file_entry(value: &Value<'_>) -> std::result::Result<TorrentFile, TorrentError> {
    let file = value
        .as_dict()
        .ok_or(TorrentError::InvalidField("info.files[]"))?;

    let components = file
        .get(b"path.utf-8")
        .or_else(|| file.get(b"path"))
        .ok_or(TorrentError::MissingField("info.files[].path"))?
        .as_list()
        .ok_or(TorrentError::InvalidField("info.files[].path"))?;

    let mut parts = Vec::with_capacity(components.len());
    for component in components {
        let bytes = component
            .as_bytes()
            .ok_or(TorrentError::InvalidField("info.files[].path"))?;
        let text = std::str::from_utf8(bytes)
            .map_err(|_| TorrentError::InvalidUtf8("info.files[].path"))?;
        parts.push(text);
    }

    let size = length_value(
        file.get(b"length")
            .ok_or(TorrentError::MissingField("info.files[].length"))?,
        "info.files[].length",
    )?;

    Ok(TorrentFile {
        path: parts.join("/"),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RelkitError;
    use crate::torrent::bencode::BencodeError;

    const MULTI: &[u8] = b"d8:announce20:http://t.example/ann4:infod5:filesld6:lengthi100e4:pathl3:S016:e1.mkveed6:lengthi200e4:pathl3:S016:e2.mkveee4:name4:Showee";

    #[test]
    fn test_multi_file_torrent() {
        let entry = decode_torrent(MULTI).unwrap();
        assert_eq!(entry.name, "Show");
        assert_eq!(
            entry.files,
            vec![
                TorrentFile {
                    path: "S01/e1.mkv".into(),
                    size: 100
                },
                TorrentFile {
                    path: "S01/e2.mkv".into(),
                    size: 200
                },
            ]
        );
        assert_eq!(entry.total_size(), 300);
        assert!(entry.is_multi_file());
        assert_eq!(entry.announce.as_deref(), Some("http://t.example/ann"));
        assert_eq!(entry.comment, None);
    }

    #[test]
    fn test_single_file_torrent_uses_name_as_path() {
        let entry = decode_torrent(b"d4:infod6:lengthi4096e4:name9:movie.mkvee").unwrap();
        assert_eq!(
            entry.files,
            vec![TorrentFile {
                path: "movie.mkv".into(),
                size: 4096
            }]
        );
        assert!(!entry.is_multi_file());
    }

    #[test]
    fn test_missing_file_list_is_fatal() {
        let err = decode_torrent(b"d4:infod4:name4:Showee").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Torrent(TorrentError::MissingFileList)
        ));
    }

    #[test]
    fn test_empty_files_list_is_fatal() {
        let err = decode_torrent(b"d4:infod5:filesle4:name4:Showee").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Torrent(TorrentError::MissingFileList)
        ));
    }

    #[test]
    fn test_single_entry_files_list_is_multi_file() {
        let entry =
            decode_torrent(b"d4:infod5:filesld6:lengthi5e4:pathl4:Showeee4:name4:Showee").unwrap();
        assert_eq!(entry.files.len(), 1);
        assert_eq!(entry.files[0].path, entry.name);
        assert!(entry.is_multi_file());
    }

    #[test]
    fn test_missing_info_is_fatal() {
        let err = decode_torrent(b"d8:announce3:urle").unwrap_err();
        assert!(matches!(err, RelkitError::Torrent(TorrentError::MissingInfo)));
    }

    #[test]
    fn test_malformed_bencode_is_fatal() {
        let err = decode_torrent(b"d4:infod4:name4:Show").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Bencode(BencodeError::UnexpectedEof)
        ));

        let err = decode_torrent(b"li1ee").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Bencode(BencodeError::NotADictionary)
        ));
    }

    #[test]
    fn test_negative_length_rejected() {
        let err = decode_torrent(b"d4:infod6:lengthi-5e4:name1:aee").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Torrent(TorrentError::NegativeLength(-5))
        ));
    }

    #[test]
    fn test_prefers_utf8_name_variant() {
        let entry =
            decode_torrent(b"d4:infod6:lengthi1e4:name3:old10:name.utf-83:newee").unwrap();
        assert_eq!(entry.name, "new");
        assert_eq!(entry.files[0].path, "new");
    }

    #[test]
    fn test_non_utf8_name_rejected() {
        let err = decode_torrent(b"d4:infod6:lengthi1e4:name2:\xff\xfeee").unwrap_err();
        assert!(matches!(
            err,
            RelkitError::Torrent(TorrentError::InvalidUtf8("info.name"))
        ));
    }

    #[test]
    fn test_info_hash_covers_raw_info_bytes() {
        let raw = b"d4:infod6:lengthi1e4:name1:aee";
        let entry = decode_torrent(raw).unwrap();
        let expected: String = Sha1::digest(b"d6:lengthi1e4:name1:ae")
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect();
        assert_eq!(entry.info_hash, expected);
        assert_eq!(entry.info_hash.len(), 40);
    }

    #[test]
    fn test_torrent_entry_is_serializable() {
        let entry = decode_torrent(MULTI).unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let back: TorrentEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, back);
    }
}
