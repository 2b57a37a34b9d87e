use thiserror::Error;

use crate::torrent::bencode::BencodeError;

/// Structural problems in a decoded `.torrent` dictionary.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TorrentError {
    /// The root dictionary has no `info` dictionary.
    #[error("torrent has no info dictionary")]
    MissingInfo,

    /// A required key is absent.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A key is present but holds the wrong bencode type.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// A text field is not valid UTF-8.
    #[error("field {0} is not valid UTF-8")]
    InvalidUtf8(&'static str),

    /// A file length is negative.
    #[error("negative length: {0}")]
    NegativeLength(i64),

    /// `info` has neither `files` nor `length`, or `files` is empty.
    #[error("info dictionary has no usable `files` list or `length`")]
    MissingFileList,
}

/// Errors that can occur during relkit core operations.
#[derive(Debug, Error)]
pub enum RelkitError {
    /// The input is not well-formed bencode.
    #[error("bencode decode error: {0}")]
    Bencode(#[from] BencodeError),

    /// The bencode is well-formed but is not a usable torrent.
    #[error("torrent decode error: {0}")]
    Torrent(#[from] TorrentError),

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type alias for relkit operations.
pub type Result<T> = std::result::Result<T, RelkitError>;
