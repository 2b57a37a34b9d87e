//! Bencode decoding for `.torrent` metainfo files ([BEP-3]).
//!
//! Only decoding is provided. Values borrow from the input buffer so that the
//! raw bytes of any dictionary (notably `info`, whose SHA-1 is the info hash)
//! stay addressable after decoding.
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` |
//! | Byte string | `<length>:<data>` | `4:spam` |
//! | List | `l<items>e` | `l4:spami42ee` |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` |
//!
//! ```
//! use relkit_core::torrent::bencode::decode;
//!
//! let value = decode(b"d3:foo3:bar4:sizei42ee").unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//! assert_eq!(value.get(b"size").and_then(|v| v.as_integer()), Some(42));
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod error;
mod value;

pub use decode::{decode, MAX_DEPTH};
pub use error::BencodeError;
pub use value::{Dict, Value};

#[cfg(test)]
mod tests;
