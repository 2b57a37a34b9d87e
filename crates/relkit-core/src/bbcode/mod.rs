//! # BBCode
//!
//! Extraction of titled spec blocks from forum-style release posts and
//! rendering of their bodies to HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! use relkit_core::bbcode::extract_specs;
//!
//! let specs = extract_specs("[spoiler=Video][b]HEVC[/b] 1080p[/spoiler]");
//! assert_eq!(specs[0].title, "Video");
//! assert_eq!(specs[0].content, "<strong>HEVC</strong> 1080p");
//! ```

pub mod extractor;
pub mod renderer;
pub mod tokenizer;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub use extractor::{BBCodeBlock, BBCodeExtractor, BlockKind};
pub use renderer::BBCodeRenderer;
pub use tokenizer::{Token, Tokenizer};

/// A titled block whose content has been rendered to HTML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecEntry {
    pub title: String,
    pub content: String,
}

/// Outermost quote/spoiler blocks with raw content.
pub fn extract_blocks(input: &str) -> Vec<BBCodeBlock> {
    BBCodeExtractor::new().extract(input)
}

/// Outermost quote/spoiler blocks with content rendered to HTML.
pub fn extract_specs(input: &str) -> Vec<SpecEntry> {
    extract_specs_with(&BBCodeExtractor::new(), &BBCodeRenderer::new(), input)
}

/// [`extract_specs`] with caller-owned components.
pub fn extract_specs_with(
    extractor: &BBCodeExtractor,
    renderer: &BBCodeRenderer,
    input: &str,
) -> Vec<SpecEntry> {
    extractor
        .extract(input)
        .into_iter()
        .map(|block| {
            trace!(title = %block.title, kind = ?block.kind, "rendering spec block");
            SpecEntry {
                content: renderer.render(&block.content),
                title: block.title,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_specs_renders_each_block() {
        let input = "Release notes\n\
            [quote=MediaInfo][quote=General]MKV[/quote][/quote]\n\
            [spoiler=Links][url=https://a.b]mirror[/url][/spoiler]";
        let specs = extract_specs(input);

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].title, "MediaInfo");
        assert_eq!(
            specs[0].content,
            "<div class=\"spec-quote\"><div class=\"spec-quote-title\">General</div><div class=\"spec-quote-content\">MKV</div></div>"
        );
        assert_eq!(specs[1].title, "Links");
        assert!(specs[1].content.contains("href=\"https://a.b\""));
        assert!(specs[1].content.ends_with(">mirror</a>"));
    }

    #[test]
    fn test_extract_specs_empty_input() {
        assert!(extract_specs("").is_empty());
    }

    #[test]
    fn test_spec_entry_serde_roundtrip() {
        let entry = SpecEntry {
            title: "Audio".into(),
            content: "<em>FLAC</em>".into(),
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(json, r#"{"title":"Audio","content":"<em>FLAC</em>"}"#);
        let back: SpecEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn test_block_kind_serializes_lowercase() {
        let block = extract_blocks("[spoiler=S]x[/spoiler]").remove(0);
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "spoiler");
    }
}
