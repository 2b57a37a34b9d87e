use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which block tag opened a [`BBCodeBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Quote,
    Spoiler,
}

impl BlockKind {
    /// `[quote=` / `[spoiler=` (lowercase).
    fn titled_opener(self) -> &'static str {
        match self {
            Self::Quote => "[quote=",
            Self::Spoiler => "[spoiler=",
        }
    }

    fn closer(self) -> &'static str {
        match self {
            Self::Quote => "[/quote]",
            Self::Spoiler => "[/spoiler]",
        }
    }
}

/// An outermost titled block with its raw, unrendered content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BBCodeBlock {
    pub kind: BlockKind,
    /// Text between `=` and `]`, trimmed.
    pub title: String,
    /// Everything between the opener and its matching closer, verbatim.
    pub content: String,
}

/// Finds outermost `[quote=Title]` / `[spoiler=Title]` blocks.
///
/// Nesting is resolved by counting same-kind titled openers against
/// same-kind closers, so a quote closer never terminates a spoiler and vice
/// versa. Untitled `[quote]` openers do not nest. Unbalanced openers are
/// skipped; finding nothing is not an error.
#[derive(Debug, Clone, Copy, Default)]
pub struct BBCodeExtractor;

impl BBCodeExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Extracts outermost blocks in document order.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::bbcode::BBCodeExtractor;
    ///
    /// let blocks = BBCodeExtractor::new()
    ///     .extract("[quote=Video][quote=Inner]x[/quote][/quote]");
    /// assert_eq!(blocks.len(), 1);
    /// assert_eq!(blocks[0].title, "Video");
    /// assert_eq!(blocks[0].content, "[quote=Inner]x[/quote]");
    /// ```
    pub fn extract(&self, input: &str) -> Vec<BBCodeBlock> {
        // ASCII lowercasing keeps byte offsets valid for slicing `input`.
        let lower = input.to_ascii_lowercase();
        let mut blocks = Vec::new();
        let mut pos = 0;

        while let Some((kind, tag_start)) = next_opener(&lower, pos) {
            let title_start = tag_start + kind.titled_opener().len();
            let Some(title_len) = lower[title_start..].find(']') else {
                break;
            };
            let content_start = title_start + title_len + 1;

            match matching_closer(&lower, content_start, kind) {
                Some(content_end) => {
                    blocks.push(BBCodeBlock {
                        kind,
                        title: input[title_start..content_start - 1].trim().to_string(),
                        content: input[content_start..content_end].to_string(),
                    });
                    pos = content_end + kind.closer().len();
                }
                None => {
                    debug!(offset = tag_start, ?kind, "unmatched bbcode opener skipped");
                    pos = content_start;
                }
            }
        }

        blocks
    }
}

/// Earliest titled opener of either kind at or after `from`.
fn next_opener(lower: &str, from: usize) -> Option<(BlockKind, usize)> {
    [BlockKind::Quote, BlockKind::Spoiler]
        .into_iter()
        .filter_map(|kind| {
            lower[from..]
                .find(kind.titled_opener())
                .map(|offset| (kind, from + offset))
        })
        .min_by_key(|&(_, at)| at)
}

/// Byte offset of the closer that brings depth back to zero.
fn matching_closer(lower: &str, content_start: usize, kind: BlockKind) -> Option<usize> {
    let closer = kind.closer();
    let mut depth = 1usize;
    let mut cursor = content_start;

    loop {
        let close_at = cursor + lower[cursor..].find(closer)?;
        match lower[cursor..].find(kind.titled_opener()) {
            Some(offset) if cursor + offset < close_at => {
                depth += 1;
                cursor += offset + kind.titled_opener().len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(close_at);
                }
                cursor = close_at + closer.len();
            }
        }
    }
}
