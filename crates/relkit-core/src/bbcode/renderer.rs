//! # BBCode Renderer
//!
//! Turns the inner markup of one spec block into an HTML fragment. Tokens
//! from [`Tokenizer`] drive a tag stack: openers push a frame and emit their
//! opening HTML, closers pop back to the matching frame and emit closing HTML
//! for everything popped. Frames still open at the end are closed in order.

use tracing::trace;

use super::tokenizer::{Token, Tokenizer};

/// Opening and closing HTML for a stack frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Quote,
    Spoiler,
    Strong,
    Emphasis,
    Link,
    /// `pre`, `code`, `color`, `size`: markup removed, content kept.
    Strip,
}

impl TagKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "quote" => Some(Self::Quote),
            "spoiler" => Some(Self::Spoiler),
            "b" => Some(Self::Strong),
            "i" => Some(Self::Emphasis),
            "url" => Some(Self::Link),
            "pre" | "code" | "color" | "size" => Some(Self::Strip),
            _ => None,
        }
    }

    fn close_html(self) -> &'static str {
        match self {
            Self::Quote | Self::Spoiler => "</div></div>",
            Self::Strong => "</strong>",
            Self::Emphasis => "</em>",
            Self::Link => "</a>",
            Self::Strip => "",
        }
    }
}

#[derive(Debug)]
struct Frame {
    name: String,
    kind: TagKind,
}

/// Renders BBCode fragments to HTML.
///
/// Text is not escaped; only `"` inside an `href` value is.
#[derive(Debug, Clone, Copy, Default)]
pub struct BBCodeRenderer {
    tokenizer: Tokenizer,
}

impl BBCodeRenderer {
    pub fn new() -> Self {
        Self {
            tokenizer: Tokenizer::new(),
        }
    }

    /// Render `content` to a trimmed HTML fragment.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::bbcode::BBCodeRenderer;
    ///
    /// let html = BBCodeRenderer::new().render("[b]HEVC[/b] [img]x.png[/img]");
    /// assert_eq!(html, "<strong>HEVC</strong>");
    /// ```
    pub fn render(&self, content: &str) -> String {
        let tokens = self.tokenizer.tokenize(content);
        let mut out = String::with_capacity(content.len());
        let mut stack: Vec<Frame> = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            match &tokens[i] {
                Token::Text(text) => out.push_str(text),
                Token::Open { name, param, raw } => match name.as_str() {
                    "img" => {
                        // Drop the image and its body; a lone opener is dropped alone.
                        if let Some(close) = find_close(&tokens, i, "img") {
                            i = close;
                        }
                    }
                    "url" => match (find_close(&tokens, i, "url"), param) {
                        (None, _) => {
                            trace!(tag = *raw, "unclosed url kept as text");
                            out.push_str(raw);
                        }
                        (Some(_), Some(href)) => {
                            push_anchor_open(&mut out, href.trim());
                            stack.push(Frame {
                                name: name.clone(),
                                kind: TagKind::Link,
                            });
                        }
                        (Some(close), None) => {
                            let body: String =
                                tokens[i + 1..close].iter().map(Token::raw).collect();
                            let href = body.trim();
                            push_anchor_open(&mut out, href);
                            out.push_str(href);
                            out.push_str("</a>");
                            i = close;
                        }
                    },
                    _ => match TagKind::from_name(name) {
                        Some(kind) => {
                            push_open(&mut out, kind, param.map(str::trim));
                            stack.push(Frame {
                                name: name.clone(),
                                kind,
                            });
                        }
                        None => out.push_str(raw),
                    },
                },
                Token::Close { name, raw } => {
                    match stack.iter().rposition(|frame| frame.name == *name) {
                        Some(depth) => {
                            for frame in stack.drain(depth..).rev() {
                                out.push_str(frame.kind.close_html());
                            }
                        }
                        None => out.push_str(raw),
                    }
                }
            }
            i += 1;
        }

        for frame in stack.into_iter().rev() {
            out.push_str(frame.kind.close_html());
        }

        out.trim().to_string()
    }
}

/// Index of the first `[/name]` after `open`.
fn find_close(tokens: &[Token<'_>], open: usize, name: &str) -> Option<usize> {
    tokens[open + 1..]
        .iter()
        .position(|token| matches!(token, Token::Close { name: n, .. } if n == name))
        .map(|offset| open + 1 + offset)
}

fn push_anchor_open(out: &mut String, href: &str) {
    out.push_str("<a href=\"");
    out.push_str(&href.replace('"', "&quot;"));
    out.push_str("\" target=\"_blank\" rel=\"noopener\" class=\"spec-link\">");
}

fn push_open(out: &mut String, kind: TagKind, param: Option<&str>) {
    let class = match kind {
        TagKind::Quote => "spec-quote",
        TagKind::Spoiler => "spec-spoiler",
        TagKind::Strong => {
            out.push_str("<strong>");
            return;
        }
        TagKind::Emphasis => {
            out.push_str("<em>");
            return;
        }
        TagKind::Link | TagKind::Strip => return,
    };
    let title = param.unwrap_or_default();
    out.push_str(&format!(
        "<div class=\"{class}\"><div class=\"{class}-title\">{title}</div><div class=\"{class}-content\">"
    ));
}
