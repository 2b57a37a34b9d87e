//! # BBCode Tokenizer
//!
//! Splits BBCode markup into open-tag, close-tag and text tokens. Anything
//! that does not look like a tag (`[`, a run of letters, optional `=param`,
//! `]`) stays text, so stray brackets in prose survive untouched.

/// A token borrowing from the tokenized input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text between tags.
    Text(&'a str),
    /// `[name]` or `[name=param]`.
    Open {
        /// Lowercased tag name.
        name: String,
        /// Raw parameter after `=`, untrimmed.
        param: Option<&'a str>,
        /// The tag exactly as written.
        raw: &'a str,
    },
    /// `[/name]`.
    Close {
        /// Lowercased tag name.
        name: String,
        /// The tag exactly as written.
        raw: &'a str,
    },
}

impl<'a> Token<'a> {
    /// The input slice this token was read from.
    pub fn raw(&self) -> &'a str {
        match self {
            Token::Text(text) => *text,
            Token::Open { raw, .. } | Token::Close { raw, .. } => *raw,
        }
    }
}

/// Tokenizer for BBCode markup.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    /// Create a new tokenizer instance.
    pub fn new() -> Self {
        Self
    }

    /// Tokenize markup into text and tag tokens.
    ///
    /// # Examples
    /// ```
    /// use relkit_core::bbcode::tokenizer::{Token, Tokenizer};
    ///
    /// let tokens = Tokenizer::new().tokenize("[b]Bold[/b] [x");
    /// assert_eq!(tokens.len(), 4);
    /// assert_eq!(tokens[1], Token::Text("Bold"));
    /// assert_eq!(tokens[3], Token::Text(" [x"));
    /// ```
    pub fn tokenize<'a>(&self, input: &'a str) -> Vec<Token<'a>> {
        let mut tokens = Vec::new();
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(offset) = input[cursor..].find('[') {
            let at = cursor + offset;
            match parse_tag(input, at) {
                Some((token, end)) => {
                    if at > text_start {
                        tokens.push(Token::Text(&input[text_start..at]));
                    }
                    tokens.push(token);
                    cursor = end;
                    text_start = end;
                }
                None => cursor = at + 1,
            }
        }

        if text_start < input.len() {
            tokens.push(Token::Text(&input[text_start..]));
        }

        tokens
    }
}

/// Parses a tag starting at the `[` at byte `at`; returns the token and the
/// byte offset just past its `]`.
fn parse_tag(input: &str, at: usize) -> Option<(Token<'_>, usize)> {
    let bytes = input.as_bytes();
    let closing = bytes.get(at + 1) == Some(&b'/');
    let name_start = at + 1 + usize::from(closing);
    let name_len = bytes[name_start..]
        .iter()
        .take_while(|b| b.is_ascii_alphabetic())
        .count();
    if name_len == 0 {
        return None;
    }

    let name_end = name_start + name_len;
    let name = input[name_start..name_end].to_ascii_lowercase();

    match *bytes.get(name_end)? {
        b']' => {
            let end = name_end + 1;
            let raw = &input[at..end];
            let token = if closing {
                Token::Close { name, raw }
            } else {
                Token::Open {
                    name,
                    param: None,
                    raw,
                }
            };
            Some((token, end))
        }
        b'=' if !closing => {
            let param_start = name_end + 1;
            let param_len = input[param_start..].find([']', '['])?;
            let param_end = param_start + param_len;
            if bytes[param_end] != b']' {
                return None;
            }
            let end = param_end + 1;
            Some((
                Token::Open {
                    name,
                    param: Some(&input[param_start..param_end]),
                    raw: &input[at..end],
                },
                end,
            ))
        }
        _ => None,
    }
}
