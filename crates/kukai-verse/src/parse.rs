//! Markup parser for verse text.
//!
//! Two notations are recognised:
//!
//! - Ruby: `｜遠山（とおやま）` attaches the gloss `とおやま` to the base `遠山`.
//! - Preface: `（（寒し））` at the very start of the text is a prefatory
//!   note, set apart from the verse body.
//!
//! Parsing never fails. Markup that is not closed is kept as literal text.

use serde::{Deserialize, Serialize};

pub const RUBY_START: char = '｜';
pub const RUBY_OPEN: char = '（';
pub const RUBY_CLOSE: char = '）';
pub const PREFACE_OPEN: &str = "（（";
pub const PREFACE_CLOSE: &str = "））";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    Text { content: String },
    Ruby { base: String, gloss: String },
}

impl Token {
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text {
            content: content.into(),
        }
    }

    pub fn ruby(base: impl Into<String>, gloss: impl Into<String>) -> Self {
        Token::Ruby {
            base: base.into(),
            gloss: gloss.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedHaiku {
    pub preface: Option<Vec<Token>>,
    pub body: Vec<Token>,
}

/// Split off an optional preface and scan both parts for ruby.
///
/// Text without markers comes back as one `Text` token, except that empty
/// input yields an empty body rather than an empty token.
pub fn parse(raw: &str) -> ParsedHaiku {
    let (preface, body) = split_preface(raw);
    ParsedHaiku {
        preface: preface.map(|p| scan_ruby(p).collect()),
        body: scan_ruby(body).collect(),
    }
}

/// Returns `(preface, body)`.
///
/// `｜（（` at position 0 escapes the preface marker: the whole text is body.
fn split_preface(raw: &str) -> (Option<&str>, &str) {
    let escaped = raw
        .strip_prefix(RUBY_START)
        .is_some_and(|rest| rest.starts_with(PREFACE_OPEN));
    if escaped {
        return (None, raw);
    }
    let Some(rest) = raw.strip_prefix(PREFACE_OPEN) else {
        return (None, raw);
    };
    match rest.find(PREFACE_CLOSE) {
        Some(end) => (
            Some(&rest[..end]),
            rest[end + PREFACE_CLOSE.len()..].trim_start(),
        ),
        None => (None, raw),
    }
}

/// Lazily tokenise `text` into plain runs and ruby annotations.
///
/// The scanner is `Clone`, so a sequence can be replayed from any point.
pub fn scan_ruby(text: &str) -> RubyScanner<'_> {
    RubyScanner {
        text,
        pos: 0,
        pending: None,
    }
}

#[derive(Debug, Clone)]
pub struct RubyScanner<'a> {
    text: &'a str,
    pos: usize,
    /// A ruby token already located behind the plain run just emitted.
    pending: Option<Token>,
}

impl Iterator for RubyScanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if let Some(tok) = self.pending.take() {
            return Some(tok);
        }
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let Some(bar) = rest.find(RUBY_START) else {
            self.pos = self.text.len();
            return Some(Token::text(rest));
        };

        let after_bar = &rest[bar + RUBY_START.len_utf8()..];
        let bounds = after_bar.find(RUBY_OPEN).and_then(|open| {
            let gloss_start = open + RUBY_OPEN.len_utf8();
            after_bar[gloss_start..]
                .find(RUBY_CLOSE)
                .map(|len| (open, gloss_start, gloss_start + len))
        });

        let Some((open, gloss_start, close)) = bounds else {
            // Unterminated: everything from the marker on is literal, and
            // scanning stops here.
            self.pos = self.text.len();
            if bar > 0 {
                self.pending = Some(Token::text(&rest[bar..]));
                return Some(Token::text(&rest[..bar]));
            }
            return Some(Token::text(rest));
        };

        let ruby = Token::ruby(&after_bar[..open], &after_bar[gloss_start..close]);
        self.pos += bar + RUBY_START.len_utf8() + close + RUBY_CLOSE.len_utf8();
        if bar > 0 {
            self.pending = Some(ruby);
            return Some(Token::text(&rest[..bar]));
        }
        Some(ruby)
    }
}
