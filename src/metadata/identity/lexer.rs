//! Context-sensitive tokenizer for assembly display names.
//!
//! The lexer classifies the characters of an assembly display name such as
//! `mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089`
//! into a handful of tokens. Which characters terminate an identifier depends on
//! the active [`DelimiterContext`]:
//!
//! | Context                                        | Stop characters     | Escapes |
//! |------------------------------------------------|---------------------|---------|
//! | [`DelimiterContext::Plain`]                    | `,` `=` `"`         | yes     |
//! | [`DelimiterContext::WithinGenericTypeArgument`] | `,` `=` `"` `]`     | yes     |
//! | [`DelimiterContext::QuotedBody`]               | `"`                 | yes     |
//!
//! A backslash in front of a stop character (or in front of another backslash)
//! yields that character literally. A backslash in front of anything else is
//! kept as is.
//!
//! # Cursor Model
//!
//! [`Lexer`] is a small `Copy` value: the borrowed text, a byte offset and the
//! active context. Entering a quoted identifier never aliases the parent lexer;
//! instead [`Lexer::with_context`] hands out a copy with a different context and
//! the parent adopts the child's final offset via [`Lexer::resume_from`] once the
//! child is done.
//!
//! # Examples
//!
//! ```rust
//! use asmident::metadata::identity::{DelimiterContext, Lexer, TokenKind};
//!
//! let mut lexer = Lexer::new("A\\,B, Version=1.0", 0, DelimiterContext::Plain)?;
//! let name = lexer.read_identifier(true, true)?;
//! assert_eq!(name.text, "A,B");
//! assert_eq!(lexer.peek(), TokenKind::Comma);
//! # Ok::<(), asmident::Error>(())
//! ```

use strum::Display;

use crate::{Error, Result};

/// The escape character honored by every [`DelimiterContext`].
const ESCAPE: u8 = b'\\';

/// Classification of the next token in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TokenKind {
    /// A run of non-stop characters
    #[strum(to_string = "identifier")]
    Identifier,
    /// `,`
    #[strum(to_string = "','")]
    Comma,
    /// `=`
    #[strum(to_string = "'='")]
    Equals,
    /// `"`
    #[strum(to_string = "'\"'")]
    Quote,
    /// No characters left
    #[strum(to_string = "end of input")]
    EndOfInput,
    /// `]`, only recognized inside a generic type argument
    #[strum(to_string = "']'")]
    CloseBracket,
}

/// A classified token together with the byte span it covers.
///
/// For [`TokenKind::Identifier`] the span covers the raw (still escaped) characters up to the
/// next unescaped stop character. For [`TokenKind::EndOfInput`] the span is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// What kind of token this is
    pub kind: TokenKind,
    /// Offset of the first byte of the token
    pub start: usize,
    /// Offset one past the last byte of the token
    pub end: usize,
}

/// An identifier read from the input, with escapes already decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    /// The decoded (and, outside quotes, trimmed) text
    pub text: String,
    /// Offset of the first significant character, or of the opening quote
    pub position: usize,
    /// `true` if the identifier was written between double quotes
    pub quoted: bool,
}

/// The set of characters that terminate an identifier, plus the escape flag.
#[derive(Debug)]
pub struct StopSet {
    table: [bool; 128],
    escapes: bool,
}

impl StopSet {
    const fn new(stops: &[u8], escapes: bool) -> Self {
        let mut table = [false; 128];
        let mut i = 0;
        while i < stops.len() {
            table[stops[i] as usize] = true;
            i += 1;
        }
        StopSet { table, escapes }
    }

    /// Returns `true` if `byte` terminates an identifier.
    #[must_use]
    pub fn is_stop(&self, byte: u8) -> bool {
        byte < 128 && self.table[byte as usize]
    }

    /// Returns `true` if `\<byte>` decodes to `byte`.
    #[must_use]
    pub fn is_escapable(&self, byte: u8) -> bool {
        self.escapes() && (byte == ESCAPE || self.is_stop(byte))
    }

    /// Returns `true` if backslash escapes are honored.
    #[must_use]
    pub fn escapes(&self) -> bool {
        self.escapes
    }
}

static PLAIN_STOPS: StopSet = StopSet::new(b",=\"", true);
static GENERIC_ARGUMENT_STOPS: StopSet = StopSet::new(b",=\"]", true);
static QUOTED_BODY_STOPS: StopSet = StopSet::new(b"\"", true);

/// The active delimiter rules of a [`Lexer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum DelimiterContext {
    /// A stand-alone display name
    Plain,
    /// A display name embedded as `Type[[Name, Version=...]]`; `]` terminates identifiers
    WithinGenericTypeArgument,
    /// The inside of a `"..."` identifier; only the closing quote terminates
    QuotedBody,
}

impl DelimiterContext {
    /// The stop-character table of this context.
    #[must_use]
    pub fn stop_set(self) -> &'static StopSet {
        match self {
            DelimiterContext::Plain => &PLAIN_STOPS,
            DelimiterContext::WithinGenericTypeArgument => &GENERIC_ARGUMENT_STOPS,
            DelimiterContext::QuotedBody => &QUOTED_BODY_STOPS,
        }
    }

    /// Whether whitespace between tokens is insignificant in this context.
    #[must_use]
    pub fn skips_whitespace(self) -> bool {
        self != DelimiterContext::QuotedBody
    }
}

/// A copyable cursor over an assembly display name.
///
/// Positions are byte offsets into the borrowed text and never move backwards.
#[derive(Debug, Clone, Copy)]
pub struct Lexer<'a> {
    text: &'a str,
    position: usize,
    context: DelimiterContext,
}

impl<'a> Lexer<'a> {
    /// Create a lexer positioned at `start`.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if `start` is past the end of `text` or not on a
    /// character boundary.
    pub fn new(text: &'a str, start: usize, context: DelimiterContext) -> Result<Self> {
        if !text.is_char_boundary(start) {
            return Err(malformed_error!(
                "Start offset {} is not a character boundary of a {} byte input",
                start,
                text.len()
            ));
        }

        Ok(Lexer {
            text,
            position: start,
            context,
        })
    }

    /// The current byte offset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// The active delimiter context.
    #[must_use]
    pub fn context(&self) -> DelimiterContext {
        self.context
    }

    /// The full text this lexer reads from.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// A view sharing text and position, but using `context` for classification.
    #[must_use]
    pub fn with_context(&self, context: DelimiterContext) -> Lexer<'a> {
        Lexer {
            text: self.text,
            position: self.position,
            context,
        }
    }

    /// Adopt the final position of a view previously created with [`Lexer::with_context`].
    pub fn resume_from(&mut self, child: &Lexer<'a>) {
        debug_assert!(std::ptr::eq(self.text, child.text));
        debug_assert!(child.position >= self.position);
        self.position = self.position.max(child.position);
    }

    /// Offset of the next significant byte, skipping insignificant whitespace.
    fn significant_position(&self) -> usize {
        if !self.context.skips_whitespace() {
            return self.position;
        }

        let rest = &self.text[self.position..];
        self.position + (rest.len() - rest.trim_start().len())
    }

    /// Classify the next token without consuming anything.
    #[must_use]
    pub fn peek(&self) -> TokenKind {
        self.peek_token().kind
    }

    /// Classify the next token and compute its span without consuming anything.
    #[must_use]
    pub fn peek_token(&self) -> Token {
        let start = self.significant_position();
        let Some(&byte) = self.text.as_bytes().get(start) else {
            return Token {
                kind: TokenKind::EndOfInput,
                start,
                end: start,
            };
        };

        let stops = self.context.stop_set();
        let kind = if stops.is_stop(byte) {
            match byte {
                b',' => TokenKind::Comma,
                b'=' => TokenKind::Equals,
                b'"' => TokenKind::Quote,
                b']' => TokenKind::CloseBracket,
                _ => TokenKind::Identifier,
            }
        } else {
            TokenKind::Identifier
        };

        let end = if kind == TokenKind::Identifier {
            self.scan_identifier_end(start)
        } else {
            start + 1
        };

        Token { kind, start, end }
    }

    /// Offset of the first unescaped stop character at or after `from`, or the end of input.
    fn scan_identifier_end(&self, from: usize) -> usize {
        let stops = self.context.stop_set();
        let bytes = self.text.as_bytes();
        let mut offset = from;

        while let Some(&byte) = bytes.get(offset) {
            if byte == ESCAPE && bytes.get(offset + 1).is_some_and(|&n| stops.is_escapable(n)) {
                offset += 2;
                continue;
            }
            if stops.is_stop(byte) {
                break;
            }
            offset += 1;
        }

        offset
    }

    /// Consume the next token if it is of `kind`.
    ///
    /// Identifiers are never consumed by this method; use [`Lexer::read_identifier`].
    pub fn skip_if(&mut self, kind: TokenKind) -> bool {
        let token = self.peek_token();
        if token.kind != kind || kind == TokenKind::Identifier {
            return false;
        }

        log::trace!("consumed {} at {}", kind, token.start);
        self.position = token.end;
        true
    }

    /// Consume the next token, which must be of `kind`.
    ///
    /// # Errors
    /// Returns [`Error::ExpectedToken`] with the offset of the token found instead.
    pub fn skip(&mut self, kind: TokenKind) -> Result<()> {
        if self.skip_if(kind) {
            return Ok(());
        }

        Err(Error::ExpectedToken {
            expected: kind,
            position: self.significant_position(),
        })
    }

    /// Read characters up to the next unescaped stop character of the active context.
    ///
    /// Escapes are decoded. Leading and trailing whitespace is removed when `trim` is set,
    /// except inside [`DelimiterContext::QuotedBody`] where text is taken verbatim. The
    /// terminating stop character is left unconsumed.
    ///
    /// # Errors
    /// Returns [`Error::MissingRequiredIdentifier`] if `required` is set and nothing remains.
    pub fn read_identifier(&mut self, required: bool, trim: bool) -> Result<Identifier> {
        let stops = self.context.stop_set();
        let bytes = self.text.as_bytes();
        let start = self.position;

        let mut text = String::new();
        let mut chunk_start = start;
        let mut offset = start;

        while let Some(&byte) = bytes.get(offset) {
            if byte == ESCAPE {
                if let Some(&next) = bytes.get(offset + 1) {
                    if stops.is_escapable(next) {
                        text.push_str(&self.text[chunk_start..offset]);
                        text.push(char::from(next));
                        offset += 2;
                        chunk_start = offset;
                        continue;
                    }
                }
            } else if stops.is_stop(byte) {
                break;
            }
            offset += 1;
        }
        text.push_str(&self.text[chunk_start..offset]);
        self.position = offset;

        let mut position = start;
        if trim && self.context != DelimiterContext::QuotedBody {
            let trimmed = text.trim_start();
            position += text.len() - trimmed.len();
            text = trimmed.trim_end().to_string();
        }

        if required && text.is_empty() {
            return Err(Error::MissingRequiredIdentifier { position });
        }

        log::trace!(
            "identifier {:?} at {} ({} context)",
            text,
            position,
            self.context
        );

        Ok(Identifier {
            text,
            position,
            quoted: false,
        })
    }

    /// Finish a top-level parse.
    ///
    /// Succeeds only if nothing but whitespace remains, or if the next token is the `]`
    /// terminating a generic type argument. Returns the final offset.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedTrailingInput`] at the first unconsumed token otherwise.
    pub fn close(self) -> Result<usize> {
        let token = self.peek_token();
        match token.kind {
            TokenKind::EndOfInput | TokenKind::CloseBracket => Ok(token.start),
            _ => Err(Error::UnexpectedTrailingInput {
                position: token.start,
            }),
        }
    }
}
