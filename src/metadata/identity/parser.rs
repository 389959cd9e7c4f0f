//! Recursive-descent parser for assembly display names.
//!
//! The grammar accepted by [`AssemblyNameParser`]:
//!
//! ```text
//! assemblyName       := name components
//! name               := identifierOrQuoted
//! components         := { "," componentName "=" componentValue }
//! componentName      := identifierOrQuoted
//! componentValue     := identifierOrQuoted
//! identifierOrQuoted := quotedIdentifier | identifier
//! ```
//!
//! # Top-level and Embedded Parses
//!
//! A stand-alone display name is parsed with [`LexerOwnership::Owned`]: the parser finalizes
//! the lexer and rejects anything left over. Inside a type name such as
//! ``List`1[[MyLib, Version=1.0.0.0]]`` the enclosing grammar hands over a copy of its lexer
//! with [`LexerOwnership::Borrowed`] and [`DelimiterContext::WithinGenericTypeArgument`];
//! the parser then stops in front of the `]` and reports its offset so the caller can resume.
//!
//! # Examples
//!
//! ```rust
//! use asmident::parse_assembly_name;
//!
//! let text = "Foo, Version=1.0.0.0], rest";
//! let (components, end) = parse_assembly_name(text, 0, true)?;
//! assert_eq!(components.name(), "Foo");
//! assert_eq!(&text[end..], "], rest");
//! # Ok::<(), asmident::Error>(())
//! ```

use crate::{
    metadata::identity::{
        AssemblyNameComponents, ComponentBuilder, DelimiterContext, Identifier, Lexer, TokenKind,
    },
    Error, Result,
};

/// What to do with component names outside the recognized set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownComponentPolicy {
    /// Parse the component and drop it; repeating the same name is still a duplicate
    #[default]
    Ignore,
    /// Fail with [`Error::UnrecognizedAssemblyComponent`]
    Reject,
}

/// Options for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Handling of unrecognized component names
    pub unknown_components: UnknownComponentPolicy,
}

impl ParseOptions {
    /// Default options: unrecognized components are skipped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail on unrecognized components instead of skipping them.
    #[must_use]
    pub fn reject_unknown_components(mut self) -> Self {
        self.unknown_components = UnknownComponentPolicy::Reject;
        self
    }
}

/// Whether a parse finalizes the lexer it was given.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerOwnership {
    /// Top-level parse: trailing input is an error
    Owned,
    /// Embedded parse: stop at the first unconsumed stop character and hand it back
    Borrowed,
}

/// Single-use parser driving a [`Lexer`] through the assembly name grammar.
#[derive(Debug)]
pub struct AssemblyNameParser<'a> {
    lexer: Lexer<'a>,
    builder: ComponentBuilder,
    ownership: LexerOwnership,
}

impl<'a> AssemblyNameParser<'a> {
    /// Create a parser reading from `lexer`.
    #[must_use]
    pub fn new(lexer: Lexer<'a>, ownership: LexerOwnership, options: ParseOptions) -> Self {
        AssemblyNameParser {
            lexer,
            builder: ComponentBuilder::with_unknown_policy(options.unknown_components),
            ownership,
        }
    }

    /// Parse a stand-alone display name starting at `start`.
    ///
    /// # Errors
    /// Returns the first grammar or validation error, including
    /// [`Error::UnexpectedTrailingInput`] if the name does not extend to the end of `text`.
    pub fn parse_top_level(
        text: &'a str,
        start: usize,
        options: ParseOptions,
    ) -> Result<(AssemblyNameComponents, usize)> {
        let lexer = Lexer::new(text, start, DelimiterContext::Plain)?;
        AssemblyNameParser::new(lexer, LexerOwnership::Owned, options).parse()
    }

    /// Parse a display name embedded in a generic type argument, starting at `start`.
    ///
    /// The returned offset is that of the `]` (or other stop character, or the end of
    /// input) that ended the name; it is not consumed.
    ///
    /// # Errors
    /// Returns the first grammar or validation error.
    pub fn parse_embedded(
        text: &'a str,
        start: usize,
        options: ParseOptions,
    ) -> Result<(AssemblyNameComponents, usize)> {
        let lexer = Lexer::new(text, start, DelimiterContext::WithinGenericTypeArgument)?;
        AssemblyNameParser::new(lexer, LexerOwnership::Borrowed, options).parse()
    }

    /// Run the grammar and return the components with the offset of the first unconsumed
    /// character.
    ///
    /// # Errors
    /// Returns the first grammar or validation error; there is no partial result.
    pub fn parse(mut self) -> Result<(AssemblyNameComponents, usize)> {
        log::debug!(
            "parsing assembly name at {} ({} context, {:?})",
            self.lexer.position(),
            self.lexer.context(),
            self.ownership
        );

        let name = self.identifier_or_quoted()?;
        self.expect_separator()?;
        self.builder.set_name(&name)?;

        while self.lexer.skip_if(TokenKind::Comma) {
            let component = self.identifier_or_quoted()?;
            self.lexer.skip(TokenKind::Equals)?;
            let value = self.identifier_or_quoted()?;
            self.expect_separator()?;
            self.builder.set(&component, &value)?;
        }

        let end = match self.ownership {
            LexerOwnership::Owned => self.lexer.close()?,
            LexerOwnership::Borrowed => self.lexer.peek_token().start,
        };

        let components = self.builder.finalize()?;
        log::debug!("parsed assembly name {:?}, ends at {}", components.name(), end);
        Ok((components, end))
    }

    /// A name or value must be followed by a stop character or the end of input.
    ///
    /// Only a closing quote can be followed directly by more identifier text, as in `"en"x`.
    fn expect_separator(&self) -> Result<()> {
        let token = self.lexer.peek_token();
        if token.kind == TokenKind::Identifier {
            return Err(Error::UnexpectedTrailingInput {
                position: token.start,
            });
        }
        Ok(())
    }

    /// `identifierOrQuoted`: a quoted identifier may be empty, a plain one may not.
    fn identifier_or_quoted(&mut self) -> Result<Identifier> {
        let token = self.lexer.peek_token();
        if token.kind != TokenKind::Quote {
            return self.lexer.read_identifier(true, true);
        }

        self.lexer.skip(TokenKind::Quote)?;
        let mut body = self.lexer.with_context(DelimiterContext::QuotedBody);
        let mut identifier = body.read_identifier(false, false)?;
        if body.peek() != TokenKind::Quote {
            return Err(Error::UnterminatedQuotedIdentifier {
                position: token.start,
            });
        }

        self.lexer.resume_from(&body);
        self.lexer.skip(TokenKind::Quote)?;

        identifier.position = token.start;
        identifier.quoted = true;
        Ok(identifier)
    }
}

/// Parse an assembly display name starting at byte offset `index`.
///
/// With `within_generic_type_argument` set, `]` terminates identifiers and the parse stops
/// in front of it without consuming it; otherwise the whole remaining input must be a
/// display name. On success the offset of the first unconsumed character is returned
/// alongside the components.
///
/// # Errors
/// Returns the first grammar or validation error, or [`Error::Malformed`] if `index` is not
/// a character boundary of `text`.
///
/// # Examples
///
/// ```rust
/// use asmident::parse_assembly_name;
///
/// let (name, end) = parse_assembly_name(
///     "A, Version=1.0.0.0, Culture=neutral, PublicKeyToken=null",
///     0,
///     false,
/// )?;
/// assert_eq!(name.name(), "A");
/// assert!(name.culture().is_none());
/// assert!(name.public_key_token().is_none());
/// assert_eq!(end, 56);
/// # Ok::<(), asmident::Error>(())
/// ```
pub fn parse_assembly_name(
    text: &str,
    index: usize,
    within_generic_type_argument: bool,
) -> Result<(AssemblyNameComponents, usize)> {
    parse_assembly_name_with(text, index, within_generic_type_argument, ParseOptions::new())
}

/// [`parse_assembly_name`] with explicit [`ParseOptions`].
///
/// # Errors
/// See [`parse_assembly_name`].
pub fn parse_assembly_name_with(
    text: &str,
    index: usize,
    within_generic_type_argument: bool,
    options: ParseOptions,
) -> Result<(AssemblyNameComponents, usize)> {
    if within_generic_type_argument {
        AssemblyNameParser::parse_embedded(text, index, options)
    } else {
        AssemblyNameParser::parse_top_level(text, index, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::identity::AssemblyVersion;

    fn parse(text: &str) -> Result<AssemblyNameComponents> {
        parse_assembly_name(text, 0, false).map(|(components, _)| components)
    }

    #[test]
    fn test_parser_simple_name() {
        let (components, end) = parse_assembly_name("A", 0, false).unwrap();
        assert_eq!(components.name(), "A");
        assert!(components.version().is_none());
        assert!(components.culture().is_none());
        assert!(components.public_key_token().is_none());
        assert_eq!(end, 1);
    }

    #[test]
    fn test_parser_full_name() {
        let components =
            parse("mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089")
                .unwrap();
        assert_eq!(components.name(), "mscorlib");
        assert_eq!(components.version(), Some(&AssemblyVersion::new(4, 0, 0, 0)));
        assert!(components.culture().is_none());
        assert_eq!(
            components.public_key_token().and_then(|t| t.as_u64()),
            Some(u64::from_le_bytes([
                0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89
            ]))
        );
    }

    #[test]
    fn test_parser_whitespace_is_insignificant() {
        let components = parse("  My Lib ,Version = 1.2 ,  Culture=en-US   ").unwrap();
        assert_eq!(components.name(), "My Lib");
        assert_eq!(components.version().map(|v| v.to_string()), Some("1.2".into()));
        assert_eq!(components.culture(), Some("en-US"));
    }

    #[test]
    fn test_parser_duplicate_component() {
        let err = parse("A, Version=1.0.0.0, Version=2.0.0.0").unwrap_err();
        assert_eq!(
            err,
            Error::DuplicateAssemblyComponent {
                component: "Version".to_string(),
                position: 20
            }
        );
    }

    #[test]
    fn test_parser_quoted_name() {
        let components = parse("\"A, B\"").unwrap();
        assert_eq!(components.name(), "A, B");

        let components = parse(" \" padded = name \" , Version=1").unwrap();
        assert_eq!(components.name(), " padded = name ");
    }

    #[test]
    fn test_parser_quoted_empty_values() {
        let components = parse("\"\"").unwrap();
        assert_eq!(components.name(), "");

        let components = parse("A, Culture=\"\", ContentType=\"\"").unwrap();
        assert!(components.culture().is_none());
        assert_eq!(components.content_type(), Some(""));
    }

    #[test]
    fn test_parser_quoted_component_name() {
        let components = parse("A, \"Version\"=\"1.0\"").unwrap();
        assert_eq!(components.version().map(|v| v.to_string()), Some("1.0".into()));
    }

    #[test]
    fn test_parser_escaped_comma() {
        let components = parse("A\\,B, Version=1.0.0.0").unwrap();
        assert_eq!(components.name(), "A,B");
        assert_eq!(components.version(), Some(&AssemblyVersion::new(1, 0, 0, 0)));
    }

    #[test]
    fn test_parser_escaped_quote_inside_quotes() {
        let components = parse("\"say \\\"hi\\\"\"").unwrap();
        assert_eq!(components.name(), "say \"hi\"");
    }

    #[test]
    fn test_parser_unterminated_quote() {
        assert_eq!(
            parse("A, Culture=\"en-US").unwrap_err(),
            Error::UnterminatedQuotedIdentifier { position: 11 }
        );
        assert_eq!(
            parse("\"abc\\\"").unwrap_err(),
            Error::UnterminatedQuotedIdentifier { position: 0 }
        );
    }

    #[test]
    fn test_parser_missing_identifiers() {
        assert_eq!(
            parse("").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 0 }
        );
        assert_eq!(
            parse("   ").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 3 }
        );
        assert_eq!(
            parse(", Version=1.0").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 0 }
        );
        assert_eq!(
            parse("A,, Version=1.0").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 2 }
        );
        assert_eq!(
            parse("A, =1.0").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 3 }
        );
        assert_eq!(
            parse("A, Version=").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 11 }
        );
        assert_eq!(
            parse("A, Version=, Culture=en").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 11 }
        );
        assert_eq!(
            parse("A,").unwrap_err(),
            Error::MissingRequiredIdentifier { position: 2 }
        );
    }

    #[test]
    fn test_parser_expected_equals() {
        assert_eq!(
            parse("A, Version").unwrap_err(),
            Error::ExpectedToken {
                expected: TokenKind::Equals,
                position: 10
            }
        );
        assert_eq!(
            parse("A, Version, Culture=en").unwrap_err(),
            Error::ExpectedToken {
                expected: TokenKind::Equals,
                position: 10
            }
        );
        assert_eq!(
            parse("A, \"Version\" 1.0").unwrap_err(),
            Error::ExpectedToken {
                expected: TokenKind::Equals,
                position: 13
            }
        );
    }

    #[test]
    fn test_parser_trailing_input() {
        assert_eq!(
            parse("A=B").unwrap_err(),
            Error::UnexpectedTrailingInput { position: 1 }
        );
        assert_eq!(
            parse("\"A\" B").unwrap_err(),
            Error::UnexpectedTrailingInput { position: 4 }
        );
        assert_eq!(
            parse("A, Version=1.0=2").unwrap_err(),
            Error::UnexpectedTrailingInput { position: 14 }
        );
        // `]` is an ordinary character outside generic arguments
        assert_eq!(parse("A]").unwrap().name(), "A]");
    }

    #[test]
    fn test_parser_semantic_errors_carry_positions() {
        assert_eq!(
            parse("A, PublicKeyToken=zz").unwrap_err(),
            Error::InvalidPublicKeyTokenFormat {
                value: "zz".to_string(),
                position: 18
            }
        );
        assert_eq!(
            parse("A, Version=1.x").unwrap_err(),
            Error::InvalidVersionFormat {
                value: "1.x".to_string(),
                position: 11
            }
        );
        assert_eq!(
            parse_assembly_name_with(
                "A, Flavor=Vanilla",
                0,
                false,
                ParseOptions::new().reject_unknown_components()
            )
            .unwrap_err(),
            Error::UnrecognizedAssemblyComponent {
                component: "Flavor".to_string(),
                position: 3
            }
        );
    }

    #[test]
    fn test_parser_ignores_unknown_components_by_default() {
        let (components, end) =
            parse_assembly_name("A, Flavor=Vanilla, Version=1.0, Custom=\"x, y\"", 0, false)
                .unwrap();
        assert_eq!(components.name(), "A");
        assert_eq!(components.full_name(), "A, Version=1.0");
        assert_eq!(end, 45);

        assert_eq!(
            parse("A, Flavor=Vanilla, flavor=Mint").unwrap_err(),
            Error::DuplicateAssemblyComponent {
                component: "flavor".to_string(),
                position: 19
            }
        );
    }

    #[test]
    fn test_parser_embedded_stops_at_bracket() {
        let text = "Foo, Version=1.0.0.0], rest";
        let (components, end) = parse_assembly_name(text, 0, true).unwrap();
        assert_eq!(components.name(), "Foo");
        assert_eq!(components.version(), Some(&AssemblyVersion::new(1, 0, 0, 0)));
        assert_eq!(end, 20);
        assert_eq!(text.as_bytes()[end], b']');
    }

    #[test]
    fn test_parser_embedded_after_quoted_value() {
        let text = "[Foo, Culture=\"en-US\"  ]]";
        let (components, end) = parse_assembly_name(text, 1, true).unwrap();
        assert_eq!(components.culture(), Some("en-US"));
        assert_eq!(end, 23);
        assert_eq!(&text[end..], "]]");
    }

    #[test]
    fn test_parser_quoted_text_must_end_at_stop() {
        assert_eq!(
            parse_assembly_name("Foo, Culture=\"en\"junk]", 0, true).unwrap_err(),
            Error::UnexpectedTrailingInput { position: 17 }
        );
        assert_eq!(
            parse_assembly_name("\"A\"x]", 0, true).unwrap_err(),
            Error::UnexpectedTrailingInput { position: 3 }
        );
        assert_eq!(
            parse("\"A\"x, Version=1.0").unwrap_err(),
            Error::UnexpectedTrailingInput { position: 3 }
        );

        // a stop character right after the quote is fine
        let (components, end) = parse_assembly_name("\"A\"]", 0, true).unwrap();
        assert_eq!(components.name(), "A");
        assert_eq!(end, 3);
    }

    #[test]
    fn test_parser_embedded_escaped_bracket() {
        let text = "Foo\\]Bar]";
        let (components, end) = parse_assembly_name(text, 0, true).unwrap();
        assert_eq!(components.name(), "Foo]Bar");
        assert_eq!(end, 8);
    }

    #[test]
    fn test_parser_embedded_does_not_finalize() {
        // trailing garbage is left for the enclosing grammar
        let text = "Foo=bar]";
        let (components, end) = parse_assembly_name(text, 0, true).unwrap();
        assert_eq!(components.name(), "Foo");
        assert_eq!(end, 3);

        let (_, end) = parse_assembly_name("Foo ", 0, true).unwrap();
        assert_eq!(end, 4);
    }

    #[test]
    fn test_parser_top_level_rejects_bracket_in_generic_text() {
        // a top-level parse treats `]` as part of the value, so the version is invalid
        assert!(matches!(
            parse("Foo, Version=1.0.0.0], rest"),
            Err(Error::InvalidVersionFormat { .. })
        ));
    }

    #[test]
    fn test_parser_owned_generic_lexer_accepts_bracket() {
        let lexer = Lexer::new("Foo ]", 0, DelimiterContext::WithinGenericTypeArgument).unwrap();
        let (components, end) =
            AssemblyNameParser::new(lexer, LexerOwnership::Owned, ParseOptions::new())
                .parse()
                .unwrap();
        assert_eq!(components.name(), "Foo");
        assert_eq!(end, 4);

        let lexer = Lexer::new("Foo =", 0, DelimiterContext::WithinGenericTypeArgument).unwrap();
        assert_eq!(
            AssemblyNameParser::new(lexer, LexerOwnership::Owned, ParseOptions::new())
                .parse()
                .unwrap_err(),
            Error::UnexpectedTrailingInput { position: 4 }
        );
    }

    #[test]
    fn test_parser_start_offset() {
        let text = "prefix:Lib, Version=2.0";
        let (components, end) = parse_assembly_name(text, 7, false).unwrap();
        assert_eq!(components.name(), "Lib");
        assert_eq!(end, text.len());

        assert!(matches!(
            parse_assembly_name(text, 100, false),
            Err(Error::Malformed { .. })
        ));
    }
}
