use strum::{Display, EnumIter, IntoStaticStr};
use thiserror::Error;

use crate::metadata::identity::TokenKind;

macro_rules! malformed_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::Malformed {
            message: $msg.to_string(),
            file: file!(),
            line: line!(),
        }
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::Malformed {
            message: format!($fmt, $($arg)*),
            file: file!(),
            line: line!(),
        }
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// Every failure of the assembly name grammar is terminal for the parse call that raised it:
/// there is no partial result and no resumption. Each variant carries the byte offset into the
/// parsed text at which the problem was detected and, where it helps, the offending substring.
/// The [`std::fmt::Display`] output is meant to be shown to an end user as is.
///
/// # Error Categories
///
/// ## Syntax Errors
/// - [`Error::ExpectedToken`] - A specific token (such as `=`) was required but not found
/// - [`Error::MissingRequiredIdentifier`] - A name, component name or component value is absent
/// - [`Error::UnterminatedQuotedIdentifier`] - A `"` was opened but never closed
/// - [`Error::UnexpectedTrailingInput`] - Input left over, or text glued to a closing quote
///
/// ## Semantic Errors
/// - [`Error::DuplicateAssemblyComponent`] - A component was specified twice
/// - [`Error::UnrecognizedAssemblyComponent`] - A component name is not part of the known set
/// - [`Error::InvalidVersionFormat`] - `Version` is not a 1-4 part dotted numeric value
/// - [`Error::InvalidPublicKeyTokenFormat`] - `PublicKeyToken` is not even-length hex
/// - [`Error::EmptyAssemblyName`] - The simple name was empty without being quoted
/// - [`Error::MissingAssemblyName`] - No simple name was registered before finalizing
///
/// ## Other
/// - [`Error::Malformed`] - Invalid arguments passed to a collaborator such as [`crate::RowRange`]
///
/// # Examples
///
/// ```rust
/// use asmident::{parse_assembly_name, Error};
///
/// match parse_assembly_name("A, Version=1.0, Version=2.0", 0, false) {
///     Err(Error::DuplicateAssemblyComponent { component, position }) => {
///         assert_eq!(component, "Version");
///         assert_eq!(position, 16);
///     }
///     other => panic!("unexpected result: {:?}", other),
/// }
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A specific token was required at this position but something else was found.
    ///
    /// Raised for a component name that is not followed by `=`, and for a quoted
    /// identifier whose closing quote cannot be consumed.
    #[error("Expected {expected} at position {position}")]
    ExpectedToken {
        /// The token the grammar required
        expected: TokenKind,
        /// Offset of the token that was found instead
        position: usize,
    },

    /// An identifier was required but the input contained nothing usable.
    ///
    /// Only an explicitly quoted `""` may stand for an empty value.
    #[error("Missing required identifier at position {position}")]
    MissingRequiredIdentifier {
        /// Offset at which the identifier was expected
        position: usize,
    },

    /// A quoted identifier ran into the end of the input before its closing quote.
    #[error("Unterminated quoted identifier starting at position {position}")]
    UnterminatedQuotedIdentifier {
        /// Offset of the opening quote
        position: usize,
    },

    /// The same component was specified more than once.
    #[error("Duplicate assembly component '{component}' at position {position}")]
    DuplicateAssemblyComponent {
        /// The component name, as written in the input
        component: String,
        /// Offset of the second occurrence
        position: usize,
    },

    /// The component name is not one of the recognized names.
    #[error("Unrecognized assembly component '{component}' at position {position}")]
    UnrecognizedAssemblyComponent {
        /// The component name, as written in the input
        component: String,
        /// Offset of the component name
        position: usize,
    },

    /// A top-level parse finished before the end of the input, or a quoted identifier is
    /// followed by more identifier text (`"en"x`) in either mode.
    #[error("Unexpected trailing input at position {position}")]
    UnexpectedTrailingInput {
        /// Offset of the first character that could not be consumed
        position: usize,
    },

    /// The `Version` value is not made of 1 to 4 dot-separated numbers in `0..=65535`.
    #[error("Invalid version format '{value}' at position {position}")]
    InvalidVersionFormat {
        /// The offending value
        value: String,
        /// Offset of the value
        position: usize,
    },

    /// The `PublicKeyToken` value is neither `null` nor an even-length hexadecimal string.
    #[error("Invalid public key token format '{value}' at position {position}")]
    InvalidPublicKeyTokenFormat {
        /// The offending value
        value: String,
        /// Offset of the value
        position: usize,
    },

    /// The simple name is empty and was not written as a quoted `""`.
    #[error("Assembly name cannot be empty (position {position})")]
    EmptyAssemblyName {
        /// Offset of the name
        position: usize,
    },

    /// The component set was finalized without a simple name.
    #[error("Assembly name is missing")]
    MissingAssemblyName,

    /// Invalid input to one of the helper types of this crate.
    ///
    /// # Fields
    ///
    /// * `message` - Detailed description of what was malformed
    /// * `file` - Source file where the error was detected
    /// * `line` - Source line where the error was detected
    #[error("Malformed - {file}:{line}: {message}")]
    Malformed {
        /// The message to be printed for the Malformed error
        message: String,
        /// The source file in which this error occured
        file: &'static str,
        /// The source line in which this error occured
        line: u32,
    },
}

/// Stable, field-less classification of an [`Error`].
///
/// Useful for callers that want to branch on the failure without matching on
/// variant fields, and for reporting (`Display` yields the variant name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum ErrorKind {
    /// See [`Error::ExpectedToken`]
    ExpectedToken,
    /// See [`Error::MissingRequiredIdentifier`]
    MissingRequiredIdentifier,
    /// See [`Error::UnterminatedQuotedIdentifier`]
    UnterminatedQuotedIdentifier,
    /// See [`Error::DuplicateAssemblyComponent`]
    DuplicateAssemblyComponent,
    /// See [`Error::UnrecognizedAssemblyComponent`]
    UnrecognizedAssemblyComponent,
    /// See [`Error::UnexpectedTrailingInput`]
    UnexpectedTrailingInput,
    /// See [`Error::InvalidVersionFormat`]
    InvalidVersionFormat,
    /// See [`Error::InvalidPublicKeyTokenFormat`]
    InvalidPublicKeyTokenFormat,
    /// See [`Error::EmptyAssemblyName`]
    EmptyAssemblyName,
    /// See [`Error::MissingAssemblyName`]
    MissingAssemblyName,
    /// See [`Error::Malformed`]
    Malformed,
}

impl ErrorKind {
    /// Returns `true` for errors in the shape of the input (tokens, quoting, trailing data)
    /// and `false` for errors in the meaning of otherwise well-formed input.
    #[must_use]
    pub fn is_syntax(self) -> bool {
        matches!(
            self,
            ErrorKind::ExpectedToken
                | ErrorKind::MissingRequiredIdentifier
                | ErrorKind::UnterminatedQuotedIdentifier
                | ErrorKind::UnexpectedTrailingInput
        )
    }
}

impl Error {
    /// The stable kind of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ExpectedToken { .. } => ErrorKind::ExpectedToken,
            Error::MissingRequiredIdentifier { .. } => ErrorKind::MissingRequiredIdentifier,
            Error::UnterminatedQuotedIdentifier { .. } => ErrorKind::UnterminatedQuotedIdentifier,
            Error::DuplicateAssemblyComponent { .. } => ErrorKind::DuplicateAssemblyComponent,
            Error::UnrecognizedAssemblyComponent { .. } => {
                ErrorKind::UnrecognizedAssemblyComponent
            }
            Error::UnexpectedTrailingInput { .. } => ErrorKind::UnexpectedTrailingInput,
            Error::InvalidVersionFormat { .. } => ErrorKind::InvalidVersionFormat,
            Error::InvalidPublicKeyTokenFormat { .. } => ErrorKind::InvalidPublicKeyTokenFormat,
            Error::EmptyAssemblyName { .. } => ErrorKind::EmptyAssemblyName,
            Error::MissingAssemblyName => ErrorKind::MissingAssemblyName,
            Error::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    /// Byte offset into the parsed text at which the error was detected, if any.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Error::ExpectedToken { position, .. }
            | Error::MissingRequiredIdentifier { position }
            | Error::UnterminatedQuotedIdentifier { position }
            | Error::DuplicateAssemblyComponent { position, .. }
            | Error::UnrecognizedAssemblyComponent { position, .. }
            | Error::UnexpectedTrailingInput { position }
            | Error::InvalidVersionFormat { position, .. }
            | Error::InvalidPublicKeyTokenFormat { position, .. }
            | Error::EmptyAssemblyName { position } => Some(*position),
            Error::MissingAssemblyName | Error::Malformed { .. } => None,
        }
    }
}
