//! # asmident Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the asmident library.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all asmident operations
pub use crate::Error;

/// Stable classification of errors
pub use crate::ErrorKind;

/// The result type used throughout asmident
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// Parse a display name, stand-alone or embedded
pub use crate::metadata::identity::{parse_assembly_name, parse_assembly_name_with};

/// Parser configuration
pub use crate::metadata::identity::{LexerOwnership, ParseOptions, UnknownComponentPolicy};

/// Lower-level parser for callers that drive their own lexer
pub use crate::metadata::identity::{AssemblyNameParser, DelimiterContext, Lexer};

// ================================================================================================
// Results
// ================================================================================================

/// Parsed display name and its value types
pub use crate::metadata::identity::{
    AssemblyNameComponents, AssemblyVersion, ComponentName, ProcessorArchitecture,
    PublicKeyToken,
};

/// Row-id range enumeration
pub use crate::metadata::rows::{RowId, RowRange};
