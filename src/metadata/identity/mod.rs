//! Assembly display name parsing for .NET assemblies.
//!
//! This module turns textual assembly identities such as
//! `MyLib, Version=1.2.3.4, Culture=neutral, PublicKeyToken=b77a5c561934e089` into structured
//! data without resolving or loading the referenced assembly. It is usable both for
//! stand-alone names and for names embedded as generic type arguments inside a larger type
//! name, where it stops in front of the closing `]` and hands the offset back to the caller.
//!
//! # ECMA-335 References
//!
//! - **Section II.6.3**: Referencing assemblies - defines assembly reference format
//! - **Section II.22.5**: AssemblyRef table - name, version, culture and key token columns
//! - **Section II.6.2.1.3**: PublicKeyToken - defines public key token computation
//!
//! See: <https://ecma-international.org/publications-and-standards/standards/ecma-335/>
//!
//! # Module Structure
//!
//! - [`lexer`] - Context-sensitive tokenizer with quoting and backslash escapes
//! - [`parser`] - Recursive-descent grammar driver and the [`parse_assembly_name`] entry point
//! - [`builder`] - Validation, duplicate detection and normalization of components
//! - [`components`] - The immutable [`AssemblyNameComponents`] result and its value types
//!
//! # Usage Examples
//!
//! ## Stand-alone Names
//!
//! ```rust
//! use asmident::metadata::identity::{parse_assembly_name, AssemblyVersion};
//!
//! let (mscorlib, _) = parse_assembly_name(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//!     0,
//!     false,
//! )?;
//! assert_eq!(mscorlib.version(), Some(&AssemblyVersion::new(4, 0, 0, 0)));
//! assert!(mscorlib.is_culture_neutral());
//! # Ok::<(), asmident::Error>(())
//! ```
//!
//! ## Embedded Names
//!
//! ```rust
//! use asmident::metadata::identity::parse_assembly_name;
//!
//! let type_name = "List`1[[MyLib, Version=1.0.0.0]]";
//! let start = type_name.find("[[").unwrap() + 2;
//! let (argument, end) = parse_assembly_name(type_name, start, true)?;
//! assert_eq!(argument.name(), "MyLib");
//! assert_eq!(&type_name[end..], "]]");
//! # Ok::<(), asmident::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! Parsing state is created per call and never shared. [`AssemblyNameComponents`] and its value
//! types are plain owned data and are [`Send`] and [`Sync`].

pub use builder::{ComponentBuilder, ComponentSet};
pub use components::{
    AssemblyNameComponents, AssemblyVersion, ComponentName, ProcessorArchitecture,
    PublicKeyToken,
};
pub use lexer::{DelimiterContext, Identifier, Lexer, StopSet, Token, TokenKind};
pub use parser::{
    parse_assembly_name, parse_assembly_name_with, AssemblyNameParser, LexerOwnership,
    ParseOptions, UnknownComponentPolicy,
};

pub mod builder;
pub mod components;
pub mod lexer;
pub mod parser;
