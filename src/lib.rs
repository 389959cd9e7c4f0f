// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]

//! # asmident
//!
//! A strict, resumable parser for .NET assembly display names.
//!
//! `asmident` turns identity strings such as
//! `MyLib, Version=1.2.3.4, Culture=neutral, PublicKeyToken=b77a5c561934e089` into a
//! structured [`AssemblyNameComponents`] record without resolving or loading anything. It is
//! meant for reflection and metadata tooling that receives assembly names from custom
//! attribute blobs, type-forwarding tables or serialized type names.
//!
//! ## Features
//!
//! - **Full grammar** - Quoted identifiers, backslash escapes, case-insensitive component names
//! - **Embeddable** - Parses names nested in generic type arguments and reports where they end
//! - **Strict validation** - Duplicate and malformed components are typed errors
//! - **Round-trip formatting** - [`AssemblyNameComponents::full_name`] re-parses to the same record
//!
//! ## Quick Start
//!
//! ```rust
//! use asmident::prelude::*;
//!
//! let (name, end) = parse_assembly_name(
//!     "mscorlib, Version=4.0.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
//!     0,
//!     false,
//! )?;
//! assert_eq!(name.name(), "mscorlib");
//! assert_eq!(name.version(), Some(&AssemblyVersion::new(4, 0, 0, 0)));
//! assert!(name.culture().is_none());
//! assert_eq!(name.public_key_token().map(|t| t.to_string()).as_deref(), Some("b77a5c561934e089"));
//! assert_eq!(end, 75);
//! # Ok::<(), asmident::Error>(())
//! ```
//!
//! ### Embedded Names
//!
//! When a name is a generic type argument (`Type[[Assembly, Version=...]]`), `]` ends the name
//! and is left in place for the enclosing grammar:
//!
//! ```rust
//! use asmident::parse_assembly_name;
//!
//! let text = "Foo, Version=1.0.0.0], rest";
//! let (name, end) = parse_assembly_name(text, 0, true)?;
//! assert_eq!(name.name(), "Foo");
//! assert_eq!(&text[end..], "], rest");
//! # Ok::<(), asmident::Error>(())
//! ```
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result). Every parse error is terminal and carries
//! the byte offset it refers to:
//!
//! ```rust
//! use asmident::{parse_assembly_name, ErrorKind};
//!
//! let err = parse_assembly_name("A, PublicKeyToken=zz", 0, false).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::InvalidPublicKeyTokenFormat);
//! assert_eq!(err.position(), Some(18));
//! println!("{}", err); // Invalid public key token format 'zz' at position 18
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`](https://docs.rs/log) facade (`debug` for parse results,
//! `trace` for token decisions) and never installs a logger itself.
//!
//! ## Development and Testing
//!
//! ### Fuzzing
//!
//! ```bash
//! cargo +nightly fuzz run assembly_name --release
//! ```
//!
//! ### Testing
//!
//! ```bash
//! cargo test
//! cargo bench
//! ```

#[macro_use]
pub(crate) mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use asmident::prelude::*;
///
/// let name: AssemblyNameComponents = "MyLib, Version=1.0".parse()?;
/// assert_eq!(name.name(), "MyLib");
/// # Ok::<(), asmident::Error>(())
/// ```
pub mod prelude;

/// Assembly display name parsing and metadata row helpers
///
/// # Key Components
///
/// - [`metadata::identity`] - Lexer, parser and component builder for display names
/// - [`metadata::rows`] - Row-id range enumeration for table cross references
pub mod metadata;

/// `asmident` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// `asmident` Error type and its stable kinds
pub use error::{Error, ErrorKind};

/// Main entry points for parsing display names.
pub use metadata::identity::{
    parse_assembly_name, parse_assembly_name_with, AssemblyNameComponents, AssemblyVersion,
    ParseOptions, ProcessorArchitecture, PublicKeyToken,
};

/// Row-id range enumeration.
pub use metadata::rows::{RowId, RowRange};
