//! Metadata-facing text and row utilities for .NET assemblies.
//!
//! # Key Components
//!
//! - [`identity`] - Parsing of assembly display names into [`identity::AssemblyNameComponents`]
//! - [`rows`] - Forward-only enumeration of row-id ranges in metadata tables
//!
//! # Examples
//!
//! ```rust
//! use asmident::metadata::{identity::parse_assembly_name, rows::RowRange};
//!
//! let (name, _) = parse_assembly_name("System.Runtime, Version=8.0.0.0", 0, false)?;
//! assert_eq!(name.name(), "System.Runtime");
//!
//! let rows: Vec<u32> = RowRange::new(10, 3, 5)?.map(|row| row.value()).collect();
//! assert_eq!(rows, vec![3, 4, 5]);
//! # Ok::<(), asmident::Error>(())
//! ```

/// Implementation of the assembly display name grammar
pub mod identity;
/// Implementation of row-id range enumeration
pub mod rows;
