//! The structured result of parsing an assembly display name.
//!
//! [`AssemblyNameComponents`] is produced by
//! [`ComponentBuilder::finalize`](crate::metadata::identity::ComponentBuilder::finalize)
//! and is read-only afterwards. Next to the raw values it offers typed views for the
//! components that have a well-known meaning:
//!
//! - [`AssemblyVersion`] - One to four dotted 16-bit numbers
//! - [`PublicKeyToken`] - Hex-decoded strong name token
//! - [`ProcessorArchitecture`] - Target architecture, parsed from the raw value on demand
//!
//! # Canonical Form
//!
//! [`AssemblyNameComponents::full_name`] renders the record back to text that parses to an
//! identical record. Only components that are present are written, in the order of
//! [`ComponentName`]. Stop characters and backslashes are escaped; empty values and values
//! with surrounding whitespace are quoted.
//!
//! ```rust
//! use asmident::AssemblyNameComponents;
//!
//! let name: AssemblyNameComponents =
//!     "mscorlib,Version=4.0.0.0,Culture=neutral,PublicKeyToken=B77A5C561934E089".parse()?;
//! assert_eq!(
//!     name.full_name(),
//!     "mscorlib, Version=4.0.0.0, PublicKeyToken=b77a5c561934e089"
//! );
//! # Ok::<(), asmident::Error>(())
//! ```

use std::{borrow::Cow, fmt, str::FromStr};

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{metadata::identity::parse_assembly_name, Error, Result};

/// The recognized component names. Matching is ASCII case-insensitive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ComponentName {
    /// `Version=1.2.3.4`
    Version,
    /// `Culture=en-US`
    Culture,
    /// `PublicKeyToken=b77a5c561934e089`
    PublicKeyToken,
    /// `PublicKey=0024000004800000...`
    PublicKey,
    /// `Retargetable=Yes`
    Retargetable,
    /// `ProcessorArchitecture=MSIL`
    ProcessorArchitecture,
    /// `ContentType=WindowsRuntime`
    ContentType,
}

/// Version of an assembly: up to four 16-bit parts, `major.minor.build.revision`.
///
/// The number of parts written in the source is kept, so `1.2` and `1.2.0.0` are distinct
/// values and each displays the way it was given. Missing parts read as `0`.
///
/// # Examples
///
/// ```rust
/// use asmident::AssemblyVersion;
///
/// let version = AssemblyVersion::parse("2.0")?;
/// assert_eq!(version.major, 2);
/// assert_eq!(version.build, 0);
/// assert_eq!(version.parts(), 2);
/// assert_eq!(version.to_string(), "2.0");
/// # Ok::<(), asmident::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AssemblyVersion {
    /// Major version component
    pub major: u16,
    /// Minor version component
    pub minor: u16,
    /// Build version component
    pub build: u16,
    /// Revision version component
    pub revision: u16,
    parts: u8,
}

impl AssemblyVersion {
    /// Create a full four-part version.
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
            parts: 4,
        }
    }

    /// Number of parts that were specified (1 to 4).
    #[must_use]
    pub const fn parts(&self) -> u8 {
        self.parts
    }

    /// Parse a version string of 1 to 4 dot-separated decimal numbers in `0..=65535`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidVersionFormat`] (at position 0) for empty or non-numeric
    /// groups, out-of-range values, or more than four groups.
    pub fn parse(version: &str) -> Result<Self> {
        Self::parse_at(version, 0)
    }

    pub(crate) fn parse_at(version: &str, position: usize) -> Result<Self> {
        let invalid = || Error::InvalidVersionFormat {
            value: version.to_string(),
            position,
        };

        let mut components = [0u16; 4];
        let mut parts = 0u8;

        for group in version.split('.') {
            let slot = components.get_mut(usize::from(parts)).ok_or_else(invalid)?;
            if group.is_empty() || !group.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            *slot = group.parse::<u16>().map_err(|_| invalid())?;
            parts += 1;
        }

        Ok(Self {
            major: components[0],
            minor: components[1],
            build: components[2],
            revision: components[3],
            parts,
        })
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let components = [self.major, self.minor, self.build, self.revision];
        for (i, component) in components.iter().take(usize::from(self.parts)).enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for AssemblyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// A decoded public key token.
///
/// Usually 8 bytes (the tail of the SHA1 hash of the public key), but any even-length hex
/// string is accepted by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKeyToken(Vec<u8>);

impl PublicKeyToken {
    /// Decode a token from an even-length hexadecimal string (either case).
    ///
    /// # Errors
    /// Returns [`Error::InvalidPublicKeyTokenFormat`] (at position 0) otherwise.
    pub fn parse(token: &str) -> Result<Self> {
        Self::parse_at(token, 0)
    }

    pub(crate) fn parse_at(token: &str, position: usize) -> Result<Self> {
        hex::decode(token)
            .map(PublicKeyToken)
            .map_err(|_| Error::InvalidPublicKeyTokenFormat {
                value: token.to_string(),
                position,
            })
    }

    /// The raw token bytes in display order.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The token as a little-endian `u64`, the way it is stored in metadata, if it is
    /// exactly 8 bytes long.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        let bytes: [u8; 8] = self.0.as_slice().try_into().ok()?;
        Some(u64::from_le_bytes(bytes))
    }
}

impl fmt::Display for PublicKeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(&self.0))
    }
}

/// Processor architecture an assembly targets.
///
/// Parsed case-insensitively; `x64` is accepted as an alias of `AMD64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ProcessorArchitecture {
    /// No architecture specified
    None,
    /// Architecture neutral managed code
    MSIL,
    /// 32-bit Intel x86
    #[strum(to_string = "x86")]
    X86,
    /// Intel Itanium
    IA64,
    /// x86-64
    #[strum(to_string = "AMD64", serialize = "x64")]
    AMD64,
    /// 32-bit ARM
    ARM,
    /// 64-bit ARM
    ARM64,
}

/// Components of a parsed assembly display name.
///
/// Created by the parser and immutable afterwards. `Culture=neutral` and
/// `PublicKeyToken=null` are normalized to absent values.
///
/// # Examples
///
/// ```rust
/// use asmident::{parse_assembly_name, AssemblyVersion};
///
/// let (name, end) = parse_assembly_name(
///     "System.Core, Version=3.5.0.0, Culture=neutral, PublicKeyToken=b77a5c561934e089",
///     0,
///     false,
/// )?;
/// assert_eq!(name.name(), "System.Core");
/// assert_eq!(name.version(), Some(&AssemblyVersion::new(3, 5, 0, 0)));
/// assert!(name.culture().is_none());
/// assert!(name.is_strong_named());
/// assert_eq!(end, 78);
/// # Ok::<(), asmident::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyNameComponents {
    pub(crate) name: String,
    pub(crate) version: Option<AssemblyVersion>,
    pub(crate) culture: Option<String>,
    pub(crate) public_key_token: Option<PublicKeyToken>,
    pub(crate) public_key: Option<String>,
    pub(crate) retargetable: Option<String>,
    pub(crate) processor_architecture: Option<String>,
    pub(crate) content_type: Option<String>,
}

impl AssemblyNameComponents {
    /// Parse a stand-alone display name; the whole input must be consumed.
    ///
    /// # Errors
    /// Returns the first grammar or validation error encountered.
    pub fn parse(display_name: &str) -> Result<Self> {
        parse_assembly_name(display_name, 0, false).map(|(components, _)| components)
    }

    /// The simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The version, if one was given.
    #[must_use]
    pub fn version(&self) -> Option<&AssemblyVersion> {
        self.version.as_ref()
    }

    /// The culture; `None` for culture-neutral names.
    #[must_use]
    pub fn culture(&self) -> Option<&str> {
        self.culture.as_deref()
    }

    /// The public key token; `None` if absent or given as `null`.
    #[must_use]
    pub fn public_key_token(&self) -> Option<&PublicKeyToken> {
        self.public_key_token.as_ref()
    }

    /// The raw `PublicKey` value.
    #[must_use]
    pub fn public_key(&self) -> Option<&str> {
        self.public_key.as_deref()
    }

    /// The raw `Retargetable` value.
    #[must_use]
    pub fn retargetable(&self) -> Option<&str> {
        self.retargetable.as_deref()
    }

    /// The raw `ProcessorArchitecture` value.
    #[must_use]
    pub fn processor_architecture(&self) -> Option<&str> {
        self.processor_architecture.as_deref()
    }

    /// The raw `ContentType` value.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// `true` if the culture is neutral.
    #[must_use]
    pub fn is_culture_neutral(&self) -> bool {
        self.culture.is_none()
    }

    /// `true` if a public key token or a public key is present.
    #[must_use]
    pub fn is_strong_named(&self) -> bool {
        self.public_key_token.is_some() || self.public_key.is_some()
    }

    /// `true` if `Retargetable=Yes` was given (case-insensitive).
    #[must_use]
    pub fn is_retargetable(&self) -> bool {
        self.retargetable
            .as_deref()
            .is_some_and(|value| value.eq_ignore_ascii_case("yes"))
    }

    /// The processor architecture as a typed value.
    ///
    /// # Errors
    /// Returns [`Error::Malformed`] if the raw value is not a known architecture.
    pub fn architecture(&self) -> Result<Option<ProcessorArchitecture>> {
        self.processor_architecture
            .as_deref()
            .map(|raw| {
                raw.parse::<ProcessorArchitecture>()
                    .map_err(|_| malformed_error!("Unknown processor architecture: '{}'", raw))
            })
            .transpose()
    }

    /// The value of `component` in display form, if present.
    #[must_use]
    pub fn component(&self, component: ComponentName) -> Option<Cow<'_, str>> {
        match component {
            ComponentName::Version => self.version.map(|v| Cow::Owned(v.to_string())),
            ComponentName::Culture => self.culture.as_deref().map(Cow::Borrowed),
            ComponentName::PublicKeyToken => {
                self.public_key_token.as_ref().map(|t| Cow::Owned(t.to_string()))
            }
            ComponentName::PublicKey => self.public_key.as_deref().map(Cow::Borrowed),
            ComponentName::Retargetable => self.retargetable.as_deref().map(Cow::Borrowed),
            ComponentName::ProcessorArchitecture => {
                self.processor_architecture.as_deref().map(Cow::Borrowed)
            }
            ComponentName::ContentType => self.content_type.as_deref().map(Cow::Borrowed),
        }
    }

    /// Render the canonical display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        let mut result = String::with_capacity(self.name.len() + 80);
        result.push_str(&escape_value(&self.name));

        for component in ComponentName::iter() {
            if let Some(value) = self.component(component) {
                let label: &'static str = component.into();
                result.push_str(", ");
                result.push_str(label);
                result.push('=');
                result.push_str(&escape_value(&value));
            }
        }

        result
    }
}

/// Spell `value` so that it reads back unchanged in the plain context.
fn escape_value(value: &str) -> Cow<'_, str> {
    if value.is_empty() || value.trim() != value {
        let mut quoted = String::with_capacity(value.len() + 2);
        quoted.push('"');
        for c in value.chars() {
            if matches!(c, '"' | '\\') {
                quoted.push('\\');
            }
            quoted.push(c);
        }
        quoted.push('"');
        return Cow::Owned(quoted);
    }

    if !value.contains([',', '=', '"', '\\']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 4);
    for c in value.chars() {
        if matches!(c, ',' | '=' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

impl fmt::Display for AssemblyNameComponents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl FromStr for AssemblyNameComponents {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_case_insensitive() {
        assert_eq!(
            "version".parse::<ComponentName>().unwrap(),
            ComponentName::Version
        );
        assert_eq!(
            "PUBLICKEYTOKEN".parse::<ComponentName>().unwrap(),
            ComponentName::PublicKeyToken
        );
        assert!("Flavor".parse::<ComponentName>().is_err());
        assert_eq!(ComponentName::ContentType.to_string(), "ContentType");
    }

    #[test]
    fn test_assembly_version_parse_full() {
        let version = AssemblyVersion::parse("4.0.30319.42000").unwrap();
        assert_eq!(version.major, 4);
        assert_eq!(version.minor, 0);
        assert_eq!(version.build, 30319);
        assert_eq!(version.revision, 42000);
        assert_eq!(version.parts(), 4);
        assert_eq!(version, AssemblyVersion::new(4, 0, 30319, 42000));
    }

    #[test]
    fn test_assembly_version_parse_partial() {
        let v1 = AssemblyVersion::parse("7").unwrap();
        assert_eq!(v1.major, 7);
        assert_eq!(v1.parts(), 1);
        assert_eq!(v1.to_string(), "7");

        let v3 = AssemblyVersion::parse("1.2.3").unwrap();
        assert_eq!((v3.major, v3.minor, v3.build, v3.revision), (1, 2, 3, 0));
        assert_eq!(v3.to_string(), "1.2.3");
        assert_ne!(v3, AssemblyVersion::new(1, 2, 3, 0));
    }

    #[test]
    fn test_assembly_version_parse_invalid() {
        for input in [
            "",
            ".",
            "1.",
            ".1",
            "1..2",
            "1.2.3.4.5",
            "1.2.abc.4",
            "1.2.65536",
            "+1.0",
            "-1.0",
            " 1.0",
            "1.0 ",
            "99999999999999999999",
        ] {
            let err = AssemblyVersion::parse(input).unwrap_err();
            assert!(
                matches!(err, Error::InvalidVersionFormat { ref value, position: 0 } if value == input),
                "input {:?} gave {:?}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_assembly_version_bounds() {
        let version = AssemblyVersion::parse("65535.0.0065535").unwrap();
        assert_eq!(version.major, u16::MAX);
        assert_eq!(version.build, u16::MAX);
        assert_eq!(version.to_string(), "65535.0.65535");
    }

    #[test]
    fn test_assembly_version_ordering() {
        let v1 = AssemblyVersion::new(1, 0, 0, 0);
        let v2 = AssemblyVersion::new(2, 0, 0, 0);
        let v1_1 = AssemblyVersion::new(1, 1, 0, 0);

        assert!(v1 < v2);
        assert!(v1 < v1_1);
        assert!(v1_1 < v2);
    }

    #[test]
    fn test_public_key_token_parse() {
        let token = PublicKeyToken::parse("B77A5C561934E089").unwrap();
        assert_eq!(
            token.as_bytes(),
            &[0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]
        );
        assert_eq!(token.to_string(), "b77a5c561934e089");
        assert_eq!(
            token.as_u64(),
            Some(u64::from_le_bytes([0xb7, 0x7a, 0x5c, 0x56, 0x19, 0x34, 0xe0, 0x89]))
        );

        let short = PublicKeyToken::parse("abcd").unwrap();
        assert_eq!(short.as_bytes(), &[0xab, 0xcd]);
        assert!(short.as_u64().is_none());
    }

    #[test]
    fn test_public_key_token_parse_invalid() {
        assert!(matches!(
            PublicKeyToken::parse("zz"),
            Err(Error::InvalidPublicKeyTokenFormat { .. })
        ));
        assert!(PublicKeyToken::parse("abc").is_err());
        assert!(PublicKeyToken::parse("0x12").is_err());
    }

    #[test]
    fn test_processor_architecture_parse() {
        assert_eq!(
            "msil".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::MSIL
        );
        assert_eq!(
            "X86".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::X86
        );
        assert_eq!(
            "x64".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::AMD64
        );
        assert_eq!(
            "Amd64".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::AMD64
        );
        assert_eq!(
            "arm64".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::ARM64
        );
        assert_eq!(
            "none".parse::<ProcessorArchitecture>().unwrap(),
            ProcessorArchitecture::None
        );
        assert!("PowerPC".parse::<ProcessorArchitecture>().is_err());
    }

    #[test]
    fn test_processor_architecture_display() {
        assert_eq!(ProcessorArchitecture::MSIL.to_string(), "MSIL");
        assert_eq!(ProcessorArchitecture::X86.to_string(), "x86");
        assert_eq!(ProcessorArchitecture::AMD64.to_string(), "AMD64");
        assert_eq!(ProcessorArchitecture::ARM64.to_string(), "ARM64");
    }

    #[test]
    fn test_escape_value() {
        assert_eq!(escape_value("Plain.Name"), "Plain.Name");
        assert_eq!(escape_value("a,b=c"), "a\\,b\\=c");
        assert_eq!(escape_value("back\\slash"), "back\\\\slash");
        assert_eq!(escape_value(""), "\"\"");
        assert_eq!(escape_value(" padded "), "\" padded \"");
        assert_eq!(escape_value("\"q\""), "\\\"q\\\"");
        assert_eq!(escape_value(" \"q\" "), "\" \\\"q\\\" \"");
        assert_eq!(escape_value("a]b"), "a]b");
    }

    #[test]
    fn test_full_name_only_present_components() {
        let name = AssemblyNameComponents::parse("A").unwrap();
        assert_eq!(name.full_name(), "A");

        let name = AssemblyNameComponents::parse(
            "A, ContentType=WindowsRuntime, Culture=de-DE, Version=1.2",
        )
        .unwrap();
        assert_eq!(
            name.to_string(),
            "A, Version=1.2, Culture=de-DE, ContentType=WindowsRuntime"
        );
    }

    #[test]
    fn test_typed_views() {
        let name = AssemblyNameComponents::parse(
            "A, Retargetable=YES, ProcessorArchitecture=amd64, PublicKey=0024",
        )
        .unwrap();
        assert!(name.is_retargetable());
        assert!(name.is_strong_named());
        assert_eq!(name.retargetable(), Some("YES"));
        assert_eq!(
            name.architecture().unwrap(),
            Some(ProcessorArchitecture::AMD64)
        );
        assert_eq!(name.processor_architecture(), Some("amd64"));

        let name = AssemblyNameComponents::parse("A, ProcessorArchitecture=Sparc").unwrap();
        assert!(name.architecture().is_err());
        assert!(!name.is_retargetable());
    }
}
