//! Accumulation and validation of assembly name components.
//!
//! [`ComponentBuilder`] receives the identifiers recognized by the parser, checks them
//! against the fixed set of [`ComponentName`]s, normalizes well-known values and finally
//! produces an immutable [`AssemblyNameComponents`].
//!
//! # Normalization
//!
//! - `Version` is validated as 1 to 4 dotted 16-bit numbers
//! - `Culture=neutral` (any case) and a quoted empty culture mean "no culture"
//! - `PublicKeyToken=null` (any case) means "no token"; anything else must be even-length hex
//! - `PublicKey`, `Retargetable`, `ProcessorArchitecture` and `ContentType` are kept verbatim
//!
//! # Examples
//!
//! ```rust
//! use asmident::metadata::identity::{ComponentBuilder, Identifier};
//!
//! let ident = |text: &str, position| Identifier { text: text.to_string(), position, quoted: false };
//!
//! let mut builder = ComponentBuilder::new();
//! builder.set_name(&ident("MyLib", 0))?;
//! builder.set(&ident("version", 7), &ident("1.2", 15))?;
//! builder.set(&ident("Culture", 20), &ident("neutral", 28))?;
//!
//! let components = builder.finalize()?;
//! assert_eq!(components.name(), "MyLib");
//! assert_eq!(components.version().map(|v| v.to_string()), Some("1.2".to_string()));
//! assert!(components.culture().is_none());
//! # Ok::<(), asmident::Error>(())
//! ```

use bitflags::bitflags;

use crate::{
    metadata::identity::{
        AssemblyNameComponents, AssemblyVersion, ComponentName, Identifier, PublicKeyToken,
        UnknownComponentPolicy,
    },
    Error, Result,
};

bitflags! {
    /// Components that have already been registered with a [`ComponentBuilder`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ComponentSet: u8 {
        /// `Version` was set
        const VERSION = 0x01;
        /// `Culture` was set
        const CULTURE = 0x02;
        /// `PublicKeyToken` was set
        const PUBLIC_KEY_TOKEN = 0x04;
        /// `PublicKey` was set
        const PUBLIC_KEY = 0x08;
        /// `Retargetable` was set
        const RETARGETABLE = 0x10;
        /// `ProcessorArchitecture` was set
        const PROCESSOR_ARCHITECTURE = 0x20;
        /// `ContentType` was set
        const CONTENT_TYPE = 0x40;
    }
}

impl Default for ComponentSet {
    fn default() -> Self {
        ComponentSet::empty()
    }
}

impl From<ComponentName> for ComponentSet {
    fn from(name: ComponentName) -> Self {
        match name {
            ComponentName::Version => ComponentSet::VERSION,
            ComponentName::Culture => ComponentSet::CULTURE,
            ComponentName::PublicKeyToken => ComponentSet::PUBLIC_KEY_TOKEN,
            ComponentName::PublicKey => ComponentSet::PUBLIC_KEY,
            ComponentName::Retargetable => ComponentSet::RETARGETABLE,
            ComponentName::ProcessorArchitecture => ComponentSet::PROCESSOR_ARCHITECTURE,
            ComponentName::ContentType => ComponentSet::CONTENT_TYPE,
        }
    }
}

/// Collects the components of one assembly name.
///
/// Every component may be set at most once, and the simple name exactly once. This holds for
/// ignored unrecognized components too: their names are remembered case-insensitively.
#[derive(Debug, Default)]
pub struct ComponentBuilder {
    name: Option<String>,
    version: Option<AssemblyVersion>,
    culture: Option<String>,
    public_key_token: Option<PublicKeyToken>,
    public_key: Option<String>,
    retargetable: Option<String>,
    processor_architecture: Option<String>,
    content_type: Option<String>,
    seen: ComponentSet,
    ignored: Vec<String>,
    unknown_components: UnknownComponentPolicy,
}

impl ComponentBuilder {
    /// Create a builder that skips unrecognized component names.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with an explicit policy for unrecognized component names.
    #[must_use]
    pub fn with_unknown_policy(unknown_components: UnknownComponentPolicy) -> Self {
        ComponentBuilder {
            unknown_components,
            ..Self::default()
        }
    }

    /// The components registered so far.
    #[must_use]
    pub fn seen(&self) -> ComponentSet {
        self.seen
    }

    /// Register the simple name.
    ///
    /// # Errors
    /// Returns [`Error::EmptyAssemblyName`] if `name` is empty and was not quoted, and
    /// [`Error::Malformed`] if a name was already registered.
    pub fn set_name(&mut self, name: &Identifier) -> Result<()> {
        if self.name.is_some() {
            return Err(malformed_error!(
                "Assembly name registered twice (second at position {})",
                name.position
            ));
        }
        if name.text.is_empty() && !name.quoted {
            return Err(Error::EmptyAssemblyName {
                position: name.position,
            });
        }

        log::debug!("assembly name {:?}", name.text);
        self.name = Some(name.text.clone());
        Ok(())
    }

    /// Register the component `component` with `value`.
    ///
    /// # Errors
    /// - [`Error::UnrecognizedAssemblyComponent`] if the name is unknown and the policy rejects it
    /// - [`Error::DuplicateAssemblyComponent`] if the component was already set
    /// - [`Error::InvalidVersionFormat`] / [`Error::InvalidPublicKeyTokenFormat`] for bad values
    pub fn set(&mut self, component: &Identifier, value: &Identifier) -> Result<()> {
        let Ok(name) = component.text.parse::<ComponentName>() else {
            return match self.unknown_components {
                UnknownComponentPolicy::Reject => Err(Error::UnrecognizedAssemblyComponent {
                    component: component.text.clone(),
                    position: component.position,
                }),
                UnknownComponentPolicy::Ignore => {
                    let folded = component.text.to_ascii_lowercase();
                    if self.ignored.contains(&folded) {
                        return Err(Error::DuplicateAssemblyComponent {
                            component: component.text.clone(),
                            position: component.position,
                        });
                    }
                    self.ignored.push(folded);

                    log::debug!(
                        "ignoring unrecognized component {:?} at {}",
                        component.text,
                        component.position
                    );
                    Ok(())
                }
            };
        };

        let flag = ComponentSet::from(name);
        if self.seen.contains(flag) {
            return Err(Error::DuplicateAssemblyComponent {
                component: component.text.clone(),
                position: component.position,
            });
        }

        let text = &value.text;
        match name {
            ComponentName::Version => {
                self.version = Some(AssemblyVersion::parse_at(text, value.position)?);
            }
            ComponentName::Culture => {
                if !text.is_empty() && !text.eq_ignore_ascii_case("neutral") {
                    self.culture = Some(text.clone());
                }
            }
            ComponentName::PublicKeyToken => {
                if !text.eq_ignore_ascii_case("null") {
                    self.public_key_token = Some(PublicKeyToken::parse_at(text, value.position)?);
                }
            }
            ComponentName::PublicKey => self.public_key = Some(text.clone()),
            ComponentName::Retargetable => self.retargetable = Some(text.clone()),
            ComponentName::ProcessorArchitecture => {
                self.processor_architecture = Some(text.clone());
            }
            ComponentName::ContentType => self.content_type = Some(text.clone()),
        }

        log::debug!("component {} = {:?}", name, text);
        self.seen |= flag;
        Ok(())
    }

    /// Produce the immutable result.
    ///
    /// # Errors
    /// Returns [`Error::MissingAssemblyName`] if [`ComponentBuilder::set_name`] never succeeded.
    pub fn finalize(self) -> Result<AssemblyNameComponents> {
        let name = self.name.ok_or(Error::MissingAssemblyName)?;

        Ok(AssemblyNameComponents {
            name,
            version: self.version,
            culture: self.culture,
            public_key_token: self.public_key_token,
            public_key: self.public_key,
            retargetable: self.retargetable,
            processor_architecture: self.processor_architecture,
            content_type: self.content_type,
        })
    }
}
