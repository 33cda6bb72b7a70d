//! Registry descriptors
//!
//! A registry is one family of atom declarations: a header in the object
//! directory, a line pattern that recognises its declaration macro, and the
//! owner class and pointer type its atoms are compiled as.
//!
//! # Mangling overrides
//!
//! Some families are exposed under their own owner and type but are stored
//! in another class's atom table when built with MSVC. Such a registry
//! carries a [`ManglingOverride`]; the Microsoft conventions mangle under the
//! override while the Itanium convention keeps the registry's own owner.

use crate::error::RegenError;
use crate::mangle::Abi;
use regex::Regex;

/// Owner and type to mangle under for the Microsoft conventions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManglingOverride {
    pub owner_name: String,
    pub declared_type: String,
}

/// Static metadata for one registry
#[derive(Debug, Clone)]
pub struct RegistryDescriptor {
    /// Registry name used in diagnostics (e.g., "gk_atoms")
    pub name: String,
    /// Line pattern capturing (identifier, literal value)
    pattern: Regex,
    /// Source file, relative to the object directory
    pub source_path: String,
    /// Class the atoms are static members of
    pub owner_name: String,
    /// Pointee type of each static member
    pub declared_type: String,
    /// Microsoft-only owner/type substitution
    pub msvc_override: Option<ManglingOverride>,
}

impl RegistryDescriptor {
    /// Create a descriptor, compiling and validating `pattern`.
    ///
    /// The pattern must have exactly two capture groups, identifier first.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        source_path: impl Into<String>,
        owner_name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Result<Self, RegenError> {
        let name = name.into();
        let owner_name = owner_name.into();
        let declared_type = declared_type.into();

        if name.trim().is_empty() {
            return Err(RegenError::InvalidConfig(
                "registry name cannot be empty".to_string(),
            ));
        }
        if owner_name.is_empty() || declared_type.is_empty() {
            return Err(RegenError::InvalidConfig(format!(
                "registry '{}' needs a non-empty owner and declared type",
                name
            )));
        }

        let pattern = Regex::new(pattern).map_err(|e| RegenError::InvalidPattern {
            registry: name.clone(),
            reason: e.to_string(),
        })?;
        // captures_len counts the implicit whole-match group
        let groups = pattern.captures_len() - 1;
        if groups != 2 {
            return Err(RegenError::InvalidPattern {
                registry: name,
                reason: format!(
                    "expected 2 capture groups (identifier, value), found {}",
                    groups
                ),
            });
        }

        Ok(RegistryDescriptor {
            name,
            pattern,
            source_path: source_path.into(),
            owner_name,
            declared_type,
            msvc_override: None,
        })
    }

    /// Mangle under a different owner/type for MSVC (builder pattern)
    pub fn with_msvc_override(
        mut self,
        owner_name: impl Into<String>,
        declared_type: impl Into<String>,
    ) -> Result<Self, RegenError> {
        let owner_name = owner_name.into();
        let declared_type = declared_type.into();
        if owner_name.is_empty() || declared_type.is_empty() {
            return Err(RegenError::InvalidConfig(format!(
                "registry '{}' has an empty MSVC override",
                self.name
            )));
        }
        self.msvc_override = Some(ManglingOverride {
            owner_name,
            declared_type,
        });
        Ok(self)
    }

    /// The (owner, type) pair symbols are mangled under for `abi`.
    pub fn mangling_target(&self, abi: Abi) -> (&str, &str) {
        match &self.msvc_override {
            Some(ov) if abi.is_msvc() => (ov.owner_name.as_str(), ov.declared_type.as_str()),
            _ => (self.owner_name.as_str(), self.declared_type.as_str()),
        }
    }

    /// Match one source line, returning (identifier, value).
    pub fn capture<'l>(&self, line: &'l str) -> Option<(&'l str, &'l str)> {
        let caps = self.pattern.captures(line)?;
        let ident = caps.get(1)?.as_str();
        let value = caps.get(2)?.as_str();
        Some((ident, value))
    }
}
