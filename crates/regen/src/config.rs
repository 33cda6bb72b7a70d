//! Generator configuration
//!
//! Registries, reserved words and the names used in generated code are data,
//! loaded from TOML. The defaults ship embedded in the binary; a user file
//! given with `--config` is merged on top of them.
//!
//! # Example
//!
//! ```toml
//! reserved_words = ["async"]
//!
//! [[registry]]
//! name = "html_atoms"
//! pattern = '^HTML_ATOM\((.+),\s*"(.*)"\)'
//! source = "dist/include/nsHtml5AtomList.h"
//! owner = "nsHtml5Atoms"
//! declared_type = "nsIAtom"
//! ```
//!
//! A registry with the same `name` as a default one replaces it in place;
//! new registries are appended after the defaults.

use crate::Generator;
use crate::error::RegenError;
use crate::escape::ReservedWords;
use crate::registry::RegistryDescriptor;
use serde::Deserialize;
use std::collections::HashSet;

/// Embedded default registries
pub static DEFAULT_REGISTRIES: &str = include_str!("registries.toml");

/// Owner/type pair a registry mangles under for MSVC
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OverrideSpec {
    pub owner: String,
    pub declared_type: String,
}

/// One `[[registry]]` table
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistrySpec {
    pub name: String,
    pub pattern: String,
    pub source: String,
    pub owner: String,
    pub declared_type: String,
    #[serde(default)]
    pub msvc_override: Option<OverrideSpec>,
}

impl RegistrySpec {
    fn build(&self) -> Result<RegistryDescriptor, RegenError> {
        let descriptor = RegistryDescriptor::new(
            &self.name,
            &self.pattern,
            &self.source,
            &self.owner,
            &self.declared_type,
        )?;
        match &self.msvc_override {
            Some(ov) => descriptor.with_msvc_override(&ov.owner, &ov.declared_type),
            None => Ok(descriptor),
        }
    }
}

/// Names used in the generated Rust file
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// The default atom type; every other declared type gets a stand-in enum
    pub atom_type: String,
    /// Import path for `atom_type`
    pub atom_type_path: String,
    /// Owned handle type the lookup macro produces
    pub handle_type: String,
    /// Import path for `handle_type`
    pub handle_path: String,
    /// Name of the pointer-to-handle conversion function
    pub wrapper_fn: String,
    /// Name of the exported lookup macro
    pub macro_name: String,
    /// Module the generated file is mounted as, relative to `$crate`
    pub module_path: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        OutputOptions {
            atom_type: "nsIAtom".to_string(),
            atom_type_path: "crate::gecko_bindings::structs::nsIAtom".to_string(),
            handle_type: "Atom".to_string(),
            handle_path: "crate::Atom".to_string(),
            wrapper_fn: "unsafe_atom_from_static".to_string(),
            macro_name: "atom".to_string(),
            module_path: "atom_macro".to_string(),
        }
    }
}

/// Parsed configuration, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegenConfig {
    #[serde(default)]
    pub reserved_words: Vec<String>,
    #[serde(default)]
    pub output: Option<OutputOptions>,
    #[serde(rename = "registry", default)]
    pub registries: Vec<RegistrySpec>,
}

impl RegenConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, RegenError> {
        toml::from_str(toml_str)
            .map_err(|e| RegenError::InvalidConfig(format!("failed to parse TOML: {}", e)))
    }

    /// Load the embedded default configuration
    pub fn default_config() -> Result<Self, RegenError> {
        Self::from_toml(DEFAULT_REGISTRIES)
    }

    /// Merge another config into this one (user overrides)
    pub fn merge(&mut self, other: RegenConfig) {
        for registry in other.registries {
            if let Some(existing) = self.registries.iter_mut().find(|r| r.name == registry.name) {
                *existing = registry;
            } else {
                self.registries.push(registry);
            }
        }

        for word in other.reserved_words {
            if !self.reserved_words.contains(&word) {
                self.reserved_words.push(word);
            }
        }

        if other.output.is_some() {
            self.output = other.output;
        }
    }

    /// Validate the configuration and compile it into a [`Generator`]
    pub fn build(&self) -> Result<Generator, RegenError> {
        if self.registries.is_empty() {
            return Err(RegenError::InvalidConfig(
                "at least one registry must be configured".to_string(),
            ));
        }

        let mut names = HashSet::new();
        for registry in &self.registries {
            if !names.insert(registry.name.as_str()) {
                return Err(RegenError::InvalidConfig(format!(
                    "registry '{}' is defined more than once",
                    registry.name
                )));
            }
        }

        let descriptors = self
            .registries
            .iter()
            .map(RegistrySpec::build)
            .collect::<Result<Vec<_>, _>>()?;

        let output = self.output.clone().unwrap_or_default();
        if output.atom_type.is_empty() || output.handle_type.is_empty() {
            return Err(RegenError::InvalidConfig(
                "output atom_type and handle_type cannot be empty".to_string(),
            ));
        }

        Ok(Generator::new(
            descriptors,
            ReservedWords::new(self.reserved_words.iter().cloned()),
            output,
        ))
    }
}
