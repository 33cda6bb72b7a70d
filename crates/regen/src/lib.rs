//! Gecko Atom Regeneration
//!
//! Scans the atom list headers of a Gecko object directory and generates the
//! Rust module that links against the statically allocated atoms: extern
//! declarations for every supported ABI plus the `atom!` lookup macro.
//!
//! The pipeline is linear:
//!
//! 1. [`registry`] - which headers to scan and how their atoms are mangled
//! 2. [`parser`] - line-by-line scan into [`AtomEntry`] values
//! 3. [`mangle`] - linker symbols per [`Abi`]
//! 4. [`emit`] - the generated Rust module
//!
//! ```rust,ignore
//! use atomregen::RegenConfig;
//!
//! let generator = RegenConfig::default_config()?.build()?;
//! generator.write(Path::new("/path/to/objdir"), Path::new("atom_macro.rs"))?;
//! ```

pub mod atom;
pub mod config;
pub mod emit;
pub mod error;
pub mod escape;
pub mod mangle;
pub mod parser;
pub mod registry;

pub use atom::AtomEntry;
pub use config::{OutputOptions, RegenConfig};
pub use emit::AtomEmitter;
pub use error::RegenError;
pub use escape::ReservedWords;
pub use mangle::Abi;
pub use parser::{check_collisions, load_atoms, scan_registry};
pub use registry::{ManglingOverride, RegistryDescriptor};

use std::fs;
use std::path::Path;
use tracing::info;

/// A validated generator configuration.
///
/// Holds everything a run needs; nothing is read from global state, so
/// independent generators never interfere.
#[derive(Debug, Clone)]
pub struct Generator {
    descriptors: Vec<RegistryDescriptor>,
    reserved: ReservedWords,
    output: OutputOptions,
}

impl Generator {
    pub fn new(
        descriptors: Vec<RegistryDescriptor>,
        reserved: ReservedWords,
        output: OutputOptions,
    ) -> Self {
        Generator {
            descriptors,
            reserved,
            output,
        }
    }

    /// Registries in processing order
    pub fn descriptors(&self) -> &[RegistryDescriptor] {
        &self.descriptors
    }

    pub fn reserved_words(&self) -> &ReservedWords {
        &self.reserved
    }

    pub fn output_options(&self) -> &OutputOptions {
        &self.output
    }

    /// Load every atom under `base_dir`, rejecting name collisions
    pub fn load(&self, base_dir: &Path) -> Result<Vec<AtomEntry>, RegenError> {
        let atoms = load_atoms(base_dir, &self.descriptors, &self.reserved)?;
        check_collisions(&atoms)?;
        Ok(atoms)
    }

    /// Generate the module source for the registries under `base_dir`
    pub fn generate(&self, base_dir: &Path) -> Result<String, RegenError> {
        self.render(base_dir).map(|(source, _)| source)
    }

    /// Generate and write the module to `output_path`, replacing any
    /// existing file.
    ///
    /// Returns the number of atoms written.
    pub fn write(&self, base_dir: &Path, output_path: &Path) -> Result<usize, RegenError> {
        let (source, count) = self.render(base_dir)?;

        fs::write(output_path, source).map_err(|e| RegenError::Output {
            path: output_path.to_path_buf(),
            source: e,
        })?;

        info!(
            atoms = count,
            registries = self.descriptors.len(),
            path = %output_path.display(),
            "wrote atom declarations"
        );
        Ok(count)
    }

    /// Module source plus the number of atoms it declares
    fn render(&self, base_dir: &Path) -> Result<(String, usize), RegenError> {
        let atoms = self.load(base_dir)?;
        let source = AtomEmitter::new(&self.output).emit(&self.descriptors, &atoms)?;
        Ok((source, atoms.len()))
    }
}
