//! Rust declarations for static atoms
//!
//! The generated module has four parts, always in this order:
//!
//! 1. `pub enum T {}` stand-ins for every declared type other than the
//!    default atom type, so the extern statics below have a pointee type
//! 2. the `#[inline(always)]` wrapper turning a static atom pointer into
//!    an owned handle
//! 3. a `cfg_if!` with one `unsafe extern "C"` block per [`Abi`], each binding
//!    every atom to its symbol for that ABI through `#[link_name]`
//! 4. an exported `macro_rules!` mapping each atom's string value to an
//!    expression that wraps the matching static
//!
//! The ABI is chosen by `cfg` when the consumer compiles the module, never
//! here: only one of the three blocks can link for a given target.
//!
//! Literal values are copied into the macro verbatim. They come from C
//! string literals, whose escapes mean the same thing in Rust for every
//! value found in the atom lists.

use crate::atom::AtomEntry;
use crate::config::OutputOptions;
use crate::error::RegenError;
use crate::mangle::Abi;
use crate::registry::RegistryDescriptor;
use std::collections::HashSet;
use std::fmt::Write as _;
use tracing::warn;

/// First line of every generated file
pub const GENERATED_BANNER: &str = "/* Generated by regen-atoms. Do not edit. */";

/// Writes the generated module for a list of atoms
pub struct AtomEmitter<'a> {
    options: &'a OutputOptions,
}

impl<'a> AtomEmitter<'a> {
    pub fn new(options: &'a OutputOptions) -> Self {
        AtomEmitter { options }
    }

    /// Generate the whole module.
    ///
    /// The output depends only on its inputs; identical inputs give
    /// byte-identical files.
    pub fn emit(
        &self,
        descriptors: &[RegistryDescriptor],
        atoms: &[AtomEntry],
    ) -> Result<String, RegenError> {
        let mut out = String::new();

        self.emit_header(&mut out)?;
        self.emit_stand_in_types(&mut out, descriptors)?;
        self.emit_wrapper(&mut out)?;
        self.emit_linkage(&mut out, atoms)?;
        self.emit_lookup_macro(&mut out, atoms)?;

        Ok(out)
    }

    fn emit_header(&self, out: &mut String) -> Result<(), RegenError> {
        writeln!(out, "{}", GENERATED_BANNER)?;
        writeln!(out)?;
        writeln!(out, "use {};", self.options.atom_type_path)?;
        writeln!(out, "use {};", self.options.handle_path)?;
        writeln!(out)?;
        Ok(())
    }

    /// One opaque enum per non-default declared type, in registry order
    fn emit_stand_in_types(
        &self,
        out: &mut String,
        descriptors: &[RegistryDescriptor],
    ) -> Result<(), RegenError> {
        let mut declared = HashSet::new();
        for descriptor in descriptors {
            let ty = descriptor.declared_type.as_str();
            if ty == self.options.atom_type || !declared.insert(ty) {
                continue;
            }
            writeln!(out, "pub enum {} {{}}", ty)?;
            writeln!(out)?;
        }
        Ok(())
    }

    fn emit_wrapper(&self, out: &mut String) -> Result<(), RegenError> {
        let opts = self.options;
        writeln!(out, "#[inline(always)]")?;
        writeln!(
            out,
            "pub fn {}(ptr: *mut {}) -> {} {{",
            opts.wrapper_fn, opts.atom_type, opts.handle_type
        )?;
        writeln!(out, "    unsafe {{ {}::from_static(ptr) }}", opts.handle_type)?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn emit_linkage(&self, out: &mut String, atoms: &[AtomEntry]) -> Result<(), RegenError> {
        writeln!(out, "cfg_if! {{")?;
        for (i, abi) in Abi::ALL.into_iter().enumerate() {
            let keyword = if i == 0 { "if" } else { "} else if" };
            match abi.cfg_predicate() {
                Some(predicate) => writeln!(out, "    {} #[cfg({})] {{", keyword, predicate)?,
                None => writeln!(out, "    }} else {{")?,
            }
            self.emit_extern_block(out, atoms, abi)?;
        }
        writeln!(out, "    }}")?;
        writeln!(out, "}}")?;
        writeln!(out)?;
        Ok(())
    }

    fn emit_extern_block(
        &self,
        out: &mut String,
        atoms: &[AtomEntry],
        abi: Abi,
    ) -> Result<(), RegenError> {
        writeln!(out, "        unsafe extern \"C\" {{")?;
        for atom in atoms {
            writeln!(out, "            #[link_name = \"{}\"]", atom.symbol(abi))?;
            writeln!(
                out,
                "            pub static {}: *mut {};",
                atom.qualified_name, atom.declared_type
            )?;
        }
        writeln!(out, "        }}")?;
        Ok(())
    }

    /// The lookup macro; the first atom with a given value wins
    fn emit_lookup_macro(&self, out: &mut String, atoms: &[AtomEntry]) -> Result<(), RegenError> {
        let module = if self.options.module_path.is_empty() {
            "$crate".to_string()
        } else {
            format!("$crate::{}", self.options.module_path)
        };

        writeln!(out, "#[macro_export]")?;
        writeln!(out, "macro_rules! {} {{", self.options.macro_name)?;

        let mut mapped: HashSet<&str> = HashSet::new();
        for atom in atoms {
            if !mapped.insert(atom.literal_value.as_str()) {
                warn!(
                    value = %atom.literal_value,
                    atom = %atom.qualified_name,
                    "value already mapped by an earlier atom; skipping macro arm"
                );
                continue;
            }
            writeln!(
                out,
                "    (\"{value}\") => {{ {m}::{wrap}(unsafe {{ {m}::{name} as *mut _ }}) }};",
                value = atom.literal_value,
                m = module,
                wrap = self.options.wrapper_fn,
                name = atom.qualified_name,
            )?;
        }

        writeln!(out, "}}")?;
        Ok(())
    }
}
