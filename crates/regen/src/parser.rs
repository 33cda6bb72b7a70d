//! Registry source scanning
//!
//! Registry headers mix atom declarations with comments, include guards and
//! unrelated macros. Every line is tried against the registry's pattern;
//! lines that do not match are skipped silently.
//!
//! Entries come out in descriptor order, then line order within each file.
//! That order is carried verbatim into the generated file.

use crate::atom::AtomEntry;
use crate::error::RegenError;
use crate::escape::ReservedWords;
use crate::registry::RegistryDescriptor;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Collect every atom declared in `source` by `descriptor`'s pattern
pub fn scan_registry(
    descriptor: &RegistryDescriptor,
    source: &str,
    reserved: &ReservedWords,
) -> Vec<AtomEntry> {
    source
        .lines()
        .filter_map(|line| descriptor.capture(line))
        .map(|(ident, value)| AtomEntry::new(descriptor, ident, value, reserved))
        .collect()
}

/// Read and scan every registry under `base_dir`, in descriptor order.
///
/// A missing or unreadable source aborts the whole load. Bytes that are not
/// valid UTF-8 are replaced rather than rejected; they only ever occur in
/// comments, never in atom declarations.
pub fn load_atoms(
    base_dir: &Path,
    descriptors: &[RegistryDescriptor],
    reserved: &ReservedWords,
) -> Result<Vec<AtomEntry>, RegenError> {
    let mut atoms = Vec::new();

    for descriptor in descriptors {
        let path = base_dir.join(&descriptor.source_path);
        let bytes = fs::read(&path).map_err(|e| RegenError::SourceNotFound {
            registry: descriptor.name.clone(),
            path: path.clone(),
            source: e,
        })?;
        let source = String::from_utf8_lossy(&bytes);

        let found = scan_registry(descriptor, &source, reserved);
        debug!(
            registry = %descriptor.name,
            path = %path.display(),
            atoms = found.len(),
            "scanned registry"
        );
        atoms.extend(found);
    }

    Ok(atoms)
}

/// Reject entries whose generated names collide.
pub fn check_collisions(atoms: &[AtomEntry]) -> Result<(), RegenError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for atom in atoms {
        if let Some(first) = seen.insert(atom.qualified_name.as_str(), atom.registry.as_str()) {
            return Err(RegenError::DuplicateAtom {
                name: atom.qualified_name.clone(),
                first: first.to_string(),
                second: atom.registry.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mangle::Abi;

    fn gk_atoms() -> RegistryDescriptor {
        RegistryDescriptor::new(
            "gk_atoms",
            r#"^GK_ATOM\((.+),\s*"(.*)"\)"#,
            "nsGkAtomList.h",
            "nsGkAtoms",
            "nsIAtom",
        )
        .unwrap()
    }

    #[test]
    fn test_scan_skips_unrelated_lines() {
        let source = r#"/* License boilerplate */
#ifndef nsGkAtomList_h
GK_ATOM(_empty, "")
// GK_ATOM(commented, "commented")
GK_ATOM(body, "body")

GK_ATOM(div, "div")
"#;
        let atoms = scan_registry(&gk_atoms(), source, &ReservedWords::default());
        let names: Vec<_> = atoms.iter().map(|a| a.qualified_name.as_str()).collect();
        assert_eq!(names, vec!["nsGkAtoms__empty", "nsGkAtoms_body", "nsGkAtoms_div"]);
        assert_eq!(atoms[0].literal_value, "");
    }

    #[test]
    fn test_scan_handles_crlf() {
        let source = "GK_ATOM(body, \"body\")\r\nGK_ATOM(head, \"head\")\r\n";
        let atoms = scan_registry(&gk_atoms(), source, &ReservedWords::default());
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[1].literal_value, "head");
    }

    #[test]
    fn test_scan_does_not_deduplicate() {
        let source = "GK_ATOM(body, \"body\")\nGK_ATOM(body, \"body\")\n";
        let atoms = scan_registry(&gk_atoms(), source, &ReservedWords::default());
        assert_eq!(atoms.len(), 2);
        assert!(check_collisions(&atoms).is_err());
    }

    #[test]
    fn test_scan_escapes_reserved() {
        let source = "GK_ATOM(type, \"type\")\n";
        let atoms = scan_registry(&gk_atoms(), source, &ReservedWords::default());
        assert_eq!(atoms[0].qualified_name, "nsGkAtoms_type_");
        assert_eq!(atoms[0].symbol(Abi::Itanium), "_ZN9nsGkAtoms4typeE");
    }

    #[test]
    fn test_check_collisions_reports_both_registries() {
        let other = RegistryDescriptor::new(
            "extra",
            r#"^EXTRA_ATOM\((.+),\s*"(.*)"\)"#,
            "extra.h",
            "nsGkAtoms",
            "nsIAtom",
        )
        .unwrap();
        let reserved = ReservedWords::default();
        let mut atoms = scan_registry(&gk_atoms(), "GK_ATOM(body, \"body\")", &reserved);
        atoms.extend(scan_registry(&other, "EXTRA_ATOM(body, \"body2\")", &reserved));

        match check_collisions(&atoms) {
            Err(RegenError::DuplicateAtom {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "nsGkAtoms_body");
                assert_eq!(first, "gk_atoms");
                assert_eq!(second, "extra");
            }
            other => panic!("Expected DuplicateAtom, got {:?}", other),
        }
    }

    #[test]
    fn test_check_collisions_accepts_distinct_owners() {
        let other = RegistryDescriptor::new(
            "pseudo",
            r#"^PSEUDO\((.+),\s*"(.*)"\)"#,
            "pseudo.h",
            "nsCSSPseudoElements",
            "nsICSSPseudoElement",
        )
        .unwrap();
        let reserved = ReservedWords::default();
        let mut atoms = scan_registry(&gk_atoms(), "GK_ATOM(after, \"after\")", &reserved);
        atoms.extend(scan_registry(&other, "PSEUDO(after, \":after\")", &reserved));
        assert!(check_collisions(&atoms).is_ok());
    }
}
