//! Parsed atom entries.

use crate::escape::ReservedWords;
use crate::mangle::Abi;
use crate::registry::RegistryDescriptor;

/// Symbols for one atom, one per convention
#[derive(Debug, Clone, PartialEq, Eq)]
struct Symbols {
    itanium: String,
    msvc64: String,
    msvc32: String,
}

/// One atom declaration found in a registry source file.
///
/// Symbols are computed once, at construction, from the raw identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomEntry {
    /// Accessor name in generated code, e.g. `nsGkAtoms_type_`
    pub qualified_name: String,
    /// Identifier as written in the source file, e.g. `type`
    pub raw_ident: String,
    /// String value the atom interns
    pub literal_value: String,
    pub owner_name: String,
    pub declared_type: String,
    /// Name of the registry this entry came from
    pub registry: String,
    symbols: Symbols,
}

impl AtomEntry {
    pub fn new(
        descriptor: &RegistryDescriptor,
        raw_ident: &str,
        literal_value: &str,
        reserved: &ReservedWords,
    ) -> Self {
        let qualified_name = format!("{}_{}", descriptor.owner_name, reserved.escape(raw_ident));

        let mangle = |abi: Abi| {
            let (owner, declared_type) = descriptor.mangling_target(abi);
            abi.mangle(owner, declared_type, raw_ident)
        };
        let symbols = Symbols {
            itanium: mangle(Abi::Itanium),
            msvc64: mangle(Abi::Msvc64),
            msvc32: mangle(Abi::Msvc32),
        };

        AtomEntry {
            qualified_name,
            raw_ident: raw_ident.to_string(),
            literal_value: literal_value.to_string(),
            owner_name: descriptor.owner_name.clone(),
            declared_type: descriptor.declared_type.clone(),
            registry: descriptor.name.clone(),
            symbols,
        }
    }

    /// The linker symbol of this atom under `abi`
    pub fn symbol(&self, abi: Abi) -> &str {
        match abi {
            Abi::Itanium => &self.symbols.itanium,
            Abi::Msvc64 => &self.symbols.msvc64,
            Abi::Msvc32 => &self.symbols.msvc32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mangle::parse_itanium_symbol;

    fn descriptor() -> RegistryDescriptor {
        RegistryDescriptor::new(
            "gk_atoms",
            r#"^GK_ATOM\((.+),\s*"(.*)"\)"#,
            "dist/include/nsGkAtomList.h",
            "nsGkAtoms",
            "nsIAtom",
        )
        .unwrap()
    }

    #[test]
    fn test_entry_symbols() {
        let atom = AtomEntry::new(&descriptor(), "body", "body", &ReservedWords::default());
        assert_eq!(atom.qualified_name, "nsGkAtoms_body");
        assert_eq!(atom.symbol(Abi::Itanium), "_ZN9nsGkAtoms4bodyE");
        assert_eq!(
            atom.symbol(Abi::Msvc64),
            "?body@nsGkAtoms@@2PEAVnsIAtom@@EA"
        );
        assert_eq!(atom.symbol(Abi::Msvc32), "?body@nsGkAtoms@@2PAVnsIAtom@@A");
    }

    #[test]
    fn test_reserved_ident_escapes_name_only() {
        let atom = AtomEntry::new(&descriptor(), "type", "type", &ReservedWords::default());
        assert_eq!(atom.qualified_name, "nsGkAtoms_type_");
        assert_eq!(atom.raw_ident, "type");
        assert_eq!(atom.symbol(Abi::Itanium), "_ZN9nsGkAtoms4typeE");
        assert_eq!(
            atom.symbol(Abi::Msvc64),
            "?type@nsGkAtoms@@2PEAVnsIAtom@@EA"
        );
        assert_eq!(atom.symbol(Abi::Msvc32), "?type@nsGkAtoms@@2PAVnsIAtom@@A");
        for abi in Abi::ALL {
            assert!(!atom.symbol(abi).contains("type_"));
        }
    }

    #[test]
    fn test_owner_is_never_escaped() {
        let desc = RegistryDescriptor::new("r", r"^A\((.+), (.+)\)", "a.h", "type", "T").unwrap();
        let atom = AtomEntry::new(&desc, "match", "match", &ReservedWords::default());
        assert_eq!(atom.qualified_name, "type_match_");
        assert_eq!(
            parse_itanium_symbol(atom.symbol(Abi::Itanium)),
            Some(("type".to_string(), "match".to_string()))
        );
    }

    #[test]
    fn test_override_applies_to_msvc_only() {
        let desc = RegistryDescriptor::new(
            "css_pseudo_elements",
            r#"^CSS_PSEUDO_ELEMENT\((.+),\s*"(.*)","#,
            "dist/include/nsCSSPseudoElementList.h",
            "nsCSSPseudoElements",
            "nsICSSPseudoElement",
        )
        .unwrap()
        .with_msvc_override("nsGkAtoms", "nsIAtom")
        .unwrap();
        let atom = AtomEntry::new(&desc, "after", ":after", &ReservedWords::default());

        assert_eq!(atom.declared_type, "nsICSSPseudoElement");
        assert_eq!(
            atom.symbol(Abi::Itanium),
            "_ZN19nsCSSPseudoElements5afterE"
        );
        assert_eq!(
            atom.symbol(Abi::Msvc64),
            "?after@nsGkAtoms@@2PEAVnsIAtom@@EA"
        );
        assert_eq!(atom.symbol(Abi::Msvc32), "?after@nsGkAtoms@@2PAVnsIAtom@@A");
    }
}
