//! Linker symbol names for static atom members
//!
//! Each atom lives in the foreign toolchain as a static data member of an
//! owner class, e.g. `nsGkAtoms::body` of type `nsIAtom*`. The symbol that
//! member ends up with depends on the binary interface it was compiled for:
//!
//! | ABI | Shape | `nsGkAtoms::body` |
//! |-----|-------|-------------------|
//! | Itanium | `_ZN<len><owner><len><ident>E` | `_ZN9nsGkAtoms4bodyE` |
//! | MSVC, 64-bit | `?<ident>@<owner>@@2PEAV<type>@@EA` | `?body@nsGkAtoms@@2PEAVnsIAtom@@EA` |
//! | MSVC, 32-bit | `?<ident>@<owner>@@2PAV<type>@@A` | `?body@nsGkAtoms@@2PAVnsIAtom@@A` |
//!
//! The Itanium encoding never mentions the member's type; both Microsoft
//! encodings do. Lengths are byte lengths, identifiers are plain ASCII.
//!
//! Everything here is a pure string computation. Which owner and type a
//! registry mangles under is decided by
//! [`RegistryDescriptor::mangling_target`](crate::registry::RegistryDescriptor::mangling_target).

use std::fmt;

/// A binary interface whose symbol naming the generator reproduces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Abi {
    /// GCC/Clang on every non-MSVC target
    Itanium,
    /// MSVC with 64-bit pointers
    Msvc64,
    /// MSVC with 32-bit pointers
    Msvc32,
}

impl Abi {
    /// All conventions, in the order their declaration blocks are emitted.
    pub const ALL: [Abi; 3] = [Abi::Itanium, Abi::Msvc64, Abi::Msvc32];

    /// Whether this is one of the Microsoft conventions
    pub fn is_msvc(self) -> bool {
        matches!(self, Abi::Msvc64 | Abi::Msvc32)
    }

    /// The `cfg` predicate selecting this block inside `cfg_if!`.
    ///
    /// `None` for the final `else` arm. The predicates are only meaningful in
    /// [`Abi::ALL`] order: the 64-bit test relies on the non-MSVC arm having
    /// been ruled out first.
    pub fn cfg_predicate(self) -> Option<&'static str> {
        match self {
            Abi::Itanium => Some(r#"not(target_env = "msvc")"#),
            Abi::Msvc64 => Some(r#"target_pointer_width = "64""#),
            Abi::Msvc32 => None,
        }
    }

    /// Mangle `owner::ident` of type `declared_type*` for this convention.
    pub fn mangle(self, owner: &str, declared_type: &str, ident: &str) -> String {
        match self {
            Abi::Itanium => itanium_symbol(owner, ident),
            Abi::Msvc64 => msvc64_symbol(owner, declared_type, ident),
            Abi::Msvc32 => msvc32_symbol(owner, declared_type, ident),
        }
    }
}

impl fmt::Display for Abi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Abi::Itanium => "itanium",
            Abi::Msvc64 => "msvc64",
            Abi::Msvc32 => "msvc32",
        };
        f.write_str(name)
    }
}

/// Itanium nested name for a static data member.
pub fn itanium_symbol(owner: &str, ident: &str) -> String {
    format!("_ZN{}{}{}{}E", owner.len(), owner, ident.len(), ident)
}

/// MSVC name for a static `T*` member, 64-bit pointers.
pub fn msvc64_symbol(owner: &str, declared_type: &str, ident: &str) -> String {
    format!("?{}@{}@@2PEAV{}@@EA", ident, owner, declared_type)
}

/// MSVC name for a static `T*` member, 32-bit pointers.
pub fn msvc32_symbol(owner: &str, declared_type: &str, ident: &str) -> String {
    format!("?{}@{}@@2PAV{}@@A", ident, owner, declared_type)
}

/// Recover `(owner, ident)` from a symbol produced by [`itanium_symbol`].
///
/// Returns `None` unless the input is exactly a two-component nested name.
pub fn parse_itanium_symbol(symbol: &str) -> Option<(String, String)> {
    let rest = symbol.strip_prefix("_ZN")?;
    let (owner, rest) = take_source_name(rest)?;
    let (ident, rest) = take_source_name(rest)?;
    if rest != "E" {
        return None;
    }
    Some((owner.to_string(), ident.to_string()))
}

/// Split one `<len><name>` component off the front of `s`.
fn take_source_name(s: &str) -> Option<(&str, &str)> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 || s.starts_with('0') {
        return None;
    }
    let len: usize = s[..digits].parse().ok()?;
    let body = &s[digits..];
    let name = body.get(..len)?;
    Some((name, &body[len..]))
}
