//! Error types for atom regeneration.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for every stage of the generator.
///
/// Every variant is fatal: a partial set of linkage declarations is worse
/// than none, so nothing here is recovered from locally.
#[derive(Debug)]
pub enum RegenError {
    /// A registry source file is missing or unreadable
    SourceNotFound {
        registry: String,
        path: PathBuf,
        source: io::Error,
    },
    /// Wrong number of command-line arguments; carries the usage text
    MalformedInvocation(String),
    /// Configuration failed to parse or describes an invalid registry
    InvalidConfig(String),
    /// A registry pattern did not compile or has the wrong capture groups
    InvalidPattern { registry: String, reason: String },
    /// Two entries resolved to the same qualified name
    DuplicateAtom {
        name: String,
        first: String,
        second: String,
    },
    /// The generated artifact could not be written
    Output { path: PathBuf, source: io::Error },
    /// A formatting error while building the artifact in memory
    Format(fmt::Error),
}

impl fmt::Display for RegenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegenError::SourceNotFound {
                registry,
                path,
                source,
            } => write!(
                f,
                "Failed to read {} registry source {}: {}",
                registry,
                path.display(),
                source
            ),
            RegenError::MalformedInvocation(usage) => write!(f, "{}", usage),
            RegenError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            RegenError::InvalidPattern { registry, reason } => {
                write!(f, "Invalid pattern for registry '{}': {}", registry, reason)
            }
            RegenError::DuplicateAtom {
                name,
                first,
                second,
            } => write!(
                f,
                "Atom '{}' is declared by registry '{}' and again by registry '{}'",
                name, first, second
            ),
            RegenError::Output { path, source } => {
                write!(f, "Failed to write {}: {}", path.display(), source)
            }
            RegenError::Format(e) => write!(f, "Declaration generation error: {}", e),
        }
    }
}

impl std::error::Error for RegenError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RegenError::SourceNotFound { source, .. } | RegenError::Output { source, .. } => {
                Some(source)
            }
            RegenError::Format(e) => Some(e),
            _ => None,
        }
    }
}

impl From<fmt::Error> for RegenError {
    fn from(e: fmt::Error) -> Self {
        RegenError::Format(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_not_found_message() {
        let err = RegenError::SourceNotFound {
            registry: "gk_atoms".to_string(),
            path: PathBuf::from("/obj/dist/include/nsGkAtomList.h"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let msg = err.to_string();
        assert!(msg.contains("gk_atoms"));
        assert!(msg.contains("/obj/dist/include/nsGkAtomList.h"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_duplicate_atom_message() {
        let err = RegenError::DuplicateAtom {
            name: "nsGkAtoms_body".to_string(),
            first: "gk_atoms".to_string(),
            second: "extra".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Atom 'nsGkAtoms_body' is declared by registry 'gk_atoms' and again by registry 'extra'"
        );
    }
}
