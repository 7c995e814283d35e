//! Instance selection for [`Handle::open`](crate::Handle::open).

use std::fmt;
use std::path::{Path, PathBuf};

/// Descriptor that selects the in-memory instance.
pub const MEMORY_MARKER: &str = ":mem:";

/// Which engine instance to open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Ephemeral instance, nothing touches disk.
    Memory,
    /// Durable instance rooted at a data directory.
    Path(PathBuf),
}

impl Target {
    /// Parse a target descriptor.
    ///
    /// `":mem:"` selects [`Target::Memory`]; anything else is a data
    /// directory path.
    pub fn parse(descriptor: &str) -> Self {
        if descriptor == MEMORY_MARKER {
            Target::Memory
        } else {
            Target::Path(PathBuf::from(descriptor))
        }
    }

    /// Data directory, if this target is durable.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Target::Memory => None,
            Target::Path(p) => Some(p),
        }
    }
}

impl From<&str> for Target {
    fn from(descriptor: &str) -> Self {
        Target::parse(descriptor)
    }
}

impl From<&Path> for Target {
    fn from(path: &Path) -> Self {
        Target::Path(path.to_path_buf())
    }
}

impl From<PathBuf> for Target {
    fn from(path: PathBuf) -> Self {
        Target::Path(path)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Memory => f.write_str(MEMORY_MARKER),
            Target::Path(p) => write!(f, "{}", p.display()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_memory_marker() {
        assert_eq!(Target::parse(":mem:"), Target::Memory);
        assert_eq!(Target::parse(":mem:").path(), None);
    }

    #[test]
    fn test_parse_path() {
        let target = Target::parse("/var/data/kv");
        assert_eq!(target, Target::Path(PathBuf::from("/var/data/kv")));
        assert_eq!(target.to_string(), "/var/data/kv");
    }
}
