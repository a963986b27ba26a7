//! Pseudo-headers
//!
//! A pseudo-header is a throwaway C header whose only content is a list of
//! `#include` directives, letting the compiler process several headers as a
//! single translation unit.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use ccscan_core::Result;

/// Render `#include` lines for `headers`, `<...>` when `global`, `"..."` otherwise
pub fn headerize<S: AsRef<str>>(headers: &[S], global: bool) -> String {
    headers
        .iter()
        .map(|h| {
            if global {
                format!("#include <{}>", h.as_ref())
            } else {
                format!("#include \"{}\"", h.as_ref())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pseudo-header written to disk, removed when dropped
#[derive(Debug)]
pub struct PseudoHeader {
    path: PathBuf,
}

impl PseudoHeader {
    /// Create (or overwrite) `dir/name` with `contents`, flushed and closed
    pub fn create(dir: &Path, name: &str, contents: &str) -> Result<Self> {
        let path = dir.join(name);
        let mut file = File::create(&path)?;
        // Owns the path from here so a failed write still cleans up
        let header = Self { path };
        file.write_all(contents.as_bytes())?;
        file.flush()?;
        drop(file);

        debug!("Wrote pseudo-header {:?} ({} bytes)", header.path, contents.len());
        Ok(header)
    }

    /// Location on disk
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PseudoHeader {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove pseudo-header {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_headerize_global() {
        assert_eq!(
            headerize(&["stdio.h", "math.h"], true),
            "#include <stdio.h>\n#include <math.h>"
        );
    }

    #[test]
    fn test_headerize_local() {
        assert_eq!(
            headerize(&["vim.h", "memory.h"], false),
            "#include \"vim.h\"\n#include \"memory.h\""
        );
    }

    #[test]
    fn test_headerize_empty() {
        let none: [&str; 0] = [];
        assert_eq!(headerize(&none, true), "");
    }

    #[test]
    fn test_pseudo_header_lifecycle() {
        let temp = TempDir::new().unwrap();
        let path;
        {
            let header =
                PseudoHeader::create(temp.path(), "tmp_pseudoheader.h", "#define X 1\n").unwrap();
            path = header.path().to_path_buf();
            assert_eq!(std::fs::read_to_string(&path).unwrap(), "#define X 1\n");
        }
        assert!(!path.exists());
    }

    #[test]
    fn test_pseudo_header_missing_dir() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        assert!(PseudoHeader::create(&missing, "h.h", "").is_err());
    }
}
