//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioral family of a C compiler, selecting which flag conventions apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilerKind {
    /// GCC and anything that accepts GCC-style flags (cc, icc, `$CC`)
    Gcc,
    /// LLVM clang
    Clang,
    /// Microsoft cl.exe
    Msvc,
}

impl CompilerKind {
    /// Lowercase label used in logs and CLI output
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerKind::Gcc => "gcc",
            CompilerKind::Clang => "clang",
            CompilerKind::Msvc => "msvc",
        }
    }
}

impl fmt::Display for CompilerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompilerKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" | "cc" | "icc" => Ok(CompilerKind::Gcc),
            "clang" => Ok(CompilerKind::Clang),
            "msvc" | "cl" => Ok(CompilerKind::Msvc),
            _ => Err(crate::Error::Config(format!("unknown compiler kind: {}", s))),
        }
    }
}

/// A compiler that discovery may try, in priority order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerCandidate {
    /// Executable followed by any leading arguments (e.g. `["env", "ccache", "gcc"]`)
    pub path: Vec<String>,
    /// Flag conventions to use once selected
    pub kind: CompilerKind,
}

impl CompilerCandidate {
    /// Candidate made of a single executable name
    pub fn new(program: &str, kind: CompilerKind) -> Self {
        Self {
            path: vec![program.to_string()],
            kind,
        }
    }

    /// Candidate with an explicit argv prefix
    pub fn with_path(path: Vec<String>, kind: CompilerKind) -> Self {
        Self { path, kind }
    }

    /// Executable to spawn, if the path is non-empty
    pub fn program(&self) -> Option<&str> {
        self.path.first().map(String::as_str)
    }
}

/// Fallback candidates probed after the environment override and platform default
pub fn default_fallbacks() -> Vec<CompilerCandidate> {
    vec![
        CompilerCandidate::new("cc", CompilerKind::Gcc),
        CompilerCandidate::new("gcc", CompilerKind::Gcc),
        CompilerCandidate::new("gcc-4.9", CompilerKind::Gcc),
        CompilerCandidate::new("gcc-4.8", CompilerKind::Gcc),
        CompilerCandidate::new("gcc-4.7", CompilerKind::Gcc),
        CompilerCandidate::new("clang", CompilerKind::Clang),
        CompilerCandidate::new("icc", CompilerKind::Gcc),
    ]
}
