//! Per-kind flag tables

use ccscan_core::CompilerKind;

/// Command-line conventions of a compiler family
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Argument of the discovery probe
    pub version_flag: &'static str,
    /// Makes the compiler print Makefile dependencies of a header
    pub dependency_flag: &'static str,
    /// Dumps every macro active after preprocessing
    pub macro_dump_flags: &'static [&'static str],
    /// Dumps preprocessed source without line markers
    pub declaration_dump_flags: &'static [&'static str],
    pub define_prefix: &'static str,
    pub undefine_prefix: &'static str,
    pub include_prefix: &'static str,
}

impl Capabilities {
    pub const GCC: Capabilities = Capabilities {
        version_flag: "-v",
        dependency_flag: "-M",
        macro_dump_flags: &["-std=c99", "-dM", "-E"],
        declaration_dump_flags: &["-std=c99", "-P", "-E"],
        define_prefix: "-D",
        undefine_prefix: "-U",
        include_prefix: "-I",
    };

    // Clang and cl.exe are driven through their GCC-compatible flags for now.
    pub const CLANG: Capabilities = Capabilities::GCC;
    pub const MSVC: Capabilities = Capabilities::GCC;

    /// Table for a compiler kind
    pub fn for_kind(kind: CompilerKind) -> &'static Capabilities {
        match kind {
            CompilerKind::Gcc => &Self::GCC,
            CompilerKind::Clang => &Self::CLANG,
            CompilerKind::Msvc => &Self::MSVC,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcc_table() {
        let caps = Capabilities::for_kind(CompilerKind::Gcc);
        assert_eq!(caps.version_flag, "-v");
        assert_eq!(caps.dependency_flag, "-M");
        assert_eq!(caps.macro_dump_flags, &["-std=c99", "-dM", "-E"]);
        assert_eq!(caps.declaration_dump_flags, &["-std=c99", "-P", "-E"]);
    }

    #[test]
    fn test_all_kinds_share_gcc_flags() {
        for kind in [CompilerKind::Clang, CompilerKind::Msvc] {
            assert_eq!(Capabilities::for_kind(kind), &Capabilities::GCC);
        }
    }
}
