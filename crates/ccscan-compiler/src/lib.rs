//! ccscan Compiler
//!
//! Locates a C compiler on the host and drives it to list header dependencies
//! and to dump the macros and declarations of a set of headers, in a form a
//! foreign-function binding generator can consume.
//!
//! ## Modules
//!
//! - `shell` - POSIX quoting for logged command lines
//! - `depfile` - `-M` dependency output parser
//! - `headers` - pseudo-header generation and its scoped temp file
//! - `defines` - `-D` / `-U` directives and the compatibility set
//! - `capabilities` - per-kind flag tables
//! - `invoke` - process execution with retry
//! - `profile` - one selected compiler and its accumulated flags
//! - `discovery` - candidate list and selection
//! - `toolchain` - the public facade

pub mod capabilities;
pub mod defines;
pub mod depfile;
pub mod discovery;
pub mod headers;
pub mod invoke;
pub mod profile;
pub mod shell;
pub mod toolchain;

pub use capabilities::Capabilities;
pub use defines::MacroDirective;
pub use headers::headerize;
pub use invoke::Invoker;
pub use profile::CompilerProfile;
pub use toolchain::Toolchain;
