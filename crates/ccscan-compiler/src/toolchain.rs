//! Toolchain facade
//!
//! The entry point a binding generator uses: discover once, then list header
//! dependencies and preprocess headers through the selected compiler.

use std::path::Path;

use ccscan_core::{Config, Result};

use crate::defines::MacroDirective;
use crate::discovery;
use crate::profile::CompilerProfile;

/// The selected compiler, owned by the caller for as long as it is needed
#[derive(Debug)]
pub struct Toolchain {
    compiler: CompilerProfile,
}

impl Toolchain {
    /// Discover a compiler and apply the configured include paths and defines
    pub fn discover(config: &Config) -> Result<Self> {
        Ok(Self::with_config(discovery::discover(config)?, config))
    }

    /// Like [`Toolchain::discover`], reading the override variable through `lookup`
    pub fn discover_with<F>(config: &Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::with_config(
            discovery::discover_with(config, lookup)?,
            config,
        ))
    }

    /// Wrap an already constructed profile
    pub fn new(compiler: CompilerProfile) -> Self {
        Self { compiler }
    }

    fn with_config(mut compiler: CompilerProfile, config: &Config) -> Self {
        compiler.add_to_include_path(&config.preprocess.include_paths);
        let mut toolchain = Self { compiler };
        for spec in &config.preprocess.defines {
            toolchain.apply(&MacroDirective::parse(spec));
        }
        toolchain
    }

    pub fn compiler(&self) -> &CompilerProfile {
        &self.compiler
    }

    /// Headers that `header` pulls in
    pub fn includes(&self, header: &str) -> Result<Vec<String>> {
        self.compiler.dependencies(header)
    }

    /// `(declarations, defines)` for `headers` preprocessed after `previous_defines`
    pub fn preprocess<S: AsRef<str>>(
        &self,
        previous_defines: &str,
        headers: &[S],
    ) -> Result<(String, String)> {
        self.compiler.preprocess(previous_defines, headers)
    }

    pub fn add_to_include_path<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.compiler.add_to_include_path(paths);
    }

    pub fn define(&mut self, name: &str, args: Option<&[&str]>, value: Option<&str>) {
        self.compiler.define(name, args, value);
    }

    pub fn undefine(&mut self, name: &str) {
        self.compiler.undefine(name);
    }

    pub fn apply(&mut self, directive: &MacroDirective) {
        self.compiler.apply(directive);
    }

    /// Strip the compiler's built-in macros from a `preprocess` defines dump
    pub fn filter_standard_defines(&self, defines: &str) -> Result<String> {
        self.compiler.filter_standard_defines(defines)
    }
}
