//! Compiler profile
//!
//! Wraps one selected C compiler: its command, its kind's flag table and the
//! preprocessor flags accumulated so far. Every profile starts with the
//! compatibility defines from [`crate::defines::compatibility_defines`].

use once_cell::unsync::OnceCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use ccscan_core::config::{Config, DEFAULT_PSEUDO_HEADER};
use ccscan_core::{CompilerCandidate, CompilerKind, Error, Result};

use crate::capabilities::Capabilities;
use crate::defines::{compatibility_defines, MacroDirective};
use crate::headers::{headerize, PseudoHeader};
use crate::invoke::Invoker;
use crate::{depfile, shell};

/// Name of the empty header used to capture the compiler's built-in macros
const EMPTY_PSEUDO_HEADER: &str = "tmp_empty_pseudoheader.h";

/// A C compiler ready to list dependencies and preprocess headers
#[derive(Debug)]
pub struct CompilerProfile {
    path: Vec<String>,
    kind: CompilerKind,
    caps: &'static Capabilities,
    preprocessor_extra_flags: Vec<String>,
    invoker: Invoker,
    work_dir: PathBuf,
    pseudo_header: String,
    /// Macro dump of an empty translation unit, computed on first use
    standard_defines: OnceCell<HashSet<String>>,
}

impl CompilerProfile {
    /// Profile for `candidate` with default settings
    pub fn new(candidate: &CompilerCandidate) -> Self {
        let mut profile = Self {
            path: candidate.path.clone(),
            kind: candidate.kind,
            caps: Capabilities::for_kind(candidate.kind),
            preprocessor_extra_flags: Vec::new(),
            invoker: Invoker::default(),
            work_dir: PathBuf::from("."),
            pseudo_header: DEFAULT_PSEUDO_HEADER.to_string(),
            standard_defines: OnceCell::new(),
        };
        profile.init_defines();
        profile
    }

    /// Profile for `candidate` using the retry and pseudo-header settings of `config`
    pub fn from_config(candidate: &CompilerCandidate, config: &Config) -> Self {
        Self::new(candidate)
            .with_max_attempts(config.compiler.max_attempts)
            .with_work_dir(config.preprocess.work_dir.clone())
            .with_pseudo_header(&config.preprocess.pseudo_header)
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.invoker = Invoker::new(max_attempts);
        self
    }

    /// Directory that receives pseudo-headers
    pub fn with_work_dir(mut self, work_dir: PathBuf) -> Self {
        self.work_dir = work_dir;
        self
    }

    pub fn with_pseudo_header(mut self, name: &str) -> Self {
        self.pseudo_header = name.to_string();
        self
    }

    fn init_defines(&mut self) {
        for directive in compatibility_defines() {
            self.push_directive(&directive);
        }
    }

    fn push_directive(&mut self, directive: &MacroDirective) {
        self.preprocessor_extra_flags.push(directive.to_flag(self.caps));
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn kind(&self) -> CompilerKind {
        self.kind
    }

    pub fn capabilities(&self) -> &'static Capabilities {
        self.caps
    }

    /// Flags passed to every preprocessing run, oldest first
    pub fn extra_flags(&self) -> &[String] {
        &self.preprocessor_extra_flags
    }

    /// Define a macro, optionally function-like and/or with a value
    pub fn define(&mut self, name: &str, args: Option<&[&str]>, value: Option<&str>) {
        self.push_directive(&MacroDirective::define(name, args, value));
    }

    pub fn undefine(&mut self, name: &str) {
        self.push_directive(&MacroDirective::undefine(name));
    }

    /// Apply a pre-built directive, e.g. one parsed from `NAME=VALUE`
    pub fn apply(&mut self, directive: &MacroDirective) {
        self.push_directive(directive);
    }

    /// Append one include flag per path, in order
    pub fn add_to_include_path<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        for path in paths {
            let flag = format!("{}{}", self.caps.include_prefix, path.as_ref().display());
            self.preprocessor_extra_flags.push(flag);
        }
    }

    /// Shell-quoted command line for this compiler with `args` appended
    pub fn command_line<S: AsRef<str>>(&self, args: &[S]) -> String {
        shell::join(
            self.path
                .iter()
                .map(String::as_str)
                .chain(args.iter().map(|a| a.as_ref())),
        )
    }

    /// First line of the compiler's version banner
    pub fn version(&self) -> Option<String> {
        let argv = self.argv([self.caps.version_flag]);
        let output = Invoker::new(1).run(&argv).ok()?;
        output
            .lines()
            .find(|l| l.contains("version"))
            .or_else(|| output.lines().next())
            .map(|l| l.trim().to_string())
    }

    /// Headers `header` depends on, as reported by a single compiler run
    pub fn dependencies(&self, header: &str) -> Result<Vec<String>> {
        let argv = self.argv([self.caps.dependency_flag, header]);
        let raw = Invoker::new(1).run(&argv)?;
        let deps = depfile::parse(&raw);
        debug!("{} depends on {} headers", header, deps.len());
        Ok(deps)
    }

    /// Preprocess `headers` after `previous_defines`.
    ///
    /// Returns `(declarations, defines)`: the preprocessed source without line
    /// markers, then the dump of every macro defined at the end of the unit.
    /// The pseudo-header is removed before returning, on failure too.
    pub fn preprocess<S: AsRef<str>>(
        &self,
        previous_defines: &str,
        headers: &[S],
    ) -> Result<(String, String)> {
        let pseudoheader = headerize(headers, false);
        let contents = format!("{}\n{}", previous_defines, pseudoheader);

        let (defines, declarations) = {
            let file = PseudoHeader::create(&self.work_dir, &self.pseudo_header, &contents)?;
            let defines = self
                .invoker
                .run(&self.dump_argv(self.caps.macro_dump_flags, file.path()));
            let declarations = self
                .invoker
                .run(&self.dump_argv(self.caps.declaration_dump_flags, file.path()));
            (defines, declarations)
        };

        match (declarations, defines) {
            (Ok(declarations), Ok(defines)) => Ok((declarations, defines)),
            (Err(e), _) => Err(Error::Preprocess(format!("no declarations: {}", e))),
            (_, Err(e)) => Err(Error::Preprocess(format!("no defines: {}", e))),
        }
    }

    /// Drop from `defines` every line the compiler emits for an empty unit
    pub fn filter_standard_defines(&self, defines: &str) -> Result<String> {
        let standard = self.standard_defines.get_or_try_init(|| {
            let file = PseudoHeader::create(&self.work_dir, EMPTY_PSEUDO_HEADER, "")?;
            let dump = self
                .invoker
                .run(&self.dump_argv(self.caps.macro_dump_flags, file.path()))?;
            debug!("Captured {} standard defines", dump.lines().count());
            Ok::<_, Error>(dump.lines().map(str::to_string).collect::<HashSet<_>>())
        })?;

        Ok(defines
            .lines()
            .filter(|line| !line.is_empty() && !standard.contains(*line))
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn argv<'a>(&self, args: impl IntoIterator<Item = &'a str>) -> Vec<String> {
        let mut argv = self.path.clone();
        argv.extend(args.into_iter().map(str::to_string));
        argv
    }

    fn dump_argv(&self, dump_flags: &[&str], file: &Path) -> Vec<String> {
        let mut argv = self.path.clone();
        argv.extend(self.preprocessor_extra_flags.iter().cloned());
        argv.extend(dump_flags.iter().map(|f| f.to_string()));
        argv.push(file.to_string_lossy().into_owned());
        argv
    }
}
