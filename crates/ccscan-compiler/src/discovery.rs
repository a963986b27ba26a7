//! Compiler discovery
//!
//! Builds the prioritized candidate list (environment override, platform
//! default, fixed fallbacks) and selects the first candidate that can be run.

use std::process::{Command, Stdio};
use tracing::{debug, info};

use ccscan_core::config::{CompilerConfig, Config};
use ccscan_core::{CompilerCandidate, CompilerKind, Error, Result};

use crate::capabilities::Capabilities;
use crate::profile::CompilerProfile;

/// Launcher used to run the override value through PATH lookup
const ENV_LAUNCHER: &str = "env";

/// Candidates in probe order, reading the override through `lookup`
pub fn candidates<F>(config: &CompilerConfig, lookup: F) -> Vec<CompilerCandidate>
where
    F: Fn(&str) -> Option<String>,
{
    let mut list = Vec::new();

    if let Some(value) = lookup(&config.env_var) {
        let words: Vec<String> = value.split_whitespace().map(str::to_string).collect();
        if !words.is_empty() {
            let mut path = vec![ENV_LAUNCHER.to_string()];
            path.extend(words);
            list.push(CompilerCandidate::with_path(path, CompilerKind::Gcc));
        }
    }

    if cfg!(windows) {
        list.push(CompilerCandidate::new("cl", CompilerKind::Msvc));
    }

    list.extend(config.fallbacks.iter().cloned());
    list
}

/// Whether `candidate` answers the version probe.
///
/// By default it is enough for the process to start; with `strict` the probe
/// must also exit successfully.
pub fn probe(candidate: &CompilerCandidate, strict: bool) -> bool {
    let Some((program, args)) = candidate.path.split_first() else {
        return false;
    };
    let caps = Capabilities::for_kind(candidate.kind);

    let status = Command::new(program)
        .args(args)
        .arg(caps.version_flag)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match status {
        Ok(status) if strict => {
            debug!("Probe {:?} exited with {}", candidate.path, status);
            status.success()
        }
        Ok(_) => true,
        Err(e) => {
            debug!("Probe {:?} failed: {}", candidate.path, e);
            false
        }
    }
}

/// First candidate that passes the probe
pub fn select(candidates: &[CompilerCandidate], strict: bool) -> Result<&CompilerCandidate> {
    candidates
        .iter()
        .find(|c| probe(c, strict))
        .ok_or_else(|| Error::NoCompiler {
            tried: candidates.iter().map(|c| c.path.join(" ")).collect(),
        })
}

/// Discover a compiler using the process environment
pub fn discover(config: &Config) -> Result<CompilerProfile> {
    discover_with(config, |name| std::env::var(name).ok())
}

/// Discover a compiler, reading the override variable through `lookup`
pub fn discover_with<F>(config: &Config, lookup: F) -> Result<CompilerProfile>
where
    F: Fn(&str) -> Option<String>,
{
    let list = candidates(&config.compiler, lookup);
    let selected = select(&list, config.compiler.strict_probe)?;
    info!("Using {} compiler: {}", selected.kind, selected.path.join(" "));
    Ok(CompilerProfile::from_config(selected, config))
}
