//! Compiler invocation with retry
//!
//! Runs a compiler to completion and returns its combined output. An attempt
//! that cannot spawn the process or yields no output at all is repeated, up to
//! a fixed number of times.

use std::process::{Command, Stdio};
use tracing::{debug, error, warn};

use ccscan_core::config::DEFAULT_MAX_ATTEMPTS;
use ccscan_core::{Error, Result};

use crate::shell;

/// Runs argv-style commands, retrying empty reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Invoker {
    max_attempts: u32,
}

impl Invoker {
    /// Invoker giving each command `max_attempts` tries (at least one)
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run `argv` and return stdout followed by stderr.
    ///
    /// The exit status is not checked: compilers report missing headers and
    /// similar problems as text, which callers parse like any other output.
    pub fn run(&self, argv: &[String]) -> Result<String> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| Error::Other("empty compiler command".into()))?;
        let command_line = shell::join(argv);

        for attempt in 1..=self.max_attempts {
            debug!("Running (attempt {}): {}", attempt, command_line);

            let output = match Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .output()
            {
                Ok(output) => output,
                Err(e) => {
                    warn!("Attempt {} failed to start {}: {}", attempt, program, e);
                    continue;
                }
            };

            if !output.status.success() {
                debug!("{} exited with {}", program, output.status);
            }

            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));

            if combined.is_empty() {
                warn!("{}", empty_attempt_message(attempt, self.max_attempts, &command_line));
                continue;
            }

            return Ok(combined);
        }

        error!("Failed to execute {}", command_line);
        Err(Error::NoOutput {
            command: command_line,
            attempts: self.max_attempts,
        })
    }
}

fn empty_attempt_message(attempt: u32, max_attempts: u32, command_line: &str) -> String {
    format!(
        "Attempt {}/{} of {} produced no output",
        attempt, max_attempts, command_line
    )
}

impl Default for Invoker {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}
