//! Macro definitions
//!
//! `-D` / `-U` directives passed to the compiler, and the compatibility set
//! every profile starts with.

use crate::capabilities::Capabilities;

/// A macro directive turned into a single command-line flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MacroDirective {
    /// `-Dname[(args)][=value]`
    Define {
        name: String,
        args: Option<Vec<String>>,
        value: Option<String>,
    },
    /// `-Uname`
    Undefine(String),
}

impl MacroDirective {
    /// Object-like or function-like definition
    pub fn define(name: &str, args: Option<&[&str]>, value: Option<&str>) -> Self {
        MacroDirective::Define {
            name: name.to_string(),
            args: args.map(|a| a.iter().map(|s| s.to_string()).collect()),
            value: value.map(str::to_string),
        }
    }

    pub fn undefine(name: &str) -> Self {
        MacroDirective::Undefine(name.to_string())
    }

    /// Parse `NAME` or `NAME=VALUE` as given on a command line or in a config file
    pub fn parse(spec: &str) -> Self {
        match spec.split_once('=') {
            Some((name, value)) => Self::define(name, None, Some(value)),
            None => Self::define(spec, None, None),
        }
    }

    /// Render the flag using the compiler's prefixes
    pub fn to_flag(&self, caps: &Capabilities) -> String {
        match self {
            MacroDirective::Define { name, args, value } => {
                let mut flag = format!("{}{}", caps.define_prefix, name);
                if let Some(args) = args {
                    flag.push('(');
                    flag.push_str(&args.join(","));
                    flag.push(')');
                }
                if let Some(value) = value {
                    flag.push('=');
                    flag.push_str(value);
                }
                flag
            }
            MacroDirective::Undefine(name) => format!("{}{}", caps.undefine_prefix, name),
        }
    }
}

/// Directives that erase C syntax a binding generator cannot represent
pub fn compatibility_defines() -> Vec<MacroDirective> {
    vec![
        MacroDirective::define("aligned", Some(&["ARGS"]), Some("")),
        MacroDirective::define("__attribute__", Some(&["ARGS"]), Some("")),
        MacroDirective::define("__asm", Some(&["ARGS"]), Some("")),
        MacroDirective::define("__asm__", Some(&["ARGS"]), Some("")),
        MacroDirective::define("__inline__", None, Some("")),
        MacroDirective::define("EXTERN", None, Some("extern")),
        MacroDirective::define("INIT", Some(&["..."]), Some("")),
        MacroDirective::define("_GNU_SOURCE", None, None),
        MacroDirective::define("INCLUDE_GENERATED_DECLARATIONS", None, None),
        MacroDirective::define("_Thread_local", None, Some("")),
        MacroDirective::define("_Nullable", None, Some("")),
        MacroDirective::define("_Nonnull", None, Some("")),
        MacroDirective::undefine("__BLOCKS__"),
    ]
}
