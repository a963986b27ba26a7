//! Shell quoting
//!
//! Renders arguments as POSIX shell tokens so logged command lines can be
//! pasted back into a terminal.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

static SAFE_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.+@/-]+$").unwrap());

/// Quote `s` for a POSIX shell.
///
/// Non-empty strings made only of word characters and `.+-@/` are returned
/// unchanged. Anything else is wrapped in single quotes, each embedded `'`
/// becoming `'\''`.
pub fn quote(s: &str) -> Cow<'_, str> {
    if SAFE_TOKEN.is_match(s) {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for c in s.chars() {
        if c == '\'' {
            out.push_str("'\\''");
        } else {
            out.push(c);
        }
    }
    out.push('\'');
    Cow::Owned(out)
}

/// Join arguments into a single quoted command line
pub fn join<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    args.into_iter()
        .map(|a| quote(a.as_ref()).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
