//! Makefile dependency parser
//!
//! Turns the output of `cc -M header.h` into an ordered list of header paths.

use once_cell::sync::Lazy;
use regex::Regex;

static TARGET_PREFIX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^.*:").unwrap());
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" {2,}").unwrap());

/// Parse `-M` style dependency output.
///
/// Continuation backslashes and newlines are removed, everything up to the
/// last colon of the joined text is dropped, and each remaining token is
/// normalized. Order is first-seen; duplicates are kept. Text without a colon
/// is tokenized as-is.
pub fn parse(raw: &str) -> Vec<String> {
    let joined = raw
        .replace("\\\r\n", "")
        .replace("\\\n", "")
        .replace(['\r', '\n'], "");

    let deps = TARGET_PREFIX.replace(&joined, "");
    let deps = SPACE_RUNS.replace_all(&deps, " ");

    deps.split_whitespace().map(normalize).collect()
}

/// Fold `component/..` pairs and drop `./` segments
pub fn normalize(path: &str) -> String {
    let absolute = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for seg in path.split('/') {
        match seg {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            _ => parts.push(seg),
        }
    }

    let joined = parts.join("/");
    match (absolute, joined.is_empty()) {
        (true, _) => format!("/{}", joined),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_list() {
        assert_eq!(parse("a.h b.h"), vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_target_and_dots() {
        assert_eq!(
            parse("foo.o: a.h ./b.h x/../c.h\n"),
            vec!["a.h", "b.h", "c.h"]
        );
    }

    #[test]
    fn test_continuation_lines() {
        let raw = "tmp.o: /usr/include/stdio.h \\\n  /usr/include/features.h \\\n  src/../include/vim.h\n";
        assert_eq!(
            parse(raw),
            vec![
                "/usr/include/stdio.h",
                "/usr/include/features.h",
                "include/vim.h"
            ]
        );
    }

    #[test]
    fn test_crlf_continuations() {
        let raw = "x.o: a.h \\\r\n b.h\r\n";
        assert_eq!(parse(raw), vec!["a.h", "b.h"]);
    }

    #[test]
    fn test_keeps_duplicates_and_order() {
        assert_eq!(parse("t.o: b.h a.h b.h"), vec!["b.h", "a.h", "b.h"]);
    }

    #[test]
    fn test_no_colon_left_intact() {
        assert_eq!(
            parse("fatal error no such file"),
            vec!["fatal", "error", "no", "such", "file"]
        );
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("./a/./b.h"), "a/b.h");
        assert_eq!(normalize("a/b/../../c.h"), "c.h");
        assert_eq!(normalize("../../x.h"), "../../x.h");
        assert_eq!(normalize("a/../../x.h"), "../x.h");
        assert_eq!(normalize("/usr/lib/../include/x.h"), "/usr/include/x.h");
        assert_eq!(normalize("/../x.h"), "/x.h");
        assert_eq!(normalize("./"), ".");
    }
}
