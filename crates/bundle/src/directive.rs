/// Marker line a file uses to signal "include my body at most once".
pub const PRAGMA_ONCE: &str = "#pragma once";

/// Annotation that exempts an include line from inlining.
pub const SKIP_MARK: &str = "// codebook: skip";

const DIRECTIVE_TOKENS: [&str; 2] = ["#include", "%:include"];

/// Parse a line as an inlinable include directive.
///
/// Returns the quoted path when the line starts with an include spelling, is
/// not annotated with [`SKIP_MARK`], and its first argument is double-quoted.
/// Anything else is plain content: angle-bracket includes, a bare `#include`,
/// an unterminated quote. Lines that merely resemble a directive are never an
/// error, they pass through the output untouched.
pub fn parse_include(line: &str) -> Option<&str> {
    if !DIRECTIVE_TOKENS.iter().any(|t| line.starts_with(t)) {
        return None;
    }
    if line.contains(SKIP_MARK) {
        return None;
    }
    let arg = line.split_whitespace().nth(1)?;
    let rest = arg.strip_prefix('"')?;
    let end = rest.find('"')?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_include_is_a_directive() {
        assert_eq!(parse_include(r#"#include "lib/a.h""#), Some("lib/a.h"));
    }

    #[test]
    fn digraph_spelling_is_a_directive() {
        assert_eq!(parse_include(r#"%:include "lib/a.h""#), Some("lib/a.h"));
    }

    #[test]
    fn trailing_comment_does_not_break_the_path() {
        assert_eq!(
            parse_include(r#"#include "lib/a.h" // fenwick tree"#),
            Some("lib/a.h")
        );
    }

    #[test]
    fn skip_annotation_disables_the_directive() {
        assert_eq!(parse_include(r#"#include "lib/a.h" // codebook: skip"#), None);
    }

    #[test]
    fn angle_bracket_include_is_plain_content() {
        assert_eq!(parse_include("#include <vector>"), None);
    }

    #[test]
    fn indented_include_is_plain_content() {
        assert_eq!(parse_include(r#"  #include "lib/a.h""#), None);
    }

    #[test]
    fn bare_include_is_plain_content() {
        assert_eq!(parse_include("#include"), None);
    }

    #[test]
    fn unterminated_quote_is_plain_content() {
        assert_eq!(parse_include(r#"#include "lib/a.h"#), None);
    }

    #[test]
    fn unrelated_line_is_plain_content() {
        assert_eq!(parse_include("int main() {}"), None);
    }
}
