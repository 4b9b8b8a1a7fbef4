//! Go grammar selection and source file recognition.

use std::path::Path;

/// Extension of the files the rewriter visits.
pub const GO_EXTENSION: &str = "go";

/// Returns the Tree-sitter grammar for Go.
#[must_use]
pub fn go_language() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// Returns whether `path` names a Go source file.
///
/// The match is case-sensitive, so `main.GO` is not treated as Go.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use wasmguard_syntax::is_go_source;
///
/// assert!(is_go_source(Path::new("syscall/syscall_linux.go")));
/// assert!(!is_go_source(Path::new("go.mod")));
/// ```
#[must_use]
pub fn is_go_source(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == GO_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("main.go", true)]
    #[case("internal/unix/syscall_linux.go", true)]
    #[case("go.mod", false)]
    #[case("go.sum", false)]
    #[case("main.GO", false)]
    #[case("Makefile", false)]
    #[case("notes.go.txt", false)]
    fn recognises_go_sources(#[case] path: &str, #[case] expected: bool) {
        assert_eq!(is_go_source(Path::new(path)), expected);
    }

    #[test]
    fn grammar_loads_into_parser() {
        let mut parser = tree_sitter::Parser::new();
        assert!(parser.set_language(&go_language()).is_ok());
    }
}
