//! Line tokenization.
//!
//! The completer does not parse shell syntax itself; it asks a [`Tokenizer`]
//! to split the line and falls back to whitespace splitting when the
//! tokenizer rejects it (for example on an unbalanced quote).

use tracing::debug;

/// Splits a raw input line into words.
pub trait Tokenizer {
    /// Returns the words of `line`, or `None` if the line cannot be parsed.
    fn split(&self, line: &str) -> Option<Vec<String>>;
}

/// POSIX shell-style word splitting backed by [`shlex`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellTokenizer;

impl Tokenizer for ShellTokenizer {
    fn split(&self, line: &str) -> Option<Vec<String>> {
        shlex::split(line)
    }
}

/// Plain whitespace splitting. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl Tokenizer for WhitespaceTokenizer {
    fn split(&self, line: &str) -> Option<Vec<String>> {
        Some(whitespace_split(line))
    }
}

impl<F> Tokenizer for F
where
    F: Fn(&str) -> Option<Vec<String>>,
{
    fn split(&self, line: &str) -> Option<Vec<String>> {
        self(line)
    }
}

/// Splits `line` with `tokenizer`, falling back to whitespace splitting.
///
/// # Examples
///
/// ```
/// use shell_tree_core::{ShellTokenizer, tokenize};
///
/// assert_eq!(tokenize(&ShellTokenizer, r#"say "hello world""#), vec!["say", "hello world"]);
/// // Unbalanced quote: the whitespace fallback keeps the quote character.
/// assert_eq!(tokenize(&ShellTokenizer, r#"say "hello"#), vec!["say", "\"hello"]);
/// ```
pub fn tokenize<T: Tokenizer + ?Sized>(tokenizer: &T, line: &str) -> Vec<String> {
    match tokenizer.split(line) {
        Some(words) => words,
        None => {
            debug!(line = %line, "tokenizer rejected line, falling back to whitespace split");
            whitespace_split(line)
        }
    }
}

fn whitespace_split(line: &str) -> Vec<String> {
    line.split_whitespace().map(String::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_tokenizer_honors_quotes() {
        let words = tokenize(&ShellTokenizer, "user add 'Jane Doe' --role admin");
        assert_eq!(words, vec!["user", "add", "Jane Doe", "--role", "admin"]);
    }

    #[test]
    fn test_unbalanced_quote_falls_back() {
        let words = tokenize(&ShellTokenizer, "user add 'Jane Doe");
        assert_eq!(words, vec!["user", "add", "'Jane", "Doe"]);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize(&ShellTokenizer, "").is_empty());
        assert!(tokenize(&ShellTokenizer, "   ").is_empty());
    }

    #[test]
    fn test_closure_tokenizer_failure_uses_fallback() {
        let reject = |_: &str| -> Option<Vec<String>> { None };
        assert_eq!(tokenize(&reject, "a  b\tc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_tokenizer_ignores_quotes() {
        assert_eq!(
            tokenize(&WhitespaceTokenizer, "\"a b\""),
            vec!["\"a", "b\""]
        );
    }
}
