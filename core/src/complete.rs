//! Autocompletion.
//!
//! [`Completer`] turns a raw line and a cursor position into the suggestions
//! for the word under the cursor. Suggestions carry only the untyped rest of
//! each candidate; [`Completion::replace_len`] tells the line editor how many
//! bytes before the cursor already belong to the word.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::Command;
use crate::tokenize::{ShellTokenizer, Tokenizer, tokenize};

/// Predicate telling the completer to stand down.
pub type DisabledFn = Arc<dyn Fn() -> bool + Send + Sync>;

/// Suggestions for the word under the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Completion {
    /// Candidate suffixes, with the typed prefix trimmed off.
    pub suggestions: Vec<String>,
    /// Bytes before the cursor the editor treats as already typed.
    pub replace_len: usize,
}

/// Completes lines against a command tree.
///
/// # Examples
///
/// ```
/// use shell_tree_core::{Command, Completer};
///
/// let root = Command::root()
///     .with_child(Command::new("status"))
///     .with_child(Command::new("stop"))
///     .with_child(Command::new("start"));
///
/// let completion = Completer::new(&root).complete("st", 2);
/// assert_eq!(completion.suggestions, vec!["art", "atus", "op"]);
/// assert_eq!(completion.replace_len, 2);
/// ```
pub struct Completer<'t, T = ShellTokenizer> {
    root: &'t Command,
    tokenizer: T,
    disabled: Option<DisabledFn>,
}

impl<'t> Completer<'t> {
    /// Creates a completer over `root` using [`ShellTokenizer`].
    pub fn new(root: &'t Command) -> Self {
        Self {
            root,
            tokenizer: ShellTokenizer,
            disabled: None,
        }
    }
}

impl<'t, T: Tokenizer> Completer<'t, T> {
    /// Replaces the tokenizer.
    pub fn with_tokenizer<U: Tokenizer>(self, tokenizer: U) -> Completer<'t, U> {
        Completer {
            root: self.root,
            tokenizer,
            disabled: self.disabled,
        }
    }

    /// Sets the predicate checked before any work is done.
    pub fn with_disabled<F>(mut self, disabled: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(disabled));
        self
    }

    pub(crate) fn with_disabled_fn(mut self, disabled: Option<DisabledFn>) -> Self {
        self.disabled = disabled;
        self
    }

    /// Completes `line` with the cursor at byte offset `pos`.
    ///
    /// The word under completion is the last word of the line when the
    /// character before the cursor is not whitespace; otherwise a new word is
    /// being started and every candidate is offered. A prefix that already
    /// spells the only candidate yields a single `" "` suggestion.
    pub fn complete(&self, line: &str, pos: usize) -> Completion {
        if self.disabled.as_ref().is_some_and(|disabled| disabled()) {
            return Completion {
                suggestions: Vec::new(),
                replace_len: line.len(),
            };
        }

        let mut words = tokenize(&self.tokenizer, line);
        let prefix = if !words.is_empty() && in_word(line, pos) {
            words.pop().unwrap_or_default()
        } else {
            String::new()
        };

        let candidates = self.candidates(&prefix, &words);
        let mut suggestions: Vec<String> = candidates
            .iter()
            .filter_map(|candidate| candidate.strip_prefix(prefix.as_str()))
            .map(String::from)
            .collect();
        if suggestions.len() == 1 && !prefix.is_empty() && suggestions[0].is_empty() {
            suggestions = vec![" ".to_string()];
        }

        debug!(
            prefix = %prefix,
            candidates = candidates.len(),
            suggestions = suggestions.len(),
            "completed line"
        );
        Completion {
            suggestions,
            replace_len: prefix.len(),
        }
    }

    /// Full suggestion set for the context formed by `words`, before filtering.
    fn candidates(&self, prefix: &str, words: &[String]) -> Vec<String> {
        let found = self.root.find_cmd(words);

        // Optional commands without a valid value, visited by name. The first
        // one able to produce values wins; valueless ones only contribute
        // their sibling optional names.
        let mut fallback: Vec<String> = Vec::new();
        for capture in found.optional_by_name() {
            if matches!(capture.command.is_valid(capture.value), Ok(true)) {
                continue;
            }
            let optional = capture.command;
            let value = [capture.value.to_string()];
            debug!(optional = %optional.name, value = %capture.value, "completing optional value");
            if let Some(completer) = optional.prefix_completer() {
                return completer(prefix, &value);
            }
            if let Some(completer) = optional.completer() {
                return completer(&value);
            }
            if !optional.child_map().is_empty() {
                fallback.extend(optional.child_names());
                return fallback;
            }
            if let Some(cmd) = found.command {
                push_unique(&mut fallback, cmd.optional_child_names());
            }
        }

        let (cmd, args) = match found.command {
            Some(cmd) => (cmd, found.args),
            None => (self.root, words),
        };
        if let Some(completer) = cmd.prefix_completer() {
            return completer(prefix, args);
        }
        if let Some(completer) = cmd.completer() {
            return completer(args);
        }

        let mut names = cmd.child_names();
        names.extend(cmd.optional_child_names());
        push_unique(&mut names, fallback);
        names
    }
}

fn push_unique(names: &mut Vec<String>, extra: Vec<String>) {
    for name in extra {
        if !names.contains(&name) {
            names.push(name);
        }
    }
}

/// Whether the character just before `pos` continues a word.
fn in_word(line: &str, pos: usize) -> bool {
    let mut pos = pos.min(line.len());
    while !line.is_char_boundary(pos) {
        pos -= 1;
    }
    line[..pos]
        .chars()
        .next_back()
        .is_some_and(|c| !c.is_whitespace())
}
