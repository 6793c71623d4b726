//! Command and argument resolution.
//!
//! [`Command::find_cmd`] walks a word sequence against the tree and reports
//! the matched command, the optional commands seen after it together with
//! their captured values, and the words following the matched command.

use tracing::debug;

use crate::Command;
use crate::error::{Result, TreeError};

/// An optional command found after the required chain, with its value.
#[derive(Debug, Clone, Copy)]
pub struct OptionalCapture<'t, 'w> {
    /// The matched optional command.
    pub command: &'t Command,
    /// Last freeform word seen after the optional command, or `""`.
    pub value: &'w str,
}

/// Result of [`Command::find_cmd`].
#[derive(Debug, Clone)]
pub struct Resolution<'t, 'w> {
    /// Last required command matched, if any.
    pub command: Option<&'t Command>,
    /// Optional commands in order of first appearance. A repeated optional
    /// command keeps its first position and takes the later value.
    pub optional: Vec<OptionalCapture<'t, 'w>>,
    /// Words after the last matched required command. Optional command words
    /// are still present.
    pub args: &'w [String],
}

impl<'t, 'w> Resolution<'t, 'w> {
    /// Captured value for the optional command called `name`.
    pub fn optional_value(&self, name: &str) -> Option<&'w str> {
        self.optional
            .iter()
            .find(|capture| capture.command.name == name)
            .map(|capture| capture.value)
    }

    /// Name of the matched command, if any.
    pub fn command_name(&self) -> Option<&'t str> {
        self.command.map(|cmd| cmd.name.as_str())
    }

    /// Captures sorted by optional command name.
    pub fn optional_by_name(&self) -> Vec<&OptionalCapture<'t, 'w>> {
        let mut sorted: Vec<_> = self.optional.iter().collect();
        sorted.sort_by(|a, b| a.command.name.cmp(&b.command.name));
        sorted
    }

    fn capture(&mut self, command: &'t Command, value: &'w str) {
        match self
            .optional
            .iter_mut()
            .find(|capture| std::ptr::eq(capture.command, command))
        {
            Some(existing) => existing.value = value,
            None => self.optional.push(OptionalCapture { command, value }),
        }
    }
}

impl Command {
    /// Finds the command selected by `words`, starting from `self`.
    ///
    /// Every word is tried against the children of the most recently matched
    /// node; words that match nothing are skipped and scanning continues, so
    /// the result reflects the last match anywhere in the sequence. The
    /// remaining args are the words after that last match (empty when nothing
    /// matched), and the optional commands among them are captured against
    /// the matched node's optional children.
    ///
    /// # Examples
    ///
    /// ```
    /// use shell_tree_core::Command;
    ///
    /// let root = Command::root().with_child(
    ///     Command::new("user")
    ///         .with_alias("u")
    ///         .with_optional_child(Command::new("--verbose")),
    /// );
    /// let words: Vec<String> = ["u", "--verbose", "extra"].iter().map(|s| s.to_string()).collect();
    ///
    /// let found = root.find_cmd(&words);
    /// assert_eq!(found.command_name(), Some("user"));
    /// assert_eq!(found.optional_value("--verbose"), Some("extra"));
    /// assert_eq!(found.args, &words[1..]);
    /// ```
    pub fn find_cmd<'t, 'w>(&'t self, words: &'w [String]) -> Resolution<'t, 'w> {
        let mut current = self;
        let mut matched: Option<&'t Command> = None;
        let mut args: &'w [String] = &[];

        for (i, word) in words.iter().enumerate() {
            if let Some(child) = current.find_child(word) {
                matched = Some(child);
                current = child;
                args = &words[i + 1..];
            }
        }

        let mut resolution = Resolution {
            command: matched,
            optional: Vec::new(),
            args,
        };

        let mut open: Option<&'t Command> = None;
        let mut value: &'w str = "";
        for word in args {
            if let Some(optional) = current.find_optional_child(word) {
                if let Some(previous) = open.take() {
                    resolution.capture(previous, value);
                }
                open = Some(optional);
                value = "";
            } else {
                value = word.as_str();
            }
        }
        if let Some(previous) = open {
            resolution.capture(previous, value);
        }

        debug!(
            command = resolution.command_name().unwrap_or("<none>"),
            optional = resolution.optional.len(),
            args = resolution.args.len(),
            "resolved words"
        );
        resolution
    }

    /// Walks `words` through nested optional commands.
    ///
    /// Descends while each word names an optional child of the current node.
    /// Returns the last matched node and the words from the first one that
    /// did not match.
    pub fn find_optional_cmd<'t, 'w>(
        &'t self,
        words: &'w [String],
    ) -> (Option<&'t Command>, &'w [String]) {
        let mut current = self;
        let mut matched = None;
        for (i, word) in words.iter().enumerate() {
            match current.find_optional_child(word) {
                Some(child) => {
                    matched = Some(child);
                    current = child;
                }
                None => return (matched, &words[i..]),
            }
        }
        (matched, &[])
    }

    /// Checks whether `value` is one of the values offered by the plain
    /// completer.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::MissingCompleter`] if no plain completer is set;
    /// a prefix-aware completer alone is not enough.
    ///
    /// # Examples
    ///
    /// ```
    /// use shell_tree_core::Command;
    ///
    /// let role = Command::new("--role")
    ///     .with_completer(|_| vec!["admin".to_string(), "guest".to_string()]);
    /// assert!(role.is_valid("admin").unwrap());
    /// assert!(!role.is_valid("root").unwrap());
    /// assert!(Command::new("--verbose").is_valid("x").is_err());
    /// ```
    pub fn is_valid(&self, value: &str) -> Result<bool> {
        let completer = self
            .completer()
            .ok_or_else(|| TreeError::MissingCompleter(self.name.clone()))?;
        Ok(completer(&[]).iter().any(|candidate| candidate == value))
    }
}
