//! Command tree node.
//!
//! A [`Command`] owns its required subcommands and its optional subcommands
//! (flag-like commands that may appear anywhere after the required chain).
//! Both child maps are [`BTreeMap`]s keyed by name, so every listing and every
//! first-match lookup walks children in lexicographic order.

use std::collections::BTreeMap;
use std::fmt;

/// Action run by the surrounding shell when a command is the final match.
pub type Handler = Box<dyn Fn(&[String]) + Send + Sync>;

/// Custom completion taking the already-typed arguments.
pub type CompleterFn = Box<dyn Fn(&[String]) -> Vec<String> + Send + Sync>;

/// Custom completion taking the in-progress prefix and the arguments.
pub type PrefixCompleterFn = Box<dyn Fn(&str, &[String]) -> Vec<String> + Send + Sync>;

/// A node in the command tree.
///
/// Nodes are built by the shell author and attached with
/// [`add_cmd`](Command::add_cmd) / [`add_optional_cmd`](Command::add_optional_cmd)
/// or the `with_*` builder methods.
///
/// # Examples
///
/// ```
/// use shell_tree_core::Command;
///
/// let mut root = Command::root();
/// root.add_cmd(
///     Command::new("user")
///         .with_alias("u")
///         .with_help("Manage users")
///         .with_optional_child(Command::new("--verbose")),
/// );
///
/// assert_eq!(root.find_child("u").unwrap().name, "user");
/// assert_eq!(root.children().len(), 1);
/// ```
#[derive(Default)]
pub struct Command {
    /// Command name.
    pub name: String,
    /// Alternate names, tried only after exact names fail across all siblings.
    pub aliases: Vec<String>,
    /// One-line help.
    pub help: String,
    /// Longer help, preferred over `help` as the help text header.
    pub long_help: String,
    handler: Option<Handler>,
    completer: Option<CompleterFn>,
    completer_with_prefix: Option<PrefixCompleterFn>,
    children: BTreeMap<String, Command>,
    optional_children: BTreeMap<String, Command>,
}

impl Command {
    /// Creates a command with the given name and nothing else set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Creates an unnamed root node.
    pub fn root() -> Self {
        Self::default()
    }

    /// Adds an alias.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Adds several aliases.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Sets the one-line help.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = help.into();
        self
    }

    /// Sets the long help.
    pub fn with_long_help(mut self, long_help: impl Into<String>) -> Self {
        self.long_help = long_help.into();
        self
    }

    /// Sets the handler.
    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[String]) + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Sets the plain completer.
    ///
    /// A plain completer is also what [`is_valid`](Command::is_valid) uses
    /// to enumerate the accepted values of an optional command.
    pub fn with_completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&[String]) -> Vec<String> + Send + Sync + 'static,
    {
        self.completer = Some(Box::new(completer));
        self
    }

    /// Sets the prefix-aware completer. Takes precedence over the plain one.
    pub fn with_prefix_completer<F>(mut self, completer: F) -> Self
    where
        F: Fn(&str, &[String]) -> Vec<String> + Send + Sync + 'static,
    {
        self.completer_with_prefix = Some(Box::new(completer));
        self
    }

    /// Adds a required subcommand.
    pub fn with_child(mut self, child: Command) -> Self {
        self.add_cmd(child);
        self
    }

    /// Adds an optional subcommand.
    pub fn with_optional_child(mut self, child: Command) -> Self {
        self.add_optional_cmd(child);
        self
    }

    /// Adds `cmd` as a required subcommand, replacing any child of the same name.
    pub fn add_cmd(&mut self, cmd: Command) {
        self.children.insert(cmd.name.clone(), cmd);
    }

    /// Adds `cmd` as an optional subcommand, replacing any of the same name.
    pub fn add_optional_cmd(&mut self, cmd: Command) {
        self.optional_children.insert(cmd.name.clone(), cmd);
    }

    /// Removes the required subcommand called `name`.
    ///
    /// Aliases are not considered. Returns the removed node, if any.
    pub fn delete_cmd(&mut self, name: &str) -> Option<Command> {
        self.children.remove(name)
    }

    /// Required subcommands, sorted by name.
    pub fn children(&self) -> Vec<&Command> {
        self.children.values().collect()
    }

    /// Optional subcommands, sorted by name.
    pub fn optional_children(&self) -> Vec<&Command> {
        self.optional_children.values().collect()
    }

    /// Returns `true` if a required subcommand called `name` exists.
    pub fn has_child(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    /// Mutable access to a required subcommand by exact name.
    pub fn child_mut(&mut self, name: &str) -> Option<&mut Command> {
        self.children.get_mut(name)
    }

    /// Names of the required subcommands, sorted.
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Names of the optional subcommands, sorted.
    pub fn optional_child_names(&self) -> Vec<String> {
        self.optional_children.keys().cloned().collect()
    }

    /// Finds the required subcommand matching `word` by name, then by alias.
    pub fn find_child(&self, word: &str) -> Option<&Command> {
        find_in(&self.children, word)
    }

    /// Finds the optional subcommand matching `word` by name, then by alias.
    pub fn find_optional_child(&self, word: &str) -> Option<&Command> {
        find_in(&self.optional_children, word)
    }

    /// Runs the handler with `args`. Returns `false` if no handler is set.
    pub fn run(&self, args: &[String]) -> bool {
        match &self.handler {
            Some(handler) => {
                handler(args);
                true
            }
            None => false,
        }
    }

    pub(crate) fn completer(&self) -> Option<&CompleterFn> {
        self.completer.as_ref()
    }

    pub(crate) fn prefix_completer(&self) -> Option<&PrefixCompleterFn> {
        self.completer_with_prefix.as_ref()
    }

    pub(crate) fn child_map(&self) -> &BTreeMap<String, Command> {
        &self.children
    }

    pub(crate) fn optional_child_map(&self) -> &BTreeMap<String, Command> {
        &self.optional_children
    }
}

fn find_in<'a>(map: &'a BTreeMap<String, Command>, word: &str) -> Option<&'a Command> {
    if let Some(cmd) = map.get(word) {
        return Some(cmd);
    }
    map.values()
        .find(|cmd| cmd.aliases.iter().any(|alias| alias == word))
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("help", &self.help)
            .field("long_help", &self.long_help)
            .field("handler", &self.handler.is_some())
            .field("completer", &self.completer.is_some())
            .field("completer_with_prefix", &self.completer_with_prefix.is_some())
            .field("children", &self.children)
            .field("optional_children", &self.optional_children)
            .finish()
    }
}
