//! Declarative command tree definitions.
//!
//! A tree can be described in YAML or JSON and built into a [`Command`]
//! tree. Static `values` become a plain completer, which also makes the node
//! usable for [`is_valid`](Command::is_valid).
//!
//! # Example YAML
//!
//! ```yaml
//! name: app
//! help: Demo shell
//! commands:
//!   - name: user
//!     aliases: [u]
//!     help: Manage users
//!     commands:
//!       - name: add
//!         help: Add a user
//!     optional:
//!       - name: --role
//!         help: Filter by role
//!         values: [admin, guest]
//! ```

use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::Command;
use crate::command::Handler;
use crate::error::{Result, TreeError};
use crate::validate::validate_tree;

/// Serializable description of a command and its subtree.
///
/// # Examples
///
/// ```
/// use shell_tree_core::CommandDefinition;
///
/// let def = CommandDefinition::from_yaml_str(
///     "commands:\n  - name: status\n    aliases: [st]\n",
/// ).unwrap();
/// let root = def.build();
/// assert_eq!(root.find_child("st").unwrap().name, "status");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDefinition {
    /// Command name; may be empty for the root.
    #[serde(default)]
    pub name: String,
    /// Alternate names.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    /// One-line help.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    /// Longer help.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub long_help: String,
    /// Static completion values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
    /// Required subcommands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<CommandDefinition>,
    /// Optional subcommands.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub optional: Vec<CommandDefinition>,
}

impl CommandDefinition {
    /// Parses a definition from YAML.
    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(raw)?)
    }

    /// Parses a definition from JSON.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Loads a definition file, picking the format from the extension
    /// (`.yaml`, `.yml` or `.json`).
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedFormat`](TreeError::UnsupportedFormat) for other
    /// extensions, [`IoError`](TreeError::IoError) if the file cannot be
    /// read, or a parse error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = DefinitionFormat::from_path(path)?;
        let reader = BufReader::new(std::fs::File::open(path)?);
        let definition = match format {
            DefinitionFormat::Yaml => serde_yaml::from_reader(reader)?,
            DefinitionFormat::Json => serde_json::from_reader(reader)?,
        };
        debug!(path = %path.display(), "loaded command definition");
        Ok(definition)
    }

    /// Builds the command tree without handlers.
    pub fn build(&self) -> Command {
        self.build_with(&|_| None)
    }

    /// Builds the command tree, asking `handler` for each node's handler.
    ///
    /// `handler` receives the path of names from the root down to the node.
    /// An unnamed root contributes nothing to the path.
    pub fn build_with<F>(&self, handler: &F) -> Command
    where
        F: Fn(&[String]) -> Option<Handler>,
    {
        let mut path = Vec::new();
        self.build_node(handler, &mut path)
    }

    fn build_node<F>(&self, handler: &F, path: &mut Vec<String>) -> Command
    where
        F: Fn(&[String]) -> Option<Handler>,
    {
        let pushed = !self.name.is_empty();
        if pushed {
            path.push(self.name.clone());
        }

        let mut cmd = Command::new(self.name.clone())
            .with_aliases(self.aliases.iter().cloned())
            .with_help(self.help.clone())
            .with_long_help(self.long_help.clone());
        if let Some(values) = &self.values {
            let values = values.clone();
            cmd = cmd.with_completer(move |_| values.clone());
        }
        if let Some(run) = handler(path.as_slice()) {
            cmd = cmd.with_handler(run);
        }
        for child in &self.commands {
            cmd.add_cmd(child.build_node(handler, path));
        }
        for child in &self.optional {
            cmd.add_optional_cmd(child.build_node(handler, path));
        }

        if pushed {
            path.pop();
        }
        cmd
    }
}

/// Loads, builds and validates a command tree.
///
/// # Errors
///
/// Returns the loading errors of [`CommandDefinition::load`], or
/// [`InvalidTree`](TreeError::InvalidTree) if the built tree fails
/// [`validate_tree`].
pub fn load_tree(path: impl AsRef<Path>) -> Result<Command> {
    let root = CommandDefinition::load(path)?.build();
    check_tree(root)
}

/// Rejects `root` if [`validate_tree`] reports any error.
pub fn check_tree(root: Command) -> Result<Command> {
    let errors = validate_tree(&root);
    if errors.is_empty() {
        return Ok(root);
    }
    warn!(count = errors.len(), "command tree failed validation");
    Err(TreeError::InvalidTree(errors))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DefinitionFormat {
    Yaml,
    Json,
}

impl DefinitionFormat {
    fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            _ => Err(TreeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}
