//! Help text rendering.
//!
//! Renders a command's header followed by tab-aligned listings of its required
//! and optional subcommands.

use std::fmt::Write;

use crate::Command;

/// Name of the bare help command a shell usually injects into every tree.
const HELP_COMMAND: &str = "help";

/// Spaces emitted for each column separator.
const COLUMN_PADDING: usize = 2;

impl Command {
    /// Returns the help of the command and a listing of its subcommands.
    ///
    /// The header is `long_help`, else `help`, else `"<name> has no help"`.
    /// A `Commands:` section follows when there is more than one required
    /// child, or a single one not named `help`; `Optional Commands:` follows
    /// under the same rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use shell_tree_core::Command;
    ///
    /// let cmd = Command::new("user")
    ///     .with_help("Manage users")
    ///     .with_child(Command::new("add").with_help("Add a user"))
    ///     .with_child(Command::new("rm").with_help("Remove a user"));
    ///
    /// let text = cmd.help_text();
    /// assert!(text.starts_with("\nManage users\n"));
    /// assert!(text.contains("Commands:\n  add      Add a user\n  rm       Remove a user\n"));
    /// ```
    pub fn help_text(&self) -> String {
        let mut out = String::new();

        if !self.long_help.is_empty() {
            paragraph(&mut out, &self.long_help);
        } else if !self.help.is_empty() {
            paragraph(&mut out, &self.help);
        } else if !self.name.is_empty() {
            paragraph(&mut out, &format!("{} has no help", self.name));
        }

        if lists_subcommands(self.child_map().len(), self.has_child(HELP_COMMAND)) {
            paragraph(&mut out, "Commands:");
            write_rows(&mut out, &self.children());
            out.push('\n');
        }

        let optional_help = self.optional_child_map().contains_key(HELP_COMMAND);
        if lists_subcommands(self.optional_child_map().len(), optional_help) {
            paragraph(&mut out, "Optional Commands:");
            write_rows(&mut out, &self.optional_children());
            out.push('\n');
        }

        out
    }
}

/// A lone `help` child does not warrant a listing on its own.
fn lists_subcommands(count: usize, has_help: bool) -> bool {
    count > 1 || (count == 1 && !has_help)
}

fn paragraph(out: &mut String, text: &str) {
    out.push('\n');
    out.push_str(text);
    out.push('\n');
}

fn write_rows(out: &mut String, cmds: &[&Command]) {
    let width = cmds
        .iter()
        .map(|cmd| cmd.name.chars().count())
        .max()
        .unwrap_or(0)
        + COLUMN_PADDING;
    let indent = " ".repeat(COLUMN_PADDING);
    let gap = " ".repeat(COLUMN_PADDING * 2);
    for cmd in cmds {
        let pad = width - cmd.name.chars().count();
        // Infallible: writing into a String.
        let _ = writeln!(
            out,
            "{indent}{}{}{gap}{}",
            cmd.name,
            " ".repeat(pad),
            cmd.help
        );
    }
}
