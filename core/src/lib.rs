//! Command resolution and autocompletion for interactive shells.
//!
//! This crate is the part of a line-oriented shell that knows about
//! commands:
//!
//! - [`Command`]: a node in the command tree, owning required subcommands
//!   and optional (flag-like) subcommands, with aliases, help and custom
//!   completion.
//! - [`Command::find_cmd`]: resolves the command selected by a word sequence
//!   and captures the optional commands that follow it.
//! - [`Completer`]: turns a line and a cursor into completion suggestions.
//! - [`Command::help_text`]: renders aligned help listings.
//! - [`CommandDefinition`]: builds trees from YAML or JSON.
//!
//! Line editing, history and terminal I/O stay with the embedding shell.
//!
//! # Example
//!
//! ```
//! use shell_tree_core::*;
//!
//! let root = Command::root().with_child(
//!     Command::new("user")
//!         .with_alias("u")
//!         .with_help("Manage users")
//!         .with_child(Command::new("add"))
//!         .with_child(Command::new("remove"))
//!         .with_optional_child(
//!             Command::new("--role").with_completer(|_| vec!["admin".into(), "guest".into()]),
//!         ),
//! );
//!
//! let completer = Completer::new(&root);
//! assert_eq!(completer.complete("u re", 4).suggestions, vec!["move"]);
//! assert_eq!(completer.complete("u --role g", 10).suggestions, vec!["uest"]);
//! assert!(validate_tree(&root).is_empty());
//! ```

mod command;
mod complete;
mod definition;
mod error;
mod help;
mod resolve;
mod shared;
mod tokenize;
mod validate;

pub use command::{Command, CompleterFn, Handler, PrefixCompleterFn};
pub use complete::{Completer, Completion, DisabledFn};
pub use definition::{CommandDefinition, check_tree, load_tree};
pub use error::{Result, TreeError};
pub use resolve::{OptionalCapture, Resolution};
pub use shared::SharedTree;
pub use tokenize::{ShellTokenizer, Tokenizer, WhitespaceTokenizer, tokenize};
pub use validate::{ValidationError, validate_tree};
