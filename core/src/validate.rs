//! Command tree validation.
//!
//! Catches structural problems that make parts of a tree unreachable before
//! a shell starts completing against it: empty names, aliases hidden by a
//! sibling's name, and aliases claimed by two siblings.
//!
//! A name present in both the required and the optional map of a node is
//! legal and is not reported.
//!
//! # Examples
//!
//! ```
//! use shell_tree_core::*;
//!
//! let root = Command::new("app").with_child(Command::new("user").with_alias("u"));
//! assert!(validate_tree(&root).is_empty());
//!
//! // Alias "status" can never win over the sibling named "status".
//! let bad = Command::new("app")
//!     .with_child(Command::new("user").with_alias("status"))
//!     .with_child(Command::new("status"));
//! assert!(!validate_tree(&bad).is_empty());
//! ```

use std::collections::{BTreeMap, HashSet};

use thiserror::Error;

use crate::Command;

/// Command tree validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A child has an empty or whitespace-only name.
    #[error("empty command name under: {0}")]
    EmptyName(String),
    /// An alias equals the name of a sibling, so it never resolves.
    #[error("alias '{alias}' is shadowed by a sibling command under: {path}")]
    AliasShadowsSibling {
        /// Space-separated path of the parent node.
        path: String,
        /// The unreachable alias.
        alias: String,
    },
    /// Two siblings share an alias; the first by name wins.
    #[error("duplicate alias '{alias}' under: {path}")]
    DuplicateAlias {
        /// Space-separated path of the parent node.
        path: String,
        /// The shared alias.
        alias: String,
    },
}

/// Validates a command tree.
///
/// Walks both child maps of every node and returns all problems found, in
/// traversal order.
pub fn validate_tree(root: &Command) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut path = Vec::new();
    if !root.name.is_empty() {
        path.push(root.name.clone());
    }
    validate_node(root, &mut path, &mut errors);
    errors
}

fn validate_node(node: &Command, path: &mut Vec<String>, errors: &mut Vec<ValidationError>) {
    validate_siblings(node.child_map(), path, errors);
    validate_siblings(node.optional_child_map(), path, errors);

    for child in node.children().into_iter().chain(node.optional_children()) {
        path.push(child.name.clone());
        validate_node(child, path, errors);
        path.pop();
    }
}

fn validate_siblings(
    siblings: &BTreeMap<String, Command>,
    path: &[String],
    errors: &mut Vec<ValidationError>,
) {
    let joined = display_path(path);
    let mut seen_aliases: HashSet<&str> = HashSet::new();

    for cmd in siblings.values() {
        if cmd.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName(joined.clone()));
        }
        for alias in &cmd.aliases {
            if siblings.contains_key(alias) {
                errors.push(ValidationError::AliasShadowsSibling {
                    path: joined.clone(),
                    alias: alias.clone(),
                });
            } else if !seen_aliases.insert(alias.as_str()) {
                errors.push(ValidationError::DuplicateAlias {
                    path: joined.clone(),
                    alias: alias.clone(),
                });
            }
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_valid_tree() {
        let root = Command::root()
            .with_child(Command::new("user").with_alias("u").with_child(Command::new("add")))
            .with_optional_child(Command::new("--verbose").with_alias("-v"));
        assert!(validate_tree(&root).is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let root = Command::new("app").with_child(Command::new("user").with_child(Command::new(" ")));
        assert_eq!(
            validate_tree(&root),
            vec![ValidationError::EmptyName("app user".to_string())]
        );
    }

    #[test]
    fn test_validate_reports_shadowed_alias() {
        let root = Command::root()
            .with_child(Command::new("start").with_alias("stop"))
            .with_child(Command::new("stop"));
        assert_eq!(
            validate_tree(&root),
            vec![ValidationError::AliasShadowsSibling {
                path: "<root>".to_string(),
                alias: "stop".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_reports_duplicate_alias() {
        let root = Command::new("app")
            .with_child(Command::new("add").with_alias("a"))
            .with_child(Command::new("append").with_alias("a"));
        assert_eq!(
            validate_tree(&root),
            vec![ValidationError::DuplicateAlias {
                path: "app".to_string(),
                alias: "a".to_string(),
            }]
        );
    }

    #[test]
    fn test_validate_allows_same_name_in_both_maps() {
        let root = Command::root()
            .with_child(Command::new("x"))
            .with_optional_child(Command::new("x"));
        assert!(validate_tree(&root).is_empty());
    }

    #[test]
    fn test_validate_walks_optional_children() {
        let root = Command::root().with_optional_child(
            Command::new("--format")
                .with_child(Command::new("json").with_alias("j"))
                .with_child(Command::new("jsonl").with_alias("j")),
        );
        assert_eq!(
            validate_tree(&root),
            vec![ValidationError::DuplicateAlias {
                path: "--format".to_string(),
                alias: "j".to_string(),
            }]
        );
    }
}
