//! Command tree shared between a line editor and the code that mutates it.
//!
//! Completion holds the read lock for the whole call, and mutations take the
//! write lock, so a tree is never changed halfway through a completion.

use std::sync::{Arc, PoisonError, RwLock};

use crate::Command;
use crate::complete::{Completer, Completion, DisabledFn};

/// A command tree behind a reader-writer lock.
///
/// # Examples
///
/// ```
/// use shell_tree_core::{Command, SharedTree};
///
/// let tree = SharedTree::new(Command::root().with_child(Command::new("status")));
/// assert_eq!(tree.complete("sta", 3).suggestions, vec!["tus"]);
///
/// tree.update(|root| root.add_cmd(Command::new("start")));
/// assert_eq!(tree.complete("sta", 3).suggestions, vec!["rt", "tus"]);
/// ```
#[derive(Clone)]
pub struct SharedTree {
    root: Arc<RwLock<Command>>,
    disabled: Option<DisabledFn>,
}

impl SharedTree {
    /// Wraps `root`.
    pub fn new(root: Command) -> Self {
        Self {
            root: Arc::new(RwLock::new(root)),
            disabled: None,
        }
    }

    /// Sets the predicate that disables completion.
    pub fn with_disabled<F>(mut self, disabled: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        self.disabled = Some(Arc::new(disabled));
        self
    }

    /// Completes `line` under the read lock.
    pub fn complete(&self, line: &str, pos: usize) -> Completion {
        self.read(|root| {
            Completer::new(root)
                .with_disabled_fn(self.disabled.clone())
                .complete(line, pos)
        })
    }

    /// Runs `f` with shared access to the tree.
    pub fn read<R>(&self, f: impl FnOnce(&Command) -> R) -> R {
        let guard = self.root.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Runs `f` with exclusive access to the tree.
    pub fn update<R>(&self, f: impl FnOnce(&mut Command) -> R) -> R {
        let mut guard = self.root.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_update_visible_to_clones() {
        let tree = SharedTree::new(Command::root());
        let other = tree.clone();
        tree.update(|root| root.add_cmd(Command::new("status")));

        assert_eq!(other.complete("", 0).suggestions, vec!["status"]);
    }

    #[test]
    fn test_disabled_predicate_applies() {
        let tree = SharedTree::new(Command::root().with_child(Command::new("status")))
            .with_disabled(|| true);
        let completion = tree.complete("sta", 3);
        assert!(completion.suggestions.is_empty());
        assert_eq!(completion.replace_len, 3);
    }

    #[test]
    fn test_concurrent_readers() {
        let tree = SharedTree::new(Command::root().with_child(Command::new("status")));
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let tree = tree.clone();
                thread::spawn(move || tree.complete("st", 2).suggestions)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), vec!["atus"]);
        }
    }

    #[test]
    fn test_delete_through_update() {
        let tree = SharedTree::new(Command::root().with_child(Command::new("status")));
        let removed = tree.update(|root| root.delete_cmd("status"));
        assert!(removed.is_some());
        assert!(tree.read(|root| root.children().is_empty()));
    }
}
