//! Interactive-style completion example.
//!
//! Builds a small admin shell in code and replays a few keystroke states
//! through the completer, the way a line editor would on each tab press.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p shell-tree-demos --example admin_shell
//! ```

use shell_tree_core::{Command, Completer, SharedTree};

fn main() {
    let root = build_tree();
    let completer = Completer::new(&root);

    for line in ["", "us", "user ", "user --role ", "user --role ad", "service st", "service status"] {
        let completion = completer.complete(line, line.len());
        println!(
            "{line:<18} -> replace {} byte(s), suggestions {:?}",
            completion.replace_len, completion.suggestions
        );
    }

    println!();
    println!("Resolving \"u --verbose extra\":");
    let words: Vec<String> = ["u", "--verbose", "extra"].iter().map(|w| w.to_string()).collect();
    let found = root.find_cmd(&words);
    println!("  command: {:?}", found.command_name());
    for capture in &found.optional {
        println!("  optional: {} = {:?}", capture.command.name, capture.value);
    }
    println!("  args: {:?}", found.args);

    if let Some(user) = root.find_child("user") {
        print!("{}", user.help_text());
    }

    // Shared between an editor thread and the code that registers commands.
    let shared = SharedTree::new(root);
    shared.update(|root| root.add_cmd(Command::new("shutdown").with_help("Stop everything")));
    println!("After registering shutdown: {:?}", shared.complete("s", 1).suggestions);
    shared.update(|root| {
        if let Some(service) = root.child_mut("service") {
            service.add_cmd(Command::new("restart"));
        }
    });
    println!("Service commands now: {:?}", shared.complete("service ", 8).suggestions);
}

fn build_tree() -> Command {
    Command::root()
        .with_child(
            Command::new("user")
                .with_alias("u")
                .with_help("Manage users")
                .with_child(Command::new("add").with_help("Add a user"))
                .with_child(Command::new("remove").with_alias("rm").with_help("Remove a user"))
                .with_optional_child(Command::new("--verbose").with_help("Chatty output"))
                .with_optional_child(
                    Command::new("--role")
                        .with_help("Filter by role")
                        .with_completer(|_| vec!["admin".to_string(), "guest".to_string()]),
                ),
        )
        .with_child(
            Command::new("service")
                .with_help("Control services")
                .with_child(Command::new("status"))
                .with_child(Command::new("stop"))
                .with_child(Command::new("start")),
        )
        .with_child(Command::new("help").with_help("Show help"))
}
