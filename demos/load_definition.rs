//! Definition loading example.
//!
//! Writes a YAML tree definition to a temporary file, loads and validates it,
//! then completes and runs a line against it.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p shell-tree-demos --example load_definition
//! ```

use shell_tree_core::{CommandDefinition, Completer, Handler, ShellTokenizer, check_tree, tokenize};

const TREE: &str = r#"
name: deploy
help: Deployment shell
commands:
  - name: release
    aliases: [rel]
    help: Cut a release
    optional:
      - name: --env
        help: Target environment
        values: [staging, production]
  - name: rollback
    help: Undo the last release
"#;

fn main() {
    let dir = std::env::temp_dir().join("shell_tree_example_definition");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("deploy.yaml");
    std::fs::write(&path, TREE).unwrap();

    let definition = CommandDefinition::load(&path).unwrap();
    let root = check_tree(definition.build_with(&print_handler)).unwrap();
    print!("{}", root.help_text());

    let completer = Completer::new(&root);
    let line = "rel --env pro";
    println!("{line:?} completes to {:?}", completer.complete(line, line.len()).suggestions);

    let words = tokenize(&ShellTokenizer, "release --env staging");
    let found = root.find_cmd(&words);
    if let Some(cmd) = found.command {
        cmd.run(found.args);
    }

    std::fs::remove_dir_all(&dir).ok();
}

fn print_handler(path: &[String]) -> Option<Handler> {
    let label = path.join(" ");
    Some(Box::new(move |args: &[String]| println!("running {label} with {args:?}")))
}
