use proptest::prelude::*;
use shell_tree_core::{Command, Completer, Completion, TreeError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn words(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|w| w.to_string()).collect()
}

/// A small admin shell: users, services and a global `--help`.
fn admin_tree() -> Command {
    Command::root()
        .with_child(
            Command::new("user")
                .with_alias("u")
                .with_help("Manage users")
                .with_child(Command::new("add").with_help("Add a user"))
                .with_child(Command::new("remove").with_alias("rm"))
                .with_optional_child(Command::new("--verbose"))
                .with_optional_child(
                    Command::new("--role")
                        .with_completer(|_| vec!["admin".to_string(), "guest".to_string()]),
                ),
        )
        .with_child(
            Command::new("service")
                .with_child(Command::new("status"))
                .with_child(Command::new("stop"))
                .with_child(Command::new("start")),
        )
        .with_optional_child(Command::new("--help"))
}

fn complete_at_end(root: &Command, line: &str) -> Completion {
    Completer::new(root).complete(line, line.len())
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

#[test]
fn alias_with_optional_and_value() {
    let root = admin_tree();
    let w = words(&["u", "--verbose", "extra"]);
    let found = root.find_cmd(&w);

    assert_eq!(found.command_name(), Some("user"));
    assert_eq!(found.optional.len(), 1);
    assert_eq!(found.optional_value("--verbose"), Some("extra"));
    assert_eq!(found.args, &words(&["--verbose", "extra"])[..]);
}

#[test]
fn alias_behaves_like_name() {
    let mut root = Command::root();
    root.add_cmd(Command::new("a").with_alias("b").with_child(Command::new("x")));

    let by_alias = words(&["b", "x"]);
    let by_name = words(&["a", "x"]);
    let a = root.find_cmd(&by_alias);
    let b = root.find_cmd(&by_name);

    assert_eq!(a.command_name(), b.command_name());
    assert_eq!(a.command_name(), Some("x"));
    assert_eq!(a.args, b.args);
}

#[test]
fn nested_alias_resolution() {
    let root = admin_tree();
    let w = words(&["u", "rm", "bob"]);
    let found = root.find_cmd(&w);

    assert_eq!(found.command_name(), Some("remove"));
    assert_eq!(found.args, &w[2..]);
}

#[test]
fn is_valid_without_completer_is_an_error() {
    let root = admin_tree();
    let verbose = root
        .find_child("user")
        .and_then(|user| user.find_optional_child("--verbose"))
        .unwrap();

    assert!(matches!(
        verbose.is_valid("anything"),
        Err(TreeError::MissingCompleter(_))
    ));
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

#[test]
fn root_level_suggestions_include_optional() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "");

    assert_eq!(completion.suggestions, vec!["service", "user", "--help"]);
}

#[test]
fn service_subcommands_filtered_by_prefix() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "service st");

    assert_eq!(completion.suggestions, vec!["art", "atus", "op"]);
    assert_eq!(completion.replace_len, 2);
}

#[test]
fn complete_unique_word_yields_space() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "service status");

    assert_eq!(completion.suggestions, vec![" "]);
    assert_eq!(completion.replace_len, 6);
}

#[test]
fn role_values_completed_after_flag() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "user --role ");

    assert_eq!(completion.suggestions, vec!["admin", "guest"]);
    assert_eq!(completion.replace_len, 0);
}

#[test]
fn role_values_completed_after_valueless_flag() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "user --verbose --role ");

    assert_eq!(completion.suggestions, vec!["admin", "guest"]);
}

#[test]
fn valueless_flag_keeps_subcommands_on_offer() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "user --verbose ");

    assert_eq!(
        completion.suggestions,
        vec!["add", "remove", "--role", "--verbose"]
    );
}

#[test]
fn optional_chain_with_valid_value_then_valueless_flag() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "u --role admin --verbose ");

    assert_eq!(
        completion.suggestions,
        vec!["add", "remove", "--role", "--verbose"]
    );
}

#[test]
fn optional_chain_completes_pending_value_prefix() {
    let root = admin_tree();
    let completion = complete_at_end(&root, "u --verbose loud --role gu");

    assert_eq!(completion.suggestions, vec!["est"]);
    assert_eq!(completion.replace_len, 2);
}

#[test]
fn disabled_completer_consumes_whole_line() {
    let root = admin_tree();
    let line = "user --role ad";
    let completion = Completer::new(&root)
        .with_disabled(|| true)
        .complete(line, line.len());

    assert!(completion.suggestions.is_empty());
    assert_eq!(completion.replace_len, line.len());
}

#[test]
fn quoted_words_are_single_tokens() {
    let root = Command::root().with_child(
        Command::new("greet").with_completer(|args| {
            if args.len() == 1 && args[0] == "hello world" {
                vec!["again".to_string()]
            } else {
                Vec::new()
            }
        }),
    );
    let completion = complete_at_end(&root, "greet \"hello world\" ");

    assert_eq!(completion.suggestions, vec!["again"]);
}

#[test]
fn help_text_lists_user_commands() {
    let root = admin_tree();
    let user = root.find_child("user").unwrap();

    assert_eq!(
        user.help_text(),
        "\nManage users\n\nCommands:\n  add         Add a user\n  remove      \n\n\
         Optional Commands:\n  --role         \n  --verbose      \n\n"
    );
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn children_always_sorted(names in proptest::collection::vec("[a-z]{1,8}", 0..16)) {
        let mut root = Command::root();
        for name in &names {
            root.add_cmd(Command::new(name.as_str()));
            root.add_optional_cmd(Command::new(name.as_str()));
        }

        let listed: Vec<&str> = root.children().into_iter().map(|c| c.name.as_str()).collect();
        let mut expected: Vec<&str> = names.iter().map(String::as_str).collect();
        expected.sort();
        expected.dedup();
        prop_assert_eq!(&listed, &expected);

        let optional: Vec<&str> = root.optional_children().into_iter().map(|c| c.name.as_str()).collect();
        prop_assert_eq!(&optional, &expected);
    }

    #[test]
    fn resolution_is_deterministic(input in proptest::collection::vec(
        prop_oneof![
            Just("user".to_string()),
            Just("u".to_string()),
            Just("add".to_string()),
            Just("--role".to_string()),
            Just("--verbose".to_string()),
            Just("admin".to_string()),
            "[a-z]{1,4}",
        ],
        0..10,
    )) {
        let root = admin_tree();
        let first = root.find_cmd(&input);
        let second = root.find_cmd(&input);

        prop_assert_eq!(first.command_name(), second.command_name());
        prop_assert_eq!(first.args, second.args);
        let first_opts: Vec<(&str, &str)> = first.optional.iter().map(|c| (c.command.name.as_str(), c.value)).collect();
        let second_opts: Vec<(&str, &str)> = second.optional.iter().map(|c| (c.command.name.as_str(), c.value)).collect();
        prop_assert_eq!(first_opts, second_opts);
    }

    #[test]
    fn suggestions_never_exceed_candidates(prefix in "[a-z]{0,3}") {
        let root = admin_tree();
        let line = format!("service {prefix}");
        let completion = complete_at_end(&root, &line);

        prop_assert!(completion.suggestions.len() <= 3);
        let expected_len = prefix.len();
        prop_assert_eq!(completion.replace_len, expected_len);
    }
}
