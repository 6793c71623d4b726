mod logging;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use shell_tree_core::{
    Command as TreeCommand, CommandDefinition, Completer, Handler, ShellTokenizer, check_tree,
    load_tree, tokenize,
};

/// Output format for machine-readable subcommands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "shell-tree", disable_help_subcommand = true)]
#[command(about = "Resolve and complete shell input against a command tree definition")]
struct Cli {
    /// Log resolution and completion decisions to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Only log errors.
    #[arg(long, short, global = true, conflicts_with = "verbose")]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print completion suggestions for a line.
    Complete(CompleteArgs),
    /// Print the command, optional captures and args a line resolves to.
    Resolve(ResolveArgs),
    /// Print the help text of a command.
    Help(HelpArgs),
    /// Check a tree definition for unreachable names and aliases.
    Validate(TreeArgs),
    /// Resolve a line and run the matched command's handler.
    Exec(ExecArgs),
}

#[derive(Debug, Args)]
struct TreeArgs {
    /// Tree definition file (.yaml, .yml or .json).
    #[arg(long)]
    tree: PathBuf,
}

#[derive(Debug, Args)]
struct CompleteArgs {
    #[command(flatten)]
    tree: TreeArgs,
    /// Input line typed so far.
    #[arg(long, allow_hyphen_values = true)]
    line: String,
    /// Cursor byte offset (default: end of line).
    #[arg(long)]
    cursor: Option<usize>,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct ResolveArgs {
    #[command(flatten)]
    tree: TreeArgs,
    /// Input line to resolve.
    #[arg(long, allow_hyphen_values = true)]
    line: String,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
}

#[derive(Debug, Args)]
struct HelpArgs {
    #[command(flatten)]
    tree: TreeArgs,
    /// Command path below the root (names or aliases).
    #[arg(allow_hyphen_values = true)]
    path: Vec<String>,
}

#[derive(Debug, Args)]
struct ExecArgs {
    #[command(flatten)]
    tree: TreeArgs,
    /// Input line to run.
    #[arg(long, allow_hyphen_values = true)]
    line: String,
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = logging::initialize_logging(cli.verbose, cli.quiet) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }

    let result = match cli.command {
        Command::Complete(args) => run_complete(args),
        Command::Resolve(args) => run_resolve(args),
        Command::Help(args) => run_help(args),
        Command::Validate(args) => run_validate(args),
        Command::Exec(args) => run_exec(args),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run_complete(args: CompleteArgs) -> Result<(), String> {
    let root = load(&args.tree.tree)?;
    let cursor = args.cursor.unwrap_or(args.line.len());
    let completion = Completer::new(&root).complete(&args.line, cursor);

    match args.format {
        CliOutputFormat::Json => {
            let raw = serde_json::to_string_pretty(&completion)
                .map_err(|err| format!("Failed to serialize completion: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Text => {
            for suggestion in &completion.suggestions {
                println!("{suggestion:?}");
            }
        }
    }
    Ok(())
}

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let root = load(&args.tree.tree)?;
    let words = tokenize(&ShellTokenizer, &args.line);
    let found = root.find_cmd(&words);

    match args.format {
        CliOutputFormat::Json => {
            let optional: serde_json::Map<String, serde_json::Value> = found
                .optional
                .iter()
                .map(|capture| (capture.command.name.clone(), capture.value.into()))
                .collect();
            let raw = serde_json::to_string_pretty(&serde_json::json!({
                "command": found.command_name(),
                "optional": optional,
                "args": found.args,
            }))
            .map_err(|err| format!("Failed to serialize resolution: {err}"))?;
            println!("{raw}");
        }
        CliOutputFormat::Text => {
            println!("command: {}", found.command_name().unwrap_or("<none>"));
            for capture in &found.optional {
                println!("optional: {}={}", capture.command.name, capture.value);
            }
            println!("args: {}", found.args.join(" "));
        }
    }
    Ok(())
}

fn run_help(args: HelpArgs) -> Result<(), String> {
    let root = load(&args.tree.tree)?;
    let cmd = walk_path(&root, &args.path)?;
    print!("{}", cmd.help_text());
    Ok(())
}

fn run_validate(args: TreeArgs) -> Result<(), String> {
    let root = CommandDefinition::load(&args.tree)
        .map_err(|err| format!("Failed to load '{}': {err}", args.tree.display()))?
        .build();
    let root = check_tree(root).map_err(|err| err.to_string())?;
    println!(
        "Validated '{}': {} command(s), {} optional command(s) at the root.",
        args.tree.display(),
        root.children().len(),
        root.optional_children().len()
    );
    Ok(())
}

fn run_exec(args: ExecArgs) -> Result<(), String> {
    let definition = CommandDefinition::load(&args.tree.tree)
        .map_err(|err| format!("Failed to load '{}': {err}", args.tree.tree.display()))?;
    let root = check_tree(definition.build_with(&echo_handler)).map_err(|err| err.to_string())?;

    let words = tokenize(&ShellTokenizer, &args.line);
    let found = root.find_cmd(&words);
    let Some(cmd) = found.command else {
        return Err(format!("No command matches '{}'", args.line));
    };
    if !cmd.run(found.args) {
        return Err(format!("Command '{}' has no handler", cmd.name));
    }
    Ok(())
}

/// Handler that prints the command path and the args it was given.
fn echo_handler(path: &[String]) -> Option<Handler> {
    let label = path.join(" ");
    Some(Box::new(move |args: &[String]| {
        if args.is_empty() {
            println!("{label}");
        } else {
            println!("{label} {}", args.join(" "));
        }
    }))
}

fn load(path: &Path) -> Result<TreeCommand, String> {
    load_tree(path).map_err(|err| format!("Failed to load '{}': {err}", path.display()))
}

/// Follows `path` through required children, by name or alias.
fn walk_path<'a>(root: &'a TreeCommand, path: &[String]) -> Result<&'a TreeCommand, String> {
    let mut cmd = root;
    for (i, word) in path.iter().enumerate() {
        cmd = cmd
            .find_child(word)
            .ok_or_else(|| format!("Unknown command: {}", path[..=i].join(" ")))?;
    }
    Ok(cmd)
}
