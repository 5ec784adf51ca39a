//! # Red-black tree harness
//!
//! Reads one command per line from stdin and prints the result on stdout.
//!
//! Run with: `cargo run --bin harness -- --max-nodes 1000 < commands.txt`

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use red_black_tree::{NodeRef, RBTree, TreeConfig};
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "harness")]
#[command(about = "Drive a red-black tree from stdin commands")]
struct Cli {
    /// JSON file holding a tree configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Upper bound on live nodes
    #[arg(long)]
    max_nodes: Option<usize>,

    /// Node slots to reserve up front
    #[arg(long)]
    initial_capacity: Option<usize>,

    #[arg(long, default_value = "warn")]
    log_level: Level,
}

#[derive(Debug, PartialEq)]
enum Command {
    Insert(Vec<i64>),
    Find(i64),
    Erase(i64),
    Min,
    Max,
    Dump,
    Len,
    Height,
    Check,
    Clear,
    Quit,
}

fn parse_key(word: Option<&str>) -> Result<i64> {
    let word = word.ok_or_else(|| anyhow!("missing key"))?;
    word.parse()
        .with_context(|| format!("invalid key: {}", word))
}

/// Blank lines and lines starting with `#` yield `None`.
fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let name = match words.next() {
        Some(name) if !name.starts_with('#') => name,
        _ => return Ok(None),
    };

    let command = match name {
        "insert" => {
            let keys = words.map(|w| parse_key(Some(w))).collect::<Result<Vec<_>>>()?;
            if keys.is_empty() {
                bail!("insert needs at least one key");
            }
            Command::Insert(keys)
        }
        "find" => Command::Find(parse_key(words.next())?),
        "erase" => Command::Erase(parse_key(words.next())?),
        "min" => Command::Min,
        "max" => Command::Max,
        "dump" => Command::Dump,
        "len" => Command::Len,
        "height" => Command::Height,
        "check" => Command::Check,
        "clear" => Command::Clear,
        "quit" | "exit" => Command::Quit,
        other => bail!("unknown command: {}", other),
    };
    Ok(Some(command))
}

fn describe(tree: &RBTree<i64>, found: Option<NodeRef>) -> String {
    match found {
        Some(node) => format!("{} ({:?})", tree.key(node), tree.color(node)),
        None => "not found".to_string(),
    }
}

fn execute(tree: &mut RBTree<i64>, command: &Command) -> Result<String> {
    let output = match command {
        Command::Insert(keys) => {
            for &key in keys {
                tree.insert(key)?;
            }
            format!("ok {}", tree.len())
        }
        Command::Find(key) => describe(tree, tree.find(*key)),
        Command::Erase(key) => match tree.find(*key) {
            Some(node) => format!("erased {}", tree.erase(node)),
            None => "not found".to_string(),
        },
        Command::Min => describe(tree, tree.min()),
        Command::Max => describe(tree, tree.max()),
        Command::Dump => {
            let keys: Vec<String> = tree.to_vec().iter().map(i64::to_string).collect();
            format!("[{}]", keys.join(", "))
        }
        Command::Len => tree.len().to_string(),
        Command::Height => format!("{} (black {})", tree.height(), tree.black_height()),
        Command::Check => format!("ok black-height {}", tree.validate()?),
        Command::Clear => format!("cleared {}", tree.clear()),
        Command::Quit => String::new(),
    };
    Ok(output)
}

fn load_config(cli: &Cli) -> Result<TreeConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?
        }
        None => TreeConfig::default(),
    };

    if let Some(max_nodes) = cli.max_nodes {
        config.max_nodes = Some(max_nodes);
    }
    if let Some(initial_capacity) = cli.initial_capacity {
        config.initial_capacity = initial_capacity;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let config = load_config(&cli)?;
    info!(?config, "starting harness");
    let mut rb_tree = RBTree::with_config(config)?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(stdout, "error: {:#}", e)?;
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }

        match execute(&mut rb_tree, &command) {
            Ok(output) => writeln!(stdout, "{}", output)?,
            Err(e) => writeln!(stdout, "error: {:#}", e)?,
        }
    }

    rb_tree.destroy();
    Ok(())
}
