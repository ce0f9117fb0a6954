//! Line-oriented command layer behind the `treeviz` binary.
//!
//! One command per input line, one JSON result document per command. Parsing
//! is separate from execution so the binary can exit non-zero on malformed
//! input while domain failures (not found, duplicate) stay ordinary results.

use serde_json::{json, Value};

use crate::error::CommandError;
use crate::traversal::TraversalKind;
use crate::tree::BalancedTree;

/// A parsed input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(i64),
    Delete(i64),
    Find(i64),
    Traverse(TraversalKind),
    Snapshot,
    Print,
    Clear,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert(_) => "insert",
            Command::Delete(_) => "delete",
            Command::Find(_) => "find",
            Command::Traverse(_) => "traverse",
            Command::Snapshot => "snapshot",
            Command::Print => "print",
            Command::Clear => "clear",
        }
    }
}

/// Parse one input line. Blank lines come back as [`CommandError::Empty`];
/// callers usually skip those.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(op) = words.next() else {
        return Err(CommandError::Empty);
    };

    let command = match op {
        "insert" => Command::Insert(parse_value(words.next(), "insert")?),
        "delete" => Command::Delete(parse_value(words.next(), "delete")?),
        "find" => Command::Find(parse_value(words.next(), "find")?),
        "traverse" => {
            let name = words.next().ok_or(CommandError::MissingValue("traverse"))?;
            let kind = TraversalKind::from_name(name)
                .ok_or_else(|| CommandError::UnknownTraversal(name.to_string()))?;
            Command::Traverse(kind)
        }
        "snapshot" => Command::Snapshot,
        "print" => Command::Print,
        "clear" => Command::Clear,
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    if words.next().is_some() {
        return Err(CommandError::UnexpectedArgument(command.name()));
    }
    Ok(command)
}

fn parse_value(word: Option<&str>, op: &'static str) -> Result<i64, CommandError> {
    let word = word.ok_or(CommandError::MissingValue(op))?;
    word.parse().map_err(|_| CommandError::InvalidValue(word.to_string()))
}

/// Execute one command against the tree and return its JSON result document.
pub fn run_command(tree: &mut BalancedTree, command: Command, trace: bool) -> Value {
    match command {
        Command::Insert(value) => report_json(tree.insert(value, trace)),
        Command::Delete(value) => report_json(tree.delete(value, trace)),
        Command::Find(value) => report_json(tree.find(value, trace)),
        Command::Traverse(kind) => json!({
            "traversal": kind.as_str(),
            "values": tree.traverse(kind),
        }),
        Command::Snapshot => json!({ "nodes": tree.render_snapshot() }),
        Command::Print => json!({ "tree": tree.print() }),
        Command::Clear => {
            tree.clear();
            json!({ "cleared": true })
        }
    }
}

fn report_json<T: serde::Serialize>(report: T) -> Value {
    serde_json::to_value(report).expect("reports serialize to plain JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::TreeKind;

    #[test]
    fn parses_every_command() {
        assert_eq!(parse_command("insert 42"), Ok(Command::Insert(42)));
        assert_eq!(parse_command("delete -7"), Ok(Command::Delete(-7)));
        assert_eq!(parse_command("find 0"), Ok(Command::Find(0)));
        assert_eq!(
            parse_command("traverse levelorder"),
            Ok(Command::Traverse(TraversalKind::LevelOrder))
        );
        assert_eq!(parse_command("snapshot"), Ok(Command::Snapshot));
        assert_eq!(parse_command("print"), Ok(Command::Print));
        assert_eq!(parse_command("clear"), Ok(Command::Clear));
        assert_eq!(parse_command("  insert   5  "), Ok(Command::Insert(5)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_command(""), Err(CommandError::Empty));
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert_eq!(parse_command("grow 1"), Err(CommandError::UnknownCommand("grow".into())));
        assert_eq!(parse_command("insert"), Err(CommandError::MissingValue("insert")));
        assert_eq!(parse_command("insert ten"), Err(CommandError::InvalidValue("ten".into())));
        assert_eq!(
            parse_command("traverse sideways"),
            Err(CommandError::UnknownTraversal("sideways".into()))
        );
        assert_eq!(parse_command("traverse"), Err(CommandError::MissingValue("traverse")));
        assert_eq!(parse_command("print now"), Err(CommandError::UnexpectedArgument("print")));
        assert_eq!(parse_command("insert 1 2"), Err(CommandError::UnexpectedArgument("insert")));
    }

    #[test]
    fn commands_drive_the_tree() {
        let mut tree = BalancedTree::new(TreeKind::Avl);

        let result = run_command(&mut tree, Command::Insert(10), false);
        assert_eq!(result["success"], true);
        assert_eq!(result["path"][0], 10);

        run_command(&mut tree, Command::Insert(5), false);
        run_command(&mut tree, Command::Insert(15), false);

        let result = run_command(&mut tree, Command::Traverse(TraversalKind::InOrder), false);
        assert_eq!(result["traversal"], "inorder");
        assert_eq!(result["values"], serde_json::json!([5, 10, 15]));

        let result = run_command(&mut tree, Command::Find(5), false);
        assert_eq!(result["found"], true);
        assert_eq!(result["steps"], Value::Null);

        let result = run_command(&mut tree, Command::Snapshot, false);
        assert_eq!(result["nodes"].as_array().unwrap().len(), 3);

        let result = run_command(&mut tree, Command::Print, false);
        assert!(result["tree"].as_str().unwrap().starts_with("10"));

        let result = run_command(&mut tree, Command::Clear, false);
        assert_eq!(result["cleared"], true);
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn traced_commands_embed_steps() {
        let mut tree = BalancedTree::new(TreeKind::RedBlack);
        let result = run_command(&mut tree, Command::Insert(1), true);
        let steps = result["steps"].as_array().unwrap();
        assert!(!steps.is_empty());
        assert_eq!(steps[0]["message"], "Inserting root node 1");

        let result = run_command(&mut tree, Command::Delete(9), true);
        assert_eq!(result["success"], false);
        assert_eq!(result["steps"].as_array().unwrap().len(), 1);
    }
}
