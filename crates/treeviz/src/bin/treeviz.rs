//! `treeviz` — drive a balanced tree from the command line.
//!
//! Usage:
//!   treeviz [--tree avl|redblack] [--trace]
//!
//! Commands are read one per line from stdin: `insert N`, `delete N`,
//! `find N`, `traverse inorder|preorder|postorder|levelorder`, `snapshot`,
//! `print`, `clear`. Each command writes one JSON result document to stdout.
//! With `--trace`, mutating and lookup results embed their step traces.

use std::io::{self, BufRead, Write};

use treeviz::{parse_command, run_command, BalancedTree, CommandError, TreeKind};

fn main() {
    let mut kind = TreeKind::Avl;
    let mut trace = false;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--tree" => {
                let Some(name) = args.next() else {
                    eprintln!("--tree expects avl or redblack");
                    std::process::exit(1);
                };
                match TreeKind::from_name(&name) {
                    Some(k) => kind = k,
                    None => {
                        eprintln!("Unknown tree kind: {name}");
                        std::process::exit(1);
                    }
                }
            }
            "--trace" => trace = true,
            other => {
                eprintln!("Unknown argument: {other}");
                std::process::exit(1);
            }
        }
    }

    let mut tree = BalancedTree::new(kind);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        };
        let result = run_command(&mut tree, command, trace);
        writeln!(out, "{result}").unwrap();
    }
}
