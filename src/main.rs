use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;

use anyhow::{bail, Context, Result};

use ugrep::{match_node, parse_pattern, MatchTable};

// Longest input line the front end accepts; the engine itself has no limit.
const MAX_LINE_LEN: usize = 100;

const RED: &str = "\x1b[31m";
const RESET: &str = "\x1b[0m";

// Print one matching line, wrapping the covered positions in red.
fn print_matched_line(line: &[char], table: &MatchTable) {
    let mut red = false;
    for (k, ch) in line.iter().enumerate() {
        if table.covers(k) != red {
            red = !red;
            print!("{}", if red { RED } else { RESET });
        }
        print!("{ch}");
    }
    if red {
        print!("{RESET}");
    }
    println!();
}

fn grep(pattern: &str, input: impl BufRead) -> Result<()> {
    let node = parse_pattern(pattern)?;
    for line in input.lines() {
        let line = line.context("failed to read input")?;
        let chars: Vec<char> = line.chars().collect();
        if chars.len() > MAX_LINE_LEN {
            bail!("Input line too long");
        }
        let table = match_node(&node, &chars);
        if table.has_match() {
            print_matched_line(&chars, &table);
        }
    }
    Ok(())
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        bail!("usage: ugrep <pattern> [input-file.txt]");
    }
    let pattern = &args[1];
    match args.get(2) {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Can't open input file: {path}"))?;
            grep(pattern, BufReader::new(file))
        }
        None => grep(pattern, io::stdin().lock()),
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        process::exit(1);
    }
}
