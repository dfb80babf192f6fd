pub mod ast;
pub mod matcher;
pub mod parser;

pub use matcher::{match_node, MatchTable};
pub use parser::{parse_pattern, InvalidPattern};

/// Report whether `pattern` matches anywhere in `input`.
pub fn is_match(input: &str, pattern: &str) -> Result<bool, InvalidPattern> {
    let node = parse_pattern(pattern)?;
    let chars: Vec<char> = input.chars().collect();
    Ok(match_node(&node, &chars).has_match())
}
