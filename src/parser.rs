use thiserror::Error;

use crate::ast::{AnchorKind, PatternNode, RepeatKind};

/// Error returned when a pattern is not valid syntax.
///
/// The parser never recovers: the first violation aborts the whole parse,
/// whether it is an unmatched delimiter, a bad class range, a malformed
/// quantifier, or leftover characters after a complete parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid pattern")]
pub struct InvalidPattern;

/// Characters that control how patterns are matched rather than matching
/// themselves. `]`, `}`, `,` and `-` are ordinary outside their context.
const SPECIAL: &str = ".^$*?+|()[{";

fn is_ordinary(ch: char) -> bool {
    !SPECIAL.contains(ch)
}

/// Parse a whole pattern string into a tree of pattern nodes.
pub fn parse_pattern(pattern: &str) -> Result<PatternNode, InvalidPattern> {
    Parser::new(pattern).parse()
}

/// Parser for regular expressions.
///
/// The `Parser` struct holds the pattern and the current position.
pub struct Parser<'a> {
    pub pattern: &'a str,
    pub pos: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for the given pattern.
    pub fn new(pattern: &'a str) -> Self {
        Self { pattern, pos: 0 }
    }

    /// Peek at the next character in the pattern without advancing.
    fn peek(&self) -> Option<char> {
        self.pattern[self.pos..].chars().next()
    }

    /// Advance the parser by one character and return it.
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Expect a specific character and advance if it matches.
    fn expect(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Entry point for parsing a regex pattern.
    ///
    /// A `^` is an anchor only at the very start of the whole pattern, where
    /// it wraps the finished tree. Anything left over after the grammar is
    /// done (a stray `)`, for instance) invalidates the pattern.
    ///
    /// Example:
    /// - Pattern: `^a|b` → Anchor { Alt(Literal('a'), Literal('b')), Start }
    pub fn parse(&mut self) -> Result<PatternNode, InvalidPattern> {
        let anchored = self.expect('^');
        let node = self.parse_alt()?;
        if self.pos < self.pattern.len() {
            return Err(InvalidPattern);
        }
        if anchored {
            Ok(PatternNode::Anchor {
                node: Box::new(node),
                kind: AnchorKind::Start,
            })
        } else {
            Ok(node)
        }
    }

    /// Parse alternation (`|`), the loosest-binding layer.
    ///
    /// Example:
    /// - Pattern: `a|b|c` → Alt(Alt(Literal('a'), Literal('b')), Literal('c'))
    fn parse_alt(&mut self) -> Result<PatternNode, InvalidPattern> {
        let mut node = self.parse_seq()?;
        while self.peek() == Some('|') {
            self.advance();
            let rhs = self.parse_seq()?;
            node = PatternNode::Alt(Box::new(node), Box::new(rhs));
        }
        Ok(node)
    }

    /// Parse a sequence of repetitions (concatenation).
    ///
    /// The sequence stops at `|`, `)`, `$` or the end of the pattern. A `$`
    /// at the stop point is consumed and anchors the whole sequence to the
    /// end of the line; a `$` directly after an atom is handled one layer
    /// down instead, so both sites exist in the grammar.
    ///
    /// Example:
    /// - Pattern: `abc`  → Concat(Concat(Literal('a'), Literal('b')), Literal('c'))
    /// - Pattern: `ab*$` → Anchor { Concat(Literal('a'), Repeat(..)), End }
    fn parse_seq(&mut self) -> Result<PatternNode, InvalidPattern> {
        let mut node = self.parse_repeat()?;
        while let Some(ch) = self.peek() {
            if ch == '|' || ch == ')' || ch == '$' {
                break;
            }
            let rhs = self.parse_repeat()?;
            node = PatternNode::Concat(Box::new(node), Box::new(rhs));
        }
        if self.expect('$') {
            node = PatternNode::Anchor {
                node: Box::new(node),
                kind: AnchorKind::End,
            };
        }
        Ok(node)
    }

    /// Parse an atom optionally followed by one quantifier: `+`, `*`, `?`,
    /// or a `{..}` range.
    ///
    /// Example:
    /// - Pattern: `a?`     → Repeat { node: Literal('a'), kind: ZeroOrOne }
    /// - Pattern: `b{2,3}` → RepeatRange { node: Literal('b'), min: 2, max: Some(3) }
    /// - Pattern: `c`      → Literal('c')
    fn parse_repeat(&mut self) -> Result<PatternNode, InvalidPattern> {
        let atom = self.parse_atom()?;
        let kind = match self.peek() {
            Some('+') => RepeatKind::OneOrMore,
            Some('*') => RepeatKind::ZeroOrMore,
            Some('?') => RepeatKind::ZeroOrOne,
            Some('{') => {
                self.advance();
                return self.parse_repeat_range(atom);
            }
            _ => return Ok(atom),
        };
        self.advance();
        Ok(PatternNode::Repeat {
            node: Box::new(atom),
            kind,
        })
    }

    /// Parse a single atom: an ordinary character, `.`, a character class,
    /// or a parenthesized sub-expression. A metacharacter in atom position
    /// (or running out of pattern) is invalid.
    ///
    /// A `$` immediately after the atom, including after a closing `)`,
    /// wraps it in an end anchor before any quantifier is considered.
    ///
    /// Examples:
    /// - Pattern: `(a|b)` → Alt(Literal('a'), Literal('b'))
    /// - Pattern: `[abc]` → CharClass { chars: ['a','b','c'], negated: false }
    /// - Pattern: `a$`    → Anchor { node: Literal('a'), kind: End }
    fn parse_atom(&mut self) -> Result<PatternNode, InvalidPattern> {
        let node = match self.peek() {
            Some('(') => {
                self.advance();
                let node = self.parse_alt()?;
                if !self.expect(')') {
                    return Err(InvalidPattern);
                }
                node
            }
            Some('[') => self.parse_char_class()?,
            Some('.') => {
                self.advance();
                PatternNode::Dot
            }
            Some(ch) if is_ordinary(ch) => {
                self.advance();
                PatternNode::Literal(ch)
            }
            _ => return Err(InvalidPattern),
        };
        if self.expect('$') {
            return Ok(PatternNode::Anchor {
                node: Box::new(node),
                kind: AnchorKind::End,
            });
        }
        Ok(node)
    }

    /// Parse a character class, e.g. `[abc]`, `[a-f0-9]` or `[^abc]`.
    ///
    /// A `-` between two class characters expands to the whole range (the
    /// marker itself is not kept); a `-` first or last in the class is a
    /// literal member. A range running backwards is invalid, as is a class
    /// with no closing `]`. A leading `^` negates the class only when at
    /// least two characters end up in the buffer.
    fn parse_char_class(&mut self) -> Result<PatternNode, InvalidPattern> {
        self.advance(); // consume '['
        let mut chars: Vec<char> = Vec::new();
        let mut pending_dash = false;
        loop {
            let ch = match self.peek() {
                None => return Err(InvalidPattern),
                Some(']') => {
                    self.advance();
                    break;
                }
                Some(ch) => ch,
            };
            self.advance();
            if pending_dash {
                pending_dash = false;
                let start = *chars.last().unwrap();
                if start > ch {
                    return Err(InvalidPattern);
                }
                // Everything above the range start, up to and including `ch`.
                chars.extend((start as u32 + 1..=ch as u32).filter_map(char::from_u32));
                continue;
            }
            if ch == '-' && !chars.is_empty() {
                pending_dash = true;
            } else {
                chars.push(ch);
            }
        }
        if pending_dash {
            chars.push('-');
        }
        let negated = chars.len() > 1 && chars[0] == '^';
        if negated {
            chars.remove(0);
        }
        Ok(PatternNode::CharClass { chars, negated })
    }

    /// Parse the inside of a `{..}` quantifier; the `{` is already consumed.
    ///
    /// Accepted forms: `{m}` and `{m,}` (m or more), `{m,n}`, `{,n}` (up to
    /// n). At least one bound must be present, `min` must not exceed a
    /// bounded `max`, and `{0,0}` is rejected as a useless quantifier.
    fn parse_repeat_range(
        &mut self,
        atom: PatternNode,
    ) -> Result<PatternNode, InvalidPattern> {
        let mut raw = String::new();
        loop {
            match self.peek() {
                None => return Err(InvalidPattern),
                Some('}') => {
                    self.advance();
                    break;
                }
                Some(ch) => {
                    raw.push(ch);
                    self.advance();
                }
            }
        }
        let (min, max) = match raw.split_once(',') {
            None => match repeat_bound(&raw)? {
                Some(min) => (min, None),
                None => return Err(InvalidPattern),
            },
            Some((lo, hi)) => {
                if hi.contains(',') {
                    return Err(InvalidPattern);
                }
                match (repeat_bound(lo)?, repeat_bound(hi)?) {
                    (None, None) => return Err(InvalidPattern),
                    (Some(min), None) => (min, None),
                    (Some(min), Some(max)) => (min, Some(max)),
                    (None, Some(max)) => (0, Some(max)),
                }
            }
        };
        if matches!(max, Some(max) if min > max) {
            return Err(InvalidPattern);
        }
        if min == 0 && max == Some(0) {
            return Err(InvalidPattern);
        }
        Ok(PatternNode::RepeatRange {
            node: Box::new(atom),
            min,
            max,
        })
    }
}

/// One field of a `{..}` quantifier: empty means absent, digits are a
/// bound, anything else is invalid.
fn repeat_bound(field: &str) -> Result<Option<usize>, InvalidPattern> {
    if field.is_empty() {
        return Ok(None);
    }
    if !field.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(InvalidPattern);
    }
    field.parse().map(Some).map_err(|_| InvalidPattern)
}
