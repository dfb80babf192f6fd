use crate::ast::{AnchorKind, PatternNode, RepeatKind};

/// Every substring of one line that a pattern matches.
///
/// For a text of length L this is an (L+1) x (L+1) boolean matrix indexed
/// `[begin][end]` with `begin <= end`: `get(begin, end)` is true iff the
/// pattern matches `text[begin..end)`. Whether the pattern can match the
/// empty string is carried in a separate `nullable` flag, so the matrix
/// holds genuine spans only and the diagonal stays false.
#[derive(Debug, Clone)]
pub struct MatchTable {
    len: usize,
    cells: Vec<bool>,
    nullable: bool,
}

impl MatchTable {
    fn new(len: usize) -> Self {
        Self {
            len,
            cells: vec![false; (len + 1) * (len + 1)],
            nullable: false,
        }
    }

    /// Length of the text this table was built for.
    pub fn text_len(&self) -> usize {
        self.len
    }

    pub fn get(&self, begin: usize, end: usize) -> bool {
        self.cells[begin * (self.len + 1) + end]
    }

    fn set(&mut self, begin: usize, end: usize) {
        self.cells[begin * (self.len + 1) + end] = true;
    }

    fn or_cells(&mut self, other: &MatchTable) {
        for (cell, &src) in self.cells.iter_mut().zip(&other.cells) {
            *cell |= src;
        }
    }

    /// True if the pattern can match the empty string.
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    /// True if the pattern matches anywhere in the line. A nullable pattern
    /// matches every line, the empty line included.
    pub fn has_match(&self) -> bool {
        self.nullable || self.cells.iter().any(|&cell| cell)
    }

    /// True if position `k` falls inside some matched span. Zero-width
    /// matches cover no position.
    pub fn covers(&self, k: usize) -> bool {
        if k >= self.len {
            return false;
        }
        for begin in 0..=k {
            for end in (k + 1)..=self.len {
                if self.get(begin, end) {
                    return true;
                }
            }
        }
        false
    }
}

/// Build the match table for `node` against `text`.
///
/// Pure in `(node, text)`: each call allocates its own tables and composite
/// nodes drop their children's tables on the way out, so one tree can be
/// matched against many lines, concurrently if need be.
pub fn match_node(node: &PatternNode, text: &[char]) -> MatchTable {
    let len = text.len();
    match node {
        PatternNode::Literal(sym) => {
            let mut table = MatchTable::new(len);
            for (i, ch) in text.iter().enumerate() {
                if ch == sym {
                    table.set(i, i + 1);
                }
            }
            table
        }
        PatternNode::Dot => {
            let mut table = MatchTable::new(len);
            for i in 0..len {
                table.set(i, i + 1);
            }
            table
        }
        PatternNode::CharClass { chars, negated } => {
            let mut table = MatchTable::new(len);
            for (i, ch) in text.iter().enumerate() {
                if chars.contains(ch) != *negated {
                    table.set(i, i + 1);
                }
            }
            table
        }
        PatternNode::Anchor { node, kind } => {
            let inner = match_node(node, text);
            let mut table = MatchTable::new(len);
            match kind {
                AnchorKind::Start => {
                    // only spans beginning at position 0 survive
                    for end in 0..=len {
                        if inner.get(0, end) {
                            table.set(0, end);
                        }
                    }
                    table.nullable = inner.nullable;
                }
                AnchorKind::End => {
                    // only spans ending at the end of the line survive
                    for begin in 0..=len {
                        if inner.get(begin, len) {
                            table.set(begin, len);
                        }
                    }
                    // an empty match sits at the end only on empty text
                    table.nullable = inner.nullable && len == 0;
                }
            }
            table
        }
        PatternNode::Repeat { node, kind } => {
            let inner = match_node(node, text);
            match kind {
                RepeatKind::ZeroOrOne => {
                    let mut table = inner;
                    table.nullable = true;
                    table
                }
                RepeatKind::ZeroOrMore => {
                    let mut table = closure(&inner);
                    table.nullable = true;
                    table
                }
                RepeatKind::OneOrMore => {
                    let mut table = closure(&inner);
                    table.nullable = inner.nullable;
                    table
                }
            }
        }
        PatternNode::RepeatRange { node, min, max } => {
            let inner = match_node(node, text);
            let mut table = MatchTable::new(len);
            // `exact` holds the spans made of exactly `count` consecutive
            // occurrences. Every occurrence consumes at least one character,
            // so `count` can never exceed the text length.
            let mut exact = inner.clone();
            exact.nullable = false;
            let cap = max.unwrap_or(len).min(len);
            let mut count = 1;
            while count <= cap && exact.has_match() {
                if count >= *min {
                    table.or_cells(&exact);
                }
                exact = join(&exact, &inner);
                count += 1;
            }
            table.nullable = *min == 0;
            table
        }
        PatternNode::Concat(p1, p2) => {
            let t1 = match_node(p1, text);
            let t2 = match_node(p2, text);
            let mut table = join(&t1, &t2);
            if t2.nullable {
                // p2 contributes a zero-length match after any p1 span
                table.or_cells(&t1);
            }
            if t1.nullable {
                // a zero-length p1 only precedes p2 spans at the line start
                for end in 0..=len {
                    if t2.get(0, end) {
                        table.set(0, end);
                    }
                }
            }
            table.nullable = t1.nullable && t2.nullable;
            table
        }
        PatternNode::Alt(p1, p2) => {
            let t2 = match_node(p2, text);
            let mut table = match_node(p1, text);
            table.or_cells(&t2);
            table.nullable |= t2.nullable;
            table
        }
    }
}

/// Spans that split into an `a` span immediately followed by a `b` span.
fn join(a: &MatchTable, b: &MatchTable) -> MatchTable {
    let len = a.len;
    let mut out = MatchTable::new(len);
    for begin in 0..=len {
        for end in begin..=len {
            for k in begin..=end {
                if a.get(begin, k) && b.get(k, end) {
                    out.set(begin, end);
                    break;
                }
            }
        }
    }
    out
}

/// Smallest table containing `inner` and closed under span concatenation:
/// a span is set iff it splits into one or more consecutive `inner` spans.
///
/// For a fixed `begin` the `end` loop runs upward, so the prefix `[begin, k)`
/// is already final when `[begin, end)` is considered; the suffix `[k, end)`
/// only ever needs to be a single `inner` span.
fn closure(inner: &MatchTable) -> MatchTable {
    let len = inner.len;
    let mut out = MatchTable::new(len);
    out.or_cells(inner);
    for begin in 0..=len {
        for end in begin..=len {
            for k in (begin + 1)..end {
                if out.get(begin, k) && out.get(k, end) {
                    out.set(begin, end);
                    break;
                }
            }
        }
    }
    out
}
