use super::encoder::{decode, decode_tokens, encode};
use super::ops::{OpKind, diff_codes};
use super::style::DiffStyle;
use super::tokenizer::{is_whitespace_token, tokenize};
use crate::constant::{BIG_DELIMITER, CONTEXT_TOKENS, SMALL_DELIMITER};
use serde::Serialize;
use tracing::debug;

/// A run of text and how to show it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub text: String,
    pub style: DiffStyle,
}

impl Segment {
    pub fn new(text: impl Into<String>, style: DiffStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, DiffStyle::Plain)
    }

    pub fn is_delimiter(&self) -> bool {
        self.style == DiffStyle::Plain && (self.text == BIG_DELIMITER || self.text == SMALL_DELIMITER)
    }
}

/// A decoded edit run: its kind, the tokens it covers and their text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation<'a> {
    pub kind: OpKind,
    pub tokens: Vec<&'a str>,
    pub text: String,
}

/// Word-level edit script turning `old` into `new`.
pub fn diff_operations<'a>(old: &'a str, new: &'a str) -> Vec<Operation<'a>> {
    let old_tokens = tokenize(old);
    let new_tokens = tokenize(new);
    let encoded = encode(&old_tokens, &new_tokens);

    debug!(
        old_tokens = old_tokens.len(),
        new_tokens = new_tokens.len(),
        distinct = encoded.table.len(),
        "diffing snapshots"
    );

    diff_codes(&encoded.old, &encoded.new)
        .into_iter()
        .map(|op| Operation {
            kind: op.kind,
            tokens: decode_tokens(&op.codes, &encoded.table),
            text: decode(&op.codes, &encoded.table),
        })
        .collect()
}

/// Where the walk stands between operations.
#[derive(Debug, Clone, Copy)]
struct WalkState {
    seen_change_cluster: bool,
    in_change_cluster: bool,
    last_change_kind: OpKind,
}

impl WalkState {
    fn new() -> Self {
        Self {
            seen_change_cluster: false,
            in_change_cluster: false,
            last_change_kind: OpKind::Equal,
        }
    }

    fn cross_equal(&mut self) {
        self.in_change_cluster = false;
        self.last_change_kind = OpKind::Equal;
    }

    /// Record a change and return the delimiter that must precede it, if any.
    fn enter_change(&mut self, kind: OpKind) -> Option<&'static str> {
        let delimiter = if !self.in_change_cluster {
            let big = self.seen_change_cluster.then_some(BIG_DELIMITER);
            self.in_change_cluster = true;
            self.seen_change_cluster = true;
            big
        } else if self.last_change_kind != OpKind::Equal && self.last_change_kind != kind {
            Some(SMALL_DELIMITER)
        } else {
            None
        };
        self.last_change_kind = kind;
        delimiter
    }
}

/// Turn two snapshots into display segments.
///
/// Unchanged text never shows up on its own; it only lends up to
/// [`CONTEXT_TOKENS`] words on either side of each change. Independent
/// change clusters are split by a big delimiter, a delete/insert swap within
/// one cluster by a small one.
pub fn build(prev: Option<&str>, curr: Option<&str>) -> Vec<Segment> {
    let old = prev.unwrap_or_default();
    let new = curr.unwrap_or_default();
    if old.is_empty() && new.is_empty() {
        return Vec::new();
    }

    let ops = diff_operations(old, new);
    let mut state = WalkState::new();
    let mut segments = Vec::new();

    for (idx, op) in ops.iter().enumerate() {
        let style = match op.kind {
            OpKind::Equal => {
                state.cross_equal();
                continue;
            }
            OpKind::Insert => DiffStyle::Inserted,
            OpKind::Delete => DiffStyle::Deleted,
        };

        if let Some(delimiter) = state.enter_change(op.kind) {
            segments.push(Segment::plain(delimiter));
        }

        push_context(&mut segments, context_before(&ops, idx));
        segments.push(Segment::new(op.text.as_str(), style));
        push_context(&mut segments, context_after(&ops, idx));
    }

    debug!(
        operations = ops.len(),
        segments = segments.len(),
        "built diff segments"
    );
    segments
}

fn push_context(segments: &mut Vec<Segment>, context: String) {
    if !context.is_empty() {
        segments.push(Segment::plain(context));
    }
}

fn context_before(ops: &[Operation<'_>], idx: usize) -> String {
    ops[..idx]
        .iter()
        .rev()
        .find(|op| op.kind == OpKind::Equal)
        .map(|op| tail_context(&op.tokens))
        .unwrap_or_default()
}

fn context_after(ops: &[Operation<'_>], idx: usize) -> String {
    ops[idx + 1..]
        .iter()
        .find(|op| op.kind == OpKind::Equal)
        .map(|op| head_context(&op.tokens))
        .unwrap_or_default()
}

/// Last [`CONTEXT_TOKENS`] words of `tokens` with the whitespace around them.
fn tail_context(tokens: &[&str]) -> String {
    let mut words = 0;
    let mut start = tokens.len();
    for (i, token) in tokens.iter().enumerate().rev() {
        if !is_whitespace_token(token) {
            words += 1;
            if words > CONTEXT_TOKENS {
                break;
            }
        }
        start = i;
    }
    tokens[start..].concat()
}

/// First [`CONTEXT_TOKENS`] words of `tokens` with the whitespace around them.
fn head_context(tokens: &[&str]) -> String {
    let mut words = 0;
    let mut end = 0;
    for (i, token) in tokens.iter().enumerate() {
        if !is_whitespace_token(token) {
            words += 1;
            if words > CONTEXT_TOKENS {
                break;
            }
        }
        end = i + 1;
    }
    tokens[..end].concat()
}
