use super::cleanup::{cleanup_efficiency, cleanup_merge};
use crate::constant::DIFF_TIMEOUT;
use similar::{Algorithm, DiffTag, capture_diff_slices_deadline};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Equal,
    Insert,
    Delete,
}

/// One run of the edit script, still in code form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodedOp {
    pub kind: OpKind,
    pub codes: Vec<u32>,
}

impl CodedOp {
    pub fn new(kind: OpKind, codes: Vec<u32>) -> Self {
        Self { kind, codes }
    }
}

/// Align two code sequences and tidy the result.
///
/// Applying the returned ops left to right turns `old` into `new`: equal and
/// delete runs concatenate to `old`, equal and insert runs to `new`.
pub fn diff_codes(old: &[u32], new: &[u32]) -> Vec<CodedOp> {
    let deadline = Instant::now() + DIFF_TIMEOUT;
    let mut ops = Vec::new();

    for op in capture_diff_slices_deadline(Algorithm::Myers, old, new, Some(deadline)) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => push(&mut ops, OpKind::Equal, &old[old_range]),
            DiffTag::Delete => push(&mut ops, OpKind::Delete, &old[old_range]),
            DiffTag::Insert => push(&mut ops, OpKind::Insert, &new[new_range]),
            DiffTag::Replace => {
                push(&mut ops, OpKind::Delete, &old[old_range]);
                push(&mut ops, OpKind::Insert, &new[new_range]);
            }
        }
    }

    cleanup_merge(&mut ops);
    cleanup_efficiency(&mut ops);
    ops
}

fn push(ops: &mut Vec<CodedOp>, kind: OpKind, codes: &[u32]) {
    if codes.is_empty() {
        return;
    }
    match ops.last_mut() {
        Some(last) if last.kind == kind => last.codes.extend_from_slice(codes),
        _ => ops.push(CodedOp::new(kind, codes.to_vec())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn side(ops: &[CodedOp], skip: OpKind) -> Vec<u32> {
        ops.iter()
            .filter(|op| op.kind != skip)
            .flat_map(|op| op.codes.iter().copied())
            .collect()
    }

    #[test]
    fn identical_sequences_are_one_equal_run() {
        let ops = diff_codes(&[1, 2, 3], &[1, 2, 3]);
        assert_eq!(ops, vec![CodedOp::new(OpKind::Equal, vec![1, 2, 3])]);
    }

    #[test]
    fn empty_inputs_produce_no_ops() {
        assert!(diff_codes(&[], &[]).is_empty());
    }

    #[test]
    fn one_sided_inputs() {
        assert_eq!(
            diff_codes(&[], &[4, 5]),
            vec![CodedOp::new(OpKind::Insert, vec![4, 5])]
        );
        assert_eq!(
            diff_codes(&[4, 5], &[]),
            vec![CodedOp::new(OpKind::Delete, vec![4, 5])]
        );
    }

    #[test]
    fn ops_reconstruct_both_sides() {
        let old = [0, 1, 2, 1, 3, 1, 4, 1, 5, 1, 6];
        let new = [0, 1, 7, 1, 3, 1, 8, 1, 9, 1, 5, 1, 6];
        let ops = diff_codes(&old, &new);
        assert_eq!(side(&ops, OpKind::Insert), old);
        assert_eq!(side(&ops, OpKind::Delete), new);
    }
}
