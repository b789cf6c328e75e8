//! Post-processing of the raw edit script.
//!
//! Myers output is minimal but noisy on prose: a one-word equality stranded
//! between two edits reads worse than a single larger replacement. These
//! passes trade a little minimality for readability.

use super::ops::{CodedOp, OpKind};
use crate::constant::DIFF_EDIT_COST;

/// Fold short equalities that split a change into the change itself.
///
/// An equality shorter than the edit cost that has edits on both sides, or a
/// single-token equality with three of the four surrounding edit kinds, costs
/// more to show than to rewrite, so it becomes a delete + insert pair.
pub fn cleanup_efficiency(ops: &mut Vec<CodedOp>) {
    let mut changed = false;
    let mut equalities: Vec<usize> = Vec::new();
    let mut last_equality: Option<Vec<u32>> = None;
    let mut pre_ins = false;
    let mut pre_del = false;
    let mut post_ins = false;
    let mut post_del = false;
    let mut pointer = 0usize;

    while pointer < ops.len() {
        if ops[pointer].kind == OpKind::Equal {
            if ops[pointer].codes.len() < DIFF_EDIT_COST && (post_ins || post_del) {
                equalities.push(pointer);
                pre_ins = post_ins;
                pre_del = post_del;
                last_equality = Some(ops[pointer].codes.clone());
            } else {
                equalities.clear();
                last_equality = None;
            }
            post_ins = false;
            post_del = false;
            pointer += 1;
            continue;
        }

        if ops[pointer].kind == OpKind::Delete {
            post_del = true;
        } else {
            post_ins = true;
        }

        let sides = [pre_ins, pre_del, post_ins, post_del]
            .iter()
            .filter(|&&b| b)
            .count();

        let fold = match (&last_equality, equalities.last()) {
            (Some(eq), Some(_)) => sides == 4 || (eq.len() < DIFF_EDIT_COST / 2 && sides == 3),
            _ => false,
        };

        if fold {
            let at = equalities.pop().unwrap_or_default();
            let codes = last_equality.take().unwrap_or_default();
            ops.insert(at, CodedOp::new(OpKind::Delete, codes));
            ops[at + 1].kind = OpKind::Insert;
            changed = true;

            if pre_ins && pre_del {
                post_ins = true;
                post_del = true;
                equalities.clear();
            } else {
                equalities.pop();
                post_ins = false;
                post_del = false;
                pointer = match equalities.last() {
                    Some(&p) => p + 1,
                    None => 0,
                };
                continue;
            }
        }

        pointer += 1;
    }

    if changed {
        cleanup_merge(ops);
    }
}

/// Coalesce adjacent runs of the same kind and pull shared prefixes and
/// suffixes of a delete/insert pair out into the surrounding equalities.
pub fn cleanup_merge(ops: &mut Vec<CodedOp>) {
    ops.push(CodedOp::new(OpKind::Equal, Vec::new()));

    let mut pointer = 0usize;
    let mut count_delete = 0usize;
    let mut count_insert = 0usize;
    let mut text_delete: Vec<u32> = Vec::new();
    let mut text_insert: Vec<u32> = Vec::new();

    while pointer < ops.len() {
        match ops[pointer].kind {
            OpKind::Insert => {
                count_insert += 1;
                text_insert.extend_from_slice(&ops[pointer].codes);
                pointer += 1;
            }
            OpKind::Delete => {
                count_delete += 1;
                text_delete.extend_from_slice(&ops[pointer].codes);
                pointer += 1;
            }
            OpKind::Equal => {
                if count_delete + count_insert > 1 {
                    if count_delete != 0 && count_insert != 0 {
                        let prefix = common_prefix(&text_insert, &text_delete);
                        if prefix != 0 {
                            let first = pointer - count_delete - count_insert;
                            if first > 0 && ops[first - 1].kind == OpKind::Equal {
                                ops[first - 1]
                                    .codes
                                    .extend_from_slice(&text_insert[..prefix]);
                            } else {
                                ops.insert(
                                    0,
                                    CodedOp::new(OpKind::Equal, text_insert[..prefix].to_vec()),
                                );
                                pointer += 1;
                            }
                            text_insert.drain(..prefix);
                            text_delete.drain(..prefix);
                        }

                        let suffix = common_suffix(&text_insert, &text_delete);
                        if suffix != 0 {
                            let mut codes = text_insert[text_insert.len() - suffix..].to_vec();
                            codes.extend_from_slice(&ops[pointer].codes);
                            ops[pointer].codes = codes;
                            text_insert.truncate(text_insert.len() - suffix);
                            text_delete.truncate(text_delete.len() - suffix);
                        }
                    }

                    let first = pointer - count_delete - count_insert;
                    ops.drain(first..pointer);
                    pointer = first;
                    if !text_delete.is_empty() {
                        let codes = std::mem::take(&mut text_delete);
                        ops.insert(pointer, CodedOp::new(OpKind::Delete, codes));
                        pointer += 1;
                    }
                    if !text_insert.is_empty() {
                        let codes = std::mem::take(&mut text_insert);
                        ops.insert(pointer, CodedOp::new(OpKind::Insert, codes));
                        pointer += 1;
                    }
                    pointer += 1;
                } else if pointer != 0 && ops[pointer - 1].kind == OpKind::Equal {
                    let codes = ops.remove(pointer).codes;
                    ops[pointer - 1].codes.extend(codes);
                } else {
                    pointer += 1;
                }
                count_delete = 0;
                count_insert = 0;
                text_delete.clear();
                text_insert.clear();
            }
        }
    }

    ops.retain(|op| !op.codes.is_empty());

    // Slide single edits sitting between two equalities so that one of the
    // equalities disappears, e.g. `A<ins>BA</ins>C` -> `<ins>AB</ins>AC`.
    let mut shifted = false;
    let mut pointer = 1usize;
    while pointer + 1 < ops.len() {
        if ops[pointer - 1].kind == OpKind::Equal && ops[pointer + 1].kind == OpKind::Equal {
            let prev = ops[pointer - 1].codes.clone();
            let next = ops[pointer + 1].codes.clone();
            let current = ops[pointer].codes.clone();

            if current.ends_with(&prev) {
                let mut moved = prev.clone();
                moved.extend_from_slice(&current[..current.len() - prev.len()]);
                ops[pointer].codes = moved;
                let mut following = prev;
                following.extend_from_slice(&next);
                ops[pointer + 1].codes = following;
                ops.remove(pointer - 1);
                shifted = true;
            } else if current.starts_with(&next) {
                ops[pointer - 1].codes.extend_from_slice(&next);
                let mut moved = current[next.len()..].to_vec();
                moved.extend_from_slice(&next);
                ops[pointer].codes = moved;
                ops.remove(pointer + 1);
                shifted = true;
            }
        }
        pointer += 1;
    }

    if shifted {
        cleanup_merge(ops);
    }
}

fn common_prefix(a: &[u32], b: &[u32]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn common_suffix(a: &[u32], b: &[u32]) -> usize {
    a.iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count()
}
