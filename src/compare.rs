//! Comparator for canonical mappings.
//!
//! Produces a deterministic, zero-context unified diff between the value
//! sequences of two [`CanonicalMapping`]s. Values are ordered by ascending
//! variable name before diffing, so the result depends only on the resolved
//! configuration state, never on the order the canonicalizer emitted lines.
//!
//! The diff is computed as line-based LCS opcodes (equal / replace / delete /
//! insert); with zero context every non-equal opcode renders as its own hunk.

use crate::mapping::CanonicalMapping;

/// Outcome of comparing two canonical mappings.
///
/// Equality is a distinct, user-visible success condition, not an empty diff
/// listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    /// The two value sequences are identical.
    NoDifferences,
    /// Rendered unified-diff lines: `---`/`+++` headers followed by
    /// zero-context hunks.
    Differences(Vec<String>),
}

/// Edit operation over two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A contiguous edit region: `a[a_start..a_end]` maps to `b[b_start..b_end]`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Opcode {
    tag: Tag,
    a_start: usize,
    a_end: usize,
    b_start: usize,
    b_end: usize,
}

/// Compare two canonical mappings and render a zero-context unified diff.
///
/// # Arguments
///
/// * `from` / `to` - The two mappings to compare
/// * `from_label` / `to_label` - Source identifiers for the diff header,
///   conventionally the two original config file paths
pub fn unified_diff(
    from: &CanonicalMapping,
    to: &CanonicalMapping,
    from_label: &str,
    to_label: &str,
) -> DiffOutcome {
    let a = from.values_by_variable();
    let b = to.values_by_variable();

    let mut lines = Vec::new();
    for op in opcodes(&a, &b) {
        if op.tag == Tag::Equal {
            continue;
        }
        if lines.is_empty() {
            lines.push(format!("--- {}", from_label));
            lines.push(format!("+++ {}", to_label));
        }
        lines.push(format!(
            "@@ -{} +{} @@",
            format_range(op.a_start, op.a_end),
            format_range(op.b_start, op.b_end)
        ));
        for line in &a[op.a_start..op.a_end] {
            lines.push(format!("-{}", line));
        }
        for line in &b[op.b_start..op.b_end] {
            lines.push(format!("+{}", line));
        }
    }

    if lines.is_empty() {
        DiffOutcome::NoDifferences
    } else {
        DiffOutcome::Differences(lines)
    }
}

/// Format a half-open range in unified-diff header notation.
///
/// Length 1 prints just the 1-based line number; other lengths print
/// `start,length`, with empty ranges anchored at the line they follow.
fn format_range(start: usize, stop: usize) -> String {
    let length = stop - start;
    if length == 1 {
        return (start + 1).to_string();
    }
    let beginning = if length == 0 { start } else { start + 1 };
    format!("{},{}", beginning, length)
}

/// Compute edit opcodes between `a` and `b` from a longest common subsequence.
///
/// Opcodes cover both sequences completely and alternate between `Equal` and
/// one of the change tags; adjacent deletions and insertions merge into a
/// single `Replace`.
fn opcodes(a: &[&str], b: &[&str]) -> Vec<Opcode> {
    let matches = lcs_matches(a, b);

    let mut ops = Vec::new();
    let mut a_pos = 0;
    let mut b_pos = 0;

    let mut idx = 0;
    while idx < matches.len() {
        let (ma, mb) = matches[idx];
        push_change(&mut ops, a_pos, ma, b_pos, mb);

        // Coalesce the run of consecutive matches into one Equal opcode.
        let mut end = idx;
        while end + 1 < matches.len()
            && matches[end + 1].0 == matches[end].0 + 1
            && matches[end + 1].1 == matches[end].1 + 1
        {
            end += 1;
        }
        ops.push(Opcode {
            tag: Tag::Equal,
            a_start: ma,
            a_end: matches[end].0 + 1,
            b_start: mb,
            b_end: matches[end].1 + 1,
        });
        a_pos = matches[end].0 + 1;
        b_pos = matches[end].1 + 1;
        idx = end + 1;
    }

    push_change(&mut ops, a_pos, a.len(), b_pos, b.len());
    ops
}

/// Append a change opcode for the gap between two matched regions, if any.
fn push_change(ops: &mut Vec<Opcode>, a_start: usize, a_end: usize, b_start: usize, b_end: usize) {
    let tag = match (a_start < a_end, b_start < b_end) {
        (true, true) => Tag::Replace,
        (true, false) => Tag::Delete,
        (false, true) => Tag::Insert,
        (false, false) => return,
    };
    ops.push(Opcode {
        tag,
        a_start,
        a_end,
        b_start,
        b_end,
    });
}

/// Longest common subsequence as (index in a, index in b) pairs.
fn lcs_matches(a: &[&str], b: &[&str]) -> Vec<(usize, usize)> {
    let n = a.len();
    let m = b.len();

    // lengths[i][j] = LCS length of a[i..] and b[j..]
    let mut lengths = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lengths[i][j] = if a[i] == b[j] {
                lengths[i + 1][j + 1] + 1
            } else {
                lengths[i + 1][j].max(lengths[i][j + 1])
            };
        }
    }

    let mut matches = Vec::with_capacity(lengths[0][0]);
    let mut i = 0;
    let mut j = 0;
    while i < n && j < m {
        if a[i] == b[j] {
            matches.push((i, j));
            i += 1;
            j += 1;
        } else if lengths[i + 1][j] >= lengths[i][j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }
    matches
}
