//! Unified diff generation.
//!
//! Produces standard unified diff output (three lines of context) between the
//! original and fixed text of a document, for the CLI's dry-run mode.

/// Lines of context around each change.
const CONTEXT: usize = 3;

/// Beyond this many line pairs the diff falls back to one replace-all hunk.
const MAX_TABLE_CELLS: usize = 4_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Equal(usize, usize),
    Delete(usize),
    Insert(usize),
}

/// Generate a unified diff for one file. Returns an empty string when the
/// texts are identical.
pub fn generate_unified_diff(path: &str, old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let a: Vec<&str> = old.split_inclusive('\n').collect();
    let b: Vec<&str> = new.split_inclusive('\n').collect();
    let ops = diff_lines(&a, &b);

    let mut diff = String::new();
    diff.push_str(&format!("--- a/{}\n", path));
    diff.push_str(&format!("+++ b/{}\n", path));

    for (start, end) in hunk_ranges(&ops) {
        let hunk = &ops[start..end];
        let (old_start, old_len) = side_range(hunk, true);
        let (new_start, new_len) = side_range(hunk, false);
        diff.push_str(&format!(
            "@@ -{},{} +{},{} @@\n",
            old_start, old_len, new_start, new_len
        ));
        for op in hunk {
            let (prefix, line) = match *op {
                Op::Equal(i, _) => (' ', a[i]),
                Op::Delete(i) => ('-', a[i]),
                Op::Insert(j) => ('+', b[j]),
            };
            diff.push(prefix);
            diff.push_str(line);
            if !line.ends_with('\n') {
                diff.push('\n');
            }
        }
    }

    diff
}

/// Line-level LCS alignment of `a` against `b`.
fn diff_lines(a: &[&str], b: &[&str]) -> Vec<Op> {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    let mid_a = &a[prefix..a.len() - suffix];
    let mid_b = &b[prefix..b.len() - suffix];

    let mut ops: Vec<Op> = (0..prefix).map(|i| Op::Equal(i, i)).collect();

    if (mid_a.len() + 1).saturating_mul(mid_b.len() + 1) > MAX_TABLE_CELLS {
        ops.extend((0..mid_a.len()).map(|i| Op::Delete(prefix + i)));
        ops.extend((0..mid_b.len()).map(|j| Op::Insert(prefix + j)));
    } else {
        let (n, m) = (mid_a.len(), mid_b.len());
        let width = m + 1;
        let mut table = vec![0u32; (n + 1) * width];
        for i in (0..n).rev() {
            for j in (0..m).rev() {
                table[i * width + j] = if mid_a[i] == mid_b[j] {
                    table[(i + 1) * width + j + 1] + 1
                } else {
                    table[(i + 1) * width + j].max(table[i * width + j + 1])
                };
            }
        }

        let (mut i, mut j) = (0, 0);
        while i < n || j < m {
            if i < n && j < m && mid_a[i] == mid_b[j] {
                ops.push(Op::Equal(prefix + i, prefix + j));
                i += 1;
                j += 1;
            } else if i < n && (j == m || table[(i + 1) * width + j] >= table[i * width + j + 1]) {
                ops.push(Op::Delete(prefix + i));
                i += 1;
            } else {
                ops.push(Op::Insert(prefix + j));
                j += 1;
            }
        }
    }

    let a_tail = a.len() - suffix;
    let b_tail = b.len() - suffix;
    ops.extend((0..suffix).map(|k| Op::Equal(a_tail + k, b_tail + k)));
    ops
}

/// Ranges of `ops` forming hunks, with context merged when hunks touch.
fn hunk_ranges(ops: &[Op]) -> Vec<(usize, usize)> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    for (index, op) in ops.iter().enumerate() {
        if matches!(op, Op::Equal(..)) {
            continue;
        }
        let start = index.saturating_sub(CONTEXT);
        let end = (index + 1 + CONTEXT).min(ops.len());
        match ranges.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => ranges.push((start, end)),
        }
    }
    ranges
}

/// 1-based start line and length of a hunk on the old or new side.
fn side_range(hunk: &[Op], old_side: bool) -> (usize, usize) {
    let lines: Vec<usize> = hunk
        .iter()
        .filter_map(|op| match (*op, old_side) {
            (Op::Equal(i, _), true) | (Op::Delete(i), true) => Some(i),
            (Op::Equal(_, j), false) | (Op::Insert(j), false) => Some(j),
            _ => None,
        })
        .collect();
    match lines.first() {
        Some(&first) => (first + 1, lines.len()),
        // Only an empty file contributes no lines to a hunk.
        None => (0, 0),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_produce_no_diff() {
        assert_eq!(generate_unified_diff("A.cs", "x\n", "x\n"), "");
    }

    #[test]
    fn single_line_change() {
        let old = "a\nb\nc\n";
        let new = "a\nB\nc\n";
        let diff = generate_unified_diff("A.cs", old, new);
        assert!(diff.starts_with("--- a/A.cs\n+++ b/A.cs\n"));
        assert!(diff.contains("@@ -1,3 +1,3 @@\n"));
        assert!(diff.contains("-b\n+B\n"));
        assert!(diff.contains(" a\n"));
    }

    #[test]
    fn inserted_line_is_reported() {
        let old = "using System;\nclass A {}\n";
        let new = "using System;\nusing static Helper;\nclass A {}\n";
        let diff = generate_unified_diff("A.cs", old, new);
        assert!(diff.contains("+using static Helper;\n"));
        assert!(!diff.contains("-using System;"));
        assert!(diff.contains("@@ -1,2 +1,3 @@"));
    }

    #[test]
    fn distant_changes_form_separate_hunks() {
        let old: String = (0..20).map(|i| format!("line{}\n", i)).collect();
        let new = old.replace("line2\n", "LINE2\n").replace("line17\n", "LINE17\n");
        let diff = generate_unified_diff("A.cs", &old, &new);
        assert_eq!(diff.matches("@@ -").count(), 2);
    }

    #[test]
    fn missing_trailing_newline_is_terminated() {
        let diff = generate_unified_diff("A.cs", "a", "b");
        assert!(diff.ends_with("-a\n+b\n"));
    }
}
