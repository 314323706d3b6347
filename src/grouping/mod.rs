//! Filename similarity grouping
//!
//! Clusters file paths whose base filenames look alike so the classifier can
//! prompt the model once per group instead of once per file. Clustering is
//! greedy and seed-relative: each candidate is only ever compared against the
//! first (seed) element of the group it may join, never against members added
//! later. Grouping therefore is not a transitive closure, and the test suite
//! depends on that determinism.

use std::path::{Path, PathBuf};

use crate::models::SimilarityGroup;

/// Similarity of two strings as `2*M / (len_a + len_b)`, where M is the total
/// character count of the recursive longest-matching-block alignment.
///
/// Same quantity as Python's `difflib.SequenceMatcher.ratio()` without the
/// autojunk heuristic. Two empty strings are fully similar.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matches = matching_chars(&a, &b);
    2.0 * matches as f64 / total as f64
}

/// Total matched characters: longest common block, then recurse on the
/// unmatched left and right remainders.
fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (ai, bi, len) = longest_match(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..ai], &b[..bi]) + matching_chars(&a[ai + len..], &b[bi + len..])
}

/// Longest common contiguous block between `a` and `b`, earliest in `a` on ties
fn longest_match(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    // lengths[j] = length of the common suffix ending at a[i], b[j]
    let mut lengths = vec![0usize; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        // Walk b right-to-left so lengths[j] still holds the previous row.
        for j in (0..b.len()).rev() {
            if *ca == b[j] {
                let run = lengths[j] + 1;
                lengths[j + 1] = run;
                if run > best.2 {
                    best = (i + 1 - run, j + 1 - run, run);
                }
            } else {
                lengths[j + 1] = 0;
            }
        }
        lengths[0] = 0;
    }
    best
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Cluster `paths` into groups of similar base filenames
///
/// Single greedy pass in input order. Each unassigned path seeds a new group
/// and pulls in every later unassigned path whose base filename is at least
/// `threshold` similar to the seed's. Every input path lands in exactly one
/// group; within a group the seed comes first, members follow in input order.
/// O(n^2) comparisons, which is fine for a single processing batch.
pub fn group_similar_filenames(paths: &[PathBuf], threshold: f64) -> Vec<SimilarityGroup> {
    let names: Vec<String> = paths.iter().map(|p| base_name(p)).collect();
    let mut assigned = vec![false; paths.len()];
    let mut groups = Vec::new();

    for i in 0..paths.len() {
        if assigned[i] {
            continue;
        }
        let mut group = vec![paths[i].clone()];
        assigned[i] = true;
        for j in (i + 1)..paths.len() {
            if !assigned[j] && similarity_ratio(&names[i], &names[j]) >= threshold {
                group.push(paths[j].clone());
                assigned[j] = true;
            }
        }
        groups.push(group);
    }

    groups
}
