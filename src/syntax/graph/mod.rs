use std::collections::HashSet;

use syntax::{Arc, Index};

/// Converts a head array into the arc set `{(heads[m], m)}`.
///
/// `heads[0]` is the root's self reference and yields the arc `(0, 0)`.
pub fn arcs_from_heads(heads: &[Index]) -> Vec<Arc> {
    heads
        .iter()
        .enumerate()
        .map(|(m, &h)| (h, m as Index))
        .collect()
}

/// Converts an arc set back into a head array of length `n`.
///
/// Unmentioned words keep head `0`.
pub fn heads_from_arcs(arcs: &[Arc], n: Index) -> Vec<Index> {
    let mut heads = vec![0; n as usize];
    for &(h, m) in arcs {
        if m > 0 {
            heads[m as usize] = h;
        }
    }
    heads
}

/// Returns the word whose head is the root, if it is unique.
pub fn sentence_root(heads: &[Index]) -> Option<Index> {
    let mut root = None;
    for (m, &h) in heads.iter().enumerate().skip(1) {
        if h == 0 {
            if root.is_some() {
                return None;
            }
            root = Some(m as Index);
        }
    }
    root
}

/// Checks for a directed cycle, ignoring self arcs.
pub fn contains_cycles(heads: &[Index]) -> bool {
    let n = heads.len();
    // adjacency from head to modifiers
    let mut children: Vec<Vec<usize>> = vec![vec![]; n];
    for (m, &h) in heads.iter().enumerate() {
        let h = h as usize;
        if h != m && h < n {
            children[h].push(m);
        }
    }
    let mut visited = vec![false; n];
    let mut in_stack = vec![false; n];
    for start in 0..n {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        in_stack[start] = true;
        // iterative DFS carrying the child cursor for each frame
        let mut stack: Vec<(usize, usize)> = vec![(start, 0)];
        while let Some(frame) = stack.last_mut() {
            let (v, cursor) = (frame.0, frame.1);
            if cursor < children[v].len() {
                frame.1 += 1;
                let w = children[v][cursor];
                if in_stack[w] {
                    return true;
                }
                if !visited[w] {
                    visited[w] = true;
                    in_stack[w] = true;
                    stack.push((w, 0));
                }
            } else {
                in_stack[v] = false;
                stack.pop();
            }
        }
    }
    false
}

/// Checks projectivity: every arc must nest within, not cross, the others.
pub fn is_projective(heads: &[Index]) -> bool {
    let n = heads.len() as Index;
    let mut arcs: HashSet<(Index, Index)> = HashSet::with_capacity(heads.len());
    for (m, &h) in heads.iter().enumerate().skip(1) {
        let m = m as Index;
        if h == m {
            continue;
        }
        let (lo, hi) = if h < m { (h, m) } else { (m, h) };
        arcs.insert((lo, hi));
    }
    for &(lo, hi) in &arcs {
        for k in (lo + 1)..hi {
            for m in 0..n {
                if m >= lo && m <= hi {
                    continue;
                }
                let probe = if k < m { (k, m) } else { (m, k) };
                if arcs.contains(&probe) {
                    return false;
                }
            }
        }
    }
    true
}

/// A head array is well formed when it is projective and acyclic.
pub fn is_well_formed(heads: &[Index]) -> bool {
    is_projective(heads) && !contains_cycles(heads)
}
