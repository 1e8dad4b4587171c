//! Growing and measuring the infected region.
//!
//! The infected region is the 4-connected component of the current strain that
//! contains the origin `(0, 0)`. Traversals use an explicit stack and a
//! board-sized seen set; visiting order never changes the result.

use crate::types::{Board, Strain};

const ORIGIN: usize = 0;

/// Recolor the infected region to `target`, merging adjacent `target` cells.
///
/// Walks out from the origin through every cell holding `origin` or `target`
/// and paints each visited cell `target`. Each cell is visited at most once.
/// Returns the number of cells painted.
///
/// Callers must not pass `origin == target`; that is a rejected move upstream.
pub fn flood_recolor(board: &mut Board, origin: Strain, target: Strain) -> usize {
    debug_assert_ne!(origin, target, "same-strain flood");

    let mut seen = vec![false; board.len()];
    let mut stack = vec![ORIGIN];
    seen[ORIGIN] = true;
    let mut painted = 0;

    while let Some(i) = stack.pop() {
        let strain = board.cells[i];
        if strain != origin && strain != target {
            continue;
        }
        board.cells[i] = target;
        painted += 1;

        for j in board.neighbor_indices(i) {
            if !seen[j] {
                seen[j] = true;
                stack.push(j);
            }
        }
    }

    painted
}

/// Size of the 4-connected component of `strain` containing the origin.
///
/// Zero when the origin holds a different strain.
pub fn infected_size(board: &Board, strain: Strain) -> usize {
    if board.is_empty() || board.cells[ORIGIN] != strain {
        return 0;
    }

    let mut seen = vec![false; board.len()];
    let mut stack = vec![ORIGIN];
    seen[ORIGIN] = true;
    let mut count = 0;

    while let Some(i) = stack.pop() {
        count += 1;
        for j in board.neighbor_indices(i) {
            if !seen[j] && board.cells[j] == strain {
                seen[j] = true;
                stack.push(j);
            }
        }
    }

    count
}
