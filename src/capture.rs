//! Enclosure capture: swallowing pockets surrounded by the target strain.
//!
//! After a flood, any maximal monochromatic component of another strain whose
//! every outside neighbour is either the target strain or the grid edge flips
//! to the target strain. All components are judged against the board as it was
//! before any flip, then flipped together, so processing order is irrelevant.

use crate::types::{Board, Strain};

/// Flip every component fully enclosed by `target` and the grid edge.
///
/// A single partition scan: one shared seen set means each cell belongs to
/// exactly one examined component. Returns the number of cells flipped.
pub fn capture_enclosed(board: &mut Board, target: Strain) -> usize {
    let mut seen = vec![false; board.len()];
    let mut to_flip = Vec::new();
    let mut component = Vec::new();
    let mut stack = Vec::new();

    for start in 0..board.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let strain = board.cells[start];
        if strain == target {
            continue;
        }

        component.clear();
        stack.push(start);
        let mut surrounded = true;

        while let Some(i) = stack.pop() {
            component.push(i);
            for j in board.neighbor_indices(i) {
                let neighbor = board.cells[j];
                if neighbor == strain {
                    if !seen[j] {
                        seen[j] = true;
                        stack.push(j);
                    }
                } else if neighbor != target {
                    surrounded = false;
                }
            }
        }

        if surrounded {
            to_flip.extend_from_slice(&component);
        }
    }

    for &i in &to_flip {
        board.cells[i] = target;
    }
    to_flip.len()
}
