//! Move advisor: one-step look-ahead over every strain.
//!
//! Each candidate is played out on a scratch copy of the board with the same
//! flood and capture rules as a real move, so the live board is never touched.

use serde::Serialize;

use crate::capture::capture_enclosed;
use crate::flood::{flood_recolor, infected_size};
use crate::types::{Board, Strain};

/// Suggested next strain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hint {
    pub strain: Strain,
    /// Infected region size after playing `strain`.
    pub size: usize,
    /// Cells gained over the current infected region.
    pub gain: usize,
}

/// Infected region size that playing `candidate` would produce.
///
/// `infected` is the current region size and is returned as-is for a
/// same-strain candidate.
pub fn evaluate_move(board: &Board, current: Strain, infected: usize, candidate: Strain) -> usize {
    if candidate == current {
        return infected;
    }
    let mut sim = board.clone();
    flood_recolor(&mut sim, current, candidate);
    capture_enclosed(&mut sim, candidate);
    infected_size(&sim, candidate)
}

/// Pick the strain that grows the infected region the most.
///
/// Ties go to the lowest strain index. Returns `None` when there is no
/// strain other than `current` to play.
pub fn suggest_best_move(board: &Board, current: Strain, strains: u8) -> Option<Hint> {
    let infected = infected_size(board, current);
    let mut best: Option<Hint> = None;

    for candidate in (0..strains).filter(|&s| s != current) {
        let size = evaluate_move(board, current, infected, candidate);
        // Strict comparison keeps the earlier, lower index on ties.
        if best.is_none_or(|b| size > b.size) {
            best = Some(Hint {
                strain: candidate,
                size,
                gain: size.saturating_sub(infected),
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(width: usize, rows: &[&[Strain]]) -> Board {
        let cells: Vec<Strain> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Board::from_cells(width, rows.len(), cells)
    }

    #[test]
    fn test_evaluate_does_not_mutate() {
        let b = board(3, &[&[0, 1, 2], &[1, 1, 2], &[2, 2, 0]]);
        let before = b.clone();
        let size = evaluate_move(&b, 0, 1, 1);
        assert_eq!(size, 4);
        assert_eq!(b, before);
    }

    #[test]
    fn test_evaluate_same_strain_returns_current() {
        let b = board(2, &[&[0, 1], &[1, 1]]);
        assert_eq!(evaluate_move(&b, 0, 1, 0), 1);
    }

    #[test]
    fn test_evaluate_counts_captures() {
        // Playing 1 floods the ring; the 2 in the middle is then enclosed.
        let b = board(3, &[&[0, 1, 1], &[1, 2, 1], &[1, 1, 1]]);
        assert_eq!(evaluate_move(&b, 0, 1, 1), 9);
    }

    #[test]
    fn test_suggest_picks_largest() {
        let b = board(4, &[&[0, 2, 2, 2], &[1, 2, 3, 3], &[1, 3, 3, 3], &[3, 3, 3, 3]]);
        let hint = suggest_best_move(&b, 0, 4).unwrap();
        assert_eq!(hint.strain, 2);
        assert_eq!(hint.size, 5);
        assert_eq!(hint.gain, 4);
    }

    #[test]
    fn test_suggest_ties_go_to_lowest_strain() {
        let b = board(3, &[&[3, 2, 2], &[1, 1, 0], &[0, 0, 0]]);
        // 1 and 2 both reach three cells; 0 is not adjacent to the origin.
        let hint = suggest_best_move(&b, 3, 4).unwrap();
        assert_eq!(hint.strain, 1);
        assert_eq!(hint.size, 3);
        assert_eq!(evaluate_move(&b, 3, 1, 2), 3);
    }

    #[test]
    fn test_suggest_needs_two_strains() {
        let b = Board::new(2, 2, 0);
        assert_eq!(suggest_best_move(&b, 0, 1), None);
    }
}
