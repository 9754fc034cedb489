//! Shuffle selection
//!
//! Picks a random index that has not been visited since shuffle was enabled.
//! Once every index has been visited the candidate pool resets to everything
//! except the current index, so the same track never plays twice in a row.

use rand::seq::SliceRandom;
use rand::Rng;

/// Result of a shuffle pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShufflePick {
    /// Chosen index into the collection
    pub index: usize,

    /// True if every index had been visited and the pool was reset
    pub exhausted: bool,
}

/// Pick the next shuffled index
///
/// Candidates are all indices in `0..len` not present in `history`. When that
/// set is empty the pool becomes every index except `exclude_current`.
///
/// Returns `None` only when `len == 0`. A single-track collection always
/// yields index 0.
pub fn pick_shuffle_index<R: Rng + ?Sized>(
    rng: &mut R,
    exclude_current: Option<usize>,
    history: &[usize],
    len: usize,
) -> Option<ShufflePick> {
    if len == 0 {
        return None;
    }
    if len == 1 {
        return Some(ShufflePick {
            index: 0,
            exhausted: history.contains(&0),
        });
    }

    let unvisited: Vec<usize> = (0..len).filter(|i| !history.contains(i)).collect();
    if let Some(&index) = unvisited.choose(rng) {
        return Some(ShufflePick {
            index,
            exhausted: false,
        });
    }

    let pool: Vec<usize> = (0..len).filter(|&i| Some(i) != exclude_current).collect();
    pool.choose(rng).map(|&index| ShufflePick {
        index,
        exhausted: true,
    })
}
