//! Rank-based selection among viable overload candidates.

use super::CallCandidate;

/// Pick the candidate with the lowest total rank.
///
/// Ties are broken by registration order: the first-found candidate wins.
/// Returns `None` when no candidate survived argument checking.
pub fn best_match(viable: Vec<CallCandidate>) -> Option<CallCandidate> {
    let mut best: Option<CallCandidate> = None;
    for candidate in viable {
        match &best {
            // Strictly lower rank replaces; an equal rank keeps the earlier
            // candidate.
            Some(current) if candidate.rank >= current.rank => {}
            _ => best = Some(candidate),
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use stencil_core::Value;

    fn candidate(index: usize, rank: u32) -> CallCandidate {
        CallCandidate {
            index,
            rank,
            args: vec![Value::Long(0)],
        }
    }

    #[test]
    fn lowest_rank_wins() {
        let best = best_match(vec![candidate(0, 5), candidate(1, 2), candidate(2, 4)]).unwrap();
        assert_eq!(best.index, 1);
    }

    #[test]
    fn tie_goes_to_first_found() {
        let best = best_match(vec![candidate(0, 2), candidate(1, 2)]).unwrap();
        assert_eq!(best.index, 0);
    }

    #[test]
    fn single_candidate_returns_it() {
        let best = best_match(vec![candidate(3, 9)]).unwrap();
        assert_eq!(best.index, 3);
    }

    #[test]
    fn empty_is_none() {
        assert!(best_match(Vec::new()).is_none());
    }
}
