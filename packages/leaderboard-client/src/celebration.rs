//! Detecting when a submission takes the top spot.

use crate::model::ScoreRecord;

/// Score of the first record in server order.
pub fn top_score(scores: &[ScoreRecord]) -> Option<u32> {
    scores.first().map(|r| r.score)
}

/// A submission is a new top when it is at least the top after the reload
/// and strictly above the top before it. An absent top ranks below every
/// score.
pub fn is_new_top(submitted: u32, before: Option<u32>, after: Option<u32>) -> bool {
    let beats_after = after.map_or(true, |top| submitted >= top);
    let beats_before = before.map_or(true, |top| submitted > top);
    beats_after && beats_before
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn first_score_on_empty_board_celebrates() {
        assert!(is_new_top(0, None, Some(0)));
    }

    #[test]
    fn tie_with_previous_top_does_not_celebrate() {
        assert!(!is_new_top(30, Some(30), Some(30)));
    }

    #[test]
    fn beating_previous_top_celebrates() {
        assert!(is_new_top(31, Some(30), Some(31)));
    }

    #[test]
    fn overtaken_during_reload_does_not_celebrate() {
        assert!(!is_new_top(31, Some(30), Some(50)));
    }

    #[test]
    fn failed_reload_counts_as_empty() {
        assert!(is_new_top(31, Some(30), None));
    }

    proptest! {
        #[test]
        fn never_celebrates_at_or_below_previous_top(before in 0u32..1000, delta in 0u32..1000) {
            let submitted = before.saturating_sub(delta);
            prop_assert!(!is_new_top(submitted, Some(before), Some(submitted)));
        }
    }
}
