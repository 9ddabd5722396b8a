//! Filtering, sorting and ranking of the loaded scores for display.

use crate::model::ScoreRecord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDir {
    #[default]
    Desc,
    Asc,
}

impl SortDir {
    pub fn toggled(self) -> Self {
        match self {
            SortDir::Desc => SortDir::Asc,
            SortDir::Asc => SortDir::Desc,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortDir::Desc => "High → Low",
            SortDir::Asc => "Low → High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

/// One displayed row. `rank` is the 1-based position in the displayed
/// view, not the record's position on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRow<'a> {
    pub rank: usize,
    pub record: &'a ScoreRecord,
}

impl RankedRow<'_> {
    pub fn medal(&self) -> Option<Medal> {
        match self.rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }
}

/// Case-insensitive substring filter on the trimmed `filter`, then a
/// stable sort by score, then ranks assigned from the result.
pub fn displayed<'a>(scores: &'a [ScoreRecord], filter: &str, sort: SortDir) -> Vec<RankedRow<'a>> {
    let needle = filter.trim().to_lowercase();

    let mut rows: Vec<&ScoreRecord> = scores
        .iter()
        .filter(|r| needle.is_empty() || r.name.to_lowercase().contains(&needle))
        .collect();

    match sort {
        SortDir::Desc => rows.sort_by(|a, b| b.score.cmp(&a.score)),
        SortDir::Asc => rows.sort_by(|a, b| a.score.cmp(&b.score)),
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, record)| RankedRow { rank: i + 1, record })
        .collect()
}

#[cfg(test)]
pub(crate) mod fixtures {
    use time::macros::datetime;

    use crate::model::ScoreRecord;

    pub fn record(id: &str, name: &str, score: u32) -> ScoreRecord {
        ScoreRecord {
            id: id.to_string(),
            name: name.to_string(),
            score,
            created_at: datetime!(2024-05-01 10:00 UTC),
            updated_at: datetime!(2024-05-01 10:00 UTC),
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::fixtures::record;
    use super::*;

    fn board() -> Vec<ScoreRecord> {
        vec![
            record("1", "Bo", 30),
            record("2", "Cy", 30),
            record("3", "Ann", 10),
            record("4", "Dana", 20),
        ]
    }

    #[test]
    fn filter_is_case_insensitive_and_reranks() {
        let scores = board();
        let rows = displayed(&scores, "  AN ", SortDir::Desc);
        let view: Vec<(usize, &str)> = rows.iter().map(|r| (r.rank, r.record.name.as_str())).collect();
        assert_eq!(view, [(1, "Dana"), (2, "Ann")]);
    }

    #[test]
    fn ascending_sort_keeps_ties_in_server_order() {
        let scores = board();
        let names: Vec<&str> = displayed(&scores, "", SortDir::Asc)
            .iter()
            .map(|r| r.record.name.as_str())
            .collect();
        assert_eq!(names, ["Ann", "Dana", "Bo", "Cy"]);
    }

    #[test]
    fn no_match_is_empty() {
        let scores = board();
        assert!(displayed(&scores, "zed", SortDir::Desc).is_empty());
    }

    #[test]
    fn medals_for_top_three_only() {
        let scores = board();
        let medals: Vec<Option<Medal>> = displayed(&scores, "", SortDir::Desc)
            .iter()
            .map(RankedRow::medal)
            .collect();
        assert_eq!(
            medals,
            [Some(Medal::Gold), Some(Medal::Silver), Some(Medal::Bronze), None]
        );
    }

    proptest! {
        #[test]
        fn ranks_are_contiguous_and_scores_monotonic(scores in proptest::collection::vec(0u32..100, 0..20)) {
            let records: Vec<ScoreRecord> = scores
                .iter()
                .enumerate()
                .map(|(i, s)| record(&i.to_string(), &format!("p{i}"), *s))
                .collect();
            let rows = displayed(&records, "", SortDir::Desc);
            prop_assert_eq!(rows.len(), records.len());
            for (i, pair) in rows.windows(2).enumerate() {
                prop_assert_eq!(pair[0].rank, i + 1);
                prop_assert!(pair[0].record.score >= pair[1].record.score);
            }
        }
    }
}
