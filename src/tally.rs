use crate::db::models::Candidate;
use serde::Serialize;

/// Running totals shown on every public page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TallySummary {
    pub total_votes: i64,
    pub percent: f64,
}

impl TallySummary {
    pub fn from_candidates(candidates: &[Candidate], total_max: i64) -> Self {
        let total_votes = total_votes(candidates);
        TallySummary {
            total_votes,
            percent: turnout_percent(total_votes, total_max),
        }
    }

    /// Percentage with exactly one decimal digit, e.g. `67.5` or `0.0`.
    pub fn percent_label(&self) -> String {
        format!("{:.1}", self.percent)
    }
}

/// Sum of every row's votes, saturating at the `i64` bounds.
pub fn total_votes(candidates: &[Candidate]) -> i64 {
    let sum: i128 = candidates.iter().map(|c| i128::from(c.votes)).sum();
    sum.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Share of `total_max` reached by `total_votes`, clamped to [0, 100] and
/// rounded to the nearest tenth.
pub fn turnout_percent(total_votes: i64, total_max: i64) -> f64 {
    if total_max == 0 {
        return 0.0;
    }

    let raw = total_votes as f64 / total_max as f64 * 100.0;
    if !raw.is_finite() {
        return 0.0;
    }

    (raw.clamp(0.0, 100.0) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, votes: i64) -> Candidate {
        Candidate {
            id,
            name: format!("Candidate {id}"),
            partner: None,
            photo: None,
            votes,
        }
    }

    #[test]
    fn sums_every_row() {
        let rows = vec![candidate(1, 100), candidate(2, 250), candidate(3, 689)];
        assert_eq!(total_votes(&rows), 1039);
        assert_eq!(total_votes(&[]), 0);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let rows = vec![candidate(1, i64::MAX), candidate(2, 10)];
        let summary = TallySummary::from_candidates(&rows, 1539);
        assert_eq!(summary.total_votes, i64::MAX);
        assert_eq!(summary.percent, 100.0);

        let rows = vec![candidate(1, i64::MIN), candidate(2, -10)];
        let summary = TallySummary::from_candidates(&rows, 1539);
        assert_eq!(summary.total_votes, i64::MIN);
        assert_eq!(summary.percent, 0.0);

        let rows = vec![candidate(1, i64::MAX), candidate(2, 10), candidate(3, -20)];
        assert_eq!(total_votes(&rows), i64::MAX - 10);
    }

    #[test]
    fn reference_turnout() {
        let rows = vec![candidate(1, 100), candidate(2, 250), candidate(3, 689)];
        let summary = TallySummary::from_candidates(&rows, 1539);
        assert_eq!(summary.total_votes, 1039);
        assert_eq!(summary.percent, 67.5);
        assert_eq!(summary.percent_label(), "67.5");
    }

    #[test]
    fn zero_expected_total_yields_zero() {
        assert_eq!(turnout_percent(0, 0), 0.0);
        assert_eq!(turnout_percent(500, 0), 0.0);
    }

    #[test]
    fn clamps_to_bounds() {
        assert_eq!(turnout_percent(5000, 1539), 100.0);
        assert_eq!(turnout_percent(i64::MAX, 1), 100.0);
        assert_eq!(turnout_percent(-20, 1539), 0.0);
        assert_eq!(turnout_percent(20, -1539), 0.0);
    }

    #[test]
    fn stays_in_range_for_many_inputs() {
        for total in (-3000..=6000).step_by(7) {
            let percent = turnout_percent(total, 1539);
            assert!((0.0..=100.0).contains(&percent), "{total} -> {percent}");
            let tenths = percent * 10.0;
            assert!((tenths - tenths.round()).abs() < 1e-9, "{total} -> {percent}");
        }
    }

    #[test]
    fn label_always_has_one_decimal() {
        let label = |votes, max| {
            TallySummary {
                total_votes: votes,
                percent: turnout_percent(votes, max),
            }
            .percent_label()
        };
        assert_eq!(label(0, 1539), "0.0");
        assert_eq!(label(1539, 1539), "100.0");
        assert_eq!(label(1, 3), "33.3");
        assert_eq!(label(10, 0), "0.0");
    }
}
