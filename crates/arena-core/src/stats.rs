//! Battle statistics.
//!
//! Turns backend battle rollups into win/loss figures. Percentages are kept
//! in fixed-point hundredths so that the win and loss shares of a non-empty
//! history always add up to exactly `100.00`.

use std::fmt;

use serde::Serialize;

use crate::model::{AggregatedBattleRecord, BattleRecord};

/// Percentage with two decimal places, stored as hundredths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Percentage(u32);

impl Percentage {
    pub const ZERO: Self = Self(0);

    /// Share of `part` in `whole`, rounded half up to two decimals.
    /// `whole == 0` yields zero.
    pub fn of(part: u64, whole: u64) -> Self {
        if whole == 0 {
            return Self::ZERO;
        }
        let part = u128::from(part.min(whole));
        let whole = u128::from(whole);
        let hundredths = (part * 20_000 + whole) / (whole * 2);
        // part <= whole, so hundredths <= 10_000.
        Self(u32::try_from(hundredths).unwrap_or(10_000))
    }

    pub const fn hundredths(self) -> u32 {
        self.0
    }

    /// `100.00 - self`.
    pub const fn complement(self) -> Self {
        Self(10_000 - self.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// Win/loss summary over a set of aggregated records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_battles: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_percentage: Percentage,
}

impl Summary {
    /// Loss share, derived from the win share so the two sum to `100.00`.
    pub const fn loss_percentage(&self) -> Percentage {
        if self.total_battles == 0 {
            Percentage::ZERO
        } else {
            self.win_percentage.complement()
        }
    }
}

/// Summarize aggregated records: wins are `Σ score1`, losses `Σ score2`.
pub fn summarize(records: &[AggregatedBattleRecord]) -> Summary {
    let (total_wins, total_losses) = records.iter().fold((0u64, 0u64), |(w, l), r| {
        (w + u64::from(r.score1), l + u64::from(r.score2))
    });
    let total_battles = total_wins + total_losses;
    Summary {
        total_battles,
        total_wins,
        total_losses,
        win_percentage: Percentage::of(total_wins, total_battles),
    }
}

/// Summary plus the untouched per-pairing rows, for tabular display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report<'a> {
    pub summary: Summary,
    pub pairings: &'a [AggregatedBattleRecord],
}

pub fn report(records: &[AggregatedBattleRecord]) -> Report<'_> {
    Report {
        summary: summarize(records),
        pairings: records,
    }
}

/// Tally of raw match history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BattleTally {
    pub battles: u64,
    pub wins: u64,
    pub losses: u64,
    pub crowns_gained: i64,
    pub win_percentage: Percentage,
}

pub fn tally(battles: &[BattleRecord]) -> BattleTally {
    let mut t = BattleTally::default();
    for b in battles {
        t.battles += 1;
        if b.is_win {
            t.wins += 1;
        } else {
            t.losses += 1;
        }
        t.crowns_gained = t.crowns_gained.saturating_add(b.crowns_gained);
    }
    t.win_percentage = Percentage::of(t.wins, t.battles);
    t
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rec(score1: u32, score2: u32) -> AggregatedBattleRecord {
        AggregatedBattleRecord {
            name1: "me".into(),
            name2: "them".into(),
            score1,
            score2,
        }
    }

    #[test]
    fn summarize_mixed_records() {
        let s = summarize(&[rec(3, 1), rec(0, 2)]);
        assert_eq!(s.total_wins, 3);
        assert_eq!(s.total_losses, 3);
        assert_eq!(s.total_battles, 6);
        assert_eq!(s.win_percentage.to_string(), "50.00");
        assert_eq!(s.loss_percentage().to_string(), "50.00");
    }

    #[test]
    fn summarize_empty_has_no_division_by_zero() {
        let s = summarize(&[]);
        assert_eq!(s.total_battles, 0);
        assert_eq!(s.win_percentage, Percentage::ZERO);
        assert_eq!(s.loss_percentage(), Percentage::ZERO);
        assert_eq!(s.win_percentage.to_string(), "0.00");
    }

    #[test]
    fn summarize_all_zero_rows_is_empty_summary() {
        let s = summarize(&[rec(0, 0), rec(0, 0)]);
        assert_eq!(s.total_battles, 0);
        assert_eq!(s.win_percentage, Percentage::ZERO);
    }

    #[test]
    fn thirds_round_and_still_sum_to_hundred() {
        let s = summarize(&[rec(1, 2)]);
        assert_eq!(s.win_percentage.to_string(), "33.33");
        assert_eq!(s.loss_percentage().to_string(), "66.67");
    }

    #[test]
    fn two_thirds_rounds_up() {
        let s = summarize(&[rec(2, 1)]);
        assert_eq!(s.win_percentage.to_string(), "66.67");
        assert_eq!(s.loss_percentage().to_string(), "33.33");
    }

    #[test]
    fn half_hundredth_rounds_up() {
        // 1/8 = 12.5%, 1/1600 = 0.0625%, 1/400 = 0.25%
        assert_eq!(Percentage::of(1, 8).to_string(), "12.50");
        assert_eq!(Percentage::of(1, 16).to_string(), "6.25");
        assert_eq!(Percentage::of(1, 20_000).to_string(), "0.01");
        assert_eq!(Percentage::of(1, 20_001).to_string(), "0.00");
    }

    #[test]
    fn perfect_record() {
        let s = summarize(&[rec(5, 0)]);
        assert_eq!(s.win_percentage.to_string(), "100.00");
        assert_eq!(s.win_percentage.hundredths(), 10_000);
        assert_eq!(s.loss_percentage().to_string(), "0.00");
    }

    #[test]
    fn summarize_does_not_overflow_on_large_scores() {
        let s = summarize(&[rec(u32::MAX, u32::MAX), rec(u32::MAX, 0)]);
        assert_eq!(s.total_wins, 2 * u64::from(u32::MAX));
        assert_eq!(s.total_battles, 3 * u64::from(u32::MAX));
        assert_eq!(s.win_percentage.to_string(), "66.67");
    }

    #[test]
    fn report_keeps_rows_unmodified() {
        let rows = vec![rec(3, 1), rec(0, 2)];
        let r = report(&rows);
        assert_eq!(r.pairings, rows.as_slice());
        assert_eq!(r.summary.total_battles, 6);
    }

    #[test]
    fn tally_counts_wins_and_crowns() {
        let battle = |is_win, crowns_gained| BattleRecord {
            opponent_name: "x".into(),
            score: 1,
            opponent_score: 0,
            crowns_gained,
            opponent_crowns_gained: -crowns_gained,
            is_win,
        };
        let t = tally(&[battle(true, 30), battle(false, -20), battle(true, 25)]);
        assert_eq!(t.battles, 3);
        assert_eq!(t.wins, 2);
        assert_eq!(t.losses, 1);
        assert_eq!(t.crowns_gained, 35);
        assert_eq!(t.win_percentage.to_string(), "66.67");
    }

    #[test]
    fn tally_empty() {
        assert_eq!(tally(&[]), BattleTally::default());
    }

    fn arb_records() -> impl Strategy<Value = Vec<AggregatedBattleRecord>> {
        prop::collection::vec((0u32..10_000, 0u32..10_000).prop_map(|(a, b)| rec(a, b)), 1..20)
    }

    proptest! {
        /// Win and loss shares of any non-empty history add up to 100.00.
        #[test]
        fn percentages_sum_to_hundred(records in arb_records()) {
            let s = summarize(&records);
            prop_assume!(s.total_battles > 0);
            let sum = s.win_percentage.hundredths() + s.loss_percentage().hundredths();
            prop_assert_eq!(sum, 10_000);
        }

        /// Totals are the column sums and battles is their sum.
        #[test]
        fn totals_are_column_sums(records in arb_records()) {
            let s = summarize(&records);
            let wins: u64 = records.iter().map(|r| u64::from(r.score1)).sum();
            let losses: u64 = records.iter().map(|r| u64::from(r.score2)).sum();
            prop_assert_eq!(s.total_wins, wins);
            prop_assert_eq!(s.total_losses, losses);
            prop_assert_eq!(s.total_battles, wins + losses);
        }

        /// The rounded share is within half a hundredth of the exact share.
        #[test]
        fn win_share_is_correctly_rounded(wins in 0u64..1_000_000, losses in 0u64..1_000_000) {
            let total = wins + losses;
            prop_assume!(total > 0);
            let p = u128::from(Percentage::of(wins, total).hundredths());
            let exact_x2 = u128::from(wins) * 20_000;
            let total = u128::from(total);
            // |p - exact| <= 1/2  <=>  |2*p*total - 2*exact*total| <= total
            let lhs = 2 * p * total;
            prop_assert!(lhs + total >= exact_x2 && lhs <= exact_x2 + total);
        }
    }
}
