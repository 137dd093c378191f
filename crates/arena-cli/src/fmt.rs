//! Output formatting helpers.

use std::io::{self, Write};

use arena_client::{ApiError, SubscriptionView};
use arena_core::model::{BattleRecord, Principal};
use arena_core::stats::{BattleTally, Report};

/// One-line, user-facing reason for an API failure.
pub fn describe_api_error(err: &ApiError) -> String {
    match err {
        ApiError::Api { detail, .. } => detail.clone(),
        ApiError::Transport(_) => "could not reach the server".into(),
        ApiError::Decode(_) => "unexpected response from the server".into(),
        ApiError::Config(msg) => msg.clone(),
    }
}

pub fn write_principal(w: &mut impl Write, p: &Principal) -> io::Result<()> {
    writeln!(w, "  Name:     {}", p.display_name())?;
    writeln!(w, "  Tag:      {}", p.tag)?;
    writeln!(w, "  ID:       {}", p.id)?;
    writeln!(w, "  Crowns:   {} (best {})", p.crowns, p.max_crowns)?;
    if p.is_super_user {
        writeln!(w, "  Role:     administrator")?;
    }
    Ok(())
}

pub fn write_directory(w: &mut impl Write, view: &SubscriptionView) -> io::Result<()> {
    if view.users().is_empty() {
        writeln!(w, "No other players yet.")?;
        return Ok(());
    }
    writeln!(
        w,
        "{:<8} {:<20} {:>8} {:>8}  FOLLOWING",
        "ID", "NAME", "CROWNS", "BEST"
    )?;
    for (user, subscribed) in view.rows() {
        writeln!(
            w,
            "{:<8} {:<20} {:>8} {:>8}  {}",
            user.id,
            truncate(&user.name, 20),
            user.crowns,
            user.max_crowns,
            if subscribed { "yes" } else { "no" }
        )?;
    }
    Ok(())
}

pub fn write_battles(w: &mut impl Write, battles: &[BattleRecord]) -> io::Result<()> {
    if battles.is_empty() {
        writeln!(w, "No battles yet.")?;
        return Ok(());
    }
    writeln!(
        w,
        "{:<20} {:>7} {:>8} {:>8}  RESULT",
        "OPPONENT", "SCORE", "CROWNS", "THEIRS"
    )?;
    for b in battles {
        writeln!(
            w,
            "{:<20} {:>7} {:>+8} {:>+8}  {}",
            truncate(&b.opponent_name, 20),
            format!("{}:{}", b.score, b.opponent_score),
            b.crowns_gained,
            b.opponent_crowns_gained,
            if b.is_win { "win" } else { "loss" }
        )?;
    }
    Ok(())
}

pub fn write_tally(w: &mut impl Write, t: &BattleTally) -> io::Result<()> {
    writeln!(
        w,
        "{} battles, {} wins, {} losses ({}% won), crowns {:+}",
        t.battles, t.wins, t.losses, t.win_percentage, t.crowns_gained
    )
}

pub fn write_report(w: &mut impl Write, report: &Report<'_>) -> io::Result<()> {
    let s = &report.summary;
    writeln!(w, "  Battles:  {}", s.total_battles)?;
    writeln!(w, "  Wins:     {} ({}%)", s.total_wins, s.win_percentage)?;
    writeln!(w, "  Losses:   {} ({}%)", s.total_losses, s.loss_percentage())?;

    if report.pairings.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    writeln!(
        w,
        "{:<20} {:<20} {:>7} {:>7}",
        "PLAYER", "OPPONENT", "WON", "LOST"
    )?;
    for row in report.pairings {
        writeln!(
            w,
            "{:<20} {:<20} {:>7} {:>7}",
            truncate(&row.name1, 20),
            truncate(&row.name2, 20),
            row.score1,
            row.score2
        )?;
    }
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(max.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use arena_core::model::{AggregatedBattleRecord, SubscriptionEdge, UserSummary};
    use arena_core::stats;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn report_shows_two_decimal_percentages() {
        let rows = vec![
            AggregatedBattleRecord {
                name1: "alice".into(),
                name2: "bob".into(),
                score1: 3,
                score2: 1,
            },
            AggregatedBattleRecord {
                name1: "alice".into(),
                name2: "carol".into(),
                score1: 0,
                score2: 2,
            },
        ];
        let out = render(|w| write_report(w, &stats::report(&rows)));
        assert!(out.contains("Battles:  6"));
        assert!(out.contains("Wins:     3 (50.00%)"));
        assert!(out.contains("Losses:   3 (50.00%)"));
        assert!(out.contains("carol"));
    }

    #[test]
    fn empty_report_has_zero_percentages_and_no_table() {
        let out = render(|w| write_report(w, &stats::report(&[])));
        assert!(out.contains("Wins:     0 (0.00%)"));
        assert!(out.contains("Losses:   0 (0.00%)"));
        assert!(!out.contains("OPPONENT"));
    }

    #[test]
    fn directory_marks_followed_players() {
        let view = SubscriptionView::from_parts(
            vec![UserSummary {
                id: 2,
                name: "bob".into(),
                crowns: 80,
                max_crowns: 90,
            }],
            &[SubscriptionEdge {
                user_id1: None,
                user_id2: 2,
            }],
        );
        let out = render(|w| write_directory(w, &view));
        let line = out.lines().find(|l| l.contains("bob")).unwrap();
        assert!(line.trim_end().ends_with("yes"));
    }

    #[test]
    fn empty_directory_message() {
        let out = render(|w| write_directory(w, &SubscriptionView::default()));
        assert_eq!(out.trim(), "No other players yet.");
    }

    #[test]
    fn battles_show_signed_crowns() {
        let battles = vec![BattleRecord {
            opponent_name: "bob".into(),
            score: 3,
            opponent_score: 1,
            crowns_gained: 30,
            opponent_crowns_gained: -30,
            is_win: true,
        }];
        let out = render(|w| write_battles(w, &battles));
        assert!(out.contains("3:1"));
        assert!(out.contains("+30"));
        assert!(out.contains("-30"));
        assert!(out.contains("win"));
    }

    #[test]
    fn api_error_descriptions() {
        let err = ApiError::Api {
            status: 400,
            detail: "Already subscribed".into(),
        };
        assert_eq!(describe_api_error(&err), "Already subscribed");
        assert_eq!(
            describe_api_error(&ApiError::Config("bad url".into())),
            "bad url"
        );
    }

    #[test]
    fn truncate_long_names() {
        assert_eq!(truncate("short", 20), "short");
        let t = truncate("abcdefghijklmnopqrstuvwxyz", 10);
        assert_eq!(t.chars().count(), 10);
        assert!(t.ends_with('…'));
    }
}
